// tests/infra_test.rs

use poker_chiprack::{
    domain::{BetKind, BetRecord, Chips, GameSession, RoomCode, SessionConfig},
    engine::SessionEventKind,
    infra::{
        ids::IdGenerator,
        persistence::{InMemorySessionStorage, SessionStorage},
        rng::{DeterministicRng, RandomSource, SystemRng},
        room_code::{generate_room_code, generate_unique_room_code, ROOM_CODE_LEN},
    },
    state::{ChipRackState, StoredSession},
};

//
// ---------- helpers ----------
//

fn stored(code: &str) -> StoredSession {
    StoredSession::fresh(GameSession::new(
        1,
        RoomCode::new(code),
        SessionConfig::default(),
        0,
    ))
}

fn record(amount: f64, hand_no: u32) -> BetRecord {
    BetRecord {
        session_id: 1,
        player_id: 1,
        amount: Chips(amount),
        kind: BetKind::Raise,
        round: "preflop".into(),
        hand_no,
        timestamp: 0,
    }
}

//
// ---------- ids ----------
//

#[test]
fn id_generator_is_monotonic_per_kind() {
    let ids = IdGenerator::new();
    assert_eq!(ids.next_session_id(), 1);
    assert_eq!(ids.next_session_id(), 2);
    assert_eq!(ids.next_player_id(), 1);

    let restored = IdGenerator::starting_at(10, 500);
    assert_eq!(restored.next_session_id(), 10);
    assert_eq!(restored.next_player_id(), 500);
    assert_eq!(restored.next_player_id(), 501);
}

//
// ---------- rng / room codes ----------
//

#[test]
fn deterministic_rng_replays_room_codes() {
    let mut a = DeterministicRng::from_u64(2024);
    let mut b = DeterministicRng::from_u64(2024);

    let codes_a: Vec<RoomCode> = (0..5).map(|_| generate_room_code(&mut a)).collect();
    let codes_b: Vec<RoomCode> = (0..5).map(|_| generate_room_code(&mut b)).collect();
    assert_eq!(codes_a, codes_b);
}

#[test]
fn system_rng_stays_in_range() {
    let mut rng = SystemRng::default();
    for upper in [1usize, 2, 36, 1000] {
        for _ in 0..100 {
            assert!(rng.next_index(upper) < upper);
        }
    }

    let code = generate_room_code(&mut rng);
    assert_eq!(code.as_str().len(), ROOM_CODE_LEN);
}

#[test]
fn unique_code_skips_taken_ones() {
    let taken = generate_room_code(&mut DeterministicRng::from_u64(5));

    let mut rng = DeterministicRng::from_u64(5);
    let code = generate_unique_room_code(&mut rng, |c| *c == taken).unwrap();
    assert_ne!(code, taken);
}

//
// ---------- persistence ----------
//

#[test]
fn in_memory_storage_roundtrip() {
    let mut storage = InMemorySessionStorage::new();
    let code = RoomCode::new("ROOM42");
    assert!(!storage.contains(&code));
    assert!(storage.load_session(&code).is_none());

    let mut s = stored("ROOM42");
    s.history.push(
        5,
        SessionEventKind::PlayerJoined {
            player_id: 1,
            name: "Alice".into(),
            seat: 1,
        },
    );
    storage.save_session(&s);

    assert!(storage.contains(&code));
    assert_eq!(storage.load_session(&code), Some(s.clone()));
    assert_eq!(storage.room_codes(), vec![code.clone()]);

    let (session, history) = s.into_parts();
    assert_eq!(session.room_code, code);
    assert_eq!(history.len(), 1);
}

#[test]
fn bet_log_is_append_only_per_room() {
    let mut storage = InMemorySessionStorage::new();
    let a = RoomCode::new("AAAAAA");
    let b = RoomCode::new("BBBBBB");

    storage.append_bet(&a, &record(10.0, 1));
    storage.append_bet(&a, &record(20.0, 1));
    storage.append_bet(&b, &record(5.0, 1));

    let log = storage.bets(&a);
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].amount, Chips(10.0));
    assert_eq!(log[1].amount, Chips(20.0));
    assert_eq!(storage.bets(&b).len(), 1);
    assert!(storage.bets(&RoomCode::new("CCCCCC")).is_empty());
}

#[test]
fn stored_session_survives_json() {
    let s = stored("JSON01");
    let json = serde_json::to_string(&s).unwrap();
    let back: StoredSession = serde_json::from_str(&json).unwrap();
    assert_eq!(back, s);
    assert_eq!(back.room_code().as_str(), "JSON01");
}

//
// ---------- on-chain state ----------
//

#[test]
fn id_counters_continue_after_restore() {
    let ids = IdGenerator::new();
    ids.next_session_id();
    ids.next_player_id();
    ids.next_player_id();

    // То, что ChipRackState::record_ids кладёт в регистры.
    assert_eq!((ids.peek_session_id(), ids.peek_player_id()), (2, 3));
    // peek ничего не выдаёт.
    assert_eq!(ids.next_player_id(), 3);

    let restored = IdGenerator::starting_at(ids.peek_session_id(), ids.peek_player_id());
    assert_eq!(restored.next_session_id(), 2);
    assert_eq!(restored.next_player_id(), 4);

    // Контракт сохраняет и восстанавливает счётчики именно этими методами.
    let _restore: fn(&ChipRackState) -> IdGenerator = ChipRackState::id_generator;
    let _record: fn(&mut ChipRackState, &IdGenerator) = ChipRackState::record_ids;
}
