// tests/domain_test.rs

use poker_chiprack::domain::{
    pot_from_log, BetKind, BetRecord, Chips, GameSession, Player, PlayerStatus, RoomCode,
    SessionConfig, SessionStatus, DEFAULT_BUY_IN, MAX_SEATS,
};
use poker_chiprack::engine::SessionError;

fn session() -> GameSession {
    GameSession::new(3, RoomCode::new("DOM001"), SessionConfig::default(), 42)
}

#[test]
fn config_derives_blinds_from_buy_in() {
    let cfg = SessionConfig::default();
    assert_eq!(cfg.buy_in, DEFAULT_BUY_IN);
    assert_eq!(cfg.small_blind, Chips(5.0));
    assert_eq!(cfg.big_blind, Chips(10.0));
    assert_eq!(cfg.max_seats, MAX_SEATS);
    assert_eq!(cfg.initial_round, "preflop");
    assert!(cfg.validate().is_ok());

    let cfg = SessionConfig::from_buy_in(Chips(50.0));
    assert_eq!(cfg.small_blind, Chips(2.5));
    assert_eq!(cfg.big_blind, Chips(5.0));
}

#[test]
fn config_validation() {
    let bad_buy_in = SessionConfig::from_buy_in(Chips::ZERO);
    assert!(matches!(bad_buy_in.validate(), Err(SessionError::InvalidConfig(_))));

    let mut too_many_seats = SessionConfig::default();
    too_many_seats.max_seats = 11;
    assert!(too_many_seats.validate().is_err());

    for bad in [f64::INFINITY, f64::NEG_INFINITY, f64::NAN] {
        let cfg = SessionConfig::from_buy_in(Chips(bad));
        assert!(matches!(cfg.validate(), Err(SessionError::InvalidConfig(_))));

        let mut blinds = SessionConfig::default();
        blinds.small_blind = Chips(bad);
        assert!(blinds.validate().is_err());

        let mut blinds = SessionConfig::default();
        blinds.big_blind = Chips(bad);
        assert!(blinds.validate().is_err());
    }

    let mut inverted = SessionConfig::default();
    inverted.small_blind = Chips(20.0);
    assert!(inverted.validate().is_err());
}

#[test]
fn new_session_is_waiting_and_empty() {
    let s = session();
    assert_eq!(s.status, SessionStatus::Waiting);
    assert_eq!(s.pot, Chips::ZERO);
    assert_eq!(s.round, "preflop");
    assert_eq!(s.hand_no, 0);
    assert_eq!(s.current_turn, None);
    assert_eq!(s.dealer_seat, None);
    assert!(!s.is_started);
    assert_eq!(s.created_at, 42);
    assert!(!s.all_ready());
}

#[test]
fn players_kept_in_seat_order() {
    let mut s = session();
    s.insert_player(Player::new(1, "C", 3, Chips(100.0)));
    s.insert_player(Player::new(2, "A", 1, Chips(100.0)));
    s.insert_player(Player::new(3, "B", 2, Chips(100.0)));

    let seats: Vec<u8> = s.players.iter().map(|p| p.seat).collect();
    assert_eq!(seats, vec![1, 2, 3]);
    assert_eq!(s.require_player(3).unwrap().name, "B");
    assert_eq!(s.require_player(9).unwrap_err(), SessionError::PlayerNotFound(9));
}

#[test]
fn highest_bet_and_chip_count() {
    let mut s = session();
    s.insert_player(Player::new(1, "A", 1, Chips(100.0)));
    s.insert_player(Player::new(2, "B", 2, Chips(100.0)));
    assert_eq!(s.highest_bet(), Chips::ZERO);

    {
        let a = s.player_mut(1).unwrap();
        a.balance -= Chips(30.0);
        a.current_bet = Chips(30.0);
    }
    s.pot = Chips(30.0);

    assert_eq!(s.highest_bet(), Chips(30.0));
    assert_eq!(s.chips_in_play(), Chips(200.0));
    assert_eq!(s.count_with_status(PlayerStatus::Active), 2);
}

#[test]
fn player_net_tracks_rebuys() {
    let mut p = Player::new(1, "A", 1, Chips(100.0));
    assert_eq!(p.net(), Chips::ZERO);
    assert!(p.can_act());

    p.balance = Chips(20.0);
    p.total_buy_in += Chips(100.0);
    assert_eq!(p.net(), Chips(-180.0));

    p.status = PlayerStatus::AllIn;
    assert!(!p.can_act());
}

#[test]
fn pot_from_log_counts_only_given_hand() {
    let rec = |amount: f64, hand_no: u32| BetRecord {
        session_id: 3,
        player_id: 1,
        amount: Chips(amount),
        kind: BetKind::Call,
        round: "flop".into(),
        hand_no,
        timestamp: 0,
    };
    let log = vec![rec(10.0, 1), rec(15.0, 1), rec(40.0, 2)];

    assert_eq!(pot_from_log(&log, 1), Chips(25.0));
    assert_eq!(pot_from_log(&log, 2), Chips(40.0));
    assert_eq!(pot_from_log(&log, 3), Chips::ZERO);
}

#[test]
fn status_and_room_code_display() {
    assert_eq!(SessionStatus::Waiting.to_string(), "waiting");
    assert_eq!(SessionStatus::Finished.to_string(), "finished");
    assert_eq!(RoomCode::new("X1Y2Z3").to_string(), "X1Y2Z3");

    // Код комнаты и фишки в JSON – просто строка и число.
    assert_eq!(serde_json::to_string(&RoomCode::new("AB")).unwrap(), "\"AB\"");
    assert_eq!(serde_json::to_string(&Chips(2.5)).unwrap(), "2.5");
}
