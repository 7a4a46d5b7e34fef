// tests/seat_registry_tests.rs
//
// Выдача мест:
//  1) пустая сессия → место 1
//  2) места 1..N подряд → N+1
//  3) дырка в нумерации → первая дырка
//  4) все 10 мест заняты → SessionFull
//  5) assign_seat ничего не мутирует

use poker_chiprack::domain::{Chips, GameSession, Player, RoomCode, SessionConfig};
use poker_chiprack::engine::{assign_seat, SessionError};

fn empty_session() -> GameSession {
    GameSession::new(1, RoomCode::new("SEATS1"), SessionConfig::default(), 0)
}

fn session_with_seats(seats: &[u8]) -> GameSession {
    let mut s = empty_session();
    for (i, &seat) in seats.iter().enumerate() {
        let id = i as u64 + 1;
        s.insert_player(Player::new(id, format!("P{id}"), seat, Chips(100.0)));
    }
    s
}

#[test]
fn empty_session_gets_seat_one() {
    assert_eq!(assign_seat(&empty_session()), Ok(1));
}

#[test]
fn consecutive_seats_give_next_number() {
    let s = session_with_seats(&[1, 2, 3]);
    assert_eq!(assign_seat(&s), Ok(4));
}

#[test]
fn first_gap_is_reused() {
    // Игрок с места 2 ушёл – новый садится туда же, а не на 5.
    let s = session_with_seats(&[4, 1, 3]);
    assert_eq!(assign_seat(&s), Ok(2));
}

#[test]
fn full_table_is_rejected() {
    let s = session_with_seats(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    assert_eq!(
        assign_seat(&s),
        Err(SessionError::SessionFull { max_seats: 10 })
    );
}

#[test]
fn smaller_table_respects_its_own_limit() {
    let mut s = session_with_seats(&[1, 2, 3]);
    s.config.max_seats = 3;
    assert!(matches!(assign_seat(&s), Err(SessionError::SessionFull { max_seats: 3 })));

    s.players.retain(|p| p.seat != 2);
    assert_eq!(assign_seat(&s), Ok(2));
}

#[test]
fn assign_seat_is_a_pure_query() {
    let s = session_with_seats(&[1, 2]);
    let before = s.clone();
    let _ = assign_seat(&s);
    let _ = assign_seat(&s);
    assert_eq!(s, before);
}
