// tests/betting_engine_tests.rs
//
// Движок ставок:
//  - check / call / raise / all-in / fold и их отказы;
//  - при отказе исходный снимок не меняется;
//  - balance + current_bet сохраняется при ставке;
//  - банк всегда равен сумме журнала ставок текущей раздачи.

use poker_chiprack::domain::{
    pot_from_log, BetKind, BetRecord, Chips, GameSession, Player, PlayerId, PlayerStatus, RoomCode,
    SessionConfig, SessionStatus,
};
use poker_chiprack::engine::lifecycle;
use poker_chiprack::engine::{apply_action, PlayerAction, PlayerActionKind, SessionError};

/// Идущая игра: игрок i сидит на месте i, у каждого указанный стек.
/// Ход у игрока 1.
fn active_session(balances: &[f64]) -> GameSession {
    let mut s = GameSession::new(1, RoomCode::new("BETS01"), SessionConfig::default(), 0);
    for (i, &b) in balances.iter().enumerate() {
        let id = i as PlayerId + 1;
        let mut p = Player::new(id, format!("P{id}"), id as u8, Chips(100.0));
        p.balance = Chips(b);
        s.insert_player(p);
    }
    s.status = SessionStatus::Active;
    s.is_started = true;
    s.hand_no = 1;
    s.current_turn = Some(1);
    s
}

fn action(player_id: PlayerId, kind: PlayerActionKind) -> PlayerAction {
    PlayerAction::new(player_id, kind)
}

#[test]
fn check_allowed_when_matching_highest_bet() {
    let mut s = active_session(&[40.0, 90.0]);
    s.player_mut(1).unwrap().current_bet = Chips(10.0);
    s.player_mut(2).unwrap().current_bet = Chips(10.0);

    let out = apply_action(&s, &action(1, PlayerActionKind::Check), 5).unwrap();

    assert!(out.bet.is_none());
    assert_eq!(out.player.balance, Chips(40.0));
    assert_eq!(out.player.current_bet, Chips(10.0));
    assert_eq!(out.session.pot, s.pot);
}

#[test]
fn check_rejected_when_behind_highest_bet() {
    let mut s = active_session(&[40.0, 70.0]);
    s.player_mut(1).unwrap().current_bet = Chips(10.0);
    s.player_mut(2).unwrap().current_bet = Chips(30.0);

    let err = apply_action(&s, &action(1, PlayerActionKind::Check), 5).unwrap_err();
    assert_eq!(err, SessionError::MustCallOrRaise { to_call: Chips(20.0) });
}

#[test]
fn raise_above_balance_is_rejected_and_snapshot_untouched() {
    let s = active_session(&[50.0, 100.0]);
    let before = s.clone();

    let err = apply_action(&s, &action(1, PlayerActionKind::Raise(Chips(60.0))), 5).unwrap_err();

    assert_eq!(
        err,
        SessionError::InsufficientBalance {
            needed: Chips(60.0),
            available: Chips(50.0),
        }
    );
    assert_eq!(s, before);
    assert_eq!(s.player(1).unwrap().balance, Chips(50.0));
    assert_eq!(s.pot, Chips::ZERO);
}

#[test]
fn raise_moves_chips_into_pot_and_log() {
    let s = active_session(&[100.0, 100.0]);

    let out = apply_action(&s, &action(1, PlayerActionKind::Raise(Chips(25.0))), 77).unwrap();

    assert_eq!(out.player.balance, Chips(75.0));
    assert_eq!(out.player.current_bet, Chips(25.0));
    assert_eq!(out.player.status, PlayerStatus::Active);
    assert_eq!(out.session.pot, Chips(25.0));

    let bet = out.bet.expect("raise must be logged");
    assert_eq!(bet.kind, BetKind::Raise);
    assert_eq!(bet.amount, Chips(25.0));
    assert_eq!(bet.player_id, 1);
    assert_eq!(bet.round, "preflop");
    assert_eq!(bet.hand_no, 1);
    assert_eq!(bet.timestamp, 77);

    // Ход передаёт автомат сессии, движок ставок его не трогает.
    assert_eq!(out.session.current_turn, Some(1));
}

#[test]
fn raise_amount_must_be_positive_and_finite() {
    let s = active_session(&[100.0, 100.0]);

    for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
        let err = apply_action(&s, &action(1, PlayerActionKind::Raise(Chips(bad))), 1).unwrap_err();
        assert!(
            matches!(err, SessionError::InvalidAmount(_)),
            "amount {bad} должен быть отклонён, получили {err:?}"
        );
    }
}

#[test]
fn call_pays_only_the_difference() {
    let mut s = active_session(&[100.0, 100.0]);
    s.player_mut(1).unwrap().current_bet = Chips(5.0);
    s.player_mut(2).unwrap().current_bet = Chips(20.0);

    let out = apply_action(&s, &action(1, PlayerActionKind::Call), 1).unwrap();

    assert_eq!(out.player.balance, Chips(85.0));
    assert_eq!(out.player.current_bet, Chips(20.0));
    let bet = out.bet.unwrap();
    assert_eq!(bet.kind, BetKind::Call);
    assert_eq!(bet.amount, Chips(15.0));
}

#[test]
fn call_with_nothing_to_call_is_rejected() {
    let s = active_session(&[100.0, 100.0]);
    let err = apply_action(&s, &action(1, PlayerActionKind::Call), 1).unwrap_err();
    assert_eq!(err, SessionError::NothingToCall);
}

#[test]
fn call_larger_than_stack_requires_all_in() {
    let mut s = active_session(&[10.0, 100.0]);
    s.player_mut(2).unwrap().current_bet = Chips(40.0);

    let err = apply_action(&s, &action(1, PlayerActionKind::Call), 1).unwrap_err();
    assert_eq!(
        err,
        SessionError::InsufficientBalance {
            needed: Chips(40.0),
            available: Chips(10.0),
        }
    );

    let out = apply_action(&s, &action(1, PlayerActionKind::AllIn), 1).unwrap();
    assert_eq!(out.player.status, PlayerStatus::AllIn);
    assert_eq!(out.player.balance, Chips::ZERO);
    assert_eq!(out.player.current_bet, Chips(10.0));
    assert_eq!(out.bet.unwrap().kind, BetKind::AllIn);
}

#[test]
fn all_in_with_empty_stack_is_rejected() {
    let s = active_session(&[0.0, 100.0]);
    let err = apply_action(&s, &action(1, PlayerActionKind::AllIn), 1).unwrap_err();
    assert_eq!(err, SessionError::NoBalance);
}

#[test]
fn raise_of_whole_stack_makes_player_all_in() {
    let s = active_session(&[30.0, 100.0]);
    let out = apply_action(&s, &action(1, PlayerActionKind::Raise(Chips(30.0))), 1).unwrap();

    assert_eq!(out.player.status, PlayerStatus::AllIn);
    assert_eq!(out.player.balance, Chips::ZERO);
    assert_eq!(out.bet.unwrap().kind, BetKind::Raise);
}

#[test]
fn fold_changes_status_only() {
    let s = active_session(&[100.0, 100.0]);
    let out = apply_action(&s, &action(1, PlayerActionKind::Fold), 1).unwrap();

    assert_eq!(out.player.status, PlayerStatus::Folded);
    assert_eq!(out.player.balance, Chips(100.0));
    assert!(out.bet.is_none());
    assert_eq!(out.session.pot, Chips::ZERO);
}

#[test]
fn out_of_turn_is_rejected() {
    let s = active_session(&[100.0, 100.0]);
    let err = apply_action(&s, &action(2, PlayerActionKind::Fold), 1).unwrap_err();
    assert_eq!(err, SessionError::OutOfTurn(2));
}

#[test]
fn unknown_player_is_rejected() {
    let s = active_session(&[100.0, 100.0]);
    let err = apply_action(&s, &action(42, PlayerActionKind::Check), 1).unwrap_err();
    assert_eq!(err, SessionError::PlayerNotFound(42));
}

#[test]
fn no_actions_outside_active_game() {
    let mut s = active_session(&[100.0, 100.0]);
    for status in [SessionStatus::Waiting, SessionStatus::Ready, SessionStatus::Finished] {
        s.status = status;
        let err = apply_action(&s, &action(1, PlayerActionKind::Check), 1).unwrap_err();
        assert_eq!(err, SessionError::SessionNotActive(status));
    }
}

#[test]
fn folded_player_holding_turn_cannot_act() {
    let mut s = active_session(&[100.0, 100.0]);
    s.player_mut(1).unwrap().status = PlayerStatus::Folded;

    let err = apply_action(&s, &action(1, PlayerActionKind::Check), 1).unwrap_err();
    assert!(matches!(err, SessionError::InvalidAction(_)));
}

#[test]
fn chips_are_conserved_by_every_bet() {
    let mut s = active_session(&[100.0, 100.0, 100.0]);
    s.player_mut(3).unwrap().current_bet = Chips(12.5);

    for kind in [
        PlayerActionKind::Call,
        PlayerActionKind::Raise(Chips(40.0)),
        PlayerActionKind::AllIn,
    ] {
        let p = s.player(1).unwrap();
        let before = p.balance + p.current_bet;

        let out = apply_action(&s, &action(1, kind.clone()), 1).unwrap();
        let after = out.player.balance + out.player.current_bet;
        assert_eq!(before, after, "фишки не должны исчезать при {kind:?}");
    }
}

#[test]
fn pot_matches_bet_log_through_a_hand() {
    let mut s = active_session(&[100.0, 100.0, 100.0]);
    let mut log: Vec<BetRecord> = Vec::new();

    let script = [
        (1, PlayerActionKind::Raise(Chips(10.0))),
        (2, PlayerActionKind::Call),
        (3, PlayerActionKind::Fold),
        (1, PlayerActionKind::Raise(Chips(15.0))),
        (2, PlayerActionKind::AllIn),
        (1, PlayerActionKind::AllIn),
    ];

    for (who, kind) in script {
        assert_eq!(s.current_turn, Some(who), "сейчас должен ходить {who}");
        let out = lifecycle::act(&s, &action(who, kind), 1).unwrap();
        log.extend(out.bet);
        s = out.session;
        assert_eq!(s.pot, pot_from_log(&log, s.hand_no));
    }

    // Все, кто не сфолдил, в олл-ине – ходить некому.
    assert_eq!(s.pot, Chips(200.0));
    assert_eq!(s.current_turn, None);
    assert_eq!(s.count_with_status(PlayerStatus::AllIn), 2);
    // fold не пишется в журнал.
    assert_eq!(log.len(), 5);
}
