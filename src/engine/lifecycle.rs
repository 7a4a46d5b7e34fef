//! Автомат состояний сессии: waiting ⇄ ready → active → finished → waiting.
//!
//! Каждая операция принимает снимок `&GameSession` и возвращает новый.
//! Проверки идут до мутаций, так что при ошибке вызывающий остаётся
//! со своим исходным снимком.

use crate::domain::chips::Chips;
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::session::{GameSession, SessionStatus};
use crate::domain::{PlayerId, Timestamp};
use crate::engine::actions::PlayerAction;
use crate::engine::betting::{self, ActionOutcome};
use crate::engine::errors::SessionError;
use crate::engine::positions::{first_to_act, next_dealer, next_turn};
use crate::engine::seats::assign_seat;
use crate::engine::settlement::{settle, Settlement};

/// Минимум игроков для старта.
pub const MIN_PLAYERS: usize = 2;

/// Посадить нового игрока. Первый вошедший становится админом.
pub fn join(
    session: &GameSession,
    player_id: PlayerId,
    name: &str,
) -> Result<(GameSession, Player), SessionError> {
    if !matches!(session.status, SessionStatus::Waiting | SessionStatus::Ready) {
        return Err(SessionError::guard(
            session.status,
            SessionStatus::Waiting,
            "войти можно только до старта игры",
        ));
    }

    let name = name.trim();
    if name.is_empty() {
        return Err(SessionError::InvalidAction("пустое имя игрока".into()));
    }
    if session.players.iter().any(|p| p.name == name) {
        return Err(SessionError::NameTaken(name.to_string()));
    }
    if session.player(player_id).is_some() {
        return Err(SessionError::InvalidAction(format!(
            "игрок {player_id} уже в сессии"
        )));
    }

    let seat = assign_seat(session)?;

    let mut player = Player::new(player_id, name, seat, session.config.buy_in);
    player.is_admin = session.players.is_empty();

    let mut next = session.clone();
    next.insert_player(player.clone());
    refresh_readiness(&mut next);

    Ok((next, player))
}

/// Поставить/снять готовность. Может перевести waiting → ready и обратно.
pub fn set_ready(
    session: &GameSession,
    player_id: PlayerId,
    ready: bool,
) -> Result<GameSession, SessionError> {
    if !matches!(session.status, SessionStatus::Waiting | SessionStatus::Ready) {
        return Err(SessionError::guard(
            session.status,
            SessionStatus::Ready,
            "готовность меняется только до старта",
        ));
    }
    session.require_player(player_id)?;

    let mut next = session.clone();
    if let Some(p) = next.player_mut(player_id) {
        p.is_ready = ready;
    }
    refresh_readiness(&mut next);

    Ok(next)
}

/// Старт игры (ready → active), только явно.
pub fn start(session: &GameSession, now: Timestamp) -> Result<GameSession, SessionError> {
    if session.status != SessionStatus::Ready {
        return Err(SessionError::guard(
            session.status,
            SessionStatus::Active,
            "стартовать можно только из ready",
        ));
    }
    if session.players.len() < MIN_PLAYERS {
        return Err(SessionError::guard(
            session.status,
            SessionStatus::Active,
            format!("нужно минимум {MIN_PLAYERS} игрока"),
        ));
    }
    if !session.all_ready() {
        return Err(SessionError::guard(
            session.status,
            SessionStatus::Active,
            "не все игроки готовы",
        ));
    }
    let with_chips = session
        .players
        .iter()
        .filter(|p| p.balance.is_positive())
        .count();
    if with_chips < MIN_PLAYERS {
        return Err(SessionError::guard(
            session.status,
            SessionStatus::Active,
            "меньше двух игроков с фишками",
        ));
    }

    let mut next = session.clone();
    for p in next.players.iter_mut() {
        p.current_bet = Chips::ZERO;
        p.status = if p.balance.is_positive() {
            PlayerStatus::Active
        } else {
            PlayerStatus::Out
        };
    }

    next.dealer_seat = next_dealer(&next);
    next.hand_no += 1;
    next.pot = Chips::ZERO;
    next.round = next.config.initial_round.clone();
    next.status = SessionStatus::Active;
    next.is_started = true;
    next.started_at = Some(now);
    next.ended_at = None;
    next.current_turn = first_to_act(&next);

    Ok(next)
}

/// Действие игрока: движок ставок, затем передача хода.
pub fn act(
    session: &GameSession,
    action: &PlayerAction,
    now: Timestamp,
) -> Result<ActionOutcome, SessionError> {
    let mut outcome = betting::apply_action(session, action, now)?;
    outcome.session.current_turn = next_turn(&outcome.session, Some(action.player_id));
    Ok(outcome)
}

/// Новый раунд торговли внутри раздачи ("flop", "turn", ...).
/// Ставки раунда обнуляются, банк остаётся, ход – первому активному.
pub fn advance_round(session: &GameSession, label: &str) -> Result<GameSession, SessionError> {
    if session.status != SessionStatus::Active {
        return Err(SessionError::SessionNotActive(session.status));
    }
    let label = label.trim();
    if label.is_empty() {
        return Err(SessionError::InvalidAction("пустая метка раунда".into()));
    }

    let mut next = session.clone();
    for p in next.players.iter_mut() {
        p.current_bet = Chips::ZERO;
    }
    next.round = label.to_string();
    next.current_turn = first_to_act(&next);

    Ok(next)
}

/// Завершить игру (active → finished) и посчитать расчёт.
pub fn end(session: &GameSession, now: Timestamp) -> Result<(GameSession, Settlement), SessionError> {
    if session.status != SessionStatus::Active {
        return Err(SessionError::guard(
            session.status,
            SessionStatus::Finished,
            "завершить можно только идущую игру",
        ));
    }

    let mut next = session.clone();
    next.status = SessionStatus::Finished;
    next.ended_at = Some(now);
    next.current_turn = None;

    let settlement = settle(&next.players);
    Ok((next, settlement))
}

/// Сброс в waiting. Журнал ставок не трогаем.
///
/// Разрешён из finished и из waiting (повторный сброс даёт то же состояние).
/// Игроки с фишками снова active, без фишек – out.
pub fn reset(session: &GameSession) -> Result<GameSession, SessionError> {
    if !matches!(session.status, SessionStatus::Finished | SessionStatus::Waiting) {
        return Err(SessionError::guard(
            session.status,
            SessionStatus::Waiting,
            "сбросить можно только завершённую игру",
        ));
    }

    let mut next = session.clone();
    next.status = SessionStatus::Waiting;
    next.pot = Chips::ZERO;
    next.round = next.config.initial_round.clone();
    next.current_turn = None;
    next.started_at = None;
    next.ended_at = None;
    next.is_started = false;

    for p in next.players.iter_mut() {
        p.current_bet = Chips::ZERO;
        p.is_ready = false;
        p.status = if p.balance.is_positive() {
            PlayerStatus::Active
        } else {
            PlayerStatus::Out
        };
    }

    Ok(next)
}

/// Докупка фишек. Вылетевший игрок снова становится активным.
pub fn buy_in(
    session: &GameSession,
    player_id: PlayerId,
    amount: Chips,
) -> Result<GameSession, SessionError> {
    if session.status == SessionStatus::Finished {
        return Err(SessionError::InvalidAction("игра уже завершена".into()));
    }
    if !amount.0.is_finite() || !amount.is_positive() {
        return Err(SessionError::InvalidAmount(amount));
    }
    let player = session.require_player(player_id)?;
    if player.status == PlayerStatus::AllIn && session.status == SessionStatus::Active {
        return Err(SessionError::InvalidAction(
            "докупка во время олл-ина запрещена".into(),
        ));
    }

    let mut next = session.clone();
    if let Some(p) = next.player_mut(player_id) {
        p.balance += amount;
        p.total_buy_in += amount;
        if p.status == PlayerStatus::Out {
            p.status = PlayerStatus::Active;
        }
    }

    Ok(next)
}

/// Убрать игрока из сессии. Если был его ход – ход уходит следующему по месту.
pub fn kick(session: &GameSession, player_id: PlayerId) -> Result<GameSession, SessionError> {
    session.require_player(player_id)?;

    let mut next = session.clone();

    if next.current_turn == Some(player_id) {
        // Выключаем игрока из очереди, но пока оставляем его место как точку отсчёта.
        if let Some(p) = next.player_mut(player_id) {
            p.status = PlayerStatus::Out;
        }
        next.current_turn = next_turn(&next, Some(player_id));
    }

    next.players.retain(|p| p.id != player_id);
    refresh_readiness(&mut next);

    Ok(next)
}

/// Флаг соединения. Ядро его только хранит.
pub fn set_connected(
    session: &GameSession,
    player_id: PlayerId,
    connected: bool,
) -> Result<GameSession, SessionError> {
    session.require_player(player_id)?;

    let mut next = session.clone();
    if let Some(p) = next.player_mut(player_id) {
        p.is_connected = connected;
    }
    Ok(next)
}

/// Пересчитать waiting/ready по готовности игроков.
fn refresh_readiness(session: &mut GameSession) {
    let ready = session.players.len() >= MIN_PLAYERS && session.all_ready();
    session.status = match (session.status, ready) {
        (SessionStatus::Waiting, true) => SessionStatus::Ready,
        (SessionStatus::Ready, false) => SessionStatus::Waiting,
        (status, _) => status,
    };
}
