use crate::domain::bet::BetRecord;
use crate::domain::chips::Chips;
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::session::{GameSession, SessionStatus};
use crate::domain::Timestamp;
use crate::engine::actions::{PlayerAction, PlayerActionKind};
use crate::engine::errors::SessionError;
use crate::engine::validation::validate_action;

/// Результат одного принятого действия.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionOutcome {
    /// Новое состояние сессии (ход ещё не передан – это делает автомат сессии).
    pub session: GameSession,
    /// Игрок после действия.
    pub player: Player,
    /// Запись в журнал, если действие двигало фишки.
    pub bet: Option<BetRecord>,
}

/// Проверить и применить действие игрока.
///
/// Порядок проверок: игра идёт → игрок есть → его ход → действие допустимо.
/// Все проверки до любой мутации; мутируется копия, исходный снимок не трогаем.
///
/// В журнал пишутся только call / raise / all-in. Fold и check ставок не
/// создают – они попадают в историю сессии на уровне менеджера.
pub fn apply_action(
    session: &GameSession,
    action: &PlayerAction,
    now: Timestamp,
) -> Result<ActionOutcome, SessionError> {
    if session.status != SessionStatus::Active {
        return Err(SessionError::SessionNotActive(session.status));
    }

    let player = session.require_player(action.player_id)?;

    if session.current_turn != Some(player.id) {
        return Err(SessionError::OutOfTurn(player.id));
    }

    let amount = validate_action(player, &action.kind, session.highest_bet())?;

    let mut next = session.clone();
    let bet = {
        let p = next
            .player_mut(action.player_id)
            .ok_or(SessionError::PlayerNotFound(action.player_id))?;

        match action.kind {
            PlayerActionKind::Fold => {
                p.status = PlayerStatus::Folded;
                None
            }
            PlayerActionKind::Check => None,
            PlayerActionKind::Call | PlayerActionKind::Raise(_) | PlayerActionKind::AllIn => {
                commit_chips(p, amount);
                Some(BetRecord {
                    session_id: session.id,
                    player_id: p.id,
                    amount,
                    kind: action.kind.bet_kind(),
                    round: session.round.clone(),
                    hand_no: session.hand_no,
                    timestamp: now,
                })
            }
        }
    };

    // Запись в журнал дописывает хранилище; в снапшоте только банк.
    if let Some(record) = &bet {
        next.pot += record.amount;
    }

    let player = next
        .player(action.player_id)
        .cloned()
        .ok_or(SessionError::PlayerNotFound(action.player_id))?;

    Ok(ActionOutcome {
        session: next,
        player,
        bet,
    })
}

/// Перенести фишки из стека в ставку раунда.
/// Обнулившийся стек означает олл-ин.
fn commit_chips(player: &mut Player, amount: Chips) {
    player.balance -= amount;
    player.current_bet += amount;
    if player.balance.0 <= 0.0 {
        player.balance = Chips::ZERO;
        player.status = PlayerStatus::AllIn;
    }
}
