use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::actions::PlayerActionKind;
use crate::engine::errors::SessionError;

/// Проверка, может ли игрок выполнить действие при текущей максимальной ставке.
///
/// Возвращает, сколько фишек действие переносит из стека в банк
/// (для fold/check – ноль). Ничего не мутирует.
pub fn validate_action(
    player: &Player,
    action: &PlayerActionKind,
    highest_bet: Chips,
) -> Result<Chips, SessionError> {
    if !player.can_act() {
        return Err(SessionError::InvalidAction(format!(
            "игрок {} не может ходить в статусе {:?}",
            player.id, player.status
        )));
    }

    let balance = player.balance;

    match action {
        PlayerActionKind::Fold => Ok(Chips::ZERO),

        PlayerActionKind::Check => {
            let to_call = diff_to_call(player, highest_bet);
            if to_call.is_positive() {
                Err(SessionError::MustCallOrRaise { to_call })
            } else {
                Ok(Chips::ZERO)
            }
        }

        PlayerActionKind::Call => {
            let to_call = diff_to_call(player, highest_bet);
            if !to_call.is_positive() {
                return Err(SessionError::NothingToCall);
            }
            if to_call > balance {
                // Клиент должен прислать all-in.
                return Err(SessionError::InsufficientBalance {
                    needed: to_call,
                    available: balance,
                });
            }
            Ok(to_call)
        }

        PlayerActionKind::Raise(amount) => {
            if !amount.0.is_finite() || !amount.is_positive() {
                return Err(SessionError::InvalidAmount(*amount));
            }
            if *amount > balance {
                return Err(SessionError::InsufficientBalance {
                    needed: *amount,
                    available: balance,
                });
            }
            Ok(*amount)
        }

        PlayerActionKind::AllIn => {
            if !balance.is_positive() {
                return Err(SessionError::NoBalance);
            }
            Ok(balance)
        }
    }
}

/// Сколько фишек нужно добавить игроку, чтобы уравнять максимальную ставку.
pub fn diff_to_call(player: &Player, highest_bet: Chips) -> Chips {
    if highest_bet <= player.current_bet {
        Chips::ZERO
    } else {
        highest_bet - player.current_bet
    }
}
