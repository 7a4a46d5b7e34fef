use serde::{Deserialize, Serialize};

use crate::domain::{BetKind, Chips, PlayerId};
use crate::engine::errors::SessionError;

/// Тип действия игрока. Сумму несёт только raise.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Добавить к своей ставке указанную сумму.
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl PlayerActionKind {
    /// Разбор "сырого" действия с клиента: строка типа + опциональная сумма.
    ///
    /// Всё, что не входит в закрытый набор действий, отсекается здесь,
    /// до движка ставок.
    pub fn from_wire(kind: &str, amount: Option<f64>) -> Result<Self, SessionError> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(PlayerActionKind::Fold),
            "check" => Ok(PlayerActionKind::Check),
            "call" => Ok(PlayerActionKind::Call),
            "raise" | "bet" => match amount {
                Some(a) if a.is_finite() => Ok(PlayerActionKind::Raise(Chips(a))),
                Some(a) => Err(SessionError::InvalidAmount(Chips(a))),
                None => Err(SessionError::InvalidAction("raise без суммы".into())),
            },
            "all-in" | "allin" | "all_in" => Ok(PlayerActionKind::AllIn),
            other => Err(SessionError::InvalidAction(format!(
                "неизвестный тип действия '{other}'"
            ))),
        }
    }

    pub fn bet_kind(&self) -> BetKind {
        match self {
            PlayerActionKind::Fold => BetKind::Fold,
            PlayerActionKind::Check => BetKind::Check,
            PlayerActionKind::Call => BetKind::Call,
            PlayerActionKind::Raise(_) => BetKind::Raise,
            PlayerActionKind::AllIn => BetKind::AllIn,
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerAction {
    /// Какой игрок действует.
    pub player_id: PlayerId,
    /// Само действие.
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player_id: PlayerId, kind: PlayerActionKind) -> Self {
        Self { player_id, kind }
    }
}
