use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Chips, PlayerId, RoomCode, SessionStatus};

/// Ошибки ядра сессии.
///
/// Все ошибки – отказ в запросе: состояние при этом не меняется.
#[derive(Clone, Debug, Error, PartialEq, Serialize, Deserialize)]
pub enum SessionError {
    #[error("Сессия {0} не найдена")]
    SessionNotFound(RoomCode),

    #[error("Игрок {0} не найден в сессии")]
    PlayerNotFound(PlayerId),

    #[error("Свободных мест нет (максимум {max_seats})")]
    SessionFull { max_seats: u8 },

    #[error("Имя '{0}' уже занято в этой сессии")]
    NameTaken(String),

    #[error("Сейчас не ход игрока с id={0}")]
    OutOfTurn(PlayerId),

    #[error("Недопустимое действие: {0}")]
    InvalidAction(String),

    #[error("Невозможно выполнить check – нужно уравнять {to_call}")]
    MustCallOrRaise { to_call: Chips },

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    NothingToCall,

    #[error("Недостаточно фишек: нужно {needed}, есть {available}")]
    InsufficientBalance { needed: Chips, available: Chips },

    #[error("Недопустимая сумма: {0}")]
    InvalidAmount(Chips),

    #[error("Нет фишек для олл-ина")]
    NoBalance,

    #[error("Игра не идёт (статус {0})")]
    SessionNotActive(SessionStatus),

    #[error("Переход {from} -> {to} невозможен: {reason}")]
    TransitionGuardFailed {
        from: SessionStatus,
        to: SessionStatus,
        reason: String,
    },

    #[error("Некорректный конфиг сессии: {0}")]
    InvalidConfig(String),

    #[error("Не удалось сгенерировать свободный код комнаты")]
    DuplicateRoomCode,
}

impl SessionError {
    pub(crate) fn guard(from: SessionStatus, to: SessionStatus, reason: impl Into<String>) -> Self {
        SessionError::TransitionGuardFailed {
            from,
            to,
            reason: reason.into(),
        }
    }
}
