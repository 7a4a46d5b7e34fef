use serde::{Deserialize, Serialize};

use crate::domain::{PlayerId, RoomCode};
use crate::engine::{ManagerError, SessionError};

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
///
/// Отказ получает только отправивший команду клиент; состояние комнаты не меняется.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ApiError {
    /// Неправильные входные данные (неизвестное действие, кривая сумма).
    BadRequest(String),

    /// Сессия не найдена.
    SessionNotFound(RoomCode),

    /// Игрок не найден в сессии.
    PlayerNotFound(PlayerId),

    /// Команда не разрешена этому игроку.
    Forbidden(String),

    /// Команда не может быть выполнена в текущем состоянии.
    InvalidCommand(String),
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::SessionNotFound(code) => ApiError::SessionNotFound(code),
            SessionError::PlayerNotFound(id) => ApiError::PlayerNotFound(id),
            SessionError::InvalidAction(_)
            | SessionError::InvalidAmount(_)
            | SessionError::InvalidConfig(_) => ApiError::BadRequest(err.to_string()),
            other => ApiError::InvalidCommand(other.to_string()),
        }
    }
}

impl From<ManagerError> for ApiError {
    fn from(err: ManagerError) -> Self {
        match err {
            ManagerError::Session(e) => e.into(),
            ManagerError::NotAdmin(_) | ManagerError::CannotKickAdmin(_) => {
                ApiError::Forbidden(err.to_string())
            }
        }
    }
}
