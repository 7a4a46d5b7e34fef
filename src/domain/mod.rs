//! Доменная модель: фишки, игроки, сессия, журнал ставок.

pub mod bet;
pub mod chips;
pub mod player;
pub mod session;

// Базовые идентификаторы
pub type PlayerId = u64;
pub type SessionId = u64;
/// Номер места за столом (1..=MAX_SEATS).
pub type SeatNumber = u8;
/// Время в миллисекундах от эпохи. Ядро часы не читает – время передаёт вызывающий.
pub type Timestamp = u64;

// Удобные реэкспорты, чтобы в других модулях писать crate::domain::Player и т.п.
pub use bet::*;
pub use chips::*;
pub use player::*;
pub use session::*;
