//! Ядро: места, очередь хода, ставки, автомат сессии, расчёт.
//!
//! Высокоуровневый объект: `SessionManager`
//! Основные операции ядра (чистые, над снимком `GameSession`):
//!   - `assign_seat` – свободное место
//!   - `next_turn` – чей ход следующий
//!   - `apply_action` – проверить и применить действие
//!   - `lifecycle::*` – join / ready / start / act / end / reset
//!   - `settle` – кто кому должен в конце

pub mod actions;
pub mod betting;
pub mod errors;
pub mod history;
pub mod lifecycle;
pub mod positions;
pub mod seats;
pub mod session_manager;
pub mod settlement;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::{apply_action, ActionOutcome};
pub use errors::SessionError;
pub use history::{SessionEvent, SessionEventKind, SessionHistory};
pub use positions::{first_to_act, next_dealer, next_turn};
pub use seats::assign_seat;
pub use settlement::{settle, PlayerResult, Settlement, Transfer};

pub use session_manager::{ManagerError, SessionManager};
