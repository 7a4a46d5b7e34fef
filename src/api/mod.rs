//! Внешний API трекера фишек.
//!
//! Здесь описываются:
//! - команды (commands.rs) – всё, что меняет состояние (создать сессию, войти, действие игрока);
//! - запросы (queries.rs) – только чтение;
//! - DTO (dto.rs) – снимки сессии для рассылки по комнате;
//! - ошибки (errors.rs) – то, что видит клиент.

pub mod commands;
pub mod dto;
pub mod errors;
pub mod queries;

pub use commands::*;
pub use dto::*;
pub use errors::*;
pub use queries::*;
