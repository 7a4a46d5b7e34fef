//! Трекер фишек и ставок для живой покерной игры на Linera.
//!
//! Карты раздаются вживую, здесь только "стойка с фишками" и судья ставок:
//! места, очередь хода, банк, жизненный цикл сессии и расчёт долгов в конце.
//!
//! Здесь описываем ABI (Operation / Message / Query / Response) и
//! связываем contract/service с нашим ChipRackState.

pub mod api;
pub mod domain;
pub mod engine;
pub mod infra;
pub mod state;

use linera_sdk::linera_base_types::{ContractAbi, ServiceAbi};
use serde::{Deserialize, Serialize};

use crate::api::{Command, Query, QueryResponse};
use crate::state::ChipRackState;

/// Операции (внешние команды), которые модуль принимает.
///
/// Для простоты: одна операция = одна команда из api::Command.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ChipRackOperation {
    Command(Command),
}

/// Сообщения между приложениями Linera.
/// Пока нам не нужны – оставим пустой enum.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ChipRackMessage {}

/// Запросы к сервису (read-only).
pub type ChipRackQuery = Query;

/// Ответы на запросы.
pub type ChipRackResponse = QueryResponse;

/// ABI для контракта и сервиса.
#[derive(Clone, Debug)]
pub struct ChipRackAbi;

impl ContractAbi for ChipRackAbi {
    type Operation = ChipRackOperation;
    type Response = ();
}

impl ServiceAbi for ChipRackAbi {
    type Query = ChipRackQuery;
    type QueryResponse = ChipRackResponse;
}

/// Экспортируем типы состояния, чтобы contract.rs и service.rs могли их использовать.
pub type Storage = ChipRackState;
