use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatNumber};

/// Статус игрока в контексте сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::Enum))]
pub enum PlayerStatus {
    /// Игрок активен и может действовать.
    Active,
    /// Игрок сфолдил в текущей раздаче.
    Folded,
    /// Игрок поставил весь стек – больше ходить не может.
    AllIn,
    /// Фишек нет и игрок не докупался.
    Out,
}

/// Игрок за столом.
///
/// Стек (`balance`) меняет только движок ставок; докупка увеличивает
/// одновременно `balance` и `total_buy_in`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Номер места, 1..=max_seats, уникален в сессии.
    pub seat: SeatNumber,
    /// Фишки на руках.
    pub balance: Chips,
    /// Сколько всего фишек игрок купил за сессию.
    pub total_buy_in: Chips,
    /// Ставка в текущем раунде торговли.
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Готовность до старта игры.
    pub is_ready: bool,
    /// Есть ли живое соединение. Ядро только хранит этот флаг.
    pub is_connected: bool,
    /// Первый вошедший игрок управляет сессией.
    pub is_admin: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, seat: SeatNumber, buy_in: Chips) -> Self {
        Self {
            id,
            name: name.into(),
            seat,
            balance: buy_in,
            total_buy_in: buy_in,
            current_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            is_ready: false,
            is_connected: true,
            is_admin: false,
        }
    }

    /// Может ли игрок делать ход (его можно поставить в очередь).
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Чистый результат за сессию: положительный – в плюсе.
    pub fn net(&self) -> Chips {
        self.balance - self.total_buy_in
    }
}
