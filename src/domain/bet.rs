use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SessionId, Timestamp};

/// Тип ставки в журнале.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::Enum))]
pub enum BetKind {
    Raise,
    Call,
    Fold,
    Check,
    AllIn,
}

/// Запись журнала ставок. Создаётся один раз движком ставок и больше не меняется.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::SimpleObject))]
pub struct BetRecord {
    pub session_id: SessionId,
    pub player_id: PlayerId,
    pub amount: Chips,
    pub kind: BetKind,
    /// Метка раунда на момент ставки ("preflop", "flop", ...).
    pub round: String,
    /// Номер раздачи: растёт на каждом старте игры.
    pub hand_no: u32,
    pub timestamp: Timestamp,
}

/// Сумма ставок конкретной раздачи. Должна совпадать с банком сессии.
pub fn pot_from_log(bets: &[BetRecord], hand_no: u32) -> Chips {
    bets.iter()
        .filter(|b| b.hand_no == hand_no)
        .map(|b| b.amount)
        .sum()
}
