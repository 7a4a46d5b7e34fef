//! Расчёт в конце сессии: кто кому сколько должен.
//!
//! Жадный алгоритм: самый крупный должник платит самому крупному кредитору,
//! пока одна из сторон не закрыта. Каждая итерация полностью закрывает хотя бы
//! одного участника, поэтому переводов не больше чем `кредиторы + должники - 1`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::domain::PlayerId;

/// Всё, что меньше по модулю, считаем нулём (шум f64).
pub const SETTLEMENT_EPSILON: f64 = 1e-9;

/// Итог одного игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::SimpleObject))]
pub struct PlayerResult {
    pub player_id: PlayerId,
    pub name: String,
    pub total_buy_in: Chips,
    pub final_balance: Chips,
    /// balance - total_buy_in: плюс – выиграл, минус – проиграл.
    pub net: Chips,
}

/// Один перевод от должника кредитору.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::SimpleObject))]
pub struct Transfer {
    pub from: PlayerId,
    pub from_name: String,
    pub to: PlayerId,
    pub to_name: String,
    pub amount: Chips,
}

/// Полный расчёт сессии.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::SimpleObject))]
pub struct Settlement {
    pub player_results: Vec<PlayerResult>,
    pub transfers: Vec<Transfer>,
}

impl Settlement {
    pub fn total_transferred(&self) -> Chips {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Сумма, которую должны получить все выигравшие.
    pub fn total_owed(&self) -> Chips {
        self.player_results
            .iter()
            .filter(|r| r.net.0.is_finite())
            .map(|r| r.net.max(Chips::ZERO))
            .sum()
    }
}

/// Участник жадного сопоставления с остатком долга.
struct Party<'a> {
    player: &'a Player,
    remaining: f64,
}

/// Посчитать итоги и минимальный набор переводов.
pub fn settle(players: &[Player]) -> Settlement {
    let player_results: Vec<PlayerResult> = players
        .iter()
        .map(|p| PlayerResult {
            player_id: p.id,
            name: p.name.clone(),
            total_buy_in: p.total_buy_in,
            final_balance: p.balance,
            net: p.net(),
        })
        .collect();

    // Нечисловые итоги (inf/NaN) в сопоставление не берём: с ними остаток
    // никогда не закрывается.
    let mut creditors: Vec<Party> = players
        .iter()
        .filter(|p| p.net().0.is_finite())
        .filter(|p| p.net().0 > SETTLEMENT_EPSILON)
        .map(|p| Party {
            player: p,
            remaining: p.net().0,
        })
        .collect();
    let mut debtors: Vec<Party> = players
        .iter()
        .filter(|p| p.net().0.is_finite())
        .filter(|p| p.net().0 < -SETTLEMENT_EPSILON)
        .map(|p| Party {
            player: p,
            remaining: -p.net().0,
        })
        .collect();

    // Сортировка стабильная: при равных суммах остаётся порядок мест.
    creditors.sort_by(by_remaining_desc);
    debtors.sort_by(by_remaining_desc);

    let mut transfers = Vec::new();
    let (mut ci, mut di) = (0, 0);

    while ci < creditors.len() && di < debtors.len() {
        let amount = creditors[ci].remaining.min(debtors[di].remaining);

        transfers.push(Transfer {
            from: debtors[di].player.id,
            from_name: debtors[di].player.name.clone(),
            to: creditors[ci].player.id,
            to_name: creditors[ci].player.name.clone(),
            amount: Chips(amount),
        });

        creditors[ci].remaining -= amount;
        debtors[di].remaining -= amount;

        if creditors[ci].remaining <= SETTLEMENT_EPSILON {
            ci += 1;
        }
        if debtors[di].remaining <= SETTLEMENT_EPSILON {
            di += 1;
        }
    }

    Settlement {
        player_results,
        transfers,
    }
}

fn by_remaining_desc(a: &Party, b: &Party) -> Ordering {
    b.remaining
        .partial_cmp(&a.remaining)
        .unwrap_or(Ordering::Equal)
}
