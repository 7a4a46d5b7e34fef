use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, SeatNumber, Timestamp};
use crate::engine::actions::PlayerActionKind;

/// Тип события в сессии.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum SessionEventKind {
    /// Игрок сел за стол.
    PlayerJoined {
        player_id: PlayerId,
        name: String,
        seat: SeatNumber,
    },

    /// Игрок поменял готовность.
    ReadyChanged { player_id: PlayerId, ready: bool },

    /// Игра стартовала.
    Started {
        hand_no: u32,
        dealer_seat: Option<SeatNumber>,
        first_to_act: Option<PlayerId>,
    },

    /// Действие игрока (включая fold/check, которых нет в журнале ставок).
    PlayerActed {
        player_id: PlayerId,
        action: PlayerActionKind,
        new_balance: Chips,
        pot_after: Chips,
    },

    /// Новая метка раунда.
    RoundAdvanced { round: String },

    /// Докупка.
    BoughtIn { player_id: PlayerId, amount: Chips },

    /// Игрока убрали из сессии.
    PlayerKicked { player_id: PlayerId },

    /// Игра завершена, посчитан расчёт.
    Ended { transfers: usize },

    /// Сброс в waiting.
    Reset,
}

/// Событие с порядковым номером и временем.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionEvent {
    pub index: u32,
    pub at: Timestamp,
    pub kind: SessionEventKind,
}

/// Полная история сессии. Только дописывается.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionHistory {
    pub events: Vec<SessionEvent>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, at: Timestamp, kind: SessionEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(SessionEvent {
            index: idx,
            at,
            kind,
        });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&SessionEvent> {
        self.events.last()
    }
}
