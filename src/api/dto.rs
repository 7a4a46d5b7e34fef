use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::PlayerStatus;
use crate::domain::session::SessionStatus;
use crate::domain::{BetRecord, PlayerId, SeatNumber, SessionId, Timestamp};
use crate::engine::settlement::Settlement;

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::SimpleObject))]
pub struct PlayerViewDto {
    pub player_id: PlayerId,
    pub name: String,
    pub seat: SeatNumber,
    pub balance: Chips,
    pub total_buy_in: Chips,
    pub current_bet: Chips,
    pub status: PlayerStatus,
    pub is_ready: bool,
    pub is_connected: bool,
    pub is_admin: bool,
    /// Сейчас его ход.
    pub is_current_turn: bool,
}

/// DTO сессии – то, что рассылается всем в комнате после каждой команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::SimpleObject))]
pub struct SessionViewDto {
    pub session_id: SessionId,
    pub room_code: String,
    pub status: SessionStatus,
    pub buy_in: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub pot: Chips,
    pub round: String,
    pub current_turn: Option<PlayerId>,
    pub dealer_seat: Option<SeatNumber>,
    pub hand_no: u32,
    pub is_started: bool,
    pub players: Vec<PlayerViewDto>,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
}

/// Ответ на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResponse {
    /// Новая сессия создана.
    SessionCreated(SessionViewDto),

    /// Игрок вошёл, вот его id.
    Joined {
        player_id: PlayerId,
        session: SessionViewDto,
    },

    /// Действие принято.
    ActionApplied {
        session: SessionViewDto,
        /// Запись журнала (для fold/check – None).
        bet: Option<BetRecord>,
    },

    /// Игра завершена, расчёт готов.
    Finished {
        session: SessionViewDto,
        settlement: Settlement,
    },

    /// Любая другая команда: обновлённое состояние.
    Session(SessionViewDto),
}

impl CommandResponse {
    /// Снимок сессии из любого ответа – для рассылки подписчикам комнаты.
    pub fn session(&self) -> &SessionViewDto {
        match self {
            CommandResponse::SessionCreated(s) | CommandResponse::Session(s) => s,
            CommandResponse::Joined { session, .. }
            | CommandResponse::ActionApplied { session, .. }
            | CommandResponse::Finished { session, .. } => session,
        }
    }
}
