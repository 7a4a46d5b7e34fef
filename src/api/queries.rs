use serde::{Deserialize, Serialize};

use crate::domain::{BetRecord, GameSession, RoomCode};
use crate::engine::{SessionHistory, SessionManager};
use crate::infra::persistence::SessionStorage;
use crate::infra::rng::RandomSource;

use super::dto::{PlayerViewDto, SessionViewDto};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Query {
    /// Получить состояние сессии.
    GetSession { room_code: RoomCode },

    /// Журнал ставок комнаты (новые сверху).
    BetHistory { room_code: RoomCode },

    /// Полная история событий комнаты.
    SessionHistory { room_code: RoomCode },

    /// Список всех сессий (для лобби).
    ListSessions,
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum QueryResponse {
    Session(SessionViewDto),
    Bets(Vec<BetRecord>),
    History(SessionHistory),
    Sessions(Vec<SessionViewDto>),
}

/// Выполнить запрос через менеджер.
pub fn handle_query<S: SessionStorage, R: RandomSource>(
    manager: &SessionManager<S, R>,
    query: Query,
) -> Result<QueryResponse, ApiError> {
    match query {
        Query::GetSession { room_code } => {
            let session = manager.session(&room_code)?;
            Ok(QueryResponse::Session(build_session_view(&session)))
        }
        Query::BetHistory { room_code } => Ok(QueryResponse::Bets(manager.bet_history(&room_code)?)),
        Query::SessionHistory { room_code } => {
            Ok(QueryResponse::History(manager.history(&room_code)?))
        }
        Query::ListSessions => Ok(QueryResponse::Sessions(
            manager.sessions().iter().map(build_session_view).collect(),
        )),
    }
}

/// Сформировать DTO сессии.
pub fn build_session_view(session: &GameSession) -> SessionViewDto {
    SessionViewDto {
        session_id: session.id,
        room_code: session.room_code.to_string(),
        status: session.status,
        buy_in: session.config.buy_in,
        small_blind: session.config.small_blind,
        big_blind: session.config.big_blind,
        pot: session.pot,
        round: session.round.clone(),
        current_turn: session.current_turn,
        dealer_seat: session.dealer_seat,
        hand_no: session.hand_no,
        is_started: session.is_started,
        players: build_players_dto(session),
        created_at: session.created_at,
        started_at: session.started_at,
        ended_at: session.ended_at,
    }
}

/// Собрать DTO игроков в порядке мест.
fn build_players_dto(session: &GameSession) -> Vec<PlayerViewDto> {
    session
        .players
        .iter()
        .map(|p| PlayerViewDto {
            player_id: p.id,
            name: p.name.clone(),
            seat: p.seat,
            balance: p.balance,
            total_buy_in: p.total_buy_in,
            current_bet: p.current_bet,
            status: p.status,
            is_ready: p.is_ready,
            is_connected: p.is_connected,
            is_admin: p.is_admin,
            is_current_turn: session.current_turn == Some(p.id),
        })
        .collect()
}
