use linera_sdk::views::{linera_views, MapView, RegisterView, RootView, ViewStorageContext};
use serde::{Deserialize, Serialize};

use crate::domain::{BetRecord, GameSession, PlayerId, RoomCode, SessionId};
use crate::engine::history::SessionHistory;
use crate::infra::ids::IdGenerator;

/// Снэпшот сессии, который можно хранить во View или в off-chain хранилище.
/// Всё, что нужно, чтобы продолжить сессию после загрузки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StoredSession {
    pub session: GameSession,
    pub history: SessionHistory,
}

impl StoredSession {
    /// Новая сессия с пустой историей.
    pub fn fresh(session: GameSession) -> Self {
        Self {
            session,
            history: SessionHistory::new(),
        }
    }

    pub fn room_code(&self) -> &RoomCode {
        &self.session.room_code
    }

    /// Разобрать снапшот обратно на части.
    pub fn into_parts(self) -> (GameSession, SessionHistory) {
        (self.session, self.history)
    }
}

/// Глобальное состояние приложения на Linera.
///
/// Журнал ставок живёт отдельной картой: в снапшот сессии он не входит,
/// поэтому сессия не растёт с каждой ставкой.
#[derive(RootView)]
#[view(context = ViewStorageContext)]
pub struct ChipRackState {
    /// Все сессии по коду комнаты.
    #[view(map)]
    pub sessions: MapView<RoomCode, StoredSession>,

    /// Журналы ставок по коду комнаты (только дописываются).
    #[view(map)]
    pub bet_logs: MapView<RoomCode, Vec<BetRecord>>,

    /// Следующий свободный id сессии.
    #[view(register)]
    pub next_session_id: RegisterView<SessionId>,

    /// Следующий свободный id игрока.
    #[view(register)]
    pub next_player_id: RegisterView<PlayerId>,
}

impl ChipRackState {
    /// Генератор ID, продолжающий счётчики из state.
    /// Пустой регистр (0) означает, что ещё ничего не выдавалось.
    pub fn id_generator(&self) -> IdGenerator {
        IdGenerator::starting_at(
            (*self.next_session_id.get()).max(1),
            (*self.next_player_id.get()).max(1),
        )
    }

    /// Запомнить счётчики генератора после обработки операции.
    pub fn record_ids(&mut self, ids: &IdGenerator) {
        self.next_session_id.set(ids.peek_session_id());
        self.next_player_id.set(ids.peek_player_id());
    }
}
