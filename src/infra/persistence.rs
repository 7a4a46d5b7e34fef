use std::collections::BTreeMap;

use crate::domain::{BetRecord, RoomCode};
use crate::state::StoredSession;

/// Абстракция хранилища сессий.
///
/// В Linera-режиме вместо этого используется `ChipRackState` и Views,
/// но эта абстракция удобна:
/// - для юнит- и интеграционных тестов,
/// - для оффчейн-сервисов (например, лобби-сервер).
pub trait SessionStorage {
    /// Загрузить сессию по коду комнаты.
    fn load_session(&self, code: &RoomCode) -> Option<StoredSession>;

    /// Сохранить сессию после принятой команды.
    fn save_session(&mut self, stored: &StoredSession);

    /// Есть ли уже такая комната.
    fn contains(&self, code: &RoomCode) -> bool {
        self.load_session(code).is_some()
    }

    /// Все коды комнат.
    fn room_codes(&self) -> Vec<RoomCode>;

    /// Дописать ставку в журнал комнаты.
    fn append_bet(&mut self, code: &RoomCode, bet: &BetRecord);

    /// Журнал ставок комнаты в порядке записи.
    fn bets(&self, code: &RoomCode) -> Vec<BetRecord>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    sessions: BTreeMap<RoomCode, StoredSession>,
    bet_logs: BTreeMap<RoomCode, Vec<BetRecord>>,
}

impl InMemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn load_session(&self, code: &RoomCode) -> Option<StoredSession> {
        self.sessions.get(code).cloned()
    }

    fn save_session(&mut self, stored: &StoredSession) {
        self.sessions
            .insert(stored.room_code().clone(), stored.clone());
    }

    fn contains(&self, code: &RoomCode) -> bool {
        self.sessions.contains_key(code)
    }

    fn room_codes(&self) -> Vec<RoomCode> {
        self.sessions.keys().cloned().collect()
    }

    fn append_bet(&mut self, code: &RoomCode, bet: &BetRecord) {
        self.bet_logs
            .entry(code.clone())
            .or_default()
            .push(bet.clone());
    }

    fn bets(&self, code: &RoomCode) -> Vec<BetRecord> {
        self.bet_logs.get(code).cloned().unwrap_or_default()
    }
}
