use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{PlayerId, SessionId};

/// Простая генерация ID на основе монотонных счётчиков.
///
/// В Linera-контракте ID можно восстановить из счётчиков в state,
/// поэтому генератор умеет стартовать с произвольных значений.
#[derive(Debug)]
pub struct IdGenerator {
    session_counter: AtomicU64,
    player_counter: AtomicU64,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self::starting_at(1, 1)
    }

    pub fn starting_at(next_session: SessionId, next_player: PlayerId) -> Self {
        Self {
            session_counter: AtomicU64::new(next_session),
            player_counter: AtomicU64::new(next_player),
        }
    }

    /// Какой id сессии будет выдан следующим (без выдачи).
    pub fn peek_session_id(&self) -> SessionId {
        self.session_counter.load(Ordering::Relaxed)
    }

    /// Какой id игрока будет выдан следующим (без выдачи).
    pub fn peek_player_id(&self) -> PlayerId {
        self.player_counter.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn next_session_id(&self) -> SessionId {
        self.session_counter.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.player_counter.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
