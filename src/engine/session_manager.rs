// src/engine/session_manager.rs

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::domain::{BetRecord, Chips, GameSession, Player, PlayerId, RoomCode, SessionConfig, Timestamp};
use crate::engine::betting::ActionOutcome;
use crate::engine::errors::SessionError;
use crate::engine::history::{SessionEventKind, SessionHistory};
use crate::engine::lifecycle;
use crate::engine::settlement::Settlement;
use crate::engine::PlayerAction;
use crate::infra::ids::IdGenerator;
use crate::infra::persistence::{InMemorySessionStorage, SessionStorage};
use crate::infra::rng::{RandomSource, SystemRng};
use crate::infra::room_code::generate_unique_room_code;
use crate::state::StoredSession;

/// Ошибки уровня менеджера сессий (над ядром одной сессии).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ManagerError {
    /// Проброшенная ошибка ядра.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Команда только для админа сессии.
    #[error("Игрок {0} не админ сессии")]
    NotAdmin(PlayerId),

    /// Админа выгнать нельзя.
    #[error("Нельзя выгнать админа (игрок {0})")]
    CannotKickAdmin(PlayerId),
}

/// Менеджер сессий:
/// - держит сессии в хранилище по коду комнаты;
/// - на каждую команду: загрузить → применить переход ядра → сохранить;
/// - ведёт историю событий и журнал ставок;
/// - проверяет права админа (ядро флагу админа просто доверяет).
///
/// Одна команда за раз на сессию: это гарантирует `&mut self`.
pub struct SessionManager<S: SessionStorage = InMemorySessionStorage, R: RandomSource = SystemRng> {
    storage: S,
    rng: R,
    ids: IdGenerator,
}

impl SessionManager<InMemorySessionStorage, SystemRng> {
    /// Менеджер в памяти с системным RNG.
    pub fn in_memory() -> Self {
        Self::new(InMemorySessionStorage::new(), SystemRng::default())
    }
}

impl<S: SessionStorage, R: RandomSource> SessionManager<S, R> {
    pub fn new(storage: S, rng: R) -> Self {
        Self {
            storage,
            rng,
            ids: IdGenerator::new(),
        }
    }

    /// Заменить генератор ID (например, `ChipRackState::id_generator`).
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    /// Текущие счётчики ID – чтобы сохранить их обратно в state.
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Создать новую сессию с уникальным кодом комнаты.
    pub fn create_session(
        &mut self,
        config: SessionConfig,
        now: Timestamp,
    ) -> Result<GameSession, ManagerError> {
        config.validate()?;

        let storage = &self.storage;
        let code = generate_unique_room_code(&mut self.rng, |c| storage.contains(c))?;

        let session = GameSession::new(self.ids.next_session_id(), code, config, now);
        self.storage.save_session(&StoredSession::fresh(session.clone()));

        info!(
            room = %session.room_code,
            session_id = session.id,
            buy_in = %session.config.buy_in,
            "session created"
        );
        Ok(session)
    }

    /// Снимок сессии.
    pub fn session(&self, code: &RoomCode) -> Result<GameSession, ManagerError> {
        Ok(self.load(code)?.session)
    }

    /// История событий комнаты.
    pub fn history(&self, code: &RoomCode) -> Result<SessionHistory, ManagerError> {
        Ok(self.load(code)?.history)
    }

    /// Журнал ставок, новые сверху.
    pub fn bet_history(&self, code: &RoomCode) -> Result<Vec<BetRecord>, ManagerError> {
        self.load(code)?;
        let mut bets = self.storage.bets(code);
        bets.reverse();
        Ok(bets)
    }

    /// Все сессии (для лобби / админки).
    pub fn sessions(&self) -> Vec<GameSession> {
        self.storage
            .room_codes()
            .iter()
            .filter_map(|c| self.storage.load_session(c))
            .map(|s| s.session)
            .collect()
    }

    pub fn join(
        &mut self,
        code: &RoomCode,
        name: &str,
        now: Timestamp,
    ) -> Result<(GameSession, Player), ManagerError> {
        let mut stored = self.load(code)?;
        // Id выдаётся только после успешной проверки: отказ не оставляет дыр.
        let player_id = self.ids.peek_player_id();

        let (session, player) = self.check(code, lifecycle::join(&stored.session, player_id, name))?;
        self.ids.next_player_id();

        stored.session = session;
        stored.history.push(
            now,
            SessionEventKind::PlayerJoined {
                player_id: player.id,
                name: player.name.clone(),
                seat: player.seat,
            },
        );
        self.storage.save_session(&stored);

        info!(room = %code, player_id = player.id, seat = player.seat, admin = player.is_admin, "player joined");
        Ok((stored.session, player))
    }

    pub fn set_ready(
        &mut self,
        code: &RoomCode,
        player_id: PlayerId,
        ready: bool,
        now: Timestamp,
    ) -> Result<GameSession, ManagerError> {
        let mut stored = self.load(code)?;
        let before = stored.session.status;

        let session = self.check(code, lifecycle::set_ready(&stored.session, player_id, ready))?;

        if session.status != before {
            info!(room = %code, from = %before, to = %session.status, "session status changed");
        }
        stored.session = session;
        stored
            .history
            .push(now, SessionEventKind::ReadyChanged { player_id, ready });
        self.storage.save_session(&stored);

        Ok(stored.session)
    }

    pub fn start(
        &mut self,
        code: &RoomCode,
        requested_by: PlayerId,
        now: Timestamp,
    ) -> Result<GameSession, ManagerError> {
        let mut stored = self.load(code)?;
        self.require_admin(code, &stored.session, requested_by)?;

        let session = self.check(code, lifecycle::start(&stored.session, now))?;

        stored.session = session;
        stored.history.push(
            now,
            SessionEventKind::Started {
                hand_no: stored.session.hand_no,
                dealer_seat: stored.session.dealer_seat,
                first_to_act: stored.session.current_turn,
            },
        );
        self.storage.save_session(&stored);

        info!(
            room = %code,
            hand_no = stored.session.hand_no,
            dealer_seat = ?stored.session.dealer_seat,
            "game started"
        );
        Ok(stored.session)
    }

    /// Применить действие игрока и передать ход.
    pub fn act(
        &mut self,
        code: &RoomCode,
        action: PlayerAction,
        now: Timestamp,
    ) -> Result<ActionOutcome, ManagerError> {
        let mut stored = self.load(code)?;

        let outcome = self.check(code, lifecycle::act(&stored.session, &action, now))?;

        stored.session = outcome.session.clone();
        stored.history.push(
            now,
            SessionEventKind::PlayerActed {
                player_id: action.player_id,
                action: action.kind.clone(),
                new_balance: outcome.player.balance,
                pot_after: outcome.session.pot,
            },
        );
        if let Some(bet) = &outcome.bet {
            self.storage.append_bet(code, bet);
        }
        self.storage.save_session(&stored);

        debug!(
            room = %code,
            player_id = action.player_id,
            action = ?action.kind,
            pot = %outcome.session.pot,
            next_turn = ?outcome.session.current_turn,
            "action applied"
        );
        Ok(outcome)
    }

    pub fn advance_round(
        &mut self,
        code: &RoomCode,
        requested_by: PlayerId,
        label: &str,
        now: Timestamp,
    ) -> Result<GameSession, ManagerError> {
        let mut stored = self.load(code)?;
        self.require_admin(code, &stored.session, requested_by)?;

        let session = self.check(code, lifecycle::advance_round(&stored.session, label))?;

        stored.session = session;
        stored.history.push(
            now,
            SessionEventKind::RoundAdvanced {
                round: stored.session.round.clone(),
            },
        );
        self.storage.save_session(&stored);

        info!(room = %code, round = %stored.session.round, "round advanced");
        Ok(stored.session)
    }

    /// Завершить игру и получить расчёт.
    pub fn end(
        &mut self,
        code: &RoomCode,
        requested_by: PlayerId,
        now: Timestamp,
    ) -> Result<(GameSession, Settlement), ManagerError> {
        let mut stored = self.load(code)?;
        self.require_admin(code, &stored.session, requested_by)?;

        let (session, settlement) = self.check(code, lifecycle::end(&stored.session, now))?;

        stored.session = session;
        stored.history.push(
            now,
            SessionEventKind::Ended {
                transfers: settlement.transfers.len(),
            },
        );
        self.storage.save_session(&stored);

        info!(
            room = %code,
            transfers = settlement.transfers.len(),
            total = %settlement.total_transferred(),
            "game finished"
        );
        Ok((stored.session, settlement))
    }

    pub fn reset(
        &mut self,
        code: &RoomCode,
        requested_by: PlayerId,
        now: Timestamp,
    ) -> Result<GameSession, ManagerError> {
        let mut stored = self.load(code)?;
        self.require_admin(code, &stored.session, requested_by)?;

        let session = self.check(code, lifecycle::reset(&stored.session))?;

        stored.session = session;
        stored.history.push(now, SessionEventKind::Reset);
        self.storage.save_session(&stored);

        info!(room = %code, "session reset");
        Ok(stored.session)
    }

    /// Докупка. Игрок докупается сам, админ не нужен.
    pub fn buy_in(
        &mut self,
        code: &RoomCode,
        player_id: PlayerId,
        amount: Chips,
        now: Timestamp,
    ) -> Result<GameSession, ManagerError> {
        let mut stored = self.load(code)?;

        let session = self.check(code, lifecycle::buy_in(&stored.session, player_id, amount))?;

        stored.session = session;
        stored
            .history
            .push(now, SessionEventKind::BoughtIn { player_id, amount });
        self.storage.save_session(&stored);

        info!(room = %code, player_id, amount = %amount, "player bought in");
        Ok(stored.session)
    }

    pub fn kick(
        &mut self,
        code: &RoomCode,
        requested_by: PlayerId,
        target: PlayerId,
        now: Timestamp,
    ) -> Result<GameSession, ManagerError> {
        let mut stored = self.load(code)?;
        self.require_admin(code, &stored.session, requested_by)?;

        if stored.session.player(target).is_some_and(|p| p.is_admin) {
            warn!(room = %code, kicked = target, "refused to kick admin");
            return Err(ManagerError::CannotKickAdmin(target));
        }

        let session = self.check(code, lifecycle::kick(&stored.session, target))?;

        stored.session = session;
        stored
            .history
            .push(now, SessionEventKind::PlayerKicked { player_id: target });
        self.storage.save_session(&stored);

        info!(room = %code, kicked = target, "player kicked");
        Ok(stored.session)
    }

    /// Транспорт сообщает о подключении/отключении игрока.
    pub fn set_connected(
        &mut self,
        code: &RoomCode,
        player_id: PlayerId,
        connected: bool,
    ) -> Result<GameSession, ManagerError> {
        let mut stored = self.load(code)?;

        let session = self.check(code, lifecycle::set_connected(&stored.session, player_id, connected))?;

        stored.session = session;
        self.storage.save_session(&stored);

        debug!(room = %code, player_id, connected, "connection flag updated");
        Ok(stored.session)
    }

    fn load(&self, code: &RoomCode) -> Result<StoredSession, ManagerError> {
        self.storage
            .load_session(code)
            .ok_or_else(|| SessionError::SessionNotFound(code.clone()).into())
    }

    fn require_admin(
        &self,
        code: &RoomCode,
        session: &GameSession,
        requested_by: PlayerId,
    ) -> Result<(), ManagerError> {
        let player = session.require_player(requested_by)?;
        if !player.is_admin {
            warn!(room = %code, player_id = requested_by, "admin command rejected");
            return Err(ManagerError::NotAdmin(requested_by));
        }
        Ok(())
    }

    /// Пробросить результат ядра, залогировав отказ.
    fn check<T>(&self, code: &RoomCode, res: Result<T, SessionError>) -> Result<T, ManagerError> {
        res.map_err(|err| {
            warn!(room = %code, error = %err, "command rejected");
            ManagerError::from(err)
        })
    }
}
