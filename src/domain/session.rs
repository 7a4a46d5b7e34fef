use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::{Player, PlayerStatus};
use crate::domain::{PlayerId, SeatNumber, SessionId, Timestamp};
use crate::engine::errors::SessionError;

/// Максимум мест за столом.
pub const MAX_SEATS: SeatNumber = 10;

/// Бай-ин по умолчанию.
pub const DEFAULT_BUY_IN: Chips = Chips(100.0);

/// Блайнды – фиксированная доля бай-ина (5 / 10 при бай-ине 100).
pub const SMALL_BLIND_FRACTION: f64 = 0.05;
pub const BIG_BLIND_FRACTION: f64 = 0.10;

/// Метка первого раунда торговли.
pub const INITIAL_ROUND: &str = "preflop";

/// Код комнаты, по которому игроки входят в сессию.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    pub fn new(code: impl Into<String>) -> Self {
        RoomCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Жизненный цикл сессии.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(not(target_arch = "wasm32"), derive(async_graphql::Enum))]
pub enum SessionStatus {
    /// Собираем игроков.
    Waiting,
    /// Все (минимум двое) готовы, ждём старта от админа.
    Ready,
    /// Идёт игра.
    Active,
    /// Игра закончена, посчитан расчёт.
    Finished,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Waiting => "waiting",
            SessionStatus::Ready => "ready",
            SessionStatus::Active => "active",
            SessionStatus::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// Конфиг сессии: бай-ин, блайнды, количество мест.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionConfig {
    pub buy_in: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub max_seats: SeatNumber,
    /// С какой метки начинается раунд после старта/сброса.
    pub initial_round: String,
}

impl SessionConfig {
    /// Конфиг с блайндами, выведенными из бай-ина.
    pub fn from_buy_in(buy_in: Chips) -> Self {
        Self {
            buy_in,
            small_blind: Chips(buy_in.0 * SMALL_BLIND_FRACTION),
            big_blind: Chips(buy_in.0 * BIG_BLIND_FRACTION),
            max_seats: MAX_SEATS,
            initial_round: INITIAL_ROUND.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), SessionError> {
        let amounts = [self.buy_in, self.small_blind, self.big_blind];
        if amounts.iter().any(|c| !c.0.is_finite()) {
            return Err(SessionError::InvalidConfig(
                "бай-ин и блайнды должны быть конечными числами".into(),
            ));
        }
        if !self.buy_in.is_positive() {
            return Err(SessionError::InvalidConfig(format!(
                "бай-ин должен быть положительным, получено {}",
                self.buy_in
            )));
        }
        if self.small_blind.0 < 0.0 || self.big_blind.0 < 0.0 {
            return Err(SessionError::InvalidConfig("блайнды не могут быть отрицательными".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(SessionError::InvalidConfig(
                "малый блайнд больше большого".into(),
            ));
        }
        if !(2..=MAX_SEATS).contains(&self.max_seats) {
            return Err(SessionError::InvalidConfig(format!(
                "max_seats должен быть в 2..={MAX_SEATS}, получено {}",
                self.max_seats
            )));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::from_buy_in(DEFAULT_BUY_IN)
    }
}

/// Основное состояние игровой сессии.
///
/// Снимок значения: движок принимает `&GameSession` и возвращает новую копию,
/// поэтому частично применённых действий не бывает.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameSession {
    pub id: SessionId,
    pub room_code: RoomCode,
    pub config: SessionConfig,
    pub status: SessionStatus,

    /// Банк текущей раздачи (распределение победителю – вне ядра).
    pub pot: Chips,

    /// Произвольная метка раунда ("preflop", "flop", ...).
    pub round: String,

    /// Чей сейчас ход.
    pub current_turn: Option<PlayerId>,

    /// Место дилера или None, если игра ещё не стартовала.
    pub dealer_seat: Option<SeatNumber>,

    /// Игроки в порядке мест.
    pub players: Vec<Player>,

    /// Номер текущей раздачи (0 – ещё не стартовали).
    pub hand_no: u32,

    pub is_started: bool,
    pub created_at: Timestamp,
    pub started_at: Option<Timestamp>,
    pub ended_at: Option<Timestamp>,
}

impl GameSession {
    pub fn new(id: SessionId, room_code: RoomCode, config: SessionConfig, created_at: Timestamp) -> Self {
        let round = config.initial_round.clone();
        Self {
            id,
            room_code,
            config,
            status: SessionStatus::Waiting,
            pot: Chips::ZERO,
            round,
            current_turn: None,
            dealer_seat: None,
            players: Vec::new(),
            hand_no: 0,
            is_started: false,
            created_at,
            started_at: None,
            ended_at: None,
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn require_player(&self, id: PlayerId) -> Result<&Player, SessionError> {
        self.player(id).ok_or(SessionError::PlayerNotFound(id))
    }

    pub fn admin(&self) -> Option<&Player> {
        self.players.iter().find(|p| p.is_admin)
    }

    /// Максимальная ставка среди всех игроков в текущем раунде.
    pub fn highest_bet(&self) -> Chips {
        self.players
            .iter()
            .map(|p| p.current_bet)
            .fold(Chips::ZERO, Chips::max)
    }

    /// Вставить игрока, сохраняя порядок по местам.
    pub fn insert_player(&mut self, player: Player) {
        let pos = self
            .players
            .iter()
            .position(|p| p.seat > player.seat)
            .unwrap_or(self.players.len());
        self.players.insert(pos, player);
    }

    pub fn all_ready(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| p.is_ready)
    }

    pub fn count_with_status(&self, status: PlayerStatus) -> usize {
        self.players.iter().filter(|p| p.status == status).count()
    }

    /// Чип-каунт стола: стеки + банк. Без докупок не меняется.
    pub fn chips_in_play(&self) -> Chips {
        self.players.iter().map(|p| p.balance).sum::<Chips>() + self.pot
    }
}
