use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{PlayerId, RoomCode, SessionConfig, Timestamp, DEFAULT_BUY_IN};
use crate::engine::{PlayerAction, PlayerActionKind, SessionManager};
use crate::infra::persistence::SessionStorage;
use crate::infra::rng::RandomSource;

use super::dto::CommandResponse;
use super::errors::ApiError;
use super::queries::build_session_view;

/// Команда верхнего уровня.
///
/// Эти команды превращаются в операции (`ChipRackOperation`),
/// которые Linera экспонирует наружу.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Command {
    /// Создать новую сессию (комнату).
    CreateSession(CreateSessionCommand),

    /// Войти в сессию по коду комнаты.
    JoinSession(JoinSessionCommand),

    /// Операция над существующей сессией от имени игрока.
    SessionCommand(SessionCommand),
}

/// Команда создания сессии.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreateSessionCommand {
    /// Бай-ин; если не задан – 100. Блайнды считаются от него.
    pub buy_in: Option<Chips>,
}

/// Вход в сессию.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JoinSessionCommand {
    pub room_code: RoomCode,
    pub player_name: String,
}

/// Команда к существующей сессии.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionCommand {
    pub room_code: RoomCode,
    /// Кто отправил команду. Для админских команд – должен быть админ.
    pub player_id: PlayerId,
    pub kind: SessionCommandKind,
}

/// Что именно делаем с сессией.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SessionCommandKind {
    /// Готов / не готов.
    SetReady { ready: bool },

    /// Старт игры (админ).
    Start,

    /// Действие игрока в "сыром" виде с клиента.
    PlaceBet(PlaceBetCommand),

    /// Новая метка раунда (админ).
    AdvanceRound { label: String },

    /// Завершить игру и посчитать расчёт (админ).
    End,

    /// Сбросить завершённую игру (админ).
    Reset,

    /// Выгнать игрока (админ).
    Kick { target: PlayerId },

    /// Докупка фишек.
    BuyIn { amount: Chips },

    /// Транспорт сообщает о соединении.
    SetConnected { connected: bool },
}

/// Сырое действие: тип строкой + сумма. Разбирается до ядра.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceBetCommand {
    pub bet_type: String,
    pub amount: Option<f64>,
}

/// Выполнить команду через менеджер сессий.
pub fn handle_command<S: SessionStorage, R: RandomSource>(
    manager: &mut SessionManager<S, R>,
    command: Command,
    now: Timestamp,
) -> Result<CommandResponse, ApiError> {
    match command {
        Command::CreateSession(cmd) => {
            let config = SessionConfig::from_buy_in(cmd.buy_in.unwrap_or(DEFAULT_BUY_IN));
            let session = manager.create_session(config, now)?;
            Ok(CommandResponse::SessionCreated(build_session_view(&session)))
        }

        Command::JoinSession(cmd) => {
            let (session, player) = manager.join(&cmd.room_code, &cmd.player_name, now)?;
            Ok(CommandResponse::Joined {
                player_id: player.id,
                session: build_session_view(&session),
            })
        }

        Command::SessionCommand(SessionCommand {
            room_code,
            player_id,
            kind,
        }) => handle_session_command(manager, &room_code, player_id, kind, now),
    }
}

fn handle_session_command<S: SessionStorage, R: RandomSource>(
    manager: &mut SessionManager<S, R>,
    code: &RoomCode,
    player_id: PlayerId,
    kind: SessionCommandKind,
    now: Timestamp,
) -> Result<CommandResponse, ApiError> {
    let session = match kind {
        SessionCommandKind::SetReady { ready } => manager.set_ready(code, player_id, ready, now)?,

        SessionCommandKind::Start => manager.start(code, player_id, now)?,

        SessionCommandKind::PlaceBet(bet) => {
            let kind = PlayerActionKind::from_wire(&bet.bet_type, bet.amount)?;
            let outcome = manager.act(code, PlayerAction::new(player_id, kind), now)?;
            return Ok(CommandResponse::ActionApplied {
                session: build_session_view(&outcome.session),
                bet: outcome.bet,
            });
        }

        SessionCommandKind::AdvanceRound { label } => {
            manager.advance_round(code, player_id, &label, now)?
        }

        SessionCommandKind::End => {
            let (session, settlement) = manager.end(code, player_id, now)?;
            return Ok(CommandResponse::Finished {
                session: build_session_view(&session),
                settlement,
            });
        }

        SessionCommandKind::Reset => manager.reset(code, player_id, now)?,

        SessionCommandKind::Kick { target } => manager.kick(code, player_id, target, now)?,

        SessionCommandKind::BuyIn { amount } => manager.buy_in(code, player_id, amount, now)?,

        SessionCommandKind::SetConnected { connected } => {
            manager.set_connected(code, player_id, connected)?
        }
    };

    Ok(CommandResponse::Session(build_session_view(&session)))
}
