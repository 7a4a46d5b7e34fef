// src/bin/chiprack_dev_cli.rs

use poker_chiprack::api::{
    handle_command, handle_query, Command, CommandResponse, CreateSessionCommand,
    JoinSessionCommand, PlaceBetCommand, Query, QueryResponse, SessionCommand, SessionCommandKind,
};
use poker_chiprack::domain::{Chips, PlayerId, RoomCode};
use poker_chiprack::engine::SessionManager;
use poker_chiprack::infra::{DeterministicRng, InMemorySessionStorage};

type DevManager = SessionManager<InMemorySessionStorage, DeterministicRng>;

fn main() {
    tracing_subscriber::fmt::init();

    println!("=== CHIP RACK DEV CLI ===\n");

    let mut manager: DevManager =
        SessionManager::new(InMemorySessionStorage::new(), DeterministicRng::from_u64(42));
    let mut now: u64 = 1_700_000_000_000;

    let created = run(
        &mut manager,
        Command::CreateSession(CreateSessionCommand { buy_in: None }),
        &mut now,
    );
    let code = RoomCode::new(created.session().room_code.clone());
    println!("Комната создана: {code}\n");

    // Трое игроков садятся за стол.
    let mut ids: Vec<PlayerId> = Vec::new();
    for name in ["Alice", "Bob", "Carol"] {
        let resp = run(
            &mut manager,
            Command::JoinSession(JoinSessionCommand {
                room_code: code.clone(),
                player_name: name.to_string(),
            }),
            &mut now,
        );
        if let CommandResponse::Joined { player_id, .. } = resp {
            println!("  {name} сел за стол, id={player_id}");
            ids.push(player_id);
        }
    }
    let admin = ids[0];

    for &id in &ids {
        session_cmd(&mut manager, &code, id, SessionCommandKind::SetReady { ready: true }, &mut now);
    }
    session_cmd(&mut manager, &code, admin, SessionCommandKind::Start, &mut now);
    println!("\nИгра стартовала.\n");

    // Сценарий торговли: Alice ставит, Bob уравнивает, Carol пасует.
    let script = [
        (ids[0], "raise", Some(20.0)),
        (ids[1], "call", None),
        (ids[2], "fold", None),
        (ids[0], "raise", Some(30.0)),
        (ids[1], "all-in", None),
        (ids[0], "call", None),
    ];

    for (player, bet_type, amount) in script {
        let resp = session_cmd(
            &mut manager,
            &code,
            player,
            SessionCommandKind::PlaceBet(PlaceBetCommand {
                bet_type: bet_type.to_string(),
                amount,
            }),
            &mut now,
        );
        if let Some(resp) = resp {
            let s = resp.session();
            println!(
                "  {player} -> {bet_type:<6} | банк={} | ход={:?}",
                s.pot, s.current_turn
            );
        }
    }

    // Раздача банка победителю – вне трекера. Carol докупается после фолда.
    session_cmd(&mut manager, &code, ids[2], SessionCommandKind::BuyIn { amount: Chips(50.0) }, &mut now);

    if let Some(CommandResponse::Finished { settlement, .. }) =
        session_cmd(&mut manager, &code, admin, SessionCommandKind::End, &mut now)
    {
        println!("\n=== РАСЧЁТ ===");
        for r in &settlement.player_results {
            println!(
                "  {:<6} бай-ин={:>6} баланс={:>6} итог={:>6}",
                r.name, r.total_buy_in, r.final_balance, r.net
            );
        }
        for t in &settlement.transfers {
            println!("  {} платит {} -> {}", t.from_name, t.amount, t.to_name);
        }
    }

    match handle_query(&manager, Query::BetHistory { room_code: code.clone() }) {
        Ok(QueryResponse::Bets(bets)) => {
            println!("\nЖурнал ставок ({} записей):", bets.len());
            for b in bets {
                println!("  [{}] {:?} {} от {}", b.round, b.kind, b.amount, b.player_id);
            }
        }
        Ok(_) => {}
        Err(err) => println!("Ошибка запроса: {err:?}"),
    }

    if let Ok(QueryResponse::Session(view)) = handle_query(&manager, Query::GetSession { room_code: code }) {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("\nИтоговое состояние:\n{json}"),
            Err(err) => println!("Не удалось сериализовать состояние: {err}"),
        }
    }
}

fn run(manager: &mut DevManager, command: Command, now: &mut u64) -> CommandResponse {
    *now += 1_000;
    match handle_command(manager, command, *now) {
        Ok(resp) => resp,
        Err(err) => {
            eprintln!("Команда отклонена: {err:?}");
            std::process::exit(1);
        }
    }
}

fn session_cmd(
    manager: &mut DevManager,
    code: &RoomCode,
    player_id: PlayerId,
    kind: SessionCommandKind,
    now: &mut u64,
) -> Option<CommandResponse> {
    *now += 1_000;
    let cmd = Command::SessionCommand(SessionCommand {
        room_code: code.clone(),
        player_id,
        kind,
    });
    match handle_command(manager, cmd, *now) {
        Ok(resp) => Some(resp),
        Err(err) => {
            println!("  ! отказ: {err:?}");
            None
        }
    }
}
