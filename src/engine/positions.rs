use crate::domain::{GameSession, Player, PlayerId, PlayerStatus, SeatNumber};

/// Игроки, которые могут ходить, по возрастанию мест.
///
/// Олл-ин и сфолдившие пропускаются: `current_turn` всегда указывает на активного.
pub fn eligible_players(session: &GameSession) -> Vec<&Player> {
    let mut eligible: Vec<&Player> = session.players.iter().filter(|p| p.can_act()).collect();
    eligible.sort_by_key(|p| p.seat);
    eligible
}

/// Чей ход следующий после `current`.
///
/// - никого нет → None;
/// - остался один → он же (дальше решает внешняя логика конца раунда);
/// - `current` не задан или не из этой сессии → первый по месту;
/// - иначе следующий по кругу после места `current`. Если `current` только что
///   сфолдил или ушёл в олл-ин, его в списке уже нет, но отсчёт идёт от его места.
///
/// Вызывать строго после мутации статуса.
pub fn next_turn(session: &GameSession, current: Option<PlayerId>) -> Option<PlayerId> {
    let eligible = eligible_players(session);

    match eligible.as_slice() {
        [] => None,
        [only] => Some(only.id),
        [first, ..] => {
            let from_seat = current.and_then(|id| session.player(id)).map(|p| p.seat);
            match from_seat {
                None => Some(first.id),
                Some(seat) => eligible
                    .iter()
                    .find(|p| p.seat > seat)
                    .map(|p| p.id)
                    .or(Some(first.id)),
            }
        }
    }
}

/// Первый, кто ходит в новом раунде: минимальное место среди активных.
pub fn first_to_act(session: &GameSession) -> Option<PlayerId> {
    next_turn(session, None)
}

/// Следующая позиция дилера:
/// - если кнопка уже была – следующее занятое место по кругу;
/// - если нет – минимальное занятое место.
///
/// Вылетевшие (`Out`) кнопку не получают.
pub fn next_dealer(session: &GameSession) -> Option<SeatNumber> {
    let mut seats: Vec<SeatNumber> = session
        .players
        .iter()
        .filter(|p| p.status != PlayerStatus::Out)
        .map(|p| p.seat)
        .collect();
    seats.sort_unstable();

    let first = *seats.first()?;
    match session.dealer_seat {
        Some(button) => Some(seats.into_iter().find(|&s| s > button).unwrap_or(first)),
        None => Some(first),
    }
}
