use crate::domain::{GameSession, SeatNumber};
use crate::engine::errors::SessionError;

/// Найти минимальный свободный номер места в 1..=max_seats.
///
/// Чистый запрос: место никому не назначается, это делает вызывающий.
pub fn assign_seat(session: &GameSession) -> Result<SeatNumber, SessionError> {
    let max_seats = session.config.max_seats;

    let mut occupied: Vec<SeatNumber> = session.players.iter().map(|p| p.seat).collect();
    occupied.sort_unstable();

    // Идём по занятым по возрастанию и ищем первую дыру.
    let mut candidate: SeatNumber = 1;
    for seat in occupied {
        if seat == candidate {
            candidate += 1;
        } else if seat > candidate {
            break;
        }
    }

    if candidate > max_seats {
        return Err(SessionError::SessionFull { max_seats });
    }
    Ok(candidate)
}
