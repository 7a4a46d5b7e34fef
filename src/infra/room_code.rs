use crate::domain::RoomCode;
use crate::engine::errors::SessionError;
use crate::infra::rng::RandomSource;

/// Длина кода комнаты.
pub const ROOM_CODE_LEN: usize = 6;

/// Сколько раз пробуем сгенерировать незанятый код.
pub const ROOM_CODE_ATTEMPTS: usize = 32;

const ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Случайный код из цифр и заглавных латинских букв.
pub fn generate_room_code<R: RandomSource>(rng: &mut R) -> RoomCode {
    let code: String = (0..ROOM_CODE_LEN)
        .map(|_| ALPHABET[rng.next_index(ALPHABET.len())] as char)
        .collect();
    RoomCode(code)
}

/// Код, которого ещё нет среди занятых.
pub fn generate_unique_room_code<R: RandomSource>(
    rng: &mut R,
    is_taken: impl Fn(&RoomCode) -> bool,
) -> Result<RoomCode, SessionError> {
    for _ in 0..ROOM_CODE_ATTEMPTS {
        let code = generate_room_code(rng);
        if !is_taken(&code) {
            return Ok(code);
        }
    }
    Err(SessionError::DuplicateRoomCode)
}
