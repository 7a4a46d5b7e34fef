//! Инфраструктурный слой вокруг ядра сессии:
//! - генерация ID;
//! - RNG-реализации и коды комнат;
//! - абстракция хранения (off-chain / тесты).

pub mod ids;
pub mod persistence;
pub mod rng;
pub mod room_code;

pub use ids::*;
pub use persistence::*;
pub use rng::*;
pub use room_code::*;
