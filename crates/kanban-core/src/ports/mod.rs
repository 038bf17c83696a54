//! Ports - 抽象化レイヤー
//!
//! Traits at the seams to the outside world: the remote gateway that hydrates
//! the board, and the clock / id sources used when creating entities.

pub mod clock;
pub mod gateway;
pub mod id_generator;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::gateway::BoardGateway;
pub use self::id_generator::{IdGenerator, UlidGenerator};
