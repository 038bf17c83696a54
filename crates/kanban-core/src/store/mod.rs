//! Ordered collection store: actions, the pure reducer, and the shared
//! in-memory handle.

mod action;
mod memory;
pub mod ordering;
mod reducer;

pub use action::{BoardAction, LoadPhase};
pub use memory::BoardStore;
pub use reducer::reduce;
