//! Game orchestration
//!
//! The controller turns host commands into state transitions; the state
//! module holds what hosts observe.

pub mod controller;
pub mod state;

pub use controller::{GameController, drive_reveal};
pub use state::{GamePhase, GameResult, GameState, RevealTicket};
