//! Amida Ladder - Amidakuji (ladder lottery) engine
//!
//! Core modules:
//! - `ladder`: Deterministic engine (lattice, simulation, winner lookup, reveal)
//! - `game`: Controller state machine that owns all game state
//! - `roster`: Participants and user sources
//! - `settings`: JSON-backed configuration
//! - `cue`: Drum-roll tick timing for hosts that play sound
//! - `render`: Plain-text ladder for terminal hosts

pub mod cue;
pub mod error;
pub mod game;
pub mod ladder;
pub mod render;
pub mod roster;
pub mod settings;

pub use error::{LadderError, Result};
pub use game::{GameController, GamePhase, GameResult, GameState, RevealTicket, drive_reveal};
pub use roster::{NamesFile, Roster, UserSource};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Rows of rung slots in a generated ladder
    pub const DEFAULT_ROWS: usize = 12;

    /// Delay after each reveal step (ms)
    pub const STEP_DELAY_MS: u64 = 80;
    /// Pause before the reveal starts (ms)
    pub const LEAD_IN_MS: u64 = 500;
    /// Pause between the last step and the result (ms)
    pub const SETTLE_MS: u64 = 1000;

    /// Upper bound for configured rows
    pub const MAX_ROWS: usize = 200;
    /// Upper bound for each configured reveal delay (ms)
    pub const MAX_DELAY_MS: u64 = 10_000;
}
