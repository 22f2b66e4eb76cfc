//! Game state owned by the controller
//!
//! Hosts get read-only access through [`super::GameController::state`].

use serde::Serialize;

use crate::error::LadderError;
use crate::ladder::{Lattice, RevealState};
use crate::roster::Roster;

/// Where the draw is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GamePhase {
    /// Waiting for a draw; participants may change
    #[default]
    Idle,
    /// Reveal in progress; participants are frozen
    Playing,
    /// Reveal finished, result published
    Resolved,
}

/// Identifies one reveal run; steps carrying an older ticket are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealTicket(pub(crate) u64);

/// Published outcome of a finished draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// Winning end columns, in the order they were drawn
    pub winning_end_columns: Vec<usize>,
    /// Start column reaching each winning end column (same order)
    pub winner_start_columns: Vec<usize>,
    pub winner_names: Vec<String>,
    /// `true` at every end column that wins
    pub per_column_outcome: Vec<bool>,
}

/// Everything a draw needs
#[derive(Debug, Clone, Default)]
pub struct GameState {
    pub phase: GamePhase,
    pub roster: Roster,
    /// `None` while there are fewer than two participants
    pub lattice: Option<Lattice>,
    pub winner_count: usize,
    pub winning_end_columns: Vec<usize>,
    pub winner_start_columns: Vec<usize>,
    pub reveal_state: RevealState,
    pub result: Option<GameResult>,
    /// Last rejected command or aborted draw
    pub last_error: Option<LadderError>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// `(rows, columns)` of the current lattice, for layout
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.lattice.as_ref().map(|l| (l.rows(), l.columns()))
    }

    /// Drop everything derived from the last draw and return to Idle.
    /// The lattice and roster are kept.
    pub(crate) fn clear_draw(&mut self) {
        self.phase = GamePhase::Idle;
        self.winning_end_columns.clear();
        self.winner_start_columns.clear();
        self.reveal_state.clear();
        self.result = None;
        self.last_error = None;
    }

    /// Outcome for the current draw
    pub(crate) fn build_result(&self) -> GameResult {
        let columns = self.roster.len();
        let per_column_outcome = (0..columns)
            .map(|c| self.winning_end_columns.contains(&c))
            .collect();
        let winner_names = self
            .winner_start_columns
            .iter()
            .filter_map(|&c| self.roster.name(c).map(str::to_string))
            .collect();

        GameResult {
            winning_end_columns: self.winning_end_columns.clone(),
            winner_start_columns: self.winner_start_columns.clone(),
            winner_names,
            per_column_outcome,
        }
    }
}
