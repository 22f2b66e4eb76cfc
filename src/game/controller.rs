//! Game controller: the only place game state changes
//!
//! Every inbound command is a method here. Derived data (lattice, mapping,
//! paths) is rebuilt on each transition rather than patched in place.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::state::{GamePhase, GameResult, GameState, RevealTicket};
use crate::cue::{TickCue, drum_roll_duration, tick_schedule};
use crate::error::{LadderError, Result};
use crate::ladder::{
    CancelHandle, Lattice, RevealOutcome, RevealState, RevealTask, build_path, cancellation,
    mapping, resolve, reveal,
};
use crate::roster::{Roster, UserSource};
use crate::settings::Settings;

/// Owns the game state and drives it through Idle → Playing → Resolved
#[derive(Debug)]
pub struct GameController {
    state: GameState,
    settings: Settings,
    seed: u64,
    rng: Pcg32,
    ticket: u64,
    cancel: Option<CancelHandle>,
}

impl GameController {
    /// Controller seeded from `settings.seed`, or a random seed when unset
    pub fn new(settings: Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_seed(settings, seed)
    }

    pub fn with_seed(settings: Settings, seed: u64) -> Self {
        log::info!("Ladder controller seeded with {seed}");
        Self {
            state: GameState::new(),
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ticket: 0,
            cancel: None,
        }
    }

    // === Observers ===

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn lattice(&self) -> Option<&Lattice> {
        self.state.lattice.as_ref()
    }

    pub fn participants(&self) -> &[String] {
        self.state.roster.participants()
    }

    pub fn reveal_state(&self) -> &RevealState {
        &self.state.reveal_state
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.state.result.as_ref()
    }

    pub fn last_error(&self) -> Option<&LadderError> {
        self.state.last_error.as_ref()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Drum-roll cues for the current ladder (empty when disabled or no ladder)
    pub fn tick_cues(&self) -> Vec<TickCue> {
        match &self.state.lattice {
            Some(lattice) if self.settings.tick_cues => tick_schedule(drum_roll_duration(
                lattice.rows(),
                &self.settings.pacing(),
            )),
            _ => Vec::new(),
        }
    }

    // === Participants ===

    /// Replace the participant list and build a fresh ladder.
    ///
    /// With fewer than two names the list is kept but there is no ladder, and
    /// `InvalidConfiguration` is returned.
    pub fn configure(&mut self, names: Vec<String>) -> Result<()> {
        if self.state.is_playing() {
            return Self::busy();
        }
        self.state.clear_draw();
        self.state.roster = Roster::new(names);
        self.regenerate()
    }

    /// Reload the full list from `source` and make everyone a participant
    pub fn refresh(&mut self, source: &impl UserSource) -> Result<()> {
        if self.state.is_playing() {
            return Self::busy();
        }
        match source.active_user_names() {
            Ok(names) => {
                log::info!("Fetched {} active users", names.len());
                self.configure(names)
            }
            Err(e) => self.reject(e),
        }
    }

    /// Remove every participant called `name`. No-op while playing.
    pub fn remove_participant(&mut self, name: &str) -> bool {
        self.edit_roster(|roster| roster.remove(name))
    }

    /// Move a participant to another start column. No-op while playing.
    pub fn move_participant(&mut self, from: usize, to: usize) -> bool {
        self.edit_roster(|roster| roster.reorder(from, to))
    }

    /// Bring back everyone removed since the last configure. No-op while playing.
    pub fn restore_all(&mut self) -> bool {
        self.edit_roster(Roster::restore_all)
    }

    /// Install a specific ladder for the current participants (replays, fixtures)
    pub fn load_lattice(&mut self, lattice: Lattice) -> Result<()> {
        if self.state.is_playing() {
            return Self::busy();
        }
        if lattice.columns() != self.state.roster.len() {
            return self.reject(LadderError::InvalidConfiguration {
                participants: self.state.roster.len(),
                rows: lattice.rows(),
            });
        }
        self.state.clear_draw();
        self.state.lattice = Some(lattice);
        Ok(())
    }

    fn edit_roster(&mut self, edit: impl FnOnce(&mut Roster) -> bool) -> bool {
        if self.state.is_playing() {
            log::debug!("Ignoring participant change during a draw");
            return false;
        }
        if !edit(&mut self.state.roster) {
            return false;
        }
        self.state.clear_draw();
        // Fewer than two left is a placeholder state, already recorded
        let _ = self.regenerate();
        true
    }

    fn regenerate(&mut self) -> Result<()> {
        let columns = self.state.roster.len();
        match Lattice::generate(columns, self.settings.rows, &mut self.rng) {
            Ok(lattice) => {
                log::info!(
                    "Generated ladder: {} columns, {} rows, {} rungs",
                    lattice.columns(),
                    lattice.rows(),
                    lattice.rung_count()
                );
                self.state.lattice = Some(lattice);
                Ok(())
            }
            Err(e) => {
                log::warn!("No ladder for {columns} participants: {e}");
                self.state.lattice = None;
                self.reject(e)
            }
        }
    }

    // === Draw ===

    /// Start a draw with `winner_count` winners.
    ///
    /// Returns the reveal task to run and the ticket its steps must carry.
    /// Rejected input leaves the state unchanged apart from `last_error`.
    pub fn start(&mut self, winner_count: usize) -> Result<(RevealTask, RevealTicket)> {
        self.start_with(winner_count, winner_count.to_string())
    }

    /// [`Self::start`] from raw text input; non-integers are rejected
    pub fn start_from_input(&mut self, input: &str) -> Result<(RevealTask, RevealTicket)> {
        let trimmed = input.trim();
        match trimmed.parse::<usize>() {
            Ok(count) => self.start_with(count, trimmed.to_string()),
            Err(_) => {
                let max = self.state.roster.len().saturating_sub(1);
                self.reject(LadderError::InvalidWinnerCount {
                    requested: trimmed.to_string(),
                    max,
                })
            }
        }
    }

    /// Start a draw whose winners are the given end columns (replays, fixtures)
    pub fn start_with_winning_columns(
        &mut self,
        winning_end_columns: Vec<usize>,
    ) -> Result<(RevealTask, RevealTicket)> {
        let requested = format!("{winning_end_columns:?}");
        self.check_startable(winning_end_columns.len(), requested.clone())?;

        let columns = self.state.roster.len();
        if let Some(&column) = winning_end_columns.iter().find(|&&c| c >= columns) {
            return self.reject(LadderError::ColumnOutOfRange { column, columns });
        }
        let mut distinct = winning_end_columns.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() != winning_end_columns.len() {
            return self.reject(LadderError::InvalidWinnerCount {
                requested,
                max: columns - 1,
            });
        }

        self.begin(winning_end_columns)
    }

    fn start_with(
        &mut self,
        winner_count: usize,
        requested: String,
    ) -> Result<(RevealTask, RevealTicket)> {
        self.check_startable(winner_count, requested)?;
        let columns = self.state.roster.len();
        let winning = rand::seq::index::sample(&mut self.rng, columns, winner_count).into_vec();
        self.begin(winning)
    }

    fn check_startable(&mut self, winner_count: usize, requested: String) -> Result<()> {
        if self.state.is_playing() {
            return Self::busy();
        }

        let columns = self.state.roster.len();
        if winner_count < 1 || winner_count >= columns {
            return self.reject(LadderError::InvalidWinnerCount {
                requested,
                max: columns.saturating_sub(1),
            });
        }

        if self.state.lattice.is_none() {
            return self.reject(LadderError::InvalidConfiguration {
                participants: columns,
                rows: self.settings.rows,
            });
        }
        Ok(())
    }

    fn begin(&mut self, winning: Vec<usize>) -> Result<(RevealTask, RevealTicket)> {
        let Some(lattice) = self.state.lattice.as_ref() else {
            return self.reject(LadderError::InvalidConfiguration {
                participants: self.state.roster.len(),
                rows: self.settings.rows,
            });
        };

        let map = mapping(lattice);
        let planned = resolve(&map, &winning).and_then(|starts| {
            let paths = starts
                .iter()
                .map(|&start| build_path(lattice, start))
                .collect::<Result<Vec<_>>>()?;
            Ok((starts, paths))
        });

        let (starts, paths) = match planned {
            Ok(planned) => planned,
            Err(e) => {
                log::error!("Ladder invariant broken, aborting draw: {e}");
                self.state.clear_draw();
                self.state.last_error = Some(e.clone());
                return Err(e);
            }
        };

        // A finished draw is replaced by the new one
        self.state.clear_draw();
        self.state.phase = GamePhase::Playing;
        self.state.winner_count = winning.len();
        self.state.winning_end_columns = winning;
        self.state.winner_start_columns = starts;

        let (handle, signal) = cancellation();
        self.cancel = Some(handle);
        self.ticket += 1;

        log::info!(
            "Draw {} started: {} of {} win (end columns {:?})",
            self.ticket,
            self.state.winner_count,
            self.state.roster.len(),
            self.state.winning_end_columns
        );

        let task = RevealTask::new(reveal(paths), self.settings.pacing(), signal);
        Ok((task, RevealTicket(self.ticket)))
    }

    /// Install a reveal snapshot. Ignored unless `ticket` is the running draw.
    pub fn apply_step(&mut self, ticket: RevealTicket, snapshot: RevealState) -> bool {
        if !self.is_current(ticket) {
            log::debug!("Dropping stale reveal step for draw {}", ticket.0);
            return false;
        }
        self.state.reveal_state = snapshot;
        true
    }

    /// Publish the result once the reveal has finished
    pub fn finish(&mut self, ticket: RevealTicket) -> Option<&GameResult> {
        if !self.is_current(ticket) {
            return None;
        }
        let result = self.state.build_result();
        log::info!("Draw {} resolved: winners {:?}", ticket.0, result.winner_names);
        self.state.result = Some(result);
        self.state.phase = GamePhase::Resolved;
        self.cancel = None;
        self.state.result.as_ref()
    }

    /// Cancel any running reveal and return to Idle, keeping the ladder
    pub fn reset(&mut self) {
        match self.state.phase {
            GamePhase::Playing | GamePhase::Resolved => {
                if let Some(handle) = self.cancel.take() {
                    handle.cancel();
                }
                // Outstanding tickets become stale
                self.ticket += 1;
                self.state.clear_draw();
                log::info!("Draw reset");
            }
            GamePhase::Idle => {
                self.state.last_error = None;
            }
        }
    }

    fn is_current(&self, ticket: RevealTicket) -> bool {
        self.state.is_playing() && ticket.0 == self.ticket
    }

    /// Refusal during a draw; leaves `last_error` alone
    fn busy<T>() -> Result<T> {
        log::debug!("Ignoring command during a draw");
        Err(LadderError::GameInProgress)
    }

    fn reject<T>(&mut self, error: LadderError) -> Result<T> {
        log::warn!("{error}");
        self.state.last_error = Some(error.clone());
        Err(error)
    }
}

/// Run `task` against a shared controller, applying each step as it arrives
/// and publishing the result when the reveal completes.
///
/// The controller is only borrowed inside step callbacks, never across a
/// pause, so the host can call `reset` while the reveal is waiting.
pub async fn drive_reveal(
    controller: &Rc<RefCell<GameController>>,
    task: RevealTask,
    ticket: RevealTicket,
) -> RevealOutcome {
    let outcome = task
        .run(|snapshot| {
            controller.borrow_mut().apply_step(ticket, snapshot);
        })
        .await;

    if outcome == RevealOutcome::Completed {
        controller.borrow_mut().finish(ticket);
    }
    outcome
}
