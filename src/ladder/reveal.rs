//! Step-paced reveal of winner paths
//!
//! [`RevealSteps`] is the pure part: a lazy sequence of highlight snapshots in
//! which every path advances one segment per step. [`RevealTask`] adds timing
//! and cancellation on top of it for hosts that animate the reveal.

use std::collections::BTreeSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use super::path::PathSegment;
use crate::consts::{LEAD_IN_MS, SETTLE_MS, STEP_DELAY_MS};

/// Set of highlighted segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealState {
    segments: BTreeSet<PathSegment>,
}

impl RevealState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, segment: &PathSegment) -> bool {
        self.segments.contains(segment)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    pub fn is_superset(&self, other: &RevealState) -> bool {
        self.segments.is_superset(&other.segments)
    }

    /// Host identifiers (`v-r-c` / `h-r-c`) in segment order
    pub fn identifiers(&self) -> Vec<String> {
        self.segments.iter().map(ToString::to_string).collect()
    }

    fn insert(&mut self, segment: PathSegment) {
        self.segments.insert(segment);
    }
}

impl FromIterator<PathSegment> for RevealState {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

/// Lazy snapshot sequence for a set of concurrent paths.
///
/// Step `i` highlights the first `min(i + 1, len)` segments of every path.
/// Shorter paths stop growing once exhausted. The sequence has as many steps
/// as the longest path and is consumed as it is read.
#[derive(Debug, Clone)]
pub struct RevealSteps {
    paths: Vec<Vec<PathSegment>>,
    step: usize,
    total: usize,
    current: RevealState,
}

/// Build the reveal sequence for one path per resolved winner
pub fn reveal(paths: Vec<Vec<PathSegment>>) -> RevealSteps {
    let total = paths.iter().map(Vec::len).max().unwrap_or(0);
    RevealSteps {
        paths,
        step: 0,
        total,
        current: RevealState::new(),
    }
}

impl RevealSteps {
    /// Total number of steps, including those already taken
    pub fn total_steps(&self) -> usize {
        self.total
    }

    /// Union of all full paths (what the last step shows)
    pub fn final_state(&self) -> RevealState {
        self.paths.iter().flatten().copied().collect()
    }
}

impl Iterator for RevealSteps {
    type Item = RevealState;

    fn next(&mut self) -> Option<RevealState> {
        if self.step >= self.total {
            return None;
        }
        let step = self.step;
        for path in &self.paths {
            if let Some(&segment) = path.get(step) {
                self.current.insert(segment);
            }
        }
        self.step += 1;
        Some(self.current.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total - self.step;
        (left, Some(left))
    }
}

impl ExactSizeIterator for RevealSteps {}

/// Timing of an animated reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPacing {
    /// Pause before the first step
    pub lead_in: Duration,
    /// Pause after each step
    pub step_delay: Duration,
    /// Pause after the last step before the result is published
    pub settle: Duration,
}

impl Default for RevealPacing {
    fn default() -> Self {
        Self {
            lead_in: Duration::from_millis(LEAD_IN_MS),
            step_delay: Duration::from_millis(STEP_DELAY_MS),
            settle: Duration::from_millis(SETTLE_MS),
        }
    }
}

impl RevealPacing {
    /// Zero delays; reveals run as fast as the executor polls them
    pub fn instant() -> Self {
        Self {
            lead_in: Duration::ZERO,
            step_delay: Duration::ZERO,
            settle: Duration::ZERO,
        }
    }

    /// Wall time of a reveal with `steps` steps, saturating at `Duration::MAX`
    pub fn total_duration(&self, steps: usize) -> Duration {
        let steps = u32::try_from(steps).unwrap_or(u32::MAX);
        self.lead_in
            .saturating_add(self.step_delay.saturating_mul(steps))
            .saturating_add(self.settle)
    }
}

/// Owner side of a cancellation signal
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

/// Task side of a cancellation signal. Dropping the handle also cancels.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: watch::Receiver<bool>,
}

impl CancelSignal {
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow() || self.rx.has_changed().is_err()
    }

    /// Resolves once the handle cancels or is dropped
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|&cancelled| cancelled).await;
    }
}

/// Create a connected handle/signal pair
pub fn cancellation() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelSignal { rx })
}

/// How an animated reveal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    Completed,
    Cancelled,
}

/// A reveal sequence bound to its pacing and cancellation signal.
///
/// Single use: `run` consumes the task.
#[derive(Debug)]
pub struct RevealTask {
    steps: RevealSteps,
    pacing: RevealPacing,
    cancel: CancelSignal,
}

impl RevealTask {
    pub fn new(steps: RevealSteps, pacing: RevealPacing, cancel: CancelSignal) -> Self {
        Self {
            steps,
            pacing,
            cancel,
        }
    }

    pub fn total_steps(&self) -> usize {
        self.steps.total_steps()
    }

    pub fn pacing(&self) -> RevealPacing {
        self.pacing
    }

    /// Drop the timing and hand back the raw steps, for hosts that pace
    /// frames themselves
    pub fn into_steps(self) -> RevealSteps {
        self.steps
    }

    /// Emit every snapshot to `on_step`, waiting `step_delay` after each.
    ///
    /// Once cancelled, nothing else is emitted and `Cancelled` is returned.
    pub async fn run<F>(mut self, mut on_step: F) -> RevealOutcome
    where
        F: FnMut(RevealState),
    {
        if !pause(&mut self.cancel, self.pacing.lead_in).await {
            return RevealOutcome::Cancelled;
        }

        let mut emitted = 0usize;
        for snapshot in self.steps.by_ref() {
            if self.cancel.is_cancelled() {
                return RevealOutcome::Cancelled;
            }
            on_step(snapshot);
            emitted += 1;
            log::trace!("reveal step {emitted}");
            if !pause(&mut self.cancel, self.pacing.step_delay).await {
                return RevealOutcome::Cancelled;
            }
        }

        if !pause(&mut self.cancel, self.pacing.settle).await {
            return RevealOutcome::Cancelled;
        }
        RevealOutcome::Completed
    }
}

/// Sleep for `delay` unless cancelled first. Returns false on cancellation.
async fn pause(cancel: &mut CancelSignal, delay: Duration) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
