//! Ladder engine
//!
//! Everything here is pure and deterministic given its inputs:
//! - Randomness only through an injected `Rng`
//! - Stable iteration order (rows top to bottom, columns left to right)
//! - No timing except in `RevealTask`

pub mod lattice;
pub mod path;
pub mod resolve;
pub mod reveal;
pub mod simulate;

pub use lattice::Lattice;
pub use path::{PathSegment, build_path, path_end_column};
pub use resolve::{is_permutation, resolve};
pub use reveal::{
    CancelHandle, CancelSignal, RevealOutcome, RevealPacing, RevealState, RevealSteps, RevealTask,
    cancellation, reveal,
};
pub use simulate::{WinnerMapping, mapping, simulate};
