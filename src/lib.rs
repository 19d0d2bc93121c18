//! Impossible Puzzle Simulator
//!
//! Two numbers are picked; one party is told their product, another their
//! sum, and each in turn says whether they know the pair. This library models
//! each party's knowledge round by round and classifies, for every pair of a
//! range, when (if ever) the pair gets resolved.

pub mod config;
pub mod error;
pub mod puzzle;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::PuzzleError;
pub use puzzle::{CandidateSet, Pair};
pub use simulation::{Classification, Outcome, Simulation, Simulator};

/// Main entry point: lazily classify every pair drawn from `[start, end)`
pub fn simulate(start: i64, end: i64, allow_equal: bool) -> error::Result<Simulation> {
    Simulator::run(start, end, allow_equal)
}
