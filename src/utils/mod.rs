//! Presentation helpers for simulation results

pub mod display;

pub use display::{OutcomeFormatter, SimulationProgress, ColorOutput, Tone};
