//! Simulation of the question/answer protocol over every pair of a range

pub mod outcome;
pub mod simulator;

pub use outcome::{Classification, Outcome, Summary};
pub use simulator::{classify, RangeSpec, Simulation, Simulator};
