//! Configuration management for the impossible puzzle simulator

pub mod settings;

pub use settings::{
    Settings, RangeConfig, SimulationConfig, OutputConfig, OutputFormat, CliOverrides,
    MAX_RANGE_WIDTH,
};
