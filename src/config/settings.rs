//! Configuration settings for the impossible puzzle simulator

use crate::simulation::RangeSpec;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Widest range the CLI will simulate; every pair re-filters the whole set
pub const MAX_RANGE_WIDTH: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub range: RangeConfig,
    pub simulation: SimulationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeConfig {
    pub start: i64,
    pub end: i64,
    pub allow_equal: bool,
}

impl RangeConfig {
    pub fn to_spec(&self) -> RangeSpec {
        RangeSpec::new(self.start, self.end, self.allow_equal)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Simulate pairs on the rayon thread pool
    pub parallel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub show_grid: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            range: RangeConfig {
                start: 1,
                end: 10,
                allow_equal: true,
            },
            simulation: SimulationConfig { parallel: false },
            output: OutputConfig {
                format: OutputFormat::Text,
                show_grid: false,
                output_directory: PathBuf::from("output"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        let width = self.range.to_spec().width();
        if width == 0 {
            anyhow::bail!(
                "Range [{}, {}) contains no values",
                self.range.start, self.range.end
            );
        }

        if width > MAX_RANGE_WIDTH {
            anyhow::bail!(
                "Range [{}, {}) has {} values, at most {} are supported",
                self.range.start, self.range.end, width, MAX_RANGE_WIDTH
            );
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(start) = cli_overrides.start {
            self.range.start = start;
        }
        if let Some(end) = cli_overrides.end {
            self.range.end = end;
        }
        if cli_overrides.distinct {
            self.range.allow_equal = false;
        }
        if cli_overrides.parallel {
            self.simulation.parallel = true;
        }
        if cli_overrides.show_grid {
            self.output.show_grid = true;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub start: Option<i64>,
    pub end: Option<i64>,
    pub distinct: bool,
    pub parallel: bool,
    pub show_grid: bool,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.range.to_spec(), RangeSpec::new(1, 10, true));
    }

    #[test]
    fn test_yaml_round_trip_through_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.range.end = 40;
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "
range:
  start: 2
  end: 12
  allow_equal: false
simulation:
  parallel: true
output:
  format: json
  show_grid: true
  output_directory: results
";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.range.to_spec(), RangeSpec::new(2, 12, false));
        assert!(settings.simulation.parallel);
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert_eq!(settings.output.output_directory, PathBuf::from("results"));
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        let mut settings = Settings::default();
        settings.range.end = settings.range.start;
        assert!(settings.validate().is_err());

        settings.range.end = settings.range.start + MAX_RANGE_WIDTH as i64 + 1;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "range: [1, 2").unwrap();
        assert!(Settings::from_file(&path).is_err());
        assert!(Settings::from_file(&dir.path().join("missing.yaml")).is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            start: Some(3),
            end: Some(30),
            distinct: true,
            format: Some(OutputFormat::Json),
            ..Default::default()
        });

        assert_eq!(settings.range.to_spec(), RangeSpec::new(3, 30, false));
        assert_eq!(settings.output.format, OutputFormat::Json);
        assert!(!settings.simulation.parallel);
    }
}
