//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::puzzle::{CandidateSet, Pair};
use crate::simulation::{Classification, Outcome, Summary};
use anyhow::{Context, Result};
use itertools::Itertools;
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::time::{Duration, Instant};

/// Format simulation outcomes for display
pub struct OutcomeFormatter;

impl OutcomeFormatter {
    /// One `(i, j): P2` line per outcome
    pub fn format_outcomes(outcomes: &[Outcome]) -> String {
        let mut output = String::new();
        for outcome in outcomes {
            output.push_str(&outcome.to_string());
            output.push('\n');
        }
        output
    }

    /// Format the outcome counts as a summary table
    pub fn format_summary(summary: &Summary) -> String {
        let mut output = String::new();

        output.push_str("Outcome Summary:\n");
        output.push_str("Class  | Pairs | Share\n");
        output.push_str("-------|-------|-------\n");

        for (classification, count) in &summary.counts {
            let share = if summary.total > 0 {
                *count as f64 / summary.total as f64 * 100.0
            } else {
                0.0
            };
            output.push_str(&format!("{:6} | {:5} | {:5.1}%\n", classification.to_string(), count, share));
        }

        output.push_str(&format!("Total pairs: {}\n", summary.total));
        output.push_str(&format!("Never resolved: {} ({:.1}%)\n", summary.never, summary.never_ratio() * 100.0));
        match summary.max_round {
            Some(round) => output.push_str(&format!("Latest resolution: round {}\n", round)),
            None => output.push_str("Latest resolution: none\n"),
        }

        output
    }

    /// Format the round at which each pair resolves as a grid.
    ///
    /// Rows are the smaller member, columns the larger one. Unresolved pairs,
    /// self-pairs and pairs absent from the outcomes are masked with `·`.
    pub fn format_round_grid(outcomes: &[Outcome]) -> String {
        let rounds: HashMap<Pair, Classification> = outcomes
            .iter()
            .map(|outcome| (outcome.pair, outcome.classification))
            .collect();
        let values: Vec<i64> = outcomes
            .iter()
            .flat_map(|outcome| [outcome.pair.0, outcome.pair.1])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let label_width = values
            .iter()
            .map(|value| value.to_string().len())
            .max()
            .unwrap_or(1);
        let cell_width = label_width.max(2);

        let mut output = String::new();

        // Header with column values
        output.push_str(&" ".repeat(label_width + 1));
        output.push_str(&values.iter().map(|j| format!("{:>cell_width$}", j)).join(" "));
        output.push('\n');

        // Rows with row values
        for &i in &values {
            output.push_str(&format!("{:>label_width$} ", i));
            let mut cells = values.iter().map(|&j| {
                let pair = Pair::new(i, j);
                let cell = match rounds.get(&pair).and_then(Classification::round) {
                    Some(round) if !pair.is_self_pair() => round.to_string(),
                    _ => "·".to_string(),
                };
                format!("{:>cell_width$}", cell)
            });
            output.push_str(&cells.join(" "));
            output.push('\n');
        }

        output
    }

    /// Format a candidate set with its size
    pub fn format_candidates(candidates: &CandidateSet) -> String {
        format!("{} candidate(s): {}", candidates.len(), candidates)
    }

    /// Save outcomes to files based on output format
    pub fn save_outcomes<P: AsRef<Path>>(
        outcomes: &[Outcome],
        output_dir: P,
        format: OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        let summary = Summary::from_outcomes(outcomes);

        match format {
            OutputFormat::Text => {
                let mut content = Self::format_outcomes(outcomes);
                content.push('\n');
                content.push_str(&Self::format_summary(&summary));
                std::fs::write(output_dir.join("outcomes.txt"), content)?;
            }
            OutputFormat::Json => {
                let outcomes_json = serde_json::to_string_pretty(outcomes)?;
                std::fs::write(output_dir.join("outcomes.json"), outcomes_json)?;

                // Also save a summary file
                std::fs::write(output_dir.join("summary.json"), summary.to_json()?)?;
            }
        }

        Ok(())
    }
}

/// Live tally of a sequential simulation, fed one outcome at a time
pub struct SimulationProgress {
    summary: Summary,
    expected: usize,
    started: Instant,
    last_drawn: Option<Instant>,
    live: bool,
}

impl SimulationProgress {
    /// Minimum time between two redraws of the status line
    const REDRAW_INTERVAL: Duration = Duration::from_millis(100);

    /// Track a run of `expected` pairs; `live` redraws a status line on stderr
    pub fn new(expected: usize, live: bool) -> Self {
        Self {
            summary: Summary::default(),
            expected,
            started: Instant::now(),
            last_drawn: None,
            live,
        }
    }

    /// Tally one classified pair
    pub fn record(&mut self, outcome: &Outcome) {
        self.summary.record(outcome);
        if !self.live {
            return;
        }

        let now = Instant::now();
        let due = self
            .last_drawn
            .map_or(true, |drawn| now.duration_since(drawn) >= Self::REDRAW_INTERVAL);
        if due {
            eprint!("\r{}", self.status_line());
            std::io::Write::flush(&mut std::io::stderr()).ok();
            self.last_drawn = Some(now);
        }
    }

    /// `Simulated 12/45 (26.7%): 3 never, latest round 2`
    pub fn status_line(&self) -> String {
        let done = self.summary.total;
        let percentage = if self.expected > 0 {
            done as f64 / self.expected as f64 * 100.0
        } else {
            100.0
        };
        let latest = match self.summary.max_round {
            Some(round) => format!("latest round {}", round),
            None => "nothing resolved".to_string(),
        };

        format!(
            "Simulated {}/{} ({:.1}%): {} never, {}",
            done, self.expected, percentage, self.summary.never, latest
        )
    }

    /// Close the status line and hand back the tally
    pub fn finish(self) -> Summary {
        if self.live {
            eprintln!("\r{} in {:.1}s", self.status_line(), self.started.elapsed().as_secs_f64());
        }
        self.summary
    }
}

/// What a piece of console text conveys; each tone has its own color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warning,
    ProductResolved,
    SumResolved,
    Unresolved,
}

impl Tone {
    /// Tone used for a classification code
    pub fn of(classification: Classification) -> Self {
        match classification {
            Classification::ProductResolved(_) => Tone::ProductResolved,
            Classification::SumResolved(_) => Tone::SumResolved,
            Classification::Never => Tone::Unresolved,
        }
    }

    fn ansi_code(self) -> u8 {
        match self {
            Tone::Success | Tone::ProductResolved => 32,
            Tone::Warning | Tone::Unresolved => 33,
            Tone::Info => 34,
            Tone::SumResolved => 36,
        }
    }
}

/// Console coloring, disabled by `NO_COLOR` or a dumb terminal
pub struct ColorOutput;

impl ColorOutput {
    /// Paint `text` in the color of `tone` when the terminal allows it
    pub fn paint(text: &str, tone: Tone) -> String {
        Self::render(text, tone, Self::enabled())
    }

    /// Paint a classification code (`P2`, `S1`, `Never`)
    pub fn classification(classification: Classification) -> String {
        Self::paint(&classification.to_string(), Tone::of(classification))
    }

    fn enabled() -> bool {
        std::env::var_os("NO_COLOR").is_none()
            && std::env::var("TERM").map_or(true, |term| term != "dumb")
    }

    fn render(text: &str, tone: Tone, enabled: bool) -> String {
        if enabled {
            format!("\x1b[{}m{}\x1b[0m", tone.ansi_code(), text)
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulator;
    use tempfile::tempdir;

    fn small_run() -> Vec<Outcome> {
        Simulator::run(1, 5, true).unwrap().collect()
    }

    #[test]
    fn test_outcome_lines() {
        let text = OutcomeFormatter::format_outcomes(&small_run());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "(1, 1): P1");
        assert_eq!(lines[3], "(1, 4): S1");
    }

    #[test]
    fn test_summary_table() {
        let summary = Summary::from_outcomes(&small_run());
        let table = OutcomeFormatter::format_summary(&summary);
        assert!(table.contains("P1     |     8 |  80.0%"));
        assert!(table.contains("S1     |     2 |  20.0%"));
        assert!(table.contains("Total pairs: 10"));
        assert!(table.contains("Never resolved: 0 (0.0%)"));
    }

    #[test]
    fn test_round_grid_masks_self_pairs_and_never() {
        let outcomes = vec![
            Outcome::new(Pair(1, 1), Classification::SumResolved(1)),
            Outcome::new(Pair(1, 2), Classification::ProductResolved(3)),
            Outcome::new(Pair(2, 2), Classification::Never),
        ];
        let grid = OutcomeFormatter::format_round_grid(&outcomes);
        let lines: Vec<_> = grid.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   1  2");
        assert_eq!(lines[1], "1  ·  3");
        assert_eq!(lines[2], "2  ·  ·");
    }

    #[test]
    fn test_candidate_formatting() {
        let set = CandidateSet::from_range(1, 3, true).unwrap();
        assert_eq!(
            OutcomeFormatter::format_candidates(&set),
            "3 candidate(s): [(1, 1), (1, 2), (2, 2)]"
        );
    }

    #[test]
    fn test_save_text_and_json() {
        let dir = tempdir().unwrap();
        let outcomes = small_run();

        OutcomeFormatter::save_outcomes(&outcomes, dir.path(), OutputFormat::Text).unwrap();
        let text = std::fs::read_to_string(dir.path().join("outcomes.txt")).unwrap();
        assert!(text.contains("(2, 2): S1"));

        OutcomeFormatter::save_outcomes(&outcomes, dir.path(), OutputFormat::Json).unwrap();
        let json = std::fs::read_to_string(dir.path().join("outcomes.json")).unwrap();
        let loaded: Vec<Outcome> = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, outcomes);
        assert!(dir.path().join("summary.json").exists());
    }

    #[test]
    fn test_progress_tallies_outcomes() {
        let outcomes: Vec<Outcome> = Simulator::run(1, 10, true).unwrap().collect();
        let mut progress = SimulationProgress::new(45, false);
        assert_eq!(progress.status_line(), "Simulated 0/45 (0.0%): 0 never, nothing resolved");

        for outcome in &outcomes[..9] {
            progress.record(outcome);
        }
        // (1, 8) and (1, 9) never resolve; (1, 6) takes three rounds
        assert_eq!(progress.status_line(), "Simulated 9/45 (20.0%): 2 never, latest round 3");

        for outcome in &outcomes[9..] {
            progress.record(outcome);
        }
        assert_eq!(progress.finish(), Summary::from_outcomes(&outcomes));
    }

    #[test]
    fn test_color_rendering() {
        assert_eq!(ColorOutput::render("P2", Tone::ProductResolved, true), "\x1b[32mP2\x1b[0m");
        assert_eq!(ColorOutput::render("S1", Tone::SumResolved, true), "\x1b[36mS1\x1b[0m");
        assert_eq!(ColorOutput::render("Never", Tone::Unresolved, false), "Never");

        assert_eq!(Tone::of(Classification::Never), Tone::Unresolved);
        assert!(ColorOutput::classification(Classification::SumResolved(4)).contains("S4"));
    }
}
