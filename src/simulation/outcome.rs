//! Per-pair simulation results

use crate::error::PuzzleError;
use crate::puzzle::Pair;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// How (and whether) the hidden pair gets resolved.
///
/// Ordered so that all product resolutions sort before sum resolutions,
/// each by round, with `Never` last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Classification {
    /// The product-holder knows the pair at the start of this round
    ProductResolved(u32),
    /// The sum-holder knows the pair after the product-holder's denial in this round
    SumResolved(u32),
    /// Both parties keep denying forever
    Never,
}

impl Classification {
    /// Round at which the pair was resolved, if it ever was
    pub fn round(&self) -> Option<u32> {
        match self {
            Classification::ProductResolved(k) | Classification::SumResolved(k) => Some(*k),
            Classification::Never => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Classification::Never)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::ProductResolved(k) => write!(f, "P{}", k),
            Classification::SumResolved(k) => write!(f, "S{}", k),
            Classification::Never => write!(f, "Never"),
        }
    }
}

impl FromStr for Classification {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PuzzleError::InvalidClassification(s.to_string());
        if s == "Never" {
            return Ok(Classification::Never);
        }

        let round = |digits: &str| match digits.parse::<u32>() {
            Ok(k) if k > 0 => Ok(k),
            _ => Err(invalid()),
        };
        if let Some(digits) = s.strip_prefix('P') {
            Ok(Classification::ProductResolved(round(digits)?))
        } else if let Some(digits) = s.strip_prefix('S') {
            Ok(Classification::SumResolved(round(digits)?))
        } else {
            Err(invalid())
        }
    }
}

impl From<Classification> for String {
    fn from(classification: Classification) -> Self {
        classification.to_string()
    }
}

impl TryFrom<String> for Classification {
    type Error = PuzzleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A target pair together with its classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub pair: Pair,
    pub classification: Classification,
}

impl Outcome {
    pub fn new(pair: Pair, classification: Classification) -> Self {
        Self { pair, classification }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.pair, self.classification)
    }
}

/// Aggregate statistics over a batch of outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Number of outcomes seen
    pub total: usize,
    /// Outcomes classified as `Never`
    pub never: usize,
    /// Latest round at which any pair was resolved
    pub max_round: Option<u32>,
    /// Outcome count per classification
    pub counts: BTreeMap<Classification, usize>,
}

impl Summary {
    /// Tally a sequence of outcomes
    pub fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a Outcome>,
    {
        let mut summary = Self::default();
        for outcome in outcomes {
            summary.record(outcome);
        }
        summary
    }

    /// Add one outcome to the tally
    pub fn record(&mut self, outcome: &Outcome) {
        self.total += 1;
        if !outcome.classification.is_resolved() {
            self.never += 1;
        }
        self.max_round = self.max_round.max(outcome.classification.round());
        *self.counts.entry(outcome.classification).or_insert(0) += 1;
    }

    /// Count for a single classification
    pub fn count(&self, classification: Classification) -> usize {
        self.counts.get(&classification).copied().unwrap_or(0)
    }

    /// Fraction of outcomes that never resolve (0.0 to 1.0)
    pub fn never_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.never as f64 / self.total as f64
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_codes() {
        assert_eq!(Classification::ProductResolved(3).to_string(), "P3");
        assert_eq!(Classification::SumResolved(1).to_string(), "S1");
        assert_eq!(Classification::Never.to_string(), "Never");

        assert_eq!("P12".parse::<Classification>().unwrap(), Classification::ProductResolved(12));
        assert_eq!("Never".parse::<Classification>().unwrap(), Classification::Never);
        assert!("P0".parse::<Classification>().is_err());
        assert!("Q1".parse::<Classification>().is_err());
        assert!("".parse::<Classification>().is_err());
    }

    #[test]
    fn test_classification_order() {
        let mut all = vec![
            Classification::Never,
            Classification::SumResolved(1),
            Classification::ProductResolved(2),
            Classification::ProductResolved(1),
        ];
        all.sort();
        assert_eq!(
            all,
            vec![
                Classification::ProductResolved(1),
                Classification::ProductResolved(2),
                Classification::SumResolved(1),
                Classification::Never,
            ]
        );
    }

    #[test]
    fn test_outcome_json() {
        let outcome = Outcome::new(Pair(1, 4), Classification::ProductResolved(2));
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"pair":[1,4],"classification":"P2"}"#);

        let back: Outcome = serde_json::from_str(&json).unwrap();
        assert_eq!(back, outcome);
    }

    #[test]
    fn test_summary_tally() {
        let outcomes = vec![
            Outcome::new(Pair(1, 1), Classification::ProductResolved(1)),
            Outcome::new(Pair(1, 2), Classification::ProductResolved(1)),
            Outcome::new(Pair(1, 4), Classification::SumResolved(3)),
            Outcome::new(Pair(3, 3), Classification::Never),
        ];
        let summary = Summary::from_outcomes(&outcomes);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.never, 1);
        assert_eq!(summary.max_round, Some(3));
        assert_eq!(summary.count(Classification::ProductResolved(1)), 2);
        assert_eq!(summary.count(Classification::SumResolved(2)), 0);
        assert!((summary.never_ratio() - 0.25).abs() < f64::EPSILON);

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"P1\": 2"));
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_outcomes(&Vec::<Outcome>::new());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.max_round, None);
        assert_eq!(summary.never_ratio(), 0.0);
    }
}
