//! Round-by-round simulation of the two parties' answers

use super::{Classification, Outcome};
use crate::config::Settings;
use crate::error::{PuzzleError, Result};
use crate::puzzle::{Attribute, CandidateSet, Claim, Grouping, Pair};
use log::{debug, trace};
use rayon::prelude::*;

/// Numeric range the hidden pair is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSpec {
    /// First value (inclusive)
    pub start: i64,
    /// Last value (exclusive)
    pub end: i64,
    /// Whether pairs with two equal members are allowed
    pub allow_equal: bool,
}

impl RangeSpec {
    pub fn new(start: i64, end: i64, allow_equal: bool) -> Self {
        Self { start, end, allow_equal }
    }

    /// Full candidate set for this range
    pub fn seed(&self) -> Result<CandidateSet> {
        CandidateSet::from_range(self.start, self.end, self.allow_equal)
    }

    /// Number of distinct values in the range
    pub fn width(&self) -> u64 {
        self.end.saturating_sub(self.start).max(0) as u64
    }
}

/// Classifies every pair of a range by how many rounds it takes to resolve
#[derive(Debug, Clone)]
pub struct Simulator {
    seed: CandidateSet,
}

impl Simulator {
    /// Create a simulator over `range`
    pub fn new(range: RangeSpec) -> Result<Self> {
        Ok(Self { seed: range.seed()? })
    }

    /// Create a simulator from the configured range
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.range.to_spec())
    }

    /// Lazily classify every pair of `[start, end)`
    pub fn run(start: i64, end: i64, allow_equal: bool) -> Result<Simulation> {
        Ok(Self::new(RangeSpec::new(start, end, allow_equal))?.outcomes())
    }

    /// Lazy sequence of outcomes, one per pair of the seeded set, in set order
    pub fn outcomes(&self) -> Simulation {
        Simulation {
            seed: self.seed.clone(),
            targets: self.seed.clone().into_iter(),
        }
    }

    /// Classify every pair on the rayon pool. Results come back in the same
    /// order as [`Simulator::outcomes`].
    pub fn run_parallel(&self) -> Vec<Outcome> {
        self.seed
            .pairs()
            .par_iter()
            .map(|&pair| Outcome::new(pair, classify(&self.seed, pair)))
            .collect()
    }

    /// Classify a single pair of the range
    pub fn simulate_pair(&self, pair: Pair) -> Result<Outcome> {
        if !self.seed.contains(&pair) {
            return Err(PuzzleError::PairOutOfRange(pair));
        }
        Ok(Outcome::new(pair, classify(&self.seed, pair)))
    }

    /// Number of pairs that will be simulated
    pub fn pair_count(&self) -> usize {
        self.seed.len()
    }
}

/// Iterator over per-pair outcomes
#[derive(Debug, Clone)]
pub struct Simulation {
    seed: CandidateSet,
    targets: std::vec::IntoIter<Pair>,
}

impl Iterator for Simulation {
    type Item = Outcome;

    fn next(&mut self) -> Option<Outcome> {
        let pair = self.targets.next()?;
        Some(Outcome::new(pair, classify(&self.seed, pair)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.targets.size_hint()
    }
}

impl ExactSizeIterator for Simulation {}

/// Play the question/answer protocol for `target` against its own copy of `seed`.
///
/// Each round the product-holder is asked first, then the sum-holder. A round
/// in which neither denial removes a candidate is a fixed point: nothing will
/// ever change again, so the pair is never resolved.
pub fn classify(seed: &CandidateSet, target: Pair) -> Classification {
    let product = target.product();
    let sum = target.sum();

    let mut candidates = seed.clone();
    let mut round = 0;
    let classification = loop {
        round += 1;
        let before = candidates.len();

        if holder_knows(&candidates.group_by_product(), product, target, Attribute::Product) {
            break Classification::ProductResolved(round);
        }
        candidates = candidates.filter_by_knowledge(Attribute::Product, Claim::DoesNotKnow);

        if holder_knows(&candidates.group_by_sum(), sum, target, Attribute::Sum) {
            break Classification::SumResolved(round);
        }
        candidates = candidates.filter_by_knowledge(Attribute::Sum, Claim::DoesNotKnow);

        trace!(
            target: "simulator",
            "{} round {}: {} -> {} candidates",
            target, round, before, candidates.len()
        );

        if candidates.len() == before {
            break Classification::Never;
        }
    };

    debug!(target: "simulator", "{}: {}", target, classification);
    classification
}

fn holder_knows(grouping: &Grouping, key: i64, target: Pair, attribute: Attribute) -> bool {
    match grouping.get(key) {
        Some(group) => group.len() == 1,
        // The target's own group can only shrink to one member, never vanish
        None => panic!(
            "candidate set lost target {} ({} {} has no group)",
            target, attribute, key
        ),
    }
}
