//! Set of pairs still consistent with everything said so far

use super::{Attribute, Claim, Grouping, Pair};
use crate::error::{PuzzleError, Result};
use itertools::iproduct;
use log::trace;
use std::collections::BTreeSet;
use std::fmt;

/// Ordered collection of distinct candidate pairs.
///
/// Every filtering operation returns a new set; an existing set is never
/// modified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    pairs: Vec<Pair>,
}

impl CandidateSet {
    /// Build all pairs over an explicit collection of values.
    ///
    /// Duplicate values are dropped and the remaining values are taken in
    /// ascending order. Pairs are emitted row by row: every `(i, j)` for the
    /// smallest `i` first.
    pub fn from_values<I>(values: I, allow_equal: bool) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let values: Vec<i64> = values.into_iter().collect::<BTreeSet<_>>().into_iter().collect();
        Self::check_overflow(&values)?;

        let pairs = iproduct!(values.iter().copied(), values.iter().copied())
            .filter(|&(i, j)| if allow_equal { i <= j } else { i < j })
            .map(Pair::from)
            .collect();

        Ok(Self { pairs })
    }

    /// Build all pairs with members drawn from `[start, end)`.
    ///
    /// A degenerate range (`end <= start`) yields an empty set.
    pub fn from_range(start: i64, end: i64, allow_equal: bool) -> Result<Self> {
        Self::from_range_step(start, end, 1, allow_equal)
    }

    /// Build all pairs with members drawn from `start, start + step, ...`
    /// stopping before `end`. A negative step counts down towards `end`.
    pub fn from_range_step(start: i64, end: i64, step: i64, allow_equal: bool) -> Result<Self> {
        Self::from_values(range_values(start, end, step)?, allow_equal)
    }

    fn check_overflow(values: &[i64]) -> Result<()> {
        // |i * j| never exceeds the larger square of the two extremes
        for &value in [values.first(), values.last()].into_iter().flatten() {
            if value.checked_mul(value).is_none() || value.checked_add(value).is_none() {
                return Err(PuzzleError::ValueOverflow(value));
            }
        }
        Ok(())
    }

    /// Group the candidates by `i + j`
    pub fn group_by_sum(&self) -> Grouping {
        Grouping::by_attribute(&self.pairs, Attribute::Sum)
    }

    /// Group the candidates by `i * j`
    pub fn group_by_product(&self) -> Grouping {
        Grouping::by_attribute(&self.pairs, Attribute::Product)
    }

    /// Group the candidates by the value of `attribute`
    pub fn group_by(&self, attribute: Attribute) -> Grouping {
        Grouping::by_attribute(&self.pairs, attribute)
    }

    /// Keep only the pairs consistent with the holder of `attribute`
    /// answering `claim` to "do you know the pair?".
    ///
    /// The holder knows the pair exactly when no other candidate shares its
    /// key. Survivors are emitted group by group in key first-seen order,
    /// which generally differs from the input pair order.
    pub fn filter_by_knowledge(&self, attribute: Attribute, claim: Claim) -> Self {
        let grouping = self.group_by(attribute);
        let pairs: Vec<Pair> = grouping
            .iter()
            .filter(|(_, group)| claim.admits_group_of(group.len()))
            .flat_map(|(_, group)| group.iter().copied())
            .collect();

        trace!(
            target: "candidate_set",
            "{} holder says {}: {} -> {} candidates",
            attribute, claim, self.pairs.len(), pairs.len()
        );

        Self { pairs }
    }

    /// Number of candidate pairs
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn contains(&self, pair: &Pair) -> bool {
        self.pairs.contains(pair)
    }

    /// Candidate pairs in set order
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Pair> {
        self.pairs.iter()
    }
}

/// Expand range arguments into the values they describe
fn range_values(start: i64, end: i64, step: i64) -> Result<Vec<i64>> {
    if step == 0 {
        return Err(PuzzleError::InvalidRange { start, end, step });
    }

    let in_range = move |value: &i64| if step > 0 { *value < end } else { *value > end };
    Ok(std::iter::successors(Some(start), |value| value.checked_add(step))
        .take_while(in_range)
        .collect())
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Pair;
    type IntoIter = std::slice::Iter<'a, Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

impl IntoIterator for CandidateSet {
    type Item = Pair;
    type IntoIter = std::vec::IntoIter<Pair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, pair) in self.pairs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", pair)?;
        }
        write!(f, "]")
    }
}
