//! Grouping of candidate pairs by a shared key

use super::{Attribute, Pair};
use std::collections::HashMap;

/// Pairs grouped by sum or product, keys kept in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grouping {
    index: HashMap<i64, usize>,
    groups: Vec<(i64, Vec<Pair>)>,
}

impl Grouping {
    /// Group `pairs` by the value of `attribute`
    pub fn by_attribute<'a, I>(pairs: I, attribute: Attribute) -> Self
    where
        I: IntoIterator<Item = &'a Pair>,
    {
        let mut grouping = Self::default();
        for pair in pairs {
            grouping.insert(pair.key(attribute), *pair);
        }
        grouping
    }

    fn insert(&mut self, key: i64, pair: Pair) {
        match self.index.get(&key) {
            Some(&slot) => self.groups[slot].1.push(pair),
            None => {
                self.index.insert(key, self.groups.len());
                self.groups.push((key, vec![pair]));
            }
        }
    }

    /// Pairs sharing `key`, if any
    pub fn get(&self, key: i64) -> Option<&[Pair]> {
        self.index.get(&key).map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Number of pairs sharing `key` (zero when absent)
    pub fn group_size(&self, key: i64) -> usize {
        self.get(key).map_or(0, <[Pair]>::len)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = i64> + '_ {
        self.groups.iter().map(|(key, _)| *key)
    }

    /// Groups in first-seen key order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[Pair])> + '_ {
        self.groups.iter().map(|(key, pairs)| (*key, pairs.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
