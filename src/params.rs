//! Protocol parameter table.
//!
//! Loop bounds are supplied by the embedding application before a protocol
//! instance runs. The table maps a parameter name (as written in the
//! protocol, e.g. `k` in `foreach A[i:1..k]`) to a positive bound. Lookups
//! validate the bound, so a table deserialized from untrusted configuration
//! can hold any value until it is actually used.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

use crate::error::{LoopError, Result};

/// A validated, positive loop bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bound(NonZeroUsize);

impl Bound {
    /// Returns `None` for a zero bound.
    pub fn new(bound: usize) -> Option<Self> {
        NonZeroUsize::new(bound).map(Self)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

/// Lookup table from parameter name to loop bound
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamTable {
    bounds: BTreeMap<String, usize>,
}

impl ParamTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, bound: usize) -> Self {
        self.set(name, bound);
        self
    }

    /// Insert or replace the bound for `name`. Returns the previous value.
    pub fn set(&mut self, name: impl Into<String>, bound: usize) -> Option<usize> {
        self.bounds.insert(name.into(), bound)
    }

    /// Raw configured value, unvalidated.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.bounds.get(name).copied()
    }

    /// Validated bound for `name`.
    pub fn bound(&self, name: &str) -> Result<Bound> {
        let raw = self
            .get(name)
            .ok_or_else(|| LoopError::UnknownParameter(name.to_string()))?;
        Bound::new(raw).ok_or_else(|| LoopError::InvalidBound {
            param: name.to_string(),
            bound: raw,
        })
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.bounds.iter().map(|(name, bound)| (name.as_str(), *bound))
    }
}

impl<S: Into<String>> FromIterator<(S, usize)> for ParamTable {
    fn from_iter<I: IntoIterator<Item = (S, usize)>>(iter: I) -> Self {
        Self {
            bounds: iter
                .into_iter()
                .map(|(name, bound)| (name.into(), bound))
                .collect(),
        }
    }
}
