use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::passes::is_space;

// ── Name pair ────────────────────────────────────────────────────────────

/// One extracted association between a Han token and a translated name.
///
/// Field order matters: JSON exports list `han` before `name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NamePair {
    /// 1-5 Han characters, trimmed
    pub han: String,
    /// Translation or romanization, trimmed; may be nonsense on over-match
    pub name: String,
}

impl NamePair {
    pub fn new(han: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            han: han.into(),
            name: name.into(),
        }
    }

    /// Build a pair from two raw capture groups.
    pub(crate) fn from_captures(han: &str, name: &str) -> Self {
        Self::new(han.trim_matches(is_space), name.trim_matches(is_space))
    }
}

// ── Result set ───────────────────────────────────────────────────────────

/// Ordered result set; order is extraction order and edits address it by index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairList {
    pairs: Vec<NamePair>,
}

impl PairList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&NamePair> {
        self.pairs.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NamePair> {
        self.pairs.iter()
    }

    pub fn as_slice(&self) -> &[NamePair] {
        &self.pairs
    }

    /// Replace the translated name at `index`. The Han token is never touched.
    pub fn set_name(&mut self, index: usize, name: impl Into<String>) -> Result<()> {
        let len = self.pairs.len();
        let pair = self
            .pairs
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        pair.name = name.into();
        Ok(())
    }

    /// Drop exact (han, name) repeats, keeping the first occurrence.
    ///
    /// Extraction never calls this; it's an opt-in cleanup step.
    pub fn deduplicated(&self) -> PairList {
        let mut seen = HashSet::new();
        self.pairs
            .iter()
            .filter(|p| seen.insert((p.han.as_str(), p.name.as_str())))
            .cloned()
            .collect()
    }

    /// Parse a JSON export back into a list.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<Vec<NamePair>> for PairList {
    fn from(pairs: Vec<NamePair>) -> Self {
        Self { pairs }
    }
}

impl FromIterator<NamePair> for PairList {
    fn from_iter<I: IntoIterator<Item = NamePair>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PairList {
    type Item = NamePair;
    type IntoIter = std::vec::IntoIter<NamePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.into_iter()
    }
}

impl<'a> IntoIterator for &'a PairList {
    type Item = &'a NamePair;
    type IntoIter = std::slice::Iter<'a, NamePair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}
