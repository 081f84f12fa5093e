//! Trait name to score mapping that preserves catalog order.
//!
//! Ordering matters: ties in strengths, gaps, and selection are broken by
//! catalog position, so the map keeps insertion order instead of sorting keys.
//! It serializes as a plain JSON object.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered mapping of trait name to score in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraitScores {
    entries: Vec<(String, f64)>,
}

impl TraitScores {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set the score for `name`, keeping its original position if present.
    pub fn insert(&mut self, name: impl Into<String>, score: f64) {
        let name = name.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = score;
        } else {
            self.entries.push((name, score));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, score)| *score)
    }

    /// Score for `name`, or `0.0` when the trait is absent.
    #[must_use]
    pub fn get_or_zero(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, score)| (name.as_str(), *score))
    }

    /// Population variance of all scores. `0.0` when empty.
    #[must_use]
    pub fn variance(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let n = self.entries.len() as f64;
        let mean = self.entries.iter().map(|(_, s)| s).sum::<f64>() / n;
        self.entries
            .iter()
            .map(|(_, s)| (s - mean).powi(2))
            .sum::<f64>()
            / n
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for TraitScores {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (name, score) in iter {
            scores.insert(name, score);
        }
        scores
    }
}

impl Serialize for TraitScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, score) in &self.entries {
            map.serialize_entry(name, score)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TraitScores {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScoresVisitor;

        impl<'de> Visitor<'de> for ScoresVisitor {
            type Value = TraitScores;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of trait name to score")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut scores = TraitScores::new();
                while let Some((name, score)) = access.next_entry::<String, f64>()? {
                    scores.insert(name, score);
                }
                Ok(scores)
            }
        }

        deserializer.deserialize_map(ScoresVisitor)
    }
}
