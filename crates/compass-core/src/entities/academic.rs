//! Academic performance as a subject to percentage mapping.
//!
//! Subject names arrive from mark-sheets in many spellings
//! (`Computer Science`, `computer_science`, `COMPUTER-SCIENCE`). All keys are
//! normalised with [`subject_key`] on the way in so lookups against stream
//! requirements are spelling-insensitive.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Requirement key matched against the mean of every provided subject.
pub const WILDCARD_SUBJECT: &str = "any_subject";

/// Marks above this percentage make a subject "strong".
const STRONG_SUBJECT_THRESHOLD: f64 = 75.0;

/// Normalise a subject name: lowercase, with runs of spaces, hyphens and
/// underscores collapsed into a single underscore.
#[must_use]
pub fn subject_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut pending_separator = false;
    for ch in name.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = !key.is_empty();
            continue;
        }
        if pending_separator {
            key.push('_');
            pending_separator = false;
        }
        key.extend(ch.to_lowercase());
    }
    key
}

/// Subject to percentage mapping with normalised keys.
///
/// Marks are clamped to `[0, 100]`; non-finite marks are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct AcademicRecord {
    marks: BTreeMap<String, f64>,
}

impl AcademicRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a mark. Returns `false` if the mark was not finite and was dropped.
    pub fn insert(&mut self, subject: &str, percentage: f64) -> bool {
        if !percentage.is_finite() {
            return false;
        }
        let key = subject_key(subject);
        if key.is_empty() {
            return false;
        }
        self.marks.insert(key, percentage.clamp(0.0, 100.0));
        true
    }

    #[must_use]
    pub fn get(&self, subject: &str) -> Option<f64> {
        self.marks.get(&subject_key(subject)).copied()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Mean of all recorded marks, or `None` for an empty record.
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        if self.marks.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.marks.len() as f64;
        Some(self.marks.values().sum::<f64>() / count)
    }

    /// Normalised keys of subjects scored above 75%.
    #[must_use]
    pub fn strong_subjects(&self) -> Vec<&str> {
        self.marks
            .iter()
            .filter(|(_, mark)| **mark > STRONG_SUBJECT_THRESHOLD)
            .map(|(subject, _)| subject.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.marks.iter().map(|(subject, mark)| (subject.as_str(), *mark))
    }
}

impl From<BTreeMap<String, f64>> for AcademicRecord {
    fn from(raw: BTreeMap<String, f64>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<AcademicRecord> for BTreeMap<String, f64> {
    fn from(record: AcademicRecord) -> Self {
        record.marks
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for AcademicRecord {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (subject, mark) in iter {
            record.insert(subject.as_ref(), mark);
        }
        record
    }
}
