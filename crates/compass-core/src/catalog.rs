//! Immutable reference data: traits, the question bank, and the stream database.
//!
//! A [`Catalog`] is loaded once at process start and only ever read afterwards.
//! Every constructor runs [`Catalog::validate`], so downstream code can rely on
//! the invariants without re-checking them:
//!
//! - trait names, question ids, and stream names are unique
//! - every question has exactly four options and a difficulty of 1 to 5
//! - `traits_measured` is non-empty and names only known traits
//! - stream trait requirements name only known traits and lie in `(0, 1]`
//! - stream subject requirements lie in `[0, 100]`

use std::collections::HashSet;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Question, REQUIRED_OPTION_COUNT, Stream, TraitDef};
use crate::errors::CoreError;

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Catalog {
    pub traits: Vec<TraitDef>,
    pub questions: Vec<Question>,
    pub streams: Vec<Stream>,
}

impl Catalog {
    /// The catalog shipped with Compass: 8 traits, 16 questions, 12 streams.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError`] only if the embedded document is corrupt.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json_str(BUILTIN_CATALOG)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Parse`] for malformed JSON and
    /// [`CoreError::Validation`] when an invariant does not hold.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse, and validate a catalog document from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Other`] if the file cannot be read, otherwise as
    /// [`Catalog::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|error| {
            anyhow::anyhow!("failed to read catalog {}: {error}", path.display())
        })?;
        Self::from_json_str(&json)
    }

    /// Check every catalog invariant.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first violation found.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.traits.is_empty() {
            return Err(CoreError::Validation("catalog defines no traits".into()));
        }

        let mut trait_names = HashSet::new();
        for def in &self.traits {
            if def.name.is_empty() {
                return Err(CoreError::Validation("trait with empty name".into()));
            }
            if !trait_names.insert(def.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate trait '{}'",
                    def.name
                )));
            }
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate question id '{}'",
                    question.id
                )));
            }
            if question.options.len() != REQUIRED_OPTION_COUNT {
                return Err(CoreError::Validation(format!(
                    "question '{}' has {} options, expected {REQUIRED_OPTION_COUNT}",
                    question.id,
                    question.options.len()
                )));
            }
            if !(1..=5).contains(&question.difficulty) {
                return Err(CoreError::Validation(format!(
                    "question '{}' has difficulty {}, expected 1-5",
                    question.id, question.difficulty
                )));
            }
            if question.traits_measured.is_empty() {
                return Err(CoreError::Validation(format!(
                    "question '{}' measures no traits",
                    question.id
                )));
            }
            if let Some(unknown) = question
                .traits_measured
                .iter()
                .find(|t| !trait_names.contains(t.as_str()))
            {
                return Err(CoreError::Validation(format!(
                    "question '{}' measures unknown trait '{unknown}'",
                    question.id
                )));
            }
        }

        let mut stream_names = HashSet::new();
        for stream in &self.streams {
            if !stream_names.insert(stream.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate stream '{}'",
                    stream.name
                )));
            }
            for (name, minimum) in &stream.required_traits {
                if !trait_names.contains(name.as_str()) {
                    return Err(CoreError::Validation(format!(
                        "stream '{}' requires unknown trait '{name}'",
                        stream.name
                    )));
                }
                if !(*minimum > 0.0 && *minimum <= 1.0) {
                    return Err(CoreError::Validation(format!(
                        "stream '{}' trait '{name}' threshold {minimum} outside (0, 1]",
                        stream.name
                    )));
                }
            }
            for (subject, minimum) in &stream.required_subjects {
                if !(0.0..=100.0).contains(minimum) {
                    return Err(CoreError::Validation(format!(
                        "stream '{}' subject '{subject}' threshold {minimum} outside [0, 100]",
                        stream.name
                    )));
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    #[must_use]
    pub fn trait_def(&self, name: &str) -> Option<&TraitDef> {
        self.traits.iter().find(|t| t.name == name)
    }

    #[must_use]
    pub fn is_known_trait(&self, name: &str) -> bool {
        self.trait_def(name).is_some()
    }

    /// Trait names in catalog order.
    pub fn trait_names(&self) -> impl Iterator<Item = &str> {
        self.traits.iter().map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn stream(&self, name: &str) -> Option<&Stream> {
        self.streams.iter().find(|s| s.name == name)
    }

    /// Look up a stream or fail with [`CoreError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if no stream has that name.
    pub fn require_stream(&self, name: &str) -> Result<&Stream, CoreError> {
        self.stream(name).ok_or_else(|| CoreError::NotFound {
            entity_type: "stream".into(),
            id: name.into(),
        })
    }

    /// Streams whose category matches `category`, ignoring ASCII case.
    #[must_use]
    pub fn streams_in_category(&self, category: &str) -> Vec<&Stream> {
        self.streams
            .iter()
            .filter(|s| s.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Distinct stream categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for stream in &self.streams {
            if !seen.contains(&stream.category.as_str()) {
                seen.push(stream.category.as_str());
            }
        }
        seen
    }
}
