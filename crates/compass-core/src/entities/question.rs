use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::QuestionKind;

/// Every catalog question offers exactly this many options.
pub const REQUIRED_OPTION_COUNT: usize = 4;

/// An immutable question bank entry.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKind,
    /// Ordered options; the 1-based position is the option rank.
    pub options: Vec<String>,
    pub traits_measured: Vec<String>,
    /// 1 (easiest) to 5.
    pub difficulty: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenario: Option<String>,
}

impl Question {
    /// Whether this question contributes evidence for `trait_name`.
    #[must_use]
    pub fn measures(&self, trait_name: &str) -> bool {
        self.traits_measured.iter().any(|t| t == trait_name)
    }

    /// 1-based position of `answer` among the options, if it matches one exactly.
    #[must_use]
    pub fn option_rank(&self, answer: &str) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option == answer)
            .map(|index| index + 1)
    }
}
