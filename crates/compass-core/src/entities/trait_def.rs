use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A named latent aptitude dimension, scored in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TraitDef {
    /// Unique key, e.g. `analytical_thinking`.
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}
