//! Entity structs for all Compass domain objects.
//!
//! Catalog entities (traits, questions, streams) are immutable reference data.
//! Assessment entities (responses, academic records, matches, profiles) are
//! created per assessment and handed back to the caller.
//! Most structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! exchange and schema validation.

mod academic;
mod profile;
mod question;
mod response;
mod stream;
mod trait_def;
mod trait_scores;

pub use academic::{AcademicRecord, WILDCARD_SUBJECT, subject_key};
pub use profile::{Match, PersonalityProfile, Recovery, StreamInsight, WorkPreferences};
pub use question::{Question, REQUIRED_OPTION_COUNT};
pub use response::{Response, ResponsePatterns};
pub use stream::{SalaryBand, Stream, StreamDetails};
pub use trait_def::TraitDef;
pub use trait_scores::TraitScores;
