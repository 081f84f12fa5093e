//! # compass-engine
//!
//! The trait-inference and stream-matching engine.
//!
//! - [`selector`]: adaptive choice of the next questions and response patterns
//! - [`scoring`]: responses to per-trait scores, with recovered input problems
//! - [`synthesis`]: learning style, work preferences, interests, strengths,
//!   gaps, and assessment confidence
//! - [`matching`]: partial-credit ranking of catalog streams
//! - [`assess`](fn@assess): all of the above in one call
//!
//! Every operation is a pure function over an immutable [`compass_core::Catalog`]
//! and a configuration value. Nothing here performs I/O or holds state, so
//! calls for different assessments may run concurrently.

mod assess;
pub mod matching;
pub mod scoring;
pub mod selector;
pub mod synthesis;

pub use assess::assess;
pub use matching::{rank, score_stream};
pub use scoring::{ScoringReport, score_traits, score_traits_report, unmeasured_default};
pub use selector::{analyze_patterns, select_next, trait_confidence};
