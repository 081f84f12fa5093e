//! # compass-core
//!
//! Core types, catalog, and error types for Compass.
//!
//! This crate provides the foundational types shared across all Compass crates:
//! - Catalog entities: traits, questions, streams
//! - Assessment inputs: responses and academic records
//! - Assessment outputs: trait scores, matches, personality profiles
//! - Enums with stable `snake_case` serialization
//! - The catalog container with invariant validation and the built-in data set
//! - Cross-cutting error types

pub mod catalog;
pub mod entities;
pub mod enums;
pub mod errors;

pub use catalog::Catalog;
pub use errors::CoreError;
