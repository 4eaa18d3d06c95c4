//! # ConfXYZ Core Library
//!
//! A streaming reader for extended-XYZ molecular configuration files, producing
//! structured, typed configuration records for downstream consumers such as
//! property-prediction pipelines, duplicate-molecule lookups, and visualization.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers with a strict downward dependency:
//!
//! - **[`core`]: The Foundation.** Contains the immutable data models
//!   ([`core::models::value::ScalarValue`], [`core::models::record::Configuration`])
//!   and the line-oriented parser ([`core::io::xyz`]), including the header
//!   tokenizer, the typed key-value builder, and the lazy record stream.
//!
//! - **[`workflows`]: The Public API.** High-level, user-facing operations built
//!   on top of `core`: eager whole-file ingestion and duplicate-submission
//!   lookups against a CSV reference table.
//!
//! Data flows strictly downward: raw text → tokens → typed mapping → assembled
//! record → caller. Each record is independent, so multiple files can be parsed
//! concurrently by running one reader per thread with no shared state.

pub mod core;
pub mod workflows;

pub use crate::core::io::xyz::{XyzError, XyzParseErrorKind, XyzReader};
pub use crate::core::models::record::Configuration;
pub use crate::core::models::value::{Metadata, ScalarValue};
