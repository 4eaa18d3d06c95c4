//! Immutable data models produced by the parser.

pub mod record;
pub mod value;
