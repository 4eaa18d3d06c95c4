//! High-level, user-facing operations built on the core parser.

pub mod dedup;
pub mod ingest;
