//! Foundation layer: data models and file parsing.

pub mod io;
pub mod models;
