//! Line-oriented parsing and serialization of configuration files.

pub mod xyz;
