pub mod convert;
pub mod dedup;
pub mod info;
