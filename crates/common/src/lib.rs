//! Shared building blocks for the cat API crates: logging setup and small
//! wire types.

pub mod types;
pub mod utils;
