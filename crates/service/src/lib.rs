//! Service layer for the cat collection.
//! - `storage`: JSON document persisted to a single file.
//! - `cats`: record model, repository over the store, and the service that
//!   stamps ids and timestamps.
//! - `errors`: the error kinds every layer returns.

pub mod errors;
pub mod storage;
pub mod cats;
