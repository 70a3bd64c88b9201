//! Fjall-based persistence for the submission history
//!
//! The gateway itself holds no job state (the remote backend owns that),
//! but it does remember which submissions it accepted, so clients can list
//! their recent jobs. The store is an embedded Fjall keyspace opened once
//! at startup, handed to the handlers through shared state, and persisted
//! explicitly on shutdown.
//!
//! Keys carry a UUIDv7 suffix, so insertion order and time order agree and
//! a newest-first listing is a reverse scan.

mod error;
mod partitions;
mod store;

pub use error::{HistoryError, Result};
pub use store::HistoryStore;
