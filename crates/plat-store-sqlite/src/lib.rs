//! SQLite backend for the plat property warehouse.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated
//! thread without blocking the async runtime. Foreign keys are enforced;
//! a fact row referencing a missing dimension row fails individually, it
//! does not abort the batch.

mod encode;
mod schema;
mod sink;

pub mod error;

pub use error::{Error, Result};
pub use sink::SqliteSink;
