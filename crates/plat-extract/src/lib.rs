//! Extraction for the plat pipeline: HTTP fetch from the property API
//! and a durable JSON staging file.
//!
//! The staging file makes runs replayable — the transform can be re-run
//! against the last fetched batch without touching the network.

pub mod client;
pub mod error;
pub mod staging;

pub use client::{ClientConfig, PropertyClient};
pub use error::{Error, Result};
