//! Core transformation logic for the plat property warehouse.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It takes an in-memory sequence of raw property records and
//! dimensionalizes it into a star schema: three deduplicated dimension
//! tables (location, sales, features) with dense surrogate keys, and one
//! fact table referencing them by foreign key. Extraction and persistence
//! live in `plat-extract` and `plat-store-sqlite`.

pub mod canonical;
pub mod clean;
pub mod dimension;
pub mod error;
pub mod fact;
pub mod record;
pub mod sink;
pub mod transform;

pub use error::{Error, Result};
