//! Stockpile - a small inventory item service
//!
//! Exposes create/read/update/delete over HTTP for a single `Item` resource:
//! - JSON REST API with axum
//! - MongoDB persistence, or an in-process store for tests and local runs
//! - Every store call bounded by a timeout

pub mod api;
pub mod config;
pub mod error;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
