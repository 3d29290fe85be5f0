//! Core library for the Aisle wedding marketplace.
//!
//! Two engines live here: the vendor directory (catalog ingestion, filtering,
//! pagination) and route access gating for the couple/vendor navigation shell.
//! Configuration, telemetry, and application errors are shared with the
//! `aisle-api` service crate.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
