//! Marketplace engines: vendor directory browsing and route access gating.

pub mod access;
pub mod directory;
