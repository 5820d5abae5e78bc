//! Integration test utilities for the roster API
//!
//! Spawns the HTTP server on the in-memory store and drives it over real
//! HTTP with `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
