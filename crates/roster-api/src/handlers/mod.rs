//! Route handlers
//!
//! All HTTP request handlers organized by area.

pub mod config;
pub mod days;
pub mod health;
pub mod recognition;
pub mod snapshots;
pub mod views;
