//! # roster-service
//!
//! Application layer: fetches snapshots through the repository ports, runs
//! them through the aggregation engine and shapes the results for the API.

pub mod dto;
pub mod recognizer;
pub mod services;
pub mod session;

pub use dto::*;
pub use recognizer::{GeminiConfig, GeminiRecognizer};
pub use services::{
    BulkService, ConfigService, DuelService, ProgressService, RecognitionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, SnapshotService, ViewService,
};
pub use session::{DashboardSession, Theme};
