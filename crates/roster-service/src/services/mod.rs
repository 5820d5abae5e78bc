//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] and orchestrates
//! fetch → fold → response for one area of the dashboard.

pub mod bulk;
pub mod config;
pub mod context;
pub mod duel;
pub mod error;
pub mod progress;
pub mod recognition;
pub mod snapshot;
pub mod views;

pub use bulk::BulkService;
pub use config::ConfigService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use duel::DuelService;
pub use error::{ServiceError, ServiceResult};
pub use progress::ProgressService;
pub use recognition::RecognitionService;
pub use snapshot::SnapshotService;
pub use views::ViewService;
