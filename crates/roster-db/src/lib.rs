//! # roster-db
//!
//! Record store layer implementing the repository traits of `roster-core`.
//!
//! ## Overview
//!
//! - Connection pool management and schema setup
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repositories, where every batch runs in one transaction
//! - An in-memory store with batch-failure injection for tests and demos
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_db::pool::{create_pool, run_migrations, PoolConfig};
//! use roster_db::repositories::PgSnapshotRepository;
//! use roster_core::traits::SnapshotRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&PoolConfig::from_url(std::env::var("DATABASE_URL")?)).await?;
//!     run_migrations(&pool).await?;
//!     let repo = PgSnapshotRepository::new(pool);
//!     let today = repo.find_by_date(roster_core::SnapshotDate::today()).await?;
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{InMemoryConfigStore, InMemorySnapshotStore};
pub use pool::{create_pool, run_migrations, PgPool, PoolConfig};
pub use repositories::{PgConfigRepository, PgSnapshotRepository};
