//! Axum extractors for request handling
//!
//! Custom extractors for validated bodies, query strings and path parameters.

mod path;
mod query;
mod validated;

pub use path::{DatePath, IdPath};
pub use query::QueryParams;
pub use validated::ValidatedJson;
