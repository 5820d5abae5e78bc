//! Value objects - immutable types identified by their value

mod image;
mod snapshot_date;
mod snapshot_id;

pub use image::ImageData;
pub use snapshot_date::{SnapshotDate, SnapshotDateParseError, DATE_FORMAT};
pub use snapshot_id::{sanitize_name, SnapshotId};
