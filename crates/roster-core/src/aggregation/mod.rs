//! Aggregation engine - pure view derivation over flat snapshot sets
//!
//! Nothing in here touches a store. Callers fetch snapshots, hand them to
//! these functions and render the result.

mod daily;
mod progress;
mod weekly;

pub use daily::{filter_and_sort, group_by_rank, DailyFilter, DailyStats, RankGroup, SortKey};
pub use progress::{
    build_progress_matrix, date_axis, fold_progress, DataPoint, DuelTone, LevelTone,
    PowerTone, ProgressCell, ProgressEntry, ProgressMatrix, ProgressMode, ProgressRow,
    MAX_AXIS_LEN,
};
pub use weekly::{week_dates, week_window, weekly_rollup, WeeklyScore};
