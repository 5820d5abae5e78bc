//! Fixed health and duel thresholds
//!
//! These are constants of the game, not configuration. Every predicate in the
//! crate reads them from here.

use std::ops::RangeInclusive;

/// Power (millions) below which a member is flagged
pub const LOW_POWER: f64 = 10.0;

/// Level below which a member is flagged
pub const LOW_LEVEL: u8 = 20;

/// Team-1 power (millions) below which a member is flagged
pub const LOW_TEAM_POWER: f64 = 3.0;

/// Duel score below which a member is flagged as low
pub const LOW_DUEL: u64 = 2_000_000;

/// Duel score below which a member is flagged as critical
pub const CRITICAL_DUEL: u64 = 1_000_000;

/// Reference for a full day of duel points
pub const DAILY_DUEL_ALLOTMENT: u64 = 7_200_000;

/// Raw duel units per displayed unit
pub const DUEL_DISPLAY_DIVISOR: f64 = 1_000_000.0;

/// Valid member levels
pub const LEVEL_RANGE: RangeInclusive<u8> = 14..=30;

/// Level preselected for a new member
pub const DEFAULT_LEVEL: u8 = 20;

/// Days in a duel week
pub const DAYS_PER_WEEK: u32 = 7;
