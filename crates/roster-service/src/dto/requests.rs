//! Request DTOs for API endpoints
//!
//! Numeric form fields arrive as strings, the way the roster form submits
//! them. They are parsed here, before any store call.

use serde::Deserialize;
use validator::Validate;

use roster_core::entities::thresholds::{DEFAULT_LEVEL, LEVEL_RANGE};
use roster_core::{
    DailyFilter, DomainError, ImageData, Rank, SnapshotDate, SnapshotId, SnapshotPatch,
};

// ============================================================================
// Field parsing
// ============================================================================

/// Parse a non-negative, finite decimal
fn parse_amount(field: &'static str, raw: &str) -> Result<f64, DomainError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .ok_or_else(|| DomainError::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

fn parse_duel_score(raw: &str) -> Result<u64, DomainError> {
    raw.trim().parse().map_err(|_| DomainError::InvalidNumber {
        field: "duel_score",
        value: raw.to_string(),
    })
}

fn parse_level(level: u8) -> Result<u8, DomainError> {
    if LEVEL_RANGE.contains(&level) {
        Ok(level)
    } else {
        Err(DomainError::LevelOutOfRange(level))
    }
}

fn parse_rank(raw: &str) -> Result<Rank, DomainError> {
    raw.parse().map_err(|_| DomainError::InvalidRank(raw.to_string()))
}

/// Parse a `YYYY-MM-DD` date field
pub fn parse_date(raw: &str) -> Result<SnapshotDate, DomainError> {
    SnapshotDate::parse(raw).map_err(|_| DomainError::InvalidDate(raw.to_string()))
}

/// Non-blank value of an optional form field
fn filled(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn default_level() -> u8 {
    DEFAULT_LEVEL
}

// ============================================================================
// Snapshot Requests
// ============================================================================

/// Create or edit a member snapshot
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveSnapshotRequest {
    pub date: String,

    #[serde(default)]
    #[validate(length(max = 64, message = "Name must be at most 64 characters"))]
    pub name: String,

    /// Screenshot of the in-game name as a data URL
    pub name_image: Option<String>,

    pub power: String,

    #[serde(default = "default_level")]
    #[validate(range(min = 14, max = 30, message = "Level must be between 14 and 30"))]
    pub level: u8,

    pub rank: Option<String>,

    pub team1_power: String,

    /// Blank or missing means 0
    pub duel_score: Option<String>,
}

/// Parsed, validated snapshot fields
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotFields {
    pub date: SnapshotDate,
    pub name: String,
    pub name_image: Option<String>,
    pub power: f64,
    pub level: u8,
    pub rank: Rank,
    pub team1_power: f64,
    pub duel_score: u64,
}

impl SaveSnapshotRequest {
    /// Parse every field, rejecting the whole form on the first bad one
    pub fn parse(&self) -> Result<SnapshotFields, DomainError> {
        let name = self.name.trim().to_string();
        let name_image = filled(self.name_image.as_ref()).map(String::from);

        if name.is_empty() && name_image.is_none() {
            return Err(DomainError::MissingName);
        }
        if let Some(image) = &name_image {
            ImageData::from_data_url(image)?;
        }

        Ok(SnapshotFields {
            date: parse_date(&self.date)?,
            name,
            name_image,
            power: parse_amount("power", &self.power)?,
            level: parse_level(self.level)?,
            rank: filled(self.rank.as_ref()).map_or(Ok(Rank::default()), parse_rank)?,
            team1_power: parse_amount("team1_power", &self.team1_power)?,
            duel_score: filled(self.duel_score.as_ref()).map_or(Ok(0), parse_duel_score)?,
        })
    }
}

/// Copy explicitly selected snapshots to another date
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CopySelectionRequest {
    #[validate(length(min = 1, message = "Select at least one snapshot"))]
    pub ids: Vec<String>,

    pub target_date: String,
}

impl CopySelectionRequest {
    pub fn snapshot_ids(&self) -> Vec<SnapshotId> {
        self.ids.iter().map(SnapshotId::new).collect()
    }
}

/// Apply the same field values to many snapshots
///
/// Only fields given as non-blank strings are applied.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BulkUpdateRequest {
    pub ids: Vec<String>,
    pub power: Option<String>,
    pub level: Option<String>,
    pub rank: Option<String>,
    pub team1_power: Option<String>,
    pub duel_score: Option<String>,
}

impl BulkUpdateRequest {
    pub fn snapshot_ids(&self) -> Vec<SnapshotId> {
        self.ids.iter().map(SnapshotId::new).collect()
    }

    /// Parse the filled-in fields into a patch
    pub fn to_patch(&self) -> Result<SnapshotPatch, DomainError> {
        let level = filled(self.level.as_ref())
            .map(|raw| {
                raw.parse::<u8>()
                    .map_err(|_| DomainError::InvalidNumber {
                        field: "level",
                        value: raw.to_string(),
                    })
                    .and_then(parse_level)
            })
            .transpose()?;

        Ok(SnapshotPatch {
            power: filled(self.power.as_ref())
                .map(|raw| parse_amount("power", raw))
                .transpose()?,
            level,
            rank: filled(self.rank.as_ref()).map(parse_rank).transpose()?,
            team1_power: filled(self.team1_power.as_ref())
                .map(|raw| parse_amount("team1_power", raw))
                .transpose()?,
            duel_score: filled(self.duel_score.as_ref())
                .map(parse_duel_score)
                .transpose()?,
        })
    }
}

// ============================================================================
// Config Requests
// ============================================================================

/// Partial alliance config update
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateConfigRequest {
    pub logo: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Alliance name must be 1-100 characters"))]
    pub alliance_name: Option<String>,
}

/// Replace the alliance logo
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetLogoRequest {
    /// Data URL or http(s) URL
    #[validate(length(min = 1, message = "Logo must not be empty"))]
    pub logo: String,
}

// ============================================================================
// Recognition Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RecognizeNameRequest {
    /// Screenshot as a data URL
    #[validate(length(min = 1, message = "Image must not be empty"))]
    pub image: String,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// `?date=` defaulting to today
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}

impl DayQuery {
    pub fn date(&self) -> Result<SnapshotDate, DomainError> {
        filled(self.date.as_ref()).map_or_else(|| Ok(SnapshotDate::today()), parse_date)
    }
}

/// `?date=&filter=&search=` for daily views
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewQuery {
    pub date: Option<String>,
    pub filter: Option<String>,
    pub search: Option<String>,
}

impl ViewQuery {
    pub fn date(&self) -> Result<SnapshotDate, DomainError> {
        filled(self.date.as_ref()).map_or_else(|| Ok(SnapshotDate::today()), parse_date)
    }

    pub fn filter(&self) -> Result<DailyFilter, DomainError> {
        self.filter.as_deref().unwrap_or_default().parse()
    }

    pub fn search(&self) -> &str {
        self.search.as_deref().unwrap_or_default()
    }
}

/// `?start=&end=` for progress matrices
#[derive(Debug, Clone, Deserialize)]
pub struct RangeQuery {
    pub start: String,
    pub end: String,
}

impl RangeQuery {
    pub fn bounds(&self) -> Result<(SnapshotDate, SnapshotDate), DomainError> {
        Ok((parse_date(&self.start)?, parse_date(&self.end)?))
    }
}
