//! Rank - organizational tier of an alliance member

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Organizational tier, R3 highest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Rank {
    #[default]
    R1,
    R2,
    R3,
}

impl Rank {
    /// Order in which rank groups are rendered (highest tier first)
    pub const DISPLAY_ORDER: [Rank; 3] = [Rank::R3, Rank::R2, Rank::R1];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::R1 => "R1",
            Self::R2 => "R2",
            Self::R3 => "R3",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "R1" => Ok(Self::R1),
            "R2" => Ok(Self::R2),
            "R3" => Ok(Self::R3),
            _ => Err(RankParseError(s.to_string())),
        }
    }
}

/// Error when parsing a rank from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rank: {0}")]
pub struct RankParseError(pub String);
