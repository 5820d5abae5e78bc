//! Snapshot ID - synthetic document key of a member snapshot
//!
//! Format: `{date}_{sanitizedName}_{suffix}`. A new ID is minted for every
//! created or copied snapshot, so the ID is not stable across days for the
//! same member. Identity across days is the member name.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::SnapshotDate;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 8;
const FALLBACK_NAME: &str = "member";

/// Document key of a member snapshot
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Wrap an existing ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh ID for a snapshot of `name` on `date`
    pub fn mint(date: SnapshotDate, name: &str) -> Self {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..SUFFIX_LEN)
            .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
            .collect();

        Self(format!("{date}_{}_{suffix}", sanitize_name(name)))
    }

    /// Borrow the raw string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the raw string
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Replace every whitespace run with `_`, edges included; an empty name
/// falls back to a placeholder
pub fn sanitize_name(name: &str) -> String {
    if name.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SnapshotId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for SnapshotId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl AsRef<str> for SnapshotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
