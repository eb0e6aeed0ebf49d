use std::fmt;

use serde::{Deserialize, Serialize};

/// A pipeline stage as defined by the remote store.
///
/// Stages are data, not a fixed set: the board renders whatever stages the
/// remote returns, ordered by `position`. `won` marks the terminal stage
/// that triggers the deal-closing workflow when a card lands in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
    pub color: String,
    /// Default win probability in percent, used for weighted metrics.
    pub probability: i64,
    pub position: i64,
    #[serde(default)]
    pub won: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Value,
    CreatedAt,
    Company,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Value => "value",
            SortKey::CreatedAt => "created_at",
            SortKey::Company => "company",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
