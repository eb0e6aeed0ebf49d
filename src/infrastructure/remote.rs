use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Card, SortDir, SortKey, Stage};

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned status {0}: {1}")]
    Status(u16, String),

    #[error("commit timed out after {0:?}")]
    Timeout(Duration),

    #[error("decode error: {0}")]
    Decode(String),
}

/// Parameters of the board read. Owned by the store and sent verbatim to
/// the primary RPC; the fallback table reads reuse the same fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardQuery {
    #[serde(default)]
    pub user_id: Option<String>,
    pub org_id: String,
    #[serde(default)]
    pub filters: BoardFilters,
    pub sort_by: SortKey,
    pub sort_dir: SortDir,
    pub limit: i64,
    pub offset: i64,
}

impl BoardQuery {
    pub fn for_org(org_id: impl Into<String>) -> Self {
        Self {
            user_id: None,
            org_id: org_id.into(),
            filters: BoardFilters::default(),
            sort_by: SortKey::Value,
            sort_dir: SortDir::Desc,
            limit: 200,
            offset: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardFilters {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub min_value: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardPayload {
    pub stages: Vec<Stage>,
    pub deals: Vec<Card>,
    pub stage_metrics: Vec<StageMetric>,
    pub total_count: i64,
    pub summary: BoardSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageMetric {
    pub stage_id: String,
    pub deal_count: i64,
    pub total_value: f64,
    pub weighted_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardSummary {
    pub deal_count: i64,
    pub total_value: f64,
    pub weighted_value: f64,
}

/// The remote deal store. The engine only ever reads the whole board and
/// writes one stage change at a time; everything else about the store is
/// someone else's concern.
#[async_trait]
pub trait DealsRemote: Send + Sync {
    async fn fetch_board(&self, query: &BoardQuery) -> Result<BoardPayload, RemoteError>;

    /// Update-by-id against the deals collection: sets `stage_id` and a new
    /// `stage_changed_at`. Last writer wins; no conditional check.
    async fn update_stage(&self, card_id: &str, stage_id: &str) -> Result<(), RemoteError>;
}
