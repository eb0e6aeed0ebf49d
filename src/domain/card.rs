use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A deal record positioned in exactly one pipeline stage.
///
/// The remote store owns the canonical copy; during a drag the working
/// board holds a shallow clone whose `stage_id` may differ until the move
/// commits. `health_score` and `at_risk` are computed server-side by the
/// primary RPC and are `None` when the board was loaded through the
/// fallback table reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub company: String,
    pub contact: String,
    pub value: f64,
    pub stage_id: String,
    #[serde(default)]
    pub expected_close: Option<NaiveDate>,
    #[serde(default)]
    pub stage_changed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default)]
    pub at_risk: Option<bool>,
}
