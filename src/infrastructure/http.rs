use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::{Card, Stage};
use crate::infrastructure::remote::{
    BoardPayload, BoardQuery, BoardSummary, DealsRemote, RemoteError, StageMetric,
};

/// HTTP-backed deal store client.
///
/// Reads go through the `pipeline_board` RPC, which returns the board plus
/// server-computed health fields and metrics in one round trip. If the RPC
/// is unavailable the client falls back to direct table reads and computes
/// the metrics itself, with the health fields nulled.
pub struct HttpDealsRemote {
    client: reqwest::Client,
    base_url: String,
}

impl HttpDealsRemote {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn fetch_via_rpc(&self, query: &BoardQuery) -> Result<BoardPayload, RemoteError> {
        let response = self
            .client
            .post(format!("{}/rpc/pipeline_board", self.base_url))
            .json(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status(status, body));
        }

        Ok(response.json::<BoardPayload>().await?)
    }

    async fn fetch_via_tables(&self, query: &BoardQuery) -> Result<BoardPayload, RemoteError> {
        let stages_response = self
            .client
            .get(format!("{}/stages", self.base_url))
            .query(&[("org_id", query.org_id.as_str())])
            .send()
            .await?;
        if !stages_response.status().is_success() {
            let status = stages_response.status().as_u16();
            let body = stages_response.text().await.unwrap_or_default();
            return Err(RemoteError::Status(status, body));
        }
        let stages: Vec<Stage> = stages_response.json().await?;

        let limit = query.limit.to_string();
        let offset = query.offset.to_string();
        let deals_response = self
            .client
            .get(format!("{}/deals", self.base_url))
            .query(&[
                ("org_id", query.org_id.as_str()),
                ("sort_by", query.sort_by.as_str()),
                ("sort_dir", query.sort_dir.as_str()),
                ("limit", limit.as_str()),
                ("offset", offset.as_str()),
            ])
            .send()
            .await?;
        if !deals_response.status().is_success() {
            let status = deals_response.status().as_u16();
            let body = deals_response.text().await.unwrap_or_default();
            return Err(RemoteError::Status(status, body));
        }
        let mut deals: Vec<Card> = deals_response.json().await?;

        // the table reads carry no health computation
        for deal in &mut deals {
            deal.health_score = None;
            deal.at_risk = None;
        }

        let stage_metrics = compute_stage_metrics(&stages, &deals);
        let summary = summarize(&stage_metrics);
        let total_count = deals.len() as i64;

        Ok(BoardPayload {
            stages,
            deals,
            stage_metrics,
            total_count,
            summary,
        })
    }
}

#[async_trait]
impl DealsRemote for HttpDealsRemote {
    async fn fetch_board(&self, query: &BoardQuery) -> Result<BoardPayload, RemoteError> {
        match self.fetch_via_rpc(query).await {
            Ok(payload) => Ok(payload),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "pipeline_board RPC unavailable, falling back to table reads"
                );
                self.fetch_via_tables(query).await
            }
        }
    }

    async fn update_stage(&self, card_id: &str, stage_id: &str) -> Result<(), RemoteError> {
        let response = self
            .client
            .patch(format!("{}/deals/{}", self.base_url, card_id))
            .json(&json!({
                "stage_id": stage_id,
                "stage_changed_at": Utc::now().to_rfc3339(),
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status(status, body));
        }

        Ok(())
    }
}

fn compute_stage_metrics(stages: &[Stage], deals: &[Card]) -> Vec<StageMetric> {
    stages
        .iter()
        .map(|stage| {
            let in_stage: Vec<&Card> = deals.iter().filter(|d| d.stage_id == stage.id).collect();
            let total_value: f64 = in_stage.iter().map(|d| d.value).sum();
            StageMetric {
                stage_id: stage.id.clone(),
                deal_count: in_stage.len() as i64,
                total_value,
                weighted_value: total_value * stage.probability as f64 / 100.0,
            }
        })
        .collect()
}

fn summarize(metrics: &[StageMetric]) -> BoardSummary {
    BoardSummary {
        deal_count: metrics.iter().map(|m| m.deal_count).sum(),
        total_value: metrics.iter().map(|m| m.total_value).sum(),
        weighted_value: metrics.iter().map(|m| m.weighted_value).sum(),
    }
}
