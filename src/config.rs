use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub remote_url: String,
    pub org_id: String,
    pub commit_timeout_ms: u64,
    pub fetch_limit: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Ok(Self {
            remote_url: std::env::var("PIPELINE_REMOTE_URL")
                .unwrap_or_else(|_| "http://localhost:54321".into()),
            org_id: std::env::var("PIPELINE_ORG_ID").unwrap_or_else(|_| "default".into()),
            commit_timeout_ms: std::env::var("PIPELINE_COMMIT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8_000),
            fetch_limit: std::env::var("PIPELINE_FETCH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(200),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote_url: "http://localhost:54321".into(),
            org_id: "default".into(),
            commit_timeout_ms: 8_000,
            fetch_limit: 200,
        }
    }
}
