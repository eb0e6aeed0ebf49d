use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::infrastructure::{DealsRemote, RemoteError};

/// Issues the remote write for a committed stage change.
///
/// The write is bounded: the source UI could hang in its settling state
/// forever on a stalled request, so commits that outlive the configured
/// timeout resolve to `RemoteError::Timeout` and roll back like any other
/// persistence failure.
pub struct PersistenceGateway {
    remote: Arc<dyn DealsRemote>,
    commit_timeout: Duration,
}

impl PersistenceGateway {
    pub fn new(remote: Arc<dyn DealsRemote>, commit_timeout: Duration) -> Self {
        Self {
            remote,
            commit_timeout,
        }
    }

    pub fn from_config(remote: Arc<dyn DealsRemote>, config: &Config) -> Self {
        Self::new(remote, Duration::from_millis(config.commit_timeout_ms))
    }

    pub async fn commit(&self, card_id: &str, to_stage_id: &str) -> Result<(), RemoteError> {
        tracing::debug!(card_id, to_stage_id, "committing stage change");

        match tokio::time::timeout(
            self.commit_timeout,
            self.remote.update_stage(card_id, to_stage_id),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    card_id,
                    timeout_ms = self.commit_timeout.as_millis() as u64,
                    "stage change commit timed out"
                );
                Err(RemoteError::Timeout(self.commit_timeout))
            }
        }
    }
}
