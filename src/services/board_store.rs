use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::domain::{Board, BoardError, SortDir, SortKey};
use crate::infrastructure::{BoardQuery, DealsRemote};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BoardEvent {
    Refreshed { total_count: i64 },
    CardMoved { card_id: String, from_stage: String, to_stage: String },
    MoveFailed { card_id: String, message: String },
}

/// Canonical last-known-good board, as fetched from the remote store.
///
/// Every refresh is a full replacement, never a merge; that is what makes
/// rollback trivial. While a drag hold is on, a completed fetch is queued
/// instead of installed, so remote data never moves the board under the
/// user's cursor; the queued board is installed when the hold ends.
pub struct BoardStore {
    remote: Arc<dyn DealsRemote>,
    query: BoardQuery,
    snapshot: Board,
    queued: Option<(Board, i64)>,
    held: bool,
    events: broadcast::Sender<BoardEvent>,
}

impl BoardStore {
    pub fn new(remote: Arc<dyn DealsRemote>, query: BoardQuery) -> Self {
        let (events, _) = broadcast::channel(100);
        Self {
            remote,
            query,
            snapshot: Board::default(),
            queued: None,
            held: false,
            events,
        }
    }

    pub fn snapshot(&self) -> &Board {
        &self.snapshot
    }

    pub fn query(&self) -> &BoardQuery {
        &self.query
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BoardEvent> {
        self.events.subscribe()
    }

    pub(crate) fn events(&self) -> &broadcast::Sender<BoardEvent> {
        &self.events
    }

    /// Re-fetch remote state. Outside a hold the snapshot is replaced
    /// atomically and subscribers are notified; during a hold the fetched
    /// board is queued and installed at hold release.
    pub async fn refresh(&mut self) -> Result<(), BoardError> {
        let payload = self.remote.fetch_board(&self.query).await?;
        let board = Board::from_parts(payload.stages, payload.deals);

        if self.held {
            tracing::debug!(
                total_count = payload.total_count,
                "refresh completed during active drag, queueing"
            );
            self.queued = Some((board, payload.total_count));
            return Ok(());
        }

        self.install(board, payload.total_count);
        Ok(())
    }

    /// Change the active sort criterion. Sorting and dragging are mutually
    /// exclusive; while a hold is on this is rejected.
    pub fn set_sort(&mut self, sort_by: SortKey, sort_dir: SortDir) -> Result<(), BoardError> {
        if self.held {
            return Err(BoardError::DragInProgress);
        }
        self.query.sort_by = sort_by;
        self.query.sort_dir = sort_dir;
        Ok(())
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub(crate) fn begin_hold(&mut self) {
        self.held = true;
    }

    /// Release the hold, installing any queued refresh. Returns whether a
    /// queued board was installed.
    pub(crate) fn end_hold(&mut self) -> bool {
        self.held = false;
        if let Some((board, total_count)) = self.queued.take() {
            self.install(board, total_count);
            return true;
        }
        false
    }

    fn install(&mut self, board: Board, total_count: i64) {
        self.snapshot = board;
        let _ = self.events.send(BoardEvent::Refreshed { total_count });
    }
}
