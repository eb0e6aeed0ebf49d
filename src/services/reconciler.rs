use crate::domain::{Board, BoardError, DragSession, TransitionEffect};
use crate::infrastructure::RemoteError;
use crate::services::board_store::{BoardEvent, BoardStore};
use crate::services::persistence::PersistenceGateway;
use crate::services::transition_policy::StageTransitionPolicy;

/// How a drag session ended.
#[derive(Debug)]
pub enum DropOutcome {
    /// The card ended up in its origin stage: pure UI reorder, no remote
    /// write was issued.
    NoMove,
    /// The stage change was persisted; `effects` is what the policy wants
    /// the host to execute.
    Committed {
        to_stage_id: String,
        effects: Vec<TransitionEffect>,
    },
    /// Persistence failed; the working copy was replaced wholesale with the
    /// store snapshot. The host should surface `error` as a retryable
    /// notification; visually the card snaps back.
    RolledBack { error: RemoteError },
}

/// Owns the lifecycle of a single drag: start, live reordering preview,
/// commit decision.
///
/// State machine is `Idle → Active → Idle` with no distinct cancelled
/// state; every path out of `Active` (successful drop, drop on an invalid
/// target, drop outside any target, error) funnels through the same
/// teardown. While `Active` the reconciler is the only mutator of the
/// working copy, and the store defers refreshes until teardown.
#[derive(Debug, Default)]
pub struct DragReconciler {
    working: Board,
    session: Option<DragSession>,
}

impl DragReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// The board the host renders. Equal to the store snapshot whenever no
    /// drag is active.
    pub fn board(&self) -> &Board {
        &self.working
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Adopt the store snapshot as the working copy. Hosts call this on
    /// `BoardEvent::Refreshed`; ignored while a drag is active, since the
    /// store queues refreshes for the duration anyway.
    pub fn sync_from(&mut self, store: &BoardStore) {
        if self.session.is_none() {
            self.working = store.snapshot().clone();
        }
    }

    /// Begin dragging `card_id`. Rejects a second concurrent session and
    /// puts the store on hold: refreshes queue up and sorting is frozen
    /// until the session ends.
    pub fn start(&mut self, store: &mut BoardStore, card_id: &str) -> Result<(), BoardError> {
        if self.session.is_some() {
            tracing::warn!(card_id, "drag start rejected, session already active");
            return Err(BoardError::DragInProgress);
        }

        let (from_stage, from_index) = self
            .working
            .locate(card_id)
            .map(|(stage, index)| (stage.to_string(), index))
            .ok_or_else(|| BoardError::CardNotFound(card_id.into()))?;

        store.begin_hold();
        tracing::debug!(card_id, from_stage = from_stage.as_str(), "drag started");
        self.session = Some(DragSession::begin(card_id, from_stage, from_index));
        Ok(())
    }

    /// Live reordering preview. Resolves the pointer target and applies the
    /// optimistic move to the working copy; an unresolvable target keeps
    /// the previous over-state. Safe to call arbitrarily often; repeated
    /// identical input is a no-op. Returns whether the working copy
    /// changed.
    pub fn over(&mut self, target_id: &str) -> bool {
        if self.session.is_none() {
            return false;
        }

        let Some((stage_id, index)) = self.resolve(target_id) else {
            tracing::trace!(target = target_id, "pointer target did not resolve, keeping over state");
            return false;
        };

        let card_id = {
            let Some(session) = self.session.as_ref() else {
                return false;
            };
            if session.current_over_stage_id == stage_id && session.current_over_index == index {
                return false;
            }
            session.card_id.clone()
        };

        let moved = match self.working.move_card_to(&card_id, &stage_id, index) {
            Ok(moved) => moved,
            Err(err) => {
                tracing::warn!(card_id = card_id.as_str(), error = %err, "optimistic move failed");
                return false;
            }
        };

        if let Some(session) = self.session.as_mut() {
            session.current_over_stage_id = stage_id.clone();
            session.current_over_index = index;
            session.last_valid_over_stage_id = stage_id;
        }

        moved
    }

    /// Finish the drag. The final target resolves like `over`; failing
    /// that, the last stage a hover resolved to; failing that, the origin.
    /// A final stage equal to the origin skips the network entirely.
    /// Otherwise the placement is committed through the gateway, and the
    /// session tears down only once the commit resolves or rejects.
    pub async fn end(
        &mut self,
        store: &mut BoardStore,
        gateway: &PersistenceGateway,
        target_id: Option<&str>,
    ) -> Result<DropOutcome, BoardError> {
        let Some(session) = self.session.clone() else {
            return Err(BoardError::NoActiveDrag);
        };

        let (to_stage, to_index) = match target_id.and_then(|t| self.resolve(t)) {
            Some(placement) => placement,
            None => self.fallback_placement(&session),
        };

        if let Err(err) = self.working.move_card_to(&session.card_id, &to_stage, to_index) {
            tracing::warn!(card_id = session.card_id.as_str(), error = %err, "placement failed at drop");
            self.teardown(store);
            self.working = store.snapshot().clone();
            return Err(err);
        }

        if to_stage == session.from_stage_id {
            tracing::debug!(
                card_id = session.card_id.as_str(),
                stage = to_stage.as_str(),
                "drag ended in origin stage, no commit"
            );
            self.teardown(store);
            return Ok(DropOutcome::NoMove);
        }

        let Some(card) = self.working.card(&session.card_id).cloned() else {
            self.teardown(store);
            self.working = store.snapshot().clone();
            return Err(BoardError::CardNotFound(session.card_id.clone()));
        };

        match gateway.commit(&session.card_id, &to_stage).await {
            Ok(()) => {
                // The refresh lands in the store's queue (the hold is still
                // on) and is installed during teardown below.
                if let Err(err) = store.refresh().await {
                    tracing::warn!(
                        error = %err,
                        "board refresh after commit failed, keeping optimistic placement"
                    );
                }

                let effects = StageTransitionPolicy::evaluate(
                    &self.working,
                    &session.from_stage_id,
                    &to_stage,
                    &card,
                );

                let _ = store.events().send(BoardEvent::CardMoved {
                    card_id: session.card_id.clone(),
                    from_stage: session.from_stage_id.clone(),
                    to_stage: to_stage.clone(),
                });
                tracing::info!(
                    card_id = session.card_id.as_str(),
                    from_stage = session.from_stage_id.as_str(),
                    to_stage = to_stage.as_str(),
                    "card move committed"
                );

                self.teardown(store);
                Ok(DropOutcome::Committed {
                    to_stage_id: to_stage,
                    effects,
                })
            }
            Err(error) => {
                tracing::warn!(
                    card_id = session.card_id.as_str(),
                    to_stage = to_stage.as_str(),
                    error = %error,
                    "card move failed, rolling back working copy"
                );
                let _ = store.events().send(BoardEvent::MoveFailed {
                    card_id: session.card_id.clone(),
                    message: error.to_string(),
                });

                self.teardown(store);
                // Whole-board rollback: a single active session means there
                // are no other uncommitted edits to preserve.
                self.working = store.snapshot().clone();
                Ok(DropOutcome::RolledBack { error })
            }
        }
    }

    /// Resolve a pointer target id against the working copy: a card id maps
    /// to its containing stage at that card's index, a stage id maps to the
    /// end of that stage's lane (not counting the dragged card), anything
    /// else fails.
    fn resolve(&self, target_id: &str) -> Option<(String, usize)> {
        let session = self.session.as_ref()?;

        if target_id == session.card_id {
            return self
                .working
                .locate(&session.card_id)
                .map(|(stage, index)| (stage.to_string(), index));
        }

        if let Some((stage, index)) = self.working.locate(target_id) {
            return Some((stage.to_string(), index));
        }

        if let Some(stage) = self.working.stage(target_id) {
            let stage_id = stage.id.clone();
            let mut end = self.working.lane_len(&stage_id);
            if let Some((drag_stage, _)) = self.working.locate(&session.card_id) {
                if drag_stage == stage_id {
                    end -= 1;
                }
            }
            return Some((stage_id, end));
        }

        None
    }

    /// Placement when the drop target never resolved: the last stage a
    /// hover landed on, at the card's current position there (the hover
    /// already placed it), or the end of that lane.
    fn fallback_placement(&self, session: &DragSession) -> (String, usize) {
        let fallback = session.last_valid_over_stage_id.clone();
        match self
            .working
            .locate(&session.card_id)
            .map(|(stage, index)| (stage.to_string(), index))
        {
            Some((stage, index)) if stage == fallback => (stage, index),
            _ => {
                let end = self.working.lane_len(&fallback);
                (fallback, end)
            }
        }
    }

    /// Every path out of an active session ends here: the session is
    /// dropped, the store hold is released, and a queued refresh (if one
    /// arrived mid-drag) becomes the new working copy.
    fn teardown(&mut self, store: &mut BoardStore) {
        self.session = None;
        if store.end_hold() {
            self.working = store.snapshot().clone();
        }
    }
}
