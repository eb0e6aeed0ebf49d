/// The state of a single in-flight drag.
///
/// Created by the reconciler on drag start and destroyed unconditionally at
/// drag end, error paths included. Never persisted and never shared; the
/// reconciler owns the only copy.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub card_id: String,
    pub from_stage_id: String,
    pub current_over_stage_id: String,
    pub current_over_index: usize,
    /// The last stage a hover resolved to. Used at drop time when the final
    /// pointer target cannot be resolved (pointer left the window, drop
    /// handler never fired).
    pub last_valid_over_stage_id: String,
}

impl DragSession {
    pub fn begin(
        card_id: impl Into<String>,
        from_stage_id: impl Into<String>,
        from_index: usize,
    ) -> Self {
        let from_stage_id = from_stage_id.into();
        Self {
            card_id: card_id.into(),
            current_over_stage_id: from_stage_id.clone(),
            current_over_index: from_index,
            last_valid_over_stage_id: from_stage_id.clone(),
            from_stage_id,
        }
    }
}
