use crate::domain::{Board, Card, TransitionEffect};

/// Decides which side effects fire after a committed stage move.
///
/// Pure: same inputs, same effects, no I/O. Only entering the won stage
/// triggers anything. Ordinary moves, forward or backward, are silent, and
/// the data layer places no restriction on direction.
pub struct StageTransitionPolicy;

impl StageTransitionPolicy {
    pub fn evaluate(
        board: &Board,
        from_stage_id: &str,
        to_stage_id: &str,
        card: &Card,
    ) -> Vec<TransitionEffect> {
        if from_stage_id == to_stage_id {
            return Vec::new();
        }

        let Some(to_stage) = board.stage(to_stage_id) else {
            return Vec::new();
        };

        if to_stage.won {
            return vec![
                TransitionEffect::OpenClosingWorkflow { card: card.clone() },
                TransitionEffect::Celebrate,
                TransitionEffect::Notify {
                    message: format!("Deal with {} marked as won", card.company),
                },
            ];
        }

        Vec::new()
    }
}
