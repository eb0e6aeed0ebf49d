use serde::{Deserialize, Serialize};

use crate::domain::Card;

/// A side effect requested by the stage-transition policy after a committed
/// move. The host UI executes these (modal, animation, toast) and discards
/// them; the engine never re-emits an effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionEffect {
    /// Open the deal-closing workflow for the card that just entered the
    /// terminal won stage.
    OpenClosingWorkflow { card: Card },
    Celebrate,
    Notify { message: String },
}
