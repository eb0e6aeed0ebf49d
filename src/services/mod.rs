pub mod board_store;
pub mod persistence;
pub mod reconciler;
pub mod transition_policy;

pub use board_store::{BoardEvent, BoardStore};
pub use persistence::PersistenceGateway;
pub use reconciler::{DragReconciler, DropOutcome};
pub use transition_policy::StageTransitionPolicy;
