pub mod board;
pub mod card;
pub mod drag;
pub mod effect;
pub mod error;
pub mod stage;

pub use board::Board;
pub use card::Card;
pub use drag::DragSession;
pub use effect::TransitionEffect;
pub use error::BoardError;
pub use stage::{SortDir, SortKey, Stage};
