//! Drag-and-drop reconciliation engine for a sales-pipeline Kanban board.
//!
//! The board is read from a remote deal store and rendered from a local
//! working copy. Dragging a card mutates the working copy optimistically;
//! dropping it into a new stage commits the change remotely and either
//! refreshes the board from the server or rolls the working copy back to
//! the last known-good snapshot.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use config::Config;
pub use domain::{Board, BoardError, Card, DragSession, Stage, TransitionEffect};
pub use infrastructure::{BoardPayload, BoardQuery, DealsRemote, HttpDealsRemote, RemoteError};
pub use services::{
    BoardEvent, BoardStore, DragReconciler, DropOutcome, PersistenceGateway,
    StageTransitionPolicy,
};
