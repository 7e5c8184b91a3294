//! Product creation state machine.

use serde::{Deserialize, Serialize};

/// Where a product creation stands.
///
/// State transitions:
/// ```text
/// PersistProduct ──┬──► CreateInventory ──┬──► Done
///                  │                      └──► Failed   (product row kept)
///                  └──► Aborted                         (nothing written)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CreationState {
    /// The local product row is being written.
    #[default]
    PersistProduct,

    /// The product is persisted; the inventory record is being created.
    CreateInventory,

    /// Both records exist (terminal state).
    Done,

    /// Local persistence failed; inventory was never contacted (terminal state).
    Aborted,

    /// Inventory creation failed after the product was persisted (terminal state).
    Failed,
}

impl CreationState {
    /// State after the current step succeeded.
    pub fn succeed(self) -> Self {
        match self {
            CreationState::PersistProduct => CreationState::CreateInventory,
            CreationState::CreateInventory => CreationState::Done,
            terminal => terminal,
        }
    }

    /// State after the current step failed.
    pub fn fail(self) -> Self {
        match self {
            CreationState::PersistProduct => CreationState::Aborted,
            CreationState::CreateInventory => CreationState::Failed,
            terminal => terminal,
        }
    }

    /// Returns true if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            CreationState::Done | CreationState::Aborted | CreationState::Failed
        )
    }

    /// Returns true if a product row exists without an inventory record.
    pub fn leaves_orphan(&self) -> bool {
        matches!(self, CreationState::Failed)
    }

    /// Returns the state name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            CreationState::PersistProduct => "PersistProduct",
            CreationState::CreateInventory => "CreateInventory",
            CreationState::Done => "Done",
            CreationState::Aborted => "Aborted",
            CreationState::Failed => "Failed",
        }
    }
}

impl std::fmt::Display for CreationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
