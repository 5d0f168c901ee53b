//=========================================================================
// Scene Errors
//=========================================================================
//
// Errors raised by the dispatcher plumbing itself.
//
// Hook failures are NOT represented here: they travel unchanged as
// `anyhow::Error` from the scene to whoever drove the tick or event.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== SceneError ==========================================================

/// Failures of the dispatcher plumbing (queueing, shared access).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// The transition queue is at capacity.
    #[error("scene transition queue is full ({capacity} pending requests)")]
    QueueFull { capacity: usize },

    /// The scene manager owning the queue has been dropped.
    #[error("scene manager is gone, transition request dropped")]
    ManagerGone,

    /// The shared scene manager was already borrowed when an event
    /// listener tried to forward to it.
    #[error("scene manager is busy (re-entrant dispatch from a listener)")]
    ManagerBusy,
}

//=========================================================================
// Unit Tests
//=========================================================================
