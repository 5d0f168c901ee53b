//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for scene transitions requested from inside hooks.
//
// Scenes hold a `SceneHandle` (cloned from their `SceneInit` or read from
// their `SceneContext`) and push requests through it. The scene manager
// owns the receiving end and applies requests at dispatch boundaries,
// so a switch requested mid-tick never interrupts that tick.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::fmt;

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

//=== Internal Dependencies ===============================================

use super::{SceneArgs, SceneDefinition, SceneFactory};
use crate::core::error::SceneError;

//=== Scene Transition ====================================================

/// A deferred scene switch.
pub enum SceneTransition<C = ()> {
    /// Activates a specific scene, registering it if needed.
    Activate {
        scene: SceneDefinition<C>,
        args: Option<SceneArgs>,
    },

    /// Activates the scene after the current one (wrapping around).
    ActivateNext { args: Option<SceneArgs> },
}

impl<C> fmt::Debug for SceneTransition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Activate { scene, args } => f
                .debug_struct("Activate")
                .field("scene", scene)
                .field("args", args)
                .finish(),
            Self::ActivateNext { args } => f
                .debug_struct("ActivateNext")
                .field("args", args)
                .finish(),
        }
    }
}

//=== Scene Handle ========================================================

/// Cloneable request handle for scene transitions.
///
/// Requests are queued and applied by the owning [`SceneManager`] after
/// the current `tick` or `dispatch_event` completes, in FIFO order.
///
/// [`SceneManager`]: super::SceneManager
pub struct SceneHandle<C = ()> {
    sender: Sender<SceneTransition<C>>,
    capacity: usize,
}

impl<C: 'static> SceneHandle<C> {
    /// Requests activation of scene `S`.
    pub fn activate<S: SceneFactory<C>>(&self) -> Result<(), SceneError> {
        self.request(SceneTransition::Activate {
            scene: SceneDefinition::of::<S>(),
            args: None,
        })
    }

    /// Requests activation of scene `S` with an argument payload.
    pub fn activate_with<S: SceneFactory<C>, T: Any>(&self, args: T) -> Result<(), SceneError> {
        self.request(SceneTransition::Activate {
            scene: SceneDefinition::of::<S>(),
            args: Some(SceneArgs::new(args)),
        })
    }

    /// Requests activation of the next registered scene.
    pub fn activate_next(&self) -> Result<(), SceneError> {
        self.request(SceneTransition::ActivateNext { args: None })
    }

    /// Requests activation of the next registered scene with a payload.
    pub fn activate_next_with<T: Any>(&self, args: T) -> Result<(), SceneError> {
        self.request(SceneTransition::ActivateNext {
            args: Some(SceneArgs::new(args)),
        })
    }

    /// Queues an arbitrary transition.
    ///
    /// # Errors
    ///
    /// [`SceneError::QueueFull`] if the queue is at capacity,
    /// [`SceneError::ManagerGone`] if the manager was dropped.
    pub fn request(&self, transition: SceneTransition<C>) -> Result<(), SceneError> {
        self.sender.try_send(transition).map_err(|e| match e {
            TrySendError::Full(_) => SceneError::QueueFull {
                capacity: self.capacity,
            },
            TrySendError::Disconnected(_) => SceneError::ManagerGone,
        })
    }
}

impl<C> SceneHandle<C> {
    /// Number of requests waiting to be applied.
    pub fn pending(&self) -> usize {
        self.sender.len()
    }
}

impl<C> Clone for SceneHandle<C> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            capacity: self.capacity,
        }
    }
}

impl<C> fmt::Debug for SceneHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneHandle")
            .field("pending", &self.sender.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

//=== Transition Queue ====================================================

/// Receiving side of the transition channel, owned by the scene manager.
pub(crate) struct TransitionQueue<C> {
    handle: SceneHandle<C>,
    receiver: Receiver<SceneTransition<C>>,
}

impl<C> TransitionQueue<C> {
    /// Creates a bounded queue.
    pub(crate) fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            handle: SceneHandle { sender, capacity },
            receiver,
        }
    }

    pub(crate) fn handle(&self) -> &SceneHandle<C> {
        &self.handle
    }

    pub(crate) fn len(&self) -> usize {
        self.receiver.len()
    }

    /// Pops the oldest pending transition, if any.
    pub(crate) fn try_next(&self) -> Option<SceneTransition<C>> {
        self.receiver.try_recv().ok()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
