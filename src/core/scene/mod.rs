//=========================================================================
// Scene System
//=========================================================================
//
// Scene registry, lifecycle dispatch and in-hook transitions.
//
// Architecture:
//   SceneManager
//     ├─ registry: SceneRegistry (Vec<RegistryEntry>, insertion order)
//     ├─ current: Option<usize>
//     ├─ shared: C  (caller-supplied state handed to every hook)
//     └─ transitions: TransitionQueue (SceneHandle → crossbeam channel)
//
// Flow:
//   tick()           → setup (once) → enter (per activation) → draw
//   dispatch_event() → Scene::on_event
//   both             → process_transitions()
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::fmt;

//=== External Dependencies ===============================================

use bitflags::bitflags;

//=== Internal Dependencies ===============================================

use crate::core::error::SceneError;
use crate::core::input::SceneEvent;

//=== Module Declarations =================================================

mod definition;
mod registry;
mod scene_manager;
mod transition_queue;

//=== Public API ==========================================================

pub use definition::SceneDefinition;
pub use registry::{RegistryEntry, SceneRegistry};
pub use scene_manager::{SceneManager, SceneManagerBuilder};
pub use transition_queue::{SceneHandle, SceneTransition};

//=== Capabilities ========================================================

bitflags! {
    /// Lifecycle hooks a scene actually implements.
    ///
    /// Recorded once when the scene is registered. Hooks whose flag is
    /// missing are never called by the dispatcher.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const SETUP = 1 << 0;
        const ENTER = 1 << 1;
        const DRAW = 1 << 2;
        const EXIT = 1 << 3;
    }
}

//=== Scene Trait =========================================================

/// Defines scene behavior with lifecycle hooks and input handling.
///
/// Every method is optional. A scene is registered once and keeps its
/// state between activations; it is never destroyed, only deactivated.
///
/// # Hook Order
///
/// On the first tick after an activation the dispatcher runs, in order:
/// `setup` (only ever once per scene), `enter` (once per activation),
/// then `draw` (every tick). `exit` runs synchronously when another
/// scene is activated.
///
/// # Errors
///
/// Errors returned from a hook are not handled by the dispatcher. They
/// propagate unchanged to the caller of `tick` / `dispatch_event`.
///
/// # Minimal Implementation
///
/// ```rust
/// use sketch_scenes::prelude::*;
///
/// struct Title;
///
/// impl Scene for Title {
///     fn draw(&mut self, _ctx: &mut SceneContext<'_>) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait Scene<C = ()> {
    /// Hooks the dispatcher calls for this scene. Defaults to all of them.
    ///
    /// The flags are not derived from which methods a scene overrides: with
    /// the default, the no-op `setup` still runs and its flag is still set.
    /// Override to skip hooks entirely, e.g. a scene without `SETUP` never
    /// has its setup flag set.
    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    /// Called once for the lifetime of the scene, before its first `enter`.
    fn setup(&mut self, _ctx: &mut SceneContext<'_, C>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called on the first tick of every activation.
    fn enter(&mut self, _ctx: &mut SceneContext<'_, C>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called every tick while the scene is current.
    fn draw(&mut self, _ctx: &mut SceneContext<'_, C>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Called when another scene replaces this one.
    fn exit(&mut self, _ctx: &mut SceneContext<'_, C>) -> anyhow::Result<()> {
        Ok(())
    }

    /// Handles a named input event.
    ///
    /// Return `Ok(true)` if the event was handled. Unhandled events are
    /// dropped silently.
    fn on_event(
        &mut self,
        _event: &SceneEvent,
        _ctx: &mut SceneContext<'_, C>,
    ) -> anyhow::Result<bool> {
        Ok(false)
    }
}

//=== Scene Factory =======================================================

/// Constructs a scene the first time it is registered or activated.
///
/// The implementing type doubles as the scene's identity: activating
/// `Intro` twice always refers to the same registry entry.
pub trait SceneFactory<C = ()>: Scene<C> + Sized + 'static {
    /// Builds the scene. Runs exactly once per registry.
    fn create(init: SceneInit<'_, C>) -> Self;
}

//=== SceneInit ===========================================================

/// Constructor parameters handed to [`SceneFactory::create`].
///
/// Carries the back-references a scene may want to keep: a handle for
/// requesting transitions and the manager's shared state.
pub struct SceneInit<'a, C> {
    handle: &'a SceneHandle<C>,
    shared: &'a C,
}

impl<'a, C> SceneInit<'a, C> {
    pub(crate) fn new(handle: &'a SceneHandle<C>, shared: &'a C) -> Self {
        Self { handle, shared }
    }

    /// Returns an owned handle the scene may store for later requests.
    pub fn handle(&self) -> SceneHandle<C> {
        self.handle.clone()
    }

    /// Shared state owned by the scene manager.
    pub fn shared(&self) -> &'a C {
        self.shared
    }
}

//=== SceneArgs ===========================================================

/// Per-activation argument payload.
///
/// Attached by `activate_with` and readable from every hook of that
/// activation via [`SceneContext::args`].
pub struct SceneArgs(Box<dyn Any>);

impl SceneArgs {
    pub fn new<T: Any>(value: T) -> Self {
        Self(Box::new(value))
    }

    /// Returns the payload if it has type `T`.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.0.is::<T>()
    }
}

impl fmt::Debug for SceneArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SceneArgs(..)")
    }
}

//=== SceneContext ========================================================

/// Everything a hook may touch while it runs.
///
/// Scenes cannot borrow the manager during a hook. Transitions are
/// requested through the context (or a stored [`SceneHandle`]) and take
/// effect once the current tick or event dispatch has completed.
pub struct SceneContext<'a, C = ()> {
    shared: &'a mut C,
    args: Option<&'a SceneArgs>,
    handle: &'a SceneHandle<C>,
}

impl<'a, C: 'static> SceneContext<'a, C> {
    pub(crate) fn new(
        shared: &'a mut C,
        args: Option<&'a SceneArgs>,
        handle: &'a SceneHandle<C>,
    ) -> Self {
        Self { shared, args, handle }
    }

    pub fn shared(&self) -> &C {
        &*self.shared
    }

    pub fn shared_mut(&mut self) -> &mut C {
        &mut *self.shared
    }

    /// Activation payload, if one of type `T` was supplied.
    pub fn args<T: Any>(&self) -> Option<&T> {
        self.args.and_then(SceneArgs::get::<T>)
    }

    pub fn handle(&self) -> &SceneHandle<C> {
        self.handle
    }

    //--- Transition Shortcuts ---------------------------------------------

    /// Requests activation of `S` once the current dispatch completes.
    pub fn activate<S: SceneFactory<C>>(&self) -> Result<(), SceneError> {
        self.handle.activate::<S>()
    }

    /// Requests activation of `S` with an argument payload.
    pub fn activate_with<S: SceneFactory<C>, T: Any>(&self, args: T) -> Result<(), SceneError> {
        self.handle.activate_with::<S, T>(args)
    }

    /// Requests activation of the next registered scene.
    pub fn activate_next(&self) -> Result<(), SceneError> {
        self.handle.activate_next()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Bare;

    impl Scene for Bare {}

    #[test]
    fn default_capabilities_cover_every_hook() {
        let caps = Bare.capabilities();
        assert!(caps.contains(Capabilities::SETUP | Capabilities::ENTER));
        assert!(caps.contains(Capabilities::DRAW | Capabilities::EXIT));
    }

    #[test]
    fn scene_args_downcast_by_type() {
        let args = SceneArgs::new(42_u32);
        assert!(args.is::<u32>());
        assert_eq!(args.get::<u32>(), Some(&42));
        assert_eq!(args.get::<i64>(), None);
    }

    #[test]
    fn scene_args_debug_hides_payload() {
        let args = SceneArgs::new("secret");
        assert_eq!(format!("{:?}", args), "SceneArgs(..)");
    }
}
