//=========================================================================
// Scene Manager
//=========================================================================
//
// Routes the host's frame tick and input events to the current scene and
// runs scene transitions.
//
// Architecture:
// ```text
//     SceneManagerBuilder ──build()──> SceneManager
//         │                              │
//         ├─ with_shared()               ├─ activate / activate_next
//         └─ with_queue_capacity()       ├─ tick            (per frame)
//                                        ├─ dispatch_event  (per input)
//                                        └─ process_transitions
// ```
//
// At most one scene is current. Switching always runs the old scene's
// `exit` before any hook of the new scene; the new scene's `setup` /
// `enter` are deferred to its next tick.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::transition_queue::TransitionQueue;
use super::{
    Capabilities, RegistryEntry, SceneArgs, SceneContext, SceneDefinition, SceneFactory,
    SceneHandle, SceneRegistry, SceneTransition,
};
use crate::core::input::SceneEvent;
use crate::core::platform_bridge::AdapterId;

//=== SceneManagerBuilder =================================================

/// Builder for configuring and constructing a [`SceneManager`].
///
/// # Default Values
///
/// - **Shared state**: `()`
/// - **Queue capacity**: 64 pending transition requests
///
/// # Examples
///
/// ```
/// use sketch_scenes::core::scene::SceneManagerBuilder;
///
/// struct Palette { background: u32 }
///
/// let manager = SceneManagerBuilder::new()
///     .with_shared(Palette { background: 0x202020 })
///     .with_queue_capacity(16)
///     .build();
///
/// assert_eq!(manager.shared().background, 0x202020);
/// ```
pub struct SceneManagerBuilder<C = ()> {
    shared: C,
    queue_capacity: usize,
}

impl SceneManagerBuilder<()> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            shared: (),
            queue_capacity: 64,
        }
    }
}

impl Default for SceneManagerBuilder<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> SceneManagerBuilder<C> {
    /// Sets the state handed to every scene constructor and hook.
    pub fn with_shared<D: 'static>(self, shared: D) -> SceneManagerBuilder<D> {
        SceneManagerBuilder {
            shared,
            queue_capacity: self.queue_capacity,
        }
    }

    /// Sets how many transition requests may be pending at once.
    ///
    /// Default: 64
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Queue capacity must be positive");
        self.queue_capacity = capacity;
        self
    }

    /// Builds the scene manager. No scene is current yet.
    pub fn build(self) -> SceneManager<C> {
        let transitions = TransitionQueue::new(self.queue_capacity);
        let registry = SceneRegistry::new(transitions.handle().clone());

        debug!("Building scene manager (queue capacity: {})", self.queue_capacity);

        SceneManager {
            registry,
            current: None,
            shared: self.shared,
            transitions,
            adapter: AdapterId::next(),
        }
    }
}

//=== SceneManager ========================================================

/// Scene registry plus lifecycle dispatcher.
///
/// Scenes are identified by type. Activating a scene that was never
/// registered registers it on the spot.
///
/// # Examples
///
/// ```
/// use sketch_scenes::prelude::*;
///
/// #[derive(Default)]
/// struct Intro { frames: u32 }
///
/// impl Scene for Intro {
///     fn draw(&mut self, _ctx: &mut SceneContext<'_>) -> anyhow::Result<()> {
///         self.frames += 1;
///         Ok(())
///     }
/// }
///
/// impl SceneFactory for Intro {
///     fn create(_init: SceneInit<'_, ()>) -> Self {
///         Intro::default()
///     }
/// }
///
/// let mut manager = SceneManager::new();
/// manager.activate::<Intro>()?;
/// manager.tick()?;
/// assert!(manager.is_current::<Intro>());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub struct SceneManager<C = ()> {
    registry: SceneRegistry<C>,
    current: Option<usize>,
    shared: C,
    transitions: TransitionQueue<C>,
    adapter: AdapterId,
}

impl SceneManager<()> {
    /// Creates a manager without shared state and default settings.
    pub fn new() -> Self {
        SceneManagerBuilder::new().build()
    }
}

impl Default for SceneManager<()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: 'static> SceneManager<C> {
    //--- Construction -----------------------------------------------------

    /// Creates a manager around `shared` with default settings.
    pub fn with_shared(shared: C) -> Self {
        SceneManagerBuilder::new().with_shared(shared).build()
    }

    /// Moves the manager behind `Rc<RefCell<_>>` for event wiring.
    pub fn into_shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    //--- Registration -----------------------------------------------------

    /// Registers scene `S` without activating it.
    ///
    /// Registering ahead of time fixes the order `activate_next` walks.
    pub fn register<S: SceneFactory<C>>(&mut self) -> &RegistryEntry<C> {
        self.register_definition(SceneDefinition::of::<S>())
    }

    pub fn register_definition(&mut self, definition: SceneDefinition<C>) -> &RegistryEntry<C> {
        let index = self.registry.register(definition, &self.shared);
        self.registry.entry_mut(index)
    }

    /// Returns the registry entry of scene `S`, if registered.
    pub fn find<S: SceneFactory<C>>(&self) -> Option<&RegistryEntry<C>> {
        self.registry.find(&SceneDefinition::of::<S>())
    }

    /// Position of scene `S` in registration order.
    pub fn index_of<S: SceneFactory<C>>(&self) -> Option<usize> {
        self.registry.index_of(&SceneDefinition::of::<S>())
    }

    //--- Activation -------------------------------------------------------

    /// Makes `S` the current scene.
    ///
    /// # Errors
    ///
    /// Propagates an error from the outgoing scene's `exit`. The switch
    /// does not happen in that case.
    pub fn activate<S: SceneFactory<C>>(&mut self) -> anyhow::Result<()> {
        self.activate_definition(SceneDefinition::of::<S>(), None)
    }

    /// Makes `S` the current scene and hands it `args` for this activation.
    pub fn activate_with<S: SceneFactory<C>, T: Any>(&mut self, args: T) -> anyhow::Result<()> {
        self.activate_definition(SceneDefinition::of::<S>(), Some(SceneArgs::new(args)))
    }

    /// Makes `definition` the current scene.
    ///
    /// No-op if it already is. Otherwise: run the current scene's `exit`,
    /// register the target if needed, re-arm its `enter`, make it
    /// current and attach `args`.
    pub fn activate_definition(
        &mut self,
        definition: SceneDefinition<C>,
        args: Option<SceneArgs>,
    ) -> anyhow::Result<()> {
        if self.is_current_definition(&definition) {
            trace!("Scene {} is already current, skipping activation", definition);
            return Ok(());
        }

        if let Some(index) = self.current {
            let entry = self.registry.entry_mut(index);
            if entry.capabilities.contains(Capabilities::EXIT) {
                trace!("Exiting scene {}", entry.definition);
                let mut ctx = SceneContext::new(
                    &mut self.shared,
                    entry.args.as_ref(),
                    self.transitions.handle(),
                );
                entry.scene.exit(&mut ctx)?;
            }
        }

        let index = self.registry.register(definition, &self.shared);
        let entry = self.registry.entry_mut(index);
        entry.enter_executed = false;
        entry.args = args;

        debug!("Activating scene {} (index {})", definition, index);
        self.current = Some(index);

        Ok(())
    }

    /// Activates the scene registered after the current one.
    ///
    /// Starts at the first scene when none is current and wraps around
    /// after the last. No-op on an empty registry.
    pub fn activate_next(&mut self) -> anyhow::Result<()> {
        self.activate_next_args(None)
    }

    /// Like [`activate_next`](Self::activate_next) with an argument payload.
    pub fn activate_next_with<T: Any>(&mut self, args: T) -> anyhow::Result<()> {
        self.activate_next_args(Some(SceneArgs::new(args)))
    }

    fn activate_next_args(&mut self, args: Option<SceneArgs>) -> anyhow::Result<()> {
        if self.registry.is_empty() {
            warn!("activate_next called with no registered scenes");
            return Ok(());
        }

        let next = match self.current {
            Some(index) => (index + 1) % self.registry.len(),
            None => 0,
        };

        let definition = self.registry.entry_mut(next).definition;
        self.activate_definition(definition, args)
    }

    //--- Queries ----------------------------------------------------------

    /// Returns `true` if `S` is the current scene.
    pub fn is_current<S: SceneFactory<C>>(&self) -> bool {
        self.is_current_definition(&SceneDefinition::of::<S>())
    }

    pub fn is_current_definition(&self, definition: &SceneDefinition<C>) -> bool {
        self.current().is_some_and(|entry| entry.definition == *definition)
    }

    /// The current scene's entry, if any.
    pub fn current(&self) -> Option<&RegistryEntry<C>> {
        self.current.and_then(|index| self.registry.get(index))
    }

    pub fn registry(&self) -> &SceneRegistry<C> {
        &self.registry
    }

    pub fn shared(&self) -> &C {
        &self.shared
    }

    pub fn shared_mut(&mut self) -> &mut C {
        &mut self.shared
    }

    /// Returns a handle for requesting transitions from outside a hook.
    pub fn handle(&self) -> SceneHandle<C> {
        self.transitions.handle().clone()
    }

    /// Identifies this manager's listeners on an event sink.
    pub fn adapter_id(&self) -> AdapterId {
        self.adapter
    }

    //--- Frame Tick -------------------------------------------------------

    /// Runs one host frame for the current scene.
    ///
    /// Order: `setup` (once per scene lifetime), `enter` (once per
    /// activation), `draw` (every tick). All three may run in the same
    /// tick. Transitions requested by the hooks are applied afterwards.
    ///
    /// Without a current scene only the queued transitions are applied.
    ///
    /// # Errors
    ///
    /// The first hook error is returned unchanged. Its flag stays set, so
    /// a failed `setup` is not retried.
    pub fn tick(&mut self) -> anyhow::Result<()> {
        let Some(index) = self.current else {
            return self.process_transitions();
        };

        // The entry is pinned for the whole tick; hooks can only queue
        // transitions, never swap it out from under us.
        let entry = self.registry.entry_mut(index);
        let mut ctx =
            SceneContext::new(&mut self.shared, entry.args.as_ref(), self.transitions.handle());

        if entry.capabilities.contains(Capabilities::SETUP) && !entry.setup_executed {
            entry.setup_executed = true;
            trace!("Running setup for scene {}", entry.definition);
            entry.scene.setup(&mut ctx)?;
        }

        if entry.capabilities.contains(Capabilities::ENTER) && !entry.enter_executed {
            entry.enter_executed = true;
            trace!("Running enter for scene {}", entry.definition);
            entry.scene.enter(&mut ctx)?;
        }

        if entry.capabilities.contains(Capabilities::DRAW) {
            entry.scene.draw(&mut ctx)?;
        }

        self.process_transitions()
    }

    //--- Event Dispatch ---------------------------------------------------

    /// Forwards `event` to the current scene.
    ///
    /// Returns whether the scene handled it. Without a current scene the
    /// event is dropped, queued transitions are applied and `Ok(false)` is
    /// returned.
    pub fn dispatch_event(&mut self, event: &SceneEvent) -> anyhow::Result<bool> {
        let Some(index) = self.current else {
            trace!("No current scene, dropping {}", event.name());
            self.process_transitions()?;
            return Ok(false);
        };

        let entry = self.registry.entry_mut(index);
        let mut ctx =
            SceneContext::new(&mut self.shared, entry.args.as_ref(), self.transitions.handle());

        let handled = entry.scene.on_event(event, &mut ctx)?;
        if !handled {
            trace!("Scene {} ignored {}", entry.definition, event.name());
        }

        self.process_transitions()?;
        Ok(handled)
    }

    //--- Transition Processing --------------------------------------------

    /// Applies queued transition requests in FIFO order.
    ///
    /// Called by `tick` and `dispatch_event`. Only requests pending at the
    /// start of the call are applied; anything queued by an `exit` hook
    /// during processing waits for the next boundary.
    ///
    /// # Errors
    ///
    /// Stops at the first failing transition; later requests stay queued.
    pub fn process_transitions(&mut self) -> anyhow::Result<()> {
        let pending = self.transitions.len();

        for _ in 0..pending {
            let Some(transition) = self.transitions.try_next() else {
                break;
            };

            match transition {
                SceneTransition::Activate { scene, args } => self.activate_definition(scene, args)?,
                SceneTransition::ActivateNext { args } => self.activate_next_args(args)?,
            }
        }

        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{EventName, EventValue};
    use crate::core::scene::{Scene, SceneInit};
    use std::cell::Cell;

    //--- Test Harness -----------------------------------------------------

    // Hooks append "<Scene>.<hook>" to the journal shared by every scene.
    #[derive(Default)]
    struct Journal {
        log: Vec<String>,
        constructed: Cell<usize>,
        fail_on: Option<&'static str>,
    }

    impl Journal {
        fn record(&mut self, entry: impl Into<String>) -> anyhow::Result<()> {
            let entry = entry.into();
            let fail = self.fail_on == Some(entry.as_str());
            self.log.push(entry.clone());
            if fail {
                anyhow::bail!("{} failed", entry);
            }
            Ok(())
        }

        fn take(&mut self) -> Vec<String> {
            std::mem::take(&mut self.log)
        }
    }

    macro_rules! journaled_scene {
        ($name:ident) => {
            struct $name;

            impl Scene<Journal> for $name {
                fn setup(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
                    ctx.shared_mut().record(concat!(stringify!($name), ".setup"))
                }

                fn enter(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
                    ctx.shared_mut().record(concat!(stringify!($name), ".enter"))
                }

                fn draw(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
                    ctx.shared_mut().record(concat!(stringify!($name), ".draw"))
                }

                fn exit(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
                    ctx.shared_mut().record(concat!(stringify!($name), ".exit"))
                }
            }

            impl SceneFactory<Journal> for $name {
                fn create(init: SceneInit<'_, Journal>) -> Self {
                    let constructed = &init.shared().constructed;
                    constructed.set(constructed.get() + 1);
                    $name
                }
            }
        };
    }

    journaled_scene!(A);
    journaled_scene!(B);
    journaled_scene!(C);

    // Draw-only scene: no setup/enter/exit capability.
    struct Still;

    impl Scene<Journal> for Still {
        fn capabilities(&self) -> Capabilities {
            Capabilities::DRAW
        }

        fn setup(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
            ctx.shared_mut().record("Still.setup")
        }

        fn exit(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
            ctx.shared_mut().record("Still.exit")
        }

        fn draw(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
            ctx.shared_mut().record("Still.draw")
        }
    }

    impl SceneFactory<Journal> for Still {
        fn create(_init: SceneInit<'_, Journal>) -> Self {
            Still
        }
    }

    // Records every event it receives and handles only "X".
    struct Listener;

    impl Scene<Journal> for Listener {
        fn on_event(
            &mut self,
            event: &SceneEvent,
            ctx: &mut SceneContext<'_, Journal>,
        ) -> anyhow::Result<bool> {
            if event.name().as_str() != "X" {
                return Ok(false);
            }
            let args: Vec<String> = event
                .args()
                .iter()
                .map(|v| v.as_int().map_or_else(|| format!("{:?}", v), |i| i.to_string()))
                .collect();
            ctx.shared_mut().record(format!("Listener.X({})", args.join(",")))?;
            Ok(true)
        }
    }

    impl SceneFactory<Journal> for Listener {
        fn create(_init: SceneInit<'_, Journal>) -> Self {
            Listener
        }
    }

    // Switches to B from inside draw, then keeps drawing.
    struct Hopper;

    impl Scene<Journal> for Hopper {
        fn draw(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
            ctx.activate::<B>()?;
            ctx.shared_mut().record("Hopper.draw")
        }

        fn exit(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
            ctx.shared_mut().record("Hopper.exit")
        }
    }

    impl SceneFactory<Journal> for Hopper {
        fn create(_init: SceneInit<'_, Journal>) -> Self {
            Hopper
        }
    }

    // Reads its activation payload on enter.
    struct Level;

    impl Scene<Journal> for Level {
        fn enter(&mut self, ctx: &mut SceneContext<'_, Journal>) -> anyhow::Result<()> {
            let number = ctx.args::<u32>().copied();
            ctx.shared_mut().record(format!("Level.enter({:?})", number))
        }
    }

    impl SceneFactory<Journal> for Level {
        fn create(_init: SceneInit<'_, Journal>) -> Self {
            Level
        }
    }

    fn manager() -> SceneManager<Journal> {
        SceneManager::with_shared(Journal::default())
    }

    fn drain(manager: &mut SceneManager<Journal>) -> Vec<String> {
        manager.shared_mut().take()
    }

    //=====================================================================
    // Builder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = SceneManagerBuilder::new();
        assert_eq!(builder.queue_capacity, 64);
    }

    #[test]
    fn builder_with_queue_capacity() {
        let builder = SceneManagerBuilder::new().with_queue_capacity(2);
        assert_eq!(builder.queue_capacity, 2);
    }

    #[test]
    #[should_panic(expected = "Queue capacity must be positive")]
    fn builder_with_queue_capacity_panics_on_zero() {
        SceneManagerBuilder::new().with_queue_capacity(0);
    }

    #[test]
    fn managers_get_distinct_adapter_ids() {
        assert_ne!(SceneManager::new().adapter_id(), SceneManager::new().adapter_id());
    }

    //=====================================================================
    // Registration Tests
    //=====================================================================

    #[test]
    fn register_twice_returns_same_entry() {
        let mut manager = manager();

        let first = manager.register::<A>() as *const RegistryEntry<Journal>;
        let second = manager.register::<A>() as *const RegistryEntry<Journal>;

        assert_eq!(first, second);
        assert_eq!(manager.shared().constructed.get(), 1);
        assert_eq!(manager.registry().len(), 1);
    }

    #[test]
    fn register_does_not_activate() {
        let mut manager = manager();
        manager.register::<A>();

        assert!(manager.current().is_none());
        assert!(!manager.is_current::<A>());
    }

    #[test]
    fn find_and_index_of() {
        let mut manager = manager();
        manager.register::<A>();
        manager.register::<B>();

        assert!(manager.find::<B>().is_some());
        assert!(manager.find::<C>().is_none());
        assert_eq!(manager.index_of::<B>(), Some(1));
        assert_eq!(manager.index_of::<C>(), None);
    }

    //=====================================================================
    // Activation Tests
    //=====================================================================

    #[test]
    fn activate_registers_lazily() {
        let mut manager = manager();
        manager.activate::<A>().unwrap();

        assert!(manager.is_current::<A>());
        assert_eq!(manager.index_of::<A>(), Some(0));
        assert_eq!(manager.shared().constructed.get(), 1);
        assert!(drain(&mut manager).is_empty(), "hooks are deferred to the next tick");
    }

    #[test]
    fn self_activation_is_noop() {
        let mut manager = manager();
        manager.activate::<A>().unwrap();
        manager.tick().unwrap();
        drain(&mut manager);

        manager.activate::<A>().unwrap();
        manager.tick().unwrap();

        assert!(manager.is_current::<A>());
        assert_eq!(drain(&mut manager), vec!["A.draw"]);
    }

    #[test]
    fn exit_runs_before_new_scene_hooks() {
        let mut manager = manager();
        manager.activate::<A>().unwrap();
        manager.tick().unwrap();
        drain(&mut manager);

        manager.activate::<B>().unwrap();
        assert_eq!(drain(&mut manager), vec!["A.exit"], "exit is synchronous");

        manager.tick().unwrap();
        assert_eq!(drain(&mut manager), vec!["B.setup", "B.enter", "B.draw"]);
    }

    #[test]
    fn exit_skipped_without_capability() {
        let mut manager = manager();
        manager.activate::<Still>().unwrap();
        manager.tick().unwrap();
        manager.activate::<A>().unwrap();

        assert_eq!(drain(&mut manager), vec!["Still.draw"]);
    }

    #[test]
    fn failing_exit_keeps_current_scene() {
        let mut manager = manager();
        manager.shared_mut().fail_on = Some("A.exit");
        manager.activate::<A>().unwrap();

        let err = manager.activate::<B>().unwrap_err();

        assert_eq!(err.to_string(), "A.exit failed");
        assert!(manager.is_current::<A>());
    }

    #[test]
    fn activation_args_visible_to_hooks() {
        let mut manager = manager();
        manager.activate_with::<Level, _>(7_u32).unwrap();
        manager.tick().unwrap();

        assert_eq!(drain(&mut manager), vec!["Level.enter(Some(7))"]);
        assert_eq!(manager.current().unwrap().args().and_then(|a| a.get::<u32>()), Some(&7));
    }

    #[test]
    fn reactivation_replaces_args() {
        let mut manager = manager();
        manager.activate_with::<Level, _>(1_u32).unwrap();
        manager.activate::<A>().unwrap();
        manager.activate::<Level>().unwrap();
        manager.tick().unwrap();

        assert_eq!(drain(&mut manager), vec!["A.exit", "Level.enter(None)"]);
    }

    //=====================================================================
    // Tick Tests
    //=====================================================================

    #[test]
    fn tick_without_scene_is_noop() {
        let mut manager = manager();
        manager.tick().unwrap();
        assert!(drain(&mut manager).is_empty());
    }

    #[test]
    fn first_tick_runs_setup_enter_draw() {
        let mut manager = manager();
        manager.activate::<A>().unwrap();

        manager.tick().unwrap();
        manager.tick().unwrap();

        assert_eq!(drain(&mut manager), vec!["A.setup", "A.enter", "A.draw", "A.draw"]);
    }

    #[test]
    fn setup_runs_once_enter_runs_per_activation() {
        let mut manager = manager();

        for _ in 0..3 {
            manager.activate::<A>().unwrap();
            manager.tick().unwrap();
            manager.activate::<B>().unwrap();
            manager.tick().unwrap();
        }

        let log = drain(&mut manager);
        let count = |name: &str| log.iter().filter(|e| *e == name).count();

        assert_eq!(count("A.setup"), 1);
        assert_eq!(count("B.setup"), 1);
        assert_eq!(count("A.enter"), 3);
        assert_eq!(count("B.enter"), 3);
        assert_eq!(count("A.exit"), 3);
        assert_eq!(count("B.exit"), 2);
    }

    #[test]
    fn capabilities_gate_hooks() {
        let mut manager = manager();
        manager.activate::<Still>().unwrap();
        manager.tick().unwrap();

        assert_eq!(drain(&mut manager), vec!["Still.draw"]);
        assert!(!manager.current().unwrap().setup_executed());
    }

    #[test]
    fn default_capabilities_run_no_op_hooks() {
        let mut manager = manager();
        manager.activate::<Listener>().unwrap();
        manager.tick().unwrap();

        let entry = manager.current().unwrap();
        assert_eq!(entry.capabilities(), Capabilities::all());
        assert!(entry.setup_executed());
        assert!(entry.enter_executed());
    }

    #[test]
    fn failing_setup_propagates_and_is_not_retried() {
        let mut manager = manager();
        manager.shared_mut().fail_on = Some("A.setup");
        manager.activate::<A>().unwrap();

        let err = manager.tick().unwrap_err();
        assert_eq!(err.to_string(), "A.setup failed");

        manager.shared_mut().fail_on = None;
        manager.tick().unwrap();

        assert_eq!(drain(&mut manager), vec!["A.setup", "A.enter", "A.draw"]);
    }

    #[test]
    fn transition_requested_in_draw_waits_for_tick_end() {
        let mut manager = manager();
        manager.activate::<Hopper>().unwrap();

        manager.tick().unwrap();
        assert_eq!(drain(&mut manager), vec!["Hopper.draw", "Hopper.exit"]);
        assert!(manager.is_current::<B>());

        manager.tick().unwrap();
        assert_eq!(drain(&mut manager), vec!["B.setup", "B.enter", "B.draw"]);
    }

    #[test]
    fn requests_apply_without_current_scene() {
        let mut manager = manager();
        let handle = manager.handle();

        handle.activate::<A>().unwrap();
        manager.tick().unwrap();
        assert!(manager.is_current::<A>());
        assert_eq!(handle.pending(), 0);

        let mut idle = self::manager();
        let handle = idle.handle();
        handle.activate_with::<Level, _>(3_u32).unwrap();

        let handled = idle.dispatch_event(&SceneEvent::named(EventName::MousePressed)).unwrap();
        assert!(!handled);
        assert!(idle.is_current::<Level>());
    }

    #[test]
    fn external_handle_requests_apply_on_next_boundary() {
        let mut manager = manager();
        let handle = manager.handle();
        manager.activate::<A>().unwrap();

        handle.activate_with::<Level, u32>(4).unwrap();
        assert!(manager.is_current::<A>());

        manager.process_transitions().unwrap();
        assert!(manager.is_current::<Level>());
        assert_eq!(handle.pending(), 0);
    }

    //=====================================================================
    // Cyclic Traversal Tests
    //=====================================================================

    #[test]
    fn activate_next_cycles_in_registration_order() {
        let mut manager = manager();
        manager.register::<A>();
        manager.register::<B>();
        manager.register::<C>();

        let mut visited = Vec::new();
        for _ in 0..7 {
            manager.activate_next().unwrap();
            visited.push(manager.current().unwrap().definition().short_name());
        }

        assert_eq!(visited, vec!["A", "B", "C", "A", "B", "C", "A"]);
    }

    #[test]
    fn activate_next_on_empty_registry_is_noop() {
        let mut manager = manager();
        manager.activate_next().unwrap();
        assert!(manager.current().is_none());
    }

    #[test]
    fn activate_next_with_single_scene_stays_put() {
        let mut manager = manager();
        manager.activate::<A>().unwrap();
        manager.activate_next().unwrap();

        assert!(manager.is_current::<A>());
        assert!(drain(&mut manager).is_empty(), "self-activation must not exit");
    }

    #[test]
    fn activate_next_with_passes_args() {
        let mut manager = manager();
        manager.register::<Level>();
        manager.activate_next_with(9_u32).unwrap();
        manager.tick().unwrap();

        assert_eq!(drain(&mut manager), vec!["Level.enter(Some(9))"]);
    }

    //=====================================================================
    // Event Dispatch Tests
    //=====================================================================

    #[test]
    fn event_forwarded_with_args() {
        let mut manager = manager();
        manager.activate::<Listener>().unwrap();

        let event = SceneEvent::new(EventName::custom("X"), [1, 2, 3]);
        let handled = manager.dispatch_event(&event).unwrap();

        assert!(handled);
        assert_eq!(drain(&mut manager), vec!["Listener.X(1,2,3)"]);
    }

    #[test]
    fn unhandled_event_is_dropped() {
        let mut manager = manager();
        manager.activate::<Listener>().unwrap();

        let event = SceneEvent::new(EventName::KeyPressed, [EventValue::Int(65)]);
        assert!(!manager.dispatch_event(&event).unwrap());
        assert!(drain(&mut manager).is_empty());
    }

    #[test]
    fn event_without_scene_is_noop() {
        let mut manager = manager();
        let handled = manager.dispatch_event(&SceneEvent::named("X")).unwrap();
        assert!(!handled);
    }

    #[test]
    fn event_reaches_only_current_scene() {
        let mut manager = manager();
        manager.activate::<Listener>().unwrap();
        manager.activate::<A>().unwrap();

        assert!(!manager.dispatch_event(&SceneEvent::named("X")).unwrap());
    }
}
