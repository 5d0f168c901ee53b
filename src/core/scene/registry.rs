//=========================================================================
// Scene Registry
//=========================================================================
//
// Ordered collection of every scene a manager has seen.
//
// Entries are created lazily (first activation) or explicitly
// (`register`) and live as long as the registry. Lookup is linear; a
// sketch has tens of scenes, not thousands, and insertion order doubles
// as the traversal order of `activate_next`.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::{
    Capabilities, Scene, SceneArgs, SceneDefinition, SceneHandle, SceneInit,
};

//=== Registry Entry ======================================================

/// A constructed scene plus its lifecycle bookkeeping.
pub struct RegistryEntry<C = ()> {
    pub(super) definition: SceneDefinition<C>,
    pub(super) scene: Box<dyn Scene<C>>,
    pub(super) capabilities: Capabilities,

    /// Set once setup has run; never reset.
    pub(super) setup_executed: bool,

    /// Reset on every activation so `enter` fires once per activation.
    pub(super) enter_executed: bool,

    /// Payload of the current (or most recent) activation.
    pub(super) args: Option<SceneArgs>,
}

impl<C> RegistryEntry<C> {
    pub fn definition(&self) -> SceneDefinition<C> {
        self.definition
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Whether `setup` has been called. Stays `false` for scenes whose
    /// capabilities exclude `SETUP`.
    pub fn setup_executed(&self) -> bool {
        self.setup_executed
    }

    /// Whether `enter` has been called for the current activation.
    pub fn enter_executed(&self) -> bool {
        self.enter_executed
    }

    pub fn args(&self) -> Option<&SceneArgs> {
        self.args.as_ref()
    }
}

impl<C> std::fmt::Debug for RegistryEntry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("definition", &self.definition)
            .field("capabilities", &self.capabilities)
            .field("setup_executed", &self.setup_executed)
            .field("enter_executed", &self.enter_executed)
            .field("args", &self.args)
            .finish()
    }
}

//=== Scene Registry ======================================================

/// Insertion-ordered scene registry.
///
/// Owned by a [`SceneManager`](super::SceneManager); read it through
/// [`SceneManager::registry`](super::SceneManager::registry).
pub struct SceneRegistry<C = ()> {
    entries: Vec<RegistryEntry<C>>,
    handle: SceneHandle<C>,
}

impl<C: 'static> SceneRegistry<C> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry whose scenes receive `handle` at
    /// construction.
    pub(crate) fn new(handle: SceneHandle<C>) -> Self {
        Self {
            entries: Vec::new(),
            handle,
        }
    }

    //--- Registration -----------------------------------------------------

    /// Returns the index of `definition`, constructing the scene first if
    /// it has never been seen.
    ///
    /// The constructor runs at most once per definition.
    pub(crate) fn register(&mut self, definition: SceneDefinition<C>, shared: &C) -> usize {
        if let Some(index) = self.index_of(&definition) {
            return index;
        }

        let scene = definition.construct(SceneInit::new(&self.handle, shared));
        let capabilities = scene.capabilities();

        debug!(
            "Registered scene {} at index {} ({:?})",
            definition,
            self.entries.len(),
            capabilities
        );

        self.entries.push(RegistryEntry {
            definition,
            scene,
            capabilities,
            setup_executed: false,
            enter_executed: false,
            args: None,
        });

        self.entries.len() - 1
    }

    //--- Lookup -----------------------------------------------------------

    /// Returns the entry for `definition`, if registered.
    pub fn find(&self, definition: &SceneDefinition<C>) -> Option<&RegistryEntry<C>> {
        self.index_of(definition).map(|index| &self.entries[index])
    }

    /// Position of `definition` in registration order.
    pub fn index_of(&self, definition: &SceneDefinition<C>) -> Option<usize> {
        self.entries
            .iter()
            .position(|entry| entry.definition == *definition)
    }

    pub fn get(&self, index: usize) -> Option<&RegistryEntry<C>> {
        self.entries.get(index)
    }

    pub(crate) fn entry_mut(&mut self, index: usize) -> &mut RegistryEntry<C> {
        &mut self.entries[index]
    }

    //--- Query API --------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered scene definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = SceneDefinition<C>> + '_ {
        self.entries.iter().map(|entry| entry.definition)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::core::scene::transition_queue::TransitionQueue;
    use crate::core::scene::{SceneContext, SceneFactory};

    //--- Test Scenes ------------------------------------------------------

    #[derive(Default)]
    struct Counter {
        constructed: Cell<usize>,
    }

    struct Intro;
    impl Scene<Counter> for Intro {}
    impl SceneFactory<Counter> for Intro {
        fn create(init: SceneInit<'_, Counter>) -> Self {
            let counter = &init.shared().constructed;
            counter.set(counter.get() + 1);
            Intro
        }
    }

    struct Credits;
    impl Scene<Counter> for Credits {
        fn capabilities(&self) -> Capabilities {
            Capabilities::DRAW
        }

        fn draw(&mut self, _ctx: &mut SceneContext<'_, Counter>) -> anyhow::Result<()> {
            Ok(())
        }
    }
    impl SceneFactory<Counter> for Credits {
        fn create(_init: SceneInit<'_, Counter>) -> Self {
            Credits
        }
    }

    fn registry() -> (SceneRegistry<Counter>, TransitionQueue<Counter>) {
        let queue = TransitionQueue::new(4);
        (SceneRegistry::new(queue.handle().clone()), queue)
    }

    //--- Registration Tests -----------------------------------------------

    #[test]
    fn register_constructs_once() {
        let (mut registry, _queue) = registry();
        let counter = Counter::default();

        let first = registry.register(SceneDefinition::of::<Intro>(), &counter);
        let second = registry.register(SceneDefinition::of::<Intro>(), &counter);

        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(counter.constructed.get(), 1);
    }

    #[test]
    fn new_entries_start_unexecuted() {
        let (mut registry, _queue) = registry();
        registry.register(SceneDefinition::of::<Intro>(), &Counter::default());

        let entry = registry.find(&SceneDefinition::of::<Intro>()).unwrap();
        assert!(!entry.setup_executed());
        assert!(!entry.enter_executed());
        assert!(entry.args().is_none());
    }

    #[test]
    fn capabilities_recorded_at_registration() {
        let (mut registry, _queue) = registry();
        registry.register(SceneDefinition::of::<Credits>(), &Counter::default());

        let entry = registry.find(&SceneDefinition::of::<Credits>()).unwrap();
        assert_eq!(entry.capabilities(), Capabilities::DRAW);
    }

    //--- Lookup Tests -----------------------------------------------------

    #[test]
    fn index_follows_insertion_order() {
        let (mut registry, _queue) = registry();
        let counter = Counter::default();
        registry.register(SceneDefinition::of::<Credits>(), &counter);
        registry.register(SceneDefinition::of::<Intro>(), &counter);

        assert_eq!(registry.index_of(&SceneDefinition::of::<Credits>()), Some(0));
        assert_eq!(registry.index_of(&SceneDefinition::of::<Intro>()), Some(1));

        let order: Vec<_> = registry.definitions().map(|d| d.short_name()).collect();
        assert_eq!(order, vec!["Credits", "Intro"]);
    }

    #[test]
    fn unknown_scene_is_not_found() {
        let (registry, _queue) = registry();
        assert!(registry.is_empty());
        assert!(registry.find(&SceneDefinition::of::<Intro>()).is_none());
        assert_eq!(registry.index_of(&SceneDefinition::of::<Intro>()), None);
    }
}
