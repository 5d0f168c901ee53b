//=========================================================================
// Event Sink
//=========================================================================
//
// Host-side listener lists: one for the draw tick, one per event name.
//
// Architecture:
//   host frame  → emit_draw()  → draw listeners (registration order)
//   host input  → emit(event)  → listeners[event.name] (registration order)
//
// Listeners registered by the application run before any listener a
// scene manager attaches later, so existing host callbacks are preserved
// and the manager's forwarder always runs after them.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use crate::core::input::{EventName, SceneEvent};

//=== Listener Types ======================================================

/// Callback invoked for a named input event.
pub type Listener = Box<dyn FnMut(&SceneEvent) -> anyhow::Result<()>>;

/// Callback invoked once per host frame.
pub type DrawListener = Box<dyn FnMut() -> anyhow::Result<()>>;

//=== AdapterId ===========================================================

/// Identity of a listener owner (one per scene manager).
///
/// Used to detect repeated wiring of the same manager onto a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterId(u64);

impl AdapterId {
    /// Allocates a process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AdapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "adapter#{}", self.0)
    }
}

//=== Registration ========================================================

struct Registration<L> {
    /// `None` for plain host callbacks.
    owner: Option<AdapterId>,
    listener: L,
}

//=== EventSink ===========================================================

/// Observer list for the draw tick and named input events.
///
/// # Examples
///
/// ```
/// use sketch_scenes::core::input::{EventName, SceneEvent};
/// use sketch_scenes::core::platform_bridge::EventSink;
///
/// let mut sink = EventSink::new();
/// sink.on(EventName::KeyPressed, |event| {
///     println!("pressed {:?}", event.arg(0));
///     Ok(())
/// });
///
/// let called = sink.emit(&SceneEvent::named(EventName::KeyPressed))?;
/// assert_eq!(called, 1);
/// # Ok::<(), anyhow::Error>(())
/// ```
#[derive(Default)]
pub struct EventSink {
    draw: Vec<Registration<DrawListener>>,
    listeners: HashMap<EventName, Vec<Registration<Listener>>>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Host Registration ------------------------------------------------

    /// Appends a host draw callback.
    pub fn on_draw<F>(&mut self, listener: F)
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        self.draw.push(Registration {
            owner: None,
            listener: Box::new(listener),
        });
    }

    /// Appends a host callback for `name`.
    pub fn on<F>(&mut self, name: impl Into<EventName>, listener: F)
    where
        F: FnMut(&SceneEvent) -> anyhow::Result<()> + 'static,
    {
        self.listeners.entry(name.into()).or_default().push(Registration {
            owner: None,
            listener: Box::new(listener),
        });
    }

    //--- Adapter Registration ---------------------------------------------

    /// Appends `listener` to the draw list on behalf of `owner`.
    ///
    /// Returns `false` (and drops `listener`) if `owner` already has a
    /// draw listener here.
    pub fn attach_draw(&mut self, owner: AdapterId, listener: DrawListener) -> bool {
        if self.is_draw_wired(owner) {
            return false;
        }
        self.draw.push(Registration {
            owner: Some(owner),
            listener,
        });
        true
    }

    /// Appends `listener` for `name` on behalf of `owner`.
    ///
    /// Returns `false` (and drops `listener`) if `owner` is already wired
    /// for `name`.
    pub fn attach(&mut self, owner: AdapterId, name: EventName, listener: Listener) -> bool {
        if self.is_wired(owner, &name) {
            return false;
        }
        self.listeners.entry(name).or_default().push(Registration {
            owner: Some(owner),
            listener,
        });
        true
    }

    /// Removes every listener `owner` attached. Returns how many.
    pub fn detach(&mut self, owner: AdapterId) -> usize {
        let before = self.total_listeners();

        self.draw.retain(|r| r.owner != Some(owner));
        for list in self.listeners.values_mut() {
            list.retain(|r| r.owner != Some(owner));
        }
        self.listeners.retain(|_, list| !list.is_empty());

        before - self.total_listeners()
    }

    //--- Query API --------------------------------------------------------

    /// Returns `true` if `owner` has a listener for `name`.
    pub fn is_wired(&self, owner: AdapterId, name: &EventName) -> bool {
        self.listeners
            .get(name)
            .is_some_and(|list| list.iter().any(|r| r.owner == Some(owner)))
    }

    pub fn is_draw_wired(&self, owner: AdapterId) -> bool {
        self.draw.iter().any(|r| r.owner == Some(owner))
    }

    pub fn listener_count(&self, name: &EventName) -> usize {
        self.listeners.get(name).map_or(0, Vec::len)
    }

    pub fn draw_listener_count(&self) -> usize {
        self.draw.len()
    }

    /// Event names with at least one listener, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &EventName> {
        self.listeners.keys()
    }

    fn total_listeners(&self) -> usize {
        self.draw.len() + self.listeners.values().map(Vec::len).sum::<usize>()
    }

    //--- Emission ---------------------------------------------------------

    /// Runs every draw listener in registration order.
    ///
    /// # Errors
    ///
    /// The first listener error stops the frame and is returned.
    pub fn emit_draw(&mut self) -> anyhow::Result<()> {
        for registration in &mut self.draw {
            (registration.listener)()?;
        }
        Ok(())
    }

    /// Runs every listener for `event.name()` in registration order.
    ///
    /// Returns the number of listeners called; an event nobody listens
    /// for is not an error.
    ///
    /// # Errors
    ///
    /// The first listener error stops propagation and is returned.
    pub fn emit(&mut self, event: &SceneEvent) -> anyhow::Result<usize> {
        let Some(list) = self.listeners.get_mut(event.name()) else {
            trace!("No listeners for {}", event.name());
            return Ok(0);
        };

        for registration in list.iter_mut() {
            (registration.listener)(event)?;
        }
        Ok(list.len())
    }
}

impl fmt::Debug for EventSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(name, list)| (name.as_str(), list.len()))
            .collect();

        f.debug_struct("EventSink")
            .field("draw", &self.draw.len())
            .field("listeners", &counts)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
