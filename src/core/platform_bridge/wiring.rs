//=========================================================================
// Scene Manager Wiring
//=========================================================================
//
// Attaches a shared scene manager to an event sink as one more listener.
//
// Architecture:
// ```text
//   EventSink
//     ├─ draw:        [host..., tick forwarder]      → SceneManager::tick
//     └─ listeners:
//          mousePressed [host..., event forwarder]  → SceneManager::dispatch_event
//          keyTyped     [host..., event forwarder]  → ...
//          <extra>      [event forwarder]           → ...
// ```
//
// Forwarders hold a `Weak` reference: dropping the manager silently
// turns them into no-ops instead of keeping it alive through the sink.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::cell::RefCell;
use std::rc::{Rc, Weak};

//=== External Dependencies ===============================================

use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::event_sink::{DrawListener, EventSink, Listener};
use crate::core::error::SceneError;
use crate::core::input::{EventName, SceneEvent};
use crate::core::scene::SceneManager;

//=== Shared Manager ======================================================

/// A scene manager shared between the application and sink listeners.
pub type SharedSceneManager<C = ()> = Rc<RefCell<SceneManager<C>>>;

//=== wire() ==============================================================

/// Registers `manager` on `sink` for the draw tick, every standard event
/// name and each name in `extra`.
///
/// Listeners already on the sink keep running first. Wiring the same
/// manager again only adds names it is not yet wired for. Returns the
/// number of listeners added.
///
/// # Errors
///
/// [`SceneError::ManagerBusy`] if `manager` is mutably borrowed.
///
/// # Examples
///
/// ```
/// use sketch_scenes::prelude::*;
///
/// let manager = SceneManager::new().into_shared();
/// let mut sink = EventSink::new();
///
/// let added = wire(&manager, &mut sink, &[EventName::custom("beat")])?;
/// assert_eq!(added, 1 + EventName::STANDARD.len() + 1);
///
/// // Second call is a no-op.
/// assert_eq!(wire(&manager, &mut sink, &[])?, 0);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn wire<C: 'static>(
    manager: &SharedSceneManager<C>,
    sink: &mut EventSink,
    extra: &[EventName],
) -> Result<usize, SceneError> {
    let adapter = manager
        .try_borrow()
        .map_err(|_| SceneError::ManagerBusy)?
        .adapter_id();
    let weak = Rc::downgrade(manager);

    let mut added = 0;
    let mut skipped = 0;

    if sink.attach_draw(adapter, draw_forwarder(weak.clone())) {
        added += 1;
    } else {
        skipped += 1;
    }

    for name in EventName::STANDARD.iter().chain(extra) {
        if sink.is_wired(adapter, name) {
            skipped += 1;
            continue;
        }
        sink.attach(adapter, name.clone(), event_forwarder(weak.clone()));
        added += 1;
    }

    if skipped > 0 {
        warn!("{} already wired for {} listener(s), skipped", adapter, skipped);
    }
    debug!("Wired {} with {} new listener(s)", adapter, added);

    Ok(added)
}

//=== Forwarders ==========================================================

fn draw_forwarder<C: 'static>(manager: Weak<RefCell<SceneManager<C>>>) -> DrawListener {
    Box::new(move || -> anyhow::Result<()> {
        let Some(manager) = manager.upgrade() else {
            return Ok(());
        };
        let mut guard = manager.try_borrow_mut().map_err(|_| SceneError::ManagerBusy)?;
        guard.tick()
    })
}

fn event_forwarder<C: 'static>(manager: Weak<RefCell<SceneManager<C>>>) -> Listener {
    Box::new(move |event: &SceneEvent| -> anyhow::Result<()> {
        let Some(manager) = manager.upgrade() else {
            trace!("Manager dropped, not forwarding {}", event.name());
            return Ok(());
        };
        let mut guard = manager.try_borrow_mut().map_err(|_| SceneError::ManagerBusy)?;
        guard.dispatch_event(event)?;
        Ok(())
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
