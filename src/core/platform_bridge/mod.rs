//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges a host (winit window, test harness, browser shim) with the
// scene manager.
//
// The host only knows about `EventSink`: it emits a draw tick per frame
// and named input events. `wire` plugs a scene manager into the sink
// without disturbing listeners the host registered itself.
//
// Components:
// - `event_sink`: listener lists per event name (the contract)
// - `wiring`: manager-side forwarders and the idempotent `wire`
//
//=========================================================================

//=== Module Declarations =================================================

mod event_sink;
mod wiring;

//=== Public API ==========================================================

pub use event_sink::{AdapterId, DrawListener, EventSink, Listener};
pub use wiring::{wire, SharedSceneManager};
