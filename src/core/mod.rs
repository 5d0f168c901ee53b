//=========================================================================
// Core Systems
//
// Everything that runs without a window: scene registry and dispatch,
// the event vocabulary, and the sink a host drives.
//
// Layout:
// - `scene`: `Scene` trait, registry, `SceneManager` dispatcher
// - `input`: `EventName`, `EventValue`, `SceneEvent`
// - `platform_bridge`: `EventSink` and `wire`, the host-facing contract
// - `error`: plumbing errors (`SceneError`)
//
// Notes:
// The core is single-threaded and never touches Winit. Any host that
// can call `EventSink::emit_draw` once per frame and `EventSink::emit`
// per input can drive it.
//
//=========================================================================

pub mod error;
pub mod input;
pub mod platform_bridge;
pub mod scene;
