//=========================================================================
// Input Events
//=========================================================================
//
// Portable input vocabulary shared by the host adapters and the scene
// dispatcher.
//
// Architecture:
//   Platform (winit) ─► SceneEvent { name, args } ─► EventSink ─► Scene
//
//=========================================================================

//=== Module Declarations =================================================

pub mod event;

//=== Public API ==========================================================

pub use event::{EventName, EventValue, KeyCode, MouseButton, SceneEvent};
