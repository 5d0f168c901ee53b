//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use sketch_scenes::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Window host
pub use crate::config::SketchConfig;
pub use crate::{PlatformError, Sketch};

// Scene system
pub use crate::core::scene::{
    Capabilities, Scene, SceneArgs, SceneContext, SceneDefinition, SceneFactory, SceneHandle,
    SceneInit, SceneManager, SceneManagerBuilder,
};

// Events
pub use crate::core::input::{EventName, EventValue, KeyCode, MouseButton, SceneEvent};

// Host wiring
pub use crate::core::platform_bridge::{wire, EventSink, SharedSceneManager};

// Errors
pub use crate::core::error::SceneError;
