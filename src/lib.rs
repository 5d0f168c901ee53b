//=========================================================================
// Sketch Scenes — Library Root
//
// Scene switching for creative-coding sketches.
//
// Responsibilities:
// - Expose the scene registry and dispatcher (`core::scene`)
// - Expose the host-facing event sink and wiring (`core::platform_bridge`)
// - Keep the Winit window host (`platform`) behind the `Sketch` facade
//
// Typical usage:
// ```no_run
// use sketch_scenes::prelude::*;
//
// struct Title;
// impl Scene for Title {}
// impl SceneFactory for Title {
//     fn create(_init: SceneInit<'_, ()>) -> Self { Title }
// }
//
// fn main() -> anyhow::Result<()> {
//     let manager = SceneManager::new().into_shared();
//     manager.borrow_mut().activate::<Title>()?;
//     Sketch::wired(SketchConfig::load("sketch.toml")?, &manager)?.run()?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that runs without a window. `config` holds the
// sketch window settings.
//
pub mod config;
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit window and input translation. Only the
// `Sketch` facade and its error type are part of the public API.
//
mod platform;

//--- Public Exports ------------------------------------------------------

pub use platform::{PlatformError, Sketch};
