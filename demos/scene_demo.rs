//=========================================================================
// Scene Demo
//=========================================================================
//
// Three scenes switched by keyboard and mouse. Nothing is drawn; run
// with `RUST_LOG=debug` to watch the lifecycle:
//
//   cargo run --example scene_demo
//
// Intro:   any key      → Clicker
// Clicker: double click → Typist
// Escape in Clicker or Typist returns to the intro.
//
//=========================================================================

use log::info;
use sketch_scenes::prelude::*;

//=== Shared State ========================================================

/// Injected into every scene through `SceneContext::shared`.
struct Backdrop {
    name: &'static str,
    frames: u64,
}

//=== Scenes ==============================================================

fn is_escape(event: &SceneEvent) -> bool {
    event.arg(0).and_then(EventValue::as_key) == Some(KeyCode::Escape)
}

struct Intro;

impl Scene<Backdrop> for Intro {
    fn setup(&mut self, ctx: &mut SceneContext<'_, Backdrop>) -> anyhow::Result<()> {
        info!("Intro: loading backdrop {}", ctx.shared().name);
        Ok(())
    }

    fn enter(&mut self, _ctx: &mut SceneContext<'_, Backdrop>) -> anyhow::Result<()> {
        info!("Intro: press any key");
        Ok(())
    }

    fn draw(&mut self, ctx: &mut SceneContext<'_, Backdrop>) -> anyhow::Result<()> {
        ctx.shared_mut().frames += 1;
        Ok(())
    }

    fn on_event(
        &mut self,
        event: &SceneEvent,
        ctx: &mut SceneContext<'_, Backdrop>,
    ) -> anyhow::Result<bool> {
        if !event.is(&EventName::KeyPressed) {
            return Ok(false);
        }
        ctx.activate_next()?;
        Ok(true)
    }
}

impl SceneFactory<Backdrop> for Intro {
    fn create(_init: SceneInit<'_, Backdrop>) -> Self {
        Intro
    }
}

/// Counts clicks and moves on after a double click.
struct Clicker {
    clicks: u32,
}

impl Scene<Backdrop> for Clicker {
    fn enter(&mut self, _ctx: &mut SceneContext<'_, Backdrop>) -> anyhow::Result<()> {
        info!("Clicker: {} click(s) so far, double click to continue", self.clicks);
        Ok(())
    }

    fn exit(&mut self, ctx: &mut SceneContext<'_, Backdrop>) -> anyhow::Result<()> {
        info!("Clicker: leaving at frame {}", ctx.shared().frames);
        Ok(())
    }

    fn on_event(
        &mut self,
        event: &SceneEvent,
        ctx: &mut SceneContext<'_, Backdrop>,
    ) -> anyhow::Result<bool> {
        match event.name() {
            EventName::MouseClicked => {
                self.clicks += 1;
                let x = event.arg(1).and_then(EventValue::as_float).unwrap_or_default();
                let y = event.arg(2).and_then(EventValue::as_float).unwrap_or_default();
                info!("Clicker: click #{} at ({:.0}, {:.0})", self.clicks, x, y);
            }
            EventName::DoubleClicked => {
                ctx.handle().activate_next_with("type something, Escape to restart")?
            }
            EventName::KeyPressed if is_escape(event) => ctx.activate::<Intro>()?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl SceneFactory<Backdrop> for Clicker {
    fn create(_init: SceneInit<'_, Backdrop>) -> Self {
        Clicker { clicks: 0 }
    }
}

/// Shows typed text and the window size.
struct Typist {
    line: String,
}

impl Scene<Backdrop> for Typist {
    fn enter(&mut self, ctx: &mut SceneContext<'_, Backdrop>) -> anyhow::Result<()> {
        if let Some(greeting) = ctx.args::<&'static str>() {
            info!("Typist: {}", greeting);
        }
        Ok(())
    }

    fn on_event(
        &mut self,
        event: &SceneEvent,
        ctx: &mut SceneContext<'_, Backdrop>,
    ) -> anyhow::Result<bool> {
        match event.name() {
            EventName::KeyTyped => {
                if let Some(text) = event.arg(0).and_then(EventValue::as_text) {
                    self.line.push_str(text);
                    info!("Typist: {}", self.line);
                }
            }
            EventName::KeyPressed if is_escape(event) => {
                self.line.clear();
                ctx.activate::<Intro>()?;
            }
            EventName::WindowResized => {
                info!("Typist: window is now {:?}x{:?}", event.arg(0), event.arg(1));
            }
            _ => return Ok(false),
        }
        Ok(true)
    }
}

impl SceneFactory<Backdrop> for Typist {
    fn create(_init: SceneInit<'_, Backdrop>) -> Self {
        Typist { line: String::new() }
    }
}

//=== Entry Point =========================================================

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = SketchConfig::load("sketch.toml")?;

    let manager = SceneManagerBuilder::new()
        .with_shared(Backdrop {
            name: "bk.jpg",
            frames: 0,
        })
        .build()
        .into_shared();

    {
        let mut manager = manager.borrow_mut();
        manager.register::<Intro>();
        manager.register::<Clicker>();
        manager.register::<Typist>();
        manager.activate::<Intro>()?;
    }

    Sketch::wired(config, &manager)?.run()?;
    Ok(())
}
