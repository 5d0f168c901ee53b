//=========================================================================
// Input Translator
//=========================================================================
//
// Converts Winit input into named scene events.
//
// Architecture:
//   Winit WindowEvent → InputTranslator → SceneEvent(s) → EventSink
//
// Stateful: tracks the cursor position (buttons and wheel events carry
// no position in Winit), held mouse buttons (move vs drag) and the last
// press (double click detection).
//
// Positions are in logical pixels. The caller converts with the window
// scale factor before handing them in.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::time::{Duration, Instant};

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{EventName, EventValue, KeyCode, MouseButton, SceneEvent};

/// Pixels per wheel "line", the factor browsers use for line-mode deltas.
const PIXELS_PER_LINE: f64 = 100.0;

//=== InputTranslator =====================================================

/// Converts Winit input to scene events.
pub(crate) struct InputTranslator {
    cursor: (f64, f64),
    held: Vec<MouseButton>,
    last_press: Option<(MouseButton, Instant)>,
    double_click: Duration,
    pending_double: Option<MouseButton>,
}

impl InputTranslator {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(double_click: Duration) -> Self {
        Self {
            cursor: (0.0, 0.0),
            held: Vec::with_capacity(3),
            last_press: None,
            double_click,
            pending_double: None,
        }
    }

    //--- Mouse ------------------------------------------------------------

    /// `mouseDragged(x, y)` while any button is held, else `mouseMoved(x, y)`.
    pub(crate) fn cursor_moved(&mut self, x: f64, y: f64) -> SceneEvent {
        self.cursor = (x, y);

        let name = if self.held.is_empty() {
            EventName::MouseMoved
        } else {
            EventName::MouseDragged
        };
        SceneEvent::new(name, [x, y])
    }

    /// Press: `mousePressed`. Release: `mouseReleased`, `mouseClicked`
    /// and, for the second click of a pair, `doubleClicked`.
    ///
    /// Every event carries `(button, x, y)`.
    pub(crate) fn mouse_button(
        &mut self,
        button: WinitMouseButton,
        state: ElementState,
        now: Instant,
    ) -> Vec<SceneEvent> {
        let button = MouseButton::from(button);

        match state {
            ElementState::Pressed => {
                if !self.held.contains(&button) {
                    self.held.push(button);
                }

                match self.last_press.take() {
                    Some((previous, at))
                        if previous == button && now.duration_since(at) <= self.double_click =>
                    {
                        self.pending_double = Some(button);
                    }
                    _ => self.last_press = Some((button, now)),
                }

                vec![self.button_event(EventName::MousePressed, button)]
            }
            ElementState::Released => {
                self.held.retain(|held| *held != button);

                let mut events = vec![
                    self.button_event(EventName::MouseReleased, button),
                    self.button_event(EventName::MouseClicked, button),
                ];
                if self.pending_double == Some(button) {
                    self.pending_double = None;
                    events.push(self.button_event(EventName::DoubleClicked, button));
                }
                events
            }
        }
    }

    /// `mouseWheel(dx, dy)` in pixels; positive `dy` scrolls down.
    pub(crate) fn mouse_wheel(&self, delta: MouseScrollDelta) -> SceneEvent {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                (f64::from(x) * PIXELS_PER_LINE, f64::from(y) * PIXELS_PER_LINE)
            }
            MouseScrollDelta::PixelDelta(position) => (position.x, position.y),
        };

        // Winit reports content movement; hosts report scroll direction.
        SceneEvent::new(EventName::MouseWheel, [-dx, -dy])
    }

    fn button_event(&self, name: EventName, button: MouseButton) -> SceneEvent {
        let (x, y) = self.cursor;
        SceneEvent::new(name, [EventValue::from(button), x.into(), y.into()])
    }

    //--- Keyboard ---------------------------------------------------------

    /// Press: `keyPressed(key)` plus `keyTyped(text)` when the key produced
    /// printable text. Release: `keyReleased(key)`.
    ///
    /// Keys without a mapping only produce `keyTyped`.
    pub(crate) fn key(
        &self,
        physical: PhysicalKey,
        state: ElementState,
        text: Option<&str>,
    ) -> Vec<SceneEvent> {
        let key = match physical {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(_) => KeyCode::Unidentified,
        };
        let mapped = key != KeyCode::Unidentified;

        let mut events = Vec::with_capacity(2);
        match state {
            ElementState::Pressed => {
                if mapped {
                    events.push(SceneEvent::new(EventName::KeyPressed, [key]));
                }
                if let Some(text) = text.filter(|t| is_printable(t)) {
                    events.push(SceneEvent::new(EventName::KeyTyped, [text]));
                }
            }
            ElementState::Released if mapped => {
                events.push(SceneEvent::new(EventName::KeyReleased, [key]));
            }
            ElementState::Released => {}
        }
        events
    }

    //--- Touch & Window ---------------------------------------------------

    /// `touchStarted` / `touchMoved` / `touchEnded` with `(id, x, y)`.
    /// A cancelled touch ends like a lifted one.
    pub(crate) fn touch(&self, phase: TouchPhase, id: u64, x: f64, y: f64) -> SceneEvent {
        let name = match phase {
            TouchPhase::Started => EventName::TouchStarted,
            TouchPhase::Moved => EventName::TouchMoved,
            TouchPhase::Ended | TouchPhase::Cancelled => EventName::TouchEnded,
        };
        SceneEvent::new(name, [EventValue::from(id), x.into(), y.into()])
    }

    /// `windowResized(width, height)`.
    pub(crate) fn resized(&self, width: u32, height: u32) -> SceneEvent {
        SceneEvent::new(EventName::WindowResized, [width, height])
    }
}

fn is_printable(text: &str) -> bool {
    !text.is_empty() && !text.chars().any(char::is_control)
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to scene key codes.
///
/// Left and right modifier keys collapse into one code. Unmapped keys
/// (function keys, numpad, media keys) return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Arrows -------------------------------------------------------

            ArrowUp => KeyCode::ArrowUp,
            ArrowDown => KeyCode::ArrowDown,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight,

            //--- Special ------------------------------------------------------

            Space => KeyCode::Space,
            Enter | NumpadEnter => KeyCode::Enter,
            Escape => KeyCode::Escape,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Delete => KeyCode::Delete,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft | ShiftRight => KeyCode::Shift,
            ControlLeft | ControlRight => KeyCode::Control,
            AltLeft | AltRight => KeyCode::Alt,

            _ => KeyCode::Unidentified,
        }
    }
}

/// Converts Winit mouse buttons. Back, forward and numbered buttons
/// become `Other`.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
