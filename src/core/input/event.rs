//=========================================================================
// Scene Event Types
//
// Defines the host-facing representation of input events routed to
// scenes.
//
// This module abstracts away platform-specific input (e.g. Winit, a
// browser canvas) into named events with a small positional payload,
// mirroring the callback names creative-coding hosts expose
// (`mousePressed`, `keyTyped`, `windowResized`, ...).
//
// Responsibilities:
// - Name every standard input event a sketch can react to
// - Allow applications to route their own custom event names
// - Carry event arguments in a portable, clone-cheap payload
//
// Event Flow:
// ```text
// Platform Layer (Winit)
//         ↓
//    SceneEvent (this module)
//         ↓
//    EventSink listeners
//         ↓
//    SceneManager::dispatch_event → Scene::on_event
// ```
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
///
/// The `Other` variant covers side buttons, macro buttons, and any
/// non-standard inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons, macro keys).
    Other,
}

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// The character (if any) travels separately in `KeyTyped` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Shift,
    Control,
    Alt,

    /// Fallback for keys not explicitly mapped by the platform layer.
    Unidentified,
}

//=== EventName ===========================================================

/// Name of an event a scene can handle.
///
/// The standard variants cover the input callbacks every host forwards.
/// `Custom` carries any additional name an application wires itself.
///
/// The string form uses the host's camelCase callback names, so
/// `EventName::MousePressed.as_str() == "mousePressed"` and
/// `"mousePressed".parse::<EventName>()` yields `MousePressed`. Unknown
/// strings parse as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventName {
    MouseClicked,
    MousePressed,
    MouseReleased,
    MouseMoved,
    MouseDragged,
    DoubleClicked,
    MouseWheel,
    KeyPressed,
    KeyReleased,
    KeyTyped,
    TouchStarted,
    TouchMoved,
    TouchEnded,
    DeviceMoved,
    DeviceTurned,
    DeviceShaken,
    WindowResized,

    /// Application-defined event name.
    Custom(String),
}

impl EventName {
    /// Every standard input event, in the order the wiring adapter
    /// registers them.
    pub const STANDARD: [EventName; 17] = [
        EventName::MouseClicked,
        EventName::MousePressed,
        EventName::MouseReleased,
        EventName::MouseMoved,
        EventName::MouseDragged,
        EventName::DoubleClicked,
        EventName::MouseWheel,
        EventName::KeyPressed,
        EventName::KeyReleased,
        EventName::KeyTyped,
        EventName::TouchStarted,
        EventName::TouchMoved,
        EventName::TouchEnded,
        EventName::DeviceMoved,
        EventName::DeviceTurned,
        EventName::DeviceShaken,
        EventName::WindowResized,
    ];

    /// Creates a custom event name.
    ///
    /// Standard names are recognised, so `EventName::custom("keyPressed")`
    /// returns `EventName::KeyPressed` rather than a custom duplicate.
    pub fn custom(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::STANDARD
            .iter()
            .find(|standard| standard.as_str() == name)
            .cloned()
            .unwrap_or(Self::Custom(name))
    }

    /// Returns the host callback name for this event.
    pub fn as_str(&self) -> &str {
        match self {
            Self::MouseClicked => "mouseClicked",
            Self::MousePressed => "mousePressed",
            Self::MouseReleased => "mouseReleased",
            Self::MouseMoved => "mouseMoved",
            Self::MouseDragged => "mouseDragged",
            Self::DoubleClicked => "doubleClicked",
            Self::MouseWheel => "mouseWheel",
            Self::KeyPressed => "keyPressed",
            Self::KeyReleased => "keyReleased",
            Self::KeyTyped => "keyTyped",
            Self::TouchStarted => "touchStarted",
            Self::TouchMoved => "touchMoved",
            Self::TouchEnded => "touchEnded",
            Self::DeviceMoved => "deviceMoved",
            Self::DeviceTurned => "deviceTurned",
            Self::DeviceShaken => "deviceShaken",
            Self::WindowResized => "windowResized",
            Self::Custom(name) => name,
        }
    }

    /// Returns `true` for application-defined names.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventName {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::custom(s))
    }
}

impl From<&str> for EventName {
    fn from(name: &str) -> Self {
        Self::custom(name)
    }
}

//=== EventValue ==========================================================

/// A single positional argument carried by a [`SceneEvent`].
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Key(KeyCode),
    Button(MouseButton),
}

impl EventValue {
    /// Numeric view of the value. Integers widen to `f64`.
    pub fn as_float(&self) -> Option<f64> {
        match *self {
            Self::Float(v) => Some(v),
            Self::Int(v) => Some(v as f64),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Self::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_key(&self) -> Option<KeyCode> {
        match *self {
            Self::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_button(&self) -> Option<MouseButton> {
        match *self {
            Self::Button(button) => Some(button),
            _ => None,
        }
    }
}

//--- Conversions ---------------------------------------------------------

impl From<bool> for EventValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for EventValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<i64> for EventValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for EventValue {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u64> for EventValue {
    fn from(v: u64) -> Self {
        // Touch ids are opaque; wrapping keeps them distinct.
        Self::Int(v as i64)
    }
}

impl From<f32> for EventValue {
    fn from(v: f32) -> Self {
        Self::Float(v.into())
    }
}

impl From<f64> for EventValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for EventValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for EventValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<KeyCode> for EventValue {
    fn from(v: KeyCode) -> Self {
        Self::Key(v)
    }
}

impl From<MouseButton> for EventValue {
    fn from(v: MouseButton) -> Self {
        Self::Button(v)
    }
}

//=== SceneEvent ==========================================================

/// A named event plus its positional arguments.
///
/// # Examples
///
/// ```
/// use sketch_scenes::core::input::{EventName, SceneEvent};
///
/// let event = SceneEvent::new(EventName::MouseMoved, [120.0, 48.5]);
/// assert_eq!(event.name().as_str(), "mouseMoved");
/// assert_eq!(event.arg(0).and_then(|v| v.as_float()), Some(120.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEvent {
    name: EventName,
    args: Vec<EventValue>,
}

impl SceneEvent {
    /// Creates an event from a name and any iterable of arguments.
    pub fn new<I, V>(name: impl Into<EventName>, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<EventValue>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an event without arguments.
    pub fn named(name: impl Into<EventName>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn name(&self) -> &EventName {
        &self.name
    }

    pub fn args(&self) -> &[EventValue] {
        &self.args
    }

    /// Returns the argument at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&EventValue> {
        self.args.get(index)
    }

    /// Returns `true` if this event carries the given name.
    pub fn is(&self, name: &EventName) -> bool {
        &self.name == name
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    //=====================================================================
    // EventName Tests
    //=====================================================================

    #[test]
    fn standard_names_use_host_callback_spelling() {
        assert_eq!(EventName::MousePressed.as_str(), "mousePressed");
        assert_eq!(EventName::DoubleClicked.as_str(), "doubleClicked");
        assert_eq!(EventName::WindowResized.to_string(), "windowResized");
    }

    #[test]
    fn standard_names_parse_back() {
        for name in EventName::STANDARD.iter() {
            let parsed: EventName = name.as_str().parse().unwrap();
            assert_eq!(&parsed, name, "{} should parse to itself", name);
        }
    }

    #[test]
    fn unknown_string_parses_as_custom() {
        let parsed: EventName = "gamepadConnected".parse().unwrap();
        assert_eq!(parsed, EventName::Custom("gamepadConnected".to_string()));
        assert!(parsed.is_custom());
    }

    #[test]
    fn custom_constructor_recognises_standard_names() {
        assert_eq!(EventName::custom("keyTyped"), EventName::KeyTyped);
        assert!(!EventName::custom("keyTyped").is_custom());
    }

    #[test]
    fn standard_names_are_distinct() {
        let set: HashSet<&str> = EventName::STANDARD.iter().map(|n| n.as_str()).collect();
        assert_eq!(set.len(), EventName::STANDARD.len());
    }

    //=====================================================================
    // EventValue Tests
    //=====================================================================

    #[test]
    fn int_widens_to_float() {
        assert_eq!(EventValue::from(3).as_float(), Some(3.0));
        assert_eq!(EventValue::from(2.5).as_int(), None);
    }

    #[test]
    fn typed_accessors_reject_other_variants() {
        let key = EventValue::from(KeyCode::Space);
        assert_eq!(key.as_key(), Some(KeyCode::Space));
        assert_eq!(key.as_button(), None);
        assert_eq!(key.as_text(), None);
    }

    //=====================================================================
    // SceneEvent Tests
    //=====================================================================

    #[test]
    fn event_collects_mixed_arguments() {
        let event = SceneEvent::new(
            EventName::MousePressed,
            [
                EventValue::from(MouseButton::Left),
                EventValue::from(10.0),
                EventValue::from(20.0),
            ],
        );

        assert_eq!(event.args().len(), 3);
        assert_eq!(event.arg(0).and_then(EventValue::as_button), Some(MouseButton::Left));
        assert_eq!(event.arg(2).and_then(EventValue::as_float), Some(20.0));
        assert!(event.arg(3).is_none());
    }

    #[test]
    fn named_event_has_no_arguments() {
        let event = SceneEvent::named("deviceShaken");
        assert!(event.is(&EventName::DeviceShaken));
        assert!(event.args().is_empty());
    }
}
