//! Input events forwarded by the host.

/// A key identifier supplied by the host's keyboard events.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Char(char),
    Ctrl(char),
    Backspace,
    Return,
    Esc,
}

/// A single event from the host's event-dispatch system.
///
/// Pointer coordinates are raw pixel offsets as reported by the host,
/// before display scaling and conversion to user coordinates.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum InputEvent {
    KeyDown(Key),
    MouseClick { x: f64, y: f64 },
    MouseMove { x: f64, y: f64 },
}
