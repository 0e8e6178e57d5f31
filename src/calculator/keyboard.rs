//! Keyboard input for the basic calculator.
//!
//! Maps raw key presses to calculator actions. Keys are only mapped while
//! no text input holds focus, so typing into the graph or calculus fields
//! never edits the calculator display.

/// Characters a key press may append to the display.
pub const KEYPAD_CHARS: &str = "0123456789+-*/.";

/// Operator characters on the keypad.
const OPERATORS: &str = "+-*/";

/// A raw key press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Other,
}

/// Where keyboard focus currently is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    /// No text field is focused; the calculator owns the keyboard.
    #[default]
    None,
    /// A text input is focused and receives the keys itself.
    TextInput,
}

/// What a key press does to the calculator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Append(String),
    Evaluate,
    Backspace,
}

/// Map a key press to an action, or `None` if the calculator ignores it.
pub fn key_action(key: Key, focus: Focus) -> Option<KeyAction> {
    if focus == Focus::TextInput {
        return None;
    }

    match key {
        Key::Char(c) if KEYPAD_CHARS.contains(c) => Some(KeyAction::Append(c.to_string())),
        Key::Enter => Some(KeyAction::Evaluate),
        Key::Backspace => Some(KeyAction::Backspace),
        Key::Char(_) | Key::Other => None,
    }
}

/// Check if a token is a single keypad operator.
pub fn is_operator(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if OPERATORS.contains(c))
}
