//! Key bindings for the invitation sections.
//!
//! A [`Binding`] pairs one or more key presses with the short help text shown
//! in the footer. Sections keep their bindings in a key map struct and
//! implement [`KeyMap`] so the help line can be generated from them.
//!
//! ```rust
//! use invitation_widgets::key::{Binding, KeyPress};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let toggle = Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
//!     .with_help("enter", "open/close");
//!
//! let msg = KeyMsg { key: KeyCode::Enter, modifiers: KeyModifiers::NONE };
//! assert!(toggle.matches(&msg));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key.
    pub code: KeyCode,
    /// Required modifiers. `NONE` accepts a bare press or one with shift.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    fn matches(&self, msg: &KeyMsg) -> bool {
        if self.code != msg.key {
            return false;
        }
        if self.modifiers.is_empty() {
            // Shift is implied by the character itself ('G' vs 'g').
            return !msg
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);
        }
        msg.modifiers.contains(self.modifiers)
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key label, e.g. `"enter"`.
    pub key: String,
    /// What the key does, e.g. `"submit"`.
    pub desc: String,
}

/// A set of key presses that trigger the same action.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding without help text.
    pub fn new<K, I>(keys: I) -> Self
    where
        K: Into<KeyPress>,
        I: IntoIterator<Item = K>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            enabled: true,
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Returns the key presses this binding reacts to.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Enables or disables the binding. Disabled bindings never match and are
    /// hidden from help.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the binding is active.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// Reports whether `msg` triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Reports whether `msg` triggers any of `bindings`.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Implemented by key map structs so the help line can list their bindings.
pub trait KeyMap {
    /// Bindings to show in the single-line help footer.
    fn short_help(&self) -> Vec<&Binding>;
}

/// Shorthand for a ctrl-modified character.
pub fn ctrl(c: char) -> KeyPress {
    KeyPress::from((KeyCode::Char(c), KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers,
        }
    }

    #[test]
    fn test_plain_binding_ignores_shift_but_not_ctrl() {
        let b = Binding::new(vec![KeyCode::Char('q')]);
        assert!(b.matches(&press(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(b.matches(&press(KeyCode::Char('q'), KeyModifiers::SHIFT)));
        assert!(!b.matches(&press(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&press(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_modified_binding_requires_modifier() {
        let b = Binding::new(vec![ctrl('c')]);
        assert!(b.matches(&press(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!b.matches(&press(KeyCode::Char('c'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = Binding::new(vec![KeyCode::Enter]).with_help("enter", "submit");
        b.set_enabled(false);
        assert!(!b.enabled());
        assert!(!b.matches(&press(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn test_matches_any() {
        let up = Binding::new(vec![KeyCode::Up]);
        let down = Binding::new(vec![KeyCode::Down]);
        let msg = press(KeyCode::Down, KeyModifiers::NONE);
        assert!(matches(&msg, &[&up, &down]));
        assert!(!matches(&msg, &[&up]));
    }

    #[test]
    fn test_binding_without_keys_is_disabled() {
        let b = Binding::new(Vec::<KeyCode>::new());
        assert!(!b.enabled());
    }
}
