//! Single-line text field used by the invitation forms.
//!
//! A much smaller cousin of a full text input: characters are appended at
//! the end, backspace removes the last one, and control characters are
//! dropped. An optional filter restricts which characters are accepted,
//! which is how the gift amount field only takes digits and a decimal point.

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::prelude::*;

/// Decides whether `c` may be appended to `current`.
pub type AcceptFn = fn(c: char, current: &str) -> bool;

fn accept_any(_: char, _: &str) -> bool {
    true
}

/// Accepts ASCII digits and at most one decimal point.
pub fn accept_amount(c: char, current: &str) -> bool {
    c.is_ascii_digit() || (c == '.' && !current.contains('.'))
}

/// A labelled text field.
#[derive(Debug, Clone)]
pub struct Field {
    /// Shown before the value.
    pub label: String,
    /// Shown faintly while the value is empty.
    pub placeholder: String,
    /// Maximum number of characters; `0` means unlimited.
    pub char_limit: usize,
    value: String,
    focused: bool,
    accept: AcceptFn,
}

impl Field {
    /// Creates an empty, unfocused field.
    pub fn new(label: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            placeholder: placeholder.into(),
            char_limit: 0,
            value: String::new(),
            focused: false,
            accept: accept_any,
        }
    }

    /// Restricts accepted characters.
    pub fn with_filter(mut self, accept: AcceptFn) -> Self {
        self.accept = accept;
        self
    }

    /// Limits the length of the value.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    /// The current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the value, dropping characters the field would not accept.
    pub fn set_value(&mut self, value: &str) {
        self.value.clear();
        for c in value.chars() {
            self.push(c);
        }
    }

    /// Empties the field.
    pub fn reset(&mut self) {
        self.value.clear();
    }

    /// Whether the value is blank after trimming.
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Gives the field keyboard focus.
    pub fn focus(&mut self) {
        self.focused = true;
    }

    /// Removes keyboard focus.
    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Whether the field has focus.
    pub fn focused(&self) -> bool {
        self.focused
    }

    fn push(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if self.char_limit > 0 && self.value.chars().count() >= self.char_limit {
            return false;
        }
        if !(self.accept)(c, &self.value) {
            return false;
        }
        self.value.push(c);
        true
    }

    /// Applies a key press. Returns `true` if the value changed.
    ///
    /// Unfocused fields ignore input.
    pub fn update(&mut self, msg: &KeyMsg) -> bool {
        if !self.focused {
            return false;
        }
        if msg
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        match msg.key {
            KeyCode::Char(c) => self.push(c),
            KeyCode::Backspace => self.value.pop().is_some(),
            _ => false,
        }
    }

    /// Renders `label: value`, with a cursor when focused.
    pub fn view(&self) -> String {
        let label_style = if self.focused {
            Style::new().bold(true)
        } else {
            Style::new().faint(true)
        };
        let body = if self.value.is_empty() {
            Style::new().faint(true).render(&self.placeholder)
        } else {
            self.value.clone()
        };
        let cursor = if self.focused { "▏" } else { "" };
        let label = label_style.render(&format!("{}:", self.label));
        format!("{} {}{}", label, body, cursor)
    }
}
