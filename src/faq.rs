//! Frequently asked questions as an accordion.
//!
//! At most one answer is open at a time. Opening a question closes whichever
//! one was open before; opening the open one closes it.
//!
//! ```rust
//! use invitation_widgets::faq::Model;
//! use invitation_widgets::config::default_faq;
//!
//! let mut faq = Model::new(default_faq());
//! faq.toggle(1);
//! assert_eq!(faq.open(), Some(1));
//! faq.toggle(2);
//! assert_eq!(faq.open(), Some(2));
//! faq.toggle(2);
//! assert_eq!(faq.open(), None);
//! ```

use crate::config::FaqEntry;
use crate::key::{self, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// Key bindings for the accordion.
#[derive(Debug, Clone)]
pub struct FaqKeyMap {
    /// Move to the previous question.
    pub up: Binding,
    /// Move to the next question.
    pub down: Binding,
    /// Open or close the question under the cursor.
    pub toggle: Binding,
}

impl Default for FaqKeyMap {
    fn default() -> Self {
        Self {
            up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]).with_help("↓/j", "down"),
            toggle: Binding::new(vec![KeyCode::Enter, KeyCode::Char(' ')])
                .with_help("enter", "open/close"),
        }
    }
}

impl key::KeyMap for FaqKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.up, &self.down, &self.toggle]
    }
}

/// The accordion state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub keymap: FaqKeyMap,
    items: Vec<FaqEntry>,
    cursor: usize,
    open: Option<usize>,
    focused: bool,
}

impl Model {
    /// Creates a closed accordion with the cursor on the first question.
    pub fn new(items: Vec<FaqEntry>) -> Self {
        Self {
            keymap: FaqKeyMap::default(),
            items,
            cursor: 0,
            open: None,
            focused: false,
        }
    }

    /// The questions.
    pub fn items(&self) -> &[FaqEntry] {
        &self.items
    }

    /// Index of the open question, if any.
    pub fn open(&self) -> Option<usize> {
        self.open
    }

    /// Index under the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Opens `index`, or closes it if it is already open. Out-of-range
    /// indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        self.open = if self.open == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Moves the cursor up, stopping at the first question.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Moves the cursor down, stopping at the last question.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.items.len() {
            self.cursor += 1;
        }
    }

    /// Handles navigation keys while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.up.matches(key_msg) {
                self.cursor_up();
            } else if self.keymap.down.matches(key_msg) {
                self.cursor_down();
            } else if self.keymap.toggle.matches(key_msg) {
                self.toggle(self.cursor);
            }
        }
        None
    }

    /// Renders every question, with the open answer indented beneath.
    pub fn view(&self) -> String {
        let question_style = Style::new().bold(true);
        let answer_style = Style::new().faint(true);

        let mut lines = Vec::with_capacity(self.items.len() + 1);
        for (i, item) in self.items.iter().enumerate() {
            let is_open = self.open == Some(i);
            let marker = if is_open { "▾" } else { "▸" };
            let pointer = if self.focused && i == self.cursor { ">" } else { " " };
            let question = if self.focused && i == self.cursor {
                question_style.clone().render(&item.question)
            } else {
                item.question.clone()
            };
            lines.push(format!("{} {} {}", pointer, marker, question));
            if is_open {
                lines.push(format!("    {}", answer_style.clone().render(&item.answer)));
            }
        }
        lines.join("\n")
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_faq;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_starts_closed() {
        let faq = Model::new(default_faq());
        assert_eq!(faq.open(), None);
        assert_eq!(faq.cursor(), 0);
    }

    #[test]
    fn test_only_one_open() {
        let mut faq = Model::new(default_faq());
        faq.toggle(0);
        faq.toggle(3);
        assert_eq!(faq.open(), Some(3));
    }

    #[test]
    fn test_out_of_range_toggle_is_ignored() {
        let mut faq = Model::new(default_faq());
        faq.toggle(1);
        faq.toggle(99);
        assert_eq!(faq.open(), Some(1));
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut faq = Model::new(default_faq());
        faq.cursor_up();
        assert_eq!(faq.cursor(), 0);
        for _ in 0..10 {
            faq.cursor_down();
        }
        assert_eq!(faq.cursor(), 3);
    }

    #[test]
    fn test_keys_only_when_focused() {
        let mut faq = Model::new(default_faq());
        faq.update(&key(KeyCode::Enter));
        assert_eq!(faq.open(), None);

        faq.focus();
        faq.update(&key(KeyCode::Down));
        faq.update(&key(KeyCode::Enter));
        assert_eq!(faq.open(), Some(1));
        faq.update(&key(KeyCode::Char(' ')));
        assert_eq!(faq.open(), None);
    }

    #[test]
    fn test_view_shows_open_answer_only() {
        let mut faq = Model::new(default_faq());
        faq.toggle(2);
        let view = plain(&faq.view());
        assert!(view.contains("▾ I AM BRINGING KIDS, IS IT WELCOME?"));
        assert!(view.contains("Yes, you can bring kids!"));
        assert!(!view.contains("intimate celebration"));
        assert_eq!(view.lines().count(), 5);
    }

    #[test]
    fn test_empty_accordion() {
        let mut faq = Model::new(Vec::new());
        faq.toggle(0);
        faq.cursor_down();
        assert_eq!(faq.open(), None);
        assert_eq!(faq.view(), "");
    }
}
