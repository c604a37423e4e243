//! Well wishes from guests.
//!
//! Collapsed, the section shows one wish at a time and the guest can step
//! through them. "View all" lists every wish. Guests can post a new wish,
//! which goes to the top of the list; nothing leaves the process.

use crate::config::WishEntry;
use crate::error::{InvitationError, Result};
use crate::field::Field;
use crate::key::{self, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// A posted wish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wish {
    /// Sequence number; the n-th wish has id n.
    pub id: u64,
    /// Sender name, upper-cased.
    pub name: String,
    /// The message.
    pub message: String,
}

/// Key bindings for the wishes section.
#[derive(Debug, Clone)]
pub struct WishesKeyMap {
    /// Previous wish in the carousel.
    pub prev: Binding,
    /// Next wish in the carousel.
    pub next: Binding,
    /// Toggle between one wish and all wishes.
    pub show_all: Binding,
    /// Open the post form.
    pub compose: Binding,
    /// Move between form fields.
    pub next_field: Binding,
    /// Post the wish.
    pub submit: Binding,
    /// Close the form without posting.
    pub cancel: Binding,
}

impl Default for WishesKeyMap {
    fn default() -> Self {
        let mut keymap = Self {
            prev: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')]).with_help("←/h", "prev"),
            next: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')]).with_help("→/l", "next"),
            show_all: Binding::new(vec![KeyCode::Char('v')]).with_help("v", "view all"),
            compose: Binding::new(vec![KeyCode::Char('p')]).with_help("p", "post a wish"),
            next_field: Binding::new(vec![KeyCode::Tab, KeyCode::Down, KeyCode::Up])
                .with_help("tab", "next field"),
            submit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "post"),
            cancel: Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        };
        keymap.set_composing(false);
        keymap
    }
}

impl WishesKeyMap {
    fn set_composing(&mut self, composing: bool) {
        self.prev.set_enabled(!composing);
        self.next.set_enabled(!composing);
        self.show_all.set_enabled(!composing);
        self.compose.set_enabled(!composing);
        self.next_field.set_enabled(composing);
        self.submit.set_enabled(composing);
        self.cancel.set_enabled(composing);
    }
}

impl key::KeyMap for WishesKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.prev,
            &self.next,
            &self.show_all,
            &self.compose,
            &self.next_field,
            &self.submit,
            &self.cancel,
        ]
    }
}

/// Wishes section state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub keymap: WishesKeyMap,
    wishes: Vec<Wish>,
    current: usize,
    show_all: bool,
    composing: bool,
    name: Field,
    message: Field,
    notice: Option<String>,
    focused: bool,
}

impl Model {
    /// Creates the section from seed wishes, first entry on top.
    pub fn new(seed: Vec<WishEntry>) -> Self {
        let wishes = seed
            .into_iter()
            .enumerate()
            .map(|(i, w)| Wish {
                id: i as u64 + 1,
                name: w.name,
                message: w.message,
            })
            .collect();
        Self {
            keymap: WishesKeyMap::default(),
            wishes,
            current: 0,
            show_all: false,
            composing: false,
            name: Field::new("Name", "Your name").with_char_limit(60),
            message: Field::new("Message", "Your wish for the couple").with_char_limit(280),
            notice: None,
            focused: false,
        }
    }

    /// All wishes, newest first.
    pub fn wishes(&self) -> &[Wish] {
        &self.wishes
    }

    /// The wish shown in the collapsed view.
    pub fn current(&self) -> Option<&Wish> {
        self.wishes.get(self.current)
    }

    /// Whether every wish is listed.
    pub fn showing_all(&self) -> bool {
        self.show_all
    }

    /// Whether the post form is open.
    pub fn composing(&self) -> bool {
        self.composing
    }

    /// Switches between the single-wish carousel and the full list.
    pub fn toggle_show_all(&mut self) {
        self.show_all = !self.show_all;
    }

    /// Steps the carousel forward, wrapping.
    pub fn next(&mut self) {
        if !self.wishes.is_empty() {
            self.current = (self.current + 1) % self.wishes.len();
        }
    }

    /// Steps the carousel back, wrapping.
    pub fn prev(&mut self) {
        if !self.wishes.is_empty() {
            self.current = (self.current + self.wishes.len() - 1) % self.wishes.len();
        }
    }

    /// Opens the post form and collapses the list.
    pub fn open_form(&mut self) {
        self.composing = true;
        self.show_all = false;
        self.notice = None;
        self.name.focus();
        self.message.blur();
        self.keymap.set_composing(true);
    }

    /// Closes the post form, keeping whatever was typed.
    pub fn close_form(&mut self) {
        self.composing = false;
        self.name.blur();
        self.message.blur();
        self.keymap.set_composing(false);
    }

    /// Fills the form fields.
    pub fn set_draft(&mut self, name: &str, message: &str) {
        self.name.set_value(name);
        self.message.set_value(message);
    }

    /// Posts the drafted wish.
    ///
    /// Both fields must be non-blank. On success the wish is prepended with
    /// an upper-cased name, the form is cleared and closed, and the carousel
    /// shows the new wish.
    pub fn post(&mut self) -> Result<&Wish> {
        if self.name.is_blank() {
            return Err(InvitationError::EmptyField("Name"));
        }
        if self.message.is_blank() {
            return Err(InvitationError::EmptyField("Message"));
        }

        let wish = Wish {
            id: self.wishes.len() as u64 + 1,
            name: self.name.value().trim().to_uppercase(),
            message: self.message.value().trim().to_string(),
        };
        log::info!("wish posted by {}", wish.name);

        self.wishes.insert(0, wish);
        self.current = 0;
        self.name.reset();
        self.message.reset();
        self.close_form();
        Ok(&self.wishes[0])
    }

    fn switch_field(&mut self) {
        if self.name.focused() {
            self.name.blur();
            self.message.focus();
        } else {
            self.message.blur();
            self.name.focus();
        }
    }

    fn update_form(&mut self, key_msg: &KeyMsg) {
        if self.keymap.cancel.matches(key_msg) {
            self.close_form();
        } else if self.keymap.next_field.matches(key_msg) {
            self.switch_field();
        } else if self.keymap.submit.matches(key_msg) {
            match self.post() {
                Ok(_) => self.notice = Some("Thank you for your wish!".to_string()),
                Err(err) => {
                    log::warn!("wish rejected: {}", err);
                    self.notice = Some(err.to_string());
                }
            }
        } else {
            self.name.update(key_msg);
            self.message.update(key_msg);
        }
    }

    /// Handles keys while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.composing {
            self.update_form(key_msg);
        } else if self.keymap.next.matches(key_msg) {
            self.next();
        } else if self.keymap.prev.matches(key_msg) {
            self.prev();
        } else if self.keymap.show_all.matches(key_msg) {
            self.toggle_show_all();
        } else if self.keymap.compose.matches(key_msg) {
            self.open_form();
        }
        None
    }

    fn render_wish(wish: &Wish) -> String {
        format!(
            "{}\n{}",
            Style::new().bold(true).render(&wish.name),
            wish.message
        )
    }

    /// Renders the carousel, the full list, or the post form.
    pub fn view(&self) -> String {
        let mut out = Vec::new();

        if self.composing {
            out.push(self.name.view());
            out.push(self.message.view());
        } else if self.show_all {
            for wish in &self.wishes {
                out.push(Self::render_wish(wish));
            }
            out.push(Style::new().faint(true).render("v show less"));
        } else if let Some(wish) = self.current() {
            out.push(Self::render_wish(wish));
            out.push(
                Style::new()
                    .faint(true)
                    .render(&format!("{}/{}  v view all", self.current + 1, self.wishes.len())),
            );
        } else {
            out.push(Style::new().faint(true).render("Be the first to send a wish."));
        }

        if let Some(notice) = &self.notice {
            out.push(Style::new().italic(true).render(notice));
        }

        out.join("\n\n")
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
