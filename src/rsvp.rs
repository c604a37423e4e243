//! RSVP form.
//!
//! Hidden behind a "Fill RSVP Form" prompt until the guest opens it. On a
//! valid submission the guest is thanked by first name and the form is reset
//! and hidden again. Responses are only logged.

use crate::error::{InvitationError, Result};
use crate::field::Field;
use crate::key::{self, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// Whether the guest will attend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attendance {
    /// "Yes, I'll be there!"
    Yes,
    /// "Sorry, I can't make it"
    No,
}

impl Attendance {
    fn label(&self) -> &'static str {
        match self {
            Attendance::Yes => "Yes, I'll be there!",
            Attendance::No => "Sorry, I can't make it",
        }
    }
}

/// A submitted response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsvpResponse {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Attendance answer.
    pub attending: Attendance,
    /// Optional message or song request.
    pub message: String,
}

impl RsvpResponse {
    /// Thank-you line for the guest.
    pub fn confirmation(&self) -> String {
        format!("Thank you for your RSVP, {}!", self.first_name)
    }
}

const FIRST_NAME: usize = 0;
const LAST_NAME: usize = 1;
const EMAIL: usize = 2;
const PHONE: usize = 3;
const ATTENDING: usize = 4;
const MESSAGE: usize = 5;
const ROWS: usize = 6;

/// Key bindings for the RSVP section.
#[derive(Debug, Clone)]
pub struct RsvpKeyMap {
    /// Show the form.
    pub open: Binding,
    /// Next row.
    pub next_field: Binding,
    /// Previous row.
    pub prev_field: Binding,
    /// Change the attendance answer.
    pub choose: Binding,
    /// Submit.
    pub submit: Binding,
    /// Hide the form.
    pub cancel: Binding,
}

impl Default for RsvpKeyMap {
    fn default() -> Self {
        let mut keymap = Self {
            open: Binding::new(vec![KeyCode::Enter, KeyCode::Char('r')])
                .with_help("r", "fill RSVP form"),
            next_field: Binding::new(vec![KeyCode::Tab, KeyCode::Down])
                .with_help("tab", "next field"),
            prev_field: Binding::new(vec![KeyCode::BackTab, KeyCode::Up])
                .with_help("shift+tab", "prev field"),
            choose: Binding::new(vec![KeyCode::Left, KeyCode::Right])
                .with_help("←/→", "yes/no"),
            submit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "submit RSVP"),
            cancel: Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        };
        keymap.set_editing(false);
        keymap
    }
}

impl RsvpKeyMap {
    fn set_editing(&mut self, editing: bool) {
        self.open.set_enabled(!editing);
        self.next_field.set_enabled(editing);
        self.prev_field.set_enabled(editing);
        self.choose.set_enabled(editing);
        self.submit.set_enabled(editing);
        self.cancel.set_enabled(editing);
    }
}

impl key::KeyMap for RsvpKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.open,
            &self.next_field,
            &self.choose,
            &self.submit,
            &self.cancel,
        ]
    }
}

/// RSVP section state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub keymap: RsvpKeyMap,
    fields: [Field; 5],
    attending: Option<Attendance>,
    row: usize,
    visible: bool,
    notice: Option<String>,
    focused: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates a hidden, empty form.
    pub fn new() -> Self {
        Self {
            keymap: RsvpKeyMap::default(),
            fields: [
                Field::new("First Name", "").with_char_limit(60),
                Field::new("Last Name", "").with_char_limit(60),
                Field::new("Email Address", "").with_char_limit(120),
                Field::new("Phone Number", "").with_char_limit(30),
                Field::new("Message", "Message / Song request").with_char_limit(280),
            ],
            attending: None,
            row: FIRST_NAME,
            visible: false,
            notice: None,
            focused: false,
        }
    }

    fn field_index(row: usize) -> Option<usize> {
        match row {
            FIRST_NAME | LAST_NAME | EMAIL | PHONE => Some(row),
            MESSAGE => Some(4),
            _ => None,
        }
    }

    /// Whether the form is shown.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// The attendance answer, if chosen.
    pub fn attending(&self) -> Option<Attendance> {
        self.attending
    }

    /// Sets the attendance answer.
    pub fn set_attending(&mut self, attending: Option<Attendance>) {
        self.attending = attending;
    }

    /// Fills the text fields in order: first name, last name, email, phone,
    /// message.
    pub fn fill(&mut self, first: &str, last: &str, email: &str, phone: &str, message: &str) {
        for (field, value) in self.fields.iter_mut().zip([first, last, email, phone, message]) {
            field.set_value(value);
        }
    }

    /// Shows the form with the first field focused.
    pub fn show(&mut self) {
        self.visible = true;
        self.notice = None;
        self.focus_row(FIRST_NAME);
        self.keymap.set_editing(true);
    }

    /// Hides the form, keeping its contents.
    pub fn hide(&mut self) {
        self.visible = false;
        for field in self.fields.iter_mut() {
            field.blur();
        }
        self.keymap.set_editing(false);
    }

    fn focus_row(&mut self, row: usize) {
        self.row = row;
        for field in self.fields.iter_mut() {
            field.blur();
        }
        if let Some(i) = Self::field_index(row) {
            self.fields[i].focus();
        }
    }

    fn reset(&mut self) {
        for field in self.fields.iter_mut() {
            field.reset();
        }
        self.attending = None;
    }

    /// Validates and records the response.
    ///
    /// Every field except the message is required. On success the form is
    /// cleared and hidden.
    pub fn submit(&mut self) -> Result<RsvpResponse> {
        let required = [
            (FIRST_NAME, "First Name"),
            (LAST_NAME, "Last Name"),
            (EMAIL, "Email Address"),
            (PHONE, "Phone Number"),
        ];
        for (i, name) in required {
            if self.fields[i].is_blank() {
                return Err(InvitationError::EmptyField(name));
            }
        }
        let attending = self
            .attending
            .ok_or(InvitationError::EmptyField("Attendance"))?;

        let value = |i: usize| self.fields[i].value().trim().to_string();
        let response = RsvpResponse {
            first_name: value(FIRST_NAME),
            last_name: value(LAST_NAME),
            email: value(EMAIL),
            phone: value(PHONE),
            attending,
            message: value(4),
        };
        log::info!(
            "RSVP from {} {}: {:?}",
            response.first_name,
            response.last_name,
            response.attending
        );

        self.reset();
        self.hide();
        self.notice = Some(response.confirmation());
        Ok(response)
    }

    fn update_form(&mut self, key_msg: &KeyMsg) {
        if self.keymap.cancel.matches(key_msg) {
            self.hide();
        } else if self.keymap.next_field.matches(key_msg) {
            self.focus_row((self.row + 1) % ROWS);
        } else if self.keymap.prev_field.matches(key_msg) {
            self.focus_row((self.row + ROWS - 1) % ROWS);
        } else if self.row == ATTENDING && self.keymap.choose.matches(key_msg) {
            self.attending = match self.attending {
                Some(Attendance::Yes) => Some(Attendance::No),
                _ => Some(Attendance::Yes),
            };
        } else if self.keymap.submit.matches(key_msg) {
            if let Err(err) = self.submit() {
                log::warn!("RSVP rejected: {}", err);
                self.notice = Some(err.to_string());
            }
        } else if let Some(i) = Self::field_index(self.row) {
            self.fields[i].update(key_msg);
        }
    }

    /// Handles keys while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.visible {
            self.update_form(key_msg);
        } else if self.keymap.open.matches(key_msg) {
            self.show();
        }
        None
    }

    /// Renders the prompt or the form, plus the last notice.
    pub fn view(&self) -> String {
        let mut out = Vec::new();
        if self.visible {
            for row in 0..ROWS {
                if row == ATTENDING {
                    let choice = self
                        .attending
                        .map(|a| a.label())
                        .unwrap_or("Will you attend?");
                    let label = if self.row == ATTENDING {
                        Style::new().bold(true).render("Attending:")
                    } else {
                        Style::new().faint(true).render("Attending:")
                    };
                    out.push(format!("{} ‹ {} ›", label, choice));
                } else if let Some(i) = Self::field_index(row) {
                    out.push(self.fields[i].view());
                }
            }
            out.push(Style::new().faint(true).render(
                "By submitting, you confirm attendance and agree to the event guidelines.",
            ));
        } else {
            out.push("Please confirm your attendance".to_string());
            out.push(Style::new().bold(true).render("[ Fill RSVP Form ]"));
        }
        if let Some(notice) = &self.notice {
            out.push(Style::new().italic(true).render(notice));
        }
        out.join("\n")
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
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn type_str(model: &mut Model, s: &str) {
        for c in s.chars() {
            model.update(&key(KeyCode::Char(c)));
        }
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    fn filled() -> Model {
        let mut m = Model::new();
        m.show();
        m.fill("Ada", "Lovelace", "ada@example.com", "0800", "Play some jazz");
        m.set_attending(Some(Attendance::Yes));
        m
    }

    #[test]
    fn test_hidden_until_opened() {
        let m = Model::new();
        assert!(!m.visible());
        assert!(plain(&m.view()).contains("Fill RSVP Form"));
    }

    #[test]
    fn test_submit_thanks_and_resets() {
        let mut m = filled();
        let response = m.submit().unwrap();
        assert_eq!(response.confirmation(), "Thank you for your RSVP, Ada!");
        assert_eq!(response.message, "Play some jazz");
        assert!(!m.visible());
        assert_eq!(m.attending(), None);
        assert!(plain(&m.view()).contains("Thank you for your RSVP, Ada!"));

        m.show();
        assert!(m.submit().is_err());
    }

    #[test]
    fn test_required_fields() {
        let mut m = filled();
        m.fill("Ada", "Lovelace", " ", "0800", "");
        assert!(matches!(
            m.submit(),
            Err(InvitationError::EmptyField("Email Address"))
        ));

        let mut m = filled();
        m.set_attending(None);
        assert!(matches!(
            m.submit(),
            Err(InvitationError::EmptyField("Attendance"))
        ));
        assert!(m.visible());
    }

    #[test]
    fn test_message_is_optional() {
        let mut m = filled();
        m.fill("Ada", "Lovelace", "ada@example.com", "0800", "");
        assert!(m.submit().is_ok());
    }

    #[test]
    fn test_keyboard_flow() {
        let mut m = Model::new();
        m.focus();
        m.update(&key(KeyCode::Char('r')));
        assert!(m.visible());

        for value in ["Grace", "Hopper", "grace@example.com", "0801"] {
            type_str(&mut m, value);
            m.update(&key(KeyCode::Tab));
        }
        m.update(&key(KeyCode::Right));
        assert_eq!(m.attending(), Some(Attendance::Yes));
        m.update(&key(KeyCode::Right));
        assert_eq!(m.attending(), Some(Attendance::No));

        m.update(&key(KeyCode::Enter));
        assert!(!m.visible());
        assert!(plain(&m.view()).contains("Thank you for your RSVP, Grace!"));
    }

    #[test]
    fn test_rejected_submit_shows_reason() {
        let mut m = Model::new();
        m.focus();
        m.update(&key(KeyCode::Char('r')));
        m.update(&key(KeyCode::Enter));
        assert!(m.visible());
        assert!(plain(&m.view()).contains("First Name is required"));
    }

    #[test]
    fn test_cancel_hides_form() {
        let mut m = Model::new();
        m.focus();
        m.update(&key(KeyCode::Char('r')));
        type_str(&mut m, "Ada");
        m.update(&key(KeyCode::Esc));
        assert!(!m.visible());
    }
}
