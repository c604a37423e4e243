//! "Gift Us" section.
//!
//! Guests type an amount and press enter. The amount is validated and the
//! pledge is acknowledged locally; no payment provider is contacted.

use crate::config::GiftSettings;
use crate::error::{InvitationError, Result};
use crate::field::{accept_amount, Field};
use crate::key::{self, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// An accepted gift pledge.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftPledge {
    /// Pledged amount.
    pub amount: f64,
    /// Currency symbol it was entered in.
    pub currency: String,
}

impl GiftPledge {
    /// Acknowledgement shown to the guest.
    pub fn receipt(&self) -> String {
        format!(
            "Thank you! Your gift of {}{:.2} has been noted. (Demo: no payment was processed.)",
            self.currency, self.amount
        )
    }
}

/// Parses a gift amount. Blank, non-numeric, non-finite and non-positive
/// amounts are rejected.
pub fn parse_amount(input: &str) -> Result<f64> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| InvitationError::InvalidAmount)?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(InvitationError::InvalidAmount);
    }
    Ok(amount)
}

/// Key bindings for the gift section.
#[derive(Debug, Clone)]
pub struct GiftKeyMap {
    /// Send the gift.
    pub send: Binding,
    /// Clear the amount.
    pub clear: Binding,
}

impl Default for GiftKeyMap {
    fn default() -> Self {
        Self {
            send: Binding::new(vec![KeyCode::Enter]).with_help("enter", "send gift"),
            clear: Binding::new(vec![KeyCode::Esc]).with_help("esc", "clear"),
        }
    }
}

impl key::KeyMap for GiftKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.send, &self.clear]
    }
}

/// Gift section state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub keymap: GiftKeyMap,
    settings: GiftSettings,
    amount: Field,
    last: Option<std::result::Result<GiftPledge, String>>,
}

impl Model {
    /// Creates the section with an empty amount.
    pub fn new(settings: GiftSettings) -> Self {
        let amount = Field::new(
            "Amount",
            format!("Enter Amount ({})", settings.currency),
        )
        .with_filter(accept_amount)
        .with_char_limit(15);
        Self {
            keymap: GiftKeyMap::default(),
            settings,
            amount,
            last: None,
        }
    }

    /// The typed amount.
    pub fn amount(&self) -> &str {
        self.amount.value()
    }

    /// Replaces the typed amount.
    pub fn set_amount(&mut self, value: &str) {
        self.amount.set_value(value);
    }

    /// Outcome of the last send, if any.
    pub fn last_outcome(&self) -> Option<&std::result::Result<GiftPledge, String>> {
        self.last.as_ref()
    }

    /// Validates and records the pledge, clearing the amount on success.
    pub fn send(&mut self) -> Result<GiftPledge> {
        let outcome = parse_amount(self.amount.value()).map(|amount| GiftPledge {
            amount,
            currency: self.settings.currency.clone(),
        });
        match &outcome {
            Ok(pledge) => {
                log::info!("gift pledged: {}{:.2}", pledge.currency, pledge.amount);
                self.amount.reset();
                self.last = Some(Ok(pledge.clone()));
            }
            Err(err) => {
                log::warn!("gift rejected: {:?} ({})", self.amount.value(), err);
                self.last = Some(Err(err.to_string()));
            }
        }
        outcome
    }

    /// Handles typing and sending while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.amount.focused() {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.keymap.send.matches(key_msg) {
            let _ = self.send();
        } else if self.keymap.clear.matches(key_msg) {
            self.amount.reset();
            self.last = None;
        } else {
            self.amount.update(key_msg);
        }
        None
    }

    /// Renders the intro, input and last outcome.
    pub fn view(&self) -> String {
        let mut out = vec![self.settings.intro.clone(), self.amount.view()];
        match &self.last {
            Some(Ok(pledge)) => out.push(Style::new().italic(true).render(&pledge.receipt())),
            Some(Err(message)) => out.push(Style::new().italic(true).render(message)),
            None => {}
        }
        out.push(Style::new().faint(true).render(&self.settings.thanks));
        out.join("\n\n")
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.amount.focus();
        None
    }

    fn blur(&mut self) {
        self.amount.blur();
    }

    fn focused(&self) -> bool {
        self.amount.focused()
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

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("5000").unwrap(), 5000.0);
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        for bad in ["", "   ", "0", "0.0", "-3", "abc", "inf", "NaN"] {
            assert!(
                matches!(parse_amount(bad), Err(InvitationError::InvalidAmount)),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_send_clears_on_success() {
        let mut gift = Model::new(GiftSettings::default());
        gift.set_amount("2500");
        let pledge = gift.send().unwrap();
        assert_eq!(pledge.amount, 2500.0);
        assert_eq!(pledge.currency, "₦");
        assert_eq!(gift.amount(), "");
        assert!(matches!(gift.last_outcome(), Some(Ok(_))));
    }

    #[test]
    fn test_send_keeps_input_on_failure() {
        let mut gift = Model::new(GiftSettings::default());
        gift.set_amount("0");
        assert!(gift.send().is_err());
        assert_eq!(gift.amount(), "0");
        assert!(plain(&gift.view()).contains("Please enter a valid amount"));
    }

    #[test]
    fn test_keyboard_flow() {
        let mut gift = Model::new(GiftSettings::default());
        gift.focus();
        for c in "1x0.5".chars() {
            gift.update(&key(KeyCode::Char(c)));
        }
        assert_eq!(gift.amount(), "10.5");
        gift.update(&key(KeyCode::Enter));
        assert!(plain(&gift.view()).contains("₦10.50"));

        gift.update(&key(KeyCode::Esc));
        assert!(gift.last_outcome().is_none());
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut gift = Model::new(GiftSettings::default());
        gift.update(&key(KeyCode::Char('5')));
        assert_eq!(gift.amount(), "");
    }
}
