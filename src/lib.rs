#![warn(missing_docs)]

//! # invitation-widgets
//!
//! A terminal wedding invitation built on [bubbletea-rs](https://github.com/joshka/bubbletea-rs).
//!
//! The centre of the page is a countdown to the ceremony, shown twice: a
//! single line under the couple's names and a section of four labelled
//! blocks. Around it sit the schedule, a gallery, a guest photo wall, well
//! wishes, an RSVP form, a gift pledge and an FAQ accordion.
//!
//! ## Components
//!
//! - [`countdown`]: live time remaining until a fixed moment
//! - [`faq`], [`gallery`], [`wishes`], [`rsvp`], [`gift`], [`photos`]: page sections
//! - [`help`], [`key`], [`field`]: key bindings, the help footer and a one-line input
//! - [`page`]: the composed invitation, a bubbletea-rs `Model`
//!
//! Every section implements [`Component`] so the page can move keyboard
//! focus between them:
//!
//! ```rust
//! use invitation_widgets::prelude::*;
//! use invitation_widgets::config::FaqEntry;
//!
//! let mut faq = Faq::new(vec![FaqEntry {
//!     question: "Is there parking?".into(),
//!     answer: "Yes.".into(),
//! }]);
//! let _ = faq.focus();
//! assert!(faq.focused());
//! faq.blur();
//! assert!(!faq.focused());
//! ```
//!
//! ## Running the page
//!
//! ```rust,no_run
//! use invitation_widgets::config::InvitationConfig;
//! use invitation_widgets::page::{install_config, Page};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! install_config(InvitationConfig::default());
//! let program = bubbletea_rs::Program::<Page>::builder().alt_screen(true).build()?;
//! program.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod clock;
pub mod config;
pub mod countdown;
pub mod error;
pub mod faq;
pub mod field;
pub mod gallery;
pub mod gift;
pub mod help;
pub mod key;
pub mod page;
pub mod photos;
pub mod rsvp;
pub mod wishes;

use bubbletea_rs::Cmd;

/// Keyboard focus for page sections.
///
/// A focused section receives key messages and may show a cursor or
/// selection; a blurred one ignores keys and renders passively.
pub trait Component {
    /// Gives the component keyboard focus.
    ///
    /// May return a command to run on focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes keyboard focus away.
    fn blur(&mut self);

    /// Whether the component has keyboard focus.
    fn focused(&self) -> bool;
}

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::InvitationConfig;
pub use countdown::{
    new as countdown_new, new_with_clock as countdown_new_with_clock, remaining_between,
    DisplayMode, ElapsedMsg as CountdownElapsedMsg, Model as Countdown, Remaining,
    TickMsg as CountdownTickMsg,
};
pub use error::{InvitationError, Result};
pub use faq::Model as Faq;
pub use field::Field;
pub use gallery::Model as Gallery;
pub use gift::{GiftPledge, Model as Gift};
pub use help::Model as HelpModel;
pub use key::{matches, Binding, Help as KeyHelp, KeyMap, KeyPress};
pub use page::{install_config, Page, Section};
pub use photos::{Model as Photos, Photo};
pub use rsvp::{Attendance, Model as Rsvp, RsvpResponse};
pub use wishes::{Model as Wishes, Wish};

/// Commonly used types in one import.
///
/// ```rust
/// use invitation_widgets::prelude::*;
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::config::InvitationConfig;
    pub use crate::countdown::{
        new as countdown_new, DisplayMode, ElapsedMsg as CountdownElapsedMsg,
        Model as Countdown, Remaining,
    };
    pub use crate::error::InvitationError;
    pub use crate::faq::Model as Faq;
    pub use crate::gallery::Model as Gallery;
    pub use crate::gift::Model as Gift;
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::page::{Page, Section};
    pub use crate::photos::Model as Photos;
    pub use crate::rsvp::Model as Rsvp;
    pub use crate::wishes::Model as Wishes;
    pub use crate::Component;
}
