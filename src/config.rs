//! Invitation content and settings.
//!
//! Everything the page displays is described by [`InvitationConfig`], which
//! can be loaded from a TOML file. The defaults describe Tolu and Ade's
//! wedding, so an empty file is a valid configuration.
//!
//! ```rust
//! use invitation_widgets::config::InvitationConfig;
//!
//! let config = InvitationConfig::from_toml_str(r#"
//!     couple = "Ada & Grace"
//!     target = "2026-06-01T15:00:00+02:00"
//! "#).unwrap();
//! assert_eq!(config.couple, "Ada & Grace");
//! assert_eq!(config.target().unwrap().to_rfc3339(), "2026-06-01T15:00:00+02:00");
//! ```

use crate::error::{InvitationError, Result};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The wedding date of the default invitation: 22 November 2025, 1 PM WAT.
pub const DEFAULT_TARGET: &str = "2025-11-22T13:00:00+01:00";

/// [`DEFAULT_TARGET`] as a timestamp.
pub fn default_target() -> DateTime<FixedOffset> {
    // 13:00 WAT
    FixedOffset::east_opt(3600)
        .and_then(|tz| tz.with_ymd_and_hms(2025, 11, 22, 13, 0, 0).single())
        .unwrap_or_else(|| DateTime::<chrono::Utc>::MIN_UTC.fixed_offset())
}

/// One entry in the schedule section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Heading, e.g. "Church Program".
    pub title: String,
    /// When, as displayed.
    pub when: String,
    /// Where, as displayed. May span several lines.
    pub place: String,
}

/// A question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// The question.
    pub question: String,
    /// The answer.
    pub answer: String,
}

/// A well wish shown before any guest has posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishEntry {
    /// Who sent it.
    pub name: String,
    /// The message.
    pub message: String,
}

/// Gift section text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiftSettings {
    /// Currency symbol shown before amounts.
    pub currency: String,
    /// Line shown above the amount input.
    pub intro: String,
    /// Line shown below the amount input.
    pub thanks: String,
}

impl Default for GiftSettings {
    fn default() -> Self {
        Self {
            currency: "₦".to_string(),
            intro: "If you'd like to send a gift, please use the form below to contribute \
                    towards our new beginning."
                .to_string(),
            thanks: "Your generosity is deeply appreciated — thank you for being part of our \
                     journey ❤️"
                .to_string(),
        }
    }
}

/// Complete description of the invitation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvitationConfig {
    /// Names shown in the hero.
    pub couple: String,
    /// Hero tagline.
    pub tagline: String,
    /// Hashtag under the tagline.
    pub hashtag: String,
    /// Moment the countdowns target, RFC 3339 with explicit offset.
    pub target: String,
    /// Schedule entries.
    pub schedule: Vec<ScheduleEntry>,
    /// Colours of the day, by name.
    pub colours: Vec<String>,
    /// Accent colour for headings, as a hex string.
    pub accent: String,
    /// Gallery image captions.
    pub gallery: Vec<String>,
    /// FAQ entries.
    pub faq: Vec<FaqEntry>,
    /// Wishes shown before any are posted.
    pub wishes: Vec<WishEntry>,
    /// Gift section text.
    pub gift: GiftSettings,
}

impl Default for InvitationConfig {
    fn default() -> Self {
        Self {
            couple: "Tolu & Ade".to_string(),
            tagline: "We're getting married 💍".to_string(),
            hashtag: "#FromNovemberTillForever".to_string(),
            target: DEFAULT_TARGET.to_string(),
            schedule: vec![
                ScheduleEntry {
                    title: "Church Program".to_string(),
                    when: "Sat, Nov 22nd 2025 | 1:00 PM (WAT)".to_string(),
                    place: "The Peace Apostolic Church\nAdo-Odo, Ogun State".to_string(),
                },
                ScheduleEntry {
                    title: "Reception".to_string(),
                    when: "Following the church program".to_string(),
                    place: "Opposite Ado-Odo High School".to_string(),
                },
            ],
            colours: vec!["Emerald Green".to_string(), "Gold".to_string()],
            accent: "#1F7A4D".to_string(),
            gallery: vec!["Gallery image 1".to_string(), "Gallery image 2".to_string()],
            faq: default_faq(),
            wishes: default_wishes(),
            gift: GiftSettings::default(),
        }
    }
}

fn faq(question: &str, answer: &str) -> FaqEntry {
    FaqEntry {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

/// The default FAQ: invitations, gifts, children and the colour code.
pub fn default_faq() -> Vec<FaqEntry> {
    vec![
        faq(
            "IS THE WEDDING STRICTLY BY INVITATION?",
            "Yes, the wedding is an intimate celebration for invited guests only. \
             Please bring your invitation for entry.",
        ),
        faq(
            "I WOULD LIKE TO GIFT THE COUPLE, HOW CAN I DO THAT?",
            "You can contribute to our new beginning through the \"Gift Us\" section. \
             We appreciate your generosity!",
        ),
        faq(
            "I AM BRINGING KIDS, IS IT WELCOME?",
            "Yes, you can bring kids! We welcome your little ones to celebrate with us.",
        ),
        faq(
            "WHAT IS THE COLOR CODE?",
            "The color code is emerald green and Gold. Please refer to the colours of the \
             day: emerald green and gold for inspiration.",
        ),
    ]
}

fn wish(name: &str, message: &str) -> WishEntry {
    WishEntry {
        name: name.to_string(),
        message: message.to_string(),
    }
}

/// Sample wishes shown on a fresh page.
pub fn default_wishes() -> Vec<WishEntry> {
    vec![
        wish(
            "JOAN OLUMIDE",
            "Congratulations! Wishing you love and laughter forever. So happy for you both ❤️",
        ),
        wish(
            "SARAH ADENIKE",
            "May your marriage be filled with endless joy, understanding, and beautiful \
             moments together 💕",
        ),
        wish(
            "DAVID OKONKWO",
            "To a lifetime of happiness and love! Cheers to your forever after 🥂",
        ),
        wish(
            "BLESSING CHIAMAKA",
            "Your love story is an inspiration. Wishing you both all the happiness in the \
             world! 💖",
        ),
    ]
}

/// Parses an RFC 3339 timestamp that carries an explicit UTC offset.
pub fn parse_target(value: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value.trim()).map_err(|source| InvitationError::InvalidTarget {
        value: value.to_string(),
        source,
    })
}

impl InvitationConfig {
    /// Parses a TOML document and validates the target moment.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.target()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|source| InvitationError::ConfigIo {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&contents)?;
        log::info!("loaded invitation for {} from {}", config.couple, path.display());
        Ok(config)
    }

    /// The parsed target moment.
    pub fn target(&self) -> Result<DateTime<FixedOffset>> {
        parse_target(&self.target)
    }

    /// Replaces the target after validating it.
    pub fn set_target(&mut self, value: &str) -> Result<()> {
        parse_target(value)?;
        self.target = value.trim().to_string();
        Ok(())
    }
}
