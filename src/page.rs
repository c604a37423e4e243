//! The composed invitation page.
//!
//! The hero (names and a compact countdown) and the full countdown are always
//! on screen. Below them one section at a time is shown; `tab` and
//! `shift+tab` move between sections and keys go to the section in view.
//! While a section has a form open it keeps `tab`, `esc` and letters for
//! itself and only `ctrl+c` leaves the page.
//!
//! bubbletea-rs constructs the root model through [`BubbleTeaModel::init`],
//! which takes no arguments, so the binary hands the loaded configuration
//! over with [`install_config`] before the program starts.

use crate::clock::{Clock, SystemClock};
use crate::config::{default_target, InvitationConfig};
use crate::countdown::{self, DisplayMode, ElapsedMsg, TickMsg};
use crate::help;
use crate::key::{self, ctrl, Binding, KeyMap};
use crate::{faq, gallery, gift, photos, rsvp, wishes, Component};
use bubbletea_rs::{batch, quit, Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use crossterm::event::KeyCode;
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use once_cell::sync::OnceCell;
use std::sync::Arc;

static CONFIG: OnceCell<InvitationConfig> = OnceCell::new();

/// Makes `config` the configuration used by [`BubbleTeaModel::init`].
///
/// Only the first call has an effect; returns `false` if a configuration
/// was already installed.
pub fn install_config(config: InvitationConfig) -> bool {
    CONFIG.set(config).is_ok()
}

/// Sections below the countdown, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Church program and reception.
    Schedule,
    /// Photo gallery.
    Gallery,
    /// Guest photo wall.
    Photos,
    /// Well wishes.
    Wishes,
    /// RSVP form.
    Rsvp,
    /// Gift pledge.
    Gift,
    /// Frequently asked questions.
    Faq,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Section; 7] = [
        Section::Schedule,
        Section::Gallery,
        Section::Photos,
        Section::Wishes,
        Section::Rsvp,
        Section::Gift,
        Section::Faq,
    ];

    /// Heading text.
    pub fn title(&self) -> &'static str {
        match self {
            Section::Schedule => "THE SCHEDULE",
            Section::Gallery => "GALLERY",
            Section::Photos => "SHARE YOUR PHOTOS",
            Section::Wishes => "WELL WISHES",
            Section::Rsvp => "RSVP",
            Section::Gift => "GIFT US",
            Section::Faq => "FAQ",
        }
    }

    fn short_title(&self) -> &'static str {
        match self {
            Section::Schedule => "Schedule",
            Section::Gallery => "Gallery",
            Section::Photos => "Photos",
            Section::Wishes => "Wishes",
            Section::Rsvp => "RSVP",
            Section::Gift => "Gift",
            Section::Faq => "FAQ",
        }
    }
}

/// Page-level key bindings.
#[derive(Debug, Clone)]
pub struct PageKeyMap {
    /// Next section.
    pub next_section: Binding,
    /// Previous section.
    pub prev_section: Binding,
    /// Quit.
    pub quit: Binding,
    /// Quit even while a form is open.
    pub force_quit: Binding,
}

impl Default for PageKeyMap {
    fn default() -> Self {
        Self {
            next_section: Binding::new(vec![KeyCode::Tab]).with_help("tab", "next section"),
            prev_section: Binding::new(vec![KeyCode::BackTab])
                .with_help("shift+tab", "prev section"),
            quit: Binding::new(vec![KeyCode::Char('q')]).with_help("q", "quit"),
            force_quit: Binding::new(vec![ctrl('c')]).with_help("ctrl+c", "quit"),
        }
    }
}

impl key::KeyMap for PageKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next_section, &self.quit]
    }
}

/// The whole invitation.
#[derive(Debug)]
pub struct Page {
    /// Page-level key bindings.
    pub keymap: PageKeyMap,
    config: InvitationConfig,
    hero_countdown: countdown::Model,
    countdown: countdown::Model,
    gallery: gallery::Model,
    photos: photos::Model,
    wishes: wishes::Model,
    rsvp: rsvp::Model,
    gift: gift::Model,
    faq: faq::Model,
    help: help::Model,
    section: usize,
    arrived: bool,
    quitting: bool,
}

impl Page {
    /// Builds the page from `config`, reading time from the system clock.
    pub fn new(config: InvitationConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds the page from `config`, reading time from `clock`.
    ///
    /// An invalid target in `config` falls back to the default wedding date
    /// with a warning; [`InvitationConfig::load`] already rejects such files.
    pub fn with_clock(config: InvitationConfig, clock: Arc<dyn Clock>) -> Self {
        let target = config.target().unwrap_or_else(|err| {
            log::warn!("{}; counting down to the default date instead", err);
            default_target()
        });
        let hero_countdown =
            countdown::new_with_clock(target, DisplayMode::Compact, clock.clone());
        let countdown = countdown::new_with_clock(target, DisplayMode::Full, clock);

        let mut page = Self {
            keymap: PageKeyMap::default(),
            gallery: gallery::Model::new(config.gallery.clone()),
            photos: photos::Model::new(),
            wishes: wishes::Model::new(config.wishes.clone()),
            rsvp: rsvp::Model::new(),
            gift: gift::Model::new(config.gift.clone()),
            faq: faq::Model::new(config.faq.clone()),
            help: help::Model::new(),
            config,
            hero_countdown,
            countdown,
            section: 0,
            arrived: false,
            quitting: false,
        };
        page.arrived = page.countdown.elapsed();
        page.focus_section(0);
        page
    }

    /// Starts both countdowns.
    pub fn init_cmd(&self) -> Cmd {
        batch(vec![self.hero_countdown.init(), self.countdown.init()])
    }

    /// The section in view.
    pub fn section(&self) -> Section {
        Section::ALL[self.section]
    }

    /// The compact countdown in the hero.
    pub fn hero_countdown(&self) -> &countdown::Model {
        &self.hero_countdown
    }

    /// The full countdown.
    pub fn countdown(&self) -> &countdown::Model {
        &self.countdown
    }

    /// Whether the page is shutting down.
    pub fn quitting(&self) -> bool {
        self.quitting
    }

    /// The wishes section.
    pub fn wishes(&self) -> &wishes::Model {
        &self.wishes
    }

    /// The RSVP section.
    pub fn rsvp(&self) -> &rsvp::Model {
        &self.rsvp
    }

    /// The FAQ section.
    pub fn faq(&self) -> &faq::Model {
        &self.faq
    }

    /// The gallery section.
    pub fn gallery(&self) -> &gallery::Model {
        &self.gallery
    }

    /// The gift section.
    pub fn gift(&self) -> &gift::Model {
        &self.gift
    }

    /// The photo wall.
    pub fn photos(&self) -> &photos::Model {
        &self.photos
    }

    fn component_mut(&mut self, section: Section) -> Option<&mut dyn Component> {
        match section {
            Section::Schedule => None,
            Section::Gallery => Some(&mut self.gallery),
            Section::Photos => Some(&mut self.photos),
            Section::Wishes => Some(&mut self.wishes),
            Section::Rsvp => Some(&mut self.rsvp),
            Section::Gift => Some(&mut self.gift),
            Section::Faq => Some(&mut self.faq),
        }
    }

    /// Shows section `index`, moving keyboard focus to it.
    pub fn focus_section(&mut self, index: usize) -> Option<Cmd> {
        let current = self.section();
        if let Some(c) = self.component_mut(current) {
            c.blur();
        }
        self.section = index % Section::ALL.len();
        let next = self.section();
        self.component_mut(next).and_then(|c| c.focus())
    }

    /// Shows the next section, wrapping.
    pub fn next_section(&mut self) -> Option<Cmd> {
        self.focus_section(self.section + 1)
    }

    /// Shows the previous section, wrapping.
    pub fn prev_section(&mut self) -> Option<Cmd> {
        self.focus_section(self.section + Section::ALL.len() - 1)
    }

    /// Whether the section in view has a form open.
    pub fn capturing_input(&self) -> bool {
        match self.section() {
            Section::Photos => self.photos.adding(),
            Section::Wishes => self.wishes.composing(),
            Section::Rsvp => self.rsvp.visible(),
            _ => false,
        }
    }

    /// Stops both countdowns and asks the program to exit.
    pub fn shutdown(&mut self) -> Cmd {
        self.hero_countdown.unmount();
        self.countdown.unmount();
        self.quitting = true;
        log::debug!("leaving the invitation");
        quit()
    }

    fn route_to_section(&mut self, msg: &Msg) -> Option<Cmd> {
        match self.section() {
            Section::Schedule => None,
            Section::Gallery => self.gallery.update(msg),
            Section::Photos => self.photos.update(msg),
            Section::Wishes => self.wishes.update(msg),
            Section::Rsvp => self.rsvp.update(msg),
            Section::Gift => self.gift.update(msg),
            Section::Faq => self.faq.update(msg),
        }
    }

    fn update_countdowns(&mut self, msg: &Msg) -> Option<Cmd> {
        let cmds: Vec<Cmd> = [
            self.hero_countdown.update(msg),
            self.countdown.update(msg),
        ]
        .into_iter()
        .flatten()
        .collect();
        match cmds.len() {
            0 => None,
            1 => cmds.into_iter().next(),
            _ => Some(batch(cmds)),
        }
    }

    /// Handles one message.
    pub fn handle(&mut self, msg: &Msg) -> Option<Cmd> {
        if msg.is::<TickMsg>() {
            return self.update_countdowns(msg);
        }

        if let Some(elapsed) = msg.downcast_ref::<ElapsedMsg>() {
            if elapsed.id == self.countdown.id() {
                self.arrived = true;
            }
            return None;
        }

        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.help.width = size.width as usize;
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            let capturing = self.capturing_input();
            let quit_keys = if capturing {
                vec![&self.keymap.force_quit]
            } else {
                vec![&self.keymap.force_quit, &self.keymap.quit]
            };
            if key::matches(key_msg, &quit_keys) {
                return Some(self.shutdown());
            }
            if !capturing {
                if self.keymap.next_section.matches(key_msg) {
                    return self.next_section();
                }
                if self.keymap.prev_section.matches(key_msg) {
                    return self.prev_section();
                }
            }
            return self.route_to_section(msg);
        }

        None
    }

    fn heading(&self, text: &str) -> String {
        Style::new()
            .bold(true)
            .foreground(lipgloss::Color::from(self.config.accent.as_str()))
            .render(text)
    }

    fn hero_view(&self) -> String {
        let lines = vec![
            self.heading(&self.config.couple),
            self.config.tagline.clone(),
            Style::new().faint(true).render(&self.config.hashtag),
            self.hero_countdown.view(),
        ];
        lines.join("\n")
    }

    fn countdown_view(&self) -> String {
        let mut lines = vec![self.heading("THE COUNTDOWN"), self.countdown.view()];
        if self.arrived {
            lines.push(Style::new().italic(true).render("The big day is here!"));
        } else {
            lines.push("Join us as we begin our forever together 💕".to_string());
        }
        lines.join("\n\n")
    }

    fn schedule_view(&self) -> String {
        let mut blocks: Vec<String> = self
            .config
            .schedule
            .iter()
            .map(|entry| {
                format!(
                    "{}\n{}\n{}",
                    Style::new().bold(true).render(&entry.title.to_uppercase()),
                    entry.when,
                    entry.place
                )
            })
            .collect();
        if !self.config.colours.is_empty() {
            blocks.push(format!(
                "{}\n{}",
                Style::new().bold(true).render("COLOURS OF THE DAY"),
                self.config.colours.join(" & ")
            ));
        }
        blocks.join("\n\n")
    }

    fn section_body(&self, section: Section) -> String {
        match section {
            Section::Schedule => self.schedule_view(),
            Section::Gallery => self.gallery.view(),
            Section::Photos => self.photos.view(),
            Section::Wishes => self.wishes.view(),
            Section::Rsvp => self.rsvp.view(),
            Section::Gift => self.gift.view(),
            Section::Faq => self.faq.view(),
        }
    }

    fn section_bar(&self) -> String {
        Section::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| {
                if i == self.section {
                    Style::new().bold(true).reverse(true).render(&format!(" {} ", s.short_title()))
                } else {
                    Style::new().faint(true).render(&format!(" {} ", s.short_title()))
                }
            })
            .collect::<Vec<_>>()
            .join("")
    }

    fn help_view(&self) -> String {
        let section_keys: Option<&dyn KeyMap> = match self.section() {
            Section::Schedule => None,
            Section::Gallery => Some(&self.gallery.keymap),
            Section::Photos => Some(&self.photos.keymap),
            Section::Wishes => Some(&self.wishes.keymap),
            Section::Rsvp => Some(&self.rsvp.keymap),
            Section::Gift => Some(&self.gift.keymap),
            Section::Faq => Some(&self.faq.keymap),
        };
        let mut bindings = section_keys.map(|k| k.short_help()).unwrap_or_default();
        if self.capturing_input() {
            bindings.push(&self.keymap.force_quit);
        } else {
            bindings.extend(self.keymap.short_help());
        }
        self.help.short_help_view(bindings)
    }

    /// Renders the interactive view: hero, countdown, the section in view
    /// and the help footer.
    pub fn view(&self) -> String {
        if self.quitting {
            return String::new();
        }
        let section = self.section();
        [
            self.hero_view(),
            self.countdown_view(),
            self.section_bar(),
            format!("{}\n\n{}", self.heading(section.title()), self.section_body(section)),
            self.help_view(),
        ]
        .join("\n\n")
    }

    /// Renders every section one after another, for non-interactive output.
    pub fn render_all(&self) -> String {
        let mut parts = vec![self.hero_view(), self.countdown_view()];
        for section in Section::ALL {
            parts.push(format!(
                "{}\n\n{}",
                self.heading(section.title()),
                self.section_body(section)
            ));
        }
        parts.join("\n\n")
    }
}

impl BubbleTeaModel for Page {
    fn init() -> (Self, Option<Cmd>) {
        let config = CONFIG.get().cloned().unwrap_or_default();
        let page = Page::new(config);
        let cmd = page.init_cmd();
        (page, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.handle(&msg)
    }

    fn view(&self) -> String {
        Page::view(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
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

    fn page_at(now: chrono::DateTime<Utc>) -> (Page, ManualClock) {
        let clock = ManualClock::new(now);
        let page = Page::with_clock(InvitationConfig::default(), Arc::new(clock.clone()));
        (page, clock)
    }

    fn day_before() -> chrono::DateTime<Utc> {
        // Target is 12:00 UTC on the 22nd.
        Utc.with_ymd_and_hms(2025, 11, 21, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_both_countdowns_start_from_the_clock() {
        let (page, _) = page_at(day_before());
        assert_eq!(page.hero_countdown().remaining().days, 1);
        assert_eq!(page.countdown().remaining().days, 1);
        let view = plain(&page.view());
        assert!(view.contains("1D 0H 0M 0S"));
        assert!(view.contains("DAYS"));
    }

    #[test]
    fn test_ticks_reach_the_right_countdown() {
        let (mut page, clock) = page_at(day_before());
        clock.advance(ChronoDuration::seconds(1));

        let hero_tick: Msg = Box::new(page.hero_countdown().tick_msg());
        assert!(page.handle(&hero_tick).is_some());

        assert_eq!(page.hero_countdown().remaining().hours, 23);
        assert_eq!(page.countdown().remaining().days, 1);
    }

    #[test]
    fn test_tab_cycles_sections() {
        let (mut page, _) = page_at(day_before());
        assert_eq!(page.section(), Section::Schedule);
        page.handle(&key(KeyCode::Tab));
        assert_eq!(page.section(), Section::Gallery);
        assert!(page.gallery().focused());
        page.handle(&key(KeyCode::BackTab));
        page.handle(&key(KeyCode::BackTab));
        assert_eq!(page.section(), Section::Faq);
        assert!(!page.gallery().focused());
    }

    #[test]
    fn test_keys_go_to_the_section_in_view() {
        let (mut page, _) = page_at(day_before());
        page.focus_section(6);
        page.handle(&key(KeyCode::Enter));
        assert_eq!(page.faq().open(), Some(0));
    }

    #[test]
    fn test_open_form_keeps_tab_and_q() {
        let (mut page, _) = page_at(day_before());
        page.focus_section(3);
        page.handle(&key(KeyCode::Char('p')));
        assert!(page.capturing_input());

        page.handle(&key(KeyCode::Char('q')));
        page.handle(&key(KeyCode::Tab));
        assert!(!page.quitting());
        assert_eq!(page.section(), Section::Wishes);

        let force: Msg = Box::new(KeyMsg {
            key: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        });
        assert!(page.handle(&force).is_some());
        assert!(page.quitting());
    }

    #[test]
    fn test_quit_unmounts_countdowns() {
        let (mut page, _) = page_at(day_before());
        let pending: Msg = Box::new(page.countdown().tick_msg());
        assert!(page.handle(&key(KeyCode::Char('q'))).is_some());
        assert!(!page.countdown().mounted());
        assert!(!page.hero_countdown().mounted());
        assert!(page.handle(&pending).is_none());
        assert_eq!(page.view(), "");
    }

    #[test]
    fn test_arrival_message() {
        let (mut page, clock) = page_at(day_before());
        clock.advance(ChronoDuration::days(2));
        let tick: Msg = Box::new(page.countdown().tick_msg());
        assert!(page.handle(&tick).is_some());

        let elapsed: Msg = Box::new(ElapsedMsg {
            id: page.countdown().id(),
        });
        page.handle(&elapsed);
        assert!(plain(&page.view()).contains("The big day is here!"));
    }

    #[test]
    fn test_last_second_is_not_arrival() {
        let almost = Utc.with_ymd_and_hms(2025, 11, 22, 11, 59, 59).unwrap()
            + ChronoDuration::milliseconds(500);
        let (page, _) = page_at(almost);
        let view = plain(&page.view());
        assert!(view.contains("0D 0H 0M 0S"));
        assert!(!view.contains("The big day is here!"));
        assert!(!page.countdown().elapsed());
    }

    #[test]
    fn test_past_target_starts_arrived() {
        let (page, _) = page_at(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
        assert!(plain(&page.view()).contains("0D 0H 0M 0S"));
        assert!(plain(&page.view()).contains("The big day is here!"));
    }

    #[test]
    fn test_render_all_has_every_section() {
        let (page, _) = page_at(day_before());
        let all = plain(&page.render_all());
        for section in Section::ALL {
            assert!(all.contains(section.title()), "missing {}", section.title());
        }
        assert!(all.contains("The Peace Apostolic Church"));
    }

    #[test]
    fn test_invalid_target_falls_back() {
        let mut config = InvitationConfig::default();
        config.target = "whenever".to_string();
        let page = Page::with_clock(config, Arc::new(ManualClock::new(day_before())));
        assert_eq!(page.countdown().target(), default_target());
    }

    #[test]
    fn test_help_follows_section() {
        let (mut page, _) = page_at(day_before());
        page.focus_section(1);
        let help = plain(&page.help_view());
        assert!(help.contains("next tab"));
        assert!(help.contains("q quit"));
    }
}
