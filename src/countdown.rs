//! Countdown component for Bubble Tea applications.
//!
//! A countdown shows how long remains until a fixed target moment, broken
//! down into days, hours, minutes and seconds. The value is computed from the
//! wall clock when the component is created and again on every tick, once a
//! second, for as long as the component is mounted. Once the target has
//! passed the countdown holds at zero.
//!
//! # Basic Usage
//!
//! ```rust
//! use invitation_widgets::countdown::{new, DisplayMode};
//! use chrono::DateTime;
//!
//! let target = DateTime::parse_from_rfc3339("2025-11-22T13:00:00+01:00").unwrap();
//!
//! // Single-line "12D 3H 4M 5S" rendering
//! let hero = new(target, DisplayMode::Compact);
//!
//! // Four labelled blocks
//! let section = new(target, DisplayMode::Full);
//! assert_ne!(hero.id(), section.id());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use invitation_widgets::countdown::{new, DisplayMode, ElapsedMsg, Model};
//! use chrono::DateTime;
//!
//! struct App {
//!     countdown: Model,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let target = DateTime::parse_from_rfc3339("2030-01-01T00:00:00Z").unwrap();
//!         let countdown = new(target, DisplayMode::Compact);
//!         let cmd = countdown.init();
//!         (Self { countdown }, Some(cmd))
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(elapsed) = msg.downcast_ref::<ElapsedMsg>() {
//!             if elapsed.id == self.countdown.id() {
//!                 // The big day has arrived.
//!             }
//!         }
//!         self.countdown.update(&msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.countdown.view()
//!     }
//! }
//! ```
//!
//! # Lifecycle
//!
//! [`Model::init`] schedules the first tick. Each accepted tick recomputes the
//! remaining time and schedules the next one, so exactly one tick is in
//! flight per mounted countdown. [`Model::unmount`] cancels the cadence:
//! the in-flight tick is rejected when it arrives and nothing further is
//! scheduled. [`Model::mount`] restarts it.

use crate::clock::{Clock, SystemClock};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use chrono::{DateTime, FixedOffset, Utc};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// How often a mounted countdown recomputes.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

/// Width of one labelled block in [`DisplayMode::Full`].
const BLOCK_WIDTH: usize = 9;

// Internal ID management for countdown instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Time left until the target, split into whole units.
///
/// All fields are zero once the target has passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Remaining {
    /// Whole days.
    pub days: u64,
    /// Hours past the last whole day, `0..=23`.
    pub hours: u64,
    /// Minutes past the last whole hour, `0..=59`.
    pub minutes: u64,
    /// Seconds past the last whole minute, `0..=59`.
    pub seconds: u64,
}

impl Remaining {
    /// Zero remaining time.
    pub const ZERO: Remaining = Remaining {
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
    };

    /// Decomposes a signed delta in milliseconds.
    ///
    /// Non-positive deltas yield [`Remaining::ZERO`]. A sub-second remainder
    /// is truncated.
    ///
    /// ```rust
    /// use invitation_widgets::countdown::Remaining;
    ///
    /// let r = Remaining::from_millis(90_061_000);
    /// assert_eq!((r.days, r.hours, r.minutes, r.seconds), (1, 1, 1, 1));
    /// assert_eq!(Remaining::from_millis(999), Remaining::ZERO);
    /// assert_eq!(Remaining::from_millis(-5_000), Remaining::ZERO);
    /// ```
    pub fn from_millis(delta: i64) -> Self {
        if delta <= 0 {
            return Self::ZERO;
        }
        let delta = delta as u64;
        Self {
            days: delta / MILLIS_PER_DAY as u64,
            hours: (delta / MILLIS_PER_HOUR as u64) % 24,
            minutes: (delta / MILLIS_PER_MINUTE as u64) % 60,
            seconds: (delta / MILLIS_PER_SECOND as u64) % 60,
        }
    }

    /// Total whole milliseconds represented by the four fields.
    pub fn as_millis(&self) -> u64 {
        self.days * MILLIS_PER_DAY as u64
            + self.hours * MILLIS_PER_HOUR as u64
            + self.minutes * MILLIS_PER_MINUTE as u64
            + self.seconds * MILLIS_PER_SECOND as u64
    }

    /// Whether every field is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}

/// Compact rendering: `"{d}D {h}H {m}M {s}S"`.
impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}D {}H {}M {}S",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Computes the time left from `now` until `target`.
pub fn remaining_between(target: DateTime<FixedOffset>, now: DateTime<Utc>) -> Remaining {
    Remaining::from_millis(millis_until(target, now))
}

fn millis_until(target: DateTime<FixedOffset>, now: DateTime<Utc>) -> i64 {
    target.timestamp_millis() - now.timestamp_millis()
}

/// How a countdown renders itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// One line, e.g. `12D 3H 4M 5S`.
    Compact,
    /// Four labelled blocks: Days, Hours, Minutes, Seconds.
    #[default]
    Full,
}

/// Message sent on every countdown tick.
///
/// Ticks carry the id of the countdown that scheduled them and the generation
/// tag it had at the time. A countdown ignores ticks for other ids and ticks
/// from an older generation, which is how an unmounted countdown's pending
/// tick is cancelled.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// The countdown this tick belongs to.
    pub id: i64,
    tag: i64,
}

/// Sent once when a mounted countdown first observes that its target passed.
#[derive(Debug, Clone)]
pub struct ElapsedMsg {
    /// The countdown whose target passed.
    pub id: i64,
}

/// Styles for both display modes.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The compact single line.
    pub compact: Style,
    /// Numbers in full mode.
    pub value: Style,
    /// Unit labels in full mode.
    pub label: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            compact: Style::new().bold(true),
            value: Style::new().bold(true),
            label: Style::new().foreground(AdaptiveColor {
                Light: "#6B6B6B",
                Dark: "#9A9A9A",
            }),
        }
    }
}

/// A live countdown to a fixed target moment.
#[derive(Debug, Clone)]
pub struct Model {
    /// Time between recomputations. Defaults to [`REFRESH_INTERVAL`].
    pub interval: Duration,
    /// Rendering styles.
    pub styles: Styles,
    target: DateTime<FixedOffset>,
    mode: DisplayMode,
    remaining: Remaining,
    // Signed, unlike `remaining`, which truncates to whole seconds.
    until_target: i64,
    clock: Arc<dyn Clock>,
    id: i64,
    tag: i64,
    mounted: bool,
    announced: bool,
}

/// Creates a mounted countdown reading the system clock.
///
/// The remaining time is computed immediately, so [`Model::view`] shows a
/// correct value before the first tick.
pub fn new(target: DateTime<FixedOffset>, mode: DisplayMode) -> Model {
    new_with_clock(target, mode, Arc::new(SystemClock))
}

/// Creates a mounted countdown reading `clock`.
pub fn new_with_clock(
    target: DateTime<FixedOffset>,
    mode: DisplayMode,
    clock: Arc<dyn Clock>,
) -> Model {
    let until_target = millis_until(target, clock.now());
    Model {
        interval: REFRESH_INTERVAL,
        styles: Styles::default(),
        target,
        mode,
        remaining: Remaining::from_millis(until_target),
        until_target,
        clock,
        id: next_id(),
        tag: 0,
        mounted: true,
        announced: false,
    }
}

impl Model {
    /// Unique id of this countdown.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The moment being counted down to.
    pub fn target(&self) -> DateTime<FixedOffset> {
        self.target
    }

    /// The value from the last computation.
    pub fn remaining(&self) -> Remaining {
        self.remaining
    }

    /// Current display mode.
    pub fn display_mode(&self) -> DisplayMode {
        self.mode
    }

    /// Switches the display mode. Does not recompute.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.mode = mode;
    }

    /// Builder form of [`Model::set_display_mode`].
    pub fn with_display_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replaces the styles.
    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    /// Whether the refresh cadence is active.
    pub fn mounted(&self) -> bool {
        self.mounted
    }

    /// Whether the last computation found the target already passed.
    ///
    /// With less than a second left the value already reads zero, but the
    /// countdown has not elapsed and keeps ticking.
    pub fn elapsed(&self) -> bool {
        self.until_target <= 0
    }

    /// Recomputes from the clock and returns the new value.
    pub fn refresh(&mut self) -> Remaining {
        self.until_target = millis_until(self.target, self.clock.now());
        self.remaining = Remaining::from_millis(self.until_target);
        self.remaining
    }

    /// A tick message for the current generation, as the cadence would send.
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        bubbletea_tick(self.interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }

    fn elapsed_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(ElapsedMsg { id }) as Msg
        })
    }

    /// Starts the refresh cadence by scheduling the first tick.
    pub fn init(&self) -> Cmd {
        log::debug!("countdown {} counting down to {}", self.id, self.target);
        self.tick()
    }

    /// Re-attaches an unmounted countdown: recomputes now and restarts the
    /// cadence. Returns `None` if it was already mounted.
    pub fn mount(&mut self) -> Option<Cmd> {
        if self.mounted {
            return None;
        }
        self.mounted = true;
        self.tag += 1;
        self.refresh();
        log::debug!("countdown {} mounted", self.id);
        Some(self.tick())
    }

    /// Cancels the refresh cadence. Any tick already scheduled is ignored
    /// when it arrives.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.tag += 1;
        log::debug!("countdown {} unmounted", self.id);
    }

    /// Handles a tick: recomputes and schedules the next tick.
    ///
    /// Once the target has passed the countdown stops ticking and emits a
    /// single [`ElapsedMsg`] instead; the value stays at zero.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        let tick = msg.downcast_ref::<TickMsg>()?;
        if !self.mounted || tick.id != self.id || tick.tag != self.tag {
            return None;
        }

        self.tag += 1;
        self.refresh();

        if self.elapsed() {
            if self.announced {
                return None;
            }
            self.announced = true;
            log::debug!("countdown {} reached its target", self.id);
            return Some(self.elapsed_cmd());
        }

        Some(self.tick())
    }

    /// Renders the last computed value in the current display mode.
    pub fn view(&self) -> String {
        match self.mode {
            DisplayMode::Compact => self
                .styles
                .compact
                .clone()
                .render(&self.remaining.to_string()),
            DisplayMode::Full => self.full_view(),
        }
    }

    fn full_view(&self) -> String {
        let units = [
            (self.remaining.days, "Days"),
            (self.remaining.hours, "Hours"),
            (self.remaining.minutes, "Minutes"),
            (self.remaining.seconds, "Seconds"),
        ];

        let blocks: Vec<String> = units
            .iter()
            .map(|(value, label)| {
                let value = self.styles.value.clone().render(&center(&value.to_string()));
                let label = self
                    .styles
                    .label
                    .clone()
                    .render(&center(&label.to_uppercase()));
                format!("{}\n{}", value, label)
            })
            .collect();

        let gap = " \n ";
        let mut parts: Vec<&str> = Vec::with_capacity(blocks.len() * 2);
        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                parts.push(gap);
            }
            parts.push(block.as_str());
        }
        lipgloss::join_horizontal(lipgloss::TOP, &parts)
    }
}

fn center(s: &str) -> String {
    let width = unicode_width::UnicodeWidthStr::width(s);
    if width >= BLOCK_WIDTH {
        return s.to_string();
    }
    let left = (BLOCK_WIDTH - width) / 2;
    let right = BLOCK_WIDTH - width - left;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(right))
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = Model::default();
        let cmd = Model::init(&model);
        (model, Some(cmd))
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        Model::update(self, &msg)
    }

    fn view(&self) -> String {
        Model::view(self)
    }
}

/// Counts down to the default wedding date.
impl Default for Model {
    fn default() -> Self {
        new(crate::config::default_target(), DisplayMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration as ChronoDuration, TimeZone};
    use proptest::prelude::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 1, 9, 30, 0).unwrap()
    }

    fn target_in(millis: i64) -> DateTime<FixedOffset> {
        (start() + ChronoDuration::milliseconds(millis)).fixed_offset()
    }

    fn countdown(millis: i64, mode: DisplayMode) -> (Model, ManualClock) {
        let clock = ManualClock::new(start());
        let model = new_with_clock(target_in(millis), mode, Arc::new(clock.clone()));
        (model, clock)
    }

    fn plain(s: &str) -> String {
        String::from_utf8(strip_ansi_escapes::strip(s)).unwrap()
    }

    fn tick(model: &mut Model) -> Option<Cmd> {
        let msg: Msg = Box::new(model.tick_msg());
        model.update(&msg)
    }

    #[test]
    fn test_one_of_each_unit() {
        let (model, _) = countdown(90_061_000, DisplayMode::Compact);
        assert_eq!(
            model.remaining(),
            Remaining {
                days: 1,
                hours: 1,
                minutes: 1,
                seconds: 1
            }
        );
    }

    #[test]
    fn test_past_target_is_zero() {
        let (model, _) = countdown(-5_000, DisplayMode::Compact);
        assert_eq!(model.remaining(), Remaining::ZERO);
        assert!(model.elapsed());
    }

    #[test]
    fn test_sub_second_remainder_truncates() {
        let (model, _) = countdown(999, DisplayMode::Compact);
        assert_eq!(model.remaining(), Remaining::ZERO);
        assert!(!model.elapsed());
    }

    #[test]
    fn test_keeps_ticking_through_the_last_second() {
        let (mut model, clock) = countdown(1_500, DisplayMode::Compact);

        clock.advance_millis(600);
        assert!(tick(&mut model).is_some());
        assert_eq!(model.remaining(), Remaining::ZERO);
        assert!(!model.elapsed());

        // 900 ms were left; the next tick is the one that announces.
        clock.advance_millis(900);
        assert!(tick(&mut model).is_some());
        assert!(model.elapsed());
        assert!(tick(&mut model).is_none());
    }

    #[test]
    fn test_exactly_now_is_zero() {
        assert_eq!(Remaining::from_millis(0), Remaining::ZERO);
    }

    #[test]
    fn test_tick_after_one_second_decrements_seconds() {
        let (mut model, clock) = countdown(2_000, DisplayMode::Compact);
        assert_eq!(model.remaining().seconds, 2);

        clock.advance_millis(1_000);
        let next = tick(&mut model);

        assert!(next.is_some());
        assert_eq!(model.remaining().seconds, 1);
        assert_eq!(plain(&model.view()), "0D 0H 0M 1S");
    }

    #[tokio::test]
    async fn test_scheduled_tick_is_accepted() {
        let (mut model, clock) = countdown(10_000, DisplayMode::Compact);
        assert_eq!(model.interval, REFRESH_INTERVAL);
        assert_eq!(REFRESH_INTERVAL, Duration::from_millis(1_000));
        model.interval = Duration::from_millis(5);

        let msg = model.init().await.expect("tick message");
        let tick = msg.downcast_ref::<TickMsg>().expect("a TickMsg");
        assert_eq!(tick.id, model.id());

        clock.advance_millis(1_000);
        assert!(model.update(&msg).is_some());
        assert_eq!(model.remaining().seconds, 9);
    }

    #[test]
    fn test_offsets_are_respected() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 11, 22, 11, 0, 0).unwrap());
        let target = DateTime::parse_from_rfc3339("2025-11-22T13:00:00+01:00").unwrap();
        let model = new_with_clock(target, DisplayMode::Compact, Arc::new(clock));
        // 13:00 at +01:00 is 12:00 UTC.
        assert_eq!(
            model.remaining(),
            Remaining {
                days: 0,
                hours: 1,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn test_initial_value_is_computed_before_any_tick() {
        let (model, _) = countdown(3 * MILLIS_PER_DAY + 5_000, DisplayMode::Compact);
        assert_eq!(plain(&model.view()), "3D 0H 0M 5S");
    }

    #[test]
    fn test_refresh_without_clock_change_is_idempotent() {
        let (mut model, _) = countdown(123_456_789, DisplayMode::Full);
        let a = model.refresh();
        let b = model.refresh();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unmount_rejects_pending_tick() {
        let (mut model, clock) = countdown(10_000, DisplayMode::Compact);
        let pending: Msg = Box::new(model.tick_msg());

        model.unmount();
        assert!(!model.mounted());

        clock.advance_millis(1_000);
        assert!(model.update(&pending).is_none());
        assert_eq!(model.remaining().seconds, 10);
    }

    #[test]
    fn test_remount_recomputes_and_restarts() {
        let (mut model, clock) = countdown(10_000, DisplayMode::Compact);
        let stale: Msg = Box::new(model.tick_msg());
        model.unmount();

        clock.advance_millis(4_000);
        assert!(model.mount().is_some());
        assert_eq!(model.remaining().seconds, 6);
        assert!(model.mount().is_none());

        // The tick from before the unmount stays dead.
        assert!(model.update(&stale).is_none());
        assert!(tick(&mut model).is_some());
    }

    #[test]
    fn test_duplicate_tick_is_rejected() {
        let (mut model, _) = countdown(10_000, DisplayMode::Compact);
        let first: Msg = Box::new(model.tick_msg());
        let duplicate: Msg = Box::new(model.tick_msg());
        assert!(model.update(&first).is_some());
        assert!(model.update(&duplicate).is_none());
    }

    #[test]
    fn test_other_countdowns_ticks_are_ignored() {
        let (mut a, _) = countdown(10_000, DisplayMode::Compact);
        let (b, _) = countdown(20_000, DisplayMode::Full);
        let foreign: Msg = Box::new(b.tick_msg());
        assert!(a.update(&foreign).is_none());
    }

    #[test]
    fn test_non_tick_messages_are_ignored() {
        let (mut model, _) = countdown(10_000, DisplayMode::Compact);
        let msg: Msg = Box::new(42u32);
        assert!(model.update(&msg).is_none());
    }

    #[test]
    fn test_holds_at_zero_and_stops_after_target() {
        let (mut model, clock) = countdown(1_500, DisplayMode::Compact);

        clock.advance_millis(2_000);
        assert!(tick(&mut model).is_some()); // announces elapsed once
        assert!(model.elapsed());

        clock.advance_millis(60_000);
        assert!(tick(&mut model).is_none());
        assert_eq!(model.remaining(), Remaining::ZERO);
    }

    #[test]
    fn test_instances_are_independent() {
        let clock = ManualClock::new(start());
        let shared: Arc<dyn Clock> = Arc::new(clock.clone());
        let mut hero = new_with_clock(target_in(5_000), DisplayMode::Compact, shared.clone());
        let section = new_with_clock(target_in(60_000), DisplayMode::Full, shared);

        clock.advance_millis(1_000);
        tick(&mut hero);

        assert_eq!(hero.remaining().seconds, 4);
        assert_eq!(section.remaining().minutes, 1);
        assert_ne!(hero.id(), section.id());
    }

    #[test]
    fn test_full_view_has_four_labelled_blocks() {
        let (model, _) = countdown(90_061_000, DisplayMode::Full);
        let view = plain(&model.view());
        let lines: Vec<&str> = view.lines().collect();
        assert_eq!(lines.len(), 2);
        for label in ["DAYS", "HOURS", "MINUTES", "SECONDS"] {
            assert!(lines[1].contains(label), "missing {label} in {view}");
        }
        let values: Vec<&str> = lines[0].split_whitespace().collect();
        assert_eq!(values, vec!["1", "1", "1", "1"]);
    }

    #[test]
    fn test_switching_display_mode() {
        let (mut model, _) = countdown(61_000, DisplayMode::Full);
        assert!(plain(&model.view()).contains("MINUTES"));
        model.set_display_mode(DisplayMode::Compact);
        assert_eq!(plain(&model.view()), "0D 0H 1M 1S");
    }

    #[test]
    fn test_unique_ids() {
        let (a, _) = countdown(1, DisplayMode::Full);
        let (b, _) = countdown(1, DisplayMode::Full);
        assert_ne!(a.id(), b.id());
        assert!(a.id() > 0);
    }

    proptest! {
        #[test]
        fn prop_decomposition_is_within_one_second(delta in 0i64..=400 * MILLIS_PER_DAY) {
            let r = Remaining::from_millis(delta);
            let counted = r.as_millis() as i64;
            prop_assert!(counted <= delta);
            prop_assert!(delta < counted + 1_000);
        }

        #[test]
        fn prop_fields_stay_in_range(delta in 1i64..=400 * MILLIS_PER_DAY) {
            let r = Remaining::from_millis(delta);
            prop_assert!(r.hours <= 23);
            prop_assert!(r.minutes <= 59);
            prop_assert!(r.seconds <= 59);
        }

        #[test]
        fn prop_non_positive_delta_is_zero(delta in i64::MIN / 2..=0i64) {
            prop_assert_eq!(Remaining::from_millis(delta), Remaining::ZERO);
        }

        #[test]
        fn prop_same_instant_same_result(delta in -MILLIS_PER_DAY..=30 * MILLIS_PER_DAY) {
            let now = start();
            let target = target_in(delta);
            prop_assert_eq!(remaining_between(target, now), remaining_between(target, now));
        }
    }
}
