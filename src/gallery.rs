//! Gallery with "Videos" and "Images" tabs.
//!
//! The terminal cannot show the photos themselves, so the images tab lists
//! their captions. The videos tab is a placeholder until videos exist.

use crate::key::{self, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;

/// The gallery tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// Wedding videos.
    Videos,
    /// Photos ("It Takes a Village").
    #[default]
    Images,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 2] = [Tab::Videos, Tab::Images];

    /// Tab heading.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Videos => "VIDEOS",
            Tab::Images => "IMAGES (IT TAKES A VILLAGE)",
        }
    }

    fn index(&self) -> usize {
        match self {
            Tab::Videos => 0,
            Tab::Images => 1,
        }
    }
}

/// Key bindings for switching tabs.
#[derive(Debug, Clone)]
pub struct GalleryKeyMap {
    /// Previous tab.
    pub prev_tab: Binding,
    /// Next tab.
    pub next_tab: Binding,
}

impl Default for GalleryKeyMap {
    fn default() -> Self {
        Self {
            prev_tab: Binding::new(vec![KeyCode::Left, KeyCode::Char('h')])
                .with_help("←/h", "prev tab"),
            next_tab: Binding::new(vec![KeyCode::Right, KeyCode::Char('l')])
                .with_help("→/l", "next tab"),
        }
    }
}

impl key::KeyMap for GalleryKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.prev_tab, &self.next_tab]
    }
}

/// Gallery state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub keymap: GalleryKeyMap,
    images: Vec<String>,
    active: Tab,
    focused: bool,
}

impl Model {
    /// Creates a gallery showing the images tab.
    pub fn new(images: Vec<String>) -> Self {
        Self {
            keymap: GalleryKeyMap::default(),
            images,
            active: Tab::default(),
            focused: false,
        }
    }

    /// The active tab.
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Image captions.
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Switches to `tab`.
    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    /// Switches to the next tab, wrapping around.
    pub fn next_tab(&mut self) {
        let i = (self.active.index() + 1) % Tab::ALL.len();
        self.active = Tab::ALL[i];
    }

    /// Switches to the previous tab, wrapping around.
    pub fn prev_tab(&mut self) {
        let i = (self.active.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.active = Tab::ALL[i];
    }

    /// Handles tab switching while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next_tab.matches(key_msg) {
                self.next_tab();
            } else if self.keymap.prev_tab.matches(key_msg) {
                self.prev_tab();
            }
        }
        None
    }

    /// Renders the tab bar and the active tab's content.
    pub fn view(&self) -> String {
        let active_style = Style::new().bold(true).underline(true);
        let inactive_style = Style::new().faint(true);

        let tabs: Vec<String> = Tab::ALL
            .iter()
            .map(|tab| {
                if *tab == self.active {
                    active_style.clone().render(tab.title())
                } else {
                    inactive_style.clone().render(tab.title())
                }
            })
            .collect();

        let body = match self.active {
            Tab::Videos => inactive_style.clone().render("Videos coming soon..."),
            Tab::Images if self.images.is_empty() => {
                inactive_style.clone().render("No images yet.")
            }
            Tab::Images => self
                .images
                .iter()
                .enumerate()
                .map(|(i, caption)| format!("  [{}] {}", i + 1, caption))
                .collect::<Vec<_>>()
                .join("\n"),
        };

        format!("{}\n\n{}", tabs.join("   "), body)
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
