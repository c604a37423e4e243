//! Single-line help footer generated from key bindings.
//!
//! Each section exposes its bindings through [`KeyMap`]; the page renders the
//! focused section's bindings plus its own navigation keys with this model.
//! When a width is set, items that do not fit are replaced by an ellipsis.

use crate::key::{Binding, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help footer.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Style of the trailing ellipsis.
    pub ellipsis: Style,
    /// Style of key labels.
    pub key: Style,
    /// Style of descriptions.
    pub desc: Style,
    /// Style of the separator between items.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            key: key_style,
            desc: desc_style,
            separator: sep_style,
        }
    }
}

/// The help footer model.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum visible width; `0` means unlimited.
    pub width: usize,
    /// Text placed between items.
    pub separator: String,
    /// Text shown when items were cut off.
    pub ellipsis: String,
    /// Rendering styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: 0,
            separator: " • ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help footer with default styles and no width limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum visible width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the short help of `keymap`.
    pub fn view<K: KeyMap + ?Sized>(&self, keymap: &K) -> String {
        self.short_help_view(keymap.short_help())
    }

    /// Renders `bindings` as `key desc • key desc`, skipping disabled ones.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        let mut builder = String::new();
        let mut total_width = 0;
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.separator);

        for kb in bindings.iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };

            let help = kb.help();
            let key_part = self.styles.key.clone().inline(true).render(&help.key);
            let desc_part = self.styles.desc.clone().inline(true).render(&help.desc);
            let item = format!("{}{} {}", sep, key_part, desc_part);
            let item_width = lipgloss::width_visible(&item);

            if let Some(tail) = self.overflow_tail(total_width, item_width) {
                builder.push_str(&tail);
                break;
            }

            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }

    fn overflow_tail(&self, total_width: usize, item_width: usize) -> Option<String> {
        if self.width == 0 || total_width + item_width <= self.width {
            return None;
        }
        let tail = format!(
            " {}",
            self.styles
                .ellipsis
                .clone()
                .inline(true)
                .render(&self.ellipsis)
        );
        if total_width + lipgloss::width_visible(&tail) < self.width {
            Some(tail)
        } else {
            Some(String::new())
        }
    }
}
