//! Guest photo wall.
//!
//! Guests add photos by file name; only image files are accepted. The wall
//! keeps names and uploaders only. File contents are never read.

use crate::error::{InvitationError, Result};
use crate::field::Field;
use crate::key::{self, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::KeyCode;
use lipgloss_extras::prelude::*;
use std::path::Path;

/// Uploader name used when none is given.
pub const ANONYMOUS: &str = "Anonymous Guest";

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "heic", "heif", "avif", "tif", "tiff",
];

/// Reports whether `file_name` looks like an image.
pub fn is_image(file_name: &str) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

/// A photo on the wall.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    /// Unique within one wall.
    pub id: u64,
    /// File name as given.
    pub name: String,
    /// Who added it.
    pub uploader: String,
}

/// Key bindings for the photo wall.
#[derive(Debug, Clone)]
pub struct PhotosKeyMap {
    /// Open the add form.
    pub add: Binding,
    /// Select the previous photo.
    pub up: Binding,
    /// Select the next photo.
    pub down: Binding,
    /// Remove the selected photo.
    pub remove: Binding,
    /// Move between form fields.
    pub next_field: Binding,
    /// Add the photo.
    pub submit: Binding,
    /// Close the form.
    pub cancel: Binding,
}

impl Default for PhotosKeyMap {
    fn default() -> Self {
        let mut keymap = Self {
            add: Binding::new(vec![KeyCode::Char('a')]).with_help("a", "add photo"),
            up: Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            down: Binding::new(vec![KeyCode::Down, KeyCode::Char('j')]).with_help("↓/j", "down"),
            remove: Binding::new(vec![KeyCode::Char('x'), KeyCode::Delete])
                .with_help("x", "remove"),
            next_field: Binding::new(vec![KeyCode::Tab, KeyCode::Up, KeyCode::Down])
                .with_help("tab", "next field"),
            submit: Binding::new(vec![KeyCode::Enter]).with_help("enter", "add"),
            cancel: Binding::new(vec![KeyCode::Esc]).with_help("esc", "cancel"),
        };
        keymap.set_adding(false);
        keymap
    }
}

impl PhotosKeyMap {
    fn set_adding(&mut self, adding: bool) {
        self.add.set_enabled(!adding);
        self.up.set_enabled(!adding);
        self.down.set_enabled(!adding);
        self.remove.set_enabled(!adding);
        self.next_field.set_enabled(adding);
        self.submit.set_enabled(adding);
        self.cancel.set_enabled(adding);
    }
}

impl key::KeyMap for PhotosKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![
            &self.add,
            &self.up,
            &self.down,
            &self.remove,
            &self.next_field,
            &self.submit,
            &self.cancel,
        ]
    }
}

/// Photo wall state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Key bindings.
    pub keymap: PhotosKeyMap,
    photos: Vec<Photo>,
    next_id: u64,
    selected: usize,
    adding: bool,
    file: Field,
    uploader: Field,
    notice: Option<String>,
    focused: bool,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// Creates an empty wall.
    pub fn new() -> Self {
        Self {
            keymap: PhotosKeyMap::default(),
            photos: Vec::new(),
            next_id: 1,
            selected: 0,
            adding: false,
            file: Field::new("File", "photo.jpg"),
            uploader: Field::new("Your name", "(optional)").with_char_limit(60),
            notice: None,
            focused: false,
        }
    }

    /// Photos, newest first.
    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    /// Index of the selected photo.
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Whether the add form is open.
    pub fn adding(&self) -> bool {
        self.adding
    }

    /// Adds a photo to the top of the wall.
    pub fn add(&mut self, file_name: &str, uploader: &str) -> Result<&Photo> {
        let file_name = file_name.trim();
        if file_name.is_empty() {
            return Err(InvitationError::EmptyField("File"));
        }
        if !is_image(file_name) {
            return Err(InvitationError::UnsupportedPhoto(file_name.to_string()));
        }
        let uploader = match uploader.trim() {
            "" => ANONYMOUS.to_string(),
            name => name.to_string(),
        };

        let photo = Photo {
            id: self.next_id,
            name: file_name.to_string(),
            uploader,
        };
        self.next_id += 1;
        log::info!("photo {} added by {}", photo.name, photo.uploader);

        self.photos.insert(0, photo);
        self.selected = 0;
        Ok(&self.photos[0])
    }

    /// Removes the photo with `id`.
    pub fn remove(&mut self, id: u64) -> Result<Photo> {
        let index = self
            .photos
            .iter()
            .position(|p| p.id == id)
            .ok_or(InvitationError::NoSuchPhoto(id))?;
        let photo = self.photos.remove(index);
        if self.selected >= self.photos.len() {
            self.selected = self.photos.len().saturating_sub(1);
        }
        Ok(photo)
    }

    fn open_form(&mut self) {
        self.adding = true;
        self.notice = None;
        self.file.focus();
        self.uploader.blur();
        self.keymap.set_adding(true);
    }

    fn close_form(&mut self) {
        self.adding = false;
        self.file.blur();
        self.uploader.blur();
        self.keymap.set_adding(false);
    }

    fn submit_form(&mut self) {
        let file = self.file.value().to_string();
        let uploader = self.uploader.value().to_string();
        match self.add(&file, &uploader) {
            Ok(_) => {
                self.file.reset();
                self.uploader.reset();
                self.close_form();
            }
            Err(err) => {
                log::warn!("photo rejected: {}", err);
                self.notice = Some(err.to_string());
            }
        }
    }

    fn update_form(&mut self, key_msg: &KeyMsg) {
        if self.keymap.cancel.matches(key_msg) {
            self.close_form();
        } else if self.keymap.next_field.matches(key_msg) {
            if self.file.focused() {
                self.file.blur();
                self.uploader.focus();
            } else {
                self.uploader.blur();
                self.file.focus();
            }
        } else if self.keymap.submit.matches(key_msg) {
            self.submit_form();
        } else {
            self.file.update(key_msg);
            self.uploader.update(key_msg);
        }
    }

    /// Handles keys while focused.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }
        let key_msg = msg.downcast_ref::<KeyMsg>()?;
        if self.adding {
            self.update_form(key_msg);
        } else if self.keymap.add.matches(key_msg) {
            self.open_form();
        } else if self.keymap.up.matches(key_msg) {
            self.selected = self.selected.saturating_sub(1);
        } else if self.keymap.down.matches(key_msg) {
            if self.selected + 1 < self.photos.len() {
                self.selected += 1;
            }
        } else if self.keymap.remove.matches(key_msg) {
            if let Some(id) = self.photos.get(self.selected).map(|p| p.id) {
                let _ = self.remove(id);
            }
        }
        None
    }

    /// Renders the wall or the add form.
    pub fn view(&self) -> String {
        let mut out = Vec::new();
        if self.adding {
            out.push(self.file.view());
            out.push(self.uploader.view());
        } else if self.photos.is_empty() {
            out.push(
                Style::new()
                    .faint(true)
                    .render("No photos yet. Share your moments from the day!"),
            );
        } else {
            for (i, photo) in self.photos.iter().enumerate() {
                let pointer = if self.focused && i == self.selected { ">" } else { " " };
                out.push(format!(
                    "{} {} {}",
                    pointer,
                    photo.name,
                    Style::new()
                        .faint(true)
                        .render(&format!("by {}", photo.uploader))
                ));
            }
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
