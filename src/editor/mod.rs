//! Map editor
//!
//! Drag with the left button to place the current shape, space cycles the
//! shape kind, Z or Backspace undoes, right click or W writes the map file.
//! The editor works on pixel input and stores meters.

mod history;
mod shape;

pub use history::EditHistory;
pub use shape::{EditMode, Shape};

use std::path::{Path, PathBuf};

use glam::DVec2;

use crate::map::MapData;
use crate::platform::{Key, KeyboardState, MouseButton, MouseState};
use crate::settings::EditorSettings;

/// Input for one editor frame
#[derive(Debug, Clone, Copy)]
pub struct EditorInput<'a> {
    pub mouse: &'a MouseState,
    pub keys: &'a KeyboardState,
}

/// What an editor frame did
#[derive(Debug, Clone, PartialEq)]
pub enum EditorAction {
    Committed(Shape),
    ModeChanged(EditMode),
    Undone,
    Saved(PathBuf),
    SaveFailed(PathBuf),
}

/// Editor state: the document being authored and its undo history
#[derive(Debug, Clone)]
pub struct Editor {
    document: MapData,
    mode: EditMode,
    /// Drag start in pixels while the left button is held
    drag_start: Option<DVec2>,
    history: EditHistory<MapData>,
    settings: EditorSettings,
    save_path: PathBuf,
}

impl Editor {
    pub fn new(settings: EditorSettings, save_path: impl Into<PathBuf>) -> Self {
        let document = MapData::default();
        Self {
            history: EditHistory::new(document.clone(), settings.history_capacity),
            document,
            mode: EditMode::default(),
            drag_start: None,
            settings,
            save_path: save_path.into(),
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn document(&self) -> &MapData {
        &self.document
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }

    /// The document with the authoring scale, gravity and drift speed
    /// filled in, as it would be saved
    pub fn map(&self) -> MapData {
        MapData {
            pixel_per_meter: self.settings.pixel_per_meter,
            gravity: self.settings.gravity,
            item_drift_speed: self.settings.item_drift_speed,
            ..self.document.clone()
        }
    }

    /// Shape the current drag would commit if released at `cursor` (pixels)
    pub fn preview(&self, cursor: DVec2) -> Option<Shape> {
        self.drag_start.map(|start| {
            Shape::from_drag(self.mode, start, cursor, self.settings.pixel_per_meter)
        })
    }

    /// Process one frame of input
    pub fn handle(&mut self, input: &EditorInput) -> Vec<EditorAction> {
        let mut actions = Vec::new();
        let mouse = input.mouse;
        let keys = input.keys;

        if mouse.is_click(MouseButton::Left) {
            self.drag_start = Some(mouse.position());
        }

        if mouse.is_release(MouseButton::Left) {
            if let Some(shape) = self.preview(mouse.position()) {
                self.drag_start = None;
                self.document.apply(shape);
                self.history.push(self.document.clone());
                log::debug!(
                    "{} placed ({} undo snapshots)",
                    self.mode.as_str(),
                    self.history.depth()
                );
                actions.push(EditorAction::Committed(shape));
            }
        }

        if mouse.is_click(MouseButton::Right) || keys.is_click(Key::W) {
            actions.push(self.save());
        }

        if keys.is_click(Key::Space) {
            self.mode = self.mode.next();
            log::debug!("Edit mode {}", self.mode.as_str());
            actions.push(EditorAction::ModeChanged(self.mode));
        }

        if keys.is_click(Key::Z) || keys.is_click(Key::Backspace) {
            self.document = self.history.pop_or_keep_floor().clone();
            log::debug!("Undo ({} snapshots left)", self.history.depth());
            actions.push(EditorAction::Undone);
        }

        actions
    }

    /// Write the map file. Failures are logged and the document is kept.
    pub fn save(&self) -> EditorAction {
        match self.map().save(&self.save_path) {
            Ok(()) => EditorAction::Saved(self.save_path.clone()),
            Err(e) => {
                log::error!("Map not saved: {}", e);
                EditorAction::SaveFailed(self.save_path.clone())
            }
        }
    }
}
