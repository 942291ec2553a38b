//! Global keyboard shortcut handling.
//!
//! Ctrl+Z undoes the last action, Ctrl+H toggles the history window and
//! Escape closes it.

use eframe::egui;

use super::App;

impl App {
    pub(crate) fn handle_global_shortcuts(&mut self, ctx: &egui::Context) {
        let (ctrl, keys) = ctx.input(|i| {
            let ctrl = i.modifiers.ctrl || i.modifiers.command;
            let keys: Vec<egui::Key> = i
                .events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    _ => None,
                })
                .collect();
            (ctrl, keys)
        });

        // Text fields keep Ctrl+Z for their own undo.
        let typing = self.text_focused || self.editing.is_some();

        for key in keys {
            match key {
                egui::Key::Z if ctrl && !typing => self.undo_last(),
                egui::Key::H if ctrl => self.history_open = !self.history_open,
                egui::Key::Escape if self.history_open => self.history_open = false,
                _ => {}
            }
        }
    }
}
