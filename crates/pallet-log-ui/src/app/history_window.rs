//! "Action History" window listing recent actions, newest first, each with
//! an "Undo" button that reverts it and everything after it.

use eframe::egui;
use egui::RichText;

use pallet_log_core::history::LedgerHistory;

use super::App;

/// Descriptions of every recorded action, newest first. The initial state
/// is not an action and is left out.
pub(crate) fn recent_actions(history: &LedgerHistory) -> Vec<&str> {
    history
        .list_history()
        .iter()
        .skip(1)
        .rev()
        .map(|s| s.description())
        .collect()
}

impl App {
    /// Renders the history window if it is open.
    pub(crate) fn show_history_window(&mut self, ctx: &egui::Context) {
        if !self.history_open {
            return;
        }

        let mut open = true;
        let mut chosen = None;
        let actions = recent_actions(self.journal.history());

        egui::Window::new("Action History")
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                if actions.is_empty() {
                    ui.add_space(16.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("No recent actions.").weak());
                    });
                    ui.add_space(16.0);
                    return;
                }

                egui::ScrollArea::vertical()
                    .max_height(420.0)
                    .show(ui, |ui| {
                        for (row, description) in actions.iter().enumerate() {
                            ui.horizontal(|ui| {
                                ui.label(*description);
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("Undo").clicked() {
                                            chosen = Some(row);
                                        }
                                    },
                                );
                            });
                            ui.separator();
                        }
                    });
            });

        if !open {
            self.history_open = false;
        }
        if let Some(row) = chosen {
            self.revert_action(row);
        }
    }
}
