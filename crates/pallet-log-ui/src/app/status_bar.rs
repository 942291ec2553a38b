//! Status bar: the last error, or a summary of the log and where it is kept.

use eframe::egui;
use egui::{Color32, RichText};

use super::App;

/// Summary shown when there is no error to report.
fn summary(entries: usize, undoable: usize) -> String {
    let noun = if entries == 1 { "entry" } else { "entries" };
    format!("{entries} {noun} · {undoable} undoable")
}

impl App {
    pub(crate) fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 12.0;
            match &self.status {
                Some(message) => {
                    ui.label(RichText::new(message).color(Color32::from_rgb(220, 80, 80)));
                    if ui.small_button("Dismiss").clicked() {
                        self.status = None;
                    }
                }
                None => {
                    let undoable = self.journal.history().len().saturating_sub(1);
                    ui.label(summary(self.journal.ledger().len(), undoable));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(&self.storage_label).weak());
            });
        });
    }
}
