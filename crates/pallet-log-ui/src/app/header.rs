//! Header bar with the app title, the theme picker and the history button.

use eframe::egui;
use egui::RichText;

use super::{App, ThemeMode};

impl App {
    pub(crate) fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("Pallet Log")
                    .heading()
                    .strong()
                    .color(self.accent_color),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .button("History")
                    .on_hover_text("Recent actions (Ctrl+H)")
                    .clicked()
                {
                    self.history_open = true;
                }

                let mut selected = self.theme_mode;
                egui::ComboBox::from_label("Theme")
                    .selected_text(selected.name())
                    .show_ui(ui, |ui| {
                        for mode in ThemeMode::ALL {
                            ui.selectable_value(&mut selected, mode, mode.name());
                        }
                    });
                if selected != self.theme_mode {
                    let ctx = ui.ctx().clone();
                    self.set_theme_mode(selected, &ctx);
                }
            });
        });
    }
}
