//! Form for logging a new delivery: supplier, pallet count, "Add".

use eframe::egui;

use super::App;

impl App {
    pub(crate) fn show_entry_form(&mut self, ui: &mut egui::Ui) {
        let mut submit = false;

        egui::Frame::group(ui.style())
            .corner_radius(egui::CornerRadius::same(6))
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    egui::ComboBox::from_label("Supplier")
                        .selected_text(self.form.supplier.as_str())
                        .show_ui(ui, |ui| {
                            for name in &self.suppliers {
                                ui.selectable_value(&mut self.form.supplier, name.clone(), name);
                            }
                        });

                    ui.add_space(8.0);
                    let label = ui.label("Pallets");
                    let response = ui
                        .add(
                            egui::TextEdit::singleline(&mut self.form.pallets_text)
                                .hint_text("0")
                                .desired_width(64.0),
                        )
                        .labelled_by(label.id);
                    self.text_focused |= response.has_focus();
                    let entered =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                    let add = ui.add_enabled(self.form.can_submit(), egui::Button::new("Add"));
                    submit = add.clicked() || entered;
                });
            });

        if submit {
            self.add_entry();
        }
    }
}
