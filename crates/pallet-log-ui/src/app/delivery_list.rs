//! Delivery list: grand total, one section per day and a card per delivery.
//!
//! Cards show the supplier, the date and the pallet count. Clicking the
//! count edits it in place; Enter or clicking away saves, Escape cancels.

use eframe::egui;
use egui::{Color32, RichText};

use pallet_log_core::dates::{day_label, display_date};
use pallet_log_core::{Delivery, DeliveryId};

use super::{today, App};
use crate::form::PalletEdit;

/// What a card asked for during this frame.
enum CardAction {
    StartEdit(DeliveryId, u32),
    FinishEdit,
    CancelEdit,
    Delete(DeliveryId),
}

impl App {
    pub(crate) fn show_delivery_list(&mut self, ui: &mut egui::Ui) {
        let ledger = self.journal.ledger();
        if ledger.is_empty() {
            show_empty_state(ui);
            return;
        }

        let accent = self.accent_color;
        let editing = &mut self.editing;
        let mut action = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                show_grand_total(ui, ledger.grand_total(), accent);
                ui.add_space(12.0);

                let today = today();
                for group in ledger.grouped_by_date() {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(day_label(group.date, today)).strong());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(RichText::new(format!("Total: {}", group.total)).weak());
                        });
                    });
                    for row in group.deliveries {
                        match show_card(ui, row, editing) {
                            // A click elsewhere also ends the edit; the click wins.
                            Some(CardAction::FinishEdit | CardAction::CancelEdit)
                                if action.is_some() => {}
                            Some(a) => action = Some(a),
                            None => {}
                        }
                    }
                    ui.add_space(12.0);
                }
            });

        match action {
            Some(CardAction::StartEdit(id, pallets)) => {
                // Switching cards saves the edit in progress first.
                self.finish_edit();
                self.start_edit(&id, pallets);
            }
            Some(CardAction::FinishEdit) => self.finish_edit(),
            Some(CardAction::CancelEdit) => self.cancel_edit(),
            Some(CardAction::Delete(id)) => self.delete_entry(&id),
            None => {}
        }
    }
}

fn show_empty_state(ui: &mut egui::Ui) {
    ui.add_space(48.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("No entries yet").heading());
        ui.label(RichText::new("Start by adding a pallet delivery above.").weak());
    });
}

fn show_grand_total(ui: &mut egui::Ui, total: u64, accent: Color32) {
    egui::Frame::group(ui.style())
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(12, 8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("Total").weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{total} pallets"))
                            .size(18.0)
                            .strong()
                            .color(accent),
                    );
                });
            });
        });
}

fn show_card(
    ui: &mut egui::Ui,
    row: &Delivery,
    editing: &mut Option<PalletEdit>,
) -> Option<CardAction> {
    let mut action = None;

    egui::Frame::group(ui.style())
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(12, 6))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&row.supplier).strong());
                    ui.label(RichText::new(display_date(row.date)).small().weak());
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Delete").clicked() {
                        action = Some(CardAction::Delete(row.id.clone()));
                    }

                    match editing.as_mut().filter(|e| e.id == row.id) {
                        Some(edit) => {
                            let response = ui.add(
                                egui::TextEdit::singleline(&mut edit.text)
                                    .desired_width(48.0)
                                    .horizontal_align(egui::Align::Center),
                            );
                            if edit.focus_requested {
                                edit.focus_requested = false;
                                response.request_focus();
                            } else if response.lost_focus() && action.is_none() {
                                let escaped = ui.input(|i| i.key_pressed(egui::Key::Escape));
                                action = Some(if escaped {
                                    CardAction::CancelEdit
                                } else {
                                    CardAction::FinishEdit
                                });
                            }
                        }
                        None => {
                            let count = egui::Button::new(
                                RichText::new(row.pallets.to_string()).strong(),
                            )
                            .frame(false);
                            if ui.add(count).on_hover_text("Click to edit").clicked() {
                                action = Some(CardAction::StartEdit(row.id.clone(), row.pallets));
                            }
                        }
                    }
                });
            });
        });

    action
}
