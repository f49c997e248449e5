use eframe::egui;

use crate::engine::feedback_codec::VICTORY_TEXT;
use super::app::JottoApp;

const HEADERS: [&str; 3] = ["Your Guess", "# Letters in Common", "# of Letters in Position"];

pub fn draw_history_panel(ctx: &egui::Context, app: &mut JottoApp) {
    // ---------- Status line ----------
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        match &app.ui.last_fault {
            Some(fault) => {
                ui.colored_label(egui::Color32::LIGHT_RED, fault);
            }
            None if app.ui.history.is_empty() => {
                ui.label("No guesses yet");
            }
            None => {
                ui.label(format!("{} guesses", app.ui.history.len()));
            }
        }
    });

    // ---------- Guess history ----------
    egui::CentralPanel::default().show(ctx, |ui| {
        let victory = app.settings.victory_color();

        egui::ScrollArea::vertical()
            .stick_to_bottom(app.ui.should_auto_scroll)
            .show(ui, |ui| {
                egui::Grid::new("guess_history")
                    .num_columns(HEADERS.len())
                    .striped(true)
                    .min_col_width(120.0)
                    .show(ui, |ui| {
                        for header in HEADERS {
                            ui.label(egui::RichText::new(header).strong());
                        }
                        ui.end_row();

                        for row in app.ui.history.rows() {
                            let won = row.letters_in_common == VICTORY_TEXT;
                            for cell in [
                                &row.guess,
                                &row.letters_in_common,
                                &row.letters_in_position,
                            ] {
                                if won {
                                    ui.label(egui::RichText::new(cell).color(victory).strong());
                                } else {
                                    ui.label(cell);
                                }
                            }
                            ui.end_row();
                        }
                    });
            });
    });
}
