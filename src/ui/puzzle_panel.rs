use eframe::egui;

use super::app::JottoApp;

pub fn draw_puzzle_panel(ctx: &egui::Context, app: &mut JottoApp) {
    let guess_id = egui::Id::new("guess_input_box");

    egui::TopBottomPanel::top("puzzle").show(ctx, |ui| {
        ui.add_space(4.0);

        // ---------- Puzzle number ----------
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(format!("Puzzle #{}", app.ui.puzzle_number)).strong());

            let mut new_puzzle = ui.button("New Puzzle").clicked();

            let response = ui.add(
                egui::TextEdit::singleline(&mut app.ui.puzzle_input)
                    .hint_text("puzzle number (blank = random)")
                    .desired_width(180.0),
            );
            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                new_puzzle = true;
            }

            if new_puzzle {
                app.request_new_puzzle();
            }
        });

        // ---------- Guess ----------
        ui.horizontal(|ui| {
            ui.label("Type a guess here:");

            let response = ui.add(
                egui::TextEdit::singleline(&mut app.ui.guess_input)
                    .id(guess_id)
                    .hint_text("guess"),
            );

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                app.submit_guess();

                // Keep cursor focused
                ui.memory_mut(|m| m.request_focus(guess_id));
            }
        });

        ui.collapsing("Settings", |ui| {
            ui.horizontal(|ui| {
                ui.label("UI Scale");
                ui.add(egui::Slider::new(&mut app.settings.ui_scale, 0.75..=2.0));
            });

            ui.horizontal(|ui| {
                ui.label("Winning row");
                let mut color = app.settings.victory_color();
                if ui.color_edit_button_srgba(&mut color).changed() {
                    app.settings.set_victory_color(color);
                }
            });

            ui.label(format!("Service: {}", app.settings.service_url));
        });

        ui.add_space(4.0);
    });
}
