//! Toolbar rendering for `PanelApp`.
//!
//! Source and selector fields, the Select button with its session
//! progress, ↑/↓ traversal, and the dark-mode toggle.

use std::time::Instant;

use eframe::egui;

use super::PanelApp;

impl PanelApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let now = Instant::now();
        let selecting = self.session.is_selecting(now);

        ui.horizontal(|ui| {
            ui.add_space(4.0);

            ui.add_sized(
                [(ui.available_width() - 420.0).max(160.0), 24.0],
                egui::TextEdit::singleline(&mut self.source_input)
                    .hint_text("URL or file...")
                    .font(egui::TextStyle::Monospace),
            );

            let selector = ui.add_sized(
                [160.0, 24.0],
                egui::TextEdit::singleline(&mut self.selector_input)
                    .hint_text("CSS selector")
                    .font(egui::TextStyle::Monospace),
            );
            let submitted =
                selector.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            if selecting {
                if ui.button("Cancel").clicked() {
                    self.cancel_selection();
                }
            } else if ui.button("Select").clicked() || submitted {
                self.start_selection(ctx);
            }

            if ui
                .add_enabled(
                    self.can_go_up(),
                    egui::Button::new("\u{2191}").min_size(egui::vec2(28.0, 24.0)),
                )
                .on_hover_text("Parent element")
                .clicked()
            {
                self.go_up();
            }
            if ui
                .add_enabled(
                    self.can_go_down(),
                    egui::Button::new("\u{2193}").min_size(egui::vec2(28.0, 24.0)),
                )
                .on_hover_text("First child element")
                .clicked()
            {
                self.go_down();
            }

            let dark_label = if self.dark_mode { "\u{263E}" } else { "\u{2600}" };
            if ui.button(dark_label).clicked() {
                self.dark_mode = !self.dark_mode;
            }
        });

        if let Some(progress) = self.session.progress(now).filter(|_| selecting) {
            ui.add(
                egui::ProgressBar::new(progress)
                    .desired_height(3.0)
                    .desired_width(ui.available_width()),
            );
        }
    }
}
