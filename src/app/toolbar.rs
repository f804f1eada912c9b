//! Toolbar rendering for `BubbleApp`.

use eframe::egui;

use super::{BubbleApp, Filter, View};

impl BubbleApp {
    /// Render the top toolbar strip.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.add_space(4.0);

            let in_detail = matches!(self.view, View::Detail(_));
            if ui
                .add_enabled(
                    in_detail,
                    egui::Button::new("\u{25C0}").min_size(egui::vec2(28.0, 24.0)),
                )
                .on_hover_text("Back to orbit")
                .clicked()
            {
                self.back_to_orbit();
            }

            ui.separator();

            let mut filter = self.filter;
            ui.selectable_value(&mut filter, Filter::All, "All");
            ui.selectable_value(&mut filter, Filter::Trending, "Trending");
            self.set_filter(filter);

            ui.separator();

            if ui
                .add_enabled(!self.loading, egui::Button::new("Reload"))
                .clicked()
            {
                self.reload(ctx);
            }
            if self.loading {
                ui.spinner();
            }

            ui.toggle_value(&mut self.show_stats, "Stats");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!(
                    "{} bubbles · {}",
                    self.bubbles.len(),
                    self.source.describe()
                ));
            });
        });
    }
}
