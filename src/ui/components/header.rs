use eframe::egui;

use super::logo;

/// Returns true when the user asks for a new chat.
pub fn render(ui: &mut egui::Ui, title: &str, can_reset: bool) -> bool {
    let mut reset = false;
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        logo::render(ui, 40.0);
        ui.heading(title);

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let button = ui.add_enabled(can_reset, egui::Button::new("New chat"));
            if button.clicked() {
                reset = true;
            }
        });
    });
    ui.add_space(6.0);
    reset
}
