use eframe::egui;

use crate::common::Role;

use super::message_row;

/// Ba chấm nhảy lên xuống khi BALLTALK đang trả lời.
pub fn render(ui: &mut egui::Ui) {
    message_row::frame(ui, Role::Assistant, None, |ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(44.0, 20.0), egui::Sense::hover());
        let time = ui.input(|i| i.time);
        let color = ui.visuals().selection.bg_fill;
        let painter = ui.painter();

        for dot in 0..3 {
            let phase = time * 6.0 - dot as f64 * 0.9;
            let lift = (phase.sin().max(0.0) * 5.0) as f32;
            let center = egui::pos2(
                rect.left() + 8.0 + dot as f32 * 14.0,
                rect.center().y + 3.0 - lift,
            );
            painter.circle_filled(center, 4.0, color);
        }
    });
}
