use chrono::{DateTime, Local};
use eframe::egui;

use crate::common::{ChatMessage, Role};
use crate::render::DisplayTree;

use super::markdown;

const AVATAR_SIZE: f32 = 32.0;

pub fn render(ui: &mut egui::Ui, message: &ChatMessage, tree: Option<&DisplayTree>) {
    frame(ui, message.role, Some(message.timestamp), |ui| {
        match (message.role, tree) {
            (Role::Assistant, Some(tree)) if !tree.is_empty() => markdown::render(ui, tree),
            // Tin nhắn người dùng hiển thị nguyên văn.
            _ => {
                ui.label(&message.content);
            }
        }
    });
}

/// Khung chung cho một dòng hội thoại: avatar, tên, giờ và nội dung.
pub fn frame(
    ui: &mut egui::Ui,
    role: Role,
    timestamp: Option<i64>,
    add_body: impl FnOnce(&mut egui::Ui),
) {
    let fill = match role {
        Role::User => ui.visuals().faint_bg_color,
        Role::Assistant => ui.visuals().extreme_bg_color,
    };

    egui::Frame::new()
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(16, 14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_top(|ui| {
                avatar(ui, role);
                ui.add_space(12.0);
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(role.display_name()).strong().weak());
                        if let Some(time) = timestamp.and_then(time_label) {
                            ui.label(egui::RichText::new(time).small().weak());
                        }
                    });
                    add_body(ui);
                });
            });
        });
}

fn avatar(ui: &mut egui::Ui, role: Role) {
    let (rect, _) = ui.allocate_exact_size(egui::Vec2::splat(AVATAR_SIZE), egui::Sense::hover());
    let visuals = ui.visuals();
    let (fill, text) = match role {
        Role::User => (visuals.selection.bg_fill, visuals.selection.stroke.color),
        Role::Assistant => (visuals.widgets.inactive.bg_fill, visuals.text_color()),
    };
    let painter = ui.painter();
    painter.rect_filled(rect, egui::CornerRadius::same(6), fill);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        role.badge(),
        egui::FontId::proportional(13.0),
        text,
    );
}

fn time_label(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|time| time.with_timezone(&Local).format("%H:%M").to_string())
}
