use eframe::egui;

use crate::common::Role;
use crate::ui::state::AppState;

use super::{chart_card, message_row, typing_indicator};

pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let conversation = &state.conversation;

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if conversation.is_empty() && !conversation.is_typing() {
                ui.add_space(48.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new("Ask BALLTALK anything about basketball.").weak(),
                    );
                });
            }

            for message in conversation.messages() {
                message_row::render(ui, message, state.display_tree(message.id));

                if message.role == Role::Assistant {
                    if let Some(chart) = &message.chart {
                        chart_card::render(ui, chart, state.chart_view(message.id));
                    }
                }
                ui.add_space(2.0);
            }

            if conversation.is_typing() {
                typing_indicator::render(ui);
            }
        });
}
