use eframe::egui;

const PLACEHOLDER: &str = "Ask about players, teams, or games...";

/// Ô nhập tin nhắn; bị khoá khi trợ lý đang trả lời.
pub fn render(ui: &mut egui::Ui, input_text: &mut String, enabled: bool) -> Option<String> {
    let mut send = false;
    ui.add_space(8.0);
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            let width = (ui.available_width() - 72.0).max(120.0);
            let response = ui.add(
                egui::TextEdit::singleline(input_text)
                    .hint_text(PLACEHOLDER)
                    .desired_width(width),
            );
            if ui.button("Send").clicked() {
                send = true;
            }

            if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                send = true;
                response.request_focus();
            }
        });
    });
    ui.add_space(8.0);

    if send && enabled {
        return take_submission(input_text);
    }

    None
}

/// Blank input stays in the box; anything else is taken verbatim.
fn take_submission(input_text: &mut String) -> Option<String> {
    if input_text.trim().is_empty() {
        return None;
    }
    Some(std::mem::take(input_text))
}
