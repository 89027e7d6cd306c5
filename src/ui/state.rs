use std::collections::HashMap;

use eframe::egui;

use crate::common::{ChatMessage, MessageId, Role};
use crate::conversation::Conversation;
use crate::render::{DisplayTree, chart, markdown};

/// Ảnh biểu đồ đã giải mã, hoặc không hiển thị được (khi đó dùng alt text).
#[derive(Clone)]
pub enum ChartView {
    Image { uri: String, bytes: egui::load::Bytes },
    Unavailable,
}

/// Trạng thái cục bộ của UI.
///
/// Messages never change after creation, so rendered Markdown and decoded
/// charts are cached by message id.
pub struct AppState {
    pub conversation: Conversation,
    pub input_text: String,
    display_trees: HashMap<MessageId, DisplayTree>,
    charts: HashMap<MessageId, ChartView>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            conversation: Conversation::new(),
            input_text: String::new(),
            display_trees: HashMap::new(),
            charts: HashMap::new(),
        }
    }

    /// Renders Markdown and decodes charts for messages not seen yet.
    pub fn sync_display_cache(&mut self) {
        for message in self.conversation.messages() {
            if message.role != Role::Assistant || self.display_trees.contains_key(&message.id) {
                continue;
            }
            self.display_trees
                .insert(message.id, markdown::render(&message.content));
            if let Some(view) = chart_view(message) {
                self.charts.insert(message.id, view);
            }
        }
    }

    pub fn display_tree(&self, id: MessageId) -> Option<&DisplayTree> {
        self.display_trees.get(&id)
    }

    pub fn chart_view(&self, id: MessageId) -> Option<&ChartView> {
        self.charts.get(&id)
    }

    /// Bắt đầu cuộc trò chuyện mới nếu không có lượt nào đang chờ.
    pub fn reset(&mut self) -> bool {
        if !self.conversation.clear() {
            return false;
        }
        self.display_trees.clear();
        self.charts.clear();
        true
    }
}

fn chart_view(message: &ChatMessage) -> Option<ChartView> {
    let chart = message.chart.as_ref()?;
    let view = match chart::decode(&chart.image_source()) {
        Ok(image) => ChartView::Image {
            uri: format!("bytes://chart-{}.{}", message.id, image.extension()),
            bytes: image.bytes.into(),
        },
        Err(err) => {
            log::warn!("Chart for message {} cannot be displayed: {err}", message.id);
            ChartView::Unavailable
        }
    };
    Some(view)
}
