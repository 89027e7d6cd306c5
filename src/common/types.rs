use std::fmt;

use serde_json::Value;

use crate::render::chart;

/// Định danh tin nhắn, tăng dần theo thứ tự tạo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn display_name(self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "BALLTALK",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Role::User => "U",
            Role::Assistant => "BT",
        }
    }
}

/// Biểu đồ đi kèm câu trả lời của trợ lý.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    /// Raw value from the wire: either a data URI or bare base64.
    pub image: String,
    pub title: Option<String>,
}

impl Chart {
    /// Image source ready for display, always a data URI.
    pub fn image_source(&self) -> String {
        chart::image_source(&self.image)
    }

    pub fn alt_text(&self) -> &str {
        self.title.as_deref().unwrap_or("Visualization")
    }
}

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub chart: Option<Chart>,
    pub timestamp: i64,
}

/// JSON body returned by the chat endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatReply {
    pub reply: Option<String>,
    pub chart_image: Option<String>,
    pub chart_title: Option<String>,
}

impl ChatReply {
    /// Chỉ lấy field kiểu string của một object; sai kiểu coi như không có.
    pub fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            reply: field("reply"),
            chart_image: field("chart_image"),
            chart_title: field("chart_title"),
        }
    }
}

/// Kết quả của một lượt hỏi: có câu trả lời hoặc thất bại.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Reply(ChatReply),
    Failed,
}
