use super::types::ChatOutcome;

/// Sự kiện từ chat worker gửi lên UI.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    TurnResolved(ChatOutcome),
}
