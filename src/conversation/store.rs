use crate::common::ChatMessage;

/// Danh sách tin nhắn theo thứ tự thêm vào, chỉ nối thêm (cho tới khi xoá hết).
#[derive(Debug, Default)]
pub struct MessageStore {
    messages: Vec<ChatMessage>,
}

impl MessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{MessageId, Role};

    fn message(id: u64, content: &str) -> ChatMessage {
        ChatMessage {
            id: MessageId(id),
            role: Role::User,
            content: content.to_string(),
            chart: None,
            timestamp: 0,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut store = MessageStore::new();
        store.append(message(2, "second id first"));
        store.append(message(1, "first id second"));

        let contents: Vec<_> = store.all().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["second id first", "first id second"]);
        assert_eq!(store.last().map(|m| m.id), Some(MessageId(1)));
    }

    #[test]
    fn test_append_does_not_deduplicate() {
        let mut store = MessageStore::new();
        store.append(message(1, "same"));
        store.append(message(1, "same"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut store = MessageStore::new();
        store.append(message(1, "hi"));
        store.clear();
        assert!(store.is_empty());
        assert!(store.last().is_none());
    }
}
