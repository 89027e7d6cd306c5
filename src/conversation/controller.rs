use chrono::Utc;

use crate::common::{Chart, ChatMessage, ChatOutcome, ChatReply, MessageId, Role};
use crate::network::ChatBackend;

use super::store::MessageStore;

pub const FAILURE_TEXT: &str = "⚠️ Server error. Please try again.";
pub const EMPTY_REPLY_TEXT: &str = "No reply received.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    AwaitingResponse,
}

/// Điều phối lượt hội thoại: mỗi lúc chỉ có tối đa một câu hỏi đang chờ trả lời.
///
/// The controller is the only writer of its [`MessageStore`]. A submission
/// while a reply is pending is dropped, so the store always alternates
/// user and assistant messages.
#[derive(Debug)]
pub struct Conversation {
    store: MessageStore,
    state: TurnState,
    next_id: u64,
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            store: MessageStore::new(),
            state: TurnState::Idle,
            next_id: 1,
        }
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// True while the assistant is responding; drives the typing indicator.
    pub fn is_typing(&self) -> bool {
        self.state() == TurnState::AwaitingResponse
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.store.all()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Appends the user's message and waits for a reply.
    ///
    /// Returns `None` without touching the store when a reply is already pending.
    pub fn submit(&mut self, text: impl Into<String>) -> Option<&ChatMessage> {
        if self.state == TurnState::AwaitingResponse {
            log::debug!("Submission dropped: a reply is still pending");
            return None;
        }

        let message = ChatMessage {
            id: self.allocate_id(),
            role: Role::User,
            content: text.into(),
            chart: None,
            timestamp: Utc::now().timestamp(),
        };
        log::debug!(
            "User message {} submitted ({} in conversation)",
            message.id,
            self.store.len() + 1
        );
        self.store.append(message);
        self.state = TurnState::AwaitingResponse;
        self.store.last()
    }

    /// Appends the assistant message for the pending turn and returns to idle.
    ///
    /// An outcome arriving while idle has no turn to answer and is ignored.
    pub fn resolve(&mut self, outcome: ChatOutcome) -> Option<&ChatMessage> {
        if self.state == TurnState::Idle {
            log::warn!("Ignoring chat outcome received while no turn is pending");
            return None;
        }

        let id = self.allocate_id();
        let message = assistant_message(id, outcome);
        log::debug!(
            "Assistant message {} appended (chart: {})",
            message.id,
            message.chart.is_some()
        );
        self.store.append(message);
        self.state = TurnState::Idle;
        self.store.last()
    }

    /// Runs one full turn against `backend`: submit, wait for the reply, resolve.
    pub async fn exchange<B: ChatBackend>(
        &mut self,
        backend: &B,
        text: impl Into<String>,
    ) -> Option<&ChatMessage> {
        let text = self.submit(text)?.content.clone();
        let outcome = backend.send(&text).await;
        self.resolve(outcome)
    }

    /// Bắt đầu cuộc trò chuyện mới. Chỉ thực hiện khi không có lượt nào đang chờ.
    pub fn clear(&mut self) -> bool {
        if self.state == TurnState::AwaitingResponse {
            return false;
        }
        self.store.clear();
        true
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

fn assistant_message(id: MessageId, outcome: ChatOutcome) -> ChatMessage {
    let (content, chart) = match outcome {
        ChatOutcome::Reply(reply) => map_reply(reply),
        ChatOutcome::Failed => (FAILURE_TEXT.to_string(), None),
    };

    ChatMessage {
        id,
        role: Role::Assistant,
        content,
        chart,
        timestamp: Utc::now().timestamp(),
    }
}

fn map_reply(reply: ChatReply) -> (String, Option<Chart>) {
    let content = non_empty(reply.reply).unwrap_or_else(|| EMPTY_REPLY_TEXT.to_string());
    let chart = non_empty(reply.chart_image).map(|image| Chart {
        image,
        title: non_empty(reply.chart_title),
    });
    (content, chart)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    fn reply(text: &str) -> ChatOutcome {
        ChatOutcome::Reply(ChatReply {
            reply: Some(text.to_string()),
            ..ChatReply::default()
        })
    }

    struct ScriptedBackend {
        outcomes: Mutex<VecDeque<ChatOutcome>>,
        received: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(outcomes: Vec<ChatOutcome>) -> Self {
            Self {
                outcomes: Mutex::new(outcomes.into()),
                received: Mutex::new(Vec::new()),
            }
        }
    }

    impl ChatBackend for ScriptedBackend {
        async fn send(&self, text: &str) -> ChatOutcome {
            self.received.lock().unwrap().push(text.to_string());
            self.outcomes
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(ChatOutcome::Failed)
        }
    }

    #[test]
    fn test_starts_idle_and_empty() {
        let conversation = Conversation::new();
        assert_eq!(conversation.state(), TurnState::Idle);
        assert!(!conversation.is_typing());
        assert!(conversation.messages().is_empty());
    }

    #[test]
    fn test_submit_appends_user_message_and_awaits() {
        let mut conversation = Conversation::new();
        let message = conversation.submit("Who won the 2016 finals?").unwrap();
        assert_eq!(message.role, Role::User);
        assert_eq!(message.content, "Who won the 2016 finals?");
        assert!(message.chart.is_none());
        assert_eq!(conversation.state(), TurnState::AwaitingResponse);
        assert!(conversation.is_typing());
    }

    #[test]
    fn test_submit_keeps_raw_text() {
        let mut conversation = Conversation::new();
        let message = conversation.submit("  padded  ").unwrap();
        assert_eq!(message.content, "  padded  ");
    }

    #[test]
    fn test_submit_while_awaiting_is_noop() {
        let mut conversation = Conversation::new();
        conversation.submit("first");
        let before = conversation.messages().to_vec();

        assert!(conversation.submit("second").is_none());
        assert_eq!(conversation.messages(), before.as_slice());
        assert_eq!(conversation.state(), TurnState::AwaitingResponse);
    }

    #[test]
    fn test_resolve_reply_without_chart() {
        let mut conversation = Conversation::new();
        conversation.submit("hi");
        let message = conversation.resolve(reply("Hello")).unwrap();
        assert_eq!(message.role, Role::Assistant);
        assert_eq!(message.content, "Hello");
        assert!(message.chart.is_none());
        assert_eq!(conversation.state(), TurnState::Idle);
        assert!(!conversation.is_typing());
    }

    #[test]
    fn test_resolve_reply_with_bare_base64_chart() {
        let mut conversation = Conversation::new();
        conversation.submit("chart please");
        let message = conversation
            .resolve(ChatOutcome::Reply(ChatReply {
                reply: Some("Here you go".to_string()),
                chart_image: Some("iVBOR...".to_string()),
                chart_title: Some("Points per game".to_string()),
            }))
            .unwrap();

        let chart = message.chart.as_ref().unwrap();
        assert_eq!(chart.image_source(), "data:image/png;base64,iVBOR...");
        assert_eq!(chart.title.as_deref(), Some("Points per game"));
        assert_eq!(chart.alt_text(), "Points per game");
    }

    #[test]
    fn test_resolve_reply_with_data_uri_chart() {
        let mut conversation = Conversation::new();
        conversation.submit("chart please");
        let message = conversation
            .resolve(ChatOutcome::Reply(ChatReply {
                reply: Some("Chart".to_string()),
                chart_image: Some("data:image/png;base64,AAAA".to_string()),
                chart_title: None,
            }))
            .unwrap();

        let chart = message.chart.as_ref().unwrap();
        assert_eq!(chart.image_source(), "data:image/png;base64,AAAA");
        assert_eq!(chart.title, None);
        assert_eq!(chart.alt_text(), "Visualization");
    }

    #[test]
    fn test_resolve_missing_or_empty_reply() {
        let mut conversation = Conversation::new();
        conversation.submit("one");
        let message = conversation
            .resolve(ChatOutcome::Reply(ChatReply::default()))
            .unwrap();
        assert_eq!(message.content, EMPTY_REPLY_TEXT);

        conversation.submit("two");
        let message = conversation.resolve(reply("")).unwrap();
        assert_eq!(message.content, EMPTY_REPLY_TEXT);
    }

    #[test]
    fn test_empty_chart_fields_are_absent() {
        let mut conversation = Conversation::new();
        conversation.submit("q");
        let message = conversation
            .resolve(ChatOutcome::Reply(ChatReply {
                reply: Some("a".to_string()),
                chart_image: Some(String::new()),
                chart_title: Some("ignored".to_string()),
            }))
            .unwrap();
        assert!(message.chart.is_none());
    }

    #[test]
    fn test_resolve_failure_uses_fixed_text() {
        let mut conversation = Conversation::new();
        conversation.submit("hi");
        let message = conversation.resolve(ChatOutcome::Failed).unwrap();
        assert_eq!(message.content, "⚠️ Server error. Please try again.");
        assert!(message.chart.is_none());
        assert_eq!(conversation.state(), TurnState::Idle);
    }

    #[test]
    fn test_resolve_while_idle_is_ignored() {
        let mut conversation = Conversation::new();
        assert!(conversation.resolve(reply("stray")).is_none());
        assert!(conversation.messages().is_empty());
        assert_eq!(conversation.state(), TurnState::Idle);
    }

    #[test]
    fn test_messages_alternate_and_ids_increase() {
        let mut conversation = Conversation::new();
        for turn in 0..4 {
            conversation.submit(format!("question {turn}"));
            // Bị bỏ qua: vẫn đang chờ trả lời.
            conversation.submit("ignored");
            if turn % 2 == 0 {
                conversation.resolve(reply(&format!("answer {turn}")));
            } else {
                conversation.resolve(ChatOutcome::Failed);
            }
        }

        let messages = conversation.messages();
        assert_eq!(messages.len(), 8);
        for (index, message) in messages.iter().enumerate() {
            let expected = if index % 2 == 0 {
                Role::User
            } else {
                Role::Assistant
            };
            assert_eq!(message.role, expected);
        }
        assert!(messages.windows(2).all(|pair| pair[0].id < pair[1].id));
        assert_eq!(messages[2].content, "question 1");
        assert_eq!(messages[3].content, FAILURE_TEXT);
    }

    #[test]
    fn test_clear_only_when_idle() {
        let mut conversation = Conversation::new();
        conversation.submit("hi");
        assert!(!conversation.clear());
        assert_eq!(conversation.messages().len(), 1);

        conversation.resolve(reply("hello"));
        assert!(conversation.clear());
        assert!(conversation.messages().is_empty());

        let message = conversation.submit("again").unwrap();
        assert_eq!(message.id, MessageId(3));
    }

    #[tokio::test]
    async fn test_exchange_runs_full_turn() {
        let backend = ScriptedBackend::new(vec![reply("Curry leads the league.")]);
        let mut conversation = Conversation::new();

        let message = conversation
            .exchange(&backend, "Who leads in threes?")
            .await
            .unwrap();
        assert_eq!(message.content, "Curry leads the league.");
        assert_eq!(conversation.state(), TurnState::Idle);
        assert_eq!(
            *backend.received.lock().unwrap(),
            vec!["Who leads in threes?".to_string()]
        );
    }

    #[tokio::test]
    async fn test_exchange_failure_becomes_message() {
        let backend = ScriptedBackend::new(vec![ChatOutcome::Failed]);
        let mut conversation = Conversation::new();

        let message = conversation.exchange(&backend, "hi").await.unwrap();
        assert_eq!(message.content, FAILURE_TEXT);
        assert_eq!(conversation.messages().len(), 2);
    }
}
