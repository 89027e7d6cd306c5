use tokio::sync::mpsc;

use crate::common::{ChatCommand, ChatEvent};

use super::ChatBackend;

/// Tác vụ nền xử lý lệnh từ UI, tuần tự từng lệnh một.
pub struct ChatWorker<B> {
    backend: B,
    command_receiver: mpsc::Receiver<ChatCommand>,
    event_sender: mpsc::Sender<ChatEvent>,
}

impl<B: ChatBackend> ChatWorker<B> {
    pub fn new(
        backend: B,
        command_receiver: mpsc::Receiver<ChatCommand>,
        event_sender: mpsc::Sender<ChatEvent>,
    ) -> Self {
        Self {
            backend,
            command_receiver,
            event_sender,
        }
    }

    /// Runs until the UI drops its command sender or stops listening for events.
    pub async fn run(mut self) {
        log::info!("Chat worker started");

        while let Some(command) = self.command_receiver.recv().await {
            if let Err(err) = self.handle_command(command).await {
                log::warn!("UI is no longer listening for chat events: {err}");
                break;
            }
        }

        log::info!("Chat worker stopped");
    }

    async fn handle_command(
        &mut self,
        command: ChatCommand,
    ) -> Result<(), mpsc::error::SendError<ChatEvent>> {
        match command {
            ChatCommand::SendMessage(content) => {
                let outcome = self.backend.send(&content).await;
                self.event_sender
                    .send(ChatEvent::TurnResolved(outcome))
                    .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::common::{ChatOutcome, ChatReply};

    #[derive(Clone, Default)]
    struct EchoBackend {
        received: Arc<Mutex<Vec<String>>>,
    }

    impl ChatBackend for EchoBackend {
        async fn send(&self, text: &str) -> ChatOutcome {
            self.received.lock().unwrap().push(text.to_string());
            if text == "fail" {
                return ChatOutcome::Failed;
            }
            ChatOutcome::Reply(ChatReply {
                reply: Some(format!("re: {text}")),
                ..ChatReply::default()
            })
        }
    }

    fn reply_text(event: ChatEvent) -> Option<String> {
        match event {
            ChatEvent::TurnResolved(ChatOutcome::Reply(reply)) => reply.reply,
            ChatEvent::TurnResolved(ChatOutcome::Failed) => None,
        }
    }

    #[tokio::test]
    async fn test_worker_answers_commands_in_order() {
        let backend = EchoBackend::default();
        let received = backend.received.clone();
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (event_tx, mut event_rx) = mpsc::channel(4);
        let handle = tokio::spawn(ChatWorker::new(backend, cmd_rx, event_tx).run());

        cmd_tx
            .send(ChatCommand::SendMessage("first".to_string()))
            .await
            .unwrap();
        cmd_tx
            .send(ChatCommand::SendMessage("fail".to_string()))
            .await
            .unwrap();
        cmd_tx
            .send(ChatCommand::SendMessage("third".to_string()))
            .await
            .unwrap();

        assert_eq!(
            reply_text(event_rx.recv().await.unwrap()).as_deref(),
            Some("re: first")
        );
        assert_eq!(reply_text(event_rx.recv().await.unwrap()), None);
        assert_eq!(
            reply_text(event_rx.recv().await.unwrap()).as_deref(),
            Some("re: third")
        );

        drop(cmd_tx);
        handle.await.unwrap();
        assert_eq!(*received.lock().unwrap(), vec!["first", "fail", "third"]);
    }

    #[tokio::test]
    async fn test_worker_stops_when_ui_is_gone() {
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (event_tx, event_rx) = mpsc::channel(4);
        drop(event_rx);
        let handle = tokio::spawn(ChatWorker::new(EchoBackend::default(), cmd_rx, event_tx).run());

        cmd_tx
            .send(ChatCommand::SendMessage("hello".to_string()))
            .await
            .unwrap();
        handle.await.unwrap();
        assert!(cmd_tx.is_closed());
    }
}
