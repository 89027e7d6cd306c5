use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::common::{ChatCommand, ChatEvent, ChatOutcome};

use super::components::{chat_area, header, input_bar};
use super::state::AppState;

const TYPING_FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct ChatApp {
    state: AppState,
    title: String,
    command_sender: mpsc::Sender<ChatCommand>,
    event_receiver: mpsc::Receiver<ChatEvent>,
}

impl ChatApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        title: String,
        command_sender: mpsc::Sender<ChatCommand>,
        event_receiver: mpsc::Receiver<ChatEvent>,
    ) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        Self {
            state: AppState::new(),
            title,
            command_sender,
            event_receiver,
        }
    }

    fn handle_chat_events(&mut self) {
        drain_events(&mut self.state, &mut self.event_receiver);
    }

    fn submit(&mut self, text: String) {
        let Some(message) = self.state.conversation.submit(text) else {
            return;
        };
        let payload = message.content.clone();

        if let Err(err) = self
            .command_sender
            .try_send(ChatCommand::SendMessage(payload))
        {
            // Không có worker thì lượt này vẫn phải kết thúc bằng một tin trả lời.
            log::warn!("Failed to send command to chat worker: {err}");
            self.state.conversation.resolve(ChatOutcome::Failed);
            self.state.sync_display_cache();
        }
    }
}

/// Áp dụng mọi event đang chờ từ worker vào state.
fn drain_events(state: &mut AppState, receiver: &mut mpsc::Receiver<ChatEvent>) {
    loop {
        match receiver.try_recv() {
            Ok(ChatEvent::TurnResolved(outcome)) => {
                state.conversation.resolve(outcome);
            }
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                // Worker đã dừng: lượt đang chờ sẽ không bao giờ có trả lời.
                if state.conversation.is_typing() {
                    log::warn!("Chat worker stopped while a reply was pending");
                    state.conversation.resolve(ChatOutcome::Failed);
                }
                break;
            }
        }
    }
    state.sync_display_cache();
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_chat_events();
        let typing = self.state.conversation.is_typing();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            let can_reset = !typing && !self.state.conversation.is_empty();
            if header::render(ui, &self.title, can_reset) {
                self.state.reset();
            }
        });

        egui::TopBottomPanel::bottom("input_bar").show(ctx, |ui| {
            if let Some(content) = input_bar::render(ui, &mut self.state.input_text, !typing) {
                self.submit(content);
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            chat_area::render(ui, &self.state);
        });

        // Keep polling for the reply and animating the dots while waiting.
        if self.state.conversation.is_typing() {
            ctx.request_repaint_after(TYPING_FRAME_INTERVAL);
        }
    }
}
