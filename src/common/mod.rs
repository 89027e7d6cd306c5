pub mod commands;
pub mod events;
pub mod types;

pub use commands::ChatCommand;
pub use events::ChatEvent;
pub use types::{Chart, ChatMessage, ChatOutcome, ChatReply, MessageId, Role};
