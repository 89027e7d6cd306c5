pub mod client;
pub mod worker;

use std::future::Future;

use crate::common::ChatOutcome;

pub use client::ChatClient;
pub use worker::ChatWorker;

/// Nơi nhận câu hỏi và trả về kết quả của một lượt.
///
/// Implementations must not fail: every error is reported as
/// [`ChatOutcome::Failed`].
pub trait ChatBackend: Send + Sync {
    fn send(&self, text: &str) -> impl Future<Output = ChatOutcome> + Send;
}
