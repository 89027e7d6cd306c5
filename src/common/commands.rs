/// Lệnh UI gửi xuống chat worker.
#[derive(Debug, Clone)]
pub enum ChatCommand {
    /// Gửi nguyên văn nội dung người dùng nhập tới endpoint.
    SendMessage(String),
}
