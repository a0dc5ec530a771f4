use async_trait::async_trait;

/// Transport-level seam: takes a rendered HTML body and delivers it.
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<(), String>;
}
