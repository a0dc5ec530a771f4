use uuid::Uuid;

/// Who an account email goes to. Enough to address the message and pick a
/// salutation.
#[derive(Debug, Clone)]
pub struct EmailRecipient {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    /// Emails a signed verification link (1h lifetime).
    async fn send_verification_email(
        &self,
        recipient: EmailRecipient,
    ) -> Result<(), UserEmailNotificationError>;

    /// Emails a signed magic-link login URL (15m lifetime).
    async fn send_magic_link_email(
        &self,
        recipient: EmailRecipient,
    ) -> Result<(), UserEmailNotificationError>;

    /// Emails the reset link carrying the raw single-use token. Token
    /// persistence is the caller's job; only the link is built here.
    async fn send_password_reset_email(
        &self,
        recipient: EmailRecipient,
        raw_token: &str,
    ) -> Result<(), UserEmailNotificationError>;
}
