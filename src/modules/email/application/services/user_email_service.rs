use crate::modules::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::modules::email::application::ports::outgoing::email_sender::EmailSender;
use crate::modules::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotificationError, UserEmailNotifier,
};
use std::fmt;
use std::sync::Arc;

/// Composes account emails: mints the signed token, wraps it in a frontend
/// link and hands the rendered HTML to the sender.
#[derive(Clone)]
pub struct UserEmailService {
    tokens: Arc<dyn TokenProvider>,
    sender: Arc<dyn EmailSender>,
    frontend_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("tokens", &"<dyn TokenProvider>")
            .field("sender", &"<dyn EmailSender>")
            .field("frontend_url", &self.frontend_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(
        tokens: Arc<dyn TokenProvider>,
        sender: Arc<dyn EmailSender>,
        frontend_url: String,
    ) -> Self {
        Self {
            tokens,
            sender,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }
}

fn mail_template(content: &str, button_url: &str, button_text: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html>
<body style="text-align: center; font-family: Verdana, serif; color: #000;">
    <div style="max-width: 600px; margin: 10px; background-color: #fafafa; padding: 25px; border-radius: 20px;">
    <p style="text-align: left;">{content}</p>
    <a href="{button_url}" target="_blank">
        <button style="background-color: #444394; border: 0; width: 200px; height: 30px; border-radius: 6px; color: #fff;">{button_text}</button>
    </a>
    <p style="text-align: left;">
        If you are unable to click the above button, copy paste the below URL into your address bar
    </p>
    <a href="{button_url}" target="_blank">
        <p style="margin: 0px; text-align: left; font-size: 10px; text-decoration: none;">{button_url}</p>
    </a>
    </div>
</body>
</html>"##
    )
}

#[async_trait::async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(
        &self,
        recipient: EmailRecipient,
    ) -> Result<(), UserEmailNotificationError> {
        let token = self
            .tokens
            .generate_verification_token(recipient.user_id)
            .map_err(|e| UserEmailNotificationError::TokenGenerationFailed(e.to_string()))?;

        let link = format!("{}/verify-email/{}", self.frontend_url, token);
        let content = format!(
            "Hi {}, welcome aboard! Please confirm your email address to activate your account.",
            recipient.first_name
        );
        let body = mail_template(&content, &link, "Verify Email");

        self.sender
            .send_email(&recipient.email, "Verify Your Account", &body)
            .await
            .map_err(UserEmailNotificationError::EmailSendingFailed)
    }

    async fn send_magic_link_email(
        &self,
        recipient: EmailRecipient,
    ) -> Result<(), UserEmailNotificationError> {
        let token = self
            .tokens
            .generate_magic_link_token(recipient.user_id)
            .map_err(|e| UserEmailNotificationError::TokenGenerationFailed(e.to_string()))?;

        let link = format!("{}/auth-login?token={}", self.frontend_url, token);
        let content = format!(
            "Hi {}, click the button below to sign in. The link is valid for 15 minutes.",
            recipient.first_name
        );
        let body = mail_template(&content, &link, "Log In");

        self.sender
            .send_email(&recipient.email, "Your Secure Login Link", &body)
            .await
            .map_err(UserEmailNotificationError::EmailSendingFailed)
    }

    async fn send_password_reset_email(
        &self,
        recipient: EmailRecipient,
        raw_token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        let link = format!(
            "{}/reset-password/{}/{}",
            self.frontend_url, recipient.user_id, raw_token
        );
        let content = format!(
            "Hi {}, we received a request to reset your password. The link below is valid for 24 hours and can be used once.",
            recipient.first_name
        );
        let body = mail_template(&content, &link, "Reset Password");

        self.sender
            .send_email(&recipient.email, "Reset Your Password", &body)
            .await
            .map_err(UserEmailNotificationError::EmailSendingFailed)
    }
}
