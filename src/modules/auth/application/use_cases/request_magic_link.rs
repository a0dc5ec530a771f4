use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::modules::auth::application::ports::outgoing::UserQuery;
use crate::modules::auth::application::use_cases::login_user::validate_email;
use crate::modules::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotifier,
};

// ========================= Magic Link Request =========================
#[derive(Debug, Clone)]
pub struct MagicLinkRequest {
    email: String,
}

impl MagicLinkRequest {
    pub fn new(email: String) -> Result<Self, RequestMagicLinkError> {
        let email = validate_email(email).map_err(|_| RequestMagicLinkError::InvalidEmail)?;
        Ok(Self { email })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl<'de> Deserialize<'de> for MagicLinkRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MagicLinkRequestHelper {
            email: String,
        }

        let helper = MagicLinkRequestHelper::deserialize(deserializer)?;
        MagicLinkRequest::new(helper.email).map_err(serde::de::Error::custom)
    }
}

// ====================== Magic Link Error =============================
#[derive(Debug, Clone)]
pub enum RequestMagicLinkError {
    InvalidEmail,
    UserNotFound,
    EmailSendingFailed(String),
    QueryError(String),
}

impl std::fmt::Display for RequestMagicLinkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestMagicLinkError::InvalidEmail => write!(f, "Invalid email format"),
            RequestMagicLinkError::UserNotFound => write!(f, "User not found"),
            RequestMagicLinkError::EmailSendingFailed(msg) => {
                write!(f, "Email sending failed: {}", msg)
            }
            RequestMagicLinkError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for RequestMagicLinkError {}

// ============================ Request Magic Link Use Case =============================
#[async_trait]
pub trait IRequestMagicLinkUseCase: Send + Sync {
    async fn execute(&self, request: MagicLinkRequest) -> Result<(), RequestMagicLinkError>;
}

#[derive(Clone)]
pub struct RequestMagicLinkUseCase {
    query: Arc<dyn UserQuery>,
    notifier: Arc<dyn UserEmailNotifier>,
}

impl RequestMagicLinkUseCase {
    pub fn new(query: Arc<dyn UserQuery>, notifier: Arc<dyn UserEmailNotifier>) -> Self {
        Self { query, notifier }
    }
}

#[async_trait]
impl IRequestMagicLinkUseCase for RequestMagicLinkUseCase {
    async fn execute(&self, request: MagicLinkRequest) -> Result<(), RequestMagicLinkError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| RequestMagicLinkError::QueryError(e.to_string()))?
            .ok_or(RequestMagicLinkError::UserNotFound)?;

        self.notifier
            .send_magic_link_email(EmailRecipient {
                user_id: user.id,
                email: user.email,
                first_name: user.first_name,
            })
            .await
            .map_err(|e| RequestMagicLinkError::EmailSendingFailed(e.to_string()))?;

        info!("Magic link sent to user: {}", user.id);
        Ok(())
    }
}
