use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::modules::auth::application::ports::outgoing::{
    reset_token_repository::{NewResetToken, ResetTokenRepository},
    token_hasher::hash_token,
    UserQuery,
};
use crate::modules::auth::application::use_cases::login_user::validate_email;
use crate::modules::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotifier,
};

const RESET_TOKEN_LENGTH: usize = 64;
const RESET_TOKEN_TTL_HOURS: i64 = 24;

// ========================= Forgot Password Request =========================
#[derive(Debug, Clone)]
pub struct ForgotPasswordRequest {
    email: String,
}

impl ForgotPasswordRequest {
    pub fn new(email: String) -> Result<Self, ForgotPasswordError> {
        let email = validate_email(email).map_err(|_| ForgotPasswordError::InvalidEmail)?;
        Ok(Self { email })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl<'de> Deserialize<'de> for ForgotPasswordRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ForgotPasswordRequestHelper {
            email: String,
        }

        let helper = ForgotPasswordRequestHelper::deserialize(deserializer)?;
        ForgotPasswordRequest::new(helper.email).map_err(serde::de::Error::custom)
    }
}

// ====================== Forgot Password Error =============================
#[derive(Debug, Clone)]
pub enum ForgotPasswordError {
    InvalidEmail,
    RepositoryError(String),
    EmailSendingFailed(String),
}

impl std::fmt::Display for ForgotPasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForgotPasswordError::InvalidEmail => write!(f, "Invalid email format"),
            ForgotPasswordError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            ForgotPasswordError::EmailSendingFailed(msg) => {
                write!(f, "Email sending failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ForgotPasswordError {}

// ============================ Forgot Password Use Case =============================
#[async_trait]
pub trait IForgotPasswordUseCase: Send + Sync {
    /// Succeeds for unknown emails too. The endpoint must not reveal which
    /// addresses have accounts.
    async fn execute(&self, request: ForgotPasswordRequest) -> Result<(), ForgotPasswordError>;
}

#[derive(Clone)]
pub struct ForgotPasswordUseCase {
    query: Arc<dyn UserQuery>,
    reset_tokens: Arc<dyn ResetTokenRepository>,
    notifier: Arc<dyn UserEmailNotifier>,
}

impl ForgotPasswordUseCase {
    pub fn new(
        query: Arc<dyn UserQuery>,
        reset_tokens: Arc<dyn ResetTokenRepository>,
        notifier: Arc<dyn UserEmailNotifier>,
    ) -> Self {
        Self {
            query,
            reset_tokens,
            notifier,
        }
    }

    fn generate_raw_token() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(RESET_TOKEN_LENGTH)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl IForgotPasswordUseCase for ForgotPasswordUseCase {
    async fn execute(&self, request: ForgotPasswordRequest) -> Result<(), ForgotPasswordError> {
        let user = match self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| ForgotPasswordError::RepositoryError(e.to_string()))?
        {
            Some(user) => user,
            None => {
                info!("Password reset requested for unknown email");
                return Ok(());
            }
        };

        let raw_token = Self::generate_raw_token();

        self.reset_tokens
            .insert(NewResetToken {
                user_id: user.id,
                token_hash: hash_token(&raw_token),
                expires_at: Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS),
            })
            .await
            .map_err(|e| ForgotPasswordError::RepositoryError(e.to_string()))?;

        self.notifier
            .send_password_reset_email(
                EmailRecipient {
                    user_id: user.id,
                    email: user.email,
                    first_name: user.first_name,
                },
                &raw_token,
            )
            .await
            .map_err(|e| ForgotPasswordError::EmailSendingFailed(e.to_string()))?;

        info!("Password reset email sent to user: {}", user.id);
        Ok(())
    }
}
