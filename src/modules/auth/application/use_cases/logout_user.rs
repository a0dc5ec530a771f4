use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::modules::auth::application::ports::outgoing::{
    token_blacklist::{TokenBlacklist, TokenBlacklistError},
    token_hasher::hash_token,
    token_provider::TokenProvider,
};

// ========================= Logout Request =========================
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

// ====================== Logout Response =============================
#[derive(Debug, Clone, Serialize)]
pub struct LogoutResponse {
    pub message: String,
}

// ====================== Logout Error =============================
#[derive(Debug, Clone)]
pub enum LogoutError {
    DatabaseError(String),
}

impl std::fmt::Display for LogoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogoutError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for LogoutError {}

impl From<TokenBlacklistError> for LogoutError {
    fn from(error: TokenBlacklistError) -> Self {
        LogoutError::DatabaseError(error.to_string())
    }
}

// ============================ Logout Use Case =============================
#[async_trait]
pub trait ILogoutUseCase: Send + Sync {
    async fn execute(&self, request: LogoutRequest) -> Result<LogoutResponse, LogoutError>;
}

#[derive(Clone)]
pub struct LogoutUseCase {
    token_blacklist: Arc<dyn TokenBlacklist>,
    token_provider: Arc<dyn TokenProvider>,
}

impl LogoutUseCase {
    pub fn new(
        token_blacklist: Arc<dyn TokenBlacklist>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            token_blacklist,
            token_provider,
        }
    }
}

#[async_trait]
impl ILogoutUseCase for LogoutUseCase {
    async fn execute(&self, request: LogoutRequest) -> Result<LogoutResponse, LogoutError> {
        if let Some(refresh_token) = request.refresh_token.as_deref().map(str::trim) {
            match self.token_provider.verify_token(refresh_token) {
                Ok(claims) => {
                    // Hash the token before storing (never store raw tokens)
                    let token_hash = hash_token(refresh_token);

                    let expires_at = chrono::DateTime::from_timestamp(claims.exp, 0)
                        .unwrap_or_else(|| chrono::Utc::now() + chrono::Duration::days(7));

                    match self
                        .token_blacklist
                        .blacklist_token(token_hash, claims.sub, expires_at)
                        .await
                    {
                        Ok(()) => info!("Token blacklisted for user: {}", claims.sub),
                        // Already-expired tokens need no blacklisting
                        Err(TokenBlacklistError::InvalidToken) => {}
                        Err(e) => return Err(e.into()),
                    }
                }
                Err(e) => {
                    // Token invalid or expired - logout still succeeds from
                    // the user's perspective
                    warn!("Failed to verify token during logout: {}", e);
                }
            }
        }

        Ok(LogoutResponse {
            message: "Successfully logged out.".to_string(),
        })
    }
}
