use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{UserRepository, UserRepositoryError};
use crate::modules::auth::application::use_cases::fetch_profile::ProfileResponse;

// ========================= Update Profile Request =========================
#[derive(Debug, Clone)]
pub struct UpdateProfileRequest {
    first_name: String,
    last_name: String,
}

impl UpdateProfileRequest {
    pub fn new(first_name: String, last_name: String) -> Result<Self, UpdateProfileError> {
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();

        if first_name.is_empty() {
            return Err(UpdateProfileError::EmptyFirstName);
        }
        if last_name.is_empty() {
            return Err(UpdateProfileError::EmptyLastName);
        }

        Ok(Self {
            first_name,
            last_name,
        })
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl<'de> Deserialize<'de> for UpdateProfileRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct UpdateProfileRequestHelper {
            first_name: String,
            last_name: String,
        }

        let helper = UpdateProfileRequestHelper::deserialize(deserializer)?;
        UpdateProfileRequest::new(helper.first_name, helper.last_name)
            .map_err(serde::de::Error::custom)
    }
}

// ====================== Update Profile Error =============================
#[derive(Debug, Clone)]
pub enum UpdateProfileError {
    EmptyFirstName,
    EmptyLastName,
    UserNotFound,
    RepositoryError(String),
}

impl std::fmt::Display for UpdateProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateProfileError::EmptyFirstName => write!(f, "First name cannot be empty"),
            UpdateProfileError::EmptyLastName => write!(f, "Last name cannot be empty"),
            UpdateProfileError::UserNotFound => write!(f, "User not found"),
            UpdateProfileError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for UpdateProfileError {}

// ============================ Update Profile Use Case =============================
#[async_trait]
pub trait IUpdateProfileUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse, UpdateProfileError>;
}

#[derive(Clone)]
pub struct UpdateProfileUseCase {
    repository: Arc<dyn UserRepository>,
}

impl UpdateProfileUseCase {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl IUpdateProfileUseCase for UpdateProfileUseCase {
    async fn execute(
        &self,
        user_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<ProfileResponse, UpdateProfileError> {
        let updated = self
            .repository
            .set_name(
                user_id,
                request.first_name().to_string(),
                request.last_name().to_string(),
            )
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => UpdateProfileError::UserNotFound,
                other => UpdateProfileError::RepositoryError(other.to_string()),
            })?;

        Ok(ProfileResponse {
            first_name: updated.first_name,
            last_name: updated.last_name,
            email: updated.email,
        })
    }
}
