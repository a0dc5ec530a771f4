use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{
    password_hasher::PasswordHasher,
    user_repository::CreateUserData,
    UserQuery, UserRepository, UserRepositoryError,
};
use crate::modules::auth::application::use_cases::login_user::{
    validate_email, validate_password,
};
use crate::modules::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotifier,
};

// ============================================================================
// Registration Request
// ============================================================================
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

impl RegisterRequest {
    pub fn new(
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> Result<Self, RegisterRequestError> {
        let email = validate_email(email).map_err(|_| RegisterRequestError::InvalidEmail)?;
        let password =
            validate_password(password).map_err(|_| RegisterRequestError::EmptyPassword)?;

        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();
        if first_name.is_empty() {
            return Err(RegisterRequestError::EmptyFirstName);
        }
        if last_name.is_empty() {
            return Err(RegisterRequestError::EmptyLastName);
        }

        Ok(Self {
            email,
            password,
            first_name,
            last_name,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone)]
pub enum RegisterRequestError {
    InvalidEmail,
    EmptyPassword,
    EmptyFirstName,
    EmptyLastName,
}

impl std::fmt::Display for RegisterRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterRequestError::InvalidEmail => write!(f, "Invalid email format"),
            RegisterRequestError::EmptyPassword => write!(f, "Password cannot be empty"),
            RegisterRequestError::EmptyFirstName => write!(f, "First name cannot be empty"),
            RegisterRequestError::EmptyLastName => write!(f, "Last name cannot be empty"),
        }
    }
}

impl std::error::Error for RegisterRequestError {}

impl<'de> Deserialize<'de> for RegisterRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RegisterRequestHelper {
            email: String,
            password: String,
            first_name: String,
            last_name: String,
        }

        let helper = RegisterRequestHelper::deserialize(deserializer)?;
        RegisterRequest::new(
            helper.email,
            helper.password,
            helper.first_name,
            helper.last_name,
        )
        .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Registration Output
// ============================================================================
#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationOutcome {
    /// A new account was created and a verification email dispatched.
    Created,
    /// The email already belongs to an unverified account. The verification
    /// email was sent again instead of creating a duplicate.
    VerificationResent,
}

#[derive(Debug, Clone)]
pub struct RegistrationOutput {
    pub user_id: Uuid,
    pub email: String,
    pub outcome: RegistrationOutcome,
}

// ============================================================================
// Registration Errors
// ============================================================================
#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("Email is already in use")]
    EmailAlreadyInUse,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ============================================================================
// User Registration Orchestrator
// ============================================================================
#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    query: Arc<dyn UserQuery>,
    repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    email_service: Arc<dyn UserEmailNotifier>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        query: Arc<dyn UserQuery>,
        repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        email_service: Arc<dyn UserEmailNotifier>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
            email_service,
        }
    }

    /// Orchestrates complete registration:
    /// 1. Detects duplicate accounts
    /// 2. Hashes the password and creates the row
    /// 3. Sends the verification email in the background
    pub async fn register_user(
        &self,
        request: RegisterRequest,
    ) -> Result<RegistrationOutput, UserRegistrationError> {
        if let Some(existing) = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| UserRegistrationError::RepositoryError(e.to_string()))?
        {
            if existing.is_verified {
                return Err(UserRegistrationError::EmailAlreadyInUse);
            }

            // Unverified duplicate: the earlier email may have been lost, so
            // send a fresh verification link instead of failing.
            self.dispatch_verification_email(EmailRecipient {
                user_id: existing.id,
                email: existing.email.clone(),
                first_name: existing.first_name,
            });

            return Ok(RegistrationOutput {
                user_id: existing.id,
                email: existing.email,
                outcome: RegistrationOutcome::VerificationResent,
            });
        }

        let password_hash = self
            .password_hasher
            .hash_password(&request.password)
            .await
            .map_err(|e| UserRegistrationError::HashingFailed(e.to_string()))?;

        let created = self
            .repository
            .create_user(CreateUserData {
                email: request.email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => UserRegistrationError::EmailAlreadyInUse,
                other => UserRegistrationError::RepositoryError(other.to_string()),
            })?;

        self.dispatch_verification_email(EmailRecipient {
            user_id: created.id,
            email: created.email.clone(),
            first_name: created.first_name,
        });

        // Return immediately - don't wait for email
        Ok(RegistrationOutput {
            user_id: created.id,
            email: created.email,
            outcome: RegistrationOutcome::Created,
        })
    }

    /// Fire-and-forget with exponential backoff. Registration never fails
    /// because SMTP is down.
    fn dispatch_verification_email(&self, recipient: EmailRecipient) {
        let email_service = self.email_service.clone();

        tokio::spawn(async move {
            let max_retries = 3;
            for attempt in 1..=max_retries {
                match email_service
                    .send_verification_email(recipient.clone())
                    .await
                {
                    Ok(_) => return,
                    Err(e) if attempt < max_retries => {
                        tracing::warn!(
                            "Email attempt {}/{} failed for user {}: {}. Retrying...",
                            attempt,
                            max_retries,
                            recipient.user_id,
                            e
                        );
                        tokio::time::sleep(Duration::from_secs(2_u64.pow(attempt))).await;
                    }
                    Err(e) => {
                        tracing::error!(
                            "All {} email attempts failed for user {}: {}",
                            max_retries,
                            recipient.user_id,
                            e
                        );
                    }
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::stubs::{
        RecordingEmailNotifier, RecordingUserRepository, StubPasswordHasher, StubUserQuery,
    };

    fn valid_request() -> RegisterRequest {
        RegisterRequest::new(
            "valid@example.com".to_string(),
            "VerySecurePassword123!".to_string(),
            "Valid".to_string(),
            "User".to_string(),
        )
        .unwrap()
    }

    fn orchestrator(
        query: StubUserQuery,
        repository: Arc<RecordingUserRepository>,
        notifier: Arc<RecordingEmailNotifier>,
    ) -> UserRegistrationOrchestrator {
        UserRegistrationOrchestrator::new(
            Arc::new(query),
            repository,
            Arc::new(StubPasswordHasher::default()),
            notifier,
        )
    }

    async fn wait_for_email(notifier: &RecordingEmailNotifier) {
        for _ in 0..100 {
            if !notifier.verification_emails.lock().unwrap().is_empty() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("Verification email was never sent");
    }

    #[tokio::test]
    async fn register_user_success() {
        let repository = Arc::new(RecordingUserRepository::default());
        let notifier = RecordingEmailNotifier::arc();
        let service = orchestrator(StubUserQuery::default(), repository, notifier.clone());

        let output = service.register_user(valid_request()).await.unwrap();

        assert_eq!(output.email, "valid@example.com");
        assert_eq!(output.outcome, RegistrationOutcome::Created);

        wait_for_email(&notifier).await;
        let sent = notifier.verification_emails.lock().unwrap();
        assert_eq!(sent[0].email, "valid@example.com");
    }

    #[tokio::test]
    async fn register_user_verified_duplicate_rejected() {
        let query = StubUserQuery::with_verified_user("valid@example.com", "hash");
        let repository = Arc::new(RecordingUserRepository::default());
        let notifier = RecordingEmailNotifier::arc();
        let service = orchestrator(query, repository.clone(), notifier.clone());

        let result = service.register_user(valid_request()).await;

        assert!(matches!(
            result,
            Err(UserRegistrationError::EmailAlreadyInUse)
        ));
        // No new account, no email
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(notifier.verification_emails.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn register_user_unverified_duplicate_resends_verification() {
        let query = StubUserQuery::with_unverified_user("valid@example.com", "hash");
        let existing_id = query.user_id();
        let repository = Arc::new(RecordingUserRepository::default());
        let notifier = RecordingEmailNotifier::arc();
        let service = orchestrator(query, repository, notifier.clone());

        let output = service.register_user(valid_request()).await.unwrap();

        assert_eq!(output.outcome, RegistrationOutcome::VerificationResent);
        assert_eq!(output.user_id, existing_id);

        wait_for_email(&notifier).await;
        assert_eq!(
            notifier.verification_emails.lock().unwrap()[0].user_id,
            existing_id
        );
    }

    #[tokio::test]
    async fn register_user_succeeds_even_when_email_fails() {
        let repository = Arc::new(RecordingUserRepository::default());
        let notifier = Arc::new(RecordingEmailNotifier::failing());
        let service = orchestrator(StubUserQuery::default(), repository, notifier);

        let result = service.register_user(valid_request()).await;

        // Registration still succeeds
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn register_user_insert_race_maps_to_duplicate() {
        let repository = Arc::new(RecordingUserRepository {
            duplicate: true,
            ..Default::default()
        });
        let service = orchestrator(
            StubUserQuery::default(),
            repository,
            RecordingEmailNotifier::arc(),
        );

        let result = service.register_user(valid_request()).await;

        assert!(matches!(
            result,
            Err(UserRegistrationError::EmailAlreadyInUse)
        ));
    }

    #[test]
    fn register_request_validation() {
        assert!(RegisterRequest::new(
            "garbage".to_string(),
            "pass".to_string(),
            "A".to_string(),
            "B".to_string()
        )
        .is_err());
        assert!(RegisterRequest::new(
            "ok@example.com".to_string(),
            "  ".to_string(),
            "A".to_string(),
            "B".to_string()
        )
        .is_err());
        assert!(RegisterRequest::new(
            "ok@example.com".to_string(),
            "pass".to_string(),
            " ".to_string(),
            "B".to_string()
        )
        .is_err());
    }
}
