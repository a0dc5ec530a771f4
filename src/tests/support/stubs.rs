//! Hand-rolled port stubs shared by use-case tests.

use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::PasswordResetToken;
use crate::modules::dashboard::application::domain::entities::{Layout, WidgetPreference};
use crate::modules::dashboard::application::ports::outgoing::layout_repository::{
    LayoutRepository, LayoutRepositoryError, LayoutUpdate, NewLayout,
};
use crate::modules::dashboard::application::ports::outgoing::widget_preference_repository::{
    NewWidgetPreference, WidgetPreferenceRepository, WidgetPreferenceRepositoryError,
};
use crate::modules::auth::application::ports::outgoing::password_hasher::{
    HashError, PasswordHasher,
};
use crate::modules::auth::application::ports::outgoing::reset_token_repository::{
    NewResetToken, ResetTokenRepository, ResetTokenRepositoryError,
};
use crate::modules::auth::application::ports::outgoing::token_blacklist::{
    TokenBlacklist, TokenBlacklistError,
};
use crate::modules::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider,
};
use crate::modules::auth::application::ports::outgoing::user_query::{
    UserQuery, UserQueryError, UserQueryResult,
};
use crate::modules::auth::application::ports::outgoing::user_repository::{
    CreateUserData, UserRepository, UserRepositoryError, UserResult,
};
use crate::modules::email::application::ports::outgoing::user_email_notifier::{
    EmailRecipient, UserEmailNotificationError, UserEmailNotifier,
};

// ==================== UserQuery ====================

#[derive(Default)]
pub struct StubUserQuery {
    pub user: Option<UserQueryResult>,
    pub fail: bool,
}

impl StubUserQuery {
    pub fn with_user(user: UserQueryResult) -> Self {
        Self {
            user: Some(user),
            fail: false,
        }
    }

    pub fn with_verified_user(email: &str, password_hash: &str) -> Self {
        Self::with_user(make_user(email, password_hash, true))
    }

    pub fn with_unverified_user(email: &str, password_hash: &str) -> Self {
        Self::with_user(make_user(email, password_hash, false))
    }

    pub fn user_id(&self) -> Uuid {
        self.user.as_ref().map(|u| u.id).unwrap_or_else(Uuid::new_v4)
    }
}

pub fn make_user(email: &str, password_hash: &str, verified: bool) -> UserQueryResult {
    UserQueryResult {
        id: Uuid::new_v4(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        is_active: verified,
        is_verified: verified,
        is_staff: false,
        is_superuser: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl UserQuery for StubUserQuery {
    async fn find_by_id(&self, _user_id: Uuid) -> Result<Option<UserQueryResult>, UserQueryError> {
        if self.fail {
            return Err(UserQueryError::DatabaseError("stub failure".to_string()));
        }
        Ok(self.user.clone())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserQueryResult>, UserQueryError> {
        if self.fail {
            return Err(UserQueryError::DatabaseError("stub failure".to_string()));
        }
        Ok(self.user.clone().filter(|u| u.email == email))
    }
}

// ==================== PasswordHasher ====================

pub struct StubPasswordHasher {
    pub verify_result: bool,
    pub fail: bool,
}

impl Default for StubPasswordHasher {
    fn default() -> Self {
        Self {
            verify_result: true,
            fail: false,
        }
    }
}

impl StubPasswordHasher {
    pub fn rejecting() -> Self {
        Self {
            verify_result: false,
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            verify_result: false,
            fail: true,
        }
    }
}

#[async_trait]
impl PasswordHasher for StubPasswordHasher {
    async fn hash_password(&self, _password: &str) -> Result<String, HashError> {
        if self.fail {
            return Err(HashError::HashFailed);
        }
        Ok("stub_password_hash".to_string())
    }

    async fn verify_password(&self, _password: &str, _hash: &str) -> Result<bool, HashError> {
        if self.fail {
            return Err(HashError::VerifyFailed);
        }
        Ok(self.verify_result)
    }
}

// ==================== TokenProvider ====================

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StubTokenFailure {
    None,
    Expired,
    Invalid,
}

pub struct StubTokenProvider {
    /// User id baked into every verified token.
    pub user_id: Uuid,
    pub failure: StubTokenFailure,
    /// Claim type reported by verify_token.
    pub token_type: &'static str,
    pub is_verified: bool,
}

impl Default for StubTokenProvider {
    fn default() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            failure: StubTokenFailure::None,
            token_type: "refresh",
            is_verified: true,
        }
    }
}

impl StubTokenProvider {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id,
            ..Default::default()
        }
    }

    /// Verifies every token as an access token for the given user.
    pub fn access_for(user_id: Uuid) -> Self {
        Self {
            user_id,
            token_type: "access",
            ..Default::default()
        }
    }

    pub fn unverified_access_for(user_id: Uuid) -> Self {
        Self {
            user_id,
            token_type: "access",
            is_verified: false,
            ..Default::default()
        }
    }

    pub fn expired() -> Self {
        Self {
            failure: StubTokenFailure::Expired,
            ..Default::default()
        }
    }

    pub fn invalid() -> Self {
        Self {
            failure: StubTokenFailure::Invalid,
            ..Default::default()
        }
    }

    fn failure_error(&self) -> Option<TokenError> {
        match self.failure {
            StubTokenFailure::None => None,
            StubTokenFailure::Expired => Some(TokenError::TokenExpired),
            StubTokenFailure::Invalid => Some(TokenError::MalformedToken),
        }
    }

    fn claims(&self, token_type: &str) -> TokenClaims {
        TokenClaims {
            sub: self.user_id,
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Utc::now().timestamp(),
            nbf: Utc::now().timestamp(),
            token_type: token_type.to_string(),
            is_verified: self.is_verified,
        }
    }
}

impl TokenProvider for StubTokenProvider {
    fn generate_access_token(
        &self,
        _user_id: Uuid,
        _is_verified: bool,
    ) -> Result<String, TokenError> {
        Ok("stub-access-token".to_string())
    }

    fn generate_refresh_token(
        &self,
        _user_id: Uuid,
        _is_verified: bool,
    ) -> Result<String, TokenError> {
        Ok("stub-refresh-token".to_string())
    }

    fn verify_token(&self, _token: &str) -> Result<TokenClaims, TokenError> {
        match self.failure_error() {
            Some(e) => Err(e),
            None => Ok(self.claims(self.token_type)),
        }
    }

    fn refresh_access_token(&self, _refresh_token: &str) -> Result<String, TokenError> {
        match self.failure_error() {
            Some(e) => Err(e),
            None => Ok("stub-access-token".to_string()),
        }
    }

    fn generate_verification_token(&self, _user_id: Uuid) -> Result<String, TokenError> {
        Ok("stub-verification-token".to_string())
    }

    fn verify_verification_token(&self, _token: &str) -> Result<Uuid, TokenError> {
        match self.failure_error() {
            Some(e) => Err(e),
            None => Ok(self.user_id),
        }
    }

    fn generate_magic_link_token(&self, _user_id: Uuid) -> Result<String, TokenError> {
        Ok("stub-magic-token".to_string())
    }

    fn verify_magic_link_token(&self, _token: &str) -> Result<Uuid, TokenError> {
        match self.failure_error() {
            Some(e) => Err(e),
            None => Ok(self.user_id),
        }
    }
}

// ==================== UserRepository ====================

#[derive(Default)]
pub struct RecordingUserRepository {
    pub fail: bool,
    pub duplicate: bool,
    pub password_updates: Mutex<Vec<(Uuid, String)>>,
    pub activated: Mutex<Vec<Uuid>>,
    pub deleted: Mutex<Vec<Uuid>>,
    pub renamed: Mutex<Vec<(Uuid, String, String)>>,
}

impl RecordingUserRepository {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

#[async_trait]
impl UserRepository for RecordingUserRepository {
    async fn create_user(&self, data: CreateUserData) -> Result<UserResult, UserRepositoryError> {
        if self.duplicate {
            return Err(UserRepositoryError::UserAlreadyExists);
        }
        if self.fail {
            return Err(UserRepositoryError::DatabaseError("stub failure".to_string()));
        }
        Ok(UserResult {
            id: Uuid::new_v4(),
            email: data.email,
            first_name: data.first_name,
            last_name: data.last_name,
            is_verified: false,
        })
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        if self.fail {
            return Err(UserRepositoryError::DatabaseError("stub failure".to_string()));
        }
        self.password_updates
            .lock()
            .unwrap()
            .push((user_id, new_password_hash));
        Ok(())
    }

    async fn activate_user(&self, user_id: Uuid) -> Result<UserResult, UserRepositoryError> {
        if self.fail {
            return Err(UserRepositoryError::UserNotFound);
        }
        self.activated.lock().unwrap().push(user_id);
        Ok(UserResult {
            id: user_id,
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            is_verified: true,
        })
    }

    async fn set_name(
        &self,
        user_id: Uuid,
        first_name: String,
        last_name: String,
    ) -> Result<UserResult, UserRepositoryError> {
        if self.fail {
            return Err(UserRepositoryError::UserNotFound);
        }
        self.renamed
            .lock()
            .unwrap()
            .push((user_id, first_name.clone(), last_name.clone()));
        Ok(UserResult {
            id: user_id,
            email: "jane@example.com".to_string(),
            first_name,
            last_name,
            is_verified: true,
        })
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        if self.fail {
            return Err(UserRepositoryError::UserNotFound);
        }
        self.deleted.lock().unwrap().push(user_id);
        Ok(())
    }
}

// ==================== TokenBlacklist ====================

#[derive(Default)]
pub struct RecordingTokenBlacklist {
    pub fail: bool,
    pub revoked_tokens: Mutex<Vec<String>>,
    pub revoked_users: Mutex<Vec<Uuid>>,
    pub blacklisted: Mutex<Vec<String>>,
}

impl RecordingTokenBlacklist {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn with_blacklisted(token_hash: &str) -> Self {
        let this = Self::default();
        this.blacklisted.lock().unwrap().push(token_hash.to_string());
        this
    }
}

#[async_trait]
impl TokenBlacklist for RecordingTokenBlacklist {
    async fn blacklist_token(
        &self,
        token_hash: String,
        _user_id: Uuid,
        _expires_at: DateTime<Utc>,
    ) -> Result<(), TokenBlacklistError> {
        if self.fail {
            return Err(TokenBlacklistError::DatabaseError("stub failure".to_string()));
        }
        self.blacklisted.lock().unwrap().push(token_hash);
        Ok(())
    }

    async fn is_token_revoked(
        &self,
        token_hash: &str,
        user_id: Uuid,
        _issued_at: DateTime<Utc>,
    ) -> Result<bool, TokenBlacklistError> {
        if self.fail {
            return Err(TokenBlacklistError::DatabaseError("stub failure".to_string()));
        }
        let token_hit = self
            .blacklisted
            .lock()
            .unwrap()
            .iter()
            .any(|t| t == token_hash);
        let user_hit = self.revoked_users.lock().unwrap().contains(&user_id);
        Ok(token_hit || user_hit)
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<(), TokenBlacklistError> {
        if self.fail {
            return Err(TokenBlacklistError::DatabaseError("stub failure".to_string()));
        }
        self.revoked_users.lock().unwrap().push(user_id);
        Ok(())
    }
}

// ==================== ResetTokenRepository ====================

#[derive(Default)]
pub struct InMemoryResetTokenRepository {
    pub fail: bool,
    pub tokens: Mutex<Vec<PasswordResetToken>>,
}

impl InMemoryResetTokenRepository {
    pub fn with_token(token: PasswordResetToken) -> Self {
        let this = Self::default();
        this.tokens.lock().unwrap().push(token);
        this
    }
}

#[async_trait]
impl ResetTokenRepository for InMemoryResetTokenRepository {
    async fn insert(
        &self,
        data: NewResetToken,
    ) -> Result<PasswordResetToken, ResetTokenRepositoryError> {
        if self.fail {
            return Err(ResetTokenRepositoryError::DatabaseError(
                "stub failure".to_string(),
            ));
        }
        let token = PasswordResetToken {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            token_hash: data.token_hash,
            created_at: Utc::now(),
            expires_at: data.expires_at,
            is_used: false,
        };
        self.tokens.lock().unwrap().push(token.clone());
        Ok(token)
    }

    async fn find_latest_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<PasswordResetToken>, ResetTokenRepositoryError> {
        if self.fail {
            return Err(ResetTokenRepositoryError::DatabaseError(
                "stub failure".to_string(),
            ));
        }
        let tokens = self.tokens.lock().unwrap();
        Ok(tokens
            .iter()
            .filter(|t| t.user_id == user_id)
            .max_by_key(|t| t.created_at)
            .cloned())
    }

    async fn mark_used(&self, token_id: Uuid) -> Result<(), ResetTokenRepositoryError> {
        let mut tokens = self.tokens.lock().unwrap();
        let token = tokens
            .iter_mut()
            .find(|t| t.id == token_id)
            .ok_or(ResetTokenRepositoryError::TokenNotFound)?;
        token.is_used = true;
        Ok(())
    }
}

// ==================== UserEmailNotifier ====================

#[derive(Default)]
pub struct RecordingEmailNotifier {
    pub fail: bool,
    pub verification_emails: Mutex<Vec<EmailRecipient>>,
    pub magic_link_emails: Mutex<Vec<EmailRecipient>>,
    pub reset_emails: Mutex<Vec<(EmailRecipient, String)>>,
}

impl RecordingEmailNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl UserEmailNotifier for RecordingEmailNotifier {
    async fn send_verification_email(
        &self,
        recipient: EmailRecipient,
    ) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "stub failure".to_string(),
            ));
        }
        self.verification_emails.lock().unwrap().push(recipient);
        Ok(())
    }

    async fn send_magic_link_email(
        &self,
        recipient: EmailRecipient,
    ) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "stub failure".to_string(),
            ));
        }
        self.magic_link_emails.lock().unwrap().push(recipient);
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        recipient: EmailRecipient,
        raw_token: &str,
    ) -> Result<(), UserEmailNotificationError> {
        if self.fail {
            return Err(UserEmailNotificationError::EmailSendingFailed(
                "stub failure".to_string(),
            ));
        }
        self.reset_emails
            .lock()
            .unwrap()
            .push((recipient, raw_token.to_string()));
        Ok(())
    }
}

// ==================== LayoutRepository ====================

#[derive(Default)]
pub struct InMemoryLayoutRepository {
    pub fail: bool,
    pub layouts: Mutex<Vec<Layout>>,
}

impl InMemoryLayoutRepository {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn seed(&self, user_id: Uuid, name: &str, widgets: serde_json::Value) -> Uuid {
        let id = Uuid::new_v4();
        self.layouts.lock().unwrap().push(Layout {
            id,
            user_id,
            name: name.to_string(),
            widgets,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn count_for(&self, user_id: Uuid) -> usize {
        self.layouts
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .count()
    }

    fn check_fail(&self) -> Result<(), LayoutRepositoryError> {
        if self.fail {
            return Err(LayoutRepositoryError::DatabaseError(
                "stub failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl LayoutRepository for InMemoryLayoutRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Layout>, LayoutRepositoryError> {
        self.check_fail()?;
        Ok(self
            .layouts
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(&self, data: NewLayout) -> Result<Layout, LayoutRepositoryError> {
        self.check_fail()?;
        let layout = Layout {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            name: data.name,
            widgets: data.widgets,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.layouts.lock().unwrap().push(layout.clone());
        Ok(layout)
    }

    async fn find_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
    ) -> Result<Layout, LayoutRepositoryError> {
        self.check_fail()?;
        let layouts = self.layouts.lock().unwrap();
        let layout = layouts
            .iter()
            .find(|l| l.id == layout_id)
            .ok_or(LayoutRepositoryError::NotFound)?;
        if layout.user_id != user_id {
            return Err(LayoutRepositoryError::Forbidden);
        }
        Ok(layout.clone())
    }

    async fn update_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
        update: LayoutUpdate,
    ) -> Result<Layout, LayoutRepositoryError> {
        self.check_fail()?;
        let mut layouts = self.layouts.lock().unwrap();
        let layout = layouts
            .iter_mut()
            .find(|l| l.id == layout_id)
            .ok_or(LayoutRepositoryError::NotFound)?;
        if layout.user_id != user_id {
            return Err(LayoutRepositoryError::Forbidden);
        }
        layout.name = update.name;
        layout.widgets = update.widgets;
        layout.updated_at = Utc::now();
        Ok(layout.clone())
    }

    async fn delete_owned(
        &self,
        layout_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), LayoutRepositoryError> {
        self.check_fail()?;
        let mut layouts = self.layouts.lock().unwrap();
        let position = layouts
            .iter()
            .position(|l| l.id == layout_id)
            .ok_or(LayoutRepositoryError::NotFound)?;
        if layouts[position].user_id != user_id {
            return Err(LayoutRepositoryError::Forbidden);
        }
        layouts.remove(position);
        Ok(())
    }
}

// ==================== WidgetPreferenceRepository ====================

#[derive(Default)]
pub struct InMemoryWidgetPreferenceRepository {
    pub fail: bool,
    pub preferences: Mutex<Vec<WidgetPreference>>,
}

impl InMemoryWidgetPreferenceRepository {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn seed(
        &self,
        user_id: Uuid,
        widget_id: Uuid,
        widget_type: &str,
        settings: serde_json::Value,
    ) -> Uuid {
        let id = Uuid::new_v4();
        self.preferences.lock().unwrap().push(WidgetPreference {
            id,
            user_id,
            widget_id,
            widget_type: widget_type.to_string(),
            settings,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        });
        id
    }

    pub fn count_for(&self, user_id: Uuid) -> usize {
        self.preferences
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .count()
    }

    fn check_fail(&self) -> Result<(), WidgetPreferenceRepositoryError> {
        if self.fail {
            return Err(WidgetPreferenceRepositoryError::DatabaseError(
                "stub failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl WidgetPreferenceRepository for InMemoryWidgetPreferenceRepository {
    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<WidgetPreference>, WidgetPreferenceRepositoryError> {
        self.check_fail()?;
        Ok(self
            .preferences
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert(
        &self,
        data: NewWidgetPreference,
    ) -> Result<WidgetPreference, WidgetPreferenceRepositoryError> {
        self.check_fail()?;
        let mut preferences = self.preferences.lock().unwrap();
        if preferences.iter().any(|p| p.widget_id == data.widget_id) {
            return Err(WidgetPreferenceRepositoryError::WidgetIdTaken);
        }
        let preference = WidgetPreference {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            widget_id: data.widget_id,
            widget_type: data.widget_type,
            settings: data.settings,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        preferences.push(preference.clone());
        Ok(preference)
    }

    async fn update_settings(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
        settings: serde_json::Value,
    ) -> Result<WidgetPreference, WidgetPreferenceRepositoryError> {
        self.check_fail()?;
        let mut preferences = self.preferences.lock().unwrap();
        let preference = preferences
            .iter_mut()
            .find(|p| p.widget_id == widget_id)
            .ok_or(WidgetPreferenceRepositoryError::NotFound)?;
        if preference.user_id != user_id {
            return Err(WidgetPreferenceRepositoryError::Forbidden);
        }
        preference.settings = settings;
        preference.updated_at = Utc::now();
        Ok(preference.clone())
    }

    async fn delete_owned(
        &self,
        widget_id: Uuid,
        user_id: Uuid,
    ) -> Result<(), WidgetPreferenceRepositoryError> {
        self.check_fail()?;
        let mut preferences = self.preferences.lock().unwrap();
        let position = preferences
            .iter()
            .position(|p| p.widget_id == widget_id)
            .ok_or(WidgetPreferenceRepositoryError::NotFound)?;
        if preferences[position].user_id != user_id {
            return Err(WidgetPreferenceRepositoryError::Forbidden);
        }
        preferences.remove(position);
        Ok(())
    }
}
