use crate::modules::auth::application::ports::outgoing::token_blacklist::{
    TokenBlacklist, TokenBlacklistError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};

use std::sync::Arc;

use uuid::Uuid;

/// Redis-backed implementation of `TokenBlacklist`.
///
/// ## Redis data model
///
/// 1. **Per-token key**
/// ```text
/// auth:blacklist:token:{token_hash} -> "{user_id}"
/// ```
/// - Exists means the token is revoked
/// - TTL = token expiration time
///
/// 2. **Per-user revocation marker**
/// ```text
/// auth:revoked:user:{user_id} -> "{unix_timestamp}"
/// ```
/// - Set on bulk revocation (password change, account deletion)
/// - Any token issued at or before the marker is invalid
/// - TTL = refresh token lifetime, after which no affected token can still
///   be alive anyway
///
/// The marker is second-granular because JWT `iat` is. A token minted within
/// the same second as a bulk revocation is treated as revoked; the marker
/// errs on the revoked side, so a login immediately after a password change
/// can be rejected for up to one second.
///
/// Redis TTL is the single source of truth for cleanup; no background jobs.
#[derive(Clone)]
pub struct RedisTokenBlacklist {
    pool: Arc<Pool>,
    /// Longest possible token lifetime, in seconds. Used as the TTL of the
    /// per-user revocation marker.
    max_token_ttl: i64,
}

impl RedisTokenBlacklist {
    pub fn new(pool: Arc<Pool>, max_token_ttl: i64) -> Self {
        Self {
            pool,
            max_token_ttl,
        }
    }

    fn token_key(token_hash: &str) -> String {
        format!("auth:blacklist:token:{token_hash}")
    }

    fn user_key(user_id: Uuid) -> String {
        format!("auth:revoked:user:{user_id}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, TokenBlacklistError> {
        self.pool
            .get()
            .await
            .map_err(|e| TokenBlacklistError::DatabaseError(format!("Pool error: {}", e)))
    }
}

#[async_trait]
impl TokenBlacklist for RedisTokenBlacklist {
    /// Blacklist (revoke) a single token.
    ///
    /// ## Redis operations performed
    /// ```text
    /// SET    auth:blacklist:token:{hash} "{user_id}"
    /// EXPIRE auth:blacklist:token:{hash} <ttl>
    /// ```
    ///
    /// The TTL matches the token's own expiry, so the key disappears exactly
    /// when the token would have stopped working on its own.
    async fn blacklist_token(
        &self,
        token_hash: String,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<(), TokenBlacklistError> {
        let ttl = (expires_at - Utc::now()).num_seconds();
        if ttl <= 0 {
            return Err(TokenBlacklistError::InvalidToken);
        }

        let token_key = Self::token_key(&token_hash);

        let mut conn = self.get_conn().await?;

        deadpool_redis::redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&token_key)
            .arg(user_id.to_string())
            .ignore()
            .cmd("EXPIRE")
            .arg(&token_key)
            .arg(ttl)
            .ignore()
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|e| TokenBlacklistError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    /// Check whether a token is revoked, either individually or via a
    /// user-level revocation issued after the token was minted.
    ///
    /// ## Redis operations
    /// ```text
    /// EXISTS auth:blacklist:token:{hash}
    /// GET    auth:revoked:user:{user_id}
    /// ```
    ///
    /// Both are O(1).
    async fn is_token_revoked(
        &self,
        token_hash: &str,
        user_id: Uuid,
        issued_at: DateTime<Utc>,
    ) -> Result<bool, TokenBlacklistError> {
        let token_key = Self::token_key(token_hash);
        let user_key = Self::user_key(user_id);
        let mut conn = self.get_conn().await?;

        let exists: bool = conn
            .exists(&token_key)
            .await
            .map_err(|e| TokenBlacklistError::DatabaseError(e.to_string()))?;

        if exists {
            return Ok(true);
        }

        let revoked_at: Option<i64> = conn
            .get(&user_key)
            .await
            .map_err(|e| TokenBlacklistError::DatabaseError(e.to_string()))?;

        match revoked_at {
            // <= on whole seconds: the boundary second counts as revoked.
            Some(ts) => Ok(issued_at.timestamp() <= ts),
            None => Ok(false),
        }
    }

    /// Revoke every outstanding token for a user by writing a revocation
    /// marker stamped with the current time.
    ///
    /// ## Redis operations
    /// ```text
    /// SET    auth:revoked:user:{user_id} "{now}"
    /// EXPIRE auth:revoked:user:{user_id} <max_token_ttl>
    /// ```
    ///
    /// Once the marker's TTL lapses, every token issued before it has also
    /// expired, so nothing is lost.
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<(), TokenBlacklistError> {
        let user_key = Self::user_key(user_id);
        let mut conn = self.get_conn().await?;

        deadpool_redis::redis::pipe()
            .atomic()
            .cmd("SET")
            .arg(&user_key)
            .arg(Utc::now().timestamp())
            .ignore()
            .cmd("EXPIRE")
            .arg(&user_key)
            .arg(self.max_token_ttl)
            .ignore()
            .query_async::<()>(&mut *conn)
            .await
            .map_err(|e| TokenBlacklistError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
