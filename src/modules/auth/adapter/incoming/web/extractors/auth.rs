use std::future::Future;
use std::pin::Pin;

use actix_web::{dev::Payload, web, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::token_hasher::hash_token;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Represents an authenticated user (verified or not)
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub is_verified: bool,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| create_api_error(ApiResponse::internal_error()))?;

            // Extract token from Authorization header
            let token = extract_token_from_header(&req).ok_or_else(|| {
                create_api_error(ApiResponse::unauthorized(
                    "MISSING_AUTH_HEADER",
                    "Missing or invalid authorization header",
                ))
            })?;

            let claims = state.token_provider.verify_token(&token).map_err(|_| {
                create_api_error(ApiResponse::unauthorized(
                    "INVALID_TOKEN",
                    "Invalid or expired token",
                ))
            })?;

            if claims.token_type != "access" {
                return Err(create_api_error(ApiResponse::unauthorized(
                    "INVALID_TOKEN_TYPE",
                    "Invalid token type",
                )));
            }

            // A password change or account deletion revokes every token the
            // user held, access tokens included.
            let issued_at = chrono::DateTime::from_timestamp(claims.iat, 0).ok_or_else(|| {
                create_api_error(ApiResponse::unauthorized(
                    "INVALID_TOKEN",
                    "Invalid or expired token",
                ))
            })?;

            let revoked = state
                .token_blacklist
                .is_token_revoked(&hash_token(&token), claims.sub, issued_at)
                .await
                .map_err(|e| {
                    tracing::error!("Revocation check failed: {}", e);
                    create_api_error(ApiResponse::internal_error())
                })?;

            if revoked {
                return Err(create_api_error(ApiResponse::unauthorized(
                    "TOKEN_REVOKED",
                    "Token has been revoked",
                )));
            }

            Ok(AuthenticatedUser {
                user_id: claims.sub,
                is_verified: claims.is_verified,
            })
        })
    }
}

/// Represents a verified authenticated user
#[derive(Debug, Clone)]
pub struct VerifiedUser {
    pub user_id: Uuid,
}

impl FromRequest for VerifiedUser {
    type Error = ActixError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let auth_user_future = AuthenticatedUser::from_request(req, payload);

        Box::pin(async move {
            let auth_user = auth_user_future.await?;

            if !auth_user.is_verified {
                return Err(create_api_error(ApiResponse::forbidden(
                    "EMAIL_NOT_VERIFIED",
                    "Email verification required",
                )));
            }

            Ok(VerifiedUser {
                user_id: auth_user.user_id,
            })
        })
    }
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}
