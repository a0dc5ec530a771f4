use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::refresh_token::{
    RefreshTokenError, RefreshTokenRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct RefreshRequestDto {
    /// Refresh token obtained at login
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: String,
}

#[derive(Serialize, ToSchema)]
pub struct RefreshResponse {
    /// Fresh JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,
}

/// Refresh an access token
///
/// Exchanges a valid, unrevoked refresh token for a new access token.
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    tag = "auth",
    request_body = RefreshRequestDto,
    responses(
        (status = 200, description = "New access token issued", body = inline(SuccessResponse<RefreshResponse>)),
        (
            status = 401,
            description = "Expired, revoked or malformed refresh token",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "TOKEN_REVOKED",
                    "message": "Refresh token has been revoked"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/refresh")]
pub async fn refresh_token_handler(
    req: web::Json<RefreshRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = RefreshTokenRequest {
        refresh_token: req.into_inner().refresh_token,
    };

    match data.refresh_token_use_case.execute(request).await {
        Ok(response) => ApiResponse::success(RefreshResponse {
            access_token: response.access_token,
        }),

        Err(RefreshTokenError::TokenExpired) => {
            warn!("Refresh failed: token expired");
            ApiResponse::unauthorized("TOKEN_EXPIRED", "Refresh token has expired")
        }

        Err(RefreshTokenError::TokenRevoked) => {
            warn!("Refresh failed: token revoked");
            ApiResponse::unauthorized("TOKEN_REVOKED", "Refresh token has been revoked")
        }

        Err(RefreshTokenError::InvalidToken) => {
            warn!("Refresh failed: invalid token");
            ApiResponse::unauthorized("INVALID_TOKEN", "Invalid refresh token")
        }

        Err(RefreshTokenError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }

        Err(RefreshTokenError::BlacklistError(ref e)) => {
            error!(error = %e, "Blacklist lookup failed");
            ApiResponse::internal_error()
        }
    }
}
