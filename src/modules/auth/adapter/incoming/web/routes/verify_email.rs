use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::verify_email::VerifyEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct VerifyEmailResponse {
    /// Verified user ID (UUID)
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    user_id: String,

    #[schema(example = "jane@example.com")]
    email: String,

    #[schema(example = "Email verified successfully. You can now log in.")]
    message: String,
}

/// Verify an email address
///
/// Consumes the signed token from the verification email and activates the
/// account.
#[utoipa::path(
    get,
    path = "/api/auth/verify-email/{token}",
    tag = "auth",
    params(
        ("token" = String, Path, description = "Signed verification token from the email link")
    ),
    responses(
        (status = 200, description = "Email verified", body = inline(SuccessResponse<VerifyEmailResponse>)),
        (
            status = 400,
            description = "Invalid or expired token",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "TOKEN_EXPIRED",
                    "message": "Verification token has expired"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/auth/verify-email/{token}")]
pub async fn verify_email_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = path.into_inner();

    match data.verify_email_use_case.execute(&token).await {
        Ok(user) => {
            info!(user_id = %user.id, "Email verified");
            ApiResponse::success(VerifyEmailResponse {
                user_id: user.id.to_string(),
                email: user.email,
                message: "Email verified successfully. You can now log in.".to_string(),
            })
        }

        Err(VerifyEmailError::TokenExpired) => {
            warn!("Email verification failed: token expired");
            ApiResponse::bad_request("TOKEN_EXPIRED", "Verification token has expired")
        }

        Err(VerifyEmailError::InvalidToken) | Err(VerifyEmailError::UserNotFound) => {
            warn!("Email verification failed: invalid token");
            ApiResponse::bad_request("INVALID_TOKEN", "Invalid verification token")
        }

        Err(VerifyEmailError::RepositoryError(ref e)) => {
            error!(error = %e, "Email verification repository error");
            ApiResponse::internal_error()
        }
    }
}
