use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::logout_user::{LogoutError, LogoutRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct LogoutRequestDto {
    /// Refresh token to revoke; omit to just clear client state
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub refresh_token: Option<String>,
}

/// Log out
///
/// Blacklists the supplied refresh token for the rest of its lifetime.
/// Idempotent: expired or garbage tokens still yield a success response.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    request_body = LogoutRequestDto,
    responses(
        (
            status = 200,
            description = "Logged out",
            body = inline(SuccessResponse<serde_json::Value>),
            example = json!({
                "success": true,
                "data": { "message": "Successfully logged out." }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/logout")]
pub async fn logout_user_handler(
    req: web::Json<LogoutRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = LogoutRequest {
        refresh_token: req.into_inner().refresh_token,
    };

    match data.logout_use_case.execute(request).await {
        Ok(response) => ApiResponse::success_message(&response.message),

        Err(LogoutError::DatabaseError(ref e)) => {
            error!(error = %e, "Logout blacklist write failed");
            ApiResponse::internal_error()
        }
    }
}
