use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::request_magic_link::{
    MagicLinkRequest, RequestMagicLinkError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct SendMagicLinkDto {
    /// Email address of an existing account
    #[schema(example = "jane@example.com")]
    pub email: String,
}

/// Request a magic login link
///
/// Emails a one-time login link (15 minute lifetime) to a known account.
#[utoipa::path(
    post,
    path = "/api/auth/send-magic-link",
    tag = "auth",
    request_body = SendMagicLinkDto,
    responses(
        (
            status = 200,
            description = "Magic link sent",
            body = inline(SuccessResponse<serde_json::Value>),
            example = json!({
                "success": true,
                "data": { "message": "Magic login link sent. Please check your email." }
            })
        ),
        (
            status = 404,
            description = "No account for that email",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "USER_NOT_FOUND", "message": "User not found" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/send-magic-link")]
pub async fn send_magic_link_handler(
    req: web::Json<SendMagicLinkDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match MagicLinkRequest::new(req.into_inner().email) {
        Ok(req) => req,
        Err(e) => {
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    match data.request_magic_link_use_case.execute(request).await {
        Ok(()) => {
            ApiResponse::success_message("Magic login link sent. Please check your email.")
        }

        Err(RequestMagicLinkError::UserNotFound) => {
            warn!("Magic link requested for unknown email");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }

        Err(RequestMagicLinkError::InvalidEmail) => {
            ApiResponse::bad_request("VALIDATION_ERROR", "Invalid email format")
        }

        Err(RequestMagicLinkError::EmailSendingFailed(ref e)) => {
            error!(error = %e, "Magic link email failed");
            ApiResponse::internal_error()
        }

        Err(RequestMagicLinkError::QueryError(ref e)) => {
            error!(error = %e, "Magic link query failed");
            ApiResponse::internal_error()
        }
    }
}
