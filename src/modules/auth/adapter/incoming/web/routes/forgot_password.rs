use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::forgot_password::{
    ForgotPasswordError, ForgotPasswordRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ForgotPasswordDto {
    /// Email address to send the reset link to
    #[schema(example = "jane@example.com")]
    pub email: String,
}

const GENERIC_MESSAGE: &str =
    "If an account exists for that email, a password reset link has been sent.";

/// Request a password reset
///
/// Always answers with the same generic 200 so the endpoint cannot be used
/// to probe which emails have accounts.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordDto,
    responses(
        (
            status = 200,
            description = "Generic acknowledgement, sent whether or not the account exists",
            body = inline(SuccessResponse<serde_json::Value>),
            example = json!({
                "success": true,
                "data": {
                    "message": "If an account exists for that email, a password reset link has been sent."
                }
            })
        ),
        (status = 400, description = "Malformed email", body = ErrorResponse),
    )
)]
#[post("/api/auth/forgot-password")]
pub async fn forgot_password_handler(
    req: web::Json<ForgotPasswordDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = match ForgotPasswordRequest::new(req.into_inner().email) {
        Ok(req) => req,
        Err(e) => {
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    match data.forgot_password_use_case.execute(request).await {
        Ok(()) => ApiResponse::success_message(GENERIC_MESSAGE),

        Err(ForgotPasswordError::InvalidEmail) => {
            ApiResponse::bad_request("VALIDATION_ERROR", "Invalid email format")
        }

        // Failures past validation still get the generic acknowledgement:
        // a 500 here would only fire for accounts that exist, which turns an
        // SMTP or DB outage into an enumeration oracle.
        Err(ForgotPasswordError::RepositoryError(ref e)) => {
            error!(error = %e, "Forgot-password repository error");
            ApiResponse::success_message(GENERIC_MESSAGE)
        }

        Err(ForgotPasswordError::EmailSendingFailed(ref e)) => {
            error!(error = %e, "Password reset email failed");
            ApiResponse::success_message(GENERIC_MESSAGE)
        }
    }
}
