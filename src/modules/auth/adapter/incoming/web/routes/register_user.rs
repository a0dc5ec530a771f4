use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::orchestrator::user_registration::{
    RegisterRequest, RegistrationOutcome, UserRegistrationError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Registration request from client
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequestDto {
    /// Email address
    #[schema(example = "jane@example.com")]
    pub email: String,

    /// Password
    #[schema(example = "SecurePass123!")]
    pub password: String,

    /// First name
    #[schema(example = "Jane")]
    pub first_name: String,

    /// Last name
    #[schema(example = "Doe")]
    pub last_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponse {
    /// New user ID (UUID)
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    user_id: String,

    /// Email address the verification link was sent to
    #[schema(example = "jane@example.com")]
    email: String,

    #[schema(example = "User created successfully. Please check your email to verify your account.")]
    message: String,
}

/// Register a new account
///
/// Creates an unverified account and emails a verification link. Registering
/// an email that already belongs to an unverified account resends the link.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequestDto,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<RegisterResponse>)),
        (
            status = 200,
            description = "Account already exists but is unverified; verification email resent",
            body = inline(SuccessResponse<RegisterResponse>)
        ),
        (
            status = 400,
            description = "Invalid input or email already in use",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "EMAIL_ALREADY_IN_USE",
                    "message": "Email is already in use"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Registration attempt");

    let request = match RegisterRequest::new(dto.email, dto.password, dto.first_name, dto.last_name)
    {
        Ok(req) => req,
        Err(e) => {
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    match data.register_user_orchestrator.register_user(request).await {
        Ok(output) => match output.outcome {
            RegistrationOutcome::Created => {
                info!(user_id = %output.user_id, "User registered");
                ApiResponse::created(RegisterResponse {
                    user_id: output.user_id.to_string(),
                    email: output.email,
                    message:
                        "User created successfully. Please check your email to verify your account."
                            .to_string(),
                })
            }
            RegistrationOutcome::VerificationResent => {
                info!(user_id = %output.user_id, "Verification email resent");
                ApiResponse::success(RegisterResponse {
                    user_id: output.user_id.to_string(),
                    email: output.email,
                    message: "Verification email resent. Please check your inbox.".to_string(),
                })
            }
        },

        Err(UserRegistrationError::EmailAlreadyInUse) => {
            warn!("Registration failed: email already in use");
            ApiResponse::bad_request("EMAIL_ALREADY_IN_USE", "Email is already in use")
        }

        Err(UserRegistrationError::HashingFailed(ref e)) => {
            error!(error = %e, "Password hashing failed");
            ApiResponse::internal_error()
        }

        Err(UserRegistrationError::RepositoryError(ref e)) => {
            error!(error = %e, "Registration repository error");
            ApiResponse::internal_error()
        }
    }
}
