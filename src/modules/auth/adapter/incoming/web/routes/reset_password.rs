use actix_web::{post, web, Responder};
use serde::Deserialize;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::reset_password::{
    ResetPasswordError, ResetPasswordRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct ResetPasswordDto {
    /// Raw reset token from the email link
    pub token: String,

    /// New password
    #[schema(example = "NewSecurePass123!")]
    pub password: String,
}

/// Complete a password reset
///
/// Consumes the single-use token mailed by forgot-password and stores the
/// new password.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password/{user_id}",
    tag = "auth",
    params(
        ("user_id" = Uuid, Path, description = "User the reset was issued for")
    ),
    request_body = ResetPasswordDto,
    responses(
        (
            status = 200,
            description = "Password updated",
            body = inline(SuccessResponse<serde_json::Value>),
            example = json!({
                "success": true,
                "data": { "message": "Password has been reset. You can now log in." }
            })
        ),
        (
            status = 400,
            description = "No reset request, token used, expired or mismatched",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "TOKEN_ALREADY_USED", "message": "Reset token has already been used" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/reset-password/{user_id}")]
pub async fn reset_password_handler(
    path: web::Path<Uuid>,
    req: web::Json<ResetPasswordDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();
    let dto = req.into_inner();

    let request = match ResetPasswordRequest::new(user_id, dto.token, dto.password) {
        Ok(req) => req,
        Err(e) => {
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    match data.reset_password_use_case.execute(request).await {
        Ok(()) => ApiResponse::success_message("Password has been reset. You can now log in."),

        Err(ResetPasswordError::NoResetRequest) => {
            warn!(user_id = %user_id, "Reset failed: no reset request");
            ApiResponse::bad_request(
                "NO_RESET_REQUEST",
                "No password reset was requested for this account",
            )
        }

        Err(ResetPasswordError::TokenAlreadyUsed) => {
            warn!(user_id = %user_id, "Reset failed: token already used");
            ApiResponse::bad_request("TOKEN_ALREADY_USED", "Reset token has already been used")
        }

        Err(ResetPasswordError::TokenExpired) => {
            warn!(user_id = %user_id, "Reset failed: token expired");
            ApiResponse::bad_request("TOKEN_EXPIRED", "Reset token has expired")
        }

        Err(ResetPasswordError::TokenMismatch) => {
            warn!(user_id = %user_id, "Reset failed: token mismatch");
            ApiResponse::bad_request("TOKEN_MISMATCH", "Reset token does not match")
        }

        Err(ResetPasswordError::EmptyPassword) => {
            ApiResponse::bad_request("VALIDATION_ERROR", "Password cannot be empty")
        }

        Err(ResetPasswordError::HashingFailed(ref e)) => {
            error!(error = %e, "Password hashing failed");
            ApiResponse::internal_error()
        }

        Err(ResetPasswordError::RepositoryError(ref e)) => {
            error!(error = %e, "Reset-password repository error");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::use_cases::reset_password::IResetPasswordUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct MockResetSuccess;

    #[async_trait]
    impl IResetPasswordUseCase for MockResetSuccess {
        async fn execute(&self, _request: ResetPasswordRequest) -> Result<(), ResetPasswordError> {
            Ok(())
        }
    }

    struct MockResetFails(ResetPasswordError);

    #[async_trait]
    impl IResetPasswordUseCase for MockResetFails {
        async fn execute(&self, _request: ResetPasswordRequest) -> Result<(), ResetPasswordError> {
            Err(self.0.clone())
        }
    }

    async fn call(use_case: impl IResetPasswordUseCase + 'static) -> (u16, serde_json::Value) {
        let app_state = TestAppStateBuilder::default()
            .with_reset_password(use_case)
            .build();

        let app = test::init_service(
            App::new().app_data(app_state).service(reset_password_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/auth/reset-password/{}", Uuid::new_v4()))
            .set_json(&serde_json::json!({
                "token": "raw-reset-token",
                "password": "NewSecurePass123!"
            }))
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_reset_password_success() {
        let (status, body) = call(MockResetSuccess).await;

        assert_eq!(status, 200);
        assert!(body["data"]["message"].as_str().unwrap().contains("reset"));
    }

    #[actix_web::test]
    async fn test_reset_password_error_codes() {
        for (error, code) in [
            (ResetPasswordError::NoResetRequest, "NO_RESET_REQUEST"),
            (ResetPasswordError::TokenAlreadyUsed, "TOKEN_ALREADY_USED"),
            (ResetPasswordError::TokenExpired, "TOKEN_EXPIRED"),
            (ResetPasswordError::TokenMismatch, "TOKEN_MISMATCH"),
        ] {
            let (status, body) = call(MockResetFails(error)).await;

            assert_eq!(status, 400);
            assert_eq!(body["error"]["code"], code);
        }
    }

    #[actix_web::test]
    async fn test_reset_password_empty_password_rejected() {
        let app_state = TestAppStateBuilder::default()
            .with_reset_password(MockResetSuccess)
            .build();

        let app = test::init_service(
            App::new().app_data(app_state).service(reset_password_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri(&format!("/api/auth/reset-password/{}", Uuid::new_v4()))
            .set_json(&serde_json::json!({"token": "raw-reset-token", "password": "  "}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_reset_password_hashing_failure_is_500() {
        let (status, body) =
            call(MockResetFails(ResetPasswordError::HashingFailed("argon2".into()))).await;

        assert_eq!(status, 500);
        assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    }
}
