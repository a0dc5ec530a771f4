use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Login request from client
#[derive(Deserialize, ToSchema)]
pub struct LoginRequestDto {
    /// Email address
    #[schema(example = "jane@example.com")]
    pub email: String,

    /// Password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token (short-lived)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,

    /// JWT refresh token (long-lived)
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    refresh_token: String,

    /// Authenticated user information
    user: LoginUserInfo,
}

#[derive(Serialize, ToSchema)]
pub struct LoginUserInfo {
    /// User ID (UUID)
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    id: String,

    #[schema(example = "jane@example.com")]
    email: String,

    #[schema(example = "Jane")]
    first_name: String,

    #[schema(example = "Doe")]
    last_name: String,

    #[schema(example = true)]
    is_verified: bool,
}

/// User login
///
/// Authenticates with email and password, returns JWT access and refresh
/// tokens. Unknown emails, wrong passwords and unverified accounts all get
/// the same 401.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<LoginResponse>)),
        (
            status = 401,
            description = "Invalid credentials",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_CREDENTIALS",
                    "message": "Invalid email or password"
                }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    info!(email = %dto.email, "Login attempt");

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => {
            return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string());
        }
    };

    match data.login_user_use_case.execute(request).await {
        Ok(response) => {
            info!(user_id = %response.user.id, "User logged in");

            ApiResponse::success(LoginResponse {
                access_token: response.access_token,
                refresh_token: response.refresh_token,
                user: LoginUserInfo {
                    id: response.user.id.to_string(),
                    email: response.user.email,
                    first_name: response.user.first_name,
                    last_name: response.user.last_name,
                    is_verified: response.user.is_verified,
                },
            })
        }

        Err(LoginError::InvalidCredentials) => {
            warn!("Login failed: invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(LoginError::PasswordVerificationFailed(ref e)) => {
            error!(error = %e, "Password verification failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::TokenGenerationFailed(ref e)) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::QueryError(ref e)) => {
            error!(error = %e, "Database query failed");
            ApiResponse::internal_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::application::use_cases::login_user::{
        ILoginUserUseCase, LoginUserResponse, UserInfo,
    };
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use actix_web::{test, App};
    use async_trait::async_trait;
    use uuid::Uuid;

    struct MockLoginSuccess;

    #[async_trait]
    impl ILoginUserUseCase for MockLoginSuccess {
        async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
            Ok(LoginUserResponse {
                access_token: "FAKE_TEST_ACCESS_TOKEN".to_string(),
                refresh_token: "FAKE_TEST_REFRESH_TOKEN".to_string(),
                user: UserInfo {
                    id: Uuid::new_v4(),
                    email: "jane@example.com".to_string(),
                    first_name: "Jane".to_string(),
                    last_name: "Doe".to_string(),
                    is_verified: true,
                },
            })
        }
    }

    struct MockLoginFails(LoginError);

    #[async_trait]
    impl ILoginUserUseCase for MockLoginFails {
        async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
            Err(self.0.clone())
        }
    }

    fn valid_body() -> serde_json::Value {
        serde_json::json!({
            "email": "jane@example.com",
            "password": "SecurePass123!"
        })
    }

    async fn call(
        use_case: impl ILoginUserUseCase + 'static,
        body: serde_json::Value,
    ) -> (u16, serde_json::Value) {
        let app_state = TestAppStateBuilder::default()
            .with_login_user(use_case)
            .build();

        let app =
            test::init_service(App::new().app_data(app_state).service(login_user_handler)).await;

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(&body)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status().as_u16();
        let body: serde_json::Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn test_login_success() {
        let (status, body) = call(MockLoginSuccess, valid_body()).await;

        assert_eq!(status, 200);
        assert_eq!(body["success"], true);
        assert!(body["data"]["access_token"].is_string());
        assert!(body["data"]["refresh_token"].is_string());
        assert_eq!(body["data"]["user"]["email"], "jane@example.com");
        assert_eq!(body["data"]["user"]["is_verified"], true);
    }

    #[actix_web::test]
    async fn test_login_invalid_credentials() {
        let (status, body) = call(MockLoginFails(LoginError::InvalidCredentials), valid_body()).await;

        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "INVALID_CREDENTIALS");
        assert!(body.get("data").is_none());
    }

    #[actix_web::test]
    async fn test_login_internal_errors_are_generic() {
        for error in [
            LoginError::PasswordVerificationFailed("argon2 failed".to_string()),
            LoginError::TokenGenerationFailed("jwt signing failed".to_string()),
            LoginError::QueryError("pool exhausted".to_string()),
        ] {
            let (status, body) = call(MockLoginFails(error), valid_body()).await;

            assert_eq!(status, 500);
            assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
            assert_eq!(body["error"]["message"], "An unexpected error occurred");
        }
    }

    #[actix_web::test]
    async fn test_login_rejects_invalid_email() {
        let (status, body) = call(
            MockLoginSuccess,
            serde_json::json!({"email": "notanemail", "password": "pw"}),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[actix_web::test]
    async fn test_login_rejects_empty_password() {
        let (status, body) = call(
            MockLoginSuccess,
            serde_json::json!({"email": "jane@example.com", "password": "   "}),
        )
        .await;

        assert_eq!(status, 400);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }
}
