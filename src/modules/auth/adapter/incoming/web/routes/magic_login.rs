use actix_web::{get, post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::cookies::{access_cookie, refresh_cookie};
use crate::modules::auth::application::use_cases::login_user::LoginUserResponse;
use crate::modules::auth::application::use_cases::magic_link_login::MagicLinkLoginError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct MagicLoginDto {
    /// Signed magic-link token from the email
    pub token: String,
}

#[derive(Deserialize)]
pub struct MagicLoginQuery {
    pub token: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct MagicLoginResponse {
    access_token: String,
    refresh_token: String,
    user: MagicLoginUserInfo,
}

#[derive(Serialize, ToSchema)]
pub struct MagicLoginUserInfo {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    is_verified: bool,
}

/// Both the token pair in the body (for API clients) and httponly cookies
/// (for the browser hitting the GET link directly).
fn login_response(response: LoginUserResponse) -> HttpResponse {
    info!(user_id = %response.user.id, "Magic link login");

    HttpResponse::Ok()
        .cookie(access_cookie(response.access_token.clone()))
        .cookie(refresh_cookie(response.refresh_token.clone()))
        .json(crate::shared::api::response::ApiResponse {
            success: true,
            data: Some(MagicLoginResponse {
                access_token: response.access_token,
                refresh_token: response.refresh_token,
                user: MagicLoginUserInfo {
                    id: response.user.id.to_string(),
                    email: response.user.email,
                    first_name: response.user.first_name,
                    last_name: response.user.last_name,
                    is_verified: response.user.is_verified,
                },
            }),
            error: None,
        })
}

fn login_error(error: MagicLinkLoginError) -> HttpResponse {
    match error {
        MagicLinkLoginError::TokenExpired => {
            warn!("Magic login failed: token expired");
            ApiResponse::bad_request("TOKEN_EXPIRED", "Magic link has expired")
        }

        MagicLinkLoginError::InvalidToken => {
            warn!("Magic login failed: invalid token");
            ApiResponse::bad_request("INVALID_TOKEN", "Invalid magic link token")
        }

        MagicLinkLoginError::TokenGenerationFailed(ref e) => {
            error!(error = %e, "Token generation failed");
            ApiResponse::internal_error()
        }

        MagicLinkLoginError::QueryError(ref e) => {
            error!(error = %e, "Magic login query failed");
            ApiResponse::internal_error()
        }
    }
}

/// Log in with a magic link token
#[utoipa::path(
    post,
    path = "/api/auth/magic-login",
    tag = "auth",
    request_body = MagicLoginDto,
    responses(
        (status = 200, description = "Logged in; auth cookies set", body = inline(SuccessResponse<MagicLoginResponse>)),
        (
            status = 400,
            description = "Invalid or expired magic link",
            body = ErrorResponse,
            example = json!({
                "success": false,
                "error": { "code": "TOKEN_EXPIRED", "message": "Magic link has expired" }
            })
        ),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/magic-login")]
pub async fn magic_login_handler(
    req: web::Json<MagicLoginDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .magic_link_login_use_case
        .execute(&req.into_inner().token)
        .await
    {
        Ok(response) => login_response(response),
        Err(e) => login_error(e),
    }
}

/// Log in with a magic link token (browser link form)
#[utoipa::path(
    get,
    path = "/api/auth/magic-login",
    tag = "auth",
    params(
        ("token" = String, Query, description = "Signed magic-link token")
    ),
    responses(
        (status = 200, description = "Logged in; auth cookies set", body = inline(SuccessResponse<MagicLoginResponse>)),
        (status = 400, description = "Missing, invalid or expired token", body = ErrorResponse),
    )
)]
#[get("/api/auth/magic-login")]
pub async fn magic_login_get_handler(
    query: web::Query<MagicLoginQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let token = match query.into_inner().token {
        Some(token) if !token.trim().is_empty() => token,
        _ => {
            return ApiResponse::bad_request("VALIDATION_ERROR", "Missing token query parameter");
        }
    };

    match data.magic_link_login_use_case.execute(&token).await {
        Ok(response) => login_response(response),
        Err(e) => login_error(e),
    }
}
