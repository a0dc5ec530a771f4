use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::auth::adapter::incoming::web::routes::change_password::ChangePasswordDto;
use crate::auth::adapter::incoming::web::routes::forgot_password::ForgotPasswordDto;
use crate::auth::adapter::incoming::web::routes::get_profile::ProfileDto;
use crate::auth::adapter::incoming::web::routes::login_user::{
    LoginRequestDto, LoginResponse, LoginUserInfo,
};
use crate::auth::adapter::incoming::web::routes::logout_user::LogoutRequestDto;
use crate::auth::adapter::incoming::web::routes::magic_login::{
    MagicLoginDto, MagicLoginResponse, MagicLoginUserInfo,
};
use crate::auth::adapter::incoming::web::routes::refresh_token::{
    RefreshRequestDto, RefreshResponse,
};
use crate::auth::adapter::incoming::web::routes::register_user::{
    RegisterRequestDto, RegisterResponse,
};
use crate::auth::adapter::incoming::web::routes::reset_password::ResetPasswordDto;
use crate::auth::adapter::incoming::web::routes::send_magic_link::SendMagicLinkDto;
use crate::auth::adapter::incoming::web::routes::update_profile::UpdateProfileDto;
use crate::auth::adapter::incoming::web::routes::verify_email::VerifyEmailResponse;

use crate::dashboard::adapter::incoming::web::routes::create_layout::CreateLayoutDto;
use crate::dashboard::adapter::incoming::web::routes::create_widget_preference::CreateWidgetPreferenceDto;
use crate::dashboard::adapter::incoming::web::routes::list_layouts::LayoutDto;
use crate::dashboard::adapter::incoming::web::routes::list_widget_preferences::WidgetPreferenceDto;
use crate::dashboard::adapter::incoming::web::routes::update_layout::UpdateLayoutDto;
use crate::dashboard::adapter::incoming::web::routes::update_widget_preference::UpdateWidgetPreferenceDto;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dashboard Backend API",
        version = "1.0.0",
        description = "User accounts, authentication and per-user dashboard configuration"
    ),
    // Handlers are referenced through their defining modules; the macro's
    // companion items are not part of the routes re-export surface.
    paths(
        // Auth endpoints
        crate::auth::adapter::incoming::web::routes::register_user::register_user_handler,
        crate::auth::adapter::incoming::web::routes::verify_email::verify_email_handler,
        crate::auth::adapter::incoming::web::routes::login_user::login_user_handler,
        crate::auth::adapter::incoming::web::routes::refresh_token::refresh_token_handler,
        crate::auth::adapter::incoming::web::routes::logout_user::logout_user_handler,
        crate::auth::adapter::incoming::web::routes::send_magic_link::send_magic_link_handler,
        crate::auth::adapter::incoming::web::routes::magic_login::magic_login_handler,
        crate::auth::adapter::incoming::web::routes::magic_login::magic_login_get_handler,
        crate::auth::adapter::incoming::web::routes::forgot_password::forgot_password_handler,
        crate::auth::adapter::incoming::web::routes::reset_password::reset_password_handler,
        crate::auth::adapter::incoming::web::routes::change_password::change_password_handler,
        crate::auth::adapter::incoming::web::routes::get_profile::get_profile_handler,
        crate::auth::adapter::incoming::web::routes::update_profile::update_profile_handler,
        crate::auth::adapter::incoming::web::routes::delete_account::delete_account_handler,

        // Dashboard endpoints
        crate::dashboard::adapter::incoming::web::routes::list_layouts::list_layouts_handler,
        crate::dashboard::adapter::incoming::web::routes::create_layout::create_layout_handler,
        crate::dashboard::adapter::incoming::web::routes::get_layout::get_layout_handler,
        crate::dashboard::adapter::incoming::web::routes::update_layout::update_layout_handler,
        crate::dashboard::adapter::incoming::web::routes::delete_layout::delete_layout_handler,
        crate::dashboard::adapter::incoming::web::routes::list_widget_preferences::list_widget_preferences_handler,
        crate::dashboard::adapter::incoming::web::routes::create_widget_preference::create_widget_preference_handler,
        crate::dashboard::adapter::incoming::web::routes::update_widget_preference::update_widget_preference_handler,
        crate::dashboard::adapter::incoming::web::routes::delete_widget_preference::delete_widget_preference_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<ProfileDto>,
            ErrorResponse,
            ErrorDetail,

            // Auth DTOs
            RegisterRequestDto,
            RegisterResponse,
            VerifyEmailResponse,
            LoginRequestDto,
            LoginResponse,
            LoginUserInfo,
            RefreshRequestDto,
            RefreshResponse,
            LogoutRequestDto,
            SendMagicLinkDto,
            MagicLoginDto,
            MagicLoginResponse,
            MagicLoginUserInfo,
            ForgotPasswordDto,
            ResetPasswordDto,
            ChangePasswordDto,
            ProfileDto,
            UpdateProfileDto,

            // Dashboard DTOs
            LayoutDto,
            CreateLayoutDto,
            UpdateLayoutDto,
            WidgetPreferenceDto,
            CreateWidgetPreferenceDto,
            UpdateWidgetPreferenceDto
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Registration, login and account endpoints"),
        (name = "layouts", description = "Dashboard layout endpoints"),
        (name = "widget-preferences", description = "Widget preference endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Enter your JWT access token"))
                        .build(),
                ),
            )
        }
    }
}
