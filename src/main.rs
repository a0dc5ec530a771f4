pub mod modules;
pub use modules::auth;
pub use modules::dashboard;
pub use modules::email;
pub mod api;
pub mod health;
pub mod shared;

use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::auth::adapter::outgoing::reset_token_repository_postgres::ResetTokenRepositoryPostgres;
use crate::auth::adapter::outgoing::token_blacklist_redis::RedisTokenBlacklist;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::use_cases::{
    change_password::{ChangePasswordUseCase, IChangePasswordUseCase},
    delete_account::{DeleteAccountUseCase, IDeleteAccountUseCase},
    fetch_profile::{FetchProfileUseCase, IFetchProfileUseCase},
    forgot_password::{ForgotPasswordUseCase, IForgotPasswordUseCase},
    login_user::{ILoginUserUseCase, LoginUserUseCase},
    logout_user::{ILogoutUseCase, LogoutUseCase},
    magic_link_login::{IMagicLinkLoginUseCase, MagicLinkLoginUseCase},
    refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase},
    request_magic_link::{IRequestMagicLinkUseCase, RequestMagicLinkUseCase},
    reset_password::{IResetPasswordUseCase, ResetPasswordUseCase},
    update_profile::{IUpdateProfileUseCase, UpdateProfileUseCase},
    verify_email::{IVerifyEmailUseCase, VerifyEmailUseCase},
};

use crate::dashboard::adapter::outgoing::layout_repository_postgres::LayoutRepositoryPostgres;
use crate::dashboard::adapter::outgoing::widget_preference_repository_postgres::WidgetPreferenceRepositoryPostgres;
use crate::dashboard::application::use_cases::{
    create_layout::{CreateLayoutUseCase, ICreateLayoutUseCase},
    create_widget_preference::{CreateWidgetPreferenceUseCase, ICreateWidgetPreferenceUseCase},
    delete_layout::{DeleteLayoutUseCase, IDeleteLayoutUseCase},
    delete_widget_preference::{DeleteWidgetPreferenceUseCase, IDeleteWidgetPreferenceUseCase},
    get_layout::{GetLayoutUseCase, IGetLayoutUseCase},
    list_layouts::{IListLayoutsUseCase, ListLayoutsUseCase},
    list_widget_preferences::{IListWidgetPreferencesUseCase, ListWidgetPreferencesUseCase},
    update_layout::{IUpdateLayoutUseCase, UpdateLayoutUseCase},
    update_widget_preference::{IUpdateWidgetPreferenceUseCase, UpdateWidgetPreferenceUseCase},
};

use crate::auth::application::ports::outgoing::token_blacklist::TokenBlacklist;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::email::adapter::outgoing::smtp_sender::SmtpEmailSender;
use crate::email::application::services::UserEmailService;
use crate::modules::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;

use actix_web::{web, App, HttpServer};
use deadpool_redis::{Config, Runtime};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

/// Dashboard use cases grouped so AppState stays readable.
#[derive(Clone)]
pub struct DashboardUseCases {
    pub list_layouts: Arc<dyn IListLayoutsUseCase>,
    pub create_layout: Arc<dyn ICreateLayoutUseCase>,
    pub get_layout: Arc<dyn IGetLayoutUseCase>,
    pub update_layout: Arc<dyn IUpdateLayoutUseCase>,
    pub delete_layout: Arc<dyn IDeleteLayoutUseCase>,
    pub list_widget_preferences: Arc<dyn IListWidgetPreferencesUseCase>,
    pub create_widget_preference: Arc<dyn ICreateWidgetPreferenceUseCase>,
    pub update_widget_preference: Arc<dyn IUpdateWidgetPreferenceUseCase>,
    pub delete_widget_preference: Arc<dyn IDeleteWidgetPreferenceUseCase>,
}

#[derive(Clone)]
pub struct AppState {
    pub register_user_orchestrator: Arc<UserRegistrationOrchestrator>,
    pub verify_email_use_case: Arc<dyn IVerifyEmailUseCase>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase>,
    pub refresh_token_use_case: Arc<dyn IRefreshTokenUseCase>,
    pub logout_use_case: Arc<dyn ILogoutUseCase>,
    pub request_magic_link_use_case: Arc<dyn IRequestMagicLinkUseCase>,
    pub magic_link_login_use_case: Arc<dyn IMagicLinkLoginUseCase>,
    pub forgot_password_use_case: Arc<dyn IForgotPasswordUseCase>,
    pub reset_password_use_case: Arc<dyn IResetPasswordUseCase>,
    pub change_password_use_case: Arc<dyn IChangePasswordUseCase>,
    pub fetch_profile_use_case: Arc<dyn IFetchProfileUseCase>,
    pub update_profile_use_case: Arc<dyn IUpdateProfileUseCase>,
    pub delete_account_use_case: Arc<dyn IDeleteAccountUseCase>,
    pub dashboard: DashboardUseCases,

    // Used by the auth extractors, not by handlers directly.
    pub token_provider: Arc<dyn TokenProvider>,
    pub token_blacklist: Arc<dyn TokenBlacklist>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
    use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
    use crate::auth::application::ports::outgoing::reset_token_repository::ResetTokenRepository;
    use crate::auth::application::ports::outgoing::user_query::UserQuery;
    use crate::auth::application::ports::outgoing::user_repository::UserRepository;
    use crate::dashboard::application::ports::outgoing::layout_repository::LayoutRepository;
    use crate::dashboard::application::ports::outgoing::widget_preference_repository::WidgetPreferenceRepository;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");
    let redis_url = env::var("REDIS_URL").expect("REDIS_URL is not set in .env file");
    let frontend_url = env::var("FRONTEND_URL").expect("FRONTEND_URL is not set in .env file");

    // SMTP SETUPS
    let from_email = std::env::var("EMAIL_FROM").expect("EMAIL_FROM not set");
    let smtp_sender = if std::env::var("RUST_ENV").as_deref() == Ok("test") {
        // Local Mailpit
        let host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port: u16 = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .expect("Invalid SMTP_PORT");

        SmtpEmailSender::new_local(&host, port, &from_email)
    } else {
        // Production SMTP
        let smtp_server = std::env::var("SMTP_SERVER").expect("SMTP_SERVER not set");
        let smtp_user = std::env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set");
        let smtp_pass = std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set");

        SmtpEmailSender::new(&smtp_server, &smtp_user, &smtp_pass, &from_email)
            .expect("Failed to build SMTP transport")
    };

    let server_url = format!("{host}:{port}");
    info!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    // Redis connection
    let redis_pool = Config::from_url(&redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .expect("Failed to create Redis pool");

    let redis_arc = Arc::new(redis_pool);

    // Token and password machinery
    let jwt_config = JwtConfig::from_env();
    let refresh_token_expiry = jwt_config.refresh_token_expiry;
    let jwt_service = Arc::new(JwtTokenService::new(jwt_config));
    let token_provider: Arc<dyn TokenProvider> = jwt_service.clone();

    // Revoked tokens only need to outlive the longest-lived token
    let token_blacklist: Arc<dyn TokenBlacklist> = Arc::new(RedisTokenBlacklist::new(
        Arc::clone(&redis_arc),
        refresh_token_expiry,
    ));

    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::from_env());

    // Repositories
    let user_repo: Arc<dyn UserRepository> =
        Arc::new(UserRepositoryPostgres::new(Arc::clone(&db_arc)));
    let user_query: Arc<dyn UserQuery> = Arc::new(UserQueryPostgres::new(Arc::clone(&db_arc)));
    let reset_tokens: Arc<dyn ResetTokenRepository> =
        Arc::new(ResetTokenRepositoryPostgres::new(Arc::clone(&db_arc)));
    let layout_repo: Arc<dyn LayoutRepository> =
        Arc::new(LayoutRepositoryPostgres::new(Arc::clone(&db_arc)));
    let widget_pref_repo: Arc<dyn WidgetPreferenceRepository> =
        Arc::new(WidgetPreferenceRepositoryPostgres::new(Arc::clone(&db_arc)));

    // Email composition
    let user_email_service = UserEmailService::new(
        token_provider.clone(),
        Arc::new(smtp_sender),
        frontend_url,
    );
    let email_notifier: Arc<dyn UserEmailNotifier> = Arc::new(user_email_service);

    // Auth use cases
    let register_user_orchestrator = UserRegistrationOrchestrator::new(
        user_query.clone(),
        user_repo.clone(),
        password_hasher.clone(),
        email_notifier.clone(),
    );
    let verify_email_use_case =
        VerifyEmailUseCase::new(token_provider.clone(), user_repo.clone());
    let login_user_use_case = LoginUserUseCase::new(
        user_query.clone(),
        password_hasher.clone(),
        token_provider.clone(),
    );
    let refresh_token_use_case =
        RefreshTokenUseCase::new(token_provider.clone(), token_blacklist.clone());
    let logout_use_case = LogoutUseCase::new(token_blacklist.clone(), token_provider.clone());
    let request_magic_link_use_case =
        RequestMagicLinkUseCase::new(user_query.clone(), email_notifier.clone());
    let magic_link_login_use_case =
        MagicLinkLoginUseCase::new(token_provider.clone(), user_query.clone());
    let forgot_password_use_case = ForgotPasswordUseCase::new(
        user_query.clone(),
        reset_tokens.clone(),
        email_notifier.clone(),
    );
    let reset_password_use_case = ResetPasswordUseCase::new(
        reset_tokens.clone(),
        password_hasher.clone(),
        user_repo.clone(),
    );
    let change_password_use_case = ChangePasswordUseCase::new(
        password_hasher.clone(),
        user_repo.clone(),
        token_blacklist.clone(),
    );
    let fetch_profile_use_case = FetchProfileUseCase::new(user_query.clone());
    let update_profile_use_case = UpdateProfileUseCase::new(user_repo.clone());
    let delete_account_use_case =
        DeleteAccountUseCase::new(user_repo.clone(), token_blacklist.clone());

    // Dashboard use cases
    let dashboard = DashboardUseCases {
        list_layouts: Arc::new(ListLayoutsUseCase::new(layout_repo.clone())),
        create_layout: Arc::new(CreateLayoutUseCase::new(layout_repo.clone())),
        get_layout: Arc::new(GetLayoutUseCase::new(layout_repo.clone())),
        update_layout: Arc::new(UpdateLayoutUseCase::new(layout_repo.clone())),
        delete_layout: Arc::new(DeleteLayoutUseCase::new(layout_repo)),
        list_widget_preferences: Arc::new(ListWidgetPreferencesUseCase::new(
            widget_pref_repo.clone(),
        )),
        create_widget_preference: Arc::new(CreateWidgetPreferenceUseCase::new(
            widget_pref_repo.clone(),
        )),
        update_widget_preference: Arc::new(UpdateWidgetPreferenceUseCase::new(
            widget_pref_repo.clone(),
        )),
        delete_widget_preference: Arc::new(DeleteWidgetPreferenceUseCase::new(widget_pref_repo)),
    };

    let state = AppState {
        register_user_orchestrator: Arc::new(register_user_orchestrator),
        verify_email_use_case: Arc::new(verify_email_use_case),
        login_user_use_case: Arc::new(login_user_use_case),
        refresh_token_use_case: Arc::new(refresh_token_use_case),
        logout_use_case: Arc::new(logout_use_case),
        request_magic_link_use_case: Arc::new(request_magic_link_use_case),
        magic_link_login_use_case: Arc::new(magic_link_login_use_case),
        forgot_password_use_case: Arc::new(forgot_password_use_case),
        reset_password_use_case: Arc::new(reset_password_use_case),
        change_password_use_case: Arc::new(change_password_use_case),
        fetch_profile_use_case: Arc::new(fetch_profile_use_case),
        update_profile_use_case: Arc::new(update_profile_use_case),
        delete_account_use_case: Arc::new(delete_account_use_case),
        dashboard,
        token_provider,
        token_blacklist,
    };

    // Clone db_arc for use in HttpServer closure
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(shared::api::json_config::custom_json_config())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(web::Data::new(Arc::clone(&redis_arc)))
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", api::openapi::ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    crate::auth::adapter::incoming::web::routes::configure(cfg);
    // Dashboard
    crate::dashboard::adapter::incoming::web::routes::configure(cfg);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
