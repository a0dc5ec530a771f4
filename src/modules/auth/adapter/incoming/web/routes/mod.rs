pub mod change_password;
pub mod delete_account;
pub mod forgot_password;
pub mod get_profile;
pub mod login_user;
pub mod logout_user;
pub mod magic_login;
pub mod refresh_token;
pub mod register_user;
pub mod reset_password;
pub mod send_magic_link;
pub mod update_profile;
pub mod verify_email;

pub use change_password::change_password_handler;
pub use delete_account::delete_account_handler;
pub use forgot_password::forgot_password_handler;
pub use get_profile::get_profile_handler;
pub use login_user::login_user_handler;
pub use logout_user::logout_user_handler;
pub use magic_login::{magic_login_get_handler, magic_login_handler};
pub use refresh_token::refresh_token_handler;
pub use register_user::register_user_handler;
pub use reset_password::reset_password_handler;
pub use send_magic_link::send_magic_link_handler;
pub use update_profile::update_profile_handler;
pub use verify_email::verify_email_handler;

/// Registers every auth endpoint on the app.
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(register_user_handler)
        .service(verify_email_handler)
        .service(login_user_handler)
        .service(refresh_token_handler)
        .service(logout_user_handler)
        .service(send_magic_link_handler)
        .service(magic_login_handler)
        .service(magic_login_get_handler)
        .service(forgot_password_handler)
        .service(reset_password_handler)
        .service(change_password_handler)
        .service(get_profile_handler)
        .service(update_profile_handler)
        .service(delete_account_handler);
}
