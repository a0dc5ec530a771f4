pub mod change_password;
pub mod delete_account;
pub mod fetch_profile;
pub mod forgot_password;
pub mod login_user;
pub mod logout_user;
pub mod magic_link_login;
pub mod refresh_token;
pub mod request_magic_link;
pub mod reset_password;
pub mod update_profile;
pub mod verify_email;
