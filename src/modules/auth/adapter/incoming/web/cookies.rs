//! Auth cookie construction shared by the handlers that set or clear them.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

fn auth_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .finish()
}

pub fn access_cookie(token: String) -> Cookie<'static> {
    auth_cookie(ACCESS_COOKIE, token)
}

pub fn refresh_cookie(token: String) -> Cookie<'static> {
    auth_cookie(REFRESH_COOKIE, token)
}

/// Max-Age 0 versions that make the browser drop both cookies.
pub fn expired_auth_cookies() -> [Cookie<'static>; 2] {
    let expire = |name: &'static str| {
        let mut cookie = auth_cookie(name, String::new());
        cookie.set_max_age(Duration::ZERO);
        cookie
    };
    [expire(ACCESS_COOKIE), expire(REFRESH_COOKIE)]
}
