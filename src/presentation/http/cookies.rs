// src/presentation/http/cookies.rs
use crate::domain::user::Session;
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

pub const SESSION_COOKIE: &str = "rb-access-token";

/// HttpOnly cookie carrying the session's access token. Lives as long as the
/// token when the auth service reported a lifetime.
pub fn session_cookie(session: &Session, secure: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((SESSION_COOKIE, session.access_token.as_str().to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure);

    if let Some(secs) = session.expires_in {
        builder = builder.max_age(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
    }

    builder.build()
}

pub fn cleared_session_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}
