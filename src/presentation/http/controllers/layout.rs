// src/presentation/http/controllers/layout.rs
use crate::application::dto::PageDataDto;
use crate::presentation::http::{
    cookies::cleared_session_cookie,
    error::{HttpResult, IntoHttpResult},
    extractors::SessionToken,
    state::HttpState,
};
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;

#[utoipa::path(
    get,
    path = "/api/layout",
    responses(
        (status = 200, description = "Signed-in user, seed recipes and invalidation tags for a page load.", body = PageDataDto),
        (status = 500, description = "Backend unavailable.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Session"
)]
pub async fn load_layout(
    Extension(state): Extension<HttpState>,
    SessionToken(token): SessionToken,
    jar: CookieJar,
) -> HttpResult<(CookieJar, Json<PageDataDto>)> {
    let context = state.services.layout_queries.load(token).await.into_http()?;

    // A token the backend no longer honours is dropped from the browser.
    let jar = if context.scope.token().is_some() && context.session.is_none() {
        jar.add(cleared_session_cookie(state.settings.cookie_secure))
    } else {
        jar
    };

    Ok((jar, Json(context.into_dto())))
}
