// src/presentation/http/controllers/auth.rs
use crate::application::{
    commands::auth::{
        ConfirmEmailCommand, LoginCommand, ResetPasswordCommand, SignupCommand,
        UpdatePasswordCommand,
    },
    error::ApplicationError,
};
use crate::domain::user::AccessToken;
use crate::presentation::http::{
    cookies::{cleared_session_cookie, session_cookie},
    error::HttpError,
    extractors::{ActionForm, RequestOrigin, SessionToken},
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{Query, RawQuery},
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const GENERIC_FAILURE: &str = "Error. Try again.";
pub const UPDATE_PASSWORD_FAILURE: &str = "Server error. Try again later.";
pub const RESET_EMAIL_SENT: &str =
    "Please check your email for a magic link to log into the website.";
pub const PASSWORD_UPDATED: &str = "Password updated.";

const HOME: &str = "/";
const CALLBACK_PATH: &str = "/auth/callback";
const NEW_PASSWORD_PAGE: &str = "/auth/reset/newpw";

/// Named form actions served by `POST /auth?/<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    Signup,
    Login,
    Logout,
    Reset,
    UpdatePassword,
}

impl AuthAction {
    /// Read the action selector from a raw query string such as `/login` or
    /// `/login&redirect=1`.
    pub fn from_query(query: Option<&str>) -> Option<Self> {
        let selector = query?.split('&').next()?.strip_prefix('/')?;
        match selector {
            "signup" => Some(Self::Signup),
            "login" => Some(Self::Login),
            "logout" => Some(Self::Logout),
            "reset" => Some(Self::Reset),
            "updatePassword" => Some(Self::UpdatePassword),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Login => "login",
            Self::Logout => "logout",
            Self::Reset => "reset",
            Self::UpdatePassword => "updatePassword",
        }
    }
}

/// Fields accepted by the auth form actions.
#[derive(Debug, Deserialize, ToSchema)]
pub struct AuthActionForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of a failed action. Always sent with HTTP 500.
#[derive(Debug, Serialize, ToSchema)]
pub struct ActionFailure {
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl ActionFailure {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            success: false,
            email: None,
            kind: None,
        }
    }

    pub fn with_email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = Some(kind.to_string());
        self
    }
}

impl IntoResponse for ActionFailure {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActionSuccess {
    pub message: String,
    pub success: bool,
}

impl ActionSuccess {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
            success: true,
        }
    }
}

#[utoipa::path(
    post,
    path = "/auth",
    params(
        ("action" = String, Query, description = "Action selector written as `?/<action>`: signup, login, logout, reset or updatePassword.")
    ),
    request_body(content = AuthActionForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "reset / updatePassword succeeded.", body = ActionSuccess),
        (status = 302, description = "signup / login / logout succeeded; redirects to `/`."),
        (status = 404, description = "Unknown action.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "The action failed.", body = ActionFailure)
    ),
    tag = "Auth"
)]
pub async fn dispatch(
    Extension(state): Extension<HttpState>,
    RawQuery(query): RawQuery,
    SessionToken(token): SessionToken,
    RequestOrigin(origin): RequestOrigin,
    jar: CookieJar,
    form: ActionForm,
) -> Response {
    let Some(action) = AuthAction::from_query(query.as_deref()) else {
        return HttpError::not_found("no such form action").into_response();
    };
    tracing::debug!(action = action.as_str(), "auth action submitted");

    match action {
        AuthAction::Signup => signup(&state, &origin, jar, &form).await,
        AuthAction::Login => login(&state, jar, &form).await,
        AuthAction::Logout => logout(&state, token, jar).await,
        AuthAction::Reset => reset(&state, &origin, &form).await,
        AuthAction::UpdatePassword => update_password(&state, token, &form).await,
    }
}

async fn signup(state: &HttpState, origin: &str, jar: CookieJar, form: &ActionForm) -> Response {
    let email = form.field("email");
    let command = SignupCommand {
        email: email.clone(),
        password: form.field("password"),
        redirect_to: format!("{origin}{CALLBACK_PATH}"),
    };

    match state.services.auth_commands.signup(command).await {
        Ok(Some(session)) => {
            let jar = jar.add(session_cookie(&session, state.settings.cookie_secure));
            redirect_found(jar, HOME)
        }
        Ok(None) => redirect_found(jar, HOME),
        Err(err) => {
            log_failure(AuthAction::Signup, &err);
            ActionFailure::new(GENERIC_FAILURE)
                .with_email(email)
                .into_response()
        }
    }
}

async fn login(state: &HttpState, jar: CookieJar, form: &ActionForm) -> Response {
    let email = form.field("email");
    let command = LoginCommand {
        email: email.clone(),
        password: form.field("password"),
    };

    match state.services.auth_commands.login(command).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&session, state.settings.cookie_secure));
            redirect_found(jar, HOME)
        }
        Err(err) => {
            log_failure(AuthAction::Login, &err);
            ActionFailure::new(GENERIC_FAILURE)
                .with_email(email)
                .with_kind("failure")
                .into_response()
        }
    }
}

async fn logout(
    state: &HttpState,
    token: Option<AccessToken>,
    jar: CookieJar,
) -> Response {
    match state.services.auth_commands.logout(token.as_ref()).await {
        Ok(()) => {
            let jar = jar.add(cleared_session_cookie(state.settings.cookie_secure));
            redirect_found(jar, HOME)
        }
        Err(err) => {
            log_failure(AuthAction::Logout, &err);
            ActionFailure::new(GENERIC_FAILURE).into_response()
        }
    }
}

async fn reset(state: &HttpState, origin: &str, form: &ActionForm) -> Response {
    let email = form.field("email");
    let command = ResetPasswordCommand {
        email: email.clone(),
        redirect_to: format!("{origin}{CALLBACK_PATH}?next={NEW_PASSWORD_PAGE}"),
    };

    match state
        .services
        .auth_commands
        .request_password_reset(command)
        .await
    {
        Ok(()) => Json(ActionSuccess::new(RESET_EMAIL_SENT)).into_response(),
        Err(err) => {
            log_failure(AuthAction::Reset, &err);
            ActionFailure::new(GENERIC_FAILURE)
                .with_email(email)
                .into_response()
        }
    }
}

async fn update_password(
    state: &HttpState,
    token: Option<AccessToken>,
    form: &ActionForm,
) -> Response {
    let command = UpdatePasswordCommand {
        password: form.field("password"),
    };

    match state
        .services
        .auth_commands
        .update_password(token.as_ref(), command)
        .await
    {
        Ok(()) => Json(ActionSuccess::new(PASSWORD_UPDATED)).into_response(),
        Err(err) => {
            log_failure(AuthAction::UpdatePassword, &err);
            ActionFailure::new(UPDATE_PASSWORD_FAILURE).into_response()
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CallbackParams {
    /// Token hash from the emailed link.
    pub token_hash: Option<String>,
    /// Link type: signup, recovery, invite, magiclink, email_change or email.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Same-site path to continue to once verified.
    pub next: Option<String>,
}

#[utoipa::path(
    get,
    path = "/auth/callback",
    params(CallbackParams),
    responses(
        (status = 302, description = "Link verified; session cookie set and redirected to `next`."),
        (status = 400, description = "Malformed link.", body = crate::presentation::http::error::ErrorResponse),
        (status = 401, description = "Link invalid or expired.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn callback(
    Extension(state): Extension<HttpState>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> Response {
    let next = safe_next(params.next.as_deref());
    let command = ConfirmEmailCommand {
        token_hash: params.token_hash.unwrap_or_default(),
        kind: params.kind.unwrap_or_else(|| "email".to_string()),
    };

    match state.services.auth_commands.confirm_email(command).await {
        Ok(session) => {
            let jar = jar.add(session_cookie(&session, state.settings.cookie_secure));
            redirect_found(jar, &next)
        }
        Err(err @ (ApplicationError::Validation(_) | ApplicationError::Domain(_))) => {
            tracing::warn!(error = %err, "malformed email link");
            HttpError::from_error(err).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "email link verification failed");
            HttpError::from_error(ApplicationError::unauthorized(
                "email link is invalid or has expired",
            ))
            .into_response()
        }
    }
}

/// Only same-site absolute paths are followed after verification.
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(|ch| ch.is_control() || ch.is_whitespace()) =>
        {
            path.to_string()
        }
        _ => HOME.to_string(),
    }
}

fn redirect_found(jar: CookieJar, location: &str) -> Response {
    (StatusCode::FOUND, jar, [(LOCATION, location)]).into_response()
}

fn log_failure(action: AuthAction, err: &ApplicationError) {
    tracing::error!(action = action.as_str(), error = %err, "auth action failed");
}
