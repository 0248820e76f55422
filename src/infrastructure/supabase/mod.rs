// src/infrastructure/supabase/mod.rs
//! HTTP adapters for a hosted Supabase project: GoTrue auth, object storage
//! and the PostgREST recipes table.

mod auth;
mod recipes;
mod storage;

pub use auth::SupabaseAuthBackend;
pub use recipes::SupabaseRecipeCatalog;
pub use storage::SupabaseObjectStorage;

use crate::{
    application::error::{ApplicationError, ApplicationResult},
    domain::user::AccessToken,
};
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use url::Url;

/// Shared HTTP client for one project. Cheap to clone.
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: impl Into<String>) -> ApplicationResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ApplicationError::infrastructure(format!("invalid backend url: {err}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ApplicationError::infrastructure(format!(
                "backend url cannot be a base: {base_url}"
            )));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            anon_key: anon_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of `segments` below the project root. Each segment is
    /// percent-encoded on its own.
    pub(crate) fn endpoint<I, S>(&self, segments: I) -> Url
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Request carrying the project key, authorised as the session owner when
    /// a token is bound and as the anonymous role otherwise.
    pub(crate) fn request(
        &self,
        method: Method,
        url: Url,
        token: Option<&AccessToken>,
    ) -> RequestBuilder {
        let bearer = token.map_or(self.anon_key.as_str(), AccessToken::as_str);
        self.http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(bearer)
    }
}

/// Send `request` and turn non-2xx answers into application errors.
pub(crate) async fn send(
    request: RequestBuilder,
    operation: &'static str,
) -> ApplicationResult<Response> {
    let response = request
        .send()
        .await
        .map_err(|err| ApplicationError::infrastructure(format!("{operation}: {err}")))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
    tracing::debug!(operation, %status, %message, "backend rejected request");

    Err(map_status(status, format!("{operation}: {message}")))
}

pub(crate) async fn read_json<T>(response: Response, operation: &'static str) -> ApplicationResult<T>
where
    T: serde::de::DeserializeOwned,
{
    response.json::<T>().await.map_err(|err| {
        ApplicationError::infrastructure(format!("{operation}: unexpected response: {err}"))
    })
}

fn map_status(status: StatusCode, message: String) -> ApplicationError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApplicationError::Unauthorized(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ApplicationError::Validation(message)
        }
        StatusCode::NOT_FOUND => ApplicationError::NotFound(message),
        _ => ApplicationError::Infrastructure(message),
    }
}

#[derive(Debug, Default, Deserialize)]
struct ErrorPayload {
    msg: Option<String>,
    error_description: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    payload
        .msg
        .or(payload.error_description)
        .or(payload.message)
        .or(payload.error)
}

/// Timestamps come back as RFC 3339 from GoTrue and PostgREST alike; anything
/// else is dropped rather than failing the whole response.
pub(crate) fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|value| DateTime::parse_from_rfc3339(value).ok())
        .map(|value| value.with_timezone(&Utc))
}
