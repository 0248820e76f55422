// src/presentation/http/extractors.rs
use crate::{
    domain::user::AccessToken,
    presentation::http::{cookies::SESSION_COOKIE, error::HttpError, state::HttpState},
};
use axum::{
    Form,
    extract::{FromRequest, FromRequestParts, Multipart, Request},
    http::{
        header::{CONTENT_TYPE, HOST},
        request::Parts,
    },
};
use axum_extra::extract::cookie::CookieJar;
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::{collections::HashMap, convert::Infallible};

/// Session token of the caller: the session cookie set by the form actions,
/// or an `Authorization: Bearer` header for API clients.
#[derive(Debug, Clone)]
pub struct SessionToken(pub Option<AccessToken>);

impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let from_cookie = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_owned());
        let raw = from_cookie.or_else(|| {
            parts
                .headers
                .typed_get::<Authorization<Bearer>>()
                .map(|header| header.token().to_owned())
        });

        Ok(Self(raw.and_then(|value| AccessToken::new(value).ok())))
    }
}

/// Origin (`scheme://host[:port]`) used to build links back into the site.
#[derive(Debug, Clone)]
pub struct RequestOrigin(pub String);

impl<S> FromRequestParts<S> for RequestOrigin
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let configured = parts
            .extensions
            .get::<HttpState>()
            .and_then(|state| state.settings.public_origin.clone());
        if let Some(origin) = configured {
            return Ok(Self(origin));
        }

        let host = parts
            .headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .filter(|host| !host.is_empty())
            .unwrap_or("localhost");
        Ok(Self(format!("http://{host}")))
    }
}

/// Fields of a submitted form, read from either an urlencoded or a
/// multipart body. Missing fields read as empty strings.
#[derive(Debug, Clone, Default)]
pub struct ActionForm {
    fields: HashMap<String, String>,
}

impl ActionForm {
    pub fn field(&self, name: &str) -> String {
        self.fields.get(name).cloned().unwrap_or_default()
    }
}

impl<S> FromRequest<S> for ActionForm
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let mut multipart = Multipart::from_request(req, state)
                .await
                .map_err(|err| HttpError::rejected(err.status(), err.body_text()))?;

            let mut fields = HashMap::new();
            while let Some(field) = multipart
                .next_field()
                .await
                .map_err(|err| HttpError::rejected(err.status(), err.body_text()))?
            {
                let Some(name) = field.name().map(str::to_owned) else {
                    continue;
                };
                let value = field
                    .text()
                    .await
                    .map_err(|err| HttpError::rejected(err.status(), err.body_text()))?;
                fields.entry(name).or_insert(value);
            }
            return Ok(Self { fields });
        }

        if content_type.is_empty() {
            return Ok(Self::default());
        }

        let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
            .await
            .map_err(|err| HttpError::rejected(err.status(), err.body_text()))?;
        Ok(Self { fields })
    }
}
