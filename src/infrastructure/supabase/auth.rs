use super::{SupabaseClient, parse_timestamp, read_json, send};
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::auth::AuthBackend,
    },
    domain::user::{AccessToken, AuthUser, Credentials, Email, OtpKind, Password, Session},
};
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Clone)]
pub struct SupabaseAuthBackend {
    client: SupabaseClient,
}

impl SupabaseAuthBackend {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }

    fn auth_url(&self, endpoint: &str) -> url::Url {
        self.client.endpoint(["auth", "v1", endpoint])
    }
}

#[derive(Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RecoverRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct UpdateUserRequest<'a> {
    password: &'a str,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    token_hash: &'a str,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
    created_at: Option<String>,
}

impl From<UserPayload> for AuthUser {
    fn from(payload: UserPayload) -> Self {
        Self {
            id: payload.id,
            email: payload.email.filter(|email| !email.is_empty()),
            created_at: parse_timestamp(payload.created_at.as_deref()),
        }
    }
}

/// Token grant answer. Signup answers with a bare user object instead when
/// the project requires email confirmation, so every field is optional.
#[derive(Debug, Deserialize)]
struct SessionPayload {
    access_token: Option<String>,
    expires_in: Option<u64>,
    expires_at: Option<i64>,
    user: Option<UserPayload>,
}

impl SessionPayload {
    fn has_session(&self) -> bool {
        self.access_token.is_some()
    }

    fn into_session(self) -> ApplicationResult<Session> {
        let token = self
            .access_token
            .ok_or_else(|| ApplicationError::infrastructure("token grant without access_token"))?;
        let user = self
            .user
            .ok_or_else(|| ApplicationError::infrastructure("token grant without user"))?;

        Ok(Session {
            access_token: AccessToken::new(token)?,
            expires_in: self.expires_in,
            expires_at: self
                .expires_at
                .and_then(|secs| DateTime::from_timestamp(secs, 0)),
            user: user.into(),
        })
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuthBackend {
    async fn sign_up(
        &self,
        credentials: &Credentials,
        redirect_to: &str,
    ) -> ApplicationResult<Option<Session>> {
        let request = self
            .client
            .request(Method::POST, self.auth_url("signup"), None)
            .query(&[("redirect_to", redirect_to)])
            .json(&PasswordGrant {
                email: credentials.email.as_str(),
                password: credentials.password.expose(),
            });

        let response = send(request, "sign up").await?;
        let payload: SessionPayload = read_json(response, "sign up").await?;
        if payload.has_session() {
            payload.into_session().map(Some)
        } else {
            Ok(None)
        }
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> ApplicationResult<Session> {
        let request = self
            .client
            .request(Method::POST, self.auth_url("token"), None)
            .query(&[("grant_type", "password")])
            .json(&PasswordGrant {
                email: credentials.email.as_str(),
                password: credentials.password.expose(),
            });

        let response = send(request, "sign in").await?;
        let payload: SessionPayload = read_json(response, "sign in").await?;
        payload.into_session()
    }

    async fn sign_out(&self, token: &AccessToken) -> ApplicationResult<()> {
        let request = self
            .client
            .request(Method::POST, self.auth_url("logout"), Some(token));
        send(request, "sign out").await?;
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
    ) -> ApplicationResult<()> {
        let request = self
            .client
            .request(Method::POST, self.auth_url("recover"), None)
            .query(&[("redirect_to", redirect_to)])
            .json(&RecoverRequest {
                email: email.as_str(),
            });
        send(request, "password recovery").await?;
        Ok(())
    }

    async fn update_password(
        &self,
        token: &AccessToken,
        password: &Password,
    ) -> ApplicationResult<AuthUser> {
        let request = self
            .client
            .request(Method::PUT, self.auth_url("user"), Some(token))
            .json(&UpdateUserRequest {
                password: password.expose(),
            });

        let response = send(request, "update user").await?;
        let payload: UserPayload = read_json(response, "update user").await?;
        Ok(payload.into())
    }

    async fn get_user(&self, token: &AccessToken) -> ApplicationResult<AuthUser> {
        let request = self
            .client
            .request(Method::GET, self.auth_url("user"), Some(token));

        let response = send(request, "get user").await?;
        let payload: UserPayload = read_json(response, "get user").await?;
        Ok(payload.into())
    }

    async fn verify_email_token(
        &self,
        token_hash: &str,
        kind: OtpKind,
    ) -> ApplicationResult<Session> {
        let request = self
            .client
            .request(Method::POST, self.auth_url("verify"), None)
            .json(&VerifyRequest {
                kind: kind.as_str(),
                token_hash,
            });

        let response = send(request, "verify email link").await?;
        let payload: SessionPayload = read_json(response, "verify email link").await?;
        payload.into_session()
    }
}
