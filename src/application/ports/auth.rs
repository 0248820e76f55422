// src/application/ports/auth.rs
use crate::{
    application::ApplicationResult,
    domain::user::{AccessToken, AuthUser, Credentials, Email, OtpKind, Password, Session},
};
use async_trait::async_trait;

/// Hosted authentication service. Every method is one remote call.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Create an account. Returns a session when the service signs the user
    /// in immediately, `None` when it waits for email confirmation.
    async fn sign_up(
        &self,
        credentials: &Credentials,
        redirect_to: &str,
    ) -> ApplicationResult<Option<Session>>;

    async fn sign_in_with_password(&self, credentials: &Credentials) -> ApplicationResult<Session>;

    async fn sign_out(&self, token: &AccessToken) -> ApplicationResult<()>;

    async fn reset_password_for_email(&self, email: &Email, redirect_to: &str)
    -> ApplicationResult<()>;

    async fn update_password(
        &self,
        token: &AccessToken,
        password: &Password,
    ) -> ApplicationResult<AuthUser>;

    /// Resolve the user behind a session token.
    async fn get_user(&self, token: &AccessToken) -> ApplicationResult<AuthUser>;

    async fn verify_email_token(&self, token_hash: &str, kind: OtpKind)
    -> ApplicationResult<Session>;
}
