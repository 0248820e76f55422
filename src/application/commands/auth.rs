// src/application/commands/auth.rs
use crate::{
    application::{
        error::{ApplicationError, ApplicationResult},
        ports::auth::AuthBackend,
    },
    domain::user::{AccessToken, Credentials, Email, OtpKind, Password, Session},
};
use std::sync::Arc;

pub struct SignupCommand {
    pub email: String,
    pub password: String,
    pub redirect_to: String,
}

pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

pub struct ResetPasswordCommand {
    pub email: String,
    pub redirect_to: String,
}

pub struct UpdatePasswordCommand {
    pub password: String,
}

pub struct ConfirmEmailCommand {
    pub token_hash: String,
    pub kind: String,
}

pub struct AuthCommandService {
    auth: Arc<dyn AuthBackend>,
}

impl AuthCommandService {
    pub fn new(auth: Arc<dyn AuthBackend>) -> Self {
        Self { auth }
    }

    pub async fn signup(&self, command: SignupCommand) -> ApplicationResult<Option<Session>> {
        let credentials = credentials(command.email, command.password)?;
        let session = self
            .auth
            .sign_up(&credentials, &command.redirect_to)
            .await?;

        tracing::info!(
            email = %credentials.email,
            signed_in = session.is_some(),
            "user signed up"
        );
        Ok(session)
    }

    pub async fn login(&self, command: LoginCommand) -> ApplicationResult<Session> {
        let credentials = credentials(command.email, command.password)?;
        let session = self.auth.sign_in_with_password(&credentials).await?;

        tracing::info!(email = %credentials.email, user_id = %session.user.id, "user logged in");
        Ok(session)
    }

    /// End the caller's session. A missing token, or one the backend no
    /// longer knows, already means signed out.
    pub async fn logout(&self, token: Option<&AccessToken>) -> ApplicationResult<()> {
        let Some(token) = token else {
            tracing::debug!("logout without a session");
            return Ok(());
        };

        match self.auth.sign_out(token).await {
            Ok(()) => tracing::info!("user logged out"),
            Err(ApplicationError::Unauthorized(reason) | ApplicationError::NotFound(reason)) => {
                tracing::warn!(%reason, "session already gone at logout");
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    pub async fn request_password_reset(
        &self,
        command: ResetPasswordCommand,
    ) -> ApplicationResult<()> {
        let email = Email::new(command.email)?;
        self.auth
            .reset_password_for_email(&email, &command.redirect_to)
            .await?;

        tracing::info!(
            email = %email,
            redirect_to = %command.redirect_to,
            "password reset email sent"
        );
        Ok(())
    }

    pub async fn update_password(
        &self,
        token: Option<&AccessToken>,
        command: UpdatePasswordCommand,
    ) -> ApplicationResult<()> {
        let token = require_session(token)?;
        let password = Password::new(command.password)?;
        let user = self.auth.update_password(token, &password).await?;

        tracing::info!(user_id = %user.id, "password updated");
        Ok(())
    }

    /// Complete an emailed confirmation or recovery link.
    pub async fn confirm_email(&self, command: ConfirmEmailCommand) -> ApplicationResult<Session> {
        if command.token_hash.trim().is_empty() {
            return Err(ApplicationError::validation("token_hash is required"));
        }
        let kind: OtpKind = command.kind.parse()?;
        let session = self
            .auth
            .verify_email_token(&command.token_hash, kind)
            .await?;

        tracing::info!(user_id = %session.user.id, kind = kind.as_str(), "email link verified");
        Ok(session)
    }
}

fn credentials(email: String, password: String) -> ApplicationResult<Credentials> {
    Ok(Credentials {
        email: Email::new(email)?,
        password: Password::new(password)?,
    })
}

fn require_session(token: Option<&AccessToken>) -> ApplicationResult<&AccessToken> {
    token.ok_or_else(|| ApplicationError::unauthorized("no active session"))
}
