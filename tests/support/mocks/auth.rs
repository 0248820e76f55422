// tests/support/mocks/auth.rs
use async_trait::async_trait;
use std::sync::Mutex;

use recipe_box::application::{
    ApplicationResult, error::ApplicationError, ports::auth::AuthBackend,
};
use recipe_box::domain::user::{
    AccessToken, AuthUser, Credentials, Email, OtpKind, Password, Session,
};

pub const TEST_EMAIL: &str = "cook@example.com";
pub const VALID_PASSWORD: &str = "open-sesame";
/// Token handed out by a successful login and accepted by `get_user`.
pub const SESSION_TOKEN: &str = "session-token-1";
/// Token the backend no longer honours.
pub const EXPIRED_TOKEN: &str = "expired-token";
/// Signing this token out fails with a transport-level error.
pub const BROKEN_TOKEN: &str = "broken-token";
/// Reset requests for this address fail on the backend side.
pub const BROKEN_EMAIL: &str = "broken@example.com";
pub const VALID_TOKEN_HASH: &str = "pkce_valid_hash";

/// Auth backend that answers from constants and records every call as
/// `"<method>:<detail>"`.
#[derive(Default)]
pub struct DummyAuthBackend {
    calls: Mutex<Vec<String>>,
    confirm_signups: bool,
}

impl DummyAuthBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signups wait for email confirmation instead of returning a session.
    pub fn requiring_confirmation() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            confirm_signups: true,
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|call| call.split(':').next() == Some(method))
            .collect()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn test_user() -> AuthUser {
    AuthUser {
        id: "user-1".into(),
        email: Some(TEST_EMAIL.into()),
        created_at: None,
    }
}

pub fn test_session() -> Session {
    Session {
        access_token: AccessToken::new(SESSION_TOKEN).unwrap(),
        expires_in: Some(3600),
        expires_at: None,
        user: test_user(),
    }
}

#[async_trait]
impl AuthBackend for DummyAuthBackend {
    async fn sign_up(
        &self,
        credentials: &Credentials,
        redirect_to: &str,
    ) -> ApplicationResult<Option<Session>> {
        self.record(format!("sign_up:{}|{redirect_to}", credentials.email));
        if credentials.email.as_str() == BROKEN_EMAIL {
            return Err(ApplicationError::validation("User already registered"));
        }
        if self.confirm_signups {
            Ok(None)
        } else {
            Ok(Some(test_session()))
        }
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> ApplicationResult<Session> {
        self.record(format!("sign_in:{}", credentials.email));
        if credentials.password.expose() == VALID_PASSWORD {
            Ok(test_session())
        } else {
            Err(ApplicationError::validation("Invalid login credentials"))
        }
    }

    async fn sign_out(&self, token: &AccessToken) -> ApplicationResult<()> {
        self.record(format!("sign_out:{}", token.as_str()));
        match token.as_str() {
            SESSION_TOKEN => Ok(()),
            BROKEN_TOKEN => Err(ApplicationError::infrastructure("connection reset")),
            _ => Err(ApplicationError::unauthorized("invalid JWT")),
        }
    }

    async fn reset_password_for_email(
        &self,
        email: &Email,
        redirect_to: &str,
    ) -> ApplicationResult<()> {
        self.record(format!("reset:{email}|{redirect_to}"));
        if email.as_str() == BROKEN_EMAIL {
            Err(ApplicationError::infrastructure("smtp unavailable"))
        } else {
            Ok(())
        }
    }

    async fn update_password(
        &self,
        token: &AccessToken,
        password: &Password,
    ) -> ApplicationResult<AuthUser> {
        self.record(format!("update_password:{}", token.as_str()));
        if token.as_str() != SESSION_TOKEN {
            return Err(ApplicationError::unauthorized("invalid JWT"));
        }
        if password.expose().len() < 6 {
            return Err(ApplicationError::validation("Password should be at least 6 characters"));
        }
        Ok(test_user())
    }

    async fn get_user(&self, token: &AccessToken) -> ApplicationResult<AuthUser> {
        self.record(format!("get_user:{}", token.as_str()));
        if token.as_str() == SESSION_TOKEN {
            Ok(test_user())
        } else {
            Err(ApplicationError::unauthorized("invalid JWT"))
        }
    }

    async fn verify_email_token(
        &self,
        token_hash: &str,
        kind: OtpKind,
    ) -> ApplicationResult<Session> {
        self.record(format!("verify:{token_hash}|{}", kind.as_str()));
        if token_hash == VALID_TOKEN_HASH {
            Ok(test_session())
        } else {
            Err(ApplicationError::unauthorized("Email link is invalid or has expired"))
        }
    }
}
