// src/domain/user.rs
use crate::domain::errors::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::Validation("email must not be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A plaintext password on its way to the auth service. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(DomainError::Validation("password must not be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

/// Bearer token issued by the auth service for one session.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("access token must not be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: AccessToken,
    pub expires_in: Option<u64>,
    pub expires_at: Option<DateTime<Utc>>,
    pub user: AuthUser,
}

/// Kind of emailed one-time link, as echoed back in the callback URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpKind {
    Signup,
    Recovery,
    Invite,
    MagicLink,
    EmailChange,
    Email,
}

impl OtpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpKind::Signup => "signup",
            OtpKind::Recovery => "recovery",
            OtpKind::Invite => "invite",
            OtpKind::MagicLink => "magiclink",
            OtpKind::EmailChange => "email_change",
            OtpKind::Email => "email",
        }
    }
}

impl FromStr for OtpKind {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "signup" => Ok(OtpKind::Signup),
            "recovery" => Ok(OtpKind::Recovery),
            "invite" => Ok(OtpKind::Invite),
            "magiclink" => Ok(OtpKind::MagicLink),
            "email_change" => Ok(OtpKind::EmailChange),
            "email" => Ok(OtpKind::Email),
            other => Err(DomainError::Validation(format!(
                "unsupported verification type: {other}"
            ))),
        }
    }
}
