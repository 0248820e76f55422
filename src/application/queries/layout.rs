// src/application/queries/layout.rs
use crate::{
    application::{
        ApplicationResult,
        dto::PageDataDto,
        error::ApplicationError,
        ports::{auth::AuthBackend, recipes::RecipeCatalog},
    },
    domain::{
        recipe::Recipe,
        user::{AccessToken, AuthUser, Session},
    },
};
use std::sync::Arc;

/// Invalidation tag for everything derived from the current session.
pub const AUTH_DEPENDENCY: &str = "backend:auth";

/// Auth backend bound to the session token of one request.
#[derive(Clone)]
pub struct AuthScope {
    backend: Arc<dyn AuthBackend>,
    token: Option<AccessToken>,
}

impl AuthScope {
    pub fn new(backend: Arc<dyn AuthBackend>, token: Option<AccessToken>) -> Self {
        Self { backend, token }
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    /// The session carried by this request, if the backend still honours it.
    pub async fn get_session(&self) -> ApplicationResult<Option<Session>> {
        let Some(token) = &self.token else {
            return Ok(None);
        };

        match self.backend.get_user(token).await {
            Ok(user) => Ok(Some(Session {
                access_token: token.clone(),
                expires_in: None,
                expires_at: None,
                user,
            })),
            Err(ApplicationError::Unauthorized(reason)) => {
                tracing::debug!(%reason, "session token rejected");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }
}

pub struct PageContext {
    pub scope: AuthScope,
    pub session: Option<Session>,
    pub user: Option<AuthUser>,
    pub recipes: Vec<Recipe>,
    pub depends: Vec<&'static str>,
}

impl PageContext {
    pub fn into_dto(self) -> PageDataDto {
        PageDataDto {
            user: self.user.map(Into::into),
            recipes: self.recipes.into_iter().map(Into::into).collect(),
            depends: self.depends.into_iter().map(str::to_string).collect(),
        }
    }
}

pub struct LayoutQueryService {
    auth: Arc<dyn AuthBackend>,
    recipes: Arc<dyn RecipeCatalog>,
}

impl LayoutQueryService {
    pub fn new(auth: Arc<dyn AuthBackend>, recipes: Arc<dyn RecipeCatalog>) -> Self {
        Self { auth, recipes }
    }

    /// Build the context shared by every page of one navigation.
    pub async fn load(&self, token: Option<AccessToken>) -> ApplicationResult<PageContext> {
        let depends = vec![AUTH_DEPENDENCY];

        let scope = AuthScope::new(Arc::clone(&self.auth), token);
        let session = scope.get_session().await?;
        let user = session.as_ref().map(|session| session.user.clone());

        // A rejected token would fail the table read too; fall back to the
        // anonymous role for it.
        let recipe_token = session.as_ref().and(scope.token());
        let recipes = self.recipes.list_recipes(recipe_token).await?;

        tracing::debug!(
            recipes = recipes.len(),
            signed_in = user.is_some(),
            "layout loaded"
        );

        Ok(PageContext {
            scope,
            session,
            user,
            recipes,
            depends,
        })
    }
}
