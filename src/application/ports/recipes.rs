// src/application/ports/recipes.rs
use crate::{
    application::ApplicationResult,
    domain::{recipe::Recipe, user::AccessToken},
};
use async_trait::async_trait;

#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    async fn list_recipes(&self, token: Option<&AccessToken>) -> ApplicationResult<Vec<Recipe>>;
}
