use crate::domain::{recipe::Recipe, user::AuthUser};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserDto {
    pub id: String,
    pub email: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<AuthUser> for UserDto {
    fn from(user: AuthUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Recipe> for RecipeDto {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id,
            name: recipe.name,
            description: recipe.description,
            image_url: recipe.image_url,
            created_at: recipe.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadedImageDto {
    pub key: String,
    pub public_url: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PublicUrlDto {
    pub public_url: String,
}

/// What a page load sees: the signed-in user, the seed recipes, and the
/// invalidation tags the load depends on.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageDataDto {
    pub user: Option<UserDto>,
    pub recipes: Vec<RecipeDto>,
    pub depends: Vec<String>,
}
