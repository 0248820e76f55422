// tests/support/mocks/recipes.rs
use async_trait::async_trait;
use std::sync::Mutex;

use recipe_box::application::{
    ApplicationResult, error::ApplicationError, ports::recipes::RecipeCatalog,
};
use recipe_box::domain::{recipe::Recipe, user::AccessToken};

pub fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: 1,
            name: "Tomato Soup".into(),
            description: Some("Roasted tomatoes, basil".into()),
            image_url: None,
            created_at: None,
        },
        Recipe {
            id: 2,
            name: "Scrambled Eggs".into(),
            description: None,
            image_url: Some(format!("{}/scrambled-eggs-1", super::PUBLIC_BASE)),
            created_at: None,
        },
    ]
}

/// Catalog serving [`sample_recipes`] and remembering which token asked.
/// Like PostgREST it refuses any bearer other than a live session.
#[derive(Default)]
pub struct StaticRecipes {
    seen_tokens: Mutex<Vec<Option<String>>>,
}

impl StaticRecipes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seen_tokens(&self) -> Vec<Option<String>> {
        self.seen_tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecipeCatalog for StaticRecipes {
    async fn list_recipes(&self, token: Option<&AccessToken>) -> ApplicationResult<Vec<Recipe>> {
        self.seen_tokens
            .lock()
            .unwrap()
            .push(token.map(|token| token.as_str().to_string()));
        match token {
            Some(token) if token.as_str() != super::SESSION_TOKEN => {
                Err(ApplicationError::unauthorized("list recipes: JWT expired"))
            }
            _ => Ok(sample_recipes()),
        }
    }
}
