use super::{SupabaseClient, parse_timestamp, read_json, send};
use crate::{
    application::{ApplicationResult, ports::recipes::RecipeCatalog},
    domain::{recipe::Recipe, user::AccessToken},
};
use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;

const RECIPES_TABLE: &str = "recipes";

/// Reads the `recipes` table through PostgREST.
#[derive(Clone)]
pub struct SupabaseRecipeCatalog {
    client: SupabaseClient,
}

impl SupabaseRecipeCatalog {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct RecipeRow {
    id: i64,
    #[serde(alias = "title")]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            created_at: parse_timestamp(row.created_at.as_deref()),
        }
    }
}

#[async_trait]
impl RecipeCatalog for SupabaseRecipeCatalog {
    async fn list_recipes(&self, token: Option<&AccessToken>) -> ApplicationResult<Vec<Recipe>> {
        let url = self.client.endpoint(["rest", "v1", RECIPES_TABLE]);
        let request = self
            .client
            .request(Method::GET, url, token)
            .query(&[("select", "*"), ("order", "id.asc")]);

        let response = send(request, "list recipes").await?;
        let rows: Vec<RecipeRow> = read_json(response, "list recipes").await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }
}
