// src/domain/recipe.rs
use chrono::{DateTime, Utc};

/// A recipe row as published by the hosted `recipes` table.
#[derive(Debug, Clone, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
