// src/application/ports/util.rs
pub trait SlugGenerator: Send + Sync {
    fn slugify(&self, input: &str) -> String;
}

/// Source of the random suffix that keeps storage keys unique.
pub trait TokenGenerator: Send + Sync {
    fn unique_token(&self) -> String;
}
