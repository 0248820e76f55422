use crate::application::ports::util::{SlugGenerator, TokenGenerator};
use uuid::Uuid;

#[derive(Default, Clone)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        to_slug(input)
    }
}

#[derive(Default, Clone)]
pub struct UuidTokenGenerator;

impl TokenGenerator for UuidTokenGenerator {
    fn unique_token(&self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Lowercases `input`, turns whitespace runs into single hyphens and drops
/// everything outside `[a-z0-9_-]`. Hyphen runs collapse to one and the
/// result never starts or ends with a hyphen.
pub fn to_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.to_lowercase().chars() {
        if ch.is_whitespace() || ch == '-' {
            pending_dash = true;
        } else if ch.is_ascii_alphanumeric() || ch == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        }
    }
    slug
}
