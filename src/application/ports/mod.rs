// src/application/ports/mod.rs
pub mod auth;
pub mod recipes;
pub mod storage;
pub mod util;

// Type aliases to make port injection sites more descriptive and reduce `dyn` noise
pub type AuthBackendPort = dyn auth::AuthBackend;
pub type ObjectStoragePort = dyn storage::ObjectStorage;
pub type RecipeCatalogPort = dyn recipes::RecipeCatalog;
pub type SlugGeneratorPort = dyn util::SlugGenerator;
pub type TokenGeneratorPort = dyn util::TokenGenerator;
