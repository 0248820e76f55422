// src/domain/mod.rs
pub mod errors;
pub mod image;
pub mod recipe;
pub mod user;
