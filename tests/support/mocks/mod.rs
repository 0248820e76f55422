// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod auth;
pub mod recipes;
pub mod storage;
pub mod util;

pub use auth::{
    BROKEN_EMAIL, BROKEN_TOKEN, DummyAuthBackend, EXPIRED_TOKEN, SESSION_TOKEN, TEST_EMAIL, VALID_PASSWORD,
    VALID_TOKEN_HASH,
};
pub use recipes::{StaticRecipes, sample_recipes};
pub use storage::{PUBLIC_BASE, RecordingStorage};
pub use util::{FixedToken, SequentialTokens};
