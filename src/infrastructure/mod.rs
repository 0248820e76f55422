// src/infrastructure/mod.rs
pub mod supabase;
pub mod util;
