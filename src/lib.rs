//! Recipe sharing backend: auth form actions, meal photo storage and the
//! per-navigation page context, all backed by a hosted Supabase project.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
