pub mod auth;
pub mod images;
