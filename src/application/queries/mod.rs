pub mod images;
pub mod layout;
