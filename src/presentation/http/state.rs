// src/presentation/http/state.rs
use crate::application::services::ApplicationServices;
use std::sync::Arc;

#[derive(Clone)]
pub struct HttpState {
    pub services: Arc<ApplicationServices>,
    pub settings: HttpSettings,
}

#[derive(Clone, Debug, Default)]
pub struct HttpSettings {
    /// Origin put into emailed links; `None` derives it from the `Host` header.
    pub public_origin: Option<String>,
    pub cookie_secure: bool,
}
