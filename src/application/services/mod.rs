// src/application/services/mod.rs
use std::sync::Arc;

use crate::application::{
    commands::{auth::AuthCommandService, images::ImageCommandService},
    ports::{
        auth::AuthBackend,
        recipes::RecipeCatalog,
        storage::ObjectStorage,
        util::{SlugGenerator, TokenGenerator},
    },
    queries::{images::ImageQueryService, layout::LayoutQueryService},
};

pub struct ApplicationServices {
    pub auth_commands: Arc<AuthCommandService>,
    pub image_commands: Arc<ImageCommandService>,
    pub image_queries: Arc<ImageQueryService>,
    pub layout_queries: Arc<LayoutQueryService>,
}

impl ApplicationServices {
    pub fn new(
        auth: Arc<dyn AuthBackend>,
        storage: Arc<dyn ObjectStorage>,
        recipes: Arc<dyn RecipeCatalog>,
        slugger: Arc<dyn SlugGenerator>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        let auth_commands = Arc::new(AuthCommandService::new(Arc::clone(&auth)));

        let image_queries = Arc::new(ImageQueryService::new(Arc::clone(&storage)));
        let image_commands = Arc::new(ImageCommandService::new(
            Arc::clone(&storage),
            Arc::clone(&image_queries),
            Arc::clone(&slugger),
            Arc::clone(&tokens),
        ));

        let layout_queries = Arc::new(LayoutQueryService::new(
            Arc::clone(&auth),
            Arc::clone(&recipes),
        ));

        Self {
            auth_commands,
            image_commands,
            image_queries,
            layout_queries,
        }
    }
}
