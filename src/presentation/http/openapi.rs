// src/presentation/http/openapi.rs
use axum::{Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::controllers::auth::dispatch,
        crate::presentation::http::controllers::auth::callback,
        crate::presentation::http::controllers::images::upload_image,
        crate::presentation::http::controllers::images::get_image_url,
        crate::presentation::http::controllers::images::delete_image,
        crate::presentation::http::controllers::layout::load_layout,
        super::routes::health
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::auth::AuthActionForm,
            crate::presentation::http::controllers::auth::ActionFailure,
            crate::presentation::http::controllers::auth::ActionSuccess,
            crate::presentation::http::controllers::images::ImageUploadForm,
            crate::application::dto::UserDto,
            crate::application::dto::RecipeDto,
            crate::application::dto::UploadedImageDto,
            crate::application::dto::PublicUrlDto,
            crate::application::dto::PageDataDto
        )
    ),
    tags(
        (name = "Auth", description = "Form actions and email link callback"),
        (name = "Images", description = "Meal photo storage"),
        (name = "Session", description = "Per-navigation page context"),
        (name = "System", description = "System level endpoints")
    ),
    info(
        title = "Recipe Box API",
        description = "Recipe sharing backend on a hosted Supabase project",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

pub fn docs_router() -> Router {
    Router::new().route("/openapi.json", get(serve_openapi))
}
