// src/presentation/http/controllers/images.rs
use crate::application::{
    commands::images::UploadImageCommand,
    dto::{PublicUrlDto, UploadedImageDto},
};
use crate::domain::image::{ImageUpload, StorageKey};
use crate::presentation::http::{
    error::{HttpError, HttpResult, IntoHttpResult},
    extractors::SessionToken,
    state::HttpState,
};
use axum::{
    Extension, Json,
    extract::{Multipart, Path},
    http::StatusCode,
};
use utoipa::ToSchema;

/// Largest meal photo accepted by `POST /api/images`.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Multipart body of an image upload.
#[derive(ToSchema)]
pub struct ImageUploadForm {
    pub recipe_name: String,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/api/images",
    request_body(content = ImageUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image stored.", body = UploadedImageDto),
        (status = 400, description = "No file selected or malformed form.", body = crate::presentation::http::error::ErrorResponse),
        (status = 500, description = "Storage call failed.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Images"
)]
pub async fn upload_image(
    Extension(state): Extension<HttpState>,
    SessionToken(token): SessionToken,
    mut multipart: Multipart,
) -> HttpResult<(StatusCode, Json<UploadedImageDto>)> {
    let mut recipe_name = String::new();
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| HttpError::rejected(err.status(), err.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "recipe_name" => {
                recipe_name = field
                    .text()
                    .await
                    .map_err(|err| HttpError::rejected(err.status(), err.body_text()))?;
            }
            // Only the first selected file is used.
            "file" if file.is_none() => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| HttpError::rejected(err.status(), err.body_text()))?;
                file = Some(ImageUpload::new(file_name, content_type, bytes));
            }
            _ => {}
        }
    }

    let uploaded = state
        .services
        .image_commands
        .upload(UploadImageCommand { recipe_name, file }, token.as_ref())
        .await
        .into_http()?;

    Ok((StatusCode::CREATED, Json(uploaded)))
}

#[utoipa::path(
    get,
    path = "/api/images/{key}",
    params(("key" = String, Path, description = "Storage key of the image")),
    responses(
        (status = 200, description = "Public URL of the image.", body = PublicUrlDto),
        (status = 400, description = "Invalid key.", body = crate::presentation::http::error::ErrorResponse),
        (status = 404, description = "No public URL for the key.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Images"
)]
pub async fn get_image_url(
    Extension(state): Extension<HttpState>,
    Path(key): Path<String>,
) -> HttpResult<Json<PublicUrlDto>> {
    let key = StorageKey::parse(key).map_err(|err| HttpError::from_error(err.into()))?;

    state
        .services
        .image_queries
        .public_url(key.as_str())
        .await
        .into_http()?
        .map(|public_url| Json(PublicUrlDto { public_url }))
        .ok_or_else(|| HttpError::not_found(format!("no public url for {key}")))
}

#[utoipa::path(
    delete,
    path = "/api/images/{key}",
    params(("key" = String, Path, description = "Storage key of the image")),
    responses(
        (status = 204, description = "Delete requested; storage errors are logged, not returned."),
        (status = 400, description = "Invalid key.", body = crate::presentation::http::error::ErrorResponse)
    ),
    tag = "Images"
)]
pub async fn delete_image(
    Extension(state): Extension<HttpState>,
    SessionToken(token): SessionToken,
    Path(key): Path<String>,
) -> HttpResult<StatusCode> {
    let key = StorageKey::parse(key).map_err(|err| HttpError::from_error(err.into()))?;

    state
        .services
        .image_commands
        .delete(&key, token.as_ref())
        .await;

    Ok(StatusCode::NO_CONTENT)
}
