//! Handlers for office image upload and deletion.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use bytes::Bytes;
use officely_core::error::CoreError;
use officely_core::scopes::Scope;
use officely_core::types::DbId;
use officely_db::models::image::Image;
use officely_db::models::office::Office;
use officely_db::repositories::{ImageRepo, OfficeRepo};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Maximum accepted upload size.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/v1/offices/{id}/images
///
/// Multipart upload with a single `image` field; png or jpeg, up to 5 MB.
pub async fn store(
    State(state): State<AppState>,
    user: AuthUser,
    Path(office_id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Image>>)> {
    user.require(Scope::OfficeUpdate)?;
    let office = owned_office(&state, &user, office_id).await?;

    let bytes = read_image_field(&mut multipart).await?;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::validation("image", "image must be at most 5 MB").into());
    }
    let Some(extension) = sniff_image_extension(&bytes) else {
        return Err(CoreError::validation("image", "image must be a png or jpeg").into());
    };

    let filename = format!("{}.{extension}", Uuid::new_v4());
    let path = state.storage.store(&filename, bytes).await?;
    let image = ImageRepo::create(&state.pool, office.id, &path).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// DELETE /api/v1/offices/{office_id}/images/{image_id}
///
/// Refused when the image belongs to another office, is the office's only
/// image, or is the currently featured image.
pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path((office_id, image_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    user.require(Scope::OfficeUpdate)?;
    let office = owned_office(&state, &user, office_id).await?;

    let image = ImageRepo::find_by_id(&state.pool, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Image",
            id: image_id,
        }))?;

    if image.office_id != office.id {
        return Err(CoreError::validation("image", "You cannot delete this image").into());
    }
    if ImageRepo::count_for_office(&state.pool, office.id).await? == 1 {
        return Err(CoreError::validation(
            "image",
            "You cannot delete the only image of an office",
        )
        .into());
    }
    if office.featured_image_id == Some(image.id) {
        return Err(CoreError::validation("image", "You cannot delete the featured image").into());
    }

    ImageRepo::delete(&state.pool, image.id).await?;

    // The row is gone either way; a dangling blob is a cleanup concern,
    // not a request failure.
    if let Err(err) = state.storage.delete(&image.path).await {
        tracing::warn!(path = %image.path, error = %err, "failed to delete stored image");
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Load the office and check the caller owns it.
async fn owned_office(state: &AppState, user: &AuthUser, office_id: DbId) -> AppResult<Office> {
    let office = OfficeRepo::find_by_id(&state.pool, office_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id: office_id,
        }))?;
    if office.user_id != user.user_id {
        return Err(
            CoreError::Forbidden("Only the owner may manage this office's images".into()).into(),
        );
    }
    Ok(office)
}

/// Pull the `image` field out of the multipart body.
async fn read_image_field(multipart: &mut Multipart) -> AppResult<Bytes> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            return field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("could not read image field: {e}")));
        }
    }
    Err(CoreError::validation("image", "an image file is required").into())
}

/// Identify png/jpeg uploads by magic bytes; declared content types are
/// not trusted.
fn sniff_image_extension(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]) {
        Some("png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpg")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::sniff_image_extension;

    #[test]
    fn recognizes_png_magic() {
        let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
        assert_eq!(sniff_image_extension(&bytes), Some("png"));
    }

    #[test]
    fn recognizes_jpeg_magic() {
        let bytes = [0xFF, 0xD8, 0xFF, 0xE0, 0x00];
        assert_eq!(sniff_image_extension(&bytes), Some("jpg"));
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(sniff_image_extension(b"GIF89a"), None);
        assert_eq!(sniff_image_extension(b""), None);
    }
}
