//! Handlers for the `/offices` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use officely_core::error::CoreError;
use officely_core::office as office_rules;
use officely_core::scopes::Scope;
use officely_core::types::DbId;
use officely_db::models::office::{CreateOffice, Office, OfficeDetails, UpdateOffice};
use officely_db::repositories::office_repo::OfficeFilters;
use officely_db::repositories::{ImageRepo, OfficeRepo, ReservationRepo, TagRepo, UserRepo};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::{AuthUser, OptionalAuthUser};
use crate::response::{DataResponse, Paginated};
use crate::state::AppState;

/// Query parameters for the public office listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListOfficesQuery {
    pub user_id: Option<DbId>,
    pub visitor_id: Option<DbId>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub page: Option<i64>,
}

/// GET /api/v1/offices
///
/// Public. Only APPROVED, non-hidden offices are visible unless the
/// caller is authenticated and asking for their own listings via
/// `user_id`.
pub async fn list(
    State(state): State<AppState>,
    OptionalAuthUser(viewer): OptionalAuthUser,
    Query(query): Query<ListOfficesQuery>,
) -> AppResult<Json<Paginated<OfficeDetails>>> {
    let include_unapproved = match (query.user_id, &viewer) {
        (Some(owner_id), Some(viewer)) => owner_id == viewer.user_id,
        _ => false,
    };

    let filters = OfficeFilters {
        user_id: query.user_id,
        visitor_id: query.visitor_id,
        lat: query.lat,
        lng: query.lng,
        include_unapproved,
        page: query.page.unwrap_or(1),
    };

    let rows = OfficeRepo::list(&state.pool, &filters).await?;
    let data = OfficeRepo::load_details(&state.pool, rows).await?;
    Ok(Json(Paginated::new(data, filters.page)))
}

/// GET /api/v1/offices/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<OfficeDetails>>> {
    let details = find_details(&state, id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// POST /api/v1/offices
///
/// Owner and approval status are forced server-side; the office insert and
/// the tag attachment share one transaction.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateOffice>,
) -> AppResult<(StatusCode, Json<DataResponse<OfficeDetails>>)> {
    user.require(Scope::OfficeCreate)?;

    office_rules::validate_title(&input.title)?;
    office_rules::validate_description(&input.description)?;
    office_rules::validate_coordinates(input.lat, input.lng)?;
    office_rules::validate_price_per_day(input.price_per_day)?;
    office_rules::validate_monthly_discount(input.monthly_discount.unwrap_or(0))?;
    if let Some(tags) = &input.tags {
        validate_tags_exist(&state, tags).await?;
    }

    let mut tx = state.pool.begin().await?;
    let office = OfficeRepo::create(&mut tx, user.user_id, &input).await?;
    if let Some(tags) = &input.tags {
        if !tags.is_empty() {
            TagRepo::attach(&mut tx, office.id, tags).await?;
        }
    }
    tx.commit().await?;

    notify_admins_pending(&state, &office).await?;

    let details = find_details(&state, office.id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: details })))
}

/// PUT /api/v1/offices/{id}
///
/// Owner only. Changing lat, lng, or price_per_day sends the office back
/// to PENDING approval and notifies the administrators. A `tags` list
/// fully replaces prior associations.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOffice>,
) -> AppResult<Json<DataResponse<OfficeDetails>>> {
    user.require(Scope::OfficeUpdate)?;

    let mut office = OfficeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id,
        }))?;
    if office.user_id != user.user_id {
        return Err(CoreError::Forbidden("Only the owner may update this office".into()).into());
    }

    if let Some(title) = &input.title {
        office_rules::validate_title(title)?;
    }
    if let Some(description) = &input.description {
        office_rules::validate_description(description)?;
    }
    office_rules::validate_coordinates(
        input.lat.unwrap_or(office.lat),
        input.lng.unwrap_or(office.lng),
    )?;
    if let Some(price_per_day) = input.price_per_day {
        office_rules::validate_price_per_day(price_per_day)?;
    }
    if let Some(monthly_discount) = input.monthly_discount {
        office_rules::validate_monthly_discount(monthly_discount)?;
    }
    if let Some(tags) = &input.tags {
        validate_tags_exist(&state, tags).await?;
    }
    if let Some(Some(featured_image_id)) = input.featured_image_id {
        let image = ImageRepo::find_by_id(&state.pool, featured_image_id).await?;
        if !image.is_some_and(|i| i.office_id == office.id) {
            return Err(CoreError::validation(
                "featured_image_id",
                "featured_image_id must reference an image of this office",
            )
            .into());
        }
    }

    let requires_review = input.lat.is_some_and(|v| v != office.lat)
        || input.lng.is_some_and(|v| v != office.lng)
        || input
            .price_per_day
            .is_some_and(|v| v != office.price_per_day);

    apply_update(&mut office, &input);
    if requires_review {
        office.approval_status = officely_db::models::office::ApprovalStatus::Pending;
    }

    let mut tx = state.pool.begin().await?;
    let saved = OfficeRepo::save(&mut tx, &office)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id,
        }))?;
    if let Some(tags) = &input.tags {
        TagRepo::sync(&mut tx, office.id, tags).await?;
    }
    tx.commit().await?;

    if requires_review {
        notify_admins_pending(&state, &saved).await?;
    }

    let details = find_details(&state, saved.id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// DELETE /api/v1/offices/{id}
///
/// Owner only. Refused while any ACTIVE reservation exists; otherwise a
/// soft delete.
pub async fn destroy(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    user.require(Scope::OfficeDelete)?;

    let office = OfficeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id,
        }))?;
    if office.user_id != user.user_id {
        return Err(CoreError::Forbidden("Only the owner may delete this office".into()).into());
    }

    if ReservationRepo::active_exists_for_office(&state.pool, office.id).await? {
        return Err(CoreError::validation(
            "office",
            "Cannot delete an office with active reservations",
        )
        .into());
    }

    OfficeRepo::soft_delete(&state.pool, office.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Copy the allow-listed mutable fields from the update DTO onto the
/// loaded office row.
fn apply_update(office: &mut Office, input: &UpdateOffice) {
    if let Some(title) = &input.title {
        office.title = title.clone();
    }
    if let Some(description) = &input.description {
        office.description = description.clone();
    }
    if let Some(address_line1) = &input.address_line1 {
        office.address_line1 = Some(address_line1.clone());
    }
    if let Some(lat) = input.lat {
        office.lat = lat;
    }
    if let Some(lng) = input.lng {
        office.lng = lng;
    }
    if let Some(price_per_day) = input.price_per_day {
        office.price_per_day = price_per_day;
    }
    if let Some(monthly_discount) = input.monthly_discount {
        office.monthly_discount = monthly_discount;
    }
    if let Some(hidden) = input.hidden {
        office.hidden = hidden;
    }
    // Explicit null clears the featured image; absence leaves it alone.
    if let Some(featured_image_id) = input.featured_image_id {
        office.featured_image_id = featured_image_id;
    }
}

/// Fail with a VALIDATION error on `tags` if any id does not exist.
async fn validate_tags_exist(state: &AppState, tag_ids: &[DbId]) -> AppResult<()> {
    if tag_ids.is_empty() {
        return Ok(());
    }
    let existing = TagRepo::existing_ids(&state.pool, tag_ids).await?;
    for id in tag_ids {
        if !existing.contains(id) {
            return Err(CoreError::validation("tags", format!("Unknown tag id {id}")).into());
        }
    }
    Ok(())
}

/// Dispatch the pending-approval notification to all administrators.
async fn notify_admins_pending(state: &AppState, office: &Office) -> AppResult<()> {
    let admins = UserRepo::admins(&state.pool).await?;
    state.notifier.office_pending_approval(&admins, office).await;
    Ok(())
}

/// Load the full projection for one office or fail with 404.
async fn find_details(state: &AppState, id: DbId) -> AppResult<OfficeDetails> {
    let row = OfficeRepo::find_list_row(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Office",
            id,
        }))?;
    let mut details = OfficeRepo::load_details(&state.pool, vec![row]).await?;
    details
        .pop()
        .ok_or_else(|| AppError::InternalError("office projection vanished".into()))
}
