//! HTTP request handlers for the photo-sharing API
//!
//! This module implements the request/response contract for:
//! - Creating events and looking them up by id or QR code
//! - Guest photo uploads (multipart) and photo deletion
//! - Like toggling and commenting
//! - Printed album orders
//! - Aggregate event stats for the admin dashboard
//!
//! Handlers validate payload shape, call the storage engine through the
//! [`Store`](crate::store::Store) trait and shape the JSON response; all
//! entity state lives behind the storage engine.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::debug;

use crate::error::ApiError;
use crate::model::{
    AddCommentRequest, AlbumOrderPatch, CreateAlbumOrderRequest, CreateEventRequest,
    CreateEventResponse, EventPatch, NewAlbumOrder, NewComment, NewEvent, NewPhoto,
    ToggleLikeRequest,
};
use crate::store::AppState;
use crate::upload;

/// Unwraps a required request field, rejecting absent or blank values.
fn required(value: Option<String>, field: &'static str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::validation(format!("{field} is required"))),
    }
}

/// Normalizes an optional text field: absent or blank becomes `None`.
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Creates a new event
///
/// # Request Body
///
/// ```json
/// {
///   "coupleName": "A & B",
///   "date": "2025-06-01",
///   "venue": "Hall"
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - the event, including its generated `qrCode` and the
///   guest-facing `qrCodeUrl` to encode into the printed QR code
/// - **400 Bad Request** - a required field is missing
pub async fn create_event(
    State(state): State<AppState>,
    Json(payload): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let event = NewEvent {
        couple_name: required(payload.couple_name, "coupleName")?,
        date: required(payload.date, "date")?,
        venue: required(payload.venue, "venue")?,
    };

    let event = state.store.create_event(event);
    let qr_code_url = format!("{}/event/{}", state.base_url, event.qr_code);

    Ok((
        StatusCode::CREATED,
        Json(CreateEventResponse { event, qr_code_url }),
    ))
}

/// Lists all events, newest first
pub async fn list_events(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.store.events())
}

/// Fetches a single event by id
///
/// # Response
///
/// - **200 OK** - the event
/// - **404 Not Found** - no event with this id
pub async fn get_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state.store.event(id).ok_or(ApiError::NotFound("event"))?;
    Ok(Json(event))
}

/// Fetches an event by its QR code, the lookup guests land on after
/// scanning
pub async fn get_event_by_qr_code(
    State(state): State<AppState>,
    Path(qr_code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state
        .store
        .event_by_qr_code(&qr_code)
        .ok_or(ApiError::NotFound("event"))?;
    Ok(Json(event))
}

/// Updates the mutable fields of an event (currently `isActive`)
///
/// Unknown fields in the patch body are rejected.
pub async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<EventPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let event = state
        .store
        .update_event(id, patch)
        .ok_or(ApiError::NotFound("event"))?;
    Ok(Json(event))
}

/// Uploads 1-10 guest photos to an event
///
/// # Request
///
/// Multipart form with one or more `photos` file fields (jpeg/jpg/png/gif/
/// webp, 10 MB each at most) and optional `contributorName` and `caption`
/// text fields applying to every file in the batch.
///
/// # Response
///
/// - **201 Created** - the created Photo records, in upload order
/// - **400 Bad Request** - zero files, too many files, disallowed type or
///   an oversized file; nothing is persisted in that case
pub async fn upload_photos(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    let mut contributor_name = None;
    let mut caption = None;
    let mut files: Vec<(String, Option<String>, Vec<u8>)> = Vec::new();

    // Field order in a multipart body is browser-defined, so collect
    // everything before creating records.
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(|name| name.to_string());
        match name.as_deref() {
            Some("contributorName") => contributor_name = optional(Some(field.text().await?)),
            Some("caption") => caption = optional(Some(field.text().await?)),
            Some("photos") => {
                let original_name = field
                    .file_name()
                    .map(|name| name.to_string())
                    .unwrap_or_default();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field.bytes().await?;
                upload::validate(&original_name, content_type.as_deref(), data.len())?;
                files.push((original_name, content_type, data.to_vec()));
            }
            _ => {}
        }
    }

    if files.is_empty() {
        return Err(ApiError::upload_rejected("no files uploaded"));
    }
    if files.len() > upload::MAX_FILES_PER_UPLOAD {
        return Err(ApiError::upload_rejected(format!(
            "at most {} files per upload",
            upload::MAX_FILES_PER_UPLOAD
        )));
    }

    let mut photos = Vec::with_capacity(files.len());
    for (original_name, content_type, data) in files {
        let filename = upload::save(
            &state.upload_dir,
            &original_name,
            content_type.as_deref(),
            &data,
        )
        .await?;
        debug!("stored blob {filename} ({} bytes) for event {event_id}", data.len());

        photos.push(state.store.create_photo(NewPhoto {
            event_id,
            filename,
            original_name,
            contributor_name: contributor_name.clone(),
            caption: caption.clone(),
        }));
    }

    Ok((StatusCode::CREATED, Json(photos)))
}

/// Lists an event's photos, newest first
pub async fn list_photos(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> impl IntoResponse {
    Json(state.store.photos_by_event(event_id))
}

/// Deletes a photo and its stored image blob
///
/// # Response
///
/// - **200 OK** - `{"success": true}`
/// - **404 Not Found** - no photo with this id
pub async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let photo = state.store.photo(id).ok_or(ApiError::NotFound("photo"))?;

    upload::remove(&state.upload_dir, &photo.filename).await?;
    state.store.delete_photo(id);

    Ok(Json(json!({ "success": true })))
}

/// Toggles a guest's like on a photo
///
/// A first like from a guest creates the Like; a repeat like from the same
/// guest removes it. The photo's like counter is updated in the same
/// storage operation.
///
/// # Request Body
///
/// ```json
/// { "guestName": "Jane" }
/// ```
///
/// # Response
///
/// - **200 OK** - `{"liked": bool, "count": int}` after the toggle
/// - **400 Bad Request** - missing or blank guest name
pub async fn toggle_like(
    State(state): State<AppState>,
    Path(photo_id): Path<i64>,
    Json(payload): Json<ToggleLikeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let guest_name = required(payload.guest_name, "guestName")?;
    let outcome = state.store.toggle_like(photo_id, &guest_name);
    Ok(Json(outcome))
}

/// Adds a guest comment to a photo
///
/// # Response
///
/// - **201 Created** - the comment
/// - **400 Bad Request** - missing guest name or content
pub async fn add_comment(
    State(state): State<AppState>,
    Path(photo_id): Path<i64>,
    Json(payload): Json<AddCommentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state.store.create_comment(NewComment {
        photo_id,
        guest_name: required(payload.guest_name, "guestName")?,
        content: required(payload.content, "content")?,
    });
    Ok((StatusCode::CREATED, Json(comment)))
}

/// Lists a photo's comments in chronological reading order (oldest first)
pub async fn list_comments(
    State(state): State<AppState>,
    Path(photo_id): Path<i64>,
) -> impl IntoResponse {
    Json(state.store.comments_by_photo(photo_id))
}

/// Removes a comment (moderation surface)
pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    if !state.store.delete_comment(id) {
        return Err(ApiError::NotFound("comment"));
    }
    Ok(Json(json!({ "success": true })))
}

/// Places a printed album order for an event
///
/// # Request Body
///
/// ```json
/// {
///   "customerName": "Jane Doe",
///   "customerEmail": "jane@example.com",
///   "albumType": "classic",
///   "selectedPhotos": "[1,2,5]"
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - the order, with status `"pending"`
/// - **400 Bad Request** - a required field is missing
pub async fn create_album_order(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
    Json(payload): Json<CreateAlbumOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.store.create_album_order(NewAlbumOrder {
        event_id,
        customer_name: required(payload.customer_name, "customerName")?,
        customer_email: required(payload.customer_email, "customerEmail")?,
        album_type: required(payload.album_type, "albumType")?,
        selected_photos: required(payload.selected_photos, "selectedPhotos")?,
    });
    Ok((StatusCode::CREATED, Json(order)))
}

/// Lists an event's album orders, newest first
pub async fn list_album_orders(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> impl IntoResponse {
    Json(state.store.album_orders_by_event(event_id))
}

/// Updates the mutable fields of an album order (currently `status`)
pub async fn update_album_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<AlbumOrderPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .store
        .update_album_order(id, patch)
        .ok_or(ApiError::NotFound("album order"))?;
    Ok(Json(order))
}

/// Aggregate counts for the admin dashboard
///
/// # Response
///
/// ```json
/// {
///   "totalPhotos": 12,
///   "totalLikes": 40,
///   "contributors": 5,
///   "albumOrders": 2
/// }
/// ```
pub async fn event_stats(
    State(state): State<AppState>,
    Path(event_id): Path<i64>,
) -> impl IntoResponse {
    Json(state.store.event_stats(event_id))
}
