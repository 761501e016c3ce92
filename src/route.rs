//! Route definitions for the photo-sharing API
//!
//! This module maps the HTTP surface onto the handlers and assembles the
//! Axum router with the application state.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post};
use axum::Router;
use tower_http::services::ServeDir;

use crate::handler::{
    add_comment, create_album_order, create_event, delete_comment, delete_photo, event_stats,
    get_event, get_event_by_qr_code, list_album_orders, list_comments, list_events, list_photos,
    toggle_like, update_album_order, update_event, upload_photos,
};
use crate::store::AppState;
use crate::upload;

/// Whole-request ceiling for a full batch of photo uploads, with headroom
/// for the multipart framing and text fields.
const UPLOAD_BODY_LIMIT: usize = upload::MAX_FILE_SIZE * upload::MAX_FILES_PER_UPLOAD + 1024 * 1024;

/// Creates and configures the Axum application router with all routes
///
/// # Route Definitions
///
/// - `POST /api/events` - Creates an event (returns the QR code)
/// - `GET /api/events` - Lists events, newest first
/// - `GET /api/events/{id}` - Fetches one event
/// - `PATCH /api/events/{id}` - Updates an event's mutable fields
/// - `GET /api/events/qr/{qr_code}` - Guest-facing lookup after a QR scan
/// - `POST /api/events/{id}/photos` - Multipart photo upload (1-10 files)
/// - `GET /api/events/{id}/photos` - Lists an event's photos
/// - `DELETE /api/photos/{id}` - Removes a photo and its blob
/// - `POST /api/photos/{id}/likes` - Toggles a guest's like
/// - `POST /api/photos/{id}/comments` - Adds a comment
/// - `GET /api/photos/{id}/comments` - Lists comments, oldest first
/// - `DELETE /api/comments/{id}` - Removes a comment (moderation)
/// - `POST /api/events/{id}/album-orders` - Places a printed album order
/// - `GET /api/events/{id}/album-orders` - Lists an event's orders
/// - `PATCH /api/album-orders/{id}` - Updates an order's status
/// - `GET /api/events/{id}/stats` - Aggregate counts for the admin view
/// - `GET /uploads/{filename}` - Serves the stored image blobs
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/events", get(list_events).post(create_event))
        .route("/events/{id}", get(get_event).patch(update_event))
        .route("/events/qr/{qr_code}", get(get_event_by_qr_code))
        // Only the upload route accepts large bodies; the JSON endpoints
        // keep axum's default limit.
        .route(
            "/events/{id}/photos",
            get(list_photos)
                .post(upload_photos)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route(
            "/events/{id}/album-orders",
            get(list_album_orders).post(create_album_order),
        )
        .route("/events/{id}/stats", get(event_stats))
        .route("/photos/{id}", delete(delete_photo))
        .route("/photos/{id}/likes", post(toggle_like))
        .route("/photos/{id}/comments", get(list_comments).post(add_comment))
        .route("/comments/{id}", delete(delete_comment))
        .route("/album-orders/{id}", patch(update_album_order));

    Router::new()
        // Uploaded image blobs, addressed by their generated filename
        .nest_service("/uploads", ServeDir::new(&state.upload_dir))
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
