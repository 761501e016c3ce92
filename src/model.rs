//! Data models for the wedding photo-sharing application
//!
//! This module defines the five entity records kept by the storage engine
//! (Event, Photo, Like, Comment, AlbumOrder), the insert payloads used to
//! create them, the patch types listing the fields that are legitimately
//! mutable after creation, and the request/response shapes of the API.
//!
//! All JSON payloads are camelCase, matching the field names guests and the
//! admin dashboard see on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One wedding/gathering instance; the root of the data hierarchy.
///
/// # Example
/// ```json
/// {
///   "id": 1,
///   "coupleName": "A & B",
///   "date": "2025-06-01",
///   "venue": "Hall",
///   "qrCode": "event-1-1717200000000",
///   "isActive": true,
///   "createdAt": "2025-05-20T13:40:00Z"
/// }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Unique identifier, assigned by the storage engine
    pub id: i64,

    /// Display name of the couple (e.g., "A & B")
    pub couple_name: String,

    /// Event date as entered by the organizer (free-form text)
    pub date: String,

    /// Venue name as entered by the organizer
    pub venue: String,

    /// Opaque unique code guests use to reach the event page.
    /// Generated by the storage engine at creation; immutable afterwards.
    pub qr_code: String,

    /// Whether the event is currently accepting guest activity
    pub is_active: bool,

    /// Timestamp when this event was created
    pub created_at: DateTime<Utc>,
}

/// A photo uploaded by a guest, belonging to one event.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: i64,

    /// Event this photo belongs to
    pub event_id: i64,

    /// Generated filename of the stored image blob
    pub filename: String,

    /// Filename the guest's browser sent with the upload
    pub original_name: String,

    /// Self-reported display name of the uploader, if given
    pub contributor_name: Option<String>,

    /// Optional caption entered at upload time
    pub caption: Option<String>,

    /// Denormalized like counter, written back by `toggle_like`
    pub likes: i64,

    pub uploaded_at: DateTime<Utc>,
}

/// A guest's like on a photo. At most one per (photo, guest name) pair;
/// a repeat like from the same guest toggles the existing one off.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: i64,
    pub photo_id: i64,
    pub guest_name: String,
    pub created_at: DateTime<Utc>,
}

/// A guest's comment on a photo.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub photo_id: i64,
    pub guest_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Processing state of an album order. Transitions are unconstrained:
/// the admin may set any state from any state.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Cancelled,
}

/// A request for a printed photo album tied to an event.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AlbumOrder {
    pub id: i64,
    pub event_id: i64,
    pub customer_name: String,
    pub customer_email: String,

    /// Album product variant chosen by the customer
    pub album_type: String,

    /// Selected photo ids, encoded as text by the client
    pub selected_photos: String,

    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`Event`]. The storage engine fills in the id,
/// qr code, active flag and timestamp.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub couple_name: String,
    pub date: String,
    pub venue: String,
}

/// Insert payload for [`Photo`]. Produced by the upload handler after the
/// blob store has validated and persisted the file.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub event_id: i64,
    pub filename: String,
    pub original_name: String,
    pub contributor_name: Option<String>,
    pub caption: Option<String>,
}

/// Insert payload for [`Comment`].
#[derive(Debug, Clone)]
pub struct NewComment {
    pub photo_id: i64,
    pub guest_name: String,
    pub content: String,
}

/// Insert payload for [`AlbumOrder`]. Status is always set to
/// [`OrderStatus::Pending`] by the storage engine.
#[derive(Debug, Clone)]
pub struct NewAlbumOrder {
    pub event_id: i64,
    pub customer_name: String,
    pub customer_email: String,
    pub album_type: String,
    pub selected_photos: String,
}

/// Fields of an [`Event`] that may be changed after creation.
/// Unknown fields are rejected rather than silently merged.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EventPatch {
    pub is_active: Option<bool>,
}

/// Fields of an [`AlbumOrder`] that may be changed after creation.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AlbumOrderPatch {
    pub status: Option<OrderStatus>,
}

/// Request payload for creating a new event
///
/// # Example
/// ```json
/// {
///   "coupleName": "A & B",
///   "date": "2025-06-01",
///   "venue": "Hall"
/// }
/// ```
///
/// Required fields are optional here so a missing field surfaces as a 400
/// validation error naming the field, not a generic body-decode failure.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub couple_name: Option<String>,
    pub date: Option<String>,
    pub venue: Option<String>,
}

/// Response returned after successfully creating an event.
/// Includes the guest-facing URL the printed QR code should point at.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventResponse {
    #[serde(flatten)]
    pub event: Event,

    /// Link encoded into the QR code (e.g. "http://host/event/event-1-...")
    pub qr_code_url: String,
}

/// Request payload for toggling a like on a photo
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub guest_name: Option<String>,
}

/// Outcome of a like toggle: whether the guest now likes the photo, and
/// the photo's like count after the mutation.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeToggle {
    pub liked: bool,
    pub count: i64,
}

/// Request payload for commenting on a photo
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub guest_name: Option<String>,
    pub content: Option<String>,
}

/// Request payload for ordering a printed album
///
/// # Example
/// ```json
/// {
///   "customerName": "Jane Doe",
///   "customerEmail": "jane@example.com",
///   "albumType": "classic",
///   "selectedPhotos": "[1,2,5]"
/// }
/// ```
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumOrderRequest {
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub album_type: Option<String>,
    pub selected_photos: Option<String>,
}

/// Aggregate counts shown on the admin dashboard for one event.
///
/// `total_likes` sums each photo's stored `likes` counter rather than
/// recounting Like records, so it reflects whatever was last written back.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EventStats {
    pub total_photos: i64,
    pub total_likes: i64,
    pub contributors: i64,
    pub album_orders: i64,
}
