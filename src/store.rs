//! Storage engine and shared application state
//!
//! This module is the sole authority over entity state: it assigns
//! identifiers, stamps timestamps, applies per-entity defaults and owns the
//! backing collections. The [`Store`] trait is the capability interface the
//! API layer talks to, so the in-memory implementation can later be swapped
//! for a persistent backend without touching the handlers.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::model::{
    AlbumOrder, AlbumOrderPatch, Comment, Event, EventPatch, EventStats, Like, LikeToggle,
    NewAlbumOrder, NewComment, NewEvent, NewPhoto, OrderStatus, Photo,
};

/// Capability interface over entity storage.
///
/// Every operation is a single synchronous in-memory step: no I/O, no
/// suspension points, and "not found" is always reported as `None`/`false`
/// rather than an error.
pub trait Store: Send + Sync {
    // Events
    fn create_event(&self, event: NewEvent) -> Event;
    fn event(&self, id: i64) -> Option<Event>;
    fn event_by_qr_code(&self, qr_code: &str) -> Option<Event>;
    /// All events, newest first.
    fn events(&self) -> Vec<Event>;
    fn update_event(&self, id: i64, patch: EventPatch) -> Option<Event>;

    // Photos
    fn create_photo(&self, photo: NewPhoto) -> Photo;
    fn photo(&self, id: i64) -> Option<Photo>;
    /// Photos belonging to an event, newest first.
    fn photos_by_event(&self, event_id: i64) -> Vec<Photo>;
    fn delete_photo(&self, id: i64) -> bool;

    // Likes
    /// Likes on a photo, in insertion order.
    fn likes_by_photo(&self, photo_id: i64) -> Vec<Like>;
    /// Toggles the (photo, guest) like and writes the resulting count back
    /// onto the photo's `likes` field in the same critical section.
    fn toggle_like(&self, photo_id: i64, guest_name: &str) -> LikeToggle;

    // Comments
    fn create_comment(&self, comment: NewComment) -> Comment;
    /// Comments on a photo in chronological reading order (oldest first) —
    /// intentionally the opposite of the other listings.
    fn comments_by_photo(&self, photo_id: i64) -> Vec<Comment>;
    fn delete_comment(&self, id: i64) -> bool;

    // Album orders
    fn create_album_order(&self, order: NewAlbumOrder) -> AlbumOrder;
    /// Album orders for an event, newest first.
    fn album_orders_by_event(&self, event_id: i64) -> Vec<AlbumOrder>;
    fn update_album_order(&self, id: i64, patch: AlbumOrderPatch) -> Option<AlbumOrder>;

    // Aggregates
    fn event_stats(&self, event_id: i64) -> EventStats;
}

/// Entity maps and per-type id counters.
///
/// Counters start at 1 and only ever increase, so ids are never reused,
/// even after deletion.
#[derive(Debug, Default)]
struct Tables {
    events: HashMap<i64, Event>,
    photos: HashMap<i64, Photo>,
    likes: HashMap<i64, Like>,
    comments: HashMap<i64, Comment>,
    album_orders: HashMap<i64, AlbumOrder>,
    next_event_id: i64,
    next_photo_id: i64,
    next_like_id: i64,
    next_comment_id: i64,
    next_album_order_id: i64,
}

impl Tables {
    fn new() -> Self {
        Tables {
            next_event_id: 1,
            next_photo_id: 1,
            next_like_id: 1,
            next_comment_id: 1,
            next_album_order_id: 1,
            ..Default::default()
        }
    }
}

/// In-memory [`Store`] implementation.
///
/// A single mutex guards all five maps, so each operation is one critical
/// section. That makes the two logically-coupled mutations in
/// [`Store::toggle_like`] (the Like row and the photo's counter) atomic
/// with respect to concurrent requests.
#[derive(Debug)]
pub struct MemStore {
    tables: Mutex<Tables>,
}

impl MemStore {
    pub fn new() -> Self {
        MemStore {
            tables: Mutex::new(Tables::new()),
        }
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // No operation can leave the maps inconsistent mid-panic, so a
        // poisoned lock is still safe to reuse.
        self.tables.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemStore {
    fn create_event(&self, event: NewEvent) -> Event {
        let mut tables = self.tables();
        let id = tables.next_event_id;
        tables.next_event_id += 1;

        let now = Utc::now();
        // Derived from the fresh id, so no two events can ever collide.
        let qr_code = format!("event-{}-{}", id, now.timestamp_millis());
        let event = Event {
            id,
            couple_name: event.couple_name,
            date: event.date,
            venue: event.venue,
            qr_code,
            is_active: true,
            created_at: now,
        };
        tables.events.insert(id, event.clone());
        event
    }

    fn event(&self, id: i64) -> Option<Event> {
        self.tables().events.get(&id).cloned()
    }

    fn event_by_qr_code(&self, qr_code: &str) -> Option<Event> {
        self.tables()
            .events
            .values()
            .find(|event| event.qr_code == qr_code)
            .cloned()
    }

    fn events(&self) -> Vec<Event> {
        let tables = self.tables();
        let mut events: Vec<Event> = tables.events.values().cloned().collect();
        events.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        events
    }

    fn update_event(&self, id: i64, patch: EventPatch) -> Option<Event> {
        let mut tables = self.tables();
        let event = tables.events.get_mut(&id)?;
        if let Some(is_active) = patch.is_active {
            event.is_active = is_active;
        }
        Some(event.clone())
    }

    fn create_photo(&self, photo: NewPhoto) -> Photo {
        let mut tables = self.tables();
        let id = tables.next_photo_id;
        tables.next_photo_id += 1;

        let photo = Photo {
            id,
            event_id: photo.event_id,
            filename: photo.filename,
            original_name: photo.original_name,
            contributor_name: photo.contributor_name,
            caption: photo.caption,
            likes: 0,
            uploaded_at: Utc::now(),
        };
        tables.photos.insert(id, photo.clone());
        photo
    }

    fn photo(&self, id: i64) -> Option<Photo> {
        self.tables().photos.get(&id).cloned()
    }

    fn photos_by_event(&self, event_id: i64) -> Vec<Photo> {
        let tables = self.tables();
        let mut photos: Vec<Photo> = tables
            .photos
            .values()
            .filter(|photo| photo.event_id == event_id)
            .cloned()
            .collect();
        photos.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at).then(b.id.cmp(&a.id)));
        photos
    }

    fn delete_photo(&self, id: i64) -> bool {
        self.tables().photos.remove(&id).is_some()
    }

    fn likes_by_photo(&self, photo_id: i64) -> Vec<Like> {
        let tables = self.tables();
        let mut likes: Vec<Like> = tables
            .likes
            .values()
            .filter(|like| like.photo_id == photo_id)
            .cloned()
            .collect();
        // HashMap iteration order is arbitrary; id order is insertion order.
        likes.sort_by_key(|like| like.id);
        likes
    }

    fn toggle_like(&self, photo_id: i64, guest_name: &str) -> LikeToggle {
        let mut tables = self.tables();

        let existing_id = tables
            .likes
            .values()
            .find(|like| like.photo_id == photo_id && like.guest_name == guest_name)
            .map(|like| like.id);

        let liked = match existing_id {
            Some(like_id) => {
                tables.likes.remove(&like_id);
                false
            }
            None => {
                let id = tables.next_like_id;
                tables.next_like_id += 1;
                let like = Like {
                    id,
                    photo_id,
                    guest_name: guest_name.to_string(),
                    created_at: Utc::now(),
                };
                tables.likes.insert(id, like);
                true
            }
        };

        let count = tables
            .likes
            .values()
            .filter(|like| like.photo_id == photo_id)
            .count() as i64;

        // Write-back of the denormalized counter, inside the same lock as
        // the Like mutation. A like on an already-deleted photo still
        // reports the count; there is just no photo row to update.
        if let Some(photo) = tables.photos.get_mut(&photo_id) {
            photo.likes = count;
        }

        LikeToggle { liked, count }
    }

    fn create_comment(&self, comment: NewComment) -> Comment {
        let mut tables = self.tables();
        let id = tables.next_comment_id;
        tables.next_comment_id += 1;

        let comment = Comment {
            id,
            photo_id: comment.photo_id,
            guest_name: comment.guest_name,
            content: comment.content,
            created_at: Utc::now(),
        };
        tables.comments.insert(id, comment.clone());
        comment
    }

    fn comments_by_photo(&self, photo_id: i64) -> Vec<Comment> {
        let tables = self.tables();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|comment| comment.photo_id == photo_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        comments
    }

    fn delete_comment(&self, id: i64) -> bool {
        self.tables().comments.remove(&id).is_some()
    }

    fn create_album_order(&self, order: NewAlbumOrder) -> AlbumOrder {
        let mut tables = self.tables();
        let id = tables.next_album_order_id;
        tables.next_album_order_id += 1;

        let order = AlbumOrder {
            id,
            event_id: order.event_id,
            customer_name: order.customer_name,
            customer_email: order.customer_email,
            album_type: order.album_type,
            selected_photos: order.selected_photos,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        tables.album_orders.insert(id, order.clone());
        order
    }

    fn album_orders_by_event(&self, event_id: i64) -> Vec<AlbumOrder> {
        let tables = self.tables();
        let mut orders: Vec<AlbumOrder> = tables
            .album_orders
            .values()
            .filter(|order| order.event_id == event_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        orders
    }

    fn update_album_order(&self, id: i64, patch: AlbumOrderPatch) -> Option<AlbumOrder> {
        let mut tables = self.tables();
        let order = tables.album_orders.get_mut(&id)?;
        if let Some(status) = patch.status {
            order.status = status;
        }
        Some(order.clone())
    }

    fn event_stats(&self, event_id: i64) -> EventStats {
        let tables = self.tables();

        let mut total_photos = 0i64;
        let mut total_likes = 0i64;
        let mut contributors: HashSet<&str> = HashSet::new();
        for photo in tables.photos.values() {
            if photo.event_id != event_id {
                continue;
            }
            total_photos += 1;
            // Sums the denormalized counter, not a recount of Like rows.
            total_likes += photo.likes;
            if let Some(name) = photo.contributor_name.as_deref() {
                if !name.is_empty() {
                    contributors.insert(name);
                }
            }
        }

        let album_orders = tables
            .album_orders
            .values()
            .filter(|order| order.event_id == event_id)
            .count() as i64;

        EventStats {
            total_photos,
            total_likes,
            contributors: contributors.len() as i64,
            album_orders,
        }
    }
}

/// Application state shared across all request handlers.
///
/// The storage engine is held behind the [`Store`] trait so tests and a
/// future persistent backend can provide their own implementation.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,

    /// Directory the uploaded image blobs are written to
    pub upload_dir: PathBuf,

    /// Public base URL used to build guest-facing QR links
    pub base_url: String,
}
