//! Storage engine semantics tests
//!
//! These exercise the in-memory store directly, without the HTTP layer:
//! identifier assignment, defaults, orderings, like toggling and the
//! aggregate stats computation.

use wedshare::model::{
    AlbumOrderPatch, EventPatch, NewAlbumOrder, NewComment, NewEvent, NewPhoto, OrderStatus,
};
use wedshare::store::{MemStore, Store};

fn new_event(couple_name: &str) -> NewEvent {
    NewEvent {
        couple_name: couple_name.to_string(),
        date: "2025-06-01".to_string(),
        venue: "Hall".to_string(),
    }
}

fn new_photo(event_id: i64, contributor: Option<&str>) -> NewPhoto {
    NewPhoto {
        event_id,
        filename: "123-abc.jpg".to_string(),
        original_name: "holiday.jpg".to_string(),
        contributor_name: contributor.map(|c| c.to_string()),
        caption: None,
    }
}

fn new_comment(photo_id: i64, guest: &str, content: &str) -> NewComment {
    NewComment {
        photo_id,
        guest_name: guest.to_string(),
        content: content.to_string(),
    }
}

fn new_order(event_id: i64) -> NewAlbumOrder {
    NewAlbumOrder {
        event_id,
        customer_name: "Jane Doe".to_string(),
        customer_email: "jane@example.com".to_string(),
        album_type: "classic".to_string(),
        selected_photos: "[1,2]".to_string(),
    }
}

#[test]
fn create_event_fills_defaults() {
    let store = MemStore::new();

    let event = store.create_event(new_event("A & B"));

    assert_eq!(event.id, 1);
    assert_eq!(event.couple_name, "A & B");
    assert!(event.is_active);
    assert!(!event.qr_code.is_empty());

    let second = store.create_event(new_event("C & D"));
    assert_eq!(second.id, 2);
}

#[test]
fn qr_codes_are_unique_and_resolvable() {
    let store = MemStore::new();

    let mut codes = std::collections::HashSet::new();
    for i in 0..50 {
        let event = store.create_event(new_event(&format!("Couple {i}")));
        assert!(codes.insert(event.qr_code.clone()), "duplicate qr code");
        assert_eq!(
            store.event_by_qr_code(&event.qr_code).map(|e| e.id),
            Some(event.id)
        );
    }

    assert!(store.event_by_qr_code("event-999-0").is_none());
}

#[test]
fn events_are_listed_newest_first() {
    let store = MemStore::new();
    for i in 0..3 {
        store.create_event(new_event(&format!("Couple {i}")));
    }

    let ids: Vec<i64> = store.events().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn event_lookup_and_patch() {
    let store = MemStore::new();
    let event = store.create_event(new_event("A & B"));

    assert_eq!(store.event(event.id).map(|e| e.id), Some(event.id));
    assert!(store.event(99).is_none());

    let patched = store
        .update_event(event.id, EventPatch { is_active: Some(false) })
        .expect("event exists");
    assert!(!patched.is_active);
    assert!(!store.event(event.id).unwrap().is_active);

    // qr code never changes after creation
    assert_eq!(patched.qr_code, event.qr_code);

    assert!(store.update_event(99, EventPatch::default()).is_none());
}

#[test]
fn photos_default_to_zero_likes() {
    let store = MemStore::new();
    let photo = store.create_photo(new_photo(1, Some("Jane")));

    assert_eq!(photo.id, 1);
    assert_eq!(photo.likes, 0);
    assert_eq!(photo.contributor_name.as_deref(), Some("Jane"));
}

#[test]
fn photos_are_listed_per_event_newest_first() {
    let store = MemStore::new();
    store.create_photo(new_photo(1, None));
    store.create_photo(new_photo(2, None));
    store.create_photo(new_photo(1, None));

    let ids: Vec<i64> = store.photos_by_event(1).iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1]);
    assert!(store.photos_by_event(7).is_empty());
}

#[test]
fn photo_ids_are_not_reused_after_deletion() {
    let store = MemStore::new();
    let first = store.create_photo(new_photo(1, None));
    assert_eq!(first.id, 1);

    assert!(store.delete_photo(first.id));
    assert!(!store.delete_photo(first.id), "second delete reports missing");

    let second = store.create_photo(new_photo(1, None));
    assert_eq!(second.id, 2);
    assert_eq!(store.photos_by_event(1).len(), 1);
}

#[test]
fn like_toggle_creates_then_removes() {
    let store = MemStore::new();
    let photo = store.create_photo(new_photo(1, None));

    let first = store.toggle_like(photo.id, "Jane");
    assert!(first.liked);
    assert_eq!(first.count, 1);
    assert_eq!(store.photo(photo.id).unwrap().likes, 1);

    let second = store.toggle_like(photo.id, "Jane");
    assert!(!second.liked);
    assert_eq!(second.count, 0);
    assert_eq!(store.photo(photo.id).unwrap().likes, 0);
}

#[test]
fn likes_from_distinct_guests_accumulate() {
    let store = MemStore::new();
    let photo = store.create_photo(new_photo(1, None));

    assert_eq!(store.toggle_like(photo.id, "Jane").count, 1);
    assert_eq!(store.toggle_like(photo.id, "John").count, 2);

    let guests: Vec<String> = store
        .likes_by_photo(photo.id)
        .into_iter()
        .map(|l| l.guest_name)
        .collect();
    assert_eq!(guests, vec!["Jane".to_string(), "John".to_string()]);

    // one guest un-liking leaves the other's like intact
    assert_eq!(store.toggle_like(photo.id, "Jane").count, 1);
    assert_eq!(store.photo(photo.id).unwrap().likes, 1);
}

#[test]
fn comments_are_listed_oldest_first() {
    let store = MemStore::new();
    store.create_comment(new_comment(1, "Jane", "first"));
    store.create_comment(new_comment(2, "John", "other photo"));
    store.create_comment(new_comment(1, "John", "second"));

    let contents: Vec<String> = store
        .comments_by_photo(1)
        .into_iter()
        .map(|c| c.content)
        .collect();
    assert_eq!(contents, vec!["first".to_string(), "second".to_string()]);
}

#[test]
fn comment_deletion_reports_presence() {
    let store = MemStore::new();
    let comment = store.create_comment(new_comment(1, "Jane", "hello"));

    assert!(store.delete_comment(comment.id));
    assert!(!store.delete_comment(comment.id));
    assert!(store.comments_by_photo(1).is_empty());
}

#[test]
fn album_orders_default_to_pending() {
    let store = MemStore::new();
    let order = store.create_album_order(new_order(1));

    assert_eq!(order.id, 1);
    assert_eq!(order.status, OrderStatus::Pending);

    let listed = store.album_orders_by_event(1);
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, order.id);
}

#[test]
fn album_order_status_is_patchable() {
    let store = MemStore::new();
    let order = store.create_album_order(new_order(1));

    let updated = store
        .update_album_order(
            order.id,
            AlbumOrderPatch {
                status: Some(OrderStatus::Completed),
            },
        )
        .expect("order exists");
    assert_eq!(updated.status, OrderStatus::Completed);

    // any transition is allowed, including back to pending
    let reverted = store
        .update_album_order(
            order.id,
            AlbumOrderPatch {
                status: Some(OrderStatus::Pending),
            },
        )
        .unwrap();
    assert_eq!(reverted.status, OrderStatus::Pending);

    assert!(store
        .update_album_order(99, AlbumOrderPatch::default())
        .is_none());
}

#[test]
fn patch_types_reject_unknown_fields() {
    assert!(serde_json::from_str::<EventPatch>(r#"{"isActive":false}"#).is_ok());
    assert!(serde_json::from_str::<EventPatch>(r#"{"qrCode":"x"}"#).is_err());
    assert!(serde_json::from_str::<AlbumOrderPatch>(r#"{"status":"completed"}"#).is_ok());
    assert!(serde_json::from_str::<AlbumOrderPatch>(r#"{"customerName":"x"}"#).is_err());
    assert!(serde_json::from_str::<AlbumOrderPatch>(r#"{"status":"shipped"}"#).is_err());
}

#[test]
fn stats_aggregate_per_event() {
    let store = MemStore::new();

    let p1 = store.create_photo(new_photo(1, Some("Jane")));
    let p2 = store.create_photo(new_photo(1, Some("Jane")));
    store.create_photo(new_photo(1, Some("")));
    store.create_photo(new_photo(1, None));
    store.create_photo(new_photo(2, Some("Other")));

    store.toggle_like(p1.id, "Jane");
    store.toggle_like(p1.id, "John");
    store.toggle_like(p2.id, "Jane");

    store.create_album_order(new_order(1));
    store.create_album_order(new_order(2));

    let stats = store.event_stats(1);
    assert_eq!(stats.total_photos, store.photos_by_event(1).len() as i64);
    assert_eq!(stats.total_photos, 4);
    assert_eq!(stats.total_likes, 3);
    // blank and missing contributor names are not counted
    assert_eq!(stats.contributors, 1);
    assert_eq!(stats.album_orders, 1);
}

#[test]
fn stats_for_unknown_event_are_zero() {
    let store = MemStore::new();
    let stats = store.event_stats(42);

    assert_eq!(stats.total_photos, 0);
    assert_eq!(stats.total_likes, 0);
    assert_eq!(stats.contributors, 0);
    assert_eq!(stats.album_orders, 0);
}

#[test]
fn stats_follow_the_denormalized_counter() {
    let store = MemStore::new();
    let photo = store.create_photo(new_photo(1, None));
    store.toggle_like(photo.id, "Jane");
    store.toggle_like(photo.id, "John");

    assert_eq!(store.event_stats(1).total_likes, 2);

    store.toggle_like(photo.id, "Jane");
    assert_eq!(store.event_stats(1).total_likes, 1);
}
