//! Repository tests for events and their photo gallery.

mod common;

use sqlx::PgPool;
use clubhub_db::repositories::EventRepo;

use common::create_event;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_gallery_set_add_preserves_order(pool: PgPool) {
    let event = create_event(&pool, "Fest").await;
    let urls = vec!["/a.png".to_string(), "/b.png".to_string(), "/a.png".to_string()];
    let added = EventRepo::add_gallery_urls(&pool, event.id, &urls).await.unwrap();
    assert_eq!(added, 2);

    EventRepo::add_gallery_urls(&pool, event.id, &["/b.png".to_string(), "/c.png".to_string()])
        .await
        .unwrap();
    assert_eq!(
        EventRepo::gallery(&pool, event.id).await.unwrap(),
        vec!["/a.png", "/b.png", "/c.png"]
    );

    assert!(EventRepo::remove_gallery_url(&pool, event.id, "/b.png").await.unwrap());
    assert!(!EventRepo::remove_gallery_url(&pool, event.id, "/b.png").await.unwrap());
}
