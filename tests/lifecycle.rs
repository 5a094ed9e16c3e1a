mod common;

use common::{artist, artwork, genre, new_artist, new_artwork, new_event, representative, setup};
use gallery_kit::entities::artwork::Unit;
use gallery_kit::entities::{artist as artists, artwork as artworks, artwork_ratchet, event as events};
use gallery_kit::error::AppError;
use gallery_kit::services::ratchet;
use gallery_kit::tracking::Tracked;
use sea_orm::{EntityTrait, TransactionTrait};

#[tokio::test]
async fn artists_with_the_same_name_get_distinct_slugs() {
    let app = setup().await;

    let first = artist(&app, "Jane", "Doe").await;
    let second = artist(&app, "Jane", "Doe").await;

    assert_eq!(first.slug, "jane-doe-001");
    assert_eq!(second.slug, "jane-doe-002");
}

#[tokio::test]
async fn saving_without_a_rename_keeps_the_slug() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;

    let mut loaded = Tracked::loaded(jane.clone());
    loaded.description = "Works in oil and ink.".to_string();
    let saved = app.store().save(loaded).await.unwrap();

    assert_eq!(saved.slug, "jane-doe-001");
    assert!(saved.updated >= jane.updated);

    let another = artist(&app, "Jane", "Doe").await;
    assert_eq!(another.slug, "jane-doe-002");
}

#[tokio::test]
async fn suffixes_are_never_handed_out_twice() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;

    let mut renamed = Tracked::loaded(jane);
    renamed.last_name = "Roe".to_string();
    let renamed = app.store().save(renamed).await.unwrap();
    assert_eq!(renamed.slug, "jane-roe-001");

    let mut restored = Tracked::loaded(renamed.into_inner());
    restored.last_name = "Doe".to_string();
    let restored = app.store().save(restored).await.unwrap();
    assert_eq!(restored.slug, "jane-doe-002");
}

#[tokio::test]
async fn names_that_slugify_alike_share_a_counter() {
    let app = setup().await;

    let first = artist(&app, "Mary-Jane", "Doe").await;
    let second = artist(&app, "Mary", "Jane-Doe").await;
    assert_eq!(first.slug, "mary-jane-doe-001");
    assert_eq!(second.slug, "mary-jane-doe-002");

    let show = app.store().save(Tracked::new(new_event("Monsoon Show"))).await.unwrap();
    let shout = app.store().save(Tracked::new(new_event("Monsoon Show!"))).await.unwrap();
    assert_eq!(show.slug, "monsoon-show-001");
    assert_eq!(shout.slug, "monsoon-show-002");

    let madhubani = genre(&app, "Madhubani").await;
    let plain = artwork(&app, &first, &madhubani, "Show").await;
    let loud = artwork(&app, &first, &madhubani, "Show!").await;
    assert_eq!((plain.name.as_str(), plain.slug.as_str()), ("Show-001", "show-001"));
    assert_eq!((loud.name.as_str(), loud.slug.as_str()), ("Show!-002", "show-002"));
}

#[tokio::test]
async fn slugs_are_folded_to_ascii() {
    let app = setup().await;

    let amrita = artist(&app, "Amrita", "Sher-Gil Café").await;
    assert_eq!(amrita.slug, "amrita-sher-gil-cafe-001");

    let bare = app.store().save(Tracked::new(new_event("!!!"))).await.unwrap();
    let other = app.store().save(Tracked::new(new_event("???"))).await.unwrap();
    assert_eq!(bare.slug, "001");
    assert_eq!(other.slug, "002");
}

#[tokio::test]
async fn ratchet_starts_at_one_and_counts_up() {
    let app = setup().await;
    let txn = app.state.db.begin().await.unwrap();

    let first = ratchet::reserve::<artwork_ratchet::Entity, _>(&txn, "monsoon").await.unwrap();
    let second = ratchet::reserve::<artwork_ratchet::Entity, _>(&txn, "monsoon").await.unwrap();
    let other = ratchet::reserve::<artwork_ratchet::Entity, _>(&txn, "harvest").await.unwrap();
    txn.commit().await.unwrap();

    assert_eq!((first, second, other), (1, 2, 1));
}

#[tokio::test]
async fn artwork_names_carry_the_ratchet_suffix() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let madhubani = genre(&app, "Madhubani").await;

    let first = artwork(&app, &jane, &madhubani, "Monsoon Study").await;
    let second = artwork(&app, &jane, &madhubani, "Monsoon Study").await;

    assert_eq!(first.name, "Monsoon Study-001");
    assert_eq!(first.slug, "monsoon-study-001");
    assert_eq!(second.slug, "monsoon-study-002");
}

#[tokio::test]
async fn deactivating_an_artist_deactivates_their_artworks() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let ravi = artist(&app, "Ravi", "Varma").await;
    let madhubani = genre(&app, "Madhubani").await;
    artwork(&app, &jane, &madhubani, "Monsoon").await;
    artwork(&app, &jane, &madhubani, "Harvest").await;
    let untouched = artwork(&app, &ravi, &madhubani, "Fishermen").await;

    let mut retired = Tracked::loaded(jane.clone());
    retired.is_active = false;
    app.store().save(retired).await.unwrap();

    let rows = artworks::Entity::find().all(&app.state.db).await.unwrap();
    for row in rows {
        assert_eq!(row.is_active, row.id == untouched.id, "artwork {}", row.title);
    }
}

#[tokio::test]
async fn resaving_an_inactive_artist_leaves_artworks_alone() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let madhubani = genre(&app, "Madhubani").await;
    let monsoon = artwork(&app, &jane, &madhubani, "Monsoon").await;

    let mut retired = Tracked::loaded(jane);
    retired.is_active = false;
    let retired = app.store().save(retired).await.unwrap();

    let hidden = artworks::Entity::find_by_id(monsoon.id)
        .one(&app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert!(!hidden.is_active);

    let mut shown = Tracked::loaded(hidden);
    shown.is_active = true;
    app.store().save(shown).await.unwrap();

    let mut edited = retired;
    edited.description = "Retired in 2020.".to_string();
    app.store().save(edited).await.unwrap();

    let row = artworks::Entity::find_by_id(monsoon.id)
        .one(&app.state.db)
        .await
        .unwrap()
        .unwrap();
    assert!(row.is_active);
}

#[tokio::test]
async fn flagging_a_representative_clears_the_previous_one() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let ravi = artist(&app, "Ravi", "Varma").await;
    let madhubani = genre(&app, "Madhubani").await;

    let old = representative(&app, &jane, &madhubani, "Monsoon").await;
    let other_artist = representative(&app, &ravi, &madhubani, "Fishermen").await;
    let new = representative(&app, &jane, &madhubani, "Harvest").await;

    let reload = |id: uuid::Uuid| artworks::Entity::find_by_id(id).one(&app.state.db);
    assert!(!reload(old.id).await.unwrap().unwrap().is_representative);
    assert!(reload(new.id).await.unwrap().unwrap().is_representative);
    assert!(reload(other_artist.id).await.unwrap().unwrap().is_representative);
}

#[tokio::test]
async fn dimensions_are_mirrored_into_both_systems() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    let madhubani = genre(&app, "Madhubani").await;

    let mut piece = new_artwork(&jane, &madhubani, "Monsoon");
    piece.image_height = Some(10.0);
    piece.image_width = Some(20.0);
    let saved = app.store().save(Tracked::new(piece)).await.unwrap();

    assert_eq!(saved.height_metric, Some(25.4));
    assert_eq!(saved.width_metric, Some(50.8));
    assert_eq!(saved.height_imperial, Some(10.0));
    assert_eq!(saved.metric_units, Unit::Centimetres);

    let mut resized = saved;
    resized.measurement_units = Unit::Centimetres;
    resized.image_height = Some(100.0);
    let resized = app.store().save(resized).await.unwrap();

    assert_eq!(resized.height_metric, Some(100.0));
    assert_eq!(resized.height_imperial, Some(39.4));
    assert_eq!(resized.imperial_units, Unit::Inches);
}

#[tokio::test]
async fn genre_slug_follows_the_name() {
    let app = setup().await;
    let folk = genre(&app, "Folk Art").await;
    assert_eq!(folk.slug, "folk-art");

    let mut renamed = Tracked::loaded(folk);
    renamed.name = "Tribal Folk Art".to_string();
    let renamed = app.store().save(renamed).await.unwrap();
    assert_eq!(renamed.slug, "tribal-folk-art");
}

#[tokio::test]
async fn event_slug_is_ratcheted() {
    let app = setup().await;

    let saved = app.store().save(Tracked::new(new_event("Monsoon Show"))).await.unwrap();
    assert_eq!(saved.slug, "monsoon-show-001");
}

#[tokio::test]
async fn replaced_and_deleted_biographies_leave_no_files() {
    let app = setup().await;
    let files = app.state.files.clone();
    files.put("biographies/first.pdf", b"%PDF-1".to_vec(), "application/pdf").await.unwrap();
    files.put("biographies/second.pdf", b"%PDF-2".to_vec(), "application/pdf").await.unwrap();

    let mut jane = new_artist("Jane", "Doe");
    jane.biography = Some("biographies/first.pdf".to_string());
    let jane = app.store().save(Tracked::new(jane)).await.unwrap();

    let mut replaced = jane;
    replaced.biography = Some("biographies/second.pdf".to_string());
    let replaced = app.store().save(replaced).await.unwrap();

    assert!(!app.media_root.join("biographies/first.pdf").exists());
    assert!(app.media_root.join("biographies/second.pdf").exists());

    app.store().delete(replaced.into_inner()).await.unwrap();
    assert!(!app.media_root.join("biographies/second.pdf").exists());
    assert!(artists::Entity::find().all(&app.state.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn replaced_and_deleted_event_images_leave_no_files() {
    let app = setup().await;
    let files = app.state.files.clone();
    files.put("events/first.png", vec![1], "image/png").await.unwrap();
    files.put("events/second.png", vec![2], "image/png").await.unwrap();

    let mut show = new_event("Monsoon Show");
    show.image = Some("events/first.png".to_string());
    let show = app.store().save(Tracked::new(show)).await.unwrap();

    let mut replaced = show;
    replaced.image = Some("events/second.png".to_string());
    let replaced = app.store().save(replaced).await.unwrap();

    assert!(!app.media_root.join("events/first.png").exists());
    assert!(app.media_root.join("events/second.png").exists());

    app.store().delete(replaced.into_inner()).await.unwrap();
    assert!(!app.media_root.join("events/second.png").exists());
    assert!(events::Entity::find().all(&app.state.db).await.unwrap().is_empty());
}

#[tokio::test]
async fn attached_files_are_removed_when_the_save_fails() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;
    app.store().delete(jane.clone()).await.unwrap();

    let outcome = app
        .store()
        .attach(
            Tracked::loaded(jane),
            "biographies/jane-doe-001.pdf",
            b"%PDF-1".to_vec(),
            "application/pdf",
            |artist, path| artist.biography = Some(path),
        )
        .await;

    assert!(outcome.is_err());
    assert!(!app.media_root.join("biographies/jane-doe-001.pdf").exists());
}

#[tokio::test]
async fn attached_files_are_kept_when_the_save_succeeds() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;

    let saved = app
        .store()
        .attach(
            Tracked::loaded(jane),
            "biographies/jane-doe-001.pdf",
            b"%PDF-1".to_vec(),
            "application/pdf",
            |artist, path| artist.biography = Some(path),
        )
        .await
        .unwrap();

    assert_eq!(saved.biography.as_deref(), Some("biographies/jane-doe-001.pdf"));
    assert!(app.media_root.join("biographies/jane-doe-001.pdf").exists());
}

#[tokio::test]
async fn a_missing_file_does_not_block_a_delete() {
    let app = setup().await;

    let mut jane = new_artist("Jane", "Doe");
    jane.biography = Some("biographies/gone.pdf".to_string());
    let jane = app.store().save(Tracked::new(jane)).await.unwrap().into_inner();

    app.store().delete(jane).await.unwrap();
}

#[tokio::test]
async fn deleting_twice_reports_not_found() {
    let app = setup().await;
    let jane = artist(&app, "Jane", "Doe").await;

    app.store().delete(jane.clone()).await.unwrap();
    assert!(matches!(app.store().delete(jane).await, Err(AppError::NotFound(_))));
}
