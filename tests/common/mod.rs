#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, Utc};
use gallery_kit::entities::artwork::{Status, StyleClass, Unit};
use gallery_kit::entities::{artist, artwork, event, genre};
use gallery_kit::services::storage::LocalFileStore;
use gallery_kit::services::store::Store;
use gallery_kit::state::AppState;
use gallery_kit::tracking::Tracked;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tempfile::TempDir;
use uuid::Uuid;

pub const JWT_SECRET: &str = "test-secret";

pub struct TestApp {
    pub state: AppState,
    pub media_root: PathBuf,
    _media: TempDir,
}

impl TestApp {
    pub fn store(&self) -> &Store {
        &self.state.store
    }
}

pub async fn setup() -> TestApp {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let media = TempDir::new().unwrap();
    let media_root = media.path().to_path_buf();
    let files = Arc::new(LocalFileStore::new(media_root.clone(), "/media"));

    TestApp {
        state: AppState::new(db, files, JWT_SECRET),
        media_root,
        _media: media,
    }
}

pub async fn genre(app: &TestApp, name: &str) -> genre::Model {
    let genre = genre::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: String::new(),
        is_active: true,
        location: "Bihar".to_string(),
        description: String::new(),
    };
    app.store().save(Tracked::new(genre)).await.unwrap().into_inner()
}

pub fn new_artist(first_name: &str, last_name: &str) -> artist::Model {
    let now = Utc::now().naive_utc();
    artist::Model {
        id: Uuid::new_v4(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        slug: String::new(),
        is_active: true,
        description: String::new(),
        biography: None,
        created: now,
        updated: now,
    }
}

pub async fn artist(app: &TestApp, first_name: &str, last_name: &str) -> artist::Model {
    app.store()
        .save(Tracked::new(new_artist(first_name, last_name)))
        .await
        .unwrap()
        .into_inner()
}

/// An artist created `days` ago.
pub async fn older_artist(app: &TestApp, first_name: &str, last_name: &str, days: i64) -> artist::Model {
    let mut artist = new_artist(first_name, last_name);
    artist.created = Utc::now().naive_utc() - Duration::days(days);
    app.store().save(Tracked::new(artist)).await.unwrap().into_inner()
}

pub fn new_artwork(artist: &artist::Model, genre: &genre::Model, title: &str) -> artwork::Model {
    let now = Utc::now().naive_utc();
    let unique = Uuid::new_v4().simple().to_string();
    artwork::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        name: String::new(),
        slug: String::new(),
        is_active: true,
        inventory_name: format!("INV-{}", &unique[..12]),
        internal_name: format!("INT-{}", &unique[..12]),
        artist_id: artist.id,
        year: "2021".to_string(),
        is_representative: false,
        genre_id: genre.id,
        style_class: StyleClass::Abstract,
        medium_description: "Oil on canvas".to_string(),
        description: String::new(),
        image_height: None,
        image_width: None,
        measurement_units: Unit::Inches,
        height_metric: None,
        width_metric: None,
        metric_units: Unit::Centimetres,
        height_imperial: None,
        width_imperial: None,
        imperial_units: Unit::Inches,
        price: 1200,
        is_price_displayed: true,
        alternative_pricing_message: "Please inquire".to_string(),
        status: Status::Available,
        created: now,
        updated: now,
    }
}

pub async fn artwork(
    app: &TestApp,
    artist: &artist::Model,
    genre: &genre::Model,
    title: &str,
) -> artwork::Model {
    app.store()
        .save(Tracked::new(new_artwork(artist, genre, title)))
        .await
        .unwrap()
        .into_inner()
}

pub async fn representative(
    app: &TestApp,
    artist: &artist::Model,
    genre: &genre::Model,
    title: &str,
) -> artwork::Model {
    let mut artwork = new_artwork(artist, genre, title);
    artwork.is_representative = true;
    app.store().save(Tracked::new(artwork)).await.unwrap().into_inner()
}

pub fn new_event(title: &str) -> event::Model {
    let now = Utc::now().naive_utc();
    let today = now.date();
    event::Model {
        id: Uuid::new_v4(),
        title: title.to_string(),
        is_active: true,
        slug: String::new(),
        kind: "Exhibition".to_string(),
        image: None,
        total_seats: Some(40),
        is_admission: false,
        admission_price: None,
        start_date: today,
        end_date: today + Duration::days(7),
        time: "6:00 pm - 9:00 pm".to_string(),
        location: "Main hall".to_string(),
        details: String::new(),
        created: now,
        updated: now,
    }
}
