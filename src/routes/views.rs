//! JSON view models for the public pages.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::entities::artwork::{Status, StyleClass, Unit};
use crate::entities::{artist, artwork, event, genre};
use crate::services::storage::FileStore;

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArtistSummary {
    pub slug: String,
    pub first_name: String,
    pub last_name: String,
    pub url: String,
}

impl From<&artist::Model> for ArtistSummary {
    fn from(artist: &artist::Model) -> Self {
        ArtistSummary {
            slug: artist.slug.clone(),
            first_name: artist.first_name.clone(),
            last_name: artist.last_name.clone(),
            url: format!("/artist/{}", artist.slug),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArtistView {
    pub slug: String,
    pub first_name: String,
    pub last_name: String,
    pub description: String,
    pub biography_url: Option<String>,
    pub updated: NaiveDateTime,
}

impl ArtistView {
    pub fn new(artist: artist::Model, files: &dyn FileStore) -> Self {
        ArtistView {
            biography_url: artist.biography.as_deref().map(|path| files.url(path)),
            slug: artist.slug,
            first_name: artist.first_name,
            last_name: artist.last_name,
            description: artist.description,
            updated: artist.updated,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct Dimensions {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub units: Unit,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ArtworkView {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub artist: ArtistSummary,
    pub year: String,
    pub style_class: StyleClass,
    pub medium_description: String,
    pub description: String,
    pub is_representative: bool,
    pub metric: Dimensions,
    pub imperial: Dimensions,
    /// Only present when the price is displayed.
    pub price: Option<i32>,
    pub pricing_message: Option<String>,
    pub status: Status,
}

impl From<(artwork::Model, artist::Model)> for ArtworkView {
    fn from((artwork, artist): (artwork::Model, artist::Model)) -> Self {
        let (price, pricing_message) = if artwork.is_price_displayed {
            (Some(artwork.price), None)
        } else {
            (None, Some(artwork.alternative_pricing_message))
        };

        ArtworkView {
            url: format!("/artwork/{}/{}", artist.slug, artwork.slug),
            artist: ArtistSummary::from(&artist),
            slug: artwork.slug,
            title: artwork.title,
            year: artwork.year,
            style_class: artwork.style_class,
            medium_description: artwork.medium_description,
            description: artwork.description,
            is_representative: artwork.is_representative,
            metric: Dimensions {
                height: artwork.height_metric,
                width: artwork.width_metric,
                units: artwork.metric_units,
            },
            imperial: Dimensions {
                height: artwork.height_imperial,
                width: artwork.width_imperial,
                units: artwork.imperial_units,
            },
            price,
            pricing_message,
            status: artwork.status,
        }
    }
}

pub fn artwork_views(rows: Vec<(artwork::Model, artist::Model)>) -> Vec<ArtworkView> {
    rows.into_iter().map(ArtworkView::from).collect()
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct GenreLink {
    pub name: String,
    pub slug: String,
    pub url: String,
}

impl From<&genre::Model> for GenreLink {
    fn from(genre: &genre::Model) -> Self {
        GenreLink {
            name: genre.name.clone(),
            slug: genre.slug.clone(),
            url: format!("/learn/{}", genre.slug),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct GenreView {
    pub name: String,
    pub slug: String,
    pub location: String,
    pub description: String,
}

impl From<genre::Model> for GenreView {
    fn from(genre: genre::Model) -> Self {
        GenreView {
            name: genre.name,
            slug: genre.slug,
            location: genre.location,
            description: genre.description,
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct EventView {
    pub slug: String,
    pub title: String,
    pub url: String,
    pub kind: String,
    pub image_url: Option<String>,
    pub total_seats: Option<i32>,
    pub is_admission: bool,
    pub admission_price: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub time: String,
    pub location: String,
    pub details: String,
    pub artists: Vec<ArtistSummary>,
}

impl EventView {
    pub fn new(event: event::Model, artists: &[artist::Model], files: &dyn FileStore) -> Self {
        EventView {
            url: format!("/event/{}", event.slug),
            image_url: event.image.as_deref().map(|path| files.url(path)),
            slug: event.slug,
            title: event.title,
            kind: event.kind,
            total_seats: event.total_seats,
            is_admission: event.is_admission,
            admission_price: event.admission_price,
            start_date: event.start_date,
            end_date: event.end_date,
            time: event.time,
            location: event.location,
            details: event.details,
            artists: artists.iter().map(ArtistSummary::from).collect(),
        }
    }
}
