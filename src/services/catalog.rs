//! Read-side query builders for the public catalog.
//!
//! Each builder collects conjunctive flags and only turns them into SQL when
//! fetched, so the order the flags are chained in does not matter. Nothing
//! here writes.

use std::collections::HashSet;

use chrono::{Duration, NaiveDateTime, Utc};
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Select,
};
use uuid::Uuid;

use crate::entities::genre::CONTEMPORARY;
use crate::entities::{artist, artwork, event, genre};
use crate::error::AppError;

pub const DEFAULT_RECENT_DAYS: i64 = 30;

/// The catalog splits genres into "Contemporary" and everything else.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bucket {
    Contemporary,
    Traditional,
}

impl Bucket {
    fn on(self, name: genre::Column) -> SimpleExpr {
        match self {
            Bucket::Contemporary => name.eq(CONTEMPORARY),
            Bucket::Traditional => name.ne(CONTEMPORARY),
        }
    }
}

/// Start of the "recent" window, taken at the moment of the query.
fn cutoff(days: i64) -> NaiveDateTime {
    Utc::now().naive_utc() - Duration::days(days)
}

#[derive(Clone, Debug, Default)]
pub struct ArtistQuery {
    active: bool,
    recent_days: Option<i64>,
    slug: Option<String>,
    orderly: bool,
    search: Option<Condition>,
}

impl ArtistQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    /// Created within the last `days` days.
    pub fn recent(mut self, days: i64) -> Self {
        self.recent_days = Some(days);
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Last name, then first name.
    pub fn orderly(mut self) -> Self {
        self.orderly = true;
        self
    }

    pub fn matching(mut self, condition: Condition) -> Self {
        self.search = Some(condition);
        self
    }

    fn select(&self) -> Select<artist::Entity> {
        let mut query = artist::Entity::find();
        if self.active {
            query = query.filter(artist::Column::IsActive.eq(true));
        }
        if let Some(days) = self.recent_days {
            query = query.filter(artist::Column::Created.gte(cutoff(days)));
        }
        if let Some(slug) = &self.slug {
            query = query.filter(artist::Column::Slug.eq(slug.as_str()));
        }
        if let Some(condition) = &self.search {
            query = query.filter(condition.clone());
        }
        if self.orderly {
            query = query
                .order_by_asc(artist::Column::LastName)
                .order_by_asc(artist::Column::FirstName);
        }
        query
    }

    pub async fn all<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<artist::Model>, AppError> {
        Ok(self.select().all(db).await?)
    }

    pub async fn one<C: ConnectionTrait>(&self, db: &C) -> Result<Option<artist::Model>, AppError> {
        Ok(self.select().one(db).await?)
    }
}

#[derive(Clone, Debug, Default)]
pub struct GenreQuery {
    active: bool,
    bucket: Option<Bucket>,
    slug: Option<String>,
}

impl GenreQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    fn select(&self) -> Select<genre::Entity> {
        let mut query = genre::Entity::find();
        if self.active {
            query = query.filter(genre::Column::IsActive.eq(true));
        }
        if let Some(bucket) = self.bucket {
            query = query.filter(bucket.on(genre::Column::Name));
        }
        if let Some(slug) = &self.slug {
            query = query.filter(genre::Column::Slug.eq(slug.as_str()));
        }
        query.order_by_asc(genre::Column::Name)
    }

    pub async fn all<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<genre::Model>, AppError> {
        Ok(self.select().all(db).await?)
    }

    pub async fn one<C: ConnectionTrait>(&self, db: &C) -> Result<Option<genre::Model>, AppError> {
        Ok(self.select().one(db).await?)
    }
}

/// An artwork together with the artist who made it.
pub type ArtworkRow = (artwork::Model, artist::Model);

#[derive(Clone, Debug, Default)]
pub struct ArtworkQuery {
    active: bool,
    recent_days: Option<i64>,
    representative: bool,
    bucket: Option<Bucket>,
    genre_name: Option<String>,
    artist_id: Option<Uuid>,
    artist_slug: Option<String>,
    slug: Option<String>,
    excluded_slug: Option<String>,
    artist_active: bool,
    orderly: bool,
    distinctly: bool,
    search: Option<Condition>,
}

impl ArtworkQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn recent(mut self, days: i64) -> Self {
        self.recent_days = Some(days);
        self
    }

    pub fn representative(mut self) -> Self {
        self.representative = true;
        self
    }

    pub fn bucket(mut self, bucket: Bucket) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn contemporary(self) -> Self {
        self.bucket(Bucket::Contemporary)
    }

    pub fn traditional(self) -> Self {
        self.bucket(Bucket::Traditional)
    }

    /// Exact genre name.
    pub fn genre(mut self, name: impl Into<String>) -> Self {
        self.genre_name = Some(name.into());
        self
    }

    pub fn by_artist(mut self, artist_id: Uuid) -> Self {
        self.artist_id = Some(artist_id);
        self
    }

    pub fn by_artist_slug(mut self, slug: impl Into<String>) -> Self {
        self.artist_slug = Some(slug.into());
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    pub fn excluding(mut self, slug: impl Into<String>) -> Self {
        self.excluded_slug = Some(slug.into());
        self
    }

    pub fn artist_active(mut self) -> Self {
        self.artist_active = true;
        self
    }

    /// Artist last name, artist first name, then artwork name.
    pub fn orderly(mut self) -> Self {
        self.orderly = true;
        self
    }

    /// One row per artist (by name), the first in query order.
    pub fn distinctly(mut self) -> Self {
        self.distinctly = true;
        self
    }

    /// Extra condition over artwork, artist and genre columns.
    pub fn matching(mut self, condition: Condition) -> Self {
        self.search = Some(condition);
        self
    }

    fn joins_genre(&self) -> bool {
        self.bucket.is_some() || self.genre_name.is_some() || self.search.is_some()
    }

    fn select(&self) -> Select<artwork::Entity> {
        let mut query = artwork::Entity::find();
        if self.joins_genre() {
            query = query.join(JoinType::InnerJoin, artwork::Relation::Genre.def());
        }
        if self.active {
            query = query.filter(artwork::Column::IsActive.eq(true));
        }
        if let Some(days) = self.recent_days {
            query = query.filter(artwork::Column::Created.gte(cutoff(days)));
        }
        if self.representative {
            query = query.filter(artwork::Column::IsRepresentative.eq(true));
        }
        if let Some(bucket) = self.bucket {
            query = query.filter(bucket.on(genre::Column::Name));
        }
        if let Some(name) = &self.genre_name {
            query = query.filter(genre::Column::Name.eq(name.as_str()));
        }
        if let Some(artist_id) = self.artist_id {
            query = query.filter(artwork::Column::ArtistId.eq(artist_id));
        }
        if let Some(slug) = &self.artist_slug {
            query = query.filter(artist::Column::Slug.eq(slug.as_str()));
        }
        if let Some(slug) = &self.slug {
            query = query.filter(artwork::Column::Slug.eq(slug.as_str()));
        }
        if let Some(slug) = &self.excluded_slug {
            query = query.filter(artwork::Column::Slug.ne(slug.as_str()));
        }
        if self.artist_active {
            query = query.filter(artist::Column::IsActive.eq(true));
        }
        if let Some(condition) = &self.search {
            query = query.filter(condition.clone());
        }
        if self.orderly {
            query = query
                .order_by_asc(artist::Column::LastName)
                .order_by_asc(artist::Column::FirstName)
                .order_by_asc(artwork::Column::Name);
        }
        query
    }

    pub async fn all<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<ArtworkRow>, AppError> {
        let rows = self
            .select()
            .find_also_related(artist::Entity)
            .all(db)
            .await?;

        let rows = rows
            .into_iter()
            .filter_map(|(work, artist)| artist.map(|artist| (work, artist)));

        if !self.distinctly {
            return Ok(rows.collect());
        }

        let mut seen = HashSet::new();
        Ok(rows
            .filter(|(_, artist)| seen.insert((artist.last_name.clone(), artist.first_name.clone())))
            .collect())
    }

    pub async fn one<C: ConnectionTrait>(&self, db: &C) -> Result<Option<ArtworkRow>, AppError> {
        Ok(self.all(db).await?.into_iter().next())
    }

    /// Slugs of the artists behind the matching artworks, in query order.
    pub async fn artist_slugs<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<String>, AppError> {
        let mut seen = HashSet::new();
        Ok(self
            .all(db)
            .await?
            .into_iter()
            .map(|(_, artist)| artist.slug)
            .filter(|slug| seen.insert(slug.clone()))
            .collect())
    }
}

#[derive(Clone, Debug, Default)]
pub struct EventQuery {
    active: bool,
    slug: Option<String>,
}

impl EventQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Newest start date first.
    fn select(&self) -> Select<event::Entity> {
        let mut query = event::Entity::find();
        if self.active {
            query = query.filter(event::Column::IsActive.eq(true));
        }
        if let Some(slug) = &self.slug {
            query = query.filter(event::Column::Slug.eq(slug.as_str()));
        }
        query.order_by_desc(event::Column::StartDate)
    }

    pub async fn all<C: ConnectionTrait>(&self, db: &C) -> Result<Vec<event::Model>, AppError> {
        Ok(self.select().all(db).await?)
    }

    pub async fn one<C: ConnectionTrait>(&self, db: &C) -> Result<Option<event::Model>, AppError> {
        Ok(self.select().one(db).await?)
    }
}
