use rand::seq::SliceRandom;
use sea_orm::ConnectionTrait;

use crate::error::AppError;
use crate::services::catalog::{ArtworkQuery, ArtworkRow, Bucket};

/// Which artists `/artists/{category}` and `/artworks/{category}` show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    New,
    All,
    Contemporary,
    Traditional,
}

impl Category {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "new" => Some(Category::New),
            "all" => Some(Category::All),
            "contemporary" => Some(Category::Contemporary),
            "traditional" => Some(Category::Traditional),
            _ => None,
        }
    }
}

/// `[a1, b1, a2, b2, ...]`, then whatever is left of the longer list.
pub fn interleave<T>(first: Vec<T>, second: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    let mut first = first.into_iter();
    let mut second = second.into_iter();

    loop {
        match (first.next(), second.next()) {
            (Some(a), Some(b)) => {
                merged.push(a);
                merged.push(b);
            }
            (Some(a), None) => {
                merged.push(a);
                merged.extend(first);
                break;
            }
            (None, Some(b)) => {
                merged.push(b);
                merged.extend(second);
                break;
            }
            (None, None) => break,
        }
    }

    merged
}

pub fn shuffled<T>(mut items: Vec<T>) -> Vec<T> {
    items.shuffle(&mut rand::thread_rng());
    items
}

/// Representative artworks of active artists, one per artist, in catalog
/// order.
pub async fn representative_artworks<C: ConnectionTrait>(
    db: &C,
    category: Category,
    recent_days: i64,
) -> Result<Vec<ArtworkRow>, AppError> {
    let query = ArtworkQuery::new()
        .representative()
        .active()
        .artist_active()
        .orderly();

    let query = match category {
        Category::New => query.recent(recent_days),
        Category::All => query,
        Category::Contemporary => query.bucket(Bucket::Contemporary),
        Category::Traditional => query.bucket(Bucket::Traditional),
    };

    query.all(db).await
}

/// Every active artwork, grouped by artist. Artists are shuffled within their
/// bucket so each gets the top spot in turn; for `new` and `all` the
/// contemporary and traditional artists alternate.
pub async fn artworks_by_artist<C: ConnectionTrait>(
    db: &C,
    category: Category,
    recent_days: i64,
) -> Result<Vec<ArtworkRow>, AppError> {
    let artists_in = |bucket: Bucket| {
        let query = ArtworkQuery::new().bucket(bucket).active().orderly().distinctly();
        if category == Category::New {
            query.recent(recent_days)
        } else {
            query
        }
    };

    let slugs = match category {
        Category::Contemporary => shuffled(artists_in(Bucket::Contemporary).artist_slugs(db).await?),
        Category::Traditional => shuffled(artists_in(Bucket::Traditional).artist_slugs(db).await?),
        Category::New | Category::All => {
            let contemporary = shuffled(artists_in(Bucket::Contemporary).artist_slugs(db).await?);
            let traditional = shuffled(artists_in(Bucket::Traditional).artist_slugs(db).await?);
            interleave(contemporary, traditional)
        }
    };

    let mut artworks = Vec::new();
    for slug in slugs {
        let query = ArtworkQuery::new().by_artist_slug(slug).active().orderly();
        artworks.extend(query.all(db).await?);
    }
    Ok(artworks)
}
