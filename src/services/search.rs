//! Naive multi-field search: every term has to appear, case-insensitively,
//! in at least one of the searched fields.

use sea_orm::sea_query::{ColumnRef, Expr, Func, IntoColumnRef, LikeExpr};
use sea_orm::{Condition, ConnectionTrait};

use crate::entities::{artist, artwork, genre};
use crate::error::AppError;
use crate::services::catalog::{ArtistQuery, ArtworkQuery, ArtworkRow};

/// Splits a query into terms. `"double quoted"` runs stay together as one
/// phrase; everything else splits on whitespace. Inner whitespace runs are
/// collapsed to one space and empty terms are dropped.
pub fn normalize_query(query: &str) -> Vec<String> {
    let mut terms = Vec::new();
    let mut rest = query;

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }

        let phrase = rest
            .strip_prefix('"')
            .and_then(|tail| tail.find('"').filter(|end| *end > 0).map(|end| (tail, end)));

        let raw = match phrase {
            Some((tail, end)) => {
                rest = &tail[end + 1..];
                &tail[..end]
            }
            None => {
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                let word = &rest[..end];
                rest = &rest[end..];
                word
            }
        };

        let term = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if !term.is_empty() {
            terms.push(term);
        }
    }

    terms
}

const LIKE_ESCAPE: char = '!';

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// AND over terms of (OR over fields of `lower(field) LIKE %term%`).
pub fn search_condition(terms: &[String], fields: &[ColumnRef]) -> Condition {
    terms.iter().fold(Condition::all(), |all, term| {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        let any = fields.iter().fold(Condition::any(), |any, field| {
            any.add(
                Expr::expr(Func::lower(Expr::col(field.clone())))
                    .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE)),
            )
        });
        all.add(any)
    })
}

pub fn artwork_fields() -> Vec<ColumnRef> {
    vec![
        (artwork::Entity, artwork::Column::Title).into_column_ref(),
        (genre::Entity, genre::Column::Name).into_column_ref(),
        (artwork::Entity, artwork::Column::MediumDescription).into_column_ref(),
        (artwork::Entity, artwork::Column::Description).into_column_ref(),
    ]
}

pub fn artist_fields() -> Vec<ColumnRef> {
    vec![
        (artist::Entity, artist::Column::FirstName).into_column_ref(),
        (artist::Entity, artist::Column::LastName).into_column_ref(),
    ]
}

/// Active artworks matching every term, in catalog order.
pub async fn search_artworks<C: ConnectionTrait>(
    db: &C,
    query: &str,
) -> Result<Vec<ArtworkRow>, AppError> {
    let terms = normalize_query(query);
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    ArtworkQuery::new()
        .active()
        .orderly()
        .matching(search_condition(&terms, &artwork_fields()))
        .all(db)
        .await
}

/// Active artists whose first or last name matches every term.
pub async fn search_artists<C: ConnectionTrait>(
    db: &C,
    query: &str,
) -> Result<Vec<artist::Model>, AppError> {
    let terms = normalize_query(query);
    if terms.is_empty() {
        return Ok(Vec::new());
    }

    ArtistQuery::new()
        .active()
        .orderly()
        .matching(search_condition(&terms, &artist_fields()))
        .all(db)
        .await
}
