use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::{DiscardReplacedFile, DiscardStoredFile, Hook, HookContext, Lifecycle, Pipeline, Stage};
use crate::entities::{artist, artist_ratchet, artwork};
use crate::error::AppError;
use crate::services::ratchet;
use crate::tracking::Tracked;
use crate::utils::slug::{ratcheted_slug, slugify};

impl Lifecycle for artist::Model {
    fn pipeline() -> Pipeline<Self> {
        Pipeline::new()
            .with(SlugifyArtist)
            .with(DeactivateArtworksOfInactiveArtist)
            .with(DiscardReplacedFile::new(
                "discard_replaced_biography",
                artist::Column::Biography,
            ))
            .with(DiscardStoredFile::new("discard_biography", artist::Column::Biography))
    }

    fn touch(&mut self, now: NaiveDateTime) {
        self.updated = now;
    }
}

/// Re-derives the slug from "first last" whenever either name changes.
struct SlugifyArtist;

#[async_trait]
impl Hook<artist::Model> for SlugifyArtist {
    fn name(&self) -> &'static str {
        "slugify_artist"
    }

    fn stage(&self) -> Stage {
        Stage::PreSave
    }

    async fn run(
        &self,
        ctx: &mut HookContext<'_>,
        record: &mut Tracked<artist::Model>,
    ) -> Result<(), AppError> {
        let renamed = record.has_changed(artist::Column::FirstName)
            || record.has_changed(artist::Column::LastName);
        if !renamed && !record.slug.is_empty() {
            return Ok(());
        }

        let key = slugify(&record.full_name());
        let suffix = ratchet::reserve::<artist_ratchet::Entity, _>(ctx.txn, &key).await?;
        record.slug = ratcheted_slug(&key, suffix);
        tracing::debug!(slug = %record.slug, "Artist slug derived");
        Ok(())
    }
}

struct DeactivateArtworksOfInactiveArtist;

#[async_trait]
impl Hook<artist::Model> for DeactivateArtworksOfInactiveArtist {
    fn name(&self) -> &'static str {
        "deactivate_artworks_of_inactive_artist"
    }

    fn stage(&self) -> Stage {
        Stage::PostSave
    }

    async fn run(
        &self,
        ctx: &mut HookContext<'_>,
        record: &mut Tracked<artist::Model>,
    ) -> Result<(), AppError> {
        if record.is_active || !record.has_changed(artist::Column::IsActive) {
            return Ok(());
        }

        let result = artwork::Entity::update_many()
            .col_expr(artwork::Column::IsActive, Expr::value(false))
            .filter(artwork::Column::ArtistId.eq(record.id))
            .filter(artwork::Column::IsActive.eq(true))
            .exec(ctx.txn)
            .await?;

        tracing::info!(
            artist = %record.slug,
            artworks = result.rows_affected,
            "Deactivated artworks of inactive artist"
        );
        Ok(())
    }
}
