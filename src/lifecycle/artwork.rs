use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use super::{Hook, HookContext, Lifecycle, Pipeline, Stage};
use crate::entities::artwork::{self, Unit};
use crate::entities::artwork_ratchet;
use crate::error::AppError;
use crate::services::ratchet;
use crate::tracking::Tracked;
use crate::utils::slug::{ratcheted_slug, slugify, with_suffix};

const CM_PER_INCH: f64 = 2.54;
const INCHES_PER_CM: f64 = 0.394;

impl Lifecycle for artwork::Model {
    fn pipeline() -> Pipeline<Self> {
        Pipeline::new()
            .with(NameSlugifyArtwork)
            .with(MirrorArtworkDimensions)
            .with(EnsureUniquelyRepresentative)
    }

    fn touch(&mut self, now: NaiveDateTime) {
        self.updated = now;
    }
}

/// Mints `name` ("Title-NNN") and the slug from one suffix of the slugified title.
struct NameSlugifyArtwork;

#[async_trait]
impl Hook<artwork::Model> for NameSlugifyArtwork {
    fn name(&self) -> &'static str {
        "name_slugify_artwork"
    }

    fn stage(&self) -> Stage {
        Stage::PreSave
    }

    async fn run(
        &self,
        ctx: &mut HookContext<'_>,
        record: &mut Tracked<artwork::Model>,
    ) -> Result<(), AppError> {
        let retitled = record.has_changed(artwork::Column::Title);
        if !retitled && !record.name.is_empty() && !record.slug.is_empty() {
            return Ok(());
        }

        let key = slugify(&record.title);
        let suffix = ratchet::reserve::<artwork_ratchet::Entity, _>(ctx.txn, &key).await?;
        record.name = with_suffix(&record.title, suffix);
        record.slug = ratcheted_slug(&key, suffix);
        tracing::debug!(slug = %record.slug, "Artwork slug derived");
        Ok(())
    }
}

struct MirrorArtworkDimensions;

#[async_trait]
impl Hook<artwork::Model> for MirrorArtworkDimensions {
    fn name(&self) -> &'static str {
        "mirror_artwork_dimensions"
    }

    fn stage(&self) -> Stage {
        Stage::PreSave
    }

    async fn run(
        &self,
        _ctx: &mut HookContext<'_>,
        record: &mut Tracked<artwork::Model>,
    ) -> Result<(), AppError> {
        let resized = record.is_new()
            || record.has_changed(artwork::Column::ImageHeight)
            || record.has_changed(artwork::Column::ImageWidth)
            || record.has_changed(artwork::Column::MeasurementUnits);
        if resized {
            mirror_dimensions(record);
        }
        Ok(())
    }
}

/// Fills both the metric and imperial dimension columns from the entered
/// dimensions. The entered system is copied through; the other is converted
/// and rounded to two decimals, ties to even.
pub fn mirror_dimensions(artwork: &mut artwork::Model) {
    let height = artwork.image_height;
    let width = artwork.image_width;

    match artwork.measurement_units {
        Unit::Inches => {
            artwork.height_imperial = height;
            artwork.width_imperial = width;
            artwork.height_metric = height.map(|v| to_two_places(v * CM_PER_INCH));
            artwork.width_metric = width.map(|v| to_two_places(v * CM_PER_INCH));
        }
        Unit::Centimetres => {
            artwork.height_metric = height;
            artwork.width_metric = width;
            artwork.height_imperial = height.map(|v| to_two_places(v * INCHES_PER_CM));
            artwork.width_imperial = width.map(|v| to_two_places(v * INCHES_PER_CM));
        }
    }

    artwork.metric_units = Unit::Centimetres;
    artwork.imperial_units = Unit::Inches;
}

fn to_two_places(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// At most one representative artwork per artist: flagging this one clears
/// the flag on the others.
struct EnsureUniquelyRepresentative;

#[async_trait]
impl Hook<artwork::Model> for EnsureUniquelyRepresentative {
    fn name(&self) -> &'static str {
        "ensure_uniquely_representative"
    }

    fn stage(&self) -> Stage {
        Stage::PostSave
    }

    async fn run(
        &self,
        ctx: &mut HookContext<'_>,
        record: &mut Tracked<artwork::Model>,
    ) -> Result<(), AppError> {
        if !record.is_representative {
            return Ok(());
        }

        let result = artwork::Entity::update_many()
            .col_expr(artwork::Column::IsRepresentative, Expr::value(false))
            .filter(artwork::Column::ArtistId.eq(record.artist_id))
            .filter(artwork::Column::Id.ne(record.id))
            .filter(artwork::Column::IsRepresentative.eq(true))
            .exec(ctx.txn)
            .await?;

        if result.rows_affected > 0 {
            tracing::debug!(
                artwork = %record.slug,
                cleared = result.rows_affected,
                "Moved representative flag"
            );
        }
        Ok(())
    }
}
