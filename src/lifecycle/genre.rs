use async_trait::async_trait;

use super::{Hook, HookContext, Lifecycle, Pipeline, Stage};
use crate::entities::genre;
use crate::error::AppError;
use crate::tracking::Tracked;
use crate::utils::slug::slugify;

impl Lifecycle for genre::Model {
    fn pipeline() -> Pipeline<Self> {
        Pipeline::new().with(SlugifyGenre)
    }
}

/// Genre names are unique, so the slug needs no suffix.
struct SlugifyGenre;

#[async_trait]
impl Hook<genre::Model> for SlugifyGenre {
    fn name(&self) -> &'static str {
        "slugify_genre"
    }

    fn stage(&self) -> Stage {
        Stage::PreSave
    }

    async fn run(
        &self,
        _ctx: &mut HookContext<'_>,
        record: &mut Tracked<genre::Model>,
    ) -> Result<(), AppError> {
        if record.has_changed(genre::Column::Name) || record.slug.is_empty() {
            record.slug = slugify(&record.name);
        }
        Ok(())
    }
}
