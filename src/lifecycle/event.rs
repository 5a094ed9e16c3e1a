use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::{DiscardReplacedFile, DiscardStoredFile, Hook, HookContext, Lifecycle, Pipeline, Stage};
use crate::entities::{event, event_ratchet};
use crate::error::AppError;
use crate::services::ratchet;
use crate::tracking::Tracked;
use crate::utils::slug::{ratcheted_slug, slugify};

impl Lifecycle for event::Model {
    fn pipeline() -> Pipeline<Self> {
        Pipeline::new()
            .with(SlugifyEvent)
            .with(DiscardReplacedFile::new(
                "discard_replaced_event_image",
                event::Column::Image,
            ))
            .with(DiscardStoredFile::new("discard_event_image", event::Column::Image))
    }

    fn touch(&mut self, now: NaiveDateTime) {
        self.updated = now;
    }
}

struct SlugifyEvent;

#[async_trait]
impl Hook<event::Model> for SlugifyEvent {
    fn name(&self) -> &'static str {
        "slugify_event"
    }

    fn stage(&self) -> Stage {
        Stage::PreSave
    }

    async fn run(
        &self,
        ctx: &mut HookContext<'_>,
        record: &mut Tracked<event::Model>,
    ) -> Result<(), AppError> {
        if !record.has_changed(event::Column::Title) && !record.slug.is_empty() {
            return Ok(());
        }

        let key = slugify(&record.title);
        let suffix = ratchet::reserve::<event_ratchet::Entity, _>(ctx.txn, &key).await?;
        record.slug = ratcheted_slug(&key, suffix);
        tracing::debug!(slug = %record.slug, "Event slug derived");
        Ok(())
    }
}
