//! Derivation logic that runs around every write.
//!
//! Each entity kind declares an ordered [`Pipeline`] of named hooks. The
//! [`Store`](crate::services::store::Store) runs the hooks of a stage inside
//! the save (or delete) transaction, in declaration order. Hooks see the
//! record through its [`Tracked`] wrapper so they can ask what changed.

mod artist;
mod artwork;
mod event;
mod genre;

pub use artwork::mirror_dimensions;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sea_orm::{DatabaseTransaction, ModelTrait, Value};

use crate::error::AppError;
use crate::tracking::{ColumnOf, Tracked};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    PreSave,
    PostSave,
    PreDelete,
}

/// What a hook gets to work with besides the record itself.
pub struct HookContext<'a> {
    pub txn: &'a DatabaseTransaction,
    pub now: NaiveDateTime,
    discarded: Vec<String>,
}

impl<'a> HookContext<'a> {
    pub fn new(txn: &'a DatabaseTransaction) -> Self {
        Self {
            txn,
            now: chrono::Utc::now().naive_utc(),
            discarded: Vec::new(),
        }
    }

    /// Queues a stored file for deletion once the transaction commits.
    pub fn discard(&mut self, path: impl Into<String>) {
        self.discarded.push(path.into());
    }

    pub fn into_discarded(self) -> Vec<String> {
        self.discarded
    }
}

#[async_trait]
pub trait Hook<M>: Send + Sync
where
    M: ModelTrait + Clone + Send + Sync,
{
    fn name(&self) -> &'static str;

    fn stage(&self) -> Stage;

    async fn run(&self, ctx: &mut HookContext<'_>, record: &mut Tracked<M>) -> Result<(), AppError>;
}

pub struct Pipeline<M: ModelTrait + Clone + Send + Sync> {
    hooks: Vec<Box<dyn Hook<M>>>,
}

impl<M> Pipeline<M>
where
    M: ModelTrait + Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self { hooks: Vec::new() }
    }

    pub fn with(mut self, hook: impl Hook<M> + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Hook names registered for `stage`, in run order.
    pub fn names(&self, stage: Stage) -> Vec<&'static str> {
        self.hooks
            .iter()
            .filter(|hook| hook.stage() == stage)
            .map(|hook| hook.name())
            .collect()
    }

    pub async fn run(
        &self,
        stage: Stage,
        ctx: &mut HookContext<'_>,
        record: &mut Tracked<M>,
    ) -> Result<(), AppError> {
        for hook in self.hooks.iter().filter(|hook| hook.stage() == stage) {
            tracing::trace!(hook = hook.name(), ?stage, "Running hook");
            hook.run(ctx, record).await?;
        }
        Ok(())
    }
}

impl<M> Default for Pipeline<M>
where
    M: ModelTrait + Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A model that can be written through the store.
pub trait Lifecycle: ModelTrait + Clone + Send + Sync + 'static {
    fn pipeline() -> Pipeline<Self>;

    /// Stamps modification time before the row is written.
    fn touch(&mut self, _now: NaiveDateTime) {}
}

fn stored_path(value: &Value) -> Option<String> {
    match value {
        Value::String(Some(path)) if !path.is_empty() => Some(path.to_string()),
        _ => None,
    }
}

/// Post-save: when a file column now points somewhere else, the file it
/// used to point at is discarded.
pub struct DiscardReplacedFile<M: ModelTrait> {
    name: &'static str,
    column: ColumnOf<M>,
}

impl<M: ModelTrait> DiscardReplacedFile<M> {
    pub fn new(name: &'static str, column: ColumnOf<M>) -> Self {
        Self { name, column }
    }
}

#[async_trait]
impl<M> Hook<M> for DiscardReplacedFile<M>
where
    M: ModelTrait + Clone + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn stage(&self) -> Stage {
        Stage::PostSave
    }

    async fn run(&self, ctx: &mut HookContext<'_>, record: &mut Tracked<M>) -> Result<(), AppError> {
        if !record.has_changed(self.column) {
            return Ok(());
        }
        if let (Some(previous), _) = record.field_diff(self.column) {
            if let Some(path) = stored_path(&previous) {
                tracing::debug!(path, "Discarding replaced file");
                ctx.discard(path);
            }
        }
        Ok(())
    }
}

/// Pre-delete: the file a record points at goes with it.
pub struct DiscardStoredFile<M: ModelTrait> {
    name: &'static str,
    column: ColumnOf<M>,
}

impl<M: ModelTrait> DiscardStoredFile<M> {
    pub fn new(name: &'static str, column: ColumnOf<M>) -> Self {
        Self { name, column }
    }
}

#[async_trait]
impl<M> Hook<M> for DiscardStoredFile<M>
where
    M: ModelTrait + Clone + Send + Sync,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn stage(&self) -> Stage {
        Stage::PreDelete
    }

    async fn run(&self, ctx: &mut HookContext<'_>, record: &mut Tracked<M>) -> Result<(), AppError> {
        if let Some(path) = stored_path(&record.get(self.column)) {
            ctx.discard(path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{artist, artwork, event, genre};

    #[test]
    fn pipelines_declare_hooks_in_order() {
        let artist = artist::Model::pipeline();
        assert_eq!(artist.names(Stage::PreSave), vec!["slugify_artist"]);
        assert_eq!(
            artist.names(Stage::PostSave),
            vec!["deactivate_artworks_of_inactive_artist", "discard_replaced_biography"]
        );
        assert_eq!(artist.names(Stage::PreDelete), vec!["discard_biography"]);

        let artwork = artwork::Model::pipeline();
        assert_eq!(
            artwork.names(Stage::PreSave),
            vec!["name_slugify_artwork", "mirror_artwork_dimensions"]
        );
        assert_eq!(artwork.names(Stage::PostSave), vec!["ensure_uniquely_representative"]);

        assert_eq!(genre::Model::pipeline().names(Stage::PreSave), vec!["slugify_genre"]);

        let event = event::Model::pipeline();
        assert_eq!(event.names(Stage::PreSave), vec!["slugify_event"]);
        assert_eq!(event.names(Stage::PostSave), vec!["discard_replaced_event_image"]);
        assert_eq!(event.names(Stage::PreDelete), vec!["discard_event_image"]);
    }

    #[test]
    fn only_non_empty_strings_are_paths() {
        assert_eq!(stored_path(&Value::from("events/a.png")), Some("events/a.png".to_string()));
        assert_eq!(stored_path(&Value::from("")), None);
        assert_eq!(stored_path(&Value::String(None)), None);
    }
}
