//! Per-instance change tracking.
//!
//! `Tracked<M>` keeps the values a model had when it was loaded next to the
//! live, editable model. Lifecycle hooks ask it which columns changed, and
//! the store uses it to write only those columns on update.

use std::ops::{Deref, DerefMut};

use sea_orm::{EntityTrait, Iterable, ModelTrait, Value};

pub type ColumnOf<M> = <<M as ModelTrait>::Entity as EntityTrait>::Column;

#[derive(Clone, Debug)]
pub struct Tracked<M: ModelTrait> {
    snapshot: Option<M>,
    current: M,
}

impl<M> Tracked<M>
where
    M: ModelTrait + Clone,
{
    /// A record that has not been stored yet. Every column counts as changed.
    pub fn new(model: M) -> Self {
        Self {
            snapshot: None,
            current: model,
        }
    }

    /// A record as it was read from storage.
    pub fn loaded(model: M) -> Self {
        Self {
            snapshot: Some(model.clone()),
            current: model,
        }
    }

    pub fn is_new(&self) -> bool {
        self.snapshot.is_none()
    }

    pub fn snapshot(&self) -> Option<&M> {
        self.snapshot.as_ref()
    }

    pub fn has_changed(&self, column: ColumnOf<M>) -> bool {
        match &self.snapshot {
            Some(original) => original.get(column) != self.current.get(column),
            None => true,
        }
    }

    pub fn changed_fields(&self) -> Vec<ColumnOf<M>> {
        <ColumnOf<M> as Iterable>::iter()
            .filter(|column| self.has_changed(*column))
            .collect()
    }

    /// Column names of `changed_fields`, mostly for logging.
    pub fn changed_field_names(&self) -> Vec<String> {
        use sea_orm::IdenStatic;
        self.changed_fields()
            .into_iter()
            .map(|column| column.as_str().to_owned())
            .collect()
    }

    /// `(previous, current)` for one column; `previous` is `None` for a new record.
    pub fn field_diff(&self, column: ColumnOf<M>) -> (Option<Value>, Value) {
        (
            self.snapshot.as_ref().map(|original| original.get(column)),
            self.current.get(column),
        )
    }

    /// Marks the current values as the stored state.
    pub fn accept(mut self) -> Self {
        self.snapshot = Some(self.current.clone());
        self
    }

    /// Swaps in the row returned by the database while keeping the snapshot,
    /// so post-save hooks still see what changed.
    pub(crate) fn replace_current(&mut self, model: M) {
        self.current = model;
    }

    pub fn into_inner(self) -> M {
        self.current
    }
}

impl<M: ModelTrait> Deref for Tracked<M> {
    type Target = M;

    fn deref(&self) -> &M {
        &self.current
    }
}

impl<M: ModelTrait> DerefMut for Tracked<M> {
    fn deref_mut(&mut self) -> &mut M {
        &mut self.current
    }
}
