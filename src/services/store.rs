use std::sync::Arc;

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityName, EntityTrait, IntoActiveModel, ModelTrait,
    TransactionTrait,
};

use crate::error::AppError;
use crate::lifecycle::{HookContext, Lifecycle, Stage};
use crate::services::storage::{delete_quietly, FileStore};
use crate::tracking::Tracked;

/// Whole-transaction attempts before ratchet contention is reported.
const MAX_SAVE_ATTEMPTS: u32 = 3;

type ActiveModelOf<M> = <<M as ModelTrait>::Entity as EntityTrait>::ActiveModel;

/// Every catalog write goes through here so the lifecycle hooks always run.
#[derive(Clone)]
pub struct Store {
    db: DatabaseConnection,
    files: Arc<dyn FileStore>,
}

impl Store {
    pub fn new(db: DatabaseConnection, files: Arc<dyn FileStore>) -> Self {
        Self { db, files }
    }

    /// Inserts a new record or writes the changed columns of a loaded one,
    /// running the kind's hooks around the write. Returns the record as
    /// stored, with a fresh snapshot.
    pub async fn save<M>(&self, record: Tracked<M>) -> Result<Tracked<M>, AppError>
    where
        M: Lifecycle + IntoActiveModel<ActiveModelOf<M>>,
        M::Entity: EntityTrait<Model = M>,
        ActiveModelOf<M>: Send,
    {
        let mut attempt = 1;
        loop {
            match self.try_save(record.clone()).await {
                Err(AppError::RatchetContention(key)) if attempt < MAX_SAVE_ATTEMPTS => {
                    tracing::warn!(%key, attempt, "Ratchet contention, retrying save");
                    attempt += 1;
                }
                outcome => return outcome,
            }
        }
    }

    /// Stores `data` at `path`, lets `point` record the path on the model and
    /// saves it. The stored file is removed again when the save fails.
    pub async fn attach<M, F>(
        &self,
        mut record: Tracked<M>,
        path: &str,
        data: Vec<u8>,
        content_type: &str,
        point: F,
    ) -> Result<Tracked<M>, AppError>
    where
        M: Lifecycle + IntoActiveModel<ActiveModelOf<M>>,
        M::Entity: EntityTrait<Model = M>,
        ActiveModelOf<M>: Send,
        F: FnOnce(&mut M, String) + Send,
    {
        self.files.put(path, data, content_type).await?;
        point(&mut *record, path.to_string());

        match self.save(record).await {
            Ok(saved) => Ok(saved),
            Err(e) => {
                tracing::warn!(path, error = %e, "Save failed, removing attached file");
                delete_quietly(self.files.as_ref(), path).await;
                Err(e)
            }
        }
    }

    async fn try_save<M>(&self, mut record: Tracked<M>) -> Result<Tracked<M>, AppError>
    where
        M: Lifecycle + IntoActiveModel<ActiveModelOf<M>>,
        M::Entity: EntityTrait<Model = M>,
        ActiveModelOf<M>: Send,
    {
        let pipeline = M::pipeline();
        let txn = self.db.begin().await?;
        let mut ctx = HookContext::new(&txn);

        pipeline.run(Stage::PreSave, &mut ctx, &mut record).await?;
        record.touch(ctx.now);

        let persisted = match record.snapshot() {
            None => {
                record
                    .clone()
                    .into_inner()
                    .into_active_model()
                    .reset_all()
                    .insert(&txn)
                    .await?
            }
            Some(snapshot) => {
                let mut active = snapshot.clone().into_active_model();
                for column in record.changed_fields() {
                    active.set(column, record.get(column));
                }
                if active.is_changed() {
                    active.update(&txn).await?
                } else {
                    record.clone().into_inner()
                }
            }
        };
        record.replace_current(persisted);

        pipeline.run(Stage::PostSave, &mut ctx, &mut record).await?;

        let discarded = ctx.into_discarded();
        txn.commit().await?;
        self.discard_files(discarded).await;

        tracing::debug!(
            table = M::Entity::default().table_name(),
            "Saved record"
        );
        Ok(record.accept())
    }

    /// Removes a record after its pre-delete hooks ran.
    pub async fn delete<M>(&self, model: M) -> Result<(), AppError>
    where
        M: Lifecycle + IntoActiveModel<ActiveModelOf<M>>,
        M::Entity: EntityTrait<Model = M>,
        ActiveModelOf<M>: Send,
    {
        let pipeline = M::pipeline();
        let mut record = Tracked::loaded(model);
        let txn = self.db.begin().await?;
        let mut ctx = HookContext::new(&txn);

        pipeline.run(Stage::PreDelete, &mut ctx, &mut record).await?;

        let result = record.into_inner().into_active_model().delete(&txn).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound("Record not found".to_string()));
        }

        let discarded = ctx.into_discarded();
        txn.commit().await?;
        self.discard_files(discarded).await;
        Ok(())
    }

    async fn discard_files(&self, paths: Vec<String>) {
        for path in paths {
            delete_quietly(self.files.as_ref(), &path).await;
        }
    }
}
