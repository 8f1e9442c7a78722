//! Batch service
//!
//! Batch registration plus the winemaking stage operations. Every stage kind
//! goes through the same four operations; the [`StageKind`] picks the slot on
//! the batch.

use std::sync::Arc;

use crate::domain::entities::{Batch, BatchId, NewBatch, StageKind, StageRecord};
use crate::domain::ports::{BatchRepository, ChangeSet, UnitOfWork};
use crate::error::{AppError, DomainError};

pub struct BatchService<BR, UW>
where
    BR: BatchRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    batches: Arc<BR>,
    unit_of_work: Arc<UW>,
}

impl<BR, UW> BatchService<BR, UW>
where
    BR: BatchRepository + ?Sized,
    UW: UnitOfWork + ?Sized,
{
    pub fn new(batches: Arc<BR>, unit_of_work: Arc<UW>) -> Self {
        Self {
            batches,
            unit_of_work,
        }
    }

    async fn load(&self, id: &BatchId) -> Result<Batch, AppError> {
        self.batches
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Batch {} not found", id)).into())
    }

    async fn commit(&self, changes: ChangeSet) -> Result<(), AppError> {
        self.unit_of_work.complete(changes).await?;
        Ok(())
    }

    pub async fn create_batch(&self, command: NewBatch) -> Result<Batch, AppError> {
        let id = self.batches.next_id().await?;
        let batch = Batch::new(id, command);

        let mut changes = ChangeSet::new();
        changes.save(batch.clone());
        self.commit(changes).await?;

        tracing::info!(batch_id = %batch.id, variety = %batch.grape_variety, "Batch registered");
        Ok(batch)
    }

    pub async fn get_batch(&self, id: &BatchId) -> Result<Option<Batch>, AppError> {
        Ok(self.batches.find_by_id(id).await?)
    }

    pub async fn list_batches(&self) -> Result<Vec<Batch>, AppError> {
        Ok(self.batches.list().await?)
    }

    /// Remove a batch together with all of its stage records
    pub async fn delete_batch(&self, id: &BatchId) -> Result<(), AppError> {
        let batch = self.load(id).await?;

        let mut changes = ChangeSet::new();
        changes.remove(batch.id);
        self.commit(changes).await?;

        tracing::info!(batch_id = %id, "Batch deleted");
        Ok(())
    }

    /// Record a stage on a batch that does not have one of that kind yet
    ///
    /// Only the written stage is committed, so concurrent writes to other
    /// stages of the same batch are kept.
    pub async fn add_stage(
        &self,
        batch_id: &BatchId,
        record: StageRecord,
    ) -> Result<StageRecord, AppError> {
        let mut batch = self.load(batch_id).await?;
        let added = batch.add_stage(record)?.clone();

        let mut changes = ChangeSet::new();
        changes.save((batch.id, added.clone()));
        self.commit(changes).await?;

        tracing::info!(batch_id = %batch_id, stage = %added.kind(), "Stage added");
        Ok(added)
    }

    /// `None` when either the batch or the stage is missing
    pub async fn get_stage(
        &self,
        batch_id: &BatchId,
        kind: StageKind,
    ) -> Result<Option<StageRecord>, AppError> {
        let batch = self.batches.find_by_id(batch_id).await?;
        Ok(batch.and_then(|b| b.stage(kind).cloned()))
    }

    pub async fn update_stage(
        &self,
        batch_id: &BatchId,
        record: StageRecord,
    ) -> Result<StageRecord, AppError> {
        let mut batch = self.load(batch_id).await?;
        let updated = batch.update_stage(record)?.clone();

        let mut changes = ChangeSet::new();
        changes.save((batch.id, updated.clone()));
        self.commit(changes).await?;

        tracing::info!(batch_id = %batch_id, stage = %updated.kind(), "Stage updated");
        Ok(updated)
    }

    pub async fn delete_stage(
        &self,
        batch_id: &BatchId,
        kind: StageKind,
    ) -> Result<StageRecord, AppError> {
        let mut batch = self.load(batch_id).await?;
        let removed = batch.remove_stage(kind)?;

        let mut changes = ChangeSet::new();
        changes.remove((batch.id, kind));
        self.commit(changes).await?;

        tracing::info!(batch_id = %batch_id, stage = %kind, "Stage deleted");
        Ok(removed)
    }
}
