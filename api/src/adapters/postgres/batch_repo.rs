//! PostgreSQL adapter for BatchRepository
//!
//! Stage records live in `batch_stages`, one JSONB row per kind. Saving a
//! whole batch rewrites its stage rows so the table mirrors the aggregate;
//! stage operations upsert or delete a single `(batch_id, stage)` row.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::{db_err, ensure_deleted, next_val};
use crate::domain::entities::{Batch, BatchId, NewBatch, StageKind, StageRecord};
use crate::domain::ports::BatchRepository;
use crate::entity::{batch_stages, batches};
use crate::error::DomainError;

/// PostgreSQL implementation of BatchRepository
pub struct PostgresBatchRepository {
    db: DatabaseConnection,
}

impl PostgresBatchRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BatchRepository for PostgresBatchRepository {
    async fn next_id(&self) -> Result<BatchId, DomainError> {
        Ok(BatchId(next_val(&self.db, "batches_id_seq").await?))
    }

    async fn find_by_id(&self, id: &BatchId) -> Result<Option<Batch>, DomainError> {
        let rows = batches::Entity::find_by_id(id.0)
            .find_with_related(batch_stages::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .next()
            .map(|(batch, stages)| to_batch(batch, stages))
            .transpose()
    }

    async fn list(&self) -> Result<Vec<Batch>, DomainError> {
        let rows = batches::Entity::find()
            .find_with_related(batch_stages::Entity)
            .order_by_asc(batches::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        rows.into_iter()
            .map(|(batch, stages)| to_batch(batch, stages))
            .collect()
    }
}

pub(super) async fn save<C: ConnectionTrait>(conn: &C, batch: &Batch) -> Result<(), DomainError> {
    let model = batches::ActiveModel {
        id: Set(batch.id.0),
        vineyard_code: Set(batch.vineyard_code.clone()),
        grape_variety: Set(batch.grape_variety.clone()),
        harvest_campaign: Set(batch.harvest_campaign.clone()),
        reception_date: Set(batch.reception_date.clone()),
        initial_grape_quantity_kg: Set(batch.initial_grape_quantity_kg),
        created_by: Set(batch.created_by.clone()),
    };

    batches::Entity::insert(model)
        .on_conflict(
            OnConflict::column(batches::Column::Id)
                .update_columns([
                    batches::Column::VineyardCode,
                    batches::Column::GrapeVariety,
                    batches::Column::HarvestCampaign,
                    batches::Column::ReceptionDate,
                    batches::Column::InitialGrapeQuantityKg,
                    batches::Column::CreatedBy,
                ])
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_err)?;

    delete_stages(conn, &batch.id).await?;

    let stages: Vec<batch_stages::ActiveModel> = batch
        .stages()
        .map(|record| batch_stages::ActiveModel {
            batch_id: Set(batch.id.0),
            stage: Set(record.kind().to_string()),
            payload: Set(record.to_json()),
        })
        .collect();

    // insert_many rejects an empty row set
    if !stages.is_empty() {
        batch_stages::Entity::insert_many(stages)
            .exec_without_returning(conn)
            .await
            .map_err(db_err)?;
    }

    Ok(())
}

pub(super) async fn remove<C: ConnectionTrait>(conn: &C, id: &BatchId) -> Result<(), DomainError> {
    delete_stages(conn, id).await?;

    let result = batches::Entity::delete_by_id(id.0)
        .exec(conn)
        .await
        .map_err(db_err)?;

    ensure_deleted(result.rows_affected, || format!("Batch {} not found", id))
}

/// Upsert one stage row without touching the batch's other stages
pub(super) async fn save_stage<C: ConnectionTrait>(
    conn: &C,
    batch_id: &BatchId,
    record: &StageRecord,
) -> Result<(), DomainError> {
    let exists = batches::Entity::find_by_id(batch_id.0)
        .one(conn)
        .await
        .map_err(db_err)?
        .is_some();
    if !exists {
        return Err(DomainError::NotFound(format!(
            "No batch {} for {} record",
            batch_id,
            record.kind()
        )));
    }

    let model = batch_stages::ActiveModel {
        batch_id: Set(batch_id.0),
        stage: Set(record.kind().to_string()),
        payload: Set(record.to_json()),
    };

    batch_stages::Entity::insert(model)
        .on_conflict(
            OnConflict::columns([batch_stages::Column::BatchId, batch_stages::Column::Stage])
                .update_column(batch_stages::Column::Payload)
                .to_owned(),
        )
        .exec_without_returning(conn)
        .await
        .map_err(db_err)?;
    Ok(())
}

pub(super) async fn remove_stage<C: ConnectionTrait>(
    conn: &C,
    batch_id: &BatchId,
    kind: StageKind,
) -> Result<(), DomainError> {
    let result = batch_stages::Entity::delete_many()
        .filter(batch_stages::Column::BatchId.eq(batch_id.0))
        .filter(batch_stages::Column::Stage.eq(kind.to_string()))
        .exec(conn)
        .await
        .map_err(db_err)?;

    ensure_deleted(result.rows_affected, || {
        format!("{} for batch {} not found", kind.title(), batch_id)
    })
}

async fn delete_stages<C: ConnectionTrait>(conn: &C, id: &BatchId) -> Result<(), DomainError> {
    batch_stages::Entity::delete_many()
        .filter(batch_stages::Column::BatchId.eq(id.0))
        .exec(conn)
        .await
        .map_err(db_err)?;
    Ok(())
}

fn to_batch(
    model: batches::Model,
    stages: Vec<batch_stages::Model>,
) -> Result<Batch, DomainError> {
    let records = stages
        .into_iter()
        .map(|row| {
            let kind: StageKind = row.stage.parse().map_err(DomainError::Database)?;
            StageRecord::from_json(kind, row.payload)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let batch = Batch::new(
        BatchId(model.id),
        NewBatch {
            vineyard_code: model.vineyard_code,
            grape_variety: model.grape_variety,
            harvest_campaign: model.harvest_campaign,
            reception_date: model.reception_date,
            initial_grape_quantity_kg: model.initial_grape_quantity_kg,
            created_by: model.created_by,
        },
    );

    Ok(batch.restore(records))
}
