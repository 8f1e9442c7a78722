//! PostgreSQL unit of work
//!
//! Applies a change set inside a single transaction. Any failure drops the
//! transaction, which rolls it back.

use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use super::{
    batch_repo, client_repo, db_err, inventory_repo, order_repo, order_request_repo,
    profile_repo, user_repo,
};
use crate::domain::ports::{Aggregate, AggregateKey, Change, ChangeSet, UnitOfWork};
use crate::error::DomainError;

pub struct PostgresUnitOfWork {
    db: DatabaseConnection,
}

impl PostgresUnitOfWork {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWork for PostgresUnitOfWork {
    async fn complete(&self, changes: ChangeSet) -> Result<(), DomainError> {
        if changes.is_empty() {
            return Ok(());
        }

        let count = changes.len();
        let txn = self.db.begin().await.map_err(db_err)?;

        for change in changes {
            apply(&txn, change).await?;
        }

        txn.commit().await.map_err(db_err)?;
        tracing::debug!(changes = count, "Committed change set");
        Ok(())
    }
}

async fn apply<C: ConnectionTrait>(conn: &C, change: Change) -> Result<(), DomainError> {
    match change {
        Change::Save(aggregate) => match aggregate {
            Aggregate::User(user) => user_repo::save(conn, &user).await,
            Aggregate::Profile(profile) => profile_repo::save(conn, &profile).await,
            Aggregate::Order(order) => order_repo::save(conn, &order).await,
            Aggregate::OrderRequest(request) => order_request_repo::save(conn, &request).await,
            Aggregate::Inventory(item) => inventory_repo::save(conn, &item).await,
            Aggregate::Client(client) => client_repo::save(conn, &client).await,
            Aggregate::Batch(batch) => batch_repo::save(conn, &batch).await,
            Aggregate::Stage(batch_id, record) => {
                batch_repo::save_stage(conn, &batch_id, &record).await
            }
        },
        Change::Remove(key) => match key {
            AggregateKey::User(id) => user_repo::remove(conn, &id).await,
            AggregateKey::Profile(id) => profile_repo::remove(conn, &id).await,
            AggregateKey::Order(id) => order_repo::remove(conn, &id).await,
            AggregateKey::OrderRequest(id) => order_request_repo::remove(conn, &id).await,
            AggregateKey::Inventory(id) => inventory_repo::remove(conn, &id).await,
            AggregateKey::Client(id) => client_repo::remove(conn, &id).await,
            AggregateKey::Batch(id) => batch_repo::remove(conn, &id).await,
            AggregateKey::Stage(batch_id, kind) => {
                batch_repo::remove_stage(conn, &batch_id, kind).await
            }
        },
    }
}
