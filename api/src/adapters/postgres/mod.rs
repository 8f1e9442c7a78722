//! PostgreSQL adapters
//!
//! Implementations of repository traits and the unit of work using SeaORM
//! and PostgreSQL. Repositories only read; every write goes through
//! [`PostgresUnitOfWork`].

pub mod batch_repo;
pub mod client_repo;
pub mod inventory_repo;
pub mod order_repo;
pub mod order_request_repo;
pub mod profile_repo;
pub mod unit_of_work;
pub mod user_repo;

#[cfg(test)]
mod integration_tests;

use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr, Statement};

use crate::error::DomainError;

pub use batch_repo::PostgresBatchRepository;
pub use client_repo::PostgresClientRepository;
pub use inventory_repo::PostgresInventoryRepository;
pub use order_repo::PostgresOrderRepository;
pub use order_request_repo::PostgresOrderRequestRepository;
pub use profile_repo::PostgresProfileRepository;
pub use unit_of_work::PostgresUnitOfWork;
pub use user_repo::PostgresUserRepository;

const SCHEMA: &str = include_str!("../../../migrations/001_init.sql");

/// Create any missing tables and sequences
pub async fn run_migrations(db: &DatabaseConnection) -> Result<(), DomainError> {
    db.execute_unprepared(SCHEMA).await.map_err(db_err)?;
    tracing::info!("Database schema is up to date");
    Ok(())
}

pub(crate) fn db_err(e: DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Draw the next value of an id sequence
pub(crate) async fn next_val(db: &DatabaseConnection, sequence: &str) -> Result<i32, DomainError> {
    let row = db
        .query_one(Statement::from_string(
            DbBackend::Postgres,
            format!("SELECT nextval('{}')::int4 AS id", sequence),
        ))
        .await
        .map_err(db_err)?
        .ok_or_else(|| DomainError::Database(format!("Sequence {} returned no row", sequence)))?;

    row.try_get::<i32>("", "id").map_err(db_err)
}

pub(crate) fn ensure_deleted(
    rows_affected: u64,
    message: impl FnOnce() -> String,
) -> Result<(), DomainError> {
    if rows_affected == 0 {
        Err(DomainError::NotFound(message()))
    } else {
        Ok(())
    }
}
