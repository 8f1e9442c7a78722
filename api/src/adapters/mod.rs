//! Adapters layer
//!
//! Implementations of port traits for external systems.

pub mod memory;
pub mod postgres;
pub mod security;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::ports::{
    BatchRepository, ClientRepository, InventoryRepository, OrderRepository,
    OrderRequestRepository, ProfileRepository, UnitOfWork, UserRepository,
};

pub use memory::InMemoryStore;
pub use postgres::{
    PostgresBatchRepository, PostgresClientRepository, PostgresInventoryRepository,
    PostgresOrderRepository, PostgresOrderRequestRepository, PostgresProfileRepository,
    PostgresUnitOfWork, PostgresUserRepository,
};
pub use security::{HmacPasswordHasher, HmacTokenService};

/// Storage ports wired to one backend
#[derive(Clone)]
pub struct StoragePorts {
    pub users: Arc<dyn UserRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub order_requests: Arc<dyn OrderRequestRepository>,
    pub inventories: Arc<dyn InventoryRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub batches: Arc<dyn BatchRepository>,
    pub unit_of_work: Arc<dyn UnitOfWork>,
}

impl StoragePorts {
    pub fn postgres(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(db.clone())),
            orders: Arc::new(PostgresOrderRepository::new(db.clone())),
            order_requests: Arc::new(PostgresOrderRequestRepository::new(db.clone())),
            inventories: Arc::new(PostgresInventoryRepository::new(db.clone())),
            clients: Arc::new(PostgresClientRepository::new(db.clone())),
            batches: Arc::new(PostgresBatchRepository::new(db.clone())),
            unit_of_work: Arc::new(PostgresUnitOfWork::new(db)),
        }
    }

    /// Every port backed by the same in-memory store
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self {
            users: store.clone(),
            profiles: store.clone(),
            orders: store.clone(),
            order_requests: store.clone(),
            inventories: store.clone(),
            clients: store.clone(),
            batches: store.clone(),
            unit_of_work: store,
        }
    }
}
