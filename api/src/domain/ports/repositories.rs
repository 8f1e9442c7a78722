//! Repository port traits
//!
//! Read-side access to each aggregate. Writes never go through a repository
//! directly: services stage them in a [`ChangeSet`](super::ChangeSet) and hand it
//! to the [`UnitOfWork`](super::UnitOfWork).
//!
//! Aggregates with integer ids reserve the id up front via `next_id`, so a
//! staged aggregate is always complete.

use async_trait::async_trait;

use crate::domain::entities::{
    Batch, BatchId, Client, ClientId, Inventory, InventoryId, Order, OrderId, OrderRequest,
    OrderRequestId, Profile, ProfileId, User, UserId,
};
use crate::error::DomainError;

/// Repository for User entities
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Reserve an id for a new user
    async fn next_id(&self) -> Result<UserId, DomainError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Check whether a username is already taken
    async fn exists_by_username(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    /// List all users
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}

/// Repository for Profile entities
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: &ProfileId) -> Result<Option<Profile>, DomainError>;

    async fn list(&self) -> Result<Vec<Profile>, DomainError>;
}

/// Repository for Order entities
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn next_id(&self) -> Result<OrderId, DomainError>;

    async fn find_by_id(&self, id: &OrderId) -> Result<Option<Order>, DomainError>;

    /// Find orders placed for a profile
    async fn find_by_profile(&self, profile_id: &ProfileId) -> Result<Vec<Order>, DomainError>;

    async fn list(&self) -> Result<Vec<Order>, DomainError>;
}

/// Repository for OrderRequest entities
#[async_trait]
pub trait OrderRequestRepository: Send + Sync {
    async fn next_id(&self) -> Result<OrderRequestId, DomainError>;

    async fn find_by_id(&self, id: &OrderRequestId) -> Result<Option<OrderRequest>, DomainError>;

    async fn list(&self) -> Result<Vec<OrderRequest>, DomainError>;
}

/// Repository for Inventory entities
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn next_id(&self) -> Result<InventoryId, DomainError>;

    async fn find_by_id(&self, id: &InventoryId) -> Result<Option<Inventory>, DomainError>;

    async fn list(&self) -> Result<Vec<Inventory>, DomainError>;
}

/// Repository for Client entities
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn next_id(&self) -> Result<ClientId, DomainError>;

    async fn find_by_id(&self, id: &ClientId) -> Result<Option<Client>, DomainError>;

    async fn list(&self) -> Result<Vec<Client>, DomainError>;
}

/// Repository for Batch entities, loaded together with their stage records
#[async_trait]
pub trait BatchRepository: Send + Sync {
    async fn next_id(&self) -> Result<BatchId, DomainError>;

    async fn find_by_id(&self, id: &BatchId) -> Result<Option<Batch>, DomainError>;

    async fn list(&self) -> Result<Vec<Batch>, DomainError>;
}
