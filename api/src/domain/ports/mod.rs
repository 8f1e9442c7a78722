//! Domain ports (traits)
//!
//! Port traits define interfaces that the domain layer requires.
//! Adapters provide concrete implementations of these traits.

pub mod repositories;
pub mod security;
pub mod unit_of_work;

pub use repositories::{
    BatchRepository, ClientRepository, InventoryRepository, OrderRepository,
    OrderRequestRepository, ProfileRepository, UserRepository,
};
pub use security::{PasswordHasher, TokenClaims, TokenService};
pub use unit_of_work::{Aggregate, AggregateKey, Change, ChangeSet, UnitOfWork};

#[cfg(test)]
pub use security::{MockPasswordHasher, MockTokenService};
