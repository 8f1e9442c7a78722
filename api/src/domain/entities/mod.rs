//! Domain entities
//!
//! Pure domain models representing core business concepts.
//! These are separate from the SeaORM entities in the `entity` module.

pub mod batch;
pub mod client;
pub mod inventory;
pub mod order;
pub mod order_request;
pub mod profile;
pub mod stage;
pub mod user;

pub use batch::{Batch, BatchId, NewBatch};
pub use client::{Client, ClientId, NewClient};
pub use inventory::{Inventory, InventoryDetails, InventoryId};
pub use order::{NewOrder, Order, OrderId, OrderStatus};
pub use order_request::{OrderRequest, OrderRequestDetails, OrderRequestId};
pub use profile::{EmailAddress, NewProfile, PersonName, Profile, ProfileId, StreetAddress};
pub use stage::{StageKind, StageRecord};

#[cfg(test)]
pub use stage::{Aging, Clarification, Fermentation, Pressing};
pub use user::{Role, SignIn, SignUp, User, UserId};
