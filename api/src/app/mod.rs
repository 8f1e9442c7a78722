//! Application layer
//!
//! Contains use cases and service orchestration.
//! Each mutating call stages its writes in one `ChangeSet` and commits it
//! through the unit of work exactly once.

pub mod batch_service;
pub mod client_service;
pub mod identity_service;
pub mod inventory_service;
pub mod order_request_service;
pub mod order_service;
pub mod profile_service;

pub use batch_service::BatchService;
pub use client_service::ClientService;
pub use identity_service::IdentityService;
pub use inventory_service::InventoryService;
pub use order_request_service::OrderRequestService;
pub use order_service::OrderService;
pub use profile_service::ProfileService;
