//! SeaORM entity models
//!
//! One module per table in `migrations/001_init.sql`.

pub mod batch_stages;
pub mod batches;
pub mod clients;
pub mod inventories;
pub mod order_requests;
pub mod orders;
pub mod profiles;
pub mod users;
