//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod auth;
pub mod batches;
pub mod clients;
pub mod inventories;
pub mod order_requests;
pub mod orders;
pub mod profiles;
pub mod stages;
pub mod users;

pub use auth::{sign_in, sign_up};
pub use batches::{create_batch, delete_batch, get_batch, list_batches};
pub use clients::{create_client, delete_client, get_client, list_clients};
pub use inventories::{
    create_inventory, delete_inventory, get_inventory, list_inventories, update_inventory,
};
pub use order_requests::{
    create_order_request, delete_order_request, get_order_request, list_order_requests,
    update_order_request, update_order_request_status,
};
pub use orders::{
    create_order, delete_order, get_order, list_orders, list_profile_orders, update_order_status,
};
pub use profiles::{create_profile, get_profile, list_profiles, update_profile};
pub use stages::{add_stage, delete_stage, get_stage, update_stage};
pub use users::{current_user, get_user, list_users};
