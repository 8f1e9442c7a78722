//! Elixir Control API Server
//!
//! Backend for winery operations: accounts, customer profiles and orders,
//! order requests, inventory, clients and the winemaking process of each
//! production batch.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{HmacPasswordHasher, HmacTokenService, InMemoryStore, StoragePorts};
use app::{
    BatchService, ClientService, IdentityService, InventoryService, OrderRequestService,
    OrderService, ProfileService,
};
use config::Config;
use domain::ports::{
    BatchRepository, ClientRepository, InventoryRepository, OrderRepository,
    OrderRequestRepository, PasswordHasher, ProfileRepository, TokenService, UnitOfWork,
    UserRepository,
};

pub type DynIdentityService =
    IdentityService<dyn UserRepository, dyn UnitOfWork, dyn PasswordHasher, dyn TokenService>;
pub type DynProfileService = ProfileService<dyn ProfileRepository, dyn UnitOfWork>;
pub type DynOrderService = OrderService<dyn OrderRepository, dyn ProfileRepository, dyn UnitOfWork>;
pub type DynOrderRequestService = OrderRequestService<dyn OrderRequestRepository, dyn UnitOfWork>;
pub type DynInventoryService = InventoryService<dyn InventoryRepository, dyn UnitOfWork>;
pub type DynClientService = ClientService<dyn ClientRepository, dyn UnitOfWork>;
pub type DynBatchService = BatchService<dyn BatchRepository, dyn UnitOfWork>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub identity_service: Arc<DynIdentityService>,
    pub profile_service: Arc<DynProfileService>,
    pub order_service: Arc<DynOrderService>,
    pub order_request_service: Arc<DynOrderRequestService>,
    pub inventory_service: Arc<DynInventoryService>,
    pub client_service: Arc<DynClientService>,
    pub batch_service: Arc<DynBatchService>,
}

impl AppState {
    /// Wire every service onto one set of storage ports
    pub fn new(ports: StoragePorts, config: &Config) -> Self {
        let hasher: Arc<dyn PasswordHasher> = Arc::new(HmacPasswordHasher::new());
        let tokens: Arc<dyn TokenService> = Arc::new(HmacTokenService::new(
            config.token_secret.clone(),
            config.token_ttl_minutes,
        ));

        Self {
            identity_service: Arc::new(IdentityService::new(
                ports.users.clone(),
                ports.unit_of_work.clone(),
                hasher,
                tokens,
            )),
            profile_service: Arc::new(ProfileService::new(
                ports.profiles.clone(),
                ports.unit_of_work.clone(),
            )),
            order_service: Arc::new(OrderService::new(
                ports.orders.clone(),
                ports.profiles.clone(),
                ports.unit_of_work.clone(),
            )),
            order_request_service: Arc::new(OrderRequestService::new(
                ports.order_requests.clone(),
                ports.unit_of_work.clone(),
            )),
            inventory_service: Arc::new(InventoryService::new(
                ports.inventories.clone(),
                ports.unit_of_work.clone(),
            )),
            client_service: Arc::new(ClientService::new(
                ports.clients.clone(),
                ports.unit_of_work.clone(),
            )),
            batch_service: Arc::new(BatchService::new(ports.batches, ports.unit_of_work)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the router with every route and middleware layer
pub fn create_app(state: AppState, config: &Config) -> Router {
    let mut auth_routes = Router::new()
        .route("/authentication/sign-up", post(handlers::sign_up))
        .route("/authentication/sign-in", post(handlers::sign_in));

    // Uses PeerIpKeyExtractor to get client IP from socket connection
    if config.auth_rate_limit_enabled() {
        let governor_config = GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(config.auth_rate_limit_per_second)
            .burst_size(config.auth_rate_limit_burst)
            .finish();

        match governor_config {
            Some(governor_config) => {
                auth_routes = auth_routes.layer(GovernorLayer {
                    config: Arc::new(governor_config),
                });
            }
            None => tracing::warn!("Invalid rate limit settings, authentication is not limited"),
        }
    }

    let api = Router::new()
        .merge(auth_routes)
        .route("/authentication/me", get(handlers::current_user))
        // Users
        .route("/users", get(handlers::list_users))
        .route("/users/:id", get(handlers::get_user))
        // Profiles and their orders
        .route(
            "/profiles",
            post(handlers::create_profile).get(handlers::list_profiles),
        )
        .route(
            "/profiles/:profile_id",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route(
            "/profiles/:profile_id/orders",
            post(handlers::create_order).get(handlers::list_profile_orders),
        )
        // Orders
        .route("/orders", get(handlers::list_orders))
        .route(
            "/orders/:id",
            get(handlers::get_order).delete(handlers::delete_order),
        )
        .route("/orders/:id/status", put(handlers::update_order_status))
        // Order requests
        .route(
            "/order-requests",
            post(handlers::create_order_request).get(handlers::list_order_requests),
        )
        .route(
            "/order-requests/:id",
            get(handlers::get_order_request)
                .put(handlers::update_order_request)
                .delete(handlers::delete_order_request),
        )
        .route(
            "/order-requests/:id/status",
            put(handlers::update_order_request_status),
        )
        // Inventory
        .route(
            "/inventories",
            post(handlers::create_inventory).get(handlers::list_inventories),
        )
        .route(
            "/inventories/:id",
            get(handlers::get_inventory)
                .put(handlers::update_inventory)
                .delete(handlers::delete_inventory),
        )
        // Clients
        .route(
            "/clients",
            post(handlers::create_client).get(handlers::list_clients),
        )
        .route(
            "/clients/:id",
            get(handlers::get_client).delete(handlers::delete_client),
        )
        // Batches and their winemaking stages
        .route(
            "/batches",
            post(handlers::create_batch).get(handlers::list_batches),
        )
        .route(
            "/batches/:id",
            get(handlers::get_batch).delete(handlers::delete_batch),
        )
        .route(
            "/winemakingProcess/batch/:batch_id/:stage",
            get(handlers::get_stage),
        )
        .route(
            "/winemakingProcess/:batch_id/:stage",
            post(handlers::add_stage)
                .put(handlers::update_stage)
                .delete(handlers::delete_stage),
        );

    Router::new()
        .route("/health", get(health))
        .nest("/api/v1", api)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,elixir_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Elixir Control API...");

    // Load configuration
    let config = Config::from_env();

    let ports = match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(url).await?;
            tracing::info!("Database connected");

            if config.run_migrations {
                adapters::postgres::run_migrations(&db).await?;
            }
            StoragePorts::postgres(db)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set, data is kept in memory only");
            StoragePorts::in_memory(Arc::new(InMemoryStore::new()))
        }
    };

    let state = AppState::new(ports, &config);
    let app = create_app(state, &config);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
