//! HTTP API Layer
//!
//! This crate provides the REST API for the family tree services using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: One module per entity, plus health checks
//! - **Middleware**: Tracing, CORS, audit logging
//! - **DTOs**: Validated request bodies and list responses
//! - **Error Handling**: Consistent JSON error responses
//!
//! The router is generic over the unit of work factory, so the same routes
//! run on PostgreSQL or on the in-memory store.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//! use infra_db::PgUnitOfWorkFactory;
//!
//! let app = create_router(PgUnitOfWorkFactory::new(pool), config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::{HealthCheckable, UnitOfWorkFactory};
use domain_tree::TreeUnitOfWork;

use crate::config::ApiConfig;
use crate::handlers::{families, health, multimedia_links, notes};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
pub struct AppState<F> {
    pub factory: Arc<F>,
    pub config: ApiConfig,
}

impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
            config: self.config.clone(),
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `factory` - Opens a unit of work per request
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router<F>(factory: F, config: ApiConfig) -> Router
where
    F: UnitOfWorkFactory + HealthCheckable,
    F::UnitOfWork: TreeUnitOfWork,
{
    let state = AppState {
        factory: Arc::new(factory),
        config,
    };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check::<F>));

    let note_routes = Router::new()
        .route("/", get(notes::list_notes::<F>).post(notes::create_note::<F>))
        .route(
            "/:id",
            get(notes::get_note::<F>)
                .put(notes::update_note::<F>)
                .delete(notes::delete_note::<F>),
        );

    let multimedia_link_routes = Router::new()
        .route(
            "/",
            get(multimedia_links::list_multimedia_links::<F>)
                .post(multimedia_links::create_multimedia_link::<F>),
        )
        .route(
            "/:id",
            get(multimedia_links::get_multimedia_link::<F>)
                .put(multimedia_links::update_multimedia_link::<F>)
                .delete(multimedia_links::delete_multimedia_link::<F>),
        );

    let family_routes = Router::new()
        .route("/", get(families::list_families::<F>).post(families::create_family::<F>))
        .route(
            "/:id",
            get(families::get_family::<F>)
                .put(families::update_family::<F>)
                .delete(families::delete_family::<F>),
        );

    let api_routes = Router::new()
        .nest("/trees/:tree_id/notes", note_routes)
        .nest("/trees/:tree_id/multimedia-links", multimedia_link_routes)
        .nest("/trees/:tree_id/families", family_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
