pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod query;
pub mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{catalog::Catalog, config::Config};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Catalog,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: sea_orm::DatabaseConnection) -> Self {
        Self { config, catalog: Catalog::new(db) }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let movies = Router::new()
        .route("/", get(routes::list))
        .route("/createMovie", post(routes::create))
        .route("/search", get(routes::search))
        .route("/all", get(routes::all))
        .route("/update/{id}", put(routes::update))
        .route("/delete/{id}", delete(routes::delete))
        .route("/{id}", get(routes::get));

    let prefix = state.config.api_prefix.clone();
    let app = if prefix.is_empty() {
        Router::new().merge(movies)
    } else {
        // The listing answers on `{prefix}/` as well as `{prefix}`.
        Router::new().route(&format!("{prefix}/"), get(routes::list)).nest(&prefix, movies)
    };

    app.with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
