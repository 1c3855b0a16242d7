use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};

use client_intelligence_cell::router::create_intelligence_router;
use plan_policy_cell::router::create_plan_policy_router;
use shared_config::AppConfig;

pub fn create_router(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Atenda API is running!" }))
        .nest("/clients", create_intelligence_router(state.clone()))
        .nest("/billing", create_plan_policy_router(state.clone()))
}
