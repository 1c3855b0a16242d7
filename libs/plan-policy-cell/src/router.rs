use std::sync::Arc;

use axum::{middleware, routing::get, Router};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::*;

pub fn create_plan_policy_router(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/policy", get(get_plan_policy))
        .route("/plans", get(get_plan_catalog))
        .layer(middleware::from_fn_with_state(config.clone(), auth_middleware))
        .with_state(config)
}
