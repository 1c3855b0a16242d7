use std::sync::Arc;

use axum::{
    extract::{Extension, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::{PolicyError, PolicyQuery, UsageCounts};
use crate::services::{BillingPolicyService, PlanCatalog};

#[axum::debug_handler]
pub async fn get_plan_policy(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(query): Query<PolicyQuery>,
) -> Result<Json<Value>, AppError> {
    let business_id = user
        .tenant_id()
        .map_err(|e| AppError::Auth(e.to_string()))?;

    let service = BillingPolicyService::new(&config);
    let usage = UsageCounts {
        staff: query.staff_count,
        services: query.service_count,
        appointments_this_month: query.appointment_count,
    };

    let decision = service
        .evaluate_for_business(business_id, usage, auth.token())
        .await
        .map_err(|e| match e {
            PolicyError::BusinessNotFound => AppError::NotFound(e.to_string()),
            PolicyError::DatastoreError(msg) => AppError::ExternalService(msg),
        })?;

    Ok(Json(json!(decision)))
}

#[axum::debug_handler]
pub async fn get_plan_catalog(
    State(_config): State<Arc<AppConfig>>,
) -> Result<Json<Value>, AppError> {
    let catalog = PlanCatalog::standard();

    Ok(Json(json!({
        "plans": catalog.plans()
    })))
}
