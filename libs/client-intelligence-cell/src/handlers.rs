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

use crate::models::{ClientIdentity, IntelligenceError, IntelligenceQuery};
use crate::services::ClientIntelligenceService;

#[axum::debug_handler]
pub async fn get_client_intelligence(
    State(config): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Extension(user): Extension<User>,
    Query(query): Query<IntelligenceQuery>,
) -> Result<Json<Value>, AppError> {
    let business_id = user
        .tenant_id()
        .map_err(|e| AppError::Auth(e.to_string()))?;

    let service = ClientIntelligenceService::new(&config);
    let identity = ClientIdentity::new(&query.name, &query.phone);

    let intelligence = service
        .get_client_intelligence(identity, business_id, auth.token())
        .await
        .map_err(|e| match e {
            IntelligenceError::MissingIdentity => AppError::BadRequest(e.to_string()),
            IntelligenceError::ValidationError(msg) => AppError::ValidationError(msg),
            IntelligenceError::DatastoreError(msg) => AppError::ExternalService(msg),
        })?;

    Ok(Json(json!(intelligence)))
}
