use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub business_id: Option<String>,
    pub app_metadata: Option<serde_json::Value>,
    pub user_metadata: Option<serde_json::Value>,
    pub aud: Option<String>,
    pub iat: Option<u64>,
}

/// Authenticated staff member. `business_id` is the tenant boundary: every
/// datastore query this core issues is scoped to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
    pub business_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    /// Tenant id for datastore queries, or an auth error message.
    pub fn tenant_id(&self) -> Result<&str, &'static str> {
        self.business_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or("Token carries no business_id claim")
    }
}
