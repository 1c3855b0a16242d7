// libs/client-intelligence-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ==============================================================================
// RAW RECORD MODELS
// ==============================================================================

/// Appointment row as stored upstream. Records come from staff screens and the
/// public booking form, so every field beyond the identity pair is treated as
/// potentially missing or malformed and deserializes leniently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRecord {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub service_price: Option<f64>,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub staff_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
    Blocked,
    Pending,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Blocked => write!(f, "blocked"),
            AppointmentStatus::Pending => write!(f, "pending"),
        }
    }
}

/// Invoice row as stored upstream. Monetary facts are append-only; status may
/// move pending -> paid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceRecord {
    #[serde(default)]
    pub client_name: String,
    #[serde(default)]
    pub client_phone: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Pending,
    Overdue,
    Cancelled,
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvoiceStatus::Paid => write!(f, "paid"),
            InvoiceStatus::Pending => write!(f, "pending"),
            InvoiceStatus::Overdue => write!(f, "overdue"),
            InvoiceStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

// Upstream has no stable client id: identity is the (name, phone) pair and
// spelling variants create distinct clients. Reconciliation happens elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ClientIdentity {
    pub name: String,
    pub phone: String,
}

impl ClientIdentity {
    pub fn new(name: &str, phone: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.phone)
    }
}

// ==============================================================================
// DERIVED MODELS (never persisted, recomputed on every read)
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientMetrics {
    pub recency_days: Option<i64>,
    pub last_visit_date: Option<DateTime<Utc>>,
    pub frequency_total: u32,
    pub frequency_this_year: u32,
    pub monetary_total: f64,
    pub avg_ticket: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Lost,
    Loyal,
    Whale,
    New,
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagKind::Lost => write!(f, "lost"),
            TagKind::Loyal => write!(f, "loyal"),
            TagKind::Whale => write!(f, "whale"),
            TagKind::New => write!(f, "new"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    #[serde(rename = "id")]
    pub kind: TagKind,
    pub label: String,
    pub color: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    Reactivation,
    Reward,
    Vip,
    Welcome,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub title: String,
    pub action: String,
    pub priority: Priority,
}

/// Full derived view for one client identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientIntelligence {
    pub identity: ClientIdentity,
    pub metrics: ClientMetrics,
    pub tags: Vec<Tag>,
    pub suggestions: Vec<Suggestion>,
    pub computed_at: DateTime<Utc>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct IntelligenceQuery {
    pub name: String,
    pub phone: String,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum IntelligenceError {
    #[error("Client identity requires a non-empty name and phone")]
    MissingIdentity,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Datastore error: {0}")]
    DatastoreError(String),
}

// ==============================================================================
// LENIENT FIELD DECODING
// ==============================================================================

// The upstream store keeps amounts as numbers or formatted strings depending
// on which client wrote the row. Anything unparseable decodes as None.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(coerce_amount))
}

fn coerce_amount(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

// Dates arrive as RFC 3339 timestamps or bare YYYY-MM-DD dates; both are
// accepted, anything else decodes as None.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(coerce_date))
}

fn coerce_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}
