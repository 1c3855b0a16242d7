// libs/plan-policy-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// PLAN CATALOG MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlanId {
    Trial,
    Individual,
    Basic,
    Professional,
    Enterprise,
}

impl PlanId {
    /// Parse a stored plan identifier. Unknown identifiers return None; the
    /// catalog turns that into the trial fallback.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "trial" => Some(PlanId::Trial),
            "individual" => Some(PlanId::Individual),
            "basic" => Some(PlanId::Basic),
            "professional" => Some(PlanId::Professional),
            "enterprise" => Some(PlanId::Enterprise),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlanId::Trial => "Prueba",
            PlanId::Individual => "Individual",
            PlanId::Basic => "Básico",
            PlanId::Professional => "Profesional",
            PlanId::Enterprise => "Empresa",
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanId::Trial => write!(f, "trial"),
            PlanId::Individual => write!(f, "individual"),
            PlanId::Basic => write!(f, "basic"),
            PlanId::Professional => write!(f, "professional"),
            PlanId::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// A count limit. `Unlimited` serializes as null and never constrains.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Limit {
    Finite(u32),
    Unlimited,
}

impl Limit {
    /// Whether one more item may be added on top of `current`.
    pub fn allows(&self, current: u32) -> bool {
        match self {
            Limit::Finite(max) => current < *max,
            Limit::Unlimited => true,
        }
    }

    /// Slots left before the limit; None when unconstrained. Never negative.
    pub fn remaining(&self, current: u32) -> Option<u32> {
        match self {
            Limit::Finite(max) => Some(max.saturating_sub(current)),
            Limit::Unlimited => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanLimits {
    pub max_staff: Limit,
    pub max_appointments_per_month: Limit,
    pub max_services: Limit,
    pub can_send_campaigns: bool,
    pub can_export_reports: bool,
    pub can_customize_branding: bool,
    pub email_reminders: bool,
    pub sms_reminders: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Plan {
    pub id: PlanId,
    /// Monthly price in currency units; 0 for the trial tier.
    pub price: u32,
    pub limits: PlanLimits,
}

// ==============================================================================
// SUBSCRIPTION STATE MODELS
// ==============================================================================

/// Subscription fields of the tenant's business document. Written by the
/// billing/upgrade flows, read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub trial_ends_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrialStatus {
    OnTrial,
    TrialExpired,
    Subscribed,
}

impl fmt::Display for TrialStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrialStatus::OnTrial => write!(f, "on_trial"),
            TrialStatus::TrialExpired => write!(f, "trial_expired"),
            TrialStatus::Subscribed => write!(f, "subscribed"),
        }
    }
}

// ==============================================================================
// POLICY OUTPUT MODELS
// ==============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrialNoticeKind {
    Expired,
    Warning,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrialNotice {
    #[serde(rename = "type")]
    pub kind: TrialNoticeKind,
    pub days_left: Option<i64>,
    pub message: String,
}

/// Upgrade prompt returned when a staff limit is reached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpgradePrompt {
    pub current_plan: PlanId,
    pub suggested_plan: PlanId,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct UsageCounts {
    #[serde(default)]
    pub staff: u32,
    #[serde(default)]
    pub services: u32,
    #[serde(default)]
    pub appointments_this_month: u32,
}

/// Serializable snapshot of every permission check for a tenant, as consumed
/// by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub plan_id: PlanId,
    pub trial_status: TrialStatus,
    pub is_blocked: bool,
    pub can_add_staff: bool,
    pub can_add_service: bool,
    pub can_book_appointment: bool,
    pub can_send_campaigns: bool,
    pub can_export_reports: bool,
    pub can_customize_branding: bool,
    pub can_use_email_reminders: bool,
    pub can_use_sms_reminders: bool,
    pub remaining_staff_slots: Option<u32>,
    pub staff_limit_message: Option<UpgradePrompt>,
    pub trial_message: Option<TrialNotice>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyQuery {
    #[serde(default)]
    pub staff_count: u32,
    #[serde(default)]
    pub service_count: u32,
    #[serde(default)]
    pub appointment_count: u32,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum PolicyError {
    #[error("Business not found")]
    BusinessNotFound,

    #[error("Datastore error: {0}")]
    DatastoreError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_id_parse_is_case_insensitive() {
        assert_eq!(PlanId::parse(" Basic "), Some(PlanId::Basic));
        assert_eq!(PlanId::parse("PROFESSIONAL"), Some(PlanId::Professional));
        assert_eq!(PlanId::parse("gold"), None);
        assert_eq!(PlanId::parse(""), None);
    }

    #[test]
    fn test_limit_allows_and_remaining() {
        let limit = Limit::Finite(3);
        assert!(limit.allows(2));
        assert!(!limit.allows(3));
        assert!(!limit.allows(10));
        assert_eq!(limit.remaining(1), Some(2));
        assert_eq!(limit.remaining(10), Some(0));

        assert!(Limit::Unlimited.allows(u32::MAX));
        assert_eq!(Limit::Unlimited.remaining(100), None);
    }

    #[test]
    fn test_limit_serializes_unlimited_as_null() {
        assert_eq!(serde_json::to_string(&Limit::Finite(20)).unwrap(), "20");
        assert_eq!(serde_json::to_string(&Limit::Unlimited).unwrap(), "null");
    }

    #[test]
    fn test_subscription_tolerates_missing_fields() {
        let sub: Subscription = serde_json::from_str(r#"{"name":"Salón Oriente"}"#).unwrap();
        assert_eq!(sub.plan, "");
        assert_eq!(sub.trial_ends_at, None);
    }
}
