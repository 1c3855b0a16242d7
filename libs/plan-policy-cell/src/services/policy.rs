// libs/plan-policy-cell/src/services/policy.rs
use chrono::{DateTime, Utc};

use crate::models::{
    Limit, Plan, PlanId, PolicyDecision, TrialNotice, TrialNoticeKind, TrialStatus, UpgradePrompt,
    UsageCounts,
};
use crate::services::catalog::PlanCatalog;

/// Remaining trial days at or below which the notice escalates to a warning.
pub const TRIAL_WARNING_DAYS: i64 = 2;

/// Immutable policy snapshot for one tenant at one instant.
///
/// Trial state is derived, never stored: on_trial becomes trial_expired purely
/// as a function of `now > trial_ends_at`. A tenant becomes subscribed only
/// through the external billing flow writing a non-trial plan id; once
/// subscribed, stale trial timestamps are ignored. An expired trial is an
/// absolute gate: every permission check answers false regardless of limits.
pub struct PlanPolicy {
    plan: Plan,
    trial_status: TrialStatus,
    trial_days_left: Option<i64>,
}

impl PlanPolicy {
    pub fn evaluate(
        catalog: &PlanCatalog,
        raw_plan_id: &str,
        trial_ends_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let plan = catalog.resolve(raw_plan_id).clone();

        let (trial_status, trial_days_left) = if plan.id != PlanId::Trial {
            (TrialStatus::Subscribed, None)
        } else {
            match trial_ends_at {
                Some(ends_at) if now > ends_at => {
                    (TrialStatus::TrialExpired, Some((ends_at - now).num_days()))
                }
                Some(ends_at) => (TrialStatus::OnTrial, Some((ends_at - now).num_days())),
                // Doc without a trial end date: leave the tenant usable.
                None => (TrialStatus::OnTrial, None),
            }
        };

        Self {
            plan,
            trial_status,
            trial_days_left,
        }
    }

    pub fn plan(&self) -> &Plan {
        &self.plan
    }

    pub fn trial_status(&self) -> TrialStatus {
        self.trial_status
    }

    pub fn is_blocked(&self) -> bool {
        self.trial_status == TrialStatus::TrialExpired
    }

    pub fn can_add_staff(&self, current_count: u32) -> bool {
        !self.is_blocked() && self.plan.limits.max_staff.allows(current_count)
    }

    pub fn can_add_service(&self, current_count: u32) -> bool {
        !self.is_blocked() && self.plan.limits.max_services.allows(current_count)
    }

    pub fn can_book_appointment(&self, current_month_count: u32) -> bool {
        !self.is_blocked() && self.plan.limits.max_appointments_per_month.allows(current_month_count)
    }

    pub fn can_send_campaigns(&self) -> bool {
        !self.is_blocked() && self.plan.limits.can_send_campaigns
    }

    pub fn can_export_reports(&self) -> bool {
        !self.is_blocked() && self.plan.limits.can_export_reports
    }

    pub fn can_customize_branding(&self) -> bool {
        !self.is_blocked() && self.plan.limits.can_customize_branding
    }

    pub fn can_use_email_reminders(&self) -> bool {
        !self.is_blocked() && self.plan.limits.email_reminders
    }

    pub fn can_use_sms_reminders(&self) -> bool {
        !self.is_blocked() && self.plan.limits.sms_reminders
    }

    /// Staff slots still available; None when the plan is unconstrained.
    pub fn remaining_staff_slots(&self, current_count: u32) -> Option<u32> {
        self.plan.limits.max_staff.remaining(current_count)
    }

    /// Upgrade prompt once the staff limit is reached, escalating through the
    /// fixed tier ladder. None while below the limit or with nowhere to go.
    pub fn staff_limit_message(
        &self,
        catalog: &PlanCatalog,
        current_count: u32,
    ) -> Option<UpgradePrompt> {
        if self.plan.limits.max_staff.allows(current_count) {
            return None;
        }

        let suggested = catalog.next_tier(self.plan.id)?;
        let max = match self.plan.limits.max_staff {
            Limit::Finite(max) => max,
            Limit::Unlimited => return None,
        };

        Some(UpgradePrompt {
            current_plan: self.plan.id,
            suggested_plan: suggested,
            message: format!(
                "Límite de {} profesionales alcanzado. Actualiza al plan {} para agregar más.",
                max,
                suggested.label()
            ),
        })
    }

    /// Trial banner content; None for subscribed tenants.
    pub fn trial_message(&self) -> Option<TrialNotice> {
        match self.trial_status {
            TrialStatus::Subscribed => None,
            TrialStatus::TrialExpired => Some(TrialNotice {
                kind: TrialNoticeKind::Expired,
                days_left: Some(0),
                message: "Tu período de prueba terminó. Elige un plan para seguir usando Atenda."
                    .to_string(),
            }),
            TrialStatus::OnTrial => match self.trial_days_left {
                Some(days) if days <= TRIAL_WARNING_DAYS => Some(TrialNotice {
                    kind: TrialNoticeKind::Warning,
                    days_left: Some(days),
                    message: format!("Tu período de prueba termina en {} día(s).", days.max(0)),
                }),
                Some(days) => Some(TrialNotice {
                    kind: TrialNoticeKind::Info,
                    days_left: Some(days),
                    message: format!("Te quedan {} días de prueba.", days),
                }),
                None => Some(TrialNotice {
                    kind: TrialNoticeKind::Info,
                    days_left: None,
                    message: "Estás usando el período de prueba.".to_string(),
                }),
            },
        }
    }

    /// Full decision snapshot for the HTTP surface.
    pub fn decide(&self, catalog: &PlanCatalog, usage: &UsageCounts) -> PolicyDecision {
        PolicyDecision {
            plan_id: self.plan.id,
            trial_status: self.trial_status,
            is_blocked: self.is_blocked(),
            can_add_staff: self.can_add_staff(usage.staff),
            can_add_service: self.can_add_service(usage.services),
            can_book_appointment: self.can_book_appointment(usage.appointments_this_month),
            can_send_campaigns: self.can_send_campaigns(),
            can_export_reports: self.can_export_reports(),
            can_customize_branding: self.can_customize_branding(),
            can_use_email_reminders: self.can_use_email_reminders(),
            can_use_sms_reminders: self.can_use_sms_reminders(),
            remaining_staff_slots: self.remaining_staff_slots(usage.staff),
            staff_limit_message: self.staff_limit_message(catalog, usage.staff),
            trial_message: self.trial_message(),
        }
    }
}
