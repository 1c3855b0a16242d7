// libs/plan-policy-cell/src/services/catalog.rs
use tracing::warn;

use crate::models::{Limit, Plan, PlanId, PlanLimits};

/// Static plan catalog. Five tiers, consumed by value; there is no remote
/// fetch for this table.
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn standard() -> Self {
        Self {
            plans: vec![
                Plan {
                    id: PlanId::Trial,
                    price: 0,
                    limits: PlanLimits {
                        max_staff: Limit::Finite(1),
                        max_appointments_per_month: Limit::Finite(30),
                        max_services: Limit::Finite(5),
                        can_send_campaigns: false,
                        can_export_reports: false,
                        can_customize_branding: false,
                        email_reminders: true,
                        sms_reminders: false,
                    },
                },
                Plan {
                    id: PlanId::Individual,
                    price: 9_990,
                    limits: PlanLimits {
                        max_staff: Limit::Finite(1),
                        max_appointments_per_month: Limit::Finite(100),
                        max_services: Limit::Finite(10),
                        can_send_campaigns: false,
                        can_export_reports: false,
                        can_customize_branding: false,
                        email_reminders: true,
                        sms_reminders: false,
                    },
                },
                Plan {
                    id: PlanId::Basic,
                    price: 19_990,
                    limits: PlanLimits {
                        max_staff: Limit::Finite(20),
                        max_appointments_per_month: Limit::Finite(500),
                        max_services: Limit::Finite(50),
                        can_send_campaigns: false,
                        can_export_reports: true,
                        can_customize_branding: false,
                        email_reminders: true,
                        sms_reminders: false,
                    },
                },
                Plan {
                    id: PlanId::Professional,
                    price: 39_990,
                    limits: PlanLimits {
                        max_staff: Limit::Finite(50),
                        max_appointments_per_month: Limit::Unlimited,
                        max_services: Limit::Unlimited,
                        can_send_campaigns: true,
                        can_export_reports: true,
                        can_customize_branding: true,
                        email_reminders: true,
                        sms_reminders: true,
                    },
                },
                Plan {
                    id: PlanId::Enterprise,
                    price: 69_990,
                    limits: PlanLimits {
                        max_staff: Limit::Unlimited,
                        max_appointments_per_month: Limit::Unlimited,
                        max_services: Limit::Unlimited,
                        can_send_campaigns: true,
                        can_export_reports: true,
                        can_customize_branding: true,
                        email_reminders: true,
                        sms_reminders: true,
                    },
                },
            ],
        }
    }

    pub fn get(&self, id: PlanId) -> &Plan {
        self.plans
            .iter()
            .find(|plan| plan.id == id)
            .expect("catalog contains every PlanId variant")
    }

    /// Resolve a stored plan identifier. Unknown identifiers fall back to the
    /// trial plan's limits: the safe default is the most restrictive tier,
    /// never unlimited.
    pub fn resolve(&self, raw_plan_id: &str) -> &Plan {
        match PlanId::parse(raw_plan_id) {
            Some(id) => self.get(id),
            None => {
                warn!("Unknown plan identifier '{}', falling back to trial limits", raw_plan_id);
                self.get(PlanId::Trial)
            }
        }
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }

    /// Next tier in the fixed upgrade ladder, or None at the top.
    pub fn next_tier(&self, id: PlanId) -> Option<PlanId> {
        match id {
            PlanId::Trial => Some(PlanId::Individual),
            PlanId::Individual => Some(PlanId::Basic),
            PlanId::Basic => Some(PlanId::Professional),
            PlanId::Professional => Some(PlanId::Enterprise),
            PlanId::Enterprise => None,
        }
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_tiers() {
        let catalog = PlanCatalog::standard();
        assert_eq!(catalog.plans().len(), 5);
    }

    #[test]
    fn test_unknown_plan_resolves_to_trial_limits() {
        let catalog = PlanCatalog::standard();

        let plan = catalog.resolve("premium-legacy");
        assert_eq!(plan.id, PlanId::Trial);
        assert_eq!(plan.limits.max_staff, Limit::Finite(1));
    }

    #[test]
    fn test_known_plans_resolve_by_identifier() {
        let catalog = PlanCatalog::standard();

        assert_eq!(catalog.resolve("basic").id, PlanId::Basic);
        assert_eq!(catalog.resolve("enterprise").limits.max_staff, Limit::Unlimited);
    }

    #[test]
    fn test_upgrade_ladder_is_fixed() {
        let catalog = PlanCatalog::standard();

        assert_eq!(catalog.next_tier(PlanId::Trial), Some(PlanId::Individual));
        assert_eq!(catalog.next_tier(PlanId::Basic), Some(PlanId::Professional));
        assert_eq!(catalog.next_tier(PlanId::Enterprise), None);
    }

    #[test]
    fn test_staff_limits_grow_along_the_ladder() {
        let catalog = PlanCatalog::standard();

        let mut tier = Some(PlanId::Trial);
        let mut previous_max = 0u32;
        while let Some(id) = tier {
            match catalog.get(id).limits.max_staff {
                Limit::Finite(max) => {
                    assert!(max >= previous_max, "{} shrinks the staff limit", id);
                    previous_max = max;
                }
                Limit::Unlimited => {}
            }
            tier = catalog.next_tier(id);
        }
    }
}
