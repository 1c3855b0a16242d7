// libs/plan-policy-cell/src/services/billing.rs
use chrono::Utc;
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::datastore::DatastoreClient;

use crate::models::{PolicyDecision, PolicyError, Subscription, UsageCounts};
use crate::services::catalog::PlanCatalog;
use crate::services::policy::PlanPolicy;

/// Reads a tenant's subscription document and evaluates the plan policy
/// against it.
pub struct BillingPolicyService {
    datastore: DatastoreClient,
    catalog: PlanCatalog,
}

impl BillingPolicyService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            datastore: DatastoreClient::new(config),
            catalog: PlanCatalog::standard(),
        }
    }

    pub async fn evaluate_for_business(
        &self,
        business_id: &str,
        usage: UsageCounts,
        auth_token: &str,
    ) -> Result<PolicyDecision, PolicyError> {
        debug!("Evaluating plan policy for business {}", business_id);

        let filters = format!("id=eq.{}", urlencoding::encode(business_id));
        let rows: Vec<Subscription> = self
            .datastore
            .select("businesses", &filters, auth_token)
            .await
            .map_err(|e| PolicyError::DatastoreError(e.to_string()))?;

        let subscription = rows.into_iter().next().ok_or(PolicyError::BusinessNotFound)?;

        let policy = PlanPolicy::evaluate(
            &self.catalog,
            &subscription.plan,
            subscription.trial_ends_at,
            Utc::now(),
        );
        let decision = policy.decide(&self.catalog, &usage);

        info!(
            "Business {} on plan {} ({}): blocked={}",
            business_id, decision.plan_id, decision.trial_status, decision.is_blocked
        );

        Ok(decision)
    }

    pub fn catalog(&self) -> &PlanCatalog {
        &self.catalog
    }
}
