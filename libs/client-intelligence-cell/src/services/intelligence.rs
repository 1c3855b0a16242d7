// libs/client-intelligence-cell/src/services/intelligence.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use shared_config::AppConfig;
use shared_database::datastore::DatastoreClient;

use crate::models::{
    AppointmentRecord, ClientIdentity, ClientIntelligence, IntelligenceError, InvoiceRecord,
};
use crate::services::classifier::TagClassifier;
use crate::services::metrics::MetricsService;
use crate::services::suggestions::SuggestionService;

/// Pure derivation pipeline: records + reference instant in, full derived view
/// out. No I/O, no hidden state; identical inputs always produce identical
/// output, so a fresh snapshot can simply recompute and overwrite.
pub fn compute_intelligence(
    identity: ClientIdentity,
    appointments: &[AppointmentRecord],
    invoices: &[InvoiceRecord],
    now: DateTime<Utc>,
) -> ClientIntelligence {
    let metrics = MetricsService::new().compute(appointments, invoices, now);
    let tags = TagClassifier::new().classify(&metrics);
    let suggestions = SuggestionService::new().generate(&tags);

    ClientIntelligence {
        identity,
        metrics,
        tags,
        suggestions,
        computed_at: now,
    }
}

pub struct ClientIntelligenceService {
    datastore: DatastoreClient,
}

impl ClientIntelligenceService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            datastore: DatastoreClient::new(config),
        }
    }

    /// Fetch all records for one client identity within the tenant and derive
    /// its intelligence view.
    pub async fn get_client_intelligence(
        &self,
        identity: ClientIdentity,
        business_id: &str,
        auth_token: &str,
    ) -> Result<ClientIntelligence, IntelligenceError> {
        if identity.name.is_empty() || identity.phone.is_empty() {
            return Err(IntelligenceError::MissingIdentity);
        }

        debug!("Computing intelligence for client {}", identity);

        let filters = format!(
            "business_id=eq.{}&client_name=eq.{}&client_phone=eq.{}&order=date.asc",
            urlencoding::encode(business_id),
            urlencoding::encode(&identity.name),
            urlencoding::encode(&identity.phone),
        );

        let appointments: Vec<AppointmentRecord> = self
            .datastore
            .select("appointments", &filters, auth_token)
            .await
            .map_err(|e| IntelligenceError::DatastoreError(e.to_string()))?;

        let invoices: Vec<InvoiceRecord> = self
            .datastore
            .select("invoices", &filters, auth_token)
            .await
            .map_err(|e| IntelligenceError::DatastoreError(e.to_string()))?;

        debug!(
            "Fetched {} appointment(s) and {} invoice(s) for {}",
            appointments.len(),
            invoices.len(),
            identity
        );

        let intelligence = compute_intelligence(identity, &appointments, &invoices, Utc::now());

        info!(
            "Client {} scored: {} tag(s), {} suggestion(s)",
            intelligence.identity,
            intelligence.tags.len(),
            intelligence.suggestions.len()
        );

        Ok(intelligence)
    }
}
