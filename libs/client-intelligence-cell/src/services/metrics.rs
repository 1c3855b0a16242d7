// libs/client-intelligence-cell/src/services/metrics.rs
use chrono::{DateTime, Datelike, Utc};
use tracing::debug;

use crate::models::{AppointmentRecord, ClientMetrics, InvoiceRecord, InvoiceStatus};

/// Recency/frequency/monetary calculator for one client identity.
///
/// Pure over already-fetched records plus a reference instant. Malformed or
/// missing fields never fail the computation: amounts coerce to 0, undated
/// records drop out of the recency math but still count toward frequency.
pub struct MetricsService;

impl MetricsService {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(
        &self,
        appointments: &[AppointmentRecord],
        invoices: &[InvoiceRecord],
        now: DateTime<Utc>,
    ) -> ClientMetrics {
        let monetary_total = self.paid_total(invoices);

        // Future-dated appointments are excluded from recency so a pre-booked
        // visit cannot mask an inactive client.
        let last_visit_date = appointments
            .iter()
            .filter_map(|a| a.date)
            .filter(|date| *date <= now)
            .max();

        let recency_days = last_visit_date.map(|last| (now - last).num_days());

        let frequency_total = appointments.len() as u32;
        let frequency_this_year = appointments
            .iter()
            .filter_map(|a| a.date)
            .filter(|date| date.year() == now.year())
            .count() as u32;

        let undated = appointments.iter().filter(|a| a.date.is_none()).count();
        if undated > 0 {
            debug!("{} appointment(s) without a parseable date, counted toward frequency only", undated);
        }

        let avg_ticket = if frequency_total == 0 {
            0
        } else {
            (monetary_total / f64::from(frequency_total)).round() as i64
        };

        ClientMetrics {
            recency_days,
            last_visit_date,
            frequency_total,
            frequency_this_year,
            monetary_total,
            avg_ticket,
        }
    }

    /// Sum of paid invoice amounts; missing or malformed amounts count as 0.
    fn paid_total(&self, invoices: &[InvoiceRecord]) -> f64 {
        invoices
            .iter()
            .filter(|invoice| invoice.status == InvoiceStatus::Paid)
            .map(|invoice| invoice.total_amount.unwrap_or(0.0))
            .sum()
    }
}

impl Default for MetricsService {
    fn default() -> Self {
        Self::new()
    }
}
