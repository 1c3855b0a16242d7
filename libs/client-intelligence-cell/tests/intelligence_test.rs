// libs/client-intelligence-cell/tests/intelligence_test.rs
//
// Property tests for the pure derivation pipeline: records in, derived view
// out, no I/O involved.

use chrono::{DateTime, Duration, TimeZone, Utc};

use client_intelligence_cell::models::{
    AppointmentRecord, AppointmentStatus, ClientIdentity, ClientMetrics, InvoiceRecord,
    InvoiceStatus, Priority, SuggestionKind, TagKind,
};
use client_intelligence_cell::services::{compute_intelligence, TagClassifier};

// ==============================================================================
// TEST FIXTURES
// ==============================================================================

fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 15, 12, 0, 0).unwrap()
}

fn identity() -> ClientIdentity {
    ClientIdentity::new("Ana Soto", "+56911111111")
}

fn appointment(days_from_now: i64) -> AppointmentRecord {
    AppointmentRecord {
        client_name: "Ana Soto".to_string(),
        client_phone: "+56911111111".to_string(),
        date: Some(test_now() + Duration::days(days_from_now)),
        service_name: Some("Corte".to_string()),
        service_price: Some(15000.0),
        status: AppointmentStatus::Completed,
        staff_name: Some("Camila".to_string()),
    }
}

fn paid_invoice(amount: f64) -> InvoiceRecord {
    InvoiceRecord {
        client_name: "Ana Soto".to_string(),
        client_phone: "+56911111111".to_string(),
        total_amount: Some(amount),
        status: InvoiceStatus::Paid,
        date: Some(test_now()),
    }
}

// ==============================================================================
// DERIVATION PROPERTIES
// ==============================================================================

#[test]
fn test_client_with_no_history_has_empty_view() {
    let view = compute_intelligence(identity(), &[], &[], test_now());

    assert!(view.tags.is_empty());
    assert!(view.suggestions.is_empty());
    assert_eq!(view.metrics.avg_ticket, 0);
    assert_eq!(view.metrics.monetary_total, 0.0);
}

#[test]
fn test_lost_and_new_are_never_produced_together() {
    let classifier = TagClassifier::new();

    for frequency_total in 0..4u32 {
        for recency in 0..120i64 {
            let metrics = ClientMetrics {
                recency_days: Some(recency),
                last_visit_date: Some(test_now() - Duration::days(recency)),
                frequency_total,
                frequency_this_year: frequency_total,
                monetary_total: 0.0,
                avg_ticket: 0,
            };

            let tags = classifier.classify(&metrics);
            let has_lost = tags.iter().any(|t| t.kind == TagKind::Lost);
            let has_new = tags.iter().any(|t| t.kind == TagKind::New);

            assert!(
                !(has_lost && has_new),
                "lost and new coexist at frequency={} recency={}",
                frequency_total,
                recency
            );
        }
    }
}

#[test]
fn test_single_huge_invoice_tags_whale_and_new() {
    let appointments = vec![appointment(-3)];
    let invoices = vec![paid_invoice(2_000_000.0)];

    let view = compute_intelligence(identity(), &appointments, &invoices, test_now());

    let kinds: Vec<TagKind> = view.tags.iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TagKind::Whale, TagKind::New]);
}

#[test]
fn test_recomputation_is_idempotent() {
    let appointments = vec![appointment(-70), appointment(-10), appointment(5)];
    let invoices = vec![paid_invoice(50000.0), paid_invoice(1_200_000.0)];
    let now = test_now();

    let first = compute_intelligence(identity(), &appointments, &invoices, now);
    let second = compute_intelligence(identity(), &appointments, &invoices, now);

    assert_eq!(first, second);
}

#[test]
fn test_seventy_day_absence_triggers_reactivation() {
    let appointments = vec![appointment(-70)];

    let view = compute_intelligence(identity(), &appointments, &[], test_now());

    assert_eq!(view.metrics.recency_days, Some(70));
    assert!(view.tags.iter().any(|t| t.kind == TagKind::Lost));

    let reactivation = view
        .suggestions
        .iter()
        .find(|s| s.kind == SuggestionKind::Reactivation)
        .expect("lost client should get a reactivation suggestion");
    assert_eq!(reactivation.priority, Priority::High);
}

#[test]
fn test_suggestions_follow_tag_order() {
    // Lost + loyal + whale all at once: suggestions must mirror tag order.
    let mut appointments: Vec<AppointmentRecord> = (1..=7).map(|i| appointment(-i * 10)).collect();
    appointments.push(appointment(20));
    let invoices = vec![paid_invoice(1_500_000.0)];

    let now = test_now() + Duration::days(100);
    let view = compute_intelligence(identity(), &appointments, &invoices, now);

    let tag_kinds: Vec<TagKind> = view.tags.iter().map(|t| t.kind).collect();
    assert_eq!(tag_kinds, vec![TagKind::Lost, TagKind::Loyal, TagKind::Whale]);

    let suggestion_kinds: Vec<SuggestionKind> =
        view.suggestions.iter().map(|s| s.kind).collect();
    assert_eq!(
        suggestion_kinds,
        vec![
            SuggestionKind::Reactivation,
            SuggestionKind::Reward,
            SuggestionKind::Vip
        ]
    );
}

#[test]
fn test_unpaid_invoices_never_make_a_whale() {
    let mut overdue = paid_invoice(5_000_000.0);
    overdue.status = InvoiceStatus::Overdue;
    let mut cancelled = paid_invoice(5_000_000.0);
    cancelled.status = InvoiceStatus::Cancelled;

    let view = compute_intelligence(
        identity(),
        &[appointment(-1)],
        &[overdue, cancelled],
        test_now(),
    );

    assert_eq!(view.metrics.monetary_total, 0.0);
    assert!(view.tags.iter().all(|t| t.kind != TagKind::Whale));
}
