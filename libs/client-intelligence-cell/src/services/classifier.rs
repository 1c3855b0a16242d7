// libs/client-intelligence-cell/src/services/classifier.rs
use crate::models::{ClientMetrics, Tag, TagKind};

/// Days without a past visit before a client counts as lost.
pub const LOST_RECENCY_DAYS: i64 = 60;

/// Visits in the current calendar year beyond which a client counts as loyal.
pub const LOYAL_VISITS_THIS_YEAR: u32 = 5;

/// Accumulated paid amount above which a client counts as a whale.
// Fixed currency-unit constant; a production system would make this relative
// to the business's own ticket distribution.
pub const WHALE_MONETARY_THRESHOLD: f64 = 1_000_000.0;

/// Maximum recency for a first visit to still count as new.
pub const NEW_MAX_RECENCY_DAYS: i64 = 30;

/// Applies the behavioral tag rules to a metrics snapshot.
///
/// Rules are independent predicates evaluated in a fixed order; a client can
/// carry several tags at once (a whale going cold is both `whale` and
/// `lost`). Missing metrics under-flag rather than guess.
pub struct TagClassifier;

impl TagClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, metrics: &ClientMetrics) -> Vec<Tag> {
        let mut tags = Vec::new();

        if metrics.recency_days.is_some_and(|days| days > LOST_RECENCY_DAYS) {
            tags.push(Tag {
                kind: TagKind::Lost,
                label: "Inactivo".to_string(),
                color: "#EF4444".to_string(),
                description: format!("Más de {} días sin visitas", LOST_RECENCY_DAYS),
            });
        }

        if metrics.frequency_this_year > LOYAL_VISITS_THIS_YEAR {
            tags.push(Tag {
                kind: TagKind::Loyal,
                label: "Frecuente".to_string(),
                color: "#3B82F6".to_string(),
                description: format!("Más de {} visitas este año", LOYAL_VISITS_THIS_YEAR),
            });
        }

        if metrics.monetary_total > WHALE_MONETARY_THRESHOLD {
            tags.push(Tag {
                kind: TagKind::Whale,
                label: "Alto valor".to_string(),
                color: "#F59E0B".to_string(),
                description: "Gasto acumulado sobre $1.000.000".to_string(),
            });
        }

        let is_first_recent_visit = metrics.frequency_total == 1
            && metrics.recency_days.is_some_and(|days| days <= NEW_MAX_RECENCY_DAYS);
        if is_first_recent_visit {
            tags.push(Tag {
                kind: TagKind::New,
                label: "Nuevo".to_string(),
                color: "#10B981".to_string(),
                description: format!("Primera visita en los últimos {} días", NEW_MAX_RECENCY_DAYS),
            });
        }

        tags
    }
}

impl Default for TagClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> ClientMetrics {
        ClientMetrics {
            recency_days: None,
            last_visit_date: None,
            frequency_total: 0,
            frequency_this_year: 0,
            monetary_total: 0.0,
            avg_ticket: 0,
        }
    }

    fn kinds(tags: &[Tag]) -> Vec<TagKind> {
        tags.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_no_history_no_tags() {
        assert!(TagClassifier::new().classify(&metrics()).is_empty());
    }

    #[test]
    fn test_lost_requires_known_recency() {
        let mut m = metrics();
        m.recency_days = Some(61);
        assert_eq!(kinds(&TagClassifier::new().classify(&m)), vec![TagKind::Lost]);

        m.recency_days = Some(60);
        assert!(TagClassifier::new().classify(&m).is_empty());

        m.recency_days = None;
        assert!(TagClassifier::new().classify(&m).is_empty());
    }

    #[test]
    fn test_loyal_threshold_is_strict() {
        let mut m = metrics();
        m.frequency_this_year = 5;
        assert!(TagClassifier::new().classify(&m).is_empty());

        m.frequency_this_year = 6;
        assert_eq!(kinds(&TagClassifier::new().classify(&m)), vec![TagKind::Loyal]);
    }

    #[test]
    fn test_whale_is_independent_of_recency_and_frequency() {
        let mut m = metrics();
        m.monetary_total = 2_000_000.0;
        m.frequency_total = 1;
        m.recency_days = Some(3);

        let tags = TagClassifier::new().classify(&m);
        assert_eq!(kinds(&tags), vec![TagKind::Whale, TagKind::New]);
    }

    #[test]
    fn test_new_requires_single_recent_visit() {
        let mut m = metrics();
        m.frequency_total = 1;
        m.recency_days = Some(30);
        assert_eq!(kinds(&TagClassifier::new().classify(&m)), vec![TagKind::New]);

        m.recency_days = Some(31);
        assert!(TagClassifier::new().classify(&m).is_empty());

        m.frequency_total = 2;
        m.recency_days = Some(10);
        assert!(TagClassifier::new().classify(&m).is_empty());
    }

    #[test]
    fn test_whale_and_lost_can_coexist() {
        let mut m = metrics();
        m.monetary_total = 1_500_000.0;
        m.recency_days = Some(90);
        m.frequency_total = 12;

        let tags = TagClassifier::new().classify(&m);
        assert_eq!(kinds(&tags), vec![TagKind::Lost, TagKind::Whale]);
    }
}
