pub mod classifier;
pub mod intelligence;
pub mod metrics;
pub mod suggestions;

pub use classifier::TagClassifier;
pub use intelligence::{compute_intelligence, ClientIntelligenceService};
pub use metrics::MetricsService;
pub use suggestions::SuggestionService;
