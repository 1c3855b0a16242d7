// libs/client-intelligence-cell/src/services/suggestions.rs
use crate::models::{Priority, Suggestion, SuggestionKind, Tag, TagKind};

/// Maps a tag set to recommended retention/upsell actions, one suggestion per
/// matching tag, preserving tag order.
pub struct SuggestionService;

impl SuggestionService {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, tags: &[Tag]) -> Vec<Suggestion> {
        tags.iter().map(|tag| self.for_tag(tag.kind)).collect()
    }

    fn for_tag(&self, kind: TagKind) -> Suggestion {
        match kind {
            TagKind::Lost => Suggestion {
                kind: SuggestionKind::Reactivation,
                title: "Reactivar cliente".to_string(),
                action: "Enviar recordatorio o descuento de reactivación".to_string(),
                priority: Priority::High,
            },
            TagKind::Loyal => Suggestion {
                kind: SuggestionKind::Reward,
                title: "Premiar fidelidad".to_string(),
                action: "Ofrecer un beneficio por frecuencia de visitas".to_string(),
                priority: Priority::Medium,
            },
            TagKind::Whale => Suggestion {
                kind: SuggestionKind::Vip,
                title: "Atención preferente".to_string(),
                action: "Asignar trato VIP y confirmar sus próximas reservas".to_string(),
                priority: Priority::High,
            },
            TagKind::New => Suggestion {
                kind: SuggestionKind::Welcome,
                title: "Dar la bienvenida".to_string(),
                action: "Enviar mensaje de bienvenida y proponer la próxima visita".to_string(),
                priority: Priority::Medium,
            },
        }
    }
}

impl Default for SuggestionService {
    fn default() -> Self {
        Self::new()
    }
}
