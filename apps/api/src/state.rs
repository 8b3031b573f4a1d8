use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::planning::store::PlanStore;
use crate::skills::taxonomy::SkillTaxonomy;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Postgres-backed when `DATABASE_URL` is set, in-memory otherwise.
    pub store: Arc<dyn PlanStore>,
    /// `None` when no OpenRouter key/model is configured.
    pub llm: Option<Arc<dyn TextGenerator>>,
    pub taxonomy: Arc<SkillTaxonomy>,
    pub config: Config,
}

impl AppState {
    /// Collaborator for skill extraction; off when `ENABLE_AI_ENRICHMENT` is false.
    pub fn enrichment(&self) -> Option<&dyn TextGenerator> {
        if self.config.enable_ai_enrichment {
            self.llm.as_deref()
        } else {
            None
        }
    }

    /// Collaborator for plan prose.
    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.llm.as_deref()
    }
}
