//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::claude::ClaudeClient;
use crate::config::{AdminConfig, EnrichmentMode};
use crate::enrichment::{Enricher, LlmEnricher};
use crate::services::CompanyService;

/// Application state shared across all handlers.
///
/// Cheap to clone; everything lives behind one `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    pool: PgPool,
    enricher: Enricher,
    companies: CompanyService,
}

impl AppState {
    /// Assemble state from loaded configuration and a connected pool.
    ///
    /// The enricher is chosen here: `EnrichmentMode::Llm` requires a Claude
    /// configuration (enforced at config load), anything else gets the
    /// rule-based strategy.
    #[must_use]
    pub fn new(config: AdminConfig, pool: PgPool) -> Self {
        let enricher = match (config.enrichment_mode, config.claude()) {
            (EnrichmentMode::Llm, Some(claude)) => {
                Enricher::llm_with_fallback(LlmEnricher::new(ClaudeClient::new(claude)))
            }
            _ => Enricher::rules(),
        };
        let companies = CompanyService::new(pool.clone(), &config.company_cache);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                enricher,
                companies,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    #[must_use]
    pub fn enricher(&self) -> &Enricher {
        &self.inner.enricher
    }

    #[must_use]
    pub fn companies(&self) -> &CompanyService {
        &self.inner.companies
    }
}
