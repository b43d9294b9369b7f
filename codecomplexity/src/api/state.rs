use std::sync::Arc;

use crate::analysis::AnalysisService;
use crate::config::Config;
use crate::llm::LlmProvider;

/// Immutable per-process state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub llm: LlmProvider,
    pub analysis: AnalysisService,
}

impl AppState {
    pub fn new(config: Config, llm: LlmProvider) -> Self {
        let config = Arc::new(config);
        let analysis = AnalysisService::new(Arc::new(llm.clone()), config.analysis.clone());

        Self {
            config,
            llm,
            analysis,
        }
    }
}
