use std::time::Duration;

use async_trait::async_trait;

use crate::browser::context::{EvaluateOptions, EvaluationContext};
use crate::browser::error::ExecutionError;

/// Per-pass evaluation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassSettings {
    pub use_isolation: bool,
    /// Upper bound on one remote evaluation.
    pub timeout: Duration,
}

impl Default for PassSettings {
    fn default() -> Self {
        Self {
            use_isolation: true,
            timeout: Duration::from_millis(30_000),
        }
    }
}

impl PassSettings {
    pub fn evaluate_options(&self) -> EvaluateOptions {
        EvaluateOptions {
            use_isolation: self.use_isolation,
        }
    }
}

/// Everything a gatherer may use during one pass over a loaded page.
pub struct PassContext<'a> {
    pub driver: &'a mut dyn EvaluationContext,
    pub url: Option<String>,
    pub settings: PassSettings,
}

impl<'a> PassContext<'a> {
    pub fn new(driver: &'a mut dyn EvaluationContext) -> Self {
        Self {
            driver,
            url: None,
            settings: PassSettings::default(),
        }
    }

    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    pub fn with_settings(mut self, settings: PassSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Collects one artifact after the page has loaded.
///
/// Gatherers are stateless: each call takes a fresh snapshot and retry policy
/// belongs to whoever schedules the passes.
#[async_trait]
pub trait Gatherer: Send + Sync {
    type Artifact: Send;

    fn name(&self) -> &'static str;

    async fn after_pass(&self, pass: &mut PassContext<'_>) -> Result<Self::Artifact, ExecutionError>;
}
