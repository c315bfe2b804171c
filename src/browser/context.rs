use async_trait::async_trait;
use serde_json::Value;

use crate::browser::error::ExecutionError;

/// Options for a single remote evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateOptions {
    /// Evaluate in a fresh isolated world instead of the page's main world.
    /// Page globals then cannot see ours, and ours cannot see the page's.
    pub use_isolation: bool,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self { use_isolation: true }
    }
}

/// A remote execution context that holds a document.
///
/// The only way in is a one-shot evaluation of self-contained source text;
/// the only way out is the plain JSON value it produces.
#[async_trait]
pub trait EvaluationContext: Send {
    async fn evaluate_async(
        &mut self,
        expression: &str,
        options: &EvaluateOptions,
    ) -> Result<Value, ExecutionError>;
}
