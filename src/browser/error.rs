use thiserror::Error;

/// Failure of one remote evaluation. Always fails the whole pass; no partial
/// records are produced alongside it.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Driver process could not be started or never signalled ready
    #[error("Evaluation driver unavailable (is Node.js with Playwright installed?): {0}")]
    DriverUnavailable(String),

    /// Page, frame or driver went away before a result came back
    #[error("Execution context destroyed: {0}")]
    ContextDestroyed(String),

    /// The assembled unit threw inside the page (syntax, reference or runtime error)
    #[error("Page evaluation failed: {name}: {message}")]
    Evaluation { name: String, message: String },

    #[error("Evaluation timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    /// The page returned something that is not an array of form records
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Driver answered with an error or an unexpected response
    #[error("Driver protocol error ({command}): {error}")]
    Protocol { command: String, error: String },

    /// The page script is missing a helper one of its functions depends on
    #[error("Page script assembly failed: {0}")]
    Assembly(String),

    #[error("Driver I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Driver JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
