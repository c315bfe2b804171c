use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tracing::{debug, info, warn};

use crate::browser::context::{EvaluateOptions, EvaluationContext};
use crate::browser::error::ExecutionError;

const DRIVER_SCRIPT: &str = include_str!("driver.js");
const DRIVER_FILE_NAME: &str = "form_snapshot_driver.js";

/// Request sent to the driver over stdin (one JSON line).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DriverRequest {
    Navigate {
        id: u64,
        cmd: &'static str,
        url: String,
    },
    Evaluate {
        id: u64,
        cmd: &'static str,
        expression: String,
        #[serde(rename = "useIsolation")]
        use_isolation: bool,
    },
    Quit {
        id: u64,
        cmd: &'static str,
    },
}

impl DriverRequest {
    pub fn navigate(id: u64, url: &str) -> Self {
        DriverRequest::Navigate {
            id,
            cmd: "navigate",
            url: url.to_string(),
        }
    }

    pub fn evaluate(id: u64, expression: &str, options: &EvaluateOptions) -> Self {
        DriverRequest::Evaluate {
            id,
            cmd: "evaluate",
            expression: expression.to_string(),
            use_isolation: options.use_isolation,
        }
    }

    pub fn quit(id: u64) -> Self {
        DriverRequest::Quit { id, cmd: "quit" }
    }

    pub fn id(&self) -> u64 {
        match self {
            DriverRequest::Navigate { id, .. }
            | DriverRequest::Evaluate { id, .. }
            | DriverRequest::Quit { id, .. } => *id,
        }
    }
}

/// Response read from the driver's stdout (one JSON line).
#[derive(Debug, Deserialize)]
pub struct DriverResponse {
    #[serde(default)]
    pub id: Option<u64>,
    pub ok: bool,
    #[serde(default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub ready: Option<bool>,
}

impl DriverResponse {
    /// Map a failed response onto the error taxonomy.
    pub fn into_error(self, command: &str) -> ExecutionError {
        let error = self.error.unwrap_or_else(|| "Unknown error".into());
        match self.kind.as_deref() {
            Some("evaluation") => ExecutionError::Evaluation {
                name: "Error".into(),
                message: error,
            },
            Some("context_destroyed") => ExecutionError::ContextDestroyed(error),
            _ => ExecutionError::Protocol {
                command: command.into(),
                error,
            },
        }
    }
}

/// How to start the driver.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Node.js executable
    pub node_path: String,
    pub headless: bool,
    /// Directory the embedded driver script is written to. Node resolves
    /// `playwright` relative to it, so it should sit next to a `node_modules`
    /// that has Playwright, unless `NODE_PATH` is set.
    pub driver_dir: Option<PathBuf>,
    /// Upper bound on browser startup, up to the driver's ready signal.
    pub startup_timeout: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            node_path: "node".into(),
            headless: true,
            driver_dir: None,
            startup_timeout: Duration::from_millis(30_000),
        }
    }
}

/// A browser page held open by a Node.js Playwright driver process.
///
/// Requests carry increasing ids; responses for any other id (left over from
/// an abandoned request) are skipped.
pub struct PlaywrightSession {
    child: Child,
    stdin: ChildStdin,
    lines: Lines<BufReader<ChildStdout>>,
    next_id: u64,
}

impl PlaywrightSession {
    /// Write the driver script, spawn it and wait for its ready signal.
    pub async fn launch(config: &SessionConfig) -> Result<Self, ExecutionError> {
        let dir = config.driver_dir.clone().unwrap_or_else(std::env::temp_dir);
        let script_path = dir.join(DRIVER_FILE_NAME);
        tokio::fs::write(&script_path, DRIVER_SCRIPT).await?;

        let mut child = Command::new(&config.node_path)
            .arg(&script_path)
            .env("HEADLESS", if config.headless { "true" } else { "false" })
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                ExecutionError::DriverUnavailable(format!("failed to spawn {}: {}", config.node_path, e))
            })?;

        let stdin = child.stdin.take().ok_or_else(|| {
            ExecutionError::DriverUnavailable("failed to capture driver stdin".into())
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            ExecutionError::DriverUnavailable("failed to capture driver stdout".into())
        })?;
        let mut lines = BufReader::new(stdout).lines();

        await_ready(&mut lines, config.startup_timeout).await?;

        info!(script = %script_path.display(), "evaluation driver ready");

        Ok(Self {
            child,
            stdin,
            lines,
            next_id: 1,
        })
    }

    /// Send a request and read the response carrying the same id.
    async fn send(&mut self, request: &DriverRequest) -> Result<DriverResponse, ExecutionError> {
        let json = serde_json::to_string(request)?;
        self.stdin.write_all(json.as_bytes()).await?;
        self.stdin.write_all(b"\n").await?;
        self.stdin.flush().await?;

        loop {
            let line = self.lines.next_line().await?.ok_or_else(|| {
                ExecutionError::ContextDestroyed("driver process exited".into())
            })?;
            if line.trim().is_empty() {
                continue;
            }

            let response: DriverResponse = serde_json::from_str(line.trim())?;
            if response.id == Some(request.id()) {
                return Ok(response);
            }
            debug!(expected = request.id(), got = ?response.id, "discarding stale driver response");
        }
    }

    /// Send a request and verify it succeeded.
    async fn send_ok(&mut self, request: DriverRequest, command: &str) -> Result<DriverResponse, ExecutionError> {
        let response = self.send(&request).await?;
        if !response.ok {
            return Err(response.into_error(command));
        }
        Ok(response)
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub async fn navigate(&mut self, url: &str) -> Result<(), ExecutionError> {
        let id = self.take_id();
        let response = self.send_ok(DriverRequest::navigate(id, url), "navigate").await?;
        debug!(requested = url, landed = ?response.url, "navigated");
        Ok(())
    }

    /// Evaluate `expression` and return its by-value result.
    pub async fn evaluate(&mut self, expression: &str, options: &EvaluateOptions) -> Result<Value, ExecutionError> {
        let id = self.take_id();
        let response = self
            .send_ok(DriverRequest::evaluate(id, expression, options), "evaluate")
            .await?;
        Ok(response.data.unwrap_or(Value::Null))
    }

    /// Close the browser and wait for the driver to exit.
    pub async fn quit(mut self) -> Result<(), ExecutionError> {
        let id = self.take_id();
        if let Err(e) = self.send(&DriverRequest::quit(id)).await {
            warn!(error = %e, "driver did not acknowledge quit");
        }
        self.child.wait().await?;
        Ok(())
    }
}

/// Read the driver's first line and check it is the ready signal.
///
/// Browser startup can hang, so the wait is bounded by `within`.
pub async fn await_ready<R>(lines: &mut Lines<R>, within: Duration) -> Result<(), ExecutionError>
where
    R: AsyncBufRead + Unpin,
{
    let line = match tokio::time::timeout(within, lines.next_line()).await {
        Ok(line) => line?.ok_or_else(|| {
            ExecutionError::DriverUnavailable("driver exited before signalling ready".into())
        })?,
        Err(_) => {
            let after_ms = within.as_millis() as u64;
            warn!(after_ms, "driver did not signal ready in time");
            return Err(ExecutionError::DriverUnavailable(format!(
                "no ready signal from driver after {} ms",
                after_ms
            )));
        }
    };
    let response: DriverResponse = serde_json::from_str(line.trim())?;
    if !response.ok || response.ready != Some(true) {
        return Err(ExecutionError::DriverUnavailable(
            response
                .error
                .unwrap_or_else(|| "did not receive ready signal from driver".into()),
        ));
    }
    Ok(())
}

#[async_trait]
impl EvaluationContext for PlaywrightSession {
    async fn evaluate_async(
        &mut self,
        expression: &str,
        options: &EvaluateOptions,
    ) -> Result<Value, ExecutionError> {
        self.evaluate(expression, options).await
    }
}
