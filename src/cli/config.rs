use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::browser::session::SessionConfig;
use crate::gather::gatherer::PassSettings;
use crate::trace::logger::TraceLogger;

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "form-snapshot",
    version,
    about = "Snapshot form controls and their owning forms from a rendered page"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: form-snapshot.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Node.js executable used to run the browser driver
    #[arg(long, global = true)]
    pub node_path: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a page in a browser and collect its form controls
    Collect {
        /// URL of the page to audit
        #[arg(long)]
        url: String,

        /// Output format: json, report, yaml, console
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,

        /// Evaluate in the page's main world instead of a fresh isolated world
        #[arg(long)]
        no_isolation: bool,

        /// Evaluation timeout in milliseconds
        #[arg(long)]
        timeout_ms: Option<u64>,

        /// Show the browser window
        #[arg(long)]
        headed: bool,
    },

    /// Collect form controls from a DOM snapshot JSON file
    Offline {
        /// Path to the snapshot (nested {nodeName, attributes, children, text} nodes)
        #[arg(long)]
        snapshot: String,

        /// Output format: json, report, yaml, console
        #[arg(long)]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Print the JavaScript unit shipped into the page
    Script {
        /// Omit the in-page error boundary
        #[arg(long)]
        raw: bool,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `form-snapshot.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub trace: TraceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_node")]
    pub node_path: String,

    #[serde(default = "default_true")]
    pub headless: bool,

    /// Where the driver script is written; see `SessionConfig::driver_dir`
    pub driver_dir: Option<String>,

    #[serde(default = "default_timeout_ms")]
    pub evaluate_timeout_ms: u64,

    /// How long to wait for the browser to start
    #[serde(default = "default_timeout_ms")]
    pub startup_timeout_ms: u64,

    #[serde(default = "default_true")]
    pub use_isolation: bool,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            node_path: "node".to_string(),
            headless: true,
            driver_dir: None,
            evaluate_timeout_ms: 30_000,
            startup_timeout_ms: 30_000,
            use_isolation: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_json")]
    pub format: String,

    pub output: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            output: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_trace_path")]
    pub path: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "form_snapshot_trace.jsonl".to_string(),
        }
    }
}

// Serde default helpers
fn default_node() -> String { "node".to_string() }
fn default_true() -> bool { true }
fn default_timeout_ms() -> u64 { 30_000 }
fn default_json() -> String { "json".to_string() }
fn default_trace_path() -> String { "form_snapshot_trace.jsonl".to_string() }

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("form-snapshot.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            warn!(path = config_path, error = %e, "malformed config file, using defaults");
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Build the driver launch config. CLI values win over the config file.
pub fn build_session_config(config: &BrowserConfig, node_path: Option<&str>, headed: bool) -> SessionConfig {
    SessionConfig {
        node_path: node_path.unwrap_or(&config.node_path).to_string(),
        headless: config.headless && !headed,
        driver_dir: config.driver_dir.as_ref().map(PathBuf::from),
        startup_timeout: Duration::from_millis(config.startup_timeout_ms),
    }
}

/// Open the gather trail. Only commands that gather call this, so nothing is
/// created on disk for the others.
pub fn build_tracer(config: &TraceConfig) -> TraceLogger {
    if config.enabled {
        TraceLogger::new(&config.path)
    } else {
        TraceLogger::disabled()
    }
}

/// Build per-pass evaluation settings. CLI values win over the config file.
pub fn build_pass_settings(config: &BrowserConfig, no_isolation: bool, timeout_ms: Option<u64>) -> PassSettings {
    PassSettings {
        use_isolation: config.use_isolation && !no_isolation,
        timeout: Duration::from_millis(timeout_ms.unwrap_or(config.evaluate_timeout_ms)),
    }
}
