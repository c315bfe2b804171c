use tracing::{info, warn};

use crate::browser::session::{PlaywrightSession, SessionConfig};
use crate::document::tree::DocumentTree;
use crate::gather::gatherer::PassSettings;
use crate::page::expression::{form_elements_script, wrap_in_error_boundary};
use crate::report::console::format_console_report;
use crate::report::report_model::FormSnapshotReport;
use crate::trace::logger::TraceLogger;
use crate::trace::trace::GatherEvent;
use crate::{snapshot_document, snapshot_page};

// ============================================================================
// collect subcommand
// ============================================================================

pub async fn cmd_collect(
    url: &str,
    format: &str,
    output: Option<&str>,
    session_config: &SessionConfig,
    settings: &PassSettings,
    tracer: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(url, isolation = settings.use_isolation, "collecting form elements");

    let mut session = PlaywrightSession::launch(session_config).await?;
    let result = snapshot_page(&mut session, url, settings).await;
    if let Err(e) = session.quit().await {
        warn!(error = %e, "browser driver did not shut down cleanly");
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            tracer.log(&GatherEvent::now("FormElements", url).with_error(&e));
            return Err(e.into());
        }
    };
    tracer.log(&GatherEvent::now("FormElements", url).with_report(&report));

    write_output(&render(&report, format)?, output)
}

// ============================================================================
// offline subcommand
// ============================================================================

pub fn cmd_offline(
    snapshot_path: &str,
    format: &str,
    output: Option<&str>,
    tracer: &TraceLogger,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(snapshot_path)?;
    let tree = DocumentTree::from_json(&content)?;

    let report = match snapshot_document(&tree, snapshot_path) {
        Ok(report) => report,
        Err(e) => {
            tracer.log(&GatherEvent::now("FormElements", snapshot_path).with_error(&e));
            return Err(e.into());
        }
    };
    tracer.log(&GatherEvent::now("FormElements", snapshot_path).with_report(&report));

    write_output(&render(&report, format)?, output)
}

// ============================================================================
// script subcommand
// ============================================================================

/// The exact expression `collect` sends to the page.
pub fn cmd_script(raw: bool) -> Result<String, Box<dyn std::error::Error>> {
    let unit = form_elements_script().build()?;
    Ok(if raw { unit } else { wrap_in_error_boundary(&unit) })
}

// ============================================================================
// Helpers
// ============================================================================

/// Render a report. `json` emits just the record array (the artifact),
/// `report` and `yaml` the whole report, anything else the console view.
pub fn render(report: &FormSnapshotReport, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    let rendered = match format {
        "json" => format!("{}\n", serde_json::to_string_pretty(&report.records)?),
        "report" => format!("{}\n", serde_json::to_string_pretty(report)?),
        "yaml" => serde_yaml::to_string(report)?,
        _ => format_console_report(report),
    };
    Ok(rendered)
}

fn write_output(content: &str, output: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{}", content),
    }
    Ok(())
}
