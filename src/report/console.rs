use crate::form::form_model::FormRecord;
use crate::report::report_model::FormSnapshotReport;

// ============================================================================
// Console reporter: formatted terminal output
// ============================================================================

/// Format a form snapshot for terminal output.
///
/// Produces output like:
/// ```text
/// === Form Snapshot: https://example.com/login ===
///
/// INPUT     id=email name=email          -> login
/// INPUT     name=q                       -> ? 1,HTML,1,BODY
///
/// --- Owners ---
/// ✓ login (1 control)
/// ? 1,HTML,1,BODY (1 control)
///
/// === 2 controls, 1 identified, 2 owners ===
/// ```
pub fn format_console_report(report: &FormSnapshotReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Form Snapshot: {} ===\n\n", report.source));

    if report.records.is_empty() {
        out.push_str("(no form controls found)\n");
    }

    for record in &report.records {
        out.push_str(&format!(
            "{:<9} {:<28} -> {}\n",
            record.element_type,
            describe_attributes(record),
            describe_owner(record.parent_form.as_deref(), record.parent_form_identified)
        ));
    }

    if !report.owners.is_empty() {
        out.push_str("\n--- Owners ---\n");
        for owner in &report.owners {
            let marker = if owner.identified { "\u{2713}" } else { "?" };
            let noun = if owner.controls == 1 { "control" } else { "controls" };
            out.push_str(&format!(
                "{} {} ({} {})\n",
                marker,
                owner.label.as_deref().unwrap_or("(none)"),
                owner.controls,
                noun
            ));
        }
    }

    out.push_str(&format!(
        "\n=== {} controls, {} identified, {} owners",
        report.total,
        report.identified,
        report.owners.len()
    ));

    if let Some(ms) = report.duration_ms {
        let secs = ms as f64 / 1000.0;
        out.push_str(&format!(" in {:.1}s", secs));
    }

    out.push_str(" ===\n");

    out
}

fn describe_attributes(record: &FormRecord) -> String {
    let pairs = [
        ("id", &record.id),
        ("name", &record.name),
        ("for", &record.for_id),
        ("autocomplete", &record.autocomplete),
    ];

    pairs
        .iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| format!("{}={}", key, v)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn describe_owner(label: Option<&str>, identified: bool) -> String {
    match (label, identified) {
        (Some(l), true) => l.to_string(),
        (Some(l), false) => format!("? {}", l),
        (None, _) => "(none)".to_string(),
    }
}
