use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::report::report_model::FormSnapshotReport;

/// One line of the gather audit trail.
#[derive(Debug, Serialize)]
pub struct GatherEvent {
    pub timestamp_ms: u128,

    pub gatherer: String,
    pub source: String,

    pub records: Option<usize>,
    pub identified: Option<usize>,
    pub owners: Option<usize>,
    pub fingerprint: Option<String>,

    pub duration_ms: Option<u128>,
    pub error: Option<String>,
}

impl GatherEvent {
    pub fn now(gatherer: &str, source: &str) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or(0),
            gatherer: gatherer.to_string(),
            source: source.to_string(),
            records: None,
            identified: None,
            owners: None,
            fingerprint: None,
            duration_ms: None,
            error: None,
        }
    }

    pub fn with_report(mut self, report: &FormSnapshotReport) -> Self {
        self.records = Some(report.total);
        self.identified = Some(report.identified);
        self.owners = Some(report.owners.len());
        self.fingerprint = Some(report.fingerprint.clone());
        self.duration_ms = report.duration_ms;
        self
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.error = Some(error.to_string());
        self
    }
}
