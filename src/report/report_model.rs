use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::form::form_model::FormRecord;

// ============================================================================
// Form snapshot report: aggregates one pass worth of FormRecords
// ============================================================================

/// How many controls resolved to one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSummary {
    /// Form id/name, structural path, or `None` when nothing was resolved
    pub label: Option<String>,

    pub identified: bool,

    pub controls: usize,
}

/// Snapshot of all form controls from one source (a URL or a snapshot file).
///
/// Built with `from_records()`. Consumed by the console reporter and the
/// JSON/YAML outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSnapshotReport {
    pub source: String,

    /// Total number of controls
    pub total: usize,

    /// Controls whose owner was identified by id or name
    pub identified: usize,

    /// Owners in order of first appearance
    pub owners: Vec<OwnerSummary>,

    /// SHA-1 over the serialized records; equal snapshots share it
    pub fingerprint: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub records: Vec<FormRecord>,
}

impl FormSnapshotReport {
    pub fn from_records(source: &str, records: Vec<FormRecord>) -> Self {
        let total = records.len();
        let identified = records.iter().filter(|r| r.parent_form_identified).count();

        Self {
            source: source.to_string(),
            total,
            identified,
            owners: summarize_owners(&records),
            fingerprint: snapshot_fingerprint(&records),
            duration_ms: None,
            records,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    /// Controls whose owner is only a structural path (or nothing at all).
    pub fn positional(&self) -> usize {
        self.total - self.identified
    }
}

fn summarize_owners(records: &[FormRecord]) -> Vec<OwnerSummary> {
    let mut owners: Vec<OwnerSummary> = Vec::new();
    let mut index: HashMap<(Option<&str>, bool), usize> = HashMap::new();

    for record in records {
        let key = (record.parent_form.as_deref(), record.parent_form_identified);
        match index.get(&key) {
            Some(&i) => owners[i].controls += 1,
            None => {
                index.insert(key, owners.len());
                owners.push(OwnerSummary {
                    label: record.parent_form.clone(),
                    identified: record.parent_form_identified,
                    controls: 1,
                });
            }
        }
    }

    owners
}

/// Stable fingerprint of a record sequence, for diffing snapshots across runs.
pub fn snapshot_fingerprint(records: &[FormRecord]) -> String {
    use sha1::{Digest, Sha1};

    let canonical = serde_json::to_vec(records).unwrap_or_default();
    let mut hasher = Sha1::new();
    hasher.update(&canonical);
    format!("{:x}", hasher.finalize())
}
