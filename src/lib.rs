use std::time::Instant;

use crate::{
    browser::{error::ExecutionError, session::PlaywrightSession},
    document::dom::{DocumentHandle, EnumerationError},
    form::collector::collect,
    gather::{
        form_elements::FormElements,
        gatherer::{Gatherer, PassContext, PassSettings},
    },
    report::report_model::FormSnapshotReport,
};

pub mod browser;
pub mod cli;
pub mod document;
pub mod form;
pub mod gather;
pub mod page;
pub mod report;
pub mod trace;

/// Navigate `session` to `url` and run one form-elements pass against it.
pub async fn snapshot_page(
    session: &mut PlaywrightSession,
    url: &str,
    settings: &PassSettings,
) -> Result<FormSnapshotReport, ExecutionError> {
    session.navigate(url).await?;

    let started = Instant::now();
    let mut pass = PassContext::new(session)
        .with_url(url)
        .with_settings(settings.clone());
    let records = FormElements.after_pass(&mut pass).await?;

    Ok(FormSnapshotReport::from_records(url, records).with_duration(started.elapsed().as_millis()))
}

/// Run the collector in-process over an already available document.
pub fn snapshot_document<D: DocumentHandle + ?Sized>(
    doc: &D,
    source: &str,
) -> Result<FormSnapshotReport, EnumerationError> {
    let started = Instant::now();
    let records = collect(doc)?;
    Ok(FormSnapshotReport::from_records(source, records).with_duration(started.elapsed().as_millis()))
}
