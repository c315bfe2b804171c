use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::browser::context::EvaluationContext;
use crate::browser::error::ExecutionError;
use crate::form::form_model::FormRecord;
use crate::gather::gatherer::{Gatherer, PassContext, PassSettings};
use crate::page::expression::{FAILED_IN_BROWSER_KEY, form_elements_script, wrap_in_error_boundary};

/// Gathers a [`FormRecord`] for every input, select, textarea and label on the
/// loaded page.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormElements;

#[async_trait]
impl Gatherer for FormElements {
    type Artifact = Vec<FormRecord>;

    fn name(&self) -> &'static str {
        "FormElements"
    }

    async fn after_pass(&self, pass: &mut PassContext<'_>) -> Result<Vec<FormRecord>, ExecutionError> {
        debug!(gatherer = self.name(), url = ?pass.url, "after pass");
        let settings = pass.settings.clone();
        fetch_form_elements(&mut *pass.driver, &settings).await
    }
}

/// Ship the form collector into `driver`, run it once and decode the result.
///
/// One attempt, no retry. Any failure (assembly, evaluation, timeout,
/// malformed payload) fails the whole batch.
pub async fn fetch_form_elements(
    driver: &mut dyn EvaluationContext,
    settings: &PassSettings,
) -> Result<Vec<FormRecord>, ExecutionError> {
    let expression = wrap_in_error_boundary(&form_elements_script().build()?);
    let options = settings.evaluate_options();
    let started = Instant::now();

    let evaluation = tokio::time::timeout(settings.timeout, driver.evaluate_async(&expression, &options)).await;
    let value = match evaluation {
        Ok(result) => result?,
        Err(_) => {
            let after_ms = settings.timeout.as_millis() as u64;
            warn!(after_ms, "form element collection timed out");
            return Err(ExecutionError::Timeout { after_ms });
        }
    };

    let records = decode_records(value)?;
    info!(
        records = records.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "collected form elements"
    );
    Ok(records)
}

/// Decode the value returned from the page.
///
/// Accepts only an array of objects with the eight record keys; anything else,
/// including a single bad element, rejects the whole payload.
pub fn decode_records(value: Value) -> Result<Vec<FormRecord>, ExecutionError> {
    if let Some(failure) = in_page_failure(&value) {
        return Err(failure);
    }

    let Value::Array(items) = value else {
        return Err(ExecutionError::MalformedPayload(format!(
            "expected an array of records, got {}",
            json_type(&value)
        )));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            if !item.is_object() {
                return Err(ExecutionError::MalformedPayload(format!(
                    "record {} is {}, not an object",
                    i,
                    json_type(&item)
                )));
            }
            serde_json::from_value::<FormRecord>(item)
                .map_err(|e| ExecutionError::MalformedPayload(format!("record {}: {}", i, e)))
        })
        .collect()
}

fn in_page_failure(value: &Value) -> Option<ExecutionError> {
    let obj = value.as_object()?;
    if obj.get(FAILED_IN_BROWSER_KEY).and_then(Value::as_bool) != Some(true) {
        return None;
    }

    let field = |key: &str, fallback: &str| {
        obj.get(key)
            .and_then(Value::as_str)
            .unwrap_or(fallback)
            .to_string()
    };
    Some(ExecutionError::Evaluation {
        name: field("name", "Error"),
        message: field("message", "unknown error"),
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
