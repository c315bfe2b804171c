use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use form_snapshot::browser::context::{EvaluateOptions, EvaluationContext};
use form_snapshot::browser::error::ExecutionError;
use form_snapshot::gather::form_elements::{FormElements, decode_records, fetch_form_elements};
use form_snapshot::gather::gatherer::{Gatherer, PassContext, PassSettings};

// =========================================================================
// Fake execution contexts
// =========================================================================

/// Returns a canned value and remembers what it was asked to evaluate.
struct CannedContext {
    reply: Value,
    calls: Vec<(String, EvaluateOptions)>,
}

impl CannedContext {
    fn new(reply: Value) -> Self {
        Self { reply, calls: vec![] }
    }
}

#[async_trait]
impl EvaluationContext for CannedContext {
    async fn evaluate_async(&mut self, expression: &str, options: &EvaluateOptions) -> Result<Value, ExecutionError> {
        self.calls.push((expression.to_string(), options.clone()));
        Ok(self.reply.clone())
    }
}

/// Rejects every evaluation as if the page had navigated away.
struct DestroyedContext;

#[async_trait]
impl EvaluationContext for DestroyedContext {
    async fn evaluate_async(&mut self, _expression: &str, _options: &EvaluateOptions) -> Result<Value, ExecutionError> {
        Err(ExecutionError::ContextDestroyed("Execution context was destroyed".into()))
    }
}

/// Never answers.
struct HangingContext;

#[async_trait]
impl EvaluationContext for HangingContext {
    async fn evaluate_async(&mut self, _expression: &str, _options: &EvaluateOptions) -> Result<Value, ExecutionError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(json!([]))
    }
}

fn two_records() -> Value {
    json!([
        {
            "id": "email",
            "elementType": "INPUT",
            "name": "email",
            "parentForm": "login",
            "parentFormIdentified": true,
            "placeHolder": null,
            "autocomplete": "username",
            "for": null
        },
        {
            "id": null,
            "elementType": "LABEL",
            "name": null,
            "parentForm": "1,HTML,1,BODY",
            "parentFormIdentified": false,
            "placeHolder": null,
            "autocomplete": null,
            "for": "email"
        }
    ])
}

// =========================================================================
// Successful pass
// =========================================================================

#[tokio::test]
async fn fetch_decodes_records_in_order() {
    let mut ctx = CannedContext::new(two_records());
    let records = fetch_form_elements(&mut ctx, &PassSettings::default()).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].element_type, "INPUT");
    assert_eq!(records[0].parent_form.as_deref(), Some("login"));
    assert!(records[0].parent_form_identified);
    assert_eq!(records[0].place_holder, None);
    assert_eq!(records[1].for_id.as_deref(), Some("email"));
    assert!(!records[1].parent_form_identified);
}

#[tokio::test]
async fn fetch_ships_one_self_contained_isolated_unit() {
    let mut ctx = CannedContext::new(json!([]));
    fetch_form_elements(&mut ctx, &PassSettings::default()).await.unwrap();

    assert_eq!(ctx.calls.len(), 1, "exactly one evaluation, no retry");
    let (expression, options) = &ctx.calls[0];
    assert!(options.use_isolation);
    for helper in ["getElementsInDocument", "getNodePath", "getOuterHTMLSnippet", "isPositionFixed", "getParentForm"] {
        assert!(expression.contains(&format!("function {}(", helper)), "missing {}", helper);
    }
    assert!(expression.contains("__failedInBrowser"));
}

#[tokio::test]
async fn after_pass_uses_pass_settings() {
    let mut ctx = CannedContext::new(two_records());
    let settings = PassSettings {
        use_isolation: false,
        timeout: Duration::from_secs(5),
    };

    let records = {
        let mut pass = PassContext::new(&mut ctx)
            .with_url("https://example.com/login")
            .with_settings(settings);
        FormElements.after_pass(&mut pass).await.unwrap()
    };

    assert_eq!(records.len(), 2);
    assert!(!ctx.calls[0].1.use_isolation);
    assert_eq!(FormElements.name(), "FormElements");
}

#[tokio::test]
async fn empty_page_yields_empty_artifact() {
    let mut ctx = CannedContext::new(json!([]));
    let records = fetch_form_elements(&mut ctx, &PassSettings::default()).await.unwrap();
    assert!(records.is_empty());
}

// =========================================================================
// Failure propagation
// =========================================================================

#[tokio::test]
async fn rejected_evaluation_fails_the_pass() {
    let result = fetch_form_elements(&mut DestroyedContext, &PassSettings::default()).await;
    assert!(matches!(result, Err(ExecutionError::ContextDestroyed(_))));
}

#[tokio::test]
async fn in_page_exception_becomes_evaluation_error() {
    let mut ctx = CannedContext::new(json!({
        "__failedInBrowser": true,
        "name": "ReferenceError",
        "message": "getNodePath is not defined",
        "stack": "ReferenceError: getNodePath is not defined\n    at getParentForm"
    }));

    match fetch_form_elements(&mut ctx, &PassSettings::default()).await {
        Err(ExecutionError::Evaluation { name, message }) => {
            assert_eq!(name, "ReferenceError");
            assert_eq!(message, "getNodePath is not defined");
        }
        other => panic!("expected Evaluation error, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn slow_context_times_out() {
    let settings = PassSettings {
        use_isolation: true,
        timeout: Duration::from_millis(250),
    };

    let result = fetch_form_elements(&mut HangingContext, &settings).await;
    assert!(matches!(result, Err(ExecutionError::Timeout { after_ms: 250 })));
}

#[tokio::test]
async fn malformed_payload_delivers_no_records() {
    let mut ctx = CannedContext::new(json!({ "records": [] }));
    let result = fetch_form_elements(&mut ctx, &PassSettings::default()).await;
    assert!(matches!(result, Err(ExecutionError::MalformedPayload(_))));
}

// =========================================================================
// Payload decoding
// =========================================================================

#[test]
fn decode_rejects_non_arrays() {
    for value in [Value::Null, json!("[]"), json!(3), json!({ "elementType": "INPUT" })] {
        assert!(
            matches!(decode_records(value.clone()), Err(ExecutionError::MalformedPayload(_))),
            "{} must be rejected",
            value
        );
    }
}

#[test]
fn decode_rejects_one_bad_element() {
    let mut payload = two_records();
    payload.as_array_mut().unwrap().push(json!("INPUT"));

    match decode_records(payload) {
        Err(ExecutionError::MalformedPayload(message)) => assert!(message.contains("record 2")),
        other => panic!("expected MalformedPayload, got {:?}", other),
    }
}

#[test]
fn decode_requires_element_type_and_flag() {
    let missing_type = json!([{ "parentFormIdentified": false }]);
    let missing_flag = json!([{ "elementType": "INPUT" }]);
    let wrong_flag = json!([{ "elementType": "INPUT", "parentFormIdentified": "yes" }]);

    for payload in [missing_type, missing_flag, wrong_flag] {
        assert!(matches!(decode_records(payload), Err(ExecutionError::MalformedPayload(_))));
    }
}

#[test]
fn decode_rejects_unknown_keys() {
    let payload = json!([{ "elementType": "INPUT", "parentFormIdentified": false, "value": "secret" }]);
    assert!(matches!(decode_records(payload), Err(ExecutionError::MalformedPayload(_))));
}

#[test]
fn decode_accepts_missing_optional_keys() {
    let payload = json!([{ "elementType": "SELECT", "parentFormIdentified": false }]);
    let records = decode_records(payload).unwrap();

    assert_eq!(records[0].element_type, "SELECT");
    assert_eq!(records[0].id, None);
    assert_eq!(records[0].parent_form, None);
}
