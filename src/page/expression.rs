use crate::browser::error::ExecutionError;
use crate::page::page_functions::{COLLECT_FORM_ELEMENTS, FORM_ELEMENTS_HELPERS, PageFunction};

/// Key set on the value an in-page exception resolves to.
pub const FAILED_IN_BROWSER_KEY: &str = "__failedInBrowser";

// ============================================================================
// Page script assembly
// ============================================================================

/// A self-contained unit of JavaScript: one entry function plus every helper
/// it needs, closed over by textual inclusion.
///
/// The page starts with no shared code, so anything the entry references must
/// be in `helpers`. [`PageScript::build`] refuses to assemble a unit whose
/// declared dependencies are not all present.
#[derive(Debug, Clone)]
pub struct PageScript {
    entry: PageFunction,
    helpers: Vec<PageFunction>,
}

impl PageScript {
    pub fn new(entry: PageFunction) -> Self {
        Self {
            entry,
            helpers: Vec::new(),
        }
    }

    /// Add a helper. Adding the same name twice (or the entry) is a no-op.
    pub fn with(mut self, helper: PageFunction) -> Self {
        if helper.name != self.entry.name && !self.helpers.iter().any(|h| h.name == helper.name) {
            self.helpers.push(helper);
        }
        self
    }

    pub fn with_all(self, helpers: &[PageFunction]) -> Self {
        helpers.iter().fold(self, |script, h| script.with(*h))
    }

    pub fn helper_names(&self) -> Vec<&'static str> {
        self.helpers.iter().map(|h| h.name).collect()
    }

    /// Assemble the unit as an immediately-invoked expression:
    ///
    /// ```text
    /// (() => {
    ///   function helperA() { ... };
    ///   function helperB() { ... };
    ///   return (function entry() { ... })();
    /// })()
    /// ```
    pub fn build(&self) -> Result<String, ExecutionError> {
        self.check_closure()?;

        let mut out = String::from("(() => {\n");
        for helper in &self.helpers {
            out.push_str(helper.source.trim_end());
            out.push_str(";\n");
        }
        out.push_str("return (");
        out.push_str(self.entry.source.trim_end());
        out.push_str(")();\n})()");
        Ok(out)
    }

    fn check_closure(&self) -> Result<(), ExecutionError> {
        let included = |name: &str| self.helpers.iter().any(|h| h.name == name);

        for function in std::iter::once(&self.entry).chain(self.helpers.iter()) {
            if let Some(missing) = function.dependencies.iter().find(|d| !included(**d)) {
                return Err(ExecutionError::Assembly(format!(
                    "{} depends on {}, which is not included in the unit",
                    function.name, missing
                )));
            }
        }
        Ok(())
    }
}

/// The unit that collects every form control on the page.
pub fn form_elements_script() -> PageScript {
    PageScript::new(COLLECT_FORM_ELEMENTS).with_all(&FORM_ELEMENTS_HELPERS)
}

// ============================================================================
// Error boundary
// ============================================================================

/// Wrap an expression so an exception thrown in the page resolves to a plain
/// `{ __failedInBrowser: true, name, message, stack }` object instead of
/// rejecting. The page's own `Promise` may be monkey-patched, so the wrapper
/// prefers a saved native one when present.
pub fn wrap_in_error_boundary(expression: &str) -> String {
    format!(
        r#"(() => {{
  const __nativePromise = window.__nativePromise || Promise;
  return new __nativePromise(resolve => {{
    __nativePromise.resolve()
      .then(() => {expression})
      .catch(err => ({{
        {key}: true,
        name: (err && err.name) || 'Error',
        message: (err && err.message) || String(err),
        stack: err && err.stack,
      }}))
      .then(resolve);
  }});
}})()"#,
        expression = expression,
        key = FAILED_IN_BROWSER_KEY,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::page_functions::{GET_NODE_PATH, GET_PARENT_FORM};

    #[test]
    fn entry_is_not_duplicated_as_helper() {
        let script = PageScript::new(GET_NODE_PATH).with(GET_NODE_PATH);
        assert!(script.helper_names().is_empty());
    }

    #[test]
    fn helper_dependencies_are_checked_too() {
        let err = PageScript::new(GET_NODE_PATH)
            .with(GET_PARENT_FORM)
            .build()
            .unwrap_err();
        assert!(matches!(err, ExecutionError::Assembly(ref m) if m.contains("getParentForm")));
    }
}
