use std::{fmt::Display, fs, path::Path};

use serde_json::Value;

use crate::plan::PlanNode;

/// Problems turning raw `EXPLAIN` output into a plan tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ExplainError {
    /// The text was not valid JSON, or a plan field had the wrong shape.
    Json(String),
    /// The JSON was valid but not shaped like `EXPLAIN (FORMAT JSON)` output.
    Envelope(String),
    /// The file behind a path could not be read.
    Io(String),
}

impl Display for ExplainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExplainError::Json(message) => write!(f, "invalid plan JSON: {}", message),
            ExplainError::Envelope(message) => write!(f, "unexpected EXPLAIN envelope: {}", message),
            ExplainError::Io(message) => write!(f, "failed to read plan file: {}", message),
        }
    }
}

/// Parsed `EXPLAIN (FORMAT JSON)` output, reduced to the root plan node.
///
/// Postgres wraps the plan in a one-element array holding an object with a
/// `"Plan"` key. `from_value` unwraps that envelope and also accepts the two
/// partially unwrapped forms (`{"Plan": ...}` and the bare node object), so
/// plans copied out of psql, logs or driver results all load the same way.
#[derive(Debug, Clone)]
pub struct ExplainOutput {
    pub plan: PlanNode,
}

impl ExplainOutput {
    pub fn from_value(value: Value) -> Result<ExplainOutput, ExplainError> {
        let root = match value {
            Value::Array(mut items) => {
                if items.is_empty() {
                    return Err(ExplainError::Envelope("empty result array".to_string()));
                }
                items.remove(0)
            }
            other => other,
        };

        let node_value = match root {
            Value::Object(mut map) => match map.remove("Plan") {
                Some(plan) => plan,
                None if map.contains_key("Node Type") => Value::Object(map),
                None => {
                    return Err(ExplainError::Envelope(
                        "object has neither a \"Plan\" nor a \"Node Type\" key".to_string(),
                    ));
                }
            },
            _ => {
                return Err(ExplainError::Envelope(
                    "expected a JSON object or an array of objects".to_string(),
                ));
            }
        };

        let plan: PlanNode =
            serde_json::from_value(node_value).map_err(|error| ExplainError::Json(error.to_string()))?;

        Ok(ExplainOutput { plan })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<ExplainOutput, ExplainError> {
        let text = fs::read_to_string(path).map_err(|error| ExplainError::Io(error.to_string()))?;
        ExplainOutput::try_from(text.as_str())
    }

    /// Estimated total cost of the whole plan, when the root node carried one.
    pub fn total_cost(&self) -> Option<serde_json::Number> {
        self.plan.total_cost.clone()
    }
}

impl TryFrom<&str> for ExplainOutput {
    type Error = ExplainError;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        let value: Value =
            serde_json::from_str(text).map_err(|error| ExplainError::Json(error.to_string()))?;
        ExplainOutput::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::{ExplainError, ExplainOutput};

    #[test]
    pub fn test_from_value_unwraps_postgres_envelope() {
        let value = json!([{
            "Plan": {
                "Node Type": "Seq Scan",
                "Relation Name": "customer",
                "Alias": "customer",
                "Total Cost": 61.0
            },
            "Planning Time": 0.062
        }]);

        let output = ExplainOutput::from_value(value).expect("Failed to parse the envelope");

        assert_eq!(output.plan.node_type, "Seq Scan");
        assert_eq!(output.total_cost().map(|cost| cost.to_string()), Some("61.0".to_string()));
    }

    #[test]
    pub fn test_from_value_accepts_plan_object() {
        let value = json!({
            "Plan": { "Node Type": "Result" }
        });

        let output = ExplainOutput::from_value(value).expect("Failed to parse the plan object");

        assert_eq!(output.plan.node_type, "Result");
    }

    #[test]
    pub fn test_from_value_accepts_bare_node() {
        let value = json!({ "Node Type": "Limit", "Plans": [{ "Node Type": "Sort" }] });

        let output = ExplainOutput::from_value(value).expect("Failed to parse the bare node");

        assert_eq!(output.plan.plans.len(), 1);
    }

    #[test]
    pub fn test_from_value_rejects_empty_array() {
        let error = ExplainOutput::from_value(json!([])).expect_err("Expected an envelope error");

        assert_eq!(error, ExplainError::Envelope("empty result array".to_string()));
    }

    #[test]
    pub fn test_from_value_rejects_foreign_objects() {
        let error = ExplainOutput::from_value(json!({ "rows": 10 }))
            .expect_err("Expected an envelope error");

        assert!(matches!(error, ExplainError::Envelope(_)));
    }

    #[test]
    pub fn test_try_from_rejects_invalid_json() {
        let error = ExplainOutput::try_from("not json").expect_err("Expected a JSON error");

        assert!(matches!(error, ExplainError::Json(_)));
    }

    #[test]
    pub fn test_from_file_reads_explain_dump() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create the temp file");
        let text = r#"[{ "Plan": { "Node Type": "Seq Scan", "Relation Name": "orders", "Alias": "orders" } }]"#;
        file.write_all(text.as_bytes()).expect("Failed to write the plan file");

        let output = ExplainOutput::from_file(file.path()).expect("Failed to load the plan file");

        assert_eq!(output.plan.relation_name.as_deref(), Some("orders"));
    }

    #[test]
    pub fn test_from_file_reports_missing_file() {
        let error = ExplainOutput::from_file("/no/such/plan.json")
            .expect_err("Expected an io error");

        assert!(matches!(error, ExplainError::Io(_)));
    }
}
