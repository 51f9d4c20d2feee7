//! Hand-rolled schema checker for serialized captures.
//!
//! [`validate_capture`] never fails: it walks the parsed JSON in preorder
//! and accumulates path-qualified [`Issue`]s, enforcing the resource
//! ceilings in [`ValidationLimits`] as it goes. Unknown keys are tolerated
//! at every level (forward compatibility); unknown *values* in the closed
//! vocabularies are not.
//!
//! Issue collection saturates once more than [`MAX_ISSUES`] have
//! accumulated, so a pathological input cannot balloon the report.

use serde_json::Value;
use websketch_core::{is_supported_schema_version, Issue, Role, TextKind, ValidationLimits};

/// Issue count past which the validator stops collecting.
pub const MAX_ISSUES: usize = 100;

const NODE_COUNT_LIMIT_MARKER: &str = "exceeds maxNodes limit";
const DEPTH_LIMIT_MARKER: &str = "exceeds maxDepth limit";

/// True when `issue` reports an exceeded node-count or depth limit. The
/// strict parser uses this to classify failures as `WS_LIMIT_EXCEEDED`.
#[must_use]
pub fn is_limit_issue(issue: &Issue) -> bool {
    issue.message.contains(NODE_COUNT_LIMIT_MARKER) || issue.message.contains(DEPTH_LIMIT_MARKER)
}

/// Validate a parsed capture value against the schema and `limits`.
///
/// Returns every issue found, in detection order. An empty result means
/// the value deserializes cleanly into a `Capture`.
#[must_use]
pub fn validate_capture(value: &Value, limits: &ValidationLimits) -> Vec<Issue> {
    let mut walker = Walker {
        limits,
        issues: Vec::new(),
        node_count: 0,
    };
    walker.check_document(value);
    walker.issues
}

/// Compact rendering of a field's value for issue reports: JSON text for
/// scalars, a size tag for containers, `missing` when absent.
fn describe(value: Option<&Value>) -> String {
    match value {
        None => "missing".to_owned(),
        Some(Value::Array(items)) => format!("array({})", items.len()),
        Some(Value::Object(_)) => "object".to_owned(),
        Some(scalar) => scalar.to_string(),
    }
}

struct Walker<'a> {
    limits: &'a ValidationLimits,
    issues: Vec<Issue>,
    node_count: usize,
}

impl Walker<'_> {
    fn saturated(&self) -> bool {
        self.issues.len() > MAX_ISSUES
    }

    fn report(
        &mut self,
        path: impl Into<String>,
        expected: impl Into<String>,
        received: String,
        message: impl Into<String>,
    ) {
        if !self.saturated() {
            self.issues.push(Issue::new(path, expected, received, message));
        }
    }

    fn check_document(&mut self, value: &Value) {
        let Some(object) = value.as_object() else {
            self.report("$", "object", describe(Some(value)), "capture must be a JSON object");
            return;
        };

        match object.get("version") {
            Some(Value::String(version)) if is_supported_schema_version(version) => {}
            Some(Value::String(_)) | None => {
                self.report(
                    "version",
                    "\"0.1\"",
                    describe(object.get("version")),
                    "version must be a supported schema version",
                );
            }
            Some(other) => {
                self.report(
                    "version",
                    "string",
                    describe(Some(other)),
                    "version must be a string",
                );
            }
        }

        self.require_string(object.get("url"), "url");
        self.require_number(object.get("timestamp_ms"), "timestamp_ms");

        match object.get("viewport") {
            Some(Value::Object(viewport)) => {
                self.require_number(viewport.get("w_px"), "viewport.w_px");
                self.require_number(viewport.get("h_px"), "viewport.h_px");
                self.require_number(viewport.get("aspect"), "viewport.aspect");
            }
            other => {
                self.report(
                    "viewport",
                    "object",
                    describe(other),
                    "viewport must be an object",
                );
            }
        }

        match object.get("compiler") {
            Some(Value::Object(compiler)) => {
                self.require_string(compiler.get("name"), "compiler.name");
                self.require_string(compiler.get("version"), "compiler.version");
                self.require_string(compiler.get("options_hash"), "compiler.options_hash");
            }
            other => {
                self.report(
                    "compiler",
                    "object",
                    describe(other),
                    "compiler must be an object",
                );
            }
        }

        match object.get("root") {
            Some(root) => self.check_node(root, "root", 1),
            None => {
                self.report("root", "object", describe(None), "root node is required");
            }
        }
    }

    fn check_node(&mut self, value: &Value, path: &str, depth: usize) {
        if self.saturated() {
            return;
        }

        self.node_count += 1;
        if self.node_count > self.limits.max_nodes {
            self.report(
                path,
                format!("at most {} nodes", self.limits.max_nodes),
                self.node_count.to_string(),
                format!("node count {NODE_COUNT_LIMIT_MARKER} ({})", self.limits.max_nodes),
            );
            return;
        }
        if depth > self.limits.max_depth {
            self.report(
                path,
                format!("depth at most {}", self.limits.max_depth),
                depth.to_string(),
                format!("tree depth {DEPTH_LIMIT_MARKER} ({})", self.limits.max_depth),
            );
            return;
        }

        let Some(object) = value.as_object() else {
            self.report(path, "object", describe(Some(value)), "node must be a JSON object");
            return;
        };

        match object.get("role") {
            Some(Value::String(role)) if Role::parse(role).is_some() => {}
            Some(Value::String(_)) | None => {
                self.report(
                    format!("{path}.role"),
                    "a role tag (PAGE, NAV, ..., UNKNOWN)",
                    describe(object.get("role")),
                    "role must be a member of the closed role vocabulary",
                );
            }
            Some(other) => {
                self.report(
                    format!("{path}.role"),
                    "string",
                    describe(Some(other)),
                    "role must be a string",
                );
            }
        }

        match object.get("bbox") {
            Some(Value::Array(items)) => {
                if items.len() == 4 {
                    for (index, item) in items.iter().enumerate() {
                        if !item.is_number() {
                            self.report(
                                format!("{path}.bbox[{index}]"),
                                "number",
                                describe(Some(item)),
                                "bbox components must be numbers",
                            );
                        }
                    }
                } else {
                    self.report(
                        format!("{path}.bbox"),
                        "array of 4 numbers",
                        describe(object.get("bbox")),
                        "bbox must have exactly 4 elements",
                    );
                }
            }
            other => {
                self.report(
                    format!("{path}.bbox"),
                    "array of 4 numbers",
                    describe(other),
                    "bbox must be an array",
                );
            }
        }

        self.require_bool(object.get("interactive"), &format!("{path}.interactive"));
        self.require_bool(object.get("visible"), &format!("{path}.visible"));
        self.require_string(object.get("id"), &format!("{path}.id"));

        if let Some(text) = object.get("text") {
            match text.as_object() {
                Some(text_object) => {
                    match text_object.get("kind") {
                        Some(Value::String(kind)) if TextKind::parse(kind).is_some() => {}
                        Some(Value::String(_)) | None => {
                            self.report(
                                format!("{path}.text.kind"),
                                "none | short | sentence | paragraph | mixed",
                                describe(text_object.get("kind")),
                                "text.kind must be a known text kind",
                            );
                        }
                        Some(other) => {
                            self.report(
                                format!("{path}.text.kind"),
                                "string",
                                describe(Some(other)),
                                "text.kind must be a string",
                            );
                        }
                    }
                    if let Some(len) = text_object.get("len") {
                        if !len.as_u64().is_some_and(|v| v <= u64::from(u32::MAX)) {
                            self.report(
                                format!("{path}.text.len"),
                                "unsigned integer",
                                describe(Some(len)),
                                "text.len must be an unsigned integer",
                            );
                        }
                    }
                    self.optional_string(text_object.get("hash"), &format!("{path}.text.hash"));
                }
                None => {
                    self.report(
                        format!("{path}.text"),
                        "object",
                        describe(Some(text)),
                        "text must be an object",
                    );
                }
            }
        }

        self.optional_string(object.get("semantic"), &format!("{path}.semantic"));
        self.optional_string(object.get("name_hash"), &format!("{path}.name_hash"));
        self.optional_bool(object.get("enabled"), &format!("{path}.enabled"));
        self.optional_bool(object.get("focusable"), &format!("{path}.focusable"));

        if let Some(z) = object.get("z") {
            if !z.as_u64().is_some_and(|v| v <= 10) {
                self.report(
                    format!("{path}.z"),
                    "integer in 0..=10",
                    describe(Some(z)),
                    "z must be an integer z-bucket between 0 and 10",
                );
            }
        }

        if let Some(flags) = object.get("flags") {
            match flags.as_object() {
                Some(flag_object) => {
                    for key in ["sticky", "scrollable", "repeated"] {
                        self.optional_bool(
                            flag_object.get(key),
                            &format!("{path}.flags.{key}"),
                        );
                    }
                }
                None => {
                    self.report(
                        format!("{path}.flags"),
                        "object",
                        describe(Some(flags)),
                        "flags must be an object",
                    );
                }
            }
        }

        if let Some(children) = object.get("children") {
            match children.as_array() {
                Some(items) => {
                    for (index, child) in items.iter().enumerate() {
                        if self.saturated() {
                            return;
                        }
                        self.check_node(child, &format!("{path}.children[{index}]"), depth + 1);
                    }
                }
                None => {
                    self.report(
                        format!("{path}.children"),
                        "array",
                        describe(Some(children)),
                        "children must be an array",
                    );
                }
            }
        }
    }

    fn require_string(&mut self, value: Option<&Value>, path: &str) {
        if !matches!(value, Some(Value::String(_))) {
            self.report(
                path,
                "string",
                describe(value),
                format!("{path} must be a string"),
            );
        }
    }

    fn require_number(&mut self, value: Option<&Value>, path: &str) {
        if !value.is_some_and(Value::is_number) {
            self.report(
                path,
                "number",
                describe(value),
                format!("{path} must be a number"),
            );
        }
    }

    /// Optional fields may be absent, but a present value must type-check,
    /// or materialization into the typed model would fail after a clean
    /// validation pass.
    fn optional_string(&mut self, value: Option<&Value>, path: &str) {
        if let Some(value) = value {
            if !value.is_string() {
                self.report(
                    path,
                    "string",
                    describe(Some(value)),
                    format!("{path} must be a string when present"),
                );
            }
        }
    }

    fn optional_bool(&mut self, value: Option<&Value>, path: &str) {
        if let Some(value) = value {
            if !value.is_boolean() {
                self.report(
                    path,
                    "boolean",
                    describe(Some(value)),
                    format!("{path} must be a boolean when present"),
                );
            }
        }
    }

    fn require_bool(&mut self, value: Option<&Value>, path: &str) {
        if !matches!(value, Some(Value::Bool(_))) {
            self.report(
                path,
                "boolean",
                describe(value),
                format!("{path} must be a boolean"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn minimal_capture() -> Value {
        json!({
            "version": "0.1",
            "url": "https://example.com",
            "timestamp_ms": 1_700_000_000_000_i64,
            "viewport": { "w_px": 1920, "h_px": 1080, "aspect": 1.7777777777777777 },
            "compiler": { "name": "websketch-ir", "version": "0.2.1", "options_hash": "test" },
            "root": {
                "id": "",
                "role": "PAGE",
                "bbox": [0, 0, 1, 1],
                "interactive": false,
                "visible": true
            }
        })
    }

    #[test]
    fn minimal_capture_is_clean() {
        let issues = validate_capture(&minimal_capture(), &ValidationLimits::default());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn non_object_document() {
        let issues = validate_capture(&json!([1, 2, 3]), &ValidationLimits::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path, "$");
        assert_eq!(issues[0].received, "array(3)");
    }

    #[test]
    fn unsupported_version_reports_quoted_value() {
        let mut capture = minimal_capture();
        capture["version"] = json!("99.0");
        let issues = validate_capture(&capture, &ValidationLimits::default());
        let version = issues.iter().find(|i| i.path == "version").expect("version issue");
        assert_eq!(version.received, "\"99.0\"");
    }

    #[test]
    fn missing_version_is_reported() {
        let mut capture = minimal_capture();
        capture.as_object_mut().unwrap().remove("version");
        let issues = validate_capture(&capture, &ValidationLimits::default());
        let version = issues.iter().find(|i| i.path == "version").expect("version issue");
        assert_eq!(version.received, "missing");
    }

    #[test]
    fn non_string_version_is_a_type_issue() {
        let mut capture = minimal_capture();
        capture["version"] = json!(0.1);
        let issues = validate_capture(&capture, &ValidationLimits::default());
        let version = issues.iter().find(|i| i.path == "version").expect("version issue");
        assert_eq!(version.expected, "string");
    }

    #[test]
    fn viewport_fields_must_be_numeric() {
        let mut capture = minimal_capture();
        capture["viewport"]["w_px"] = json!("1920");
        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert!(issues.iter().any(|i| i.path == "viewport.w_px"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let mut capture = minimal_capture();
        capture["root"]["role"] = json!("WIDGET");
        let issues = validate_capture(&capture, &ValidationLimits::default());
        let role = issues.iter().find(|i| i.path == "root.role").expect("role issue");
        assert_eq!(role.received, "\"WIDGET\"");
    }

    #[test]
    fn bbox_arity_and_element_types() {
        let mut capture = minimal_capture();
        capture["root"]["bbox"] = json!([0, 0, 1]);
        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert!(issues.iter().any(|i| i.path == "root.bbox" && i.received == "array(3)"));

        let mut capture = minimal_capture();
        capture["root"]["bbox"] = json!([0, "0", 1, 1]);
        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert!(issues.iter().any(|i| i.path == "root.bbox[1]"));
    }

    #[test]
    fn child_issues_carry_indexed_paths() {
        let mut capture = minimal_capture();
        capture["root"]["children"] = json!([
            {
                "id": "",
                "role": "BUTTON",
                "bbox": [0, 0, 0.1, 0.05],
                "interactive": "yes",
                "visible": true
            }
        ]);
        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert!(issues.iter().any(|i| i.path == "root.children[0].interactive"));
    }

    #[test]
    fn text_kind_membership_is_enforced() {
        let mut capture = minimal_capture();
        capture["root"]["text"] = json!({ "kind": "shouting" });
        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert!(issues.iter().any(|i| i.path == "root.text.kind"));
    }

    #[test]
    fn present_optional_fields_must_type_check() {
        let mut capture = minimal_capture();
        capture["root"]["semantic"] = json!(42);
        capture["root"]["z"] = json!(99);
        capture["root"]["flags"] = json!({ "sticky": "yes" });
        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert!(issues.iter().any(|i| i.path == "root.semantic"));
        assert!(issues.iter().any(|i| i.path == "root.z"));
        assert!(issues.iter().any(|i| i.path == "root.flags.sticky"));
    }

    #[test]
    fn well_typed_optional_fields_are_clean() {
        let mut capture = minimal_capture();
        capture["root"]["semantic"] = json!("primary_cta");
        capture["root"]["z"] = json!(9);
        capture["root"]["enabled"] = json!(true);
        capture["root"]["flags"] = json!({ "sticky": true, "repeated": false });
        capture["root"]["text"] = json!({ "kind": "short", "len": 8, "hash": "0a9cede7" });
        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
    }

    #[test]
    fn unknown_keys_are_tolerated_everywhere() {
        let mut capture = minimal_capture();
        capture["future"] = json!({ "nested": [1, 2, 3] });
        capture["root"]["future_field"] = json!(true);
        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert!(issues.is_empty());
    }

    #[test]
    fn node_count_limit_reports_and_stops() {
        let children: Vec<Value> = (0..60)
            .map(|_| {
                json!({
                    "id": "",
                    "role": "BUTTON",
                    "bbox": [0, 0, 0.1, 0.05],
                    "interactive": true,
                    "visible": true
                })
            })
            .collect();
        let mut capture = minimal_capture();
        capture["root"]["children"] = Value::Array(children);

        let limits = ValidationLimits {
            max_nodes: 50,
            ..ValidationLimits::default()
        };
        let issues = validate_capture(&capture, &limits);
        assert!(issues.iter().any(is_limit_issue));
        assert!(issues.iter().all(|i| !i.path.contains("children[55].role")));
    }

    #[test]
    fn depth_limit_reports_and_stops() {
        let mut node = json!({
            "id": "",
            "role": "SECTION",
            "bbox": [0, 0, 1, 1],
            "interactive": false,
            "visible": true
        });
        for _ in 0..6 {
            let mut outer = json!({
                "id": "",
                "role": "SECTION",
                "bbox": [0, 0, 1, 1],
                "interactive": false,
                "visible": true
            });
            outer["children"] = json!([node]);
            node = outer;
        }
        let mut capture = minimal_capture();
        capture["root"]["children"] = json!([node]);

        let limits = ValidationLimits {
            max_depth: 4,
            ..ValidationLimits::default()
        };
        let issues = validate_capture(&capture, &limits);
        let limit_issues: Vec<_> = issues.iter().filter(|i| is_limit_issue(i)).collect();
        assert_eq!(limit_issues.len(), 1);
        assert!(limit_issues[0].message.contains("maxDepth"));
    }

    #[test]
    fn issue_collection_saturates() {
        // Hundreds of invalid children; collection must stop just past 100.
        let children: Vec<Value> = (0..300).map(|_| json!("not a node")).collect();
        let mut capture = minimal_capture();
        capture["root"]["children"] = Value::Array(children);

        let issues = validate_capture(&capture, &ValidationLimits::default());
        assert_eq!(issues.len(), MAX_ISSUES + 1);
    }
}
