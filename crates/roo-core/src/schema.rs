//! Structural validation of raw catalog JSON.
//!
//! Each entry point walks the whole document and reports every violated
//! field path, not just the first, so a catalog author sees all problems
//! in one pass. Typed construction only happens once the walk is clean.

use crate::definitions::{CategoryDefinition, ModeDefinition, UserDefinitions};
use crate::paths;
use crate::types::Origin;
use serde_json::Value;
use std::fmt;

// ---------------------------------------------------------------------------
// Violations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// JSON path of the offending field, e.g. `[2].categorySlugs`.
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaViolations(pub Vec<Violation>);

impl SchemaViolations {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|v| format!("{}: {}", v.path, v.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

// ---------------------------------------------------------------------------
// Checker
// ---------------------------------------------------------------------------

struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn new() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    fn report(&mut self, path: String, message: impl Into<String>) {
        self.violations.push(Violation {
            path,
            message: message.into(),
        });
    }

    fn require_str<'a>(&mut self, obj: &'a Value, path: &str, field: &str) -> Option<&'a str> {
        match obj.get(field) {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            Some(Value::String(_)) => {
                self.report(format!("{path}.{field}"), "must not be empty");
                None
            }
            Some(_) => {
                self.report(format!("{path}.{field}"), "must be a string");
                None
            }
            None => {
                self.report(format!("{path}.{field}"), "required field is missing");
                None
            }
        }
    }

    fn optional_str(&mut self, obj: &Value, path: &str, field: &str) {
        if let Some(v) = obj.get(field) {
            if !v.is_string() {
                self.report(format!("{path}.{field}"), "must be a string");
            }
        }
    }

    fn check_slug(&mut self, obj: &Value, path: &str) {
        if let Some(slug) = self.require_str(obj, path, "slug") {
            if paths::validate_slug(slug).is_err() {
                self.report(
                    format!("{path}.slug"),
                    "must be lowercase alphanumeric with hyphens",
                );
            }
        }
    }

    fn check_mode(&mut self, value: &Value, path: &str) {
        if !value.is_object() {
            self.report(path.to_string(), "must be an object");
            return;
        }
        self.check_slug(value, path);
        self.require_str(value, path, "name");
        self.require_str(value, path, "description");
        self.optional_str(value, path, "customInstructions");

        if let Some(groups) = value.get("groups") {
            if !groups.is_array() {
                self.report(format!("{path}.groups"), "must be an array");
            }
        }

        match value.get("categorySlugs") {
            Some(Value::Array(slugs)) => {
                if slugs.is_empty() {
                    self.report(format!("{path}.categorySlugs"), "must not be empty");
                }
                for (i, slug) in slugs.iter().enumerate() {
                    if !slug.is_string() {
                        self.report(format!("{path}.categorySlugs[{i}]"), "must be a string");
                    }
                }
            }
            Some(_) => self.report(format!("{path}.categorySlugs"), "must be an array"),
            None => self.report(format!("{path}.categorySlugs"), "required field is missing"),
        }

        match value.get("associatedRuleFiles") {
            Some(Value::Array(rules)) => {
                for (i, rule) in rules.iter().enumerate() {
                    self.check_rule(rule, &format!("{path}.associatedRuleFiles[{i}]"));
                }
            }
            Some(_) => self.report(format!("{path}.associatedRuleFiles"), "must be an array"),
            None => {}
        }
    }

    fn check_rule(&mut self, value: &Value, path: &str) {
        if !value.is_object() {
            self.report(path.to_string(), "must be an object");
            return;
        }
        self.require_str(value, path, "id");
        self.require_str(value, path, "name");
        self.require_str(value, path, "description");
        self.require_str(value, path, "sourcePath");
        if let Some(flag) = value.get("isGeneric") {
            if !flag.is_boolean() {
                self.report(format!("{path}.isGeneric"), "must be a boolean");
            }
        }
    }

    fn check_category(&mut self, value: &Value, path: &str) {
        if !value.is_object() {
            self.report(path.to_string(), "must be an object");
            return;
        }
        self.check_slug(value, path);
        self.require_str(value, path, "name");
        self.optional_str(value, path, "description");
    }

    fn finish(self) -> Result<(), SchemaViolations> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaViolations(self.violations))
        }
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate and construct a modes catalog, stamping every entry with `origin`.
pub fn parse_modes(value: &Value, origin: Origin) -> Result<Vec<ModeDefinition>, SchemaViolations> {
    let mut checker = Checker::new();
    match value.as_array() {
        Some(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                checker.check_mode(entry, &format!("[{i}]"));
            }
        }
        None => checker.report("$".to_string(), "catalog must be an array".to_string()),
    }
    checker.finish()?;

    let mut modes: Vec<ModeDefinition> =
        serde_json::from_value(value.clone()).map_err(deserialize_violation)?;
    for mode in &mut modes {
        mode.origin = origin;
    }
    Ok(modes)
}

/// Validate and construct a categories catalog.
pub fn parse_categories(
    value: &Value,
    origin: Origin,
) -> Result<Vec<CategoryDefinition>, SchemaViolations> {
    let mut checker = Checker::new();
    match value.as_array() {
        Some(entries) => {
            for (i, entry) in entries.iter().enumerate() {
                checker.check_category(entry, &format!("[{i}]"));
            }
        }
        None => checker.report("$".to_string(), "catalog must be an array".to_string()),
    }
    checker.finish()?;

    let mut categories: Vec<CategoryDefinition> =
        serde_json::from_value(value.clone()).map_err(deserialize_violation)?;
    for category in &mut categories {
        category.origin = origin;
    }
    Ok(categories)
}

/// Validate and construct the user-overlay container. Both member lists are
/// optional; entries are stamped with [`Origin::User`].
pub fn parse_user_definitions(value: &Value) -> Result<UserDefinitions, SchemaViolations> {
    let mut checker = Checker::new();
    if !value.is_object() {
        checker.report("$".to_string(), "must be an object".to_string());
        return checker.finish().map(|_| UserDefinitions::default());
    }

    if let Some(modes) = value.get("customModes") {
        match modes.as_array() {
            Some(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    checker.check_mode(entry, &format!("customModes[{i}]"));
                }
            }
            None => checker.report("customModes".to_string(), "must be an array".to_string()),
        }
    }
    if let Some(categories) = value.get("customCategories") {
        match categories.as_array() {
            Some(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    checker.check_category(entry, &format!("customCategories[{i}]"));
                }
            }
            None => checker.report(
                "customCategories".to_string(),
                "must be an array".to_string(),
            ),
        }
    }
    checker.finish()?;

    let mut defs: UserDefinitions =
        serde_json::from_value(value.clone()).map_err(deserialize_violation)?;
    for mode in &mut defs.custom_modes {
        mode.origin = Origin::User;
    }
    for category in &mut defs.custom_categories {
        category.origin = Origin::User;
    }
    Ok(defs)
}

fn deserialize_violation(err: serde_json::Error) -> SchemaViolations {
    SchemaViolations(vec![Violation {
        path: "$".to_string(),
        message: err.to_string(),
    }])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_modes_catalog_parses() {
        let value = json!([{
            "slug": "code",
            "name": "Code",
            "description": "Write code",
            "categorySlugs": ["engineering"],
            "associatedRuleFiles": [{
                "id": "style",
                "name": "Style",
                "description": "Style guidance",
                "sourcePath": "code/style.md",
                "isGeneric": false
            }]
        }]);
        let modes = parse_modes(&value, Origin::System).unwrap();
        assert_eq!(modes.len(), 1);
        assert_eq!(modes[0].slug, "code");
        assert_eq!(modes[0].origin, Origin::System);
        assert_eq!(modes[0].associated_rule_files[0].source_path, "code/style.md");
    }

    #[test]
    fn all_violations_are_enumerated() {
        // Two broken modes: every problem must be reported, not just the first.
        let value = json!([
            { "slug": "ok-slug", "description": 7, "categorySlugs": [] },
            { "slug": "BAD SLUG", "name": "X", "description": "d", "categorySlugs": "engineering" }
        ]);
        let err = parse_modes(&value, Origin::System).unwrap_err();
        let paths: Vec<&str> = err.0.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"[0].name"));
        assert!(paths.contains(&"[0].description"));
        assert!(paths.contains(&"[0].categorySlugs"));
        assert!(paths.contains(&"[1].slug"));
        assert!(paths.contains(&"[1].categorySlugs"));
    }

    #[test]
    fn non_array_catalog_is_rejected() {
        let err = parse_modes(&json!({"modes": []}), Origin::System).unwrap_err();
        assert_eq!(err.0[0].path, "$");
    }

    #[test]
    fn rule_violations_carry_nested_paths() {
        let value = json!([{
            "slug": "code",
            "name": "Code",
            "description": "d",
            "categorySlugs": ["eng"],
            "associatedRuleFiles": [{ "id": "style", "name": "Style" }]
        }]);
        let err = parse_modes(&value, Origin::System).unwrap_err();
        let paths: Vec<&str> = err.0.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"[0].associatedRuleFiles[0].description"));
        assert!(paths.contains(&"[0].associatedRuleFiles[0].sourcePath"));
    }

    #[test]
    fn categories_optional_description() {
        let value = json!([
            { "slug": "eng", "name": "Engineering" },
            { "slug": "docs", "name": "Docs", "description": "Documentation" }
        ]);
        let categories = parse_categories(&value, Origin::User).unwrap();
        assert_eq!(categories[0].description, None);
        assert_eq!(categories[1].description.as_deref(), Some("Documentation"));
        assert!(categories.iter().all(|c| c.origin == Origin::User));
    }

    #[test]
    fn user_definitions_empty_object_is_valid() {
        let defs = parse_user_definitions(&json!({})).unwrap();
        assert!(defs.is_empty());
    }

    #[test]
    fn user_definitions_entries_get_user_origin() {
        let defs = parse_user_definitions(&json!({
            "customModes": [{
                "slug": "my-mode",
                "name": "Mine",
                "description": "d",
                "categorySlugs": ["eng"]
            }],
            "customCategories": [{ "slug": "eng", "name": "Engineering" }]
        }))
        .unwrap();
        assert_eq!(defs.custom_modes[0].origin, Origin::User);
        assert_eq!(defs.custom_categories[0].origin, Origin::User);
    }

    #[test]
    fn user_definitions_violations_use_container_paths() {
        let err = parse_user_definitions(&json!({
            "customModes": [{ "slug": "x" }],
            "customCategories": "nope"
        }))
        .unwrap_err();
        let paths: Vec<&str> = err.0.iter().map(|v| v.path.as_str()).collect();
        assert!(paths.contains(&"customModes[0].name"));
        assert!(paths.contains(&"customCategories"));
    }
}
