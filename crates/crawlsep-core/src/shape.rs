//! Structural validation of raw policy documents.
//!
//! [`validate_shape`] turns a parsed JSON value into a [`Policy`] after
//! checking it against the policy schema. Checks run in a fixed order and
//! the first violation wins, so the reported message is deterministic.
//!
//! The validator confirms structure only. Agent lists are checked strictly
//! (every entry must be a string) while rule path lists are accepted as-is
//! and sanitized later by the rule index.

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::policy::{Policy, Rule, UserAgents};

/// Top-level keys every policy must carry, in the order they are checked.
pub const REQUIRED_TOP_LEVEL: [&str; 3] = ["site", "userAgents", "rules"];

/// A structural violation found in a policy document.
///
/// The [`Display`](fmt::Display) output is the bare message, which callers
/// and tests match on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ShapeError {
    /// Path of the offending value (e.g. `userAgents.bots`, `rules[2]`).
    pub field: String,
    /// Human-readable description of the violation.
    pub message: String,
    /// The category of the violation.
    pub kind: ShapeErrorKind,
}

impl ShapeError {
    /// Creates a new shape error.
    pub fn new(field: impl Into<String>, message: impl Into<String>, kind: ShapeErrorKind) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            kind,
        }
    }

    /// Creates an error for a required top-level field that is absent.
    pub fn missing(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            message: format!("Missing required field: {field}."),
            field,
            kind: ShapeErrorKind::Missing,
        }
    }

    /// Creates an error for a value of the wrong JSON type.
    pub fn mismatch(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, ShapeErrorKind::Type)
    }

    /// Creates an error for a collection or string that must not be empty.
    pub fn empty(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, ShapeErrorKind::Empty)
    }
}

/// The category of a shape violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeErrorKind {
    /// A required field was not present.
    Missing,
    /// A value had the wrong JSON type.
    Type,
    /// A value was empty where content is required.
    Empty,
}

impl fmt::Display for ShapeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::Type => write!(f, "type"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Validates a raw JSON value against the policy schema.
///
/// Checks, in order: the document is an object; `site`, `userAgents` and
/// `rules` are present; `site` is a non-blank string; `userAgents` is an
/// object with at least one group whose values are string arrays; `rules`
/// is a non-empty array of objects, each with a string `group` and at least
/// one of `allow`/`disallow` as an array.
///
/// The returned [`Policy`] carries the document's values unchanged.
///
/// # Errors
///
/// Returns the first [`ShapeError`] encountered.
///
/// # Examples
///
/// ```
/// use crawlsep_core::validate_shape;
/// use serde_json::json;
///
/// let policy = validate_shape(&json!({
///     "site": "example.com",
///     "userAgents": { "indexing": ["Googlebot"] },
///     "rules": [{ "group": "indexing", "allow": ["/"] }]
/// }))
/// .unwrap();
/// assert_eq!(policy.site, "example.com");
///
/// let err = validate_shape(&json!({})).unwrap_err();
/// assert_eq!(err.to_string(), "Missing required field: site.");
/// ```
pub fn validate_shape(raw: &Value) -> Result<Policy, ShapeError> {
    let Some(object) = raw.as_object() else {
        return Err(ShapeError::mismatch("policy", "Policy must be an object."));
    };

    for key in REQUIRED_TOP_LEVEL {
        if !object.contains_key(key) {
            return Err(ShapeError::missing(key));
        }
    }

    let site = check_site(required(object, "site")?)?;
    let user_agents = check_user_agents(required(object, "userAgents")?)?;
    let rules = check_rules(required(object, "rules")?)?;

    let extensions: Map<String, Value> = object
        .iter()
        .filter(|(key, _)| !REQUIRED_TOP_LEVEL.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    debug!(
        site = %site,
        groups = user_agents.len(),
        rules = rules.len(),
        "Policy shape validated"
    );

    Ok(Policy {
        site,
        user_agents,
        rules,
        extensions,
    })
}

fn required<'a>(object: &'a Map<String, Value>, key: &str) -> Result<&'a Value, ShapeError> {
    object.get(key).ok_or_else(|| ShapeError::missing(key))
}

fn check_site(value: &Value) -> Result<String, ShapeError> {
    match value {
        Value::String(site) if !site.trim().is_empty() => Ok(site.clone()),
        _ => Err(ShapeError::mismatch(
            "site",
            "Policy.site must be a non-empty string.",
        )),
    }
}

fn check_user_agents(value: &Value) -> Result<UserAgents, ShapeError> {
    let Some(groups) = value.as_object() else {
        return Err(ShapeError::mismatch(
            "userAgents",
            "Policy.userAgents must be an object with group arrays.",
        ));
    };
    if groups.is_empty() {
        return Err(ShapeError::empty(
            "userAgents",
            "Policy.userAgents must define at least one group.",
        ));
    }

    let mut user_agents = UserAgents::new();
    for (group, agents) in groups {
        let field = format!("userAgents.{group}");
        let Some(entries) = agents.as_array() else {
            return Err(ShapeError::mismatch(
                field,
                format!("Policy.userAgents.{group} must be an array."),
            ));
        };
        let names: Option<Vec<String>> = entries
            .iter()
            .map(|agent| agent.as_str().map(str::to_owned))
            .collect();
        let Some(names) = names else {
            return Err(ShapeError::mismatch(
                field,
                format!("Policy.userAgents.{group} must contain only strings."),
            ));
        };
        user_agents.insert(group.clone(), names);
    }
    Ok(user_agents)
}

fn check_rules(value: &Value) -> Result<Vec<Rule>, ShapeError> {
    let entries = match value.as_array() {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            return Err(ShapeError::mismatch(
                "rules",
                "Policy.rules must be a non-empty array.",
            ))
        }
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| check_rule(index, entry))
        .collect()
}

fn check_rule(index: usize, entry: &Value) -> Result<Rule, ShapeError> {
    let field = format!("rules[{index}]");
    let Some(rule) = entry.as_object() else {
        return Err(ShapeError::mismatch(field, "Each rule must be an object."));
    };
    let Some(group) = rule.get("group").and_then(Value::as_str) else {
        return Err(ShapeError::mismatch(
            format!("{field}.group"),
            "Each rule requires a group string.",
        ));
    };

    // A non-array `allow`/`disallow` next to a valid one counts as absent.
    let allow = rule.get("allow").and_then(Value::as_array).cloned();
    let disallow = rule.get("disallow").and_then(Value::as_array).cloned();
    if allow.is_none() && disallow.is_none() {
        return Err(ShapeError::mismatch(
            field,
            "Each rule must include allow or disallow arrays.",
        ));
    }

    Ok(Rule {
        group: group.to_owned(),
        allow,
        disallow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_policy() -> Value {
        json!({
            "site": "example.com",
            "userAgents": {
                "indexing": ["Googlebot"],
                "training": ["Google-Extended"]
            },
            "rules": [
                { "group": "indexing", "allow": ["/"], "disallow": [] }
            ]
        })
    }

    fn message_for(raw: &Value) -> String {
        validate_shape(raw).unwrap_err().to_string()
    }

    #[test]
    fn test_accepts_valid_policy() {
        let policy = validate_shape(&valid_policy()).unwrap();
        assert_eq!(policy.site, "example.com");
        assert_eq!(policy.user_agents.len(), 2);
        assert_eq!(policy.rules.len(), 1);
        assert_eq!(policy.to_value(), valid_policy());
    }

    #[test]
    fn test_rejects_non_objects() {
        for raw in [json!(null), json!([]), json!("policy"), json!(42), json!(true)] {
            let err = validate_shape(&raw).unwrap_err();
            assert_eq!(err.to_string(), "Policy must be an object.");
            assert_eq!(err.kind, ShapeErrorKind::Type);
        }
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let err = validate_shape(&json!({})).unwrap_err();
        assert!(err.to_string().contains("Missing required field"));
        assert_eq!(err.field, "site");
        assert_eq!(err.kind, ShapeErrorKind::Missing);

        let err = validate_shape(&json!({ "site": "x", "rules": [] })).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: userAgents.");

        let err = validate_shape(&json!({ "site": "x", "userAgents": {} })).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: rules.");
    }

    #[test]
    fn test_presence_checked_before_types() {
        // `site` is invalid but `rules` is missing; presence wins.
        let err = validate_shape(&json!({ "site": 1, "userAgents": {} })).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: rules.");
    }

    #[test]
    fn test_rejects_blank_site() {
        let mut raw = valid_policy();
        raw["site"] = json!("   ");
        assert_eq!(message_for(&raw), "Policy.site must be a non-empty string.");

        raw["site"] = json!(null);
        assert_eq!(message_for(&raw), "Policy.site must be a non-empty string.");
    }

    #[test]
    fn test_rejects_bad_user_agents() {
        let mut raw = valid_policy();
        raw["userAgents"] = json!(["Googlebot"]);
        assert_eq!(
            message_for(&raw),
            "Policy.userAgents must be an object with group arrays."
        );

        raw["userAgents"] = json!({});
        let err = validate_shape(&raw).unwrap_err();
        assert_eq!(err.to_string(), "Policy.userAgents must define at least one group.");
        assert_eq!(err.kind, ShapeErrorKind::Empty);
    }

    #[test]
    fn test_reports_first_failing_group() {
        let mut raw = valid_policy();
        raw["userAgents"] = json!({
            "indexing": ["Googlebot"],
            "bots": "CCBot",
            "other": 3
        });
        let err = validate_shape(&raw).unwrap_err();
        assert_eq!(err.to_string(), "Policy.userAgents.bots must be an array.");
        assert_eq!(err.field, "userAgents.bots");

        raw["userAgents"] = json!({ "indexing": ["Googlebot", 7] });
        assert_eq!(
            message_for(&raw),
            "Policy.userAgents.indexing must contain only strings."
        );
    }

    #[test]
    fn test_accepts_empty_agent_lists() {
        let mut raw = valid_policy();
        raw["userAgents"] = json!({ "indexing": [] });
        assert!(validate_shape(&raw).is_ok());
    }

    #[test]
    fn test_rejects_non_array_rules() {
        let mut raw = valid_policy();
        raw["rules"] = json!("nope");
        assert!(message_for(&raw).contains("Policy.rules"));

        raw["rules"] = json!([]);
        assert_eq!(message_for(&raw), "Policy.rules must be a non-empty array.");
    }

    #[test]
    fn test_rejects_malformed_rules() {
        let mut raw = valid_policy();
        raw["rules"] = json!([{ "group": "indexing", "allow": [] }, "rule"]);
        let err = validate_shape(&raw).unwrap_err();
        assert_eq!(err.to_string(), "Each rule must be an object.");
        assert_eq!(err.field, "rules[1]");

        raw["rules"] = json!([{ "group": 1, "allow": [] }]);
        assert_eq!(message_for(&raw), "Each rule requires a group string.");

        raw["rules"] = json!([{ "group": "indexing" }]);
        assert_eq!(
            message_for(&raw),
            "Each rule must include allow or disallow arrays."
        );

        raw["rules"] = json!([{ "group": "indexing", "allow": "/", "disallow": null }]);
        assert_eq!(
            message_for(&raw),
            "Each rule must include allow or disallow arrays."
        );
    }

    #[test]
    fn test_single_path_list_is_enough() {
        let mut raw = valid_policy();
        raw["rules"] = json!([
            { "group": "indexing", "allow": ["/"] },
            { "group": "training", "disallow": ["/"] }
        ]);
        let policy = validate_shape(&raw).unwrap();
        assert!(policy.rules[0].disallow.is_none());
        assert!(policy.rules[1].allow.is_none());
    }

    #[test]
    fn test_rule_paths_are_not_sanitized() {
        let mut raw = valid_policy();
        raw["rules"] = json!([{ "group": "indexing", "allow": ["/", 3, "", null] }]);
        let policy = validate_shape(&raw).unwrap();
        assert_eq!(policy.rules[0].allow.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_rules_for_unknown_groups_are_accepted() {
        let mut raw = valid_policy();
        raw["rules"] = json!([{ "group": "nobody", "disallow": ["/"] }]);
        assert!(validate_shape(&raw).is_ok());
    }

    #[test]
    fn test_extra_fields_are_preserved() {
        let mut raw = valid_policy();
        raw["principle"] = json!("separation");
        let policy = validate_shape(&raw).unwrap();
        assert_eq!(policy.extensions.get("principle"), Some(&json!("separation")));
        assert_eq!(policy.to_value(), raw);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let first = validate_shape(&valid_policy()).unwrap();
        let second = validate_shape(&first.to_value()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ShapeErrorKind::Missing.to_string(), "missing");
        assert_eq!(ShapeErrorKind::Type.to_string(), "type");
        assert_eq!(ShapeErrorKind::Empty.to_string(), "empty");
    }
}
