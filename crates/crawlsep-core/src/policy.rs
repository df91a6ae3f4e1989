//! Crawler access policy model.
//!
//! A [`Policy`] groups crawler user agents (e.g. `indexing`, `training`)
//! and lists the URL paths each group may or may not fetch. Policies are
//! normally produced by [`validate_shape`](crate::validate_shape) and are
//! never mutated afterwards.

use std::str::FromStr;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::Error;
use crate::shape::{validate_shape, ShapeError};

/// A declared crawler access policy.
///
/// # Examples
///
/// ```rust
/// use crawlsep_core::{Policy, Rule};
///
/// let policy = Policy::new("example.com")
///     .with_group("indexing", ["Googlebot"])
///     .with_group("training", ["Google-Extended"])
///     .with_rule(Rule::new("indexing").with_allow(["/"]))
///     .with_rule(Rule::new("training").with_disallow(["/"]));
///
/// assert_eq!(policy.user_agents.group_names().collect::<Vec<_>>(), ["indexing", "training"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Policy {
    /// Site identifier the policy applies to.
    pub site: String,

    /// User agents per group, in document order.
    pub user_agents: UserAgents,

    /// Access rules, in document order.
    pub rules: Vec<Rule>,

    /// Any other top-level keys of the document, kept verbatim.
    pub extensions: Map<String, Value>,
}

impl Policy {
    /// Creates an empty policy for a site.
    #[must_use]
    pub fn new(site: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            user_agents: UserAgents::new(),
            rules: Vec::new(),
            extensions: Map::new(),
        }
    }

    /// Adds (or replaces) a user-agent group.
    #[must_use]
    pub fn with_group<I, S>(mut self, group: impl Into<String>, agents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_agents
            .insert(group.into(), agents.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets an extra top-level field.
    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    /// Returns the policy as a JSON document.
    ///
    /// Key order is `site`, extension fields, `userAgents`, `rules`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("site".to_owned(), Value::String(self.site.clone()));
        for (key, value) in &self.extensions {
            object.insert(key.clone(), value.clone());
        }
        object.insert("userAgents".to_owned(), self.user_agents.to_value());
        object.insert(
            "rules".to_owned(),
            Value::Array(self.rules.iter().map(Rule::to_value).collect()),
        );
        Value::Object(object)
    }
}

impl Serialize for Policy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl TryFrom<Value> for Policy {
    type Error = ShapeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        validate_shape(&value)
    }
}

impl FromStr for Policy {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        let raw: Value = serde_json::from_str(source)?;
        Ok(validate_shape(&raw)?)
    }
}

/// Insertion-ordered mapping from group name to user-agent names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAgents {
    groups: Vec<(String, Vec<String>)>,
}

impl UserAgents {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self { groups: Vec::new() }
    }

    /// Inserts a group, replacing the agents of an existing group in place.
    pub fn insert(&mut self, group: String, agents: Vec<String>) {
        match self.groups.iter().position(|(name, _)| *name == group) {
            Some(index) => self.groups[index].1 = agents,
            None => self.groups.push((group, agents)),
        }
    }

    /// Returns the agents of a group.
    #[must_use]
    pub fn get(&self, group: &str) -> Option<&[String]> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, agents)| agents.as_slice())
    }

    /// Iterates over `(group, agents)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, agents)| (name.as_str(), agents.as_slice()))
    }

    /// Iterates over group names in insertion order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if no groups are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    fn to_value(&self) -> Value {
        let object: Map<String, Value> = self
            .groups
            .iter()
            .map(|(name, agents)| {
                let agents = agents.iter().cloned().map(Value::String).collect();
                (name.clone(), Value::Array(agents))
            })
            .collect();
        Value::Object(object)
    }
}

/// An access rule for one group.
///
/// Path entries are kept as raw JSON values; non-string and empty entries
/// are dropped when the rule index is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Group the rule applies to. Not required to exist in `userAgents`.
    pub group: String,

    /// Paths the group may access.
    pub allow: Option<Vec<Value>>,

    /// Paths the group may not access.
    pub disallow: Option<Vec<Value>>,
}

impl Rule {
    /// Creates a rule for a group with no path lists.
    #[must_use]
    pub fn new(group: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            allow: None,
            disallow: None,
        }
    }

    /// Sets the allowed paths.
    #[must_use]
    pub fn with_allow<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow = Some(paths.into_iter().map(|p| Value::String(p.into())).collect());
        self
    }

    /// Sets the disallowed paths.
    #[must_use]
    pub fn with_disallow<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.disallow = Some(paths.into_iter().map(|p| Value::String(p.into())).collect());
        self
    }

    fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("group".to_owned(), Value::String(self.group.clone()));
        if let Some(allow) = &self.allow {
            object.insert("allow".to_owned(), Value::Array(allow.clone()));
        }
        if let Some(disallow) = &self.disallow {
            object.insert("disallow".to_owned(), Value::Array(disallow.clone()));
        }
        Value::Object(object)
    }
}
