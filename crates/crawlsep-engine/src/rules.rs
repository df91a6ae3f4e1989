//! Per-group index of allow/disallow path rules.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crawlsep_core::Policy;

use crate::unique_list;

/// The merged, de-duplicated paths of one group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupRules {
    /// Paths the group may access.
    pub allow: Vec<String>,
    /// Paths the group may not access.
    pub disallow: Vec<String>,
}

/// Insertion-ordered mapping from group name to its merged rules.
///
/// Serializes as a JSON object keyed by group name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRuleIndex {
    entries: Vec<(String, GroupRules)>,
}

impl GroupRuleIndex {
    /// Returns the rules of a group.
    #[must_use]
    pub fn get(&self, group: &str) -> Option<&GroupRules> {
        self.entries
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, rules)| rules)
    }

    /// Returns true if at least one rule names the group.
    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.get(group).is_some()
    }

    /// Returns group names in first-seen order.
    #[must_use]
    pub fn groups(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    /// Iterates over `(group, rules)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &GroupRules)> {
        self.entries.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry_mut(&mut self, group: &str) -> &mut GroupRules {
        let position = match self.entries.iter().position(|(name, _)| name == group) {
            Some(position) => position,
            None => {
                self.entries.push((group.to_owned(), GroupRules::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[position].1
    }
}

impl Serialize for GroupRuleIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (group, rules) in &self.entries {
            map.serialize_entry(group, rules)?;
        }
        map.end()
    }
}

/// Keeps non-empty string entries of an optional path list.
fn sanitize_paths(paths: Option<&Vec<Value>>) -> impl Iterator<Item = String> + '_ {
    paths
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .filter(|path| !path.is_empty())
        .map(str::to_owned)
}

/// Builds the rule index of a policy.
///
/// Rules sharing a group are concatenated in document order, non-string
/// and empty paths are dropped, and each list is de-duplicated keeping the
/// first occurrence. Groups are not checked against `userAgents`.
#[must_use]
pub fn group_rule_index(policy: &Policy) -> GroupRuleIndex {
    let mut index = GroupRuleIndex::default();
    for rule in &policy.rules {
        let entry = index.entry_mut(&rule.group);
        entry.allow.extend(sanitize_paths(rule.allow.as_ref()));
        entry.disallow.extend(sanitize_paths(rule.disallow.as_ref()));
    }

    for (_, rules) in &mut index.entries {
        rules.allow = unique_list(std::mem::take(&mut rules.allow));
        rules.disallow = unique_list(std::mem::take(&mut rules.disallow));
    }

    debug!(site = %policy.site, groups = index.len(), "Rule index built");
    index
}
