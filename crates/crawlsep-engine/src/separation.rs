//! Group separation checks.
//!
//! A policy keeps its crawler groups separate when no user agent is claimed
//! by more than one group. Agents are de-duplicated within each group but
//! never across groups, since cross-group duplicates are exactly what the
//! overlap scan reports.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use crawlsep_core::Policy;

use crate::unique_list;

/// Insertion-ordered mapping from group name to its de-duplicated agents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupMap {
    groups: Vec<(String, Vec<String>)>,
}

impl GroupMap {
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

    /// Returns the number of groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if the map has no groups.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<G, A> FromIterator<(G, Vec<A>)> for GroupMap
where
    G: Into<String>,
    A: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (G, Vec<A>)>>(iter: T) -> Self {
        Self {
            groups: iter
                .into_iter()
                .map(|(group, agents)| {
                    (group.into(), unique_list(agents.into_iter().map(Into::into)))
                })
                .collect(),
        }
    }
}

/// A user agent claimed by two groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlap {
    /// The group seen first during the scan.
    pub group_a: String,
    /// The group seen second.
    pub group_b: String,
    /// Agents present in both groups, in `group_a`'s order.
    pub agents: Vec<String>,
}

/// Outcome of a separation check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Separation {
    /// True when no overlaps were found.
    pub ok: bool,
    /// Every overlapping pair of groups.
    pub overlaps: Vec<Overlap>,
}

/// Builds the group map of a policy, de-duplicating agents within each group.
#[must_use]
pub fn build_group_map(policy: &Policy) -> GroupMap {
    policy
        .user_agents
        .iter()
        .map(|(group, agents)| (group, agents.to_vec()))
        .collect()
}

/// Scans every unordered pair of groups for shared agents.
///
/// Pairs are visited in map order (A before B), and a pair is reported
/// only when the intersection is non-empty.
#[must_use]
pub fn find_overlaps(group_map: &GroupMap) -> Vec<Overlap> {
    let mut overlaps = Vec::new();
    for (i, (group_a, agents_a)) in group_map.iter().enumerate() {
        for (group_b, agents_b) in group_map.iter().skip(i + 1) {
            let lookup: HashSet<&str> = agents_b.iter().map(String::as_str).collect();
            let shared: Vec<String> = agents_a
                .iter()
                .filter(|agent| lookup.contains(agent.as_str()))
                .cloned()
                .collect();
            if !shared.is_empty() {
                overlaps.push(Overlap {
                    group_a: group_a.to_owned(),
                    group_b: group_b.to_owned(),
                    agents: shared,
                });
            }
        }
    }
    overlaps
}

/// Checks that no user agent belongs to more than one group.
#[must_use]
pub fn validate_separation(policy: &Policy) -> Separation {
    let group_map = build_group_map(policy);
    let overlaps = find_overlaps(&group_map);

    if overlaps.is_empty() {
        debug!(site = %policy.site, groups = group_map.len(), "Crawler groups are separated");
    } else {
        warn!(
            site = %policy.site,
            overlaps = overlaps.len(),
            "User agents are shared between crawler groups"
        );
    }

    Separation {
        ok: overlaps.is_empty(),
        overlaps,
    }
}
