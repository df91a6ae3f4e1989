//! Policy evaluation summary.

use serde::Serialize;
use tracing::info;

use crawlsep_core::Policy;

use crate::fairness::{score_with, ScoreBreakdown};
use crate::rules::{group_rule_index, GroupRuleIndex};
use crate::separation::{validate_separation, Overlap};

/// Everything an evaluation reports about a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Site the policy applies to.
    pub site: String,
    /// Groups named by at least one rule, in first-seen order.
    pub groups: Vec<String>,
    /// True when no user agent is shared between groups.
    pub separation_ok: bool,
    /// Overlapping group pairs.
    pub overlaps: Vec<Overlap>,
    /// Composite fairness score in `0..=100`.
    pub fairness_score: u32,
    /// Points per score component.
    pub breakdown: ScoreBreakdown,
    /// Merged rules per group.
    pub group_rules: GroupRuleIndex,
}

/// Evaluates a validated policy.
///
/// `groups` lists the groups that have rules, which can differ from the
/// groups that have user agents.
#[must_use]
pub fn summarize_policy(policy: &Policy) -> Summary {
    let group_rules = group_rule_index(policy);
    let fairness = score_with(validate_separation(policy), &group_rules);

    info!(
        site = %policy.site,
        score = fairness.score,
        separation_ok = fairness.separation.ok,
        "Policy evaluated"
    );

    Summary {
        site: policy.site.clone(),
        groups: group_rules.groups(),
        separation_ok: fairness.separation.ok,
        overlaps: fairness.separation.overlaps,
        fairness_score: fairness.score,
        breakdown: fairness.breakdown,
        group_rules,
    }
}
