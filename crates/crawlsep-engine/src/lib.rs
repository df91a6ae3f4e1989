//! # crawl-sep Engine
//!
//! Separation checks and fairness scoring for crawler access policies.
//!
//! This crate provides functionality for:
//!
//! - Building per-group agent maps and detecting agents shared by two groups
//! - Indexing allow/disallow rules per group
//! - Scoring how fairly a policy treats indexing and training crawlers
//! - Summarizing and reporting an evaluation as text or JSON
//!
//! All operations are pure functions of a validated [`Policy`].
//!
//! ## Example
//!
//! ```rust
//! use crawlsep_core::Policy;
//! use crawlsep_engine::{summarize_policy, OutputFormat};
//!
//! let policy: Policy = r#"{
//!     "site": "example.com",
//!     "userAgents": { "indexing": ["Googlebot"], "training": ["Google-Extended"] },
//!     "rules": [
//!         { "group": "indexing", "allow": ["/"], "disallow": [] },
//!         { "group": "training", "allow": ["/public"], "disallow": ["/"] }
//!     ]
//! }"#
//! .parse()
//! .unwrap();
//!
//! let summary = summarize_policy(&policy);
//! assert!(summary.separation_ok);
//! assert_eq!(summary.fairness_score, 80);
//!
//! let report = OutputFormat::Text.reporter().render(&summary).unwrap();
//! assert!(report.contains("Fairness score: 80"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::collections::HashSet;
use std::hash::Hash;

pub mod fairness;
pub mod report;
pub mod rules;
pub mod separation;
pub mod summary;


pub use crawlsep_core::Policy;
pub use fairness::{
    score_fairness, Fairness, ScoreBreakdown, ScoreWeights, INDEXING_GROUP, TRAINING_GROUP,
};
pub use report::{JsonReporter, OutputFormat, Reporter, TextReporter};
pub use rules::{group_rule_index, GroupRuleIndex, GroupRules};
pub use separation::{
    build_group_map, find_overlaps, validate_separation, GroupMap, Overlap, Separation,
};
pub use summary::{summarize_policy, Summary};

/// De-duplicates items, keeping the first occurrence of each.
pub(crate) fn unique_list<T, I>(items: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
