//! Fairness scoring.
//!
//! The fairness score is a weighted composite out of 100:
//!
//! - **separation** (40): no user agent is shared between groups.
//! - **explicit training** (40): a rule names the `training` group.
//! - **parity** (20): the `training` group is not restricted more heavily
//!   than the `indexing` group. Only an excess of training disallows is
//!   penalized; the reverse is not.

use serde::Serialize;
use tracing::debug;

use crawlsep_core::Policy;

use crate::rules::{group_rule_index, GroupRuleIndex};
use crate::separation::{validate_separation, Separation};

/// Group name that marks AI-training crawlers.
pub const TRAINING_GROUP: &str = "training";

/// Group name that marks search-indexing crawlers.
pub const INDEXING_GROUP: &str = "indexing";

/// Maximum points of each score component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreWeights {
    /// Points for separated groups.
    pub separation: u32,
    /// Points for an explicit training group.
    pub explicit_training: u32,
    /// Points for training/indexing parity.
    pub parity: u32,
}

impl ScoreWeights {
    /// The fixed weights used by [`score_fairness`].
    pub const DEFAULT: Self = Self {
        separation: 40,
        explicit_training: 40,
        parity: 20,
    };

    /// Returns the maximum achievable score.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.separation + self.explicit_training + self.parity
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Points awarded per component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    /// Separation points.
    pub separation: u32,
    /// Explicit training group points.
    pub explicit_training: u32,
    /// Parity points.
    pub parity: u32,
}

impl ScoreBreakdown {
    /// Returns the sum of all components.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.separation + self.explicit_training + self.parity
    }
}

/// Result of scoring a policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fairness {
    /// Composite score in `0..=100`.
    pub score: u32,
    /// Points per component.
    pub breakdown: ScoreBreakdown,
    /// The separation check the score was based on.
    pub separation: Separation,
}

/// Scores how fairly a policy treats indexing versus training crawlers.
///
/// # Examples
///
/// ```rust
/// use crawlsep_core::{Policy, Rule};
/// use crawlsep_engine::score_fairness;
///
/// let policy = Policy::new("example.com")
///     .with_group("indexing", ["Googlebot"])
///     .with_group("training", ["Google-Extended"])
///     .with_rule(Rule::new("indexing").with_allow(["/"]).with_disallow(Vec::<String>::new()))
///     .with_rule(Rule::new("training").with_allow(["/public"]).with_disallow(["/"]));
///
/// let fairness = score_fairness(&policy);
/// assert_eq!(fairness.breakdown.separation, 40);
/// assert_eq!(fairness.breakdown.explicit_training, 40);
/// assert_eq!(fairness.breakdown.parity, 0);
/// assert_eq!(fairness.score, 80);
/// ```
#[must_use]
pub fn score_fairness(policy: &Policy) -> Fairness {
    let separation = validate_separation(policy);
    let index = group_rule_index(policy);
    score_with(separation, &index)
}

/// Scores an already computed separation check and rule index.
pub(crate) fn score_with(separation: Separation, index: &GroupRuleIndex) -> Fairness {
    let weights = ScoreWeights::DEFAULT;

    let breakdown = ScoreBreakdown {
        separation: if separation.ok { weights.separation } else { 0 },
        explicit_training: if index.contains(TRAINING_GROUP) {
            weights.explicit_training
        } else {
            0
        },
        parity: parity_score(index, weights.parity),
    };
    let score = breakdown.total();

    debug!(
        score,
        separation = breakdown.separation,
        explicit_training = breakdown.explicit_training,
        parity = breakdown.parity,
        "Fairness scored"
    );

    Fairness {
        score,
        breakdown,
        separation,
    }
}

/// Parity points: full weight unless training has more disallows than indexing.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn parity_score(index: &GroupRuleIndex, weight: u32) -> u32 {
    let (Some(training), Some(indexing)) = (index.get(TRAINING_GROUP), index.get(INDEXING_GROUP))
    else {
        return 0;
    };

    let training_disallow = training.disallow.len();
    let indexing_disallow = indexing.disallow.len();
    let imbalance = training_disallow.saturating_sub(indexing_disallow);
    let total = (training_disallow + indexing_disallow).max(1);
    let factor = (1.0 - imbalance as f64 / total as f64).max(0.0);

    (f64::from(weight) * factor).round() as u32
}
