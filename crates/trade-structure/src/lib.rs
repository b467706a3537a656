//! Trade-structure decision tree.
//!
//! A strictly ordered, first-match rule evaluator: the rule order is
//! semantically load-bearing (the risk override outranks every bullish
//! options setup), so the rules live in one explicit table rather than
//! nested conditionals, and each carries its precondition strings so tests
//! and audits can see exactly what fired.

use std::collections::HashMap;

use scoring_core::{
    definition, FactorId, FactorValue, Recommendation, ScoreResult, ScoringError,
};

/// Everything the decision tree looks at. Stateless per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionInputs {
    pub final_score: i32,
    pub core_score: i32,
    pub timing_score: i32,
    pub risk_deduct: i32,
    pub iv_low: bool,
    pub iv_moderate: bool,
    pub iv_high: bool,
    pub catalyst_strong: bool,
    pub flow_high: bool,
    pub flow_weak: bool,
}

impl DecisionInputs {
    /// Derive overlay flags from the factor sheet and score breakdown.
    ///
    /// IV index 4 is "stock only": none of the IV flags fire. Flow
    /// thresholds apply to the realized flow score, not the raw index; an
    /// unscored flow sets neither flag.
    pub fn derive(score: &ScoreResult, values: &HashMap<FactorId, FactorValue>) -> Self {
        let iv_index = values
            .get(&FactorId::IvEnvironment)
            .and_then(|value| value.index);
        let catalyst_index = values
            .get(&FactorId::CatalystProximity)
            .and_then(|value| value.index);
        let flow_score = values
            .get(&FactorId::InstitutionalFlow)
            .and_then(|value| value.index)
            .map(|index| definition(FactorId::InstitutionalFlow).realized(index));

        Self {
            final_score: score.final_score,
            core_score: score.core_score,
            timing_score: score.timing_score,
            risk_deduct: score.risk_deduct,
            iv_low: matches!(iv_index, Some(2) | Some(3)),
            iv_moderate: iv_index == Some(1),
            iv_high: iv_index == Some(0),
            catalyst_strong: catalyst_index.map(|index| index >= 3).unwrap_or(false),
            flow_high: flow_score.map(|score| score >= 8).unwrap_or(false),
            flow_weak: flow_score.map(|score| score <= 2).unwrap_or(false),
        }
    }
}

/// One (predicate, outcome) entry in the ordered rule table.
pub struct Rule {
    pub id: &'static str,
    pub preconditions: &'static [&'static str],
    predicate: fn(&DecisionInputs) -> bool,
    outcome: fn(&DecisionInputs) -> (&'static str, &'static str, &'static str),
}

impl Rule {
    pub fn matches(&self, inputs: &DecisionInputs) -> bool {
        (self.predicate)(inputs)
    }
}

const RULES: &[Rule] = &[
    Rule {
        id: "pass",
        preconditions: &["final < 35"],
        predicate: |i| i.final_score < 35,
        outcome: |_| {
            (
                "PASS",
                "Score below minimum threshold.",
                "No capital deployment. Revisit if revisions accelerate or catalyst clarifies.",
            )
        },
    },
    Rule {
        id: "watchlist",
        preconditions: &["final < 50"],
        predicate: |i| i.final_score < 50,
        outcome: |_| {
            (
                "WATCHLIST",
                "Insufficient signal quality for entry.",
                "Add to watch list. Enter only on revision acceleration or cleaner timing setup.",
            )
        },
    },
    // The risk override outranks any bullish options setup below it.
    Rule {
        id: "risk_override",
        preconditions: &["risk_deduct >= 8"],
        predicate: |i| i.risk_deduct >= 8,
        outcome: |_| {
            (
                "STOCK, HALF SIZE",
                "Risk penalty too high for full commitment.",
                "Material binary or thesis risk present. Stock preferred over options. \
                 Size at 50% normal. Reassess after risk event resolves.",
            )
        },
    },
    Rule {
        id: "short_dated_calls",
        preconditions: &["iv_low", "catalyst_strong", "final >= 65"],
        predicate: |i| i.iv_low && i.catalyst_strong && i.final_score >= 65,
        outcome: |i| {
            if i.flow_high {
                (
                    "BUY CALLS, FULL CONVICTION",
                    "IV cheap + catalyst < 90 days + institutional accumulation confirmed.",
                    "Target 60-90 day expiry, delta 0.35-0.50. Naked call if blowout beat + \
                     deep discount. Spread if modest discount.",
                )
            } else if i.flow_weak {
                (
                    "STOCK + SMALL CALLS",
                    "IV cheap + catalyst near, but flow not confirming.",
                    "Primary position in stock. Small call position for leverage. Monitor \
                     filings and dark pool volume for accumulation confirmation.",
                )
            } else {
                (
                    "BUY CALLS",
                    "IV cheap post-beat + catalyst < 90 days.",
                    "Target 60-90 day expiry, delta 0.30-0.45. Spread if modest valuation \
                     discount; naked call if blowout beat.",
                )
            }
        },
    },
    Rule {
        id: "medium_dated_calls",
        preconditions: &[
            "iv_low || iv_moderate",
            "!catalyst_strong",
            "final >= 65",
            "risk_deduct < 6",
        ],
        predicate: |i| {
            (i.iv_low || i.iv_moderate)
                && !i.catalyst_strong
                && i.final_score >= 65
                && i.risk_deduct < 6
        },
        outcome: |i| {
            if i.flow_high {
                (
                    "BUY 120-210 DTE CALLS, FULL CONVICTION",
                    "IV reasonable + institutional accumulation confirmed + runway.",
                    "Target delta 0.35-0.50. Two earnings cycles. Spread reduces cost; \
                     naked call if conviction is high and discount is deep.",
                )
            } else {
                (
                    "BUY 120-210 DTE CALLS",
                    "IV reasonable, catalyst further out, longer expiry fits.",
                    "Target delta 0.35-0.50. Consider a bull call spread. If IV rank is \
                     high, reduce size or wait.",
                )
            }
        },
    },
    Rule {
        id: "leaps",
        preconditions: &["iv_low", "!catalyst_strong", "final >= 65"],
        predicate: |i| i.iv_low && !i.catalyst_strong && i.final_score >= 65,
        outcome: |i| {
            if i.flow_high {
                (
                    "BUY LEAPS, FULL CONVICTION",
                    "IV cheap + institutional accumulation confirmed, catalyst later.",
                    "January or later expiry. Delta 0.40-0.50. Thesis needs runway.",
                )
            } else {
                (
                    "BUY LEAPS",
                    "IV cheap but catalyst later, extend expiry.",
                    "January or later expiry. Avoid short-dated calls. Delta 0.40-0.50 to \
                     survive slow re-rating.",
                )
            }
        },
    },
    Rule {
        id: "iv_high_defer",
        preconditions: &["iv_high"],
        predicate: |i| i.iv_high,
        outcome: |_| {
            (
                "STOCK NOW, CALLS AFTER EARNINGS",
                "IV elevated pre-earnings, options expensive.",
                "Buy stock today. If earnings beat occurs and IV collapses, rotate into \
                 calls after earnings.",
            )
        },
    },
    Rule {
        id: "stock_full_size",
        preconditions: &["core_score >= 60", "timing_score >= 14"],
        predicate: |i| i.core_score >= 60 && i.timing_score >= 14,
        outcome: |i| {
            if i.flow_high {
                (
                    "STOCK, FULL SIZE + OVERWEIGHT",
                    "Core + timing strong + institutional accumulation confirmed.",
                    "Full position. Consider adding on pre-catalyst weakness.",
                )
            } else {
                (
                    "STOCK, FULL SIZE",
                    "Core + timing both strong.",
                    "Standard full position. Add on weakness. Review after next earnings \
                     report.",
                )
            }
        },
    },
    Rule {
        id: "stock_scale_in",
        preconditions: &["core_score >= 60", "timing_score < 10"],
        predicate: |i| i.core_score >= 60 && i.timing_score < 10,
        outcome: |_| {
            (
                "STOCK, SCALE IN",
                "Quality high, timing early.",
                "Build in thirds over 4-6 weeks. Add on dips or revision acceleration.",
            )
        },
    },
    // Unconditional fallback. The tree cannot exhaust while this is last.
    Rule {
        id: "stock_standard",
        preconditions: &["fallback"],
        predicate: |_| true,
        outcome: |_| {
            (
                "STOCK",
                "Balanced signal across core and timing.",
                "Standard entry. Monitor revision velocity weekly. Add if acceleration \
                 continues into catalyst window.",
            )
        },
    },
];

/// The ordered rule table, first match wins.
pub fn rules() -> &'static [Rule] {
    RULES
}

/// Evaluate the tree. Exactly one rule fires; exhaustion is a fatal
/// internal-consistency error, unreachable while the fallback is last.
pub fn recommend(inputs: &DecisionInputs) -> Result<Recommendation, ScoringError> {
    for rule in RULES {
        if rule.matches(inputs) {
            let (action, reason, detail) = (rule.outcome)(inputs);
            return Ok(Recommendation {
                action: action.to_string(),
                reason: reason.to_string(),
                detail: detail.to_string(),
                rule: rule.id.to_string(),
                preconditions: rule.preconditions.iter().map(|p| p.to_string()).collect(),
            });
        }
    }
    Err(ScoringError::DecisionTreeExhausted)
}
