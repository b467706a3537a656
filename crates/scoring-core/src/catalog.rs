//! The fixed factor catalog.
//!
//! Score and anchor tables are hand-specified constants, not fitted values.
//! Risk tables ascend in severity: index 0 is the zero-penalty anchor.

use crate::error::ScoringError;
use crate::types::{FactorGroup, FactorId};

/// Immutable descriptor for one factor.
///
/// Invariants, checked by [`validate_catalog`]: `values` and `anchors` have
/// equal length, and `weight` equals the maximum table value.
#[derive(Debug, Clone, Copy)]
pub struct FactorDefinition {
    pub id: FactorId,
    pub label: &'static str,
    pub description: &'static str,
    pub weight: i32,
    /// Realized score (Core/Timing/Overlay) or penalty (Risk) per index.
    pub values: &'static [i32],
    /// Human-readable description of each discrete level.
    pub anchors: &'static [&'static str],
}

impl FactorDefinition {
    /// Number of discrete levels.
    pub fn levels(&self) -> usize {
        self.values.len()
    }

    /// Realized table value for an ordinal index, clamped into range.
    pub fn realized(&self, index: usize) -> i32 {
        self.values[index.min(self.values.len() - 1)]
    }
}

pub const CORE_FACTORS: &[FactorDefinition] = &[
    FactorDefinition {
        id: FactorId::EpsSurprise,
        label: "EPS Surprise Magnitude",
        description: "Beat vs consensus estimate last quarter",
        weight: 20,
        values: &[0, 4, 10, 16, 20],
        anchors: &[
            "Miss / in-line < 1%",
            "Small beat 1-5%",
            "Solid beat 5-10%",
            "Strong beat 10-20%",
            "Blowout > 20%",
        ],
    },
    FactorDefinition {
        id: FactorId::Revisions,
        label: "Estimate Revision Level",
        description: "Direction of analyst EPS changes, last 90 days",
        weight: 16,
        values: &[0, 3, 8, 13, 16],
        anchors: &[
            "Mostly downward",
            "Mixed / flat",
            "More up than down",
            "Majority upward",
            "All up, zero down",
        ],
    },
    FactorDefinition {
        id: FactorId::RevisionVelocity,
        label: "Revision Acceleration",
        description: "Speed of revision change, velocity predicts momentum",
        weight: 6,
        values: &[0, 1, 3, 5, 6],
        anchors: &[
            "Decelerating / reversing",
            "Flat, no acceleration",
            "Modest pick-up",
            "Clearly accelerating",
            "Rapid acceleration post-beat",
        ],
    },
    FactorDefinition {
        id: FactorId::SectorTailwind,
        label: "Sector Tailwind",
        description: "Industry revisions, rate cycle, commodity / spend trajectory",
        weight: 14,
        values: &[0, 3, 7, 11, 14],
        anchors: &[
            "Sector headwind",
            "Neutral",
            "Modest tailwind",
            "Strong structural cycle",
            "Dominant cycle (hard market / AI / defense)",
        ],
    },
    // Non-monotonic on purpose: a moderate discount to the sector multiple
    // scores highest; a deep discount is a possible value trap.
    FactorDefinition {
        id: FactorId::RelativeValuation,
        label: "Relative Valuation",
        description: "Forward P/E vs sector reference, nonlinear scoring",
        weight: 12,
        values: &[0, 4, 12, 10, 7],
        anchors: &[
            "Premium > 20% above sector",
            "In-line with sector",
            "Modest discount 5-15%",
            "Meaningful discount 15-30%",
            "Deep discount > 30%",
        ],
    },
    FactorDefinition {
        id: FactorId::RevenueMomentum,
        label: "Revenue Acceleration",
        description: "Beat quality, real top-line growth, not just cost cuts",
        weight: 6,
        values: &[0, 1, 3, 5, 6],
        anchors: &[
            "Revenue declining",
            "Flat QoQ",
            "Growing 1-5% QoQ",
            "Growing 5-10% QoQ",
            "Accelerating > 10% QoQ",
        ],
    },
    FactorDefinition {
        id: FactorId::EpsInflection,
        label: "EPS Inflection Profile",
        description: "Flat this year / exploding next = turnaround asymmetry",
        weight: 6,
        values: &[0, 1, 3, 6, 6],
        anchors: &[
            "Both years declining",
            "Flat both years",
            "Moderate growth both",
            "Flat this yr / strong next (inflection)",
            "Strong this yr + accelerating next",
        ],
    },
];

pub const TIMING_FACTORS: &[FactorDefinition] = &[
    FactorDefinition {
        id: FactorId::CatalystProximity,
        label: "Catalyst Proximity",
        description: "Specific event within 120 days, earnings, investor day, acquisition close",
        weight: 12,
        values: &[0, 2, 6, 9, 12],
        anchors: &[
            "No catalyst identified",
            "Vague / > 120 days",
            "Earnings 90-120 days",
            "Earnings + conference 60-90 days",
            "Hard catalyst < 60 days",
        ],
    },
    FactorDefinition {
        id: FactorId::TrendHealth,
        label: "Trend Health",
        description: "Price vs 200-day MA + relative strength vs SPY",
        weight: 4,
        values: &[0, 1, 2, 3, 4],
        anchors: &[
            "Below 200-day, underperforming SPY badly",
            "Below 200-day but resilient",
            "Above 200-day, lagging SPY",
            "Above 200-day, flat vs SPY (resilience)",
            "Above 200-day, breaking out vs SPY",
        ],
    },
    FactorDefinition {
        id: FactorId::Accumulation,
        label: "Accumulation Pattern",
        description: "Volume behavior, institutional buying precedes moves",
        weight: 4,
        values: &[0, 1, 2, 3, 4],
        anchors: &[
            "Distribution: high vol, price falling",
            "Neutral / no pattern",
            "Quiet accumulation",
            "Above-avg vol, price holding base",
            "Clear accumulation: vol surge + base breakout",
        ],
    },
];

pub const RISK_FACTORS: &[FactorDefinition] = &[
    FactorDefinition {
        id: FactorId::BinaryRisk,
        label: "Binary Event Risk",
        description: "FDA ruling, DOJ action, regulatory decision with +/-30% move potential",
        weight: 5,
        values: &[0, 0, 1, 3, 5],
        anchors: &[
            "No binary risk",
            "Minimal event risk",
            "Some regulatory exposure",
            "Significant event risk",
            "Major binary pending, thesis-ending risk",
        ],
    },
    FactorDefinition {
        id: FactorId::BalanceSheet,
        label: "Balance Sheet Stress",
        description: "Leverage, debt maturity, covenant risk",
        weight: 4,
        values: &[0, 0, 1, 2, 4],
        anchors: &[
            "Net cash position",
            "Clean balance sheet",
            "Moderate leverage, manageable",
            "Elevated leverage, limited headroom",
            "Near-distress / covenant breach risk",
        ],
    },
    FactorDefinition {
        id: FactorId::ThesisRisk,
        label: "Thesis Integrity",
        description: "How likely is the core thesis to hold for 3-6 months?",
        weight: 4,
        values: &[0, 0, 1, 2, 4],
        anchors: &[
            "Thesis confirmed and accelerating",
            "Thesis well-supported",
            "Some noise, core intact",
            "Significant uncertainty",
            "Thesis actively undermined by new data",
        ],
    },
    FactorDefinition {
        id: FactorId::MacroSensitivity,
        label: "Macro Sensitivity",
        description: "Exposure to credit cycle, commodity, rate shock, tariffs",
        weight: 2,
        values: &[0, 0, 0, 1, 2],
        anchors: &[
            "Counter-cyclical / macro-neutral",
            "Defensive characteristics",
            "Moderate exposure",
            "Significant macro sensitivity",
            "Highly exposed, thesis breaks in downturn",
        ],
    },
];

pub const OVERLAY_FACTORS: &[FactorDefinition] = &[
    FactorDefinition {
        id: FactorId::InstitutionalFlow,
        label: "Institutional Flow",
        description: "Long-only initiation + multi-strat accumulation post-beat",
        weight: 11,
        values: &[0, 2, 5, 8, 11],
        anchors: &[
            "Net selling / exiting",
            "No significant change",
            "Some long-only initiation",
            "Multiple quality funds entering",
            "Long-only + multi-strat both accumulating",
        ],
    },
    FactorDefinition {
        id: FactorId::IvEnvironment,
        label: "IV Environment",
        description: "Call buying attractiveness, low IV post-beat is optimal",
        weight: 2,
        values: &[0, 1, 2, 2, 1],
        anchors: &[
            "IV elevated pre-earnings (favor stock)",
            "IV moderate / neutral",
            "IV collapsed post-beat (calls cheap)",
            "IV near 52-wk low + catalyst ahead",
            "N/A, stock only",
        ],
    },
];

const fn sum_weights(defs: &[FactorDefinition]) -> i32 {
    let mut total = 0;
    let mut i = 0;
    while i < defs.len() {
        total += defs[i].weight;
        i += 1;
    }
    total
}

/// Fixed attainable maximum of the Core group.
pub const CORE_MAX: i32 = sum_weights(CORE_FACTORS);

/// Fixed attainable maximum of the Timing group.
pub const TIMING_MAX: i32 = sum_weights(TIMING_FACTORS);

/// Hard ceiling on the risk deduction, regardless of how many factors fire.
pub const RISK_CEILING: i32 = 15;

/// Total factor count across all groups, the completeness denominator.
pub const FACTOR_COUNT: usize =
    CORE_FACTORS.len() + TIMING_FACTORS.len() + RISK_FACTORS.len() + OVERLAY_FACTORS.len();

/// Factors that are only ever operator-supplied, never auto-interpreted.
pub const ALWAYS_MANUAL: &[FactorId] = &[
    FactorId::SectorTailwind,
    FactorId::BinaryRisk,
    FactorId::ThesisRisk,
    FactorId::InstitutionalFlow,
    FactorId::IvEnvironment,
];

pub fn is_always_manual(id: FactorId) -> bool {
    ALWAYS_MANUAL.contains(&id)
}

/// Iterate every factor definition, Core first, Overlay last.
pub fn all_factors() -> impl Iterator<Item = &'static FactorDefinition> {
    CORE_FACTORS
        .iter()
        .chain(TIMING_FACTORS.iter())
        .chain(RISK_FACTORS.iter())
        .chain(OVERLAY_FACTORS.iter())
}

pub fn group_of(id: FactorId) -> FactorGroup {
    match id {
        FactorId::EpsSurprise
        | FactorId::Revisions
        | FactorId::RevisionVelocity
        | FactorId::SectorTailwind
        | FactorId::RelativeValuation
        | FactorId::RevenueMomentum
        | FactorId::EpsInflection => FactorGroup::Core,
        FactorId::CatalystProximity | FactorId::TrendHealth | FactorId::Accumulation => {
            FactorGroup::Timing
        }
        FactorId::BinaryRisk
        | FactorId::BalanceSheet
        | FactorId::ThesisRisk
        | FactorId::MacroSensitivity => FactorGroup::Risk,
        FactorId::InstitutionalFlow | FactorId::IvEnvironment => FactorGroup::Overlay,
    }
}

/// Look up a factor's definition.
pub fn definition(id: FactorId) -> &'static FactorDefinition {
    match id {
        FactorId::EpsSurprise => &CORE_FACTORS[0],
        FactorId::Revisions => &CORE_FACTORS[1],
        FactorId::RevisionVelocity => &CORE_FACTORS[2],
        FactorId::SectorTailwind => &CORE_FACTORS[3],
        FactorId::RelativeValuation => &CORE_FACTORS[4],
        FactorId::RevenueMomentum => &CORE_FACTORS[5],
        FactorId::EpsInflection => &CORE_FACTORS[6],
        FactorId::CatalystProximity => &TIMING_FACTORS[0],
        FactorId::TrendHealth => &TIMING_FACTORS[1],
        FactorId::Accumulation => &TIMING_FACTORS[2],
        FactorId::BinaryRisk => &RISK_FACTORS[0],
        FactorId::BalanceSheet => &RISK_FACTORS[1],
        FactorId::ThesisRisk => &RISK_FACTORS[2],
        FactorId::MacroSensitivity => &RISK_FACTORS[3],
        FactorId::InstitutionalFlow => &OVERLAY_FACTORS[0],
        FactorId::IvEnvironment => &OVERLAY_FACTORS[1],
    }
}

/// Check every construction-time invariant of the catalog.
///
/// A violation here is a programming error, caught at engine startup and
/// under test, never at evaluation time.
pub fn validate_catalog() -> Result<(), ScoringError> {
    for def in all_factors() {
        if def.values.is_empty() {
            return Err(ScoringError::Catalog(format!(
                "{}: empty score table",
                def.id.as_str()
            )));
        }
        if def.values.len() != def.anchors.len() {
            return Err(ScoringError::Catalog(format!(
                "{}: {} values vs {} anchors",
                def.id.as_str(),
                def.values.len(),
                def.anchors.len()
            )));
        }
        let max = def.values.iter().copied().max().unwrap_or(0);
        if def.weight != max {
            return Err(ScoringError::Catalog(format!(
                "{}: weight {} does not match table maximum {}",
                def.id.as_str(),
                def.weight,
                max
            )));
        }
        if def.values.iter().any(|v| *v < 0) {
            return Err(ScoringError::Catalog(format!(
                "{}: negative table value",
                def.id.as_str()
            )));
        }
        // The definition() match must route every id back to itself.
        if definition(def.id).id != def.id {
            return Err(ScoringError::Catalog(format!(
                "{}: definition lookup mismatch",
                def.id.as_str()
            )));
        }
    }
    if CORE_MAX <= 0 || TIMING_MAX <= 0 {
        return Err(ScoringError::Catalog(
            "group maxima must be positive".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_consistent() {
        validate_catalog().unwrap();
    }

    #[test]
    fn group_maxima_match_source_constants() {
        assert_eq!(CORE_MAX, 80);
        assert_eq!(TIMING_MAX, 20);
        assert_eq!(FACTOR_COUNT, 16);
    }

    #[test]
    fn risk_tables_ascend_in_severity() {
        for def in RISK_FACTORS {
            assert_eq!(def.values[0], 0, "{} index 0 must be zero-penalty", def.id.as_str());
            for pair in def.values.windows(2) {
                assert!(pair[1] >= pair[0], "{} penalties must not decrease", def.id.as_str());
            }
        }
        let max_penalty: i32 = RISK_FACTORS.iter().map(|d| d.weight).sum();
        assert_eq!(max_penalty, RISK_CEILING);
    }

    #[test]
    fn realized_returns_exact_table_values() {
        let def = definition(FactorId::EpsSurprise);
        for (i, &v) in def.values.iter().enumerate() {
            assert_eq!(def.realized(i), v);
        }
        // Out-of-range input clamps to the top bucket rather than panicking.
        assert_eq!(def.realized(99), *def.values.last().unwrap());
    }

    #[test]
    fn valuation_table_is_non_monotonic() {
        let def = definition(FactorId::RelativeValuation);
        // Modest discount beats both meaningful and deep discount.
        assert!(def.values[2] > def.values[3]);
        assert!(def.values[3] > def.values[4]);
        assert_eq!(def.weight, def.values[2]);
    }

    #[test]
    fn always_manual_set_is_exactly_the_operator_factors() {
        assert_eq!(ALWAYS_MANUAL.len(), 5);
        assert!(is_always_manual(FactorId::SectorTailwind));
        assert!(is_always_manual(FactorId::BinaryRisk));
        assert!(is_always_manual(FactorId::ThesisRisk));
        assert!(is_always_manual(FactorId::InstitutionalFlow));
        assert!(is_always_manual(FactorId::IvEnvironment));
        assert!(!is_always_manual(FactorId::EpsSurprise));
    }

    #[test]
    fn every_factor_has_a_group() {
        let core: Vec<_> = all_factors().filter(|d| group_of(d.id) == FactorGroup::Core).collect();
        let timing: Vec<_> = all_factors().filter(|d| group_of(d.id) == FactorGroup::Timing).collect();
        let risk: Vec<_> = all_factors().filter(|d| group_of(d.id) == FactorGroup::Risk).collect();
        let overlay: Vec<_> = all_factors().filter(|d| group_of(d.id) == FactorGroup::Overlay).collect();
        assert_eq!(core.len(), 7);
        assert_eq!(timing.len(), 3);
        assert_eq!(risk.len(), 4);
        assert_eq!(overlay.len(), 2);
    }
}
