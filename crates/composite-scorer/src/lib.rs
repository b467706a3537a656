//! Composite scorer: weighted Core/Timing/Risk aggregation into the final
//! 0-100 score, plus the completeness percentage and the
//! completeness-gated confidence label.

mod confidence;

pub use confidence::confidence_label;

use std::collections::HashMap;

use scoring_core::{
    all_factors, FactorId, FactorValue, ScoreResult, CORE_FACTORS, CORE_MAX, FACTOR_COUNT,
    RISK_CEILING, RISK_FACTORS, TIMING_FACTORS, TIMING_MAX,
};

fn group_sum(defs: &[scoring_core::FactorDefinition], values: &HashMap<FactorId, FactorValue>) -> i32 {
    defs.iter()
        .filter_map(|def| {
            values
                .get(&def.id)
                .and_then(|value| value.index)
                .map(|index| def.realized(index))
        })
        .sum()
}

/// Compute the composite score breakdown.
///
/// Unscored factors contribute zero to their group sum while the group
/// denominators stay at their full fixed maxima; missing data dilutes the
/// score, it never re-normalizes it.
pub fn compute_scores(values: &HashMap<FactorId, FactorValue>) -> ScoreResult {
    let core_raw = group_sum(CORE_FACTORS, values);
    let timing_raw = group_sum(TIMING_FACTORS, values);
    let risk_penalty = group_sum(RISK_FACTORS, values);
    let risk_deduct = risk_penalty.min(RISK_CEILING);

    // The maxima are positive compile-time constants; the guards keep the
    // arithmetic total even if a future table edit zeroed one out.
    let core_score = if CORE_MAX > 0 {
        ((core_raw as f64 / CORE_MAX as f64) * 80.0).round() as i32
    } else {
        0
    };
    let timing_score = if TIMING_MAX > 0 {
        ((timing_raw as f64 / TIMING_MAX as f64) * 20.0).round() as i32
    } else {
        0
    };

    // The divisor is the literal constant 80, not TIMING_MAX: the
    // multiplier spans [0.75, 1.0] over the timing range.
    let timing_multiplier = 0.75 + timing_raw as f64 / 80.0;
    let pre_risk = core_score as f64 * timing_multiplier;
    let final_score = ((pre_risk - risk_deduct as f64).round() as i32).clamp(0, 100);

    ScoreResult {
        core_raw,
        timing_raw,
        risk_penalty,
        risk_deduct,
        core_score,
        timing_score,
        timing_multiplier,
        pre_risk,
        final_score,
    }
}

/// Percentage of all known factors carrying a non-null value, 0-100.
pub fn completeness_pct(values: &HashMap<FactorId, FactorValue>) -> u8 {
    let filled = all_factors()
        .filter(|def| {
            values
                .get(&def.id)
                .map(|value| value.is_scored())
                .unwrap_or(false)
        })
        .count();
    ((filled as f64 / FACTOR_COUNT as f64) * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use scoring_core::{definition, ConfidenceTag, OVERLAY_FACTORS};
    use serde_json::Value;

    fn scored(index: usize) -> FactorValue {
        FactorValue::scored(index, ConfidenceTag::Medium, Value::Null)
    }

    /// Best-scoring sheet: every Core/Timing factor at its highest-value
    /// anchor, every Risk factor at the zero-penalty anchor.
    fn best_sheet() -> HashMap<FactorId, FactorValue> {
        let mut values = HashMap::new();
        for def in CORE_FACTORS.iter().chain(TIMING_FACTORS.iter()) {
            let best = (0..def.levels())
                .max_by_key(|i| def.realized(*i))
                .unwrap();
            values.insert(def.id, scored(best));
        }
        for def in RISK_FACTORS {
            values.insert(def.id, scored(0));
        }
        values
    }

    #[test]
    fn best_sheet_hits_formula_maximum() {
        let result = compute_scores(&best_sheet());
        assert_eq!(result.core_raw, 80);
        assert_eq!(result.timing_raw, 20);
        assert_eq!(result.core_score, 80);
        assert_eq!(result.timing_score, 20);
        assert_eq!(result.risk_deduct, 0);
        assert_relative_eq!(result.timing_multiplier, 1.0);
        // 80 * (0.75 + 20/80) - 0: the formula's attainable ceiling.
        assert_eq!(result.final_score, 80);
    }

    #[test]
    fn empty_sheet_scores_zero() {
        let result = compute_scores(&HashMap::new());
        assert_eq!(result.core_raw, 0);
        assert_eq!(result.timing_raw, 0);
        assert_eq!(result.core_score, 0);
        assert_eq!(result.timing_score, 0);
        assert_eq!(result.final_score, 0);
        assert_relative_eq!(result.timing_multiplier, 0.75);
    }

    #[test]
    fn unscored_factor_contributes_zero_against_full_denominator() {
        let mut values = best_sheet();
        values.insert(FactorId::EpsSurprise, FactorValue::unscored(Value::Null));
        let result = compute_scores(&values);
        // 80 - 20 = 60 core raw; the denominator stays 80.
        assert_eq!(result.core_raw, 60);
        assert_eq!(result.core_score, 60);
    }

    #[test]
    fn risk_deduct_clamps_to_ceiling() {
        let mut values = HashMap::new();
        for def in RISK_FACTORS {
            values.insert(def.id, scored(def.levels() - 1));
        }
        let result = compute_scores(&values);
        assert_eq!(result.risk_penalty, 15);
        assert_eq!(result.risk_deduct, 15);

        // Only risk populated: final clamps at zero, never negative.
        assert_eq!(result.final_score, 0);
    }

    #[test]
    fn risk_only_sheet_clamps_exactly_at_ceiling() {
        // Push every risk factor to maximum severity and verify the cap is
        // exactly the ceiling, not the raw sum, even if tables change shape.
        let mut values = HashMap::new();
        for def in RISK_FACTORS {
            values.insert(def.id, scored(def.levels() - 1));
        }
        let raw: i32 = RISK_FACTORS
            .iter()
            .map(|def| def.realized(def.levels() - 1))
            .sum();
        let result = compute_scores(&values);
        assert_eq!(result.risk_penalty, raw);
        assert_eq!(result.risk_deduct, raw.min(RISK_CEILING));
    }

    #[test]
    fn bounds_hold_under_random_sheets() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2000 {
            let mut values = HashMap::new();
            for def in CORE_FACTORS
                .iter()
                .chain(TIMING_FACTORS.iter())
                .chain(RISK_FACTORS.iter())
                .chain(OVERLAY_FACTORS.iter())
            {
                // Roughly a quarter of factors left unscored.
                if rng.gen_bool(0.25) {
                    values.insert(def.id, FactorValue::unscored(Value::Null));
                } else {
                    values.insert(def.id, scored(rng.gen_range(0..def.levels())));
                }
            }
            let result = compute_scores(&values);
            assert!((0..=80).contains(&result.core_score));
            assert!((0..=20).contains(&result.timing_score));
            assert!((0..=15).contains(&result.risk_deduct));
            assert!((0..=100).contains(&result.final_score));
        }
    }

    #[test]
    fn raising_core_or_timing_never_lowers_final() {
        // relative_valuation is excluded: its non-monotonic table is policy.
        let mut rng = StdRng::seed_from_u64(11);
        let monotonic: Vec<_> = CORE_FACTORS
            .iter()
            .chain(TIMING_FACTORS.iter())
            .filter(|def| def.id != FactorId::RelativeValuation)
            .collect();

        for _ in 0..500 {
            let mut values = HashMap::new();
            for def in CORE_FACTORS
                .iter()
                .chain(TIMING_FACTORS.iter())
                .chain(RISK_FACTORS.iter())
            {
                values.insert(def.id, scored(rng.gen_range(0..def.levels())));
            }
            for def in &monotonic {
                let current = values[&def.id].index.unwrap();
                if current + 1 >= def.levels() {
                    continue;
                }
                let before = compute_scores(&values).final_score;
                let mut bumped = values.clone();
                bumped.insert(def.id, scored(current + 1));
                let after = compute_scores(&bumped).final_score;
                assert!(
                    after >= before,
                    "{}: {current} -> {} dropped final {before} -> {after}",
                    def.id.as_str(),
                    current + 1
                );
            }
        }
    }

    #[test]
    fn raising_risk_severity_never_raises_final() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..500 {
            let mut values = HashMap::new();
            for def in CORE_FACTORS
                .iter()
                .chain(TIMING_FACTORS.iter())
                .chain(RISK_FACTORS.iter())
            {
                values.insert(def.id, scored(rng.gen_range(0..def.levels())));
            }
            for def in RISK_FACTORS {
                let current = values[&def.id].index.unwrap();
                if current + 1 >= def.levels() {
                    continue;
                }
                let before = compute_scores(&values).final_score;
                let mut bumped = values.clone();
                bumped.insert(def.id, scored(current + 1));
                let after = compute_scores(&bumped).final_score;
                assert!(after <= before, "{}: severity bump raised final", def.id.as_str());
            }
        }
    }

    #[test]
    fn valuation_moderate_discount_strictly_beats_deep_discount() {
        let mut base = best_sheet();
        base.insert(FactorId::RelativeValuation, scored(2));
        let moderate = compute_scores(&base).final_score;
        base.insert(FactorId::RelativeValuation, scored(4));
        let deep = compute_scores(&base).final_score;
        assert!(moderate > deep);
    }

    #[test]
    fn completeness_counts_all_groups() {
        assert_eq!(completeness_pct(&HashMap::new()), 0);

        let mut values = HashMap::new();
        for def in CORE_FACTORS.iter().take(4) {
            values.insert(def.id, scored(0));
        }
        for def in OVERLAY_FACTORS {
            values.insert(def.id, scored(0));
        }
        // 6 of 16 factors filled.
        assert_eq!(completeness_pct(&values), 38);

        // Unscored entries do not count as filled.
        values.insert(FactorId::TrendHealth, FactorValue::unscored(Value::Null));
        assert_eq!(completeness_pct(&values), 38);
    }

    #[test]
    fn realized_lookup_is_exact_for_every_index() {
        for def in scoring_core::all_factors() {
            for index in 0..def.levels() {
                let mut values = HashMap::new();
                values.insert(def.id, scored(index));
                let result = compute_scores(&values);
                let expected = definition(def.id).realized(index);
                let observed = result.core_raw + result.timing_raw + result.risk_penalty;
                match scoring_core::group_of(def.id) {
                    scoring_core::FactorGroup::Overlay => assert_eq!(observed, 0),
                    _ => assert_eq!(observed, expected),
                }
            }
        }
    }
}
