//! Core-group interpreters: earnings, revisions, valuation, growth.

use scoring_core::{ConfidenceTag, FactorValue};
use serde_json::json;

use crate::normalize::NormalizedRecord;
use crate::sectors::SectorTables;

/// EPS surprise magnitude, in percent versus the consensus estimate.
///
/// Prefers the provider's own surprise percentage; derives it from the
/// actual/estimate pair when absent. A zero estimate has no meaningful
/// surprise percentage and stays unscored.
pub fn eps_surprise(record: &NormalizedRecord) -> FactorValue {
    let derived = match (record.eps_actual, record.eps_estimate) {
        (Some(actual), Some(estimate)) if estimate != 0.0 => {
            Some((actual - estimate) / estimate.abs() * 100.0)
        }
        _ => None,
    };

    let Some(pct) = record.eps_surprise_pct.or(derived) else {
        return FactorValue::unscored(json!({
            "actual": record.eps_actual,
            "estimate": record.eps_estimate,
        }));
    };

    let index = if pct >= 15.0 {
        4
    } else if pct >= 7.0 {
        3
    } else if pct <= -10.0 {
        0
    } else if pct <= -3.0 {
        1
    } else {
        2
    };

    // A pair that corroborates the provider percentage is the strongest case.
    let confidence = if derived.is_some() && record.eps_surprise_pct.is_some() {
        ConfidenceTag::High
    } else {
        ConfidenceTag::Medium
    };

    FactorValue::scored(
        index,
        confidence,
        json!({
            "surprise_pct": pct,
            "actual": record.eps_actual,
            "estimate": record.eps_estimate,
        }),
    )
}

/// Analyst estimate revision balance over the trailing window.
///
/// Zero revisions in either direction is zero evidence, not the mixed
/// bucket.
pub fn revisions(record: &NormalizedRecord) -> FactorValue {
    let (Some(up), Some(down)) = (record.revisions_up, record.revisions_down) else {
        return FactorValue::unscored(json!({
            "revisions_up": record.revisions_up,
            "revisions_down": record.revisions_down,
        }));
    };

    let total = up + down;
    if up < 0.0 || down < 0.0 || total <= 0.0 {
        return FactorValue::unscored(json!({
            "revisions_up": up,
            "revisions_down": down,
        }));
    }

    let ratio = up / total;
    let index = if down == 0.0 {
        4
    } else if ratio >= 0.70 {
        3
    } else if ratio >= 0.55 {
        2
    } else if ratio > 0.35 {
        1
    } else {
        0
    };

    FactorValue::scored(
        index,
        ConfidenceTag::Medium,
        json!({
            "revisions_up": up,
            "revisions_down": down,
            "up_ratio": ratio,
        }),
    )
}

/// Revision acceleration: net revisions this window vs the prior window.
pub fn revision_velocity(record: &NormalizedRecord) -> FactorValue {
    let (Some(up), Some(down), Some(up_prior), Some(down_prior)) = (
        record.revisions_up,
        record.revisions_down,
        record.revisions_up_prior,
        record.revisions_down_prior,
    ) else {
        return FactorValue::unscored(json!({
            "revisions_up": record.revisions_up,
            "revisions_down": record.revisions_down,
            "revisions_up_prior": record.revisions_up_prior,
            "revisions_down_prior": record.revisions_down_prior,
        }));
    };

    let net_recent = up - down;
    let net_prior = up_prior - down_prior;
    let delta = net_recent - net_prior;

    let index = if delta <= -2.0 {
        0
    } else if delta <= 1.0 {
        1
    } else if delta <= 3.0 {
        2
    } else if delta <= 6.0 {
        3
    } else {
        4
    };

    // Public revision feeds are messy; treat this as a weak read.
    FactorValue::scored(
        index,
        ConfidenceTag::Low,
        json!({
            "net_recent": net_recent,
            "net_prior": net_prior,
            "delta": delta,
        }),
    )
}

/// Relative valuation versus the sector reference multiple.
///
/// Non-monotonic on purpose: the modest-discount band scores highest, and
/// deeper discounts score progressively lower as value-trap candidates.
pub fn relative_valuation(record: &NormalizedRecord, tables: &SectorTables) -> FactorValue {
    let pe = record
        .forward_pe
        .or(record.trailing_pe)
        .filter(|pe| *pe > 0.0);

    let Some(pe) = pe else {
        return FactorValue::unscored(json!({
            "forward_pe": record.forward_pe,
            "trailing_pe": record.trailing_pe,
        }));
    };

    let (reference, resolved_sector) = tables.reference_pe(record.sector.as_deref());
    let discount_pct = (reference - pe) / reference * 100.0;

    let index = if discount_pct >= 30.0 {
        4
    } else if discount_pct >= 15.0 {
        3
    } else if discount_pct >= 5.0 {
        2
    } else if discount_pct > -20.0 {
        1
    } else {
        0
    };

    FactorValue::scored(
        index,
        ConfidenceTag::Medium,
        json!({
            "pe": pe,
            "sector": resolved_sector,
            "reference_pe": reference,
            "discount_pct": discount_pct,
            "table_version": tables.version,
        }),
    )
}

/// Quarter-over-quarter revenue growth.
pub fn revenue_momentum(record: &NormalizedRecord) -> FactorValue {
    let derived = match (record.revenue_latest, record.revenue_prior) {
        (Some(latest), Some(prior)) if prior > 0.0 => Some((latest - prior) / prior * 100.0),
        _ => None,
    };

    let Some(qoq_pct) = record.revenue_qoq_pct.or(derived) else {
        return FactorValue::unscored(json!({
            "revenue_latest": record.revenue_latest,
            "revenue_prior": record.revenue_prior,
        }));
    };

    let index = if qoq_pct < 0.0 {
        0
    } else if qoq_pct < 1.0 {
        1
    } else if qoq_pct < 5.0 {
        2
    } else if qoq_pct < 10.0 {
        3
    } else {
        4
    };

    FactorValue::scored(
        index,
        ConfidenceTag::Medium,
        json!({
            "qoq_pct": qoq_pct,
            "revenue_latest": record.revenue_latest,
            "revenue_prior": record.revenue_prior,
        }),
    )
}

/// EPS growth shape across this year and next year's estimates.
///
/// The flat-this-year / strong-next-year combination is the turnaround
/// asymmetry the table rewards at index 3.
pub fn eps_inflection(record: &NormalizedRecord) -> FactorValue {
    let (Some(this_yr), Some(next_yr)) = (
        record.eps_growth_this_yr_pct,
        record.eps_growth_next_yr_pct,
    ) else {
        return FactorValue::unscored(json!({
            "growth_this_yr_pct": record.eps_growth_this_yr_pct,
            "growth_next_yr_pct": record.eps_growth_next_yr_pct,
        }));
    };

    let index = if this_yr < 0.0 && next_yr < 0.0 {
        0
    } else if this_yr >= 10.0 && next_yr > this_yr {
        4
    } else if this_yr < 5.0 && next_yr >= 15.0 {
        3
    } else if this_yr >= 2.0 && next_yr >= 2.0 {
        2
    } else {
        1
    };

    FactorValue::scored(
        index,
        ConfidenceTag::Medium,
        json!({
            "growth_this_yr_pct": this_yr,
            "growth_next_yr_pct": next_yr,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> NormalizedRecord {
        NormalizedRecord::default()
    }

    #[test]
    fn eps_surprise_bands() {
        let cases = [
            (-25.0, 0),
            (-10.0, 0),
            (-9.9, 1),
            (-3.0, 1),
            (-2.9, 2),
            (0.0, 2),
            (6.9, 2),
            (7.0, 3),
            (14.9, 3),
            (15.0, 4),
            (300.0, 4),
        ];
        for (pct, expected) in cases {
            let r = NormalizedRecord {
                eps_surprise_pct: Some(pct),
                ..record()
            };
            assert_eq!(eps_surprise(&r).index, Some(expected), "pct={pct}");
        }
    }

    #[test]
    fn eps_surprise_derives_from_pair() {
        let r = NormalizedRecord {
            eps_actual: Some(1.15),
            eps_estimate: Some(1.0),
            ..record()
        };
        let value = eps_surprise(&r);
        assert_eq!(value.index, Some(4));
        assert_eq!(value.evidence["surprise_pct"].as_f64().unwrap(), 15.0);
    }

    #[test]
    fn eps_surprise_zero_estimate_is_unscored() {
        let r = NormalizedRecord {
            eps_actual: Some(0.5),
            eps_estimate: Some(0.0),
            ..record()
        };
        assert_eq!(eps_surprise(&r).index, None);
    }

    #[test]
    fn revisions_zero_evidence_is_unscored_not_mixed() {
        let r = NormalizedRecord {
            revisions_up: Some(0.0),
            revisions_down: Some(0.0),
            ..record()
        };
        let value = revisions(&r);
        assert_eq!(value.index, None);
        assert_eq!(value.confidence, ConfidenceTag::Low);
    }

    #[test]
    fn revisions_bands() {
        let cases = [
            (1.0, 9.0, 0),  // ratio 0.10
            (4.0, 6.0, 1),  // ratio 0.40
            (6.0, 4.0, 2),  // ratio 0.60
            (8.0, 2.0, 3),  // ratio 0.80
            (5.0, 0.0, 4),  // all up, zero down
        ];
        for (up, down, expected) in cases {
            let r = NormalizedRecord {
                revisions_up: Some(up),
                revisions_down: Some(down),
                ..record()
            };
            assert_eq!(revisions(&r).index, Some(expected), "up={up} down={down}");
        }
    }

    #[test]
    fn revision_velocity_bands() {
        // net_recent - net_prior drives the index.
        let cases = [(-4.0, 0), (0.0, 1), (2.0, 2), (5.0, 3), (8.0, 4)];
        for (delta, expected) in cases {
            let r = NormalizedRecord {
                revisions_up: Some(delta),
                revisions_down: Some(0.0),
                revisions_up_prior: Some(0.0),
                revisions_down_prior: Some(0.0),
                ..record()
            };
            assert_eq!(revision_velocity(&r).index, Some(expected), "delta={delta}");
        }
    }

    #[test]
    fn valuation_moderate_discount_beats_deep_discount() {
        let tables = SectorTables::default();
        // Technology reference is 28: 10% discount vs 40% discount.
        let modest = NormalizedRecord {
            forward_pe: Some(25.2),
            sector: Some("Technology".to_string()),
            ..record()
        };
        let deep = NormalizedRecord {
            forward_pe: Some(16.8),
            sector: Some("Technology".to_string()),
            ..record()
        };
        let modest_value = relative_valuation(&modest, &tables);
        let deep_value = relative_valuation(&deep, &tables);
        assert_eq!(modest_value.index, Some(2));
        assert_eq!(deep_value.index, Some(4));

        let def = scoring_core::definition(scoring_core::FactorId::RelativeValuation);
        assert!(def.realized(2) > def.realized(4));
    }

    #[test]
    fn valuation_bands_cover_extremes() {
        let tables = SectorTables::default();
        // Reference for Unknown is 18.
        let premium = NormalizedRecord {
            trailing_pe: Some(1000.0),
            ..record()
        };
        assert_eq!(relative_valuation(&premium, &tables).index, Some(0));

        let tiny = NormalizedRecord {
            trailing_pe: Some(0.5),
            ..record()
        };
        assert_eq!(relative_valuation(&tiny, &tables).index, Some(4));
    }

    #[test]
    fn valuation_negative_pe_is_unscored() {
        let tables = SectorTables::default();
        let r = NormalizedRecord {
            trailing_pe: Some(-12.0),
            ..record()
        };
        assert_eq!(relative_valuation(&r, &tables).index, None);
    }

    #[test]
    fn valuation_prefers_forward_pe() {
        let tables = SectorTables::default();
        let r = NormalizedRecord {
            forward_pe: Some(16.0),
            trailing_pe: Some(40.0),
            sector: Some("Technology".to_string()),
            ..record()
        };
        let value = relative_valuation(&r, &tables);
        assert_eq!(value.evidence["pe"].as_f64().unwrap(), 16.0);
    }

    #[test]
    fn revenue_momentum_bands() {
        let cases = [(-3.0, 0), (0.5, 1), (3.0, 2), (7.0, 3), (12.0, 4)];
        for (pct, expected) in cases {
            let r = NormalizedRecord {
                revenue_qoq_pct: Some(pct),
                ..record()
            };
            assert_eq!(revenue_momentum(&r).index, Some(expected), "pct={pct}");
        }
    }

    #[test]
    fn revenue_momentum_requires_positive_prior() {
        let r = NormalizedRecord {
            revenue_latest: Some(100.0),
            revenue_prior: Some(0.0),
            ..record()
        };
        assert_eq!(revenue_momentum(&r).index, None);
    }

    #[test]
    fn eps_inflection_rewards_turnaround_shape() {
        let turnaround = NormalizedRecord {
            eps_growth_this_yr_pct: Some(1.0),
            eps_growth_next_yr_pct: Some(40.0),
            ..record()
        };
        assert_eq!(eps_inflection(&turnaround).index, Some(3));

        let compounder = NormalizedRecord {
            eps_growth_this_yr_pct: Some(15.0),
            eps_growth_next_yr_pct: Some(25.0),
            ..record()
        };
        assert_eq!(eps_inflection(&compounder).index, Some(4));

        let decliner = NormalizedRecord {
            eps_growth_this_yr_pct: Some(-5.0),
            eps_growth_next_yr_pct: Some(-2.0),
            ..record()
        };
        assert_eq!(eps_inflection(&decliner).index, Some(0));
    }

    #[test]
    fn evidence_round_trips_through_band_formula() {
        // Feeding the recorded surprise percentage back through the band
        // thresholds reproduces the emitted index.
        let r = NormalizedRecord {
            eps_actual: Some(2.2),
            eps_estimate: Some(2.0),
            ..record()
        };
        let value = eps_surprise(&r);
        let pct = value.evidence["surprise_pct"].as_f64().unwrap();
        let reindex = if pct >= 15.0 {
            4
        } else if pct >= 7.0 {
            3
        } else if pct <= -10.0 {
            0
        } else if pct <= -3.0 {
            1
        } else {
            2
        };
        assert_eq!(value.index, Some(reindex));
    }
}
