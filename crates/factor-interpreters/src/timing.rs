//! Timing-group interpreters: catalysts, trend, volume behavior.

use scoring_core::{ConfidenceTag, FactorValue};
use serde_json::json;

use crate::normalize::NormalizedRecord;

/// Days until the next identified catalyst.
///
/// Index 0 ("no catalyst identified") is an operator statement; a missing
/// days field is missing evidence, not a verdict that no catalyst exists.
pub fn catalyst_proximity(record: &NormalizedRecord) -> FactorValue {
    let Some(days) = record.days_to_catalyst else {
        return FactorValue::unscored(json!({ "days_to_catalyst": null }));
    };
    if days < 0.0 {
        // Already passed.
        return FactorValue::unscored(json!({ "days_to_catalyst": days }));
    }

    let index = if days < 60.0 {
        4
    } else if days < 90.0 {
        3
    } else if days < 120.0 {
        2
    } else {
        1
    };

    FactorValue::scored(
        index,
        ConfidenceTag::Medium,
        json!({ "days_to_catalyst": days }),
    )
}

/// Price versus the 200-day moving average plus relative strength.
pub fn trend_health(record: &NormalizedRecord) -> FactorValue {
    let (Some(price), Some(ma_200), Some(rel_strength)) =
        (record.price, record.ma_200, record.rel_strength_pct)
    else {
        return FactorValue::unscored(json!({
            "price": record.price,
            "ma_200": record.ma_200,
            "rel_strength_pct": record.rel_strength_pct,
        }));
    };
    if price <= 0.0 || ma_200 <= 0.0 {
        return FactorValue::unscored(json!({ "price": price, "ma_200": ma_200 }));
    }

    let above_ma = price >= ma_200;
    let index = if !above_ma {
        if rel_strength <= -10.0 {
            0
        } else {
            1
        }
    } else if rel_strength < -2.0 {
        2
    } else if rel_strength < 5.0 {
        3
    } else {
        4
    };

    FactorValue::scored(
        index,
        ConfidenceTag::Medium,
        json!({
            "price": price,
            "ma_200": ma_200,
            "above_ma": above_ma,
            "rel_strength_pct": rel_strength,
        }),
    )
}

/// Volume/price accumulation pattern.
///
/// Only clear patterns score. Ambiguous combinations stay unscored rather
/// than landing in the neutral bucket, which remains operator-selectable.
pub fn accumulation(record: &NormalizedRecord) -> FactorValue {
    let (Some(volume_ratio), Some(price_change)) =
        (record.volume_ratio, record.price_change_pct)
    else {
        return FactorValue::unscored(json!({
            "volume_ratio": record.volume_ratio,
            "price_change_pct": record.price_change_pct,
        }));
    };
    if volume_ratio < 0.0 {
        return FactorValue::unscored(json!({ "volume_ratio": volume_ratio }));
    }

    let evidence = json!({
        "volume_ratio": volume_ratio,
        "price_change_pct": price_change,
    });

    let index = if volume_ratio >= 1.5 && price_change >= 3.0 {
        Some(4)
    } else if volume_ratio >= 1.2 && price_change <= -2.0 {
        Some(0)
    } else if volume_ratio >= 1.2 && price_change >= 0.0 {
        Some(3)
    } else if volume_ratio < 0.8 && price_change > 0.0 {
        Some(2)
    } else {
        None
    };

    match index {
        Some(index) => FactorValue::scored(index, ConfidenceTag::Low, evidence),
        None => FactorValue::unscored(evidence),
    }
}
