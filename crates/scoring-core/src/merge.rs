//! Auto/manual override merge.
//!
//! Manually entered indices take precedence over auto-interpreted values,
//! and the always-manual factors are taken exclusively from the manual map.

use std::collections::HashMap;

use serde_json::json;

use crate::catalog::{definition, is_always_manual};
use crate::types::{ConfidenceTag, FactorId, FactorValue};

/// Merge auto-interpreted factor values with operator-entered indices.
///
/// Auto values for always-manual factors are discarded even if a caller
/// smuggled them into `auto`; manual entries win everywhere else. Manual
/// indices are clamped into the factor's level range.
pub fn merge_overrides(
    auto: &HashMap<FactorId, FactorValue>,
    manual: &HashMap<FactorId, usize>,
) -> HashMap<FactorId, FactorValue> {
    let mut merged: HashMap<FactorId, FactorValue> = auto
        .iter()
        .filter(|(id, _)| !is_always_manual(**id))
        .map(|(id, value)| (*id, value.clone()))
        .collect();

    for (&id, &index) in manual {
        let def = definition(id);
        let clamped = index.min(def.levels() - 1);
        merged.insert(
            id,
            FactorValue::scored(
                clamped,
                ConfidenceTag::High,
                json!({ "source": "manual", "entered_index": index }),
            ),
        );
    }

    merged
}
