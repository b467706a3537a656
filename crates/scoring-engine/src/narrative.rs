//! Signal narrative: a short, human-readable digest of what is driving a
//! factor sheet and what could break it.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use scoring_core::{FactorId, FactorValue, CORE_FACTORS, RISK_FACTORS};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Narrative {
    /// The top Core contributors by realized fraction of weight.
    pub primary_driver: String,
    /// The first material risk flag, or "no material flags".
    pub key_risk: String,
    pub all_risks: Vec<String>,
    /// Present when revision velocity is clearly accelerating.
    pub velocity_alert: Option<String>,
}

/// Summarize a factor sheet.
pub fn narrative(values: &HashMap<FactorId, FactorValue>) -> Narrative {
    let mut drivers: Vec<(f64, &str)> = CORE_FACTORS
        .iter()
        .filter_map(|def| {
            let index = values.get(&def.id)?.index?;
            let realized = def.realized(index);
            (realized > 0).then(|| (realized as f64 / def.weight as f64, def.label))
        })
        .collect();
    drivers.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

    let primary_driver = if drivers.is_empty() {
        "insufficient data".to_string()
    } else {
        drivers
            .iter()
            .take(2)
            .map(|(_, label)| label.to_lowercase())
            .collect::<Vec<_>>()
            .join(" + ")
    };

    // Material means a realized penalty of 2 or more.
    let all_risks: Vec<String> = RISK_FACTORS
        .iter()
        .filter(|def| {
            values
                .get(&def.id)
                .and_then(|value| value.index)
                .map(|index| def.realized(index) >= 2)
                .unwrap_or(false)
        })
        .map(|def| def.label.to_lowercase())
        .collect();

    let key_risk = all_risks
        .first()
        .cloned()
        .unwrap_or_else(|| "no material flags".to_string());

    let velocity_alert = values
        .get(&FactorId::RevisionVelocity)
        .and_then(|value| value.index)
        .filter(|index| *index >= 3)
        .map(|_| "Revision velocity accelerating, momentum building".to_string());

    Narrative {
        primary_driver,
        key_risk,
        all_risks,
        velocity_alert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::ConfidenceTag;
    use serde_json::Value;

    fn scored(index: usize) -> FactorValue {
        FactorValue::scored(index, ConfidenceTag::Medium, Value::Null)
    }

    #[test]
    fn empty_sheet_has_no_drivers() {
        let n = narrative(&HashMap::new());
        assert_eq!(n.primary_driver, "insufficient data");
        assert_eq!(n.key_risk, "no material flags");
        assert!(n.all_risks.is_empty());
        assert!(n.velocity_alert.is_none());
    }

    #[test]
    fn drivers_rank_by_fraction_of_weight() {
        let mut values = HashMap::new();
        // Full-weight revisions (16/16) beats a partial eps surprise (10/20).
        values.insert(FactorId::Revisions, scored(4));
        values.insert(FactorId::EpsSurprise, scored(2));
        let n = narrative(&values);
        assert!(n.primary_driver.starts_with("estimate revision level"));
        assert!(n.primary_driver.contains("eps surprise magnitude"));
    }

    #[test]
    fn material_risks_are_listed_in_catalog_order() {
        let mut values = HashMap::new();
        values.insert(FactorId::BinaryRisk, scored(4)); // penalty 5
        values.insert(FactorId::BalanceSheet, scored(3)); // penalty 2
        values.insert(FactorId::MacroSensitivity, scored(3)); // penalty 1, immaterial
        let n = narrative(&values);
        assert_eq!(n.all_risks, vec!["binary event risk", "balance sheet stress"]);
        assert_eq!(n.key_risk, "binary event risk");
    }

    #[test]
    fn velocity_alert_fires_at_acceleration() {
        let mut values = HashMap::new();
        values.insert(FactorId::RevisionVelocity, scored(2));
        assert!(narrative(&values).velocity_alert.is_none());
        values.insert(FactorId::RevisionVelocity, scored(3));
        assert!(narrative(&values).velocity_alert.is_some());
    }
}
