//! Risk-group interpreters. Indices ascend in severity.

use scoring_core::{ConfidenceTag, FactorValue};
use serde_json::json;

use crate::normalize::NormalizedRecord;
use crate::sectors::SectorTables;

/// Balance-sheet stress from leverage and net cash.
///
/// Negative or zero equity makes the ratio meaningless, so it stays
/// unscored rather than pretending to a leverage read.
pub fn balance_sheet(record: &NormalizedRecord) -> FactorValue {
    let (Some(debt), Some(equity)) = (record.total_debt, record.shareholders_equity) else {
        return FactorValue::unscored(json!({
            "total_debt": record.total_debt,
            "shareholders_equity": record.shareholders_equity,
        }));
    };
    if equity <= 0.0 || debt < 0.0 {
        return FactorValue::unscored(json!({
            "total_debt": debt,
            "shareholders_equity": equity,
        }));
    }

    let debt_to_equity = debt / equity;
    let net_cash = record.total_cash.map(|cash| cash > debt).unwrap_or(false);

    let index = if net_cash {
        0
    } else if debt_to_equity < 0.5 {
        1
    } else if debt_to_equity < 1.5 {
        2
    } else if debt_to_equity < 3.0 {
        3
    } else {
        4
    };

    FactorValue::scored(
        index,
        ConfidenceTag::Medium,
        json!({
            "total_debt": debt,
            "total_cash": record.total_cash,
            "shareholders_equity": equity,
            "debt_to_equity": debt_to_equity,
            "net_cash": net_cash,
        }),
    )
}

/// Macro-sensitivity severity from the sector placement table.
///
/// The sector name is the only evidence, so a missing sector is unscored;
/// an unrecognized one resolves to the Unknown table entry.
pub fn macro_sensitivity(record: &NormalizedRecord, tables: &SectorTables) -> FactorValue {
    let Some(sector) = record.sector.as_deref() else {
        return FactorValue::unscored(json!({ "sector": null }));
    };

    let (index, resolved) = tables.macro_index(sector);

    // A sector label is a coarse proxy for macro exposure.
    FactorValue::scored(
        index,
        ConfidenceTag::Low,
        json!({
            "sector": sector,
            "resolved": resolved,
            "table_version": tables.version,
        }),
    )
}
