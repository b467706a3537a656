//! Factor interpreters: raw provider record -> ordinal factor indices.
//!
//! Each interpreter is a pure function from a normalized record to one
//! [`FactorValue`]. Missing or malformed evidence always yields an unscored
//! value, never a guessed default bucket.

pub mod normalize;
pub mod sectors;

mod fundamentals;
mod risk;
mod timing;

pub use fundamentals::{
    eps_inflection, eps_surprise, relative_valuation, revenue_momentum, revision_velocity,
    revisions,
};
pub use normalize::{normalize, NormalizedRecord};
pub use risk::{balance_sheet, macro_sensitivity};
pub use sectors::SectorTables;
pub use timing::{accumulation, catalyst_proximity, trend_health};

use std::collections::HashMap;

use scoring_core::{FactorId, FactorValue};
use serde_json::Value;

/// Run every auto-scorable interpreter over a raw provider record.
///
/// The always-manual factors are never present in the output. Factors that
/// decline to score still appear, unscored, so callers can audit the
/// evidence that was available.
pub fn interpret_record(raw: &Value, tables: &SectorTables) -> HashMap<FactorId, FactorValue> {
    let record = normalize::normalize(raw);
    interpret_normalized(&record, tables)
}

/// Interpreter fan-out over an already-normalized record.
pub fn interpret_normalized(
    record: &NormalizedRecord,
    tables: &SectorTables,
) -> HashMap<FactorId, FactorValue> {
    let mut values = HashMap::new();
    values.insert(FactorId::EpsSurprise, fundamentals::eps_surprise(record));
    values.insert(FactorId::Revisions, fundamentals::revisions(record));
    values.insert(
        FactorId::RevisionVelocity,
        fundamentals::revision_velocity(record),
    );
    values.insert(
        FactorId::RelativeValuation,
        fundamentals::relative_valuation(record, tables),
    );
    values.insert(
        FactorId::RevenueMomentum,
        fundamentals::revenue_momentum(record),
    );
    values.insert(FactorId::EpsInflection, fundamentals::eps_inflection(record));
    values.insert(
        FactorId::CatalystProximity,
        timing::catalyst_proximity(record),
    );
    values.insert(FactorId::TrendHealth, timing::trend_health(record));
    values.insert(FactorId::Accumulation, timing::accumulation(record));
    values.insert(FactorId::BalanceSheet, risk::balance_sheet(record));
    values.insert(
        FactorId::MacroSensitivity,
        risk::macro_sensitivity(record, tables),
    );
    values
}
