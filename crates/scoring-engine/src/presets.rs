//! Preset factor sheets: realistic, fully-filled inputs used by the
//! integration tests and as worked examples for embedders.

use std::collections::HashMap;

use scoring_core::FactorId;

/// A bank with clean risk and confirming flow, IV not usable (stock only).
pub fn national_bank() -> HashMap<FactorId, usize> {
    HashMap::from([
        (FactorId::EpsSurprise, 3),
        (FactorId::Revisions, 4),
        (FactorId::RevisionVelocity, 3),
        (FactorId::SectorTailwind, 3),
        (FactorId::RelativeValuation, 3),
        (FactorId::RevenueMomentum, 3),
        (FactorId::EpsInflection, 3),
        (FactorId::CatalystProximity, 3),
        (FactorId::TrendHealth, 3),
        (FactorId::Accumulation, 3),
        (FactorId::BinaryRisk, 0),
        (FactorId::BalanceSheet, 1),
        (FactorId::ThesisRisk, 0),
        (FactorId::MacroSensitivity, 2),
        (FactorId::InstitutionalFlow, 3),
        (FactorId::IvEnvironment, 4),
    ])
}

/// An insurer with strong fundamentals and cheap post-beat IV.
pub fn insurer() -> HashMap<FactorId, usize> {
    HashMap::from([
        (FactorId::EpsSurprise, 4),
        (FactorId::Revisions, 4),
        (FactorId::RevisionVelocity, 4),
        (FactorId::SectorTailwind, 4),
        (FactorId::RelativeValuation, 3),
        (FactorId::RevenueMomentum, 3),
        (FactorId::EpsInflection, 4),
        (FactorId::CatalystProximity, 3),
        (FactorId::TrendHealth, 2),
        (FactorId::Accumulation, 2),
        (FactorId::BinaryRisk, 1),
        (FactorId::BalanceSheet, 1),
        (FactorId::ThesisRisk, 0),
        (FactorId::MacroSensitivity, 2),
        (FactorId::InstitutionalFlow, 2),
        (FactorId::IvEnvironment, 2),
    ])
}

/// A cheap lender with soft timing and some macro exposure.
pub fn consumer_lender() -> HashMap<FactorId, usize> {
    HashMap::from([
        (FactorId::EpsSurprise, 3),
        (FactorId::Revisions, 3),
        (FactorId::RevisionVelocity, 2),
        (FactorId::SectorTailwind, 2),
        (FactorId::RelativeValuation, 4),
        (FactorId::RevenueMomentum, 3),
        (FactorId::EpsInflection, 3),
        (FactorId::CatalystProximity, 3),
        (FactorId::TrendHealth, 1),
        (FactorId::Accumulation, 1),
        (FactorId::BinaryRisk, 1),
        (FactorId::BalanceSheet, 2),
        (FactorId::ThesisRisk, 1),
        (FactorId::MacroSensitivity, 3),
        (FactorId::InstitutionalFlow, 2),
        (FactorId::IvEnvironment, 1),
    ])
}
