use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier for a single scoring factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorId {
    EpsSurprise,
    Revisions,
    RevisionVelocity,
    SectorTailwind,
    RelativeValuation,
    RevenueMomentum,
    EpsInflection,
    CatalystProximity,
    TrendHealth,
    Accumulation,
    BinaryRisk,
    BalanceSheet,
    ThesisRisk,
    MacroSensitivity,
    InstitutionalFlow,
    IvEnvironment,
}

impl FactorId {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactorId::EpsSurprise => "eps_surprise",
            FactorId::Revisions => "revisions",
            FactorId::RevisionVelocity => "revision_velocity",
            FactorId::SectorTailwind => "sector_tailwind",
            FactorId::RelativeValuation => "relative_valuation",
            FactorId::RevenueMomentum => "revenue_momentum",
            FactorId::EpsInflection => "eps_inflection",
            FactorId::CatalystProximity => "catalyst_proximity",
            FactorId::TrendHealth => "trend_health",
            FactorId::Accumulation => "accumulation",
            FactorId::BinaryRisk => "binary_risk",
            FactorId::BalanceSheet => "balance_sheet",
            FactorId::ThesisRisk => "thesis_risk",
            FactorId::MacroSensitivity => "macro_sensitivity",
            FactorId::InstitutionalFlow => "institutional_flow",
            FactorId::IvEnvironment => "iv_environment",
        }
    }
}

/// Which aggregation group a factor belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorGroup {
    /// Fundamental factors, 0-80 of the composite.
    Core,
    /// Timing factors, 0-20 plus the score multiplier.
    Timing,
    /// Penalty factors, deducted up to the risk ceiling.
    Risk,
    /// Informational overlays. Gate the trade structure, never the score.
    Overlay,
}

/// How much to trust an auto-interpreted factor observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTag {
    Low,
    Medium,
    High,
}

/// A per-instrument observation of one factor.
///
/// `index: None` means "no evidence, unscored". It contributes zero to the
/// group sums and is excluded from the completeness count; it is never
/// coerced to the lowest bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorValue {
    pub index: Option<usize>,
    pub confidence: ConfidenceTag,
    /// Raw evidence the interpreter derived the index from, for audit.
    #[serde(default)]
    pub evidence: serde_json::Value,
}

impl FactorValue {
    pub fn scored(index: usize, confidence: ConfidenceTag, evidence: serde_json::Value) -> Self {
        Self {
            index: Some(index),
            confidence,
            evidence,
        }
    }

    pub fn unscored(evidence: serde_json::Value) -> Self {
        Self {
            index: None,
            confidence: ConfidenceTag::Low,
            evidence,
        }
    }

    pub fn is_scored(&self) -> bool {
        self.index.is_some()
    }
}

/// Composite score breakdown, recomputed from scratch on every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Sum of realized Core values over scored factors.
    pub core_raw: i32,
    /// Sum of realized Timing values over scored factors.
    pub timing_raw: i32,
    /// Uncapped sum of realized Risk penalties.
    pub risk_penalty: i32,
    /// Risk penalty after the hard ceiling.
    pub risk_deduct: i32,
    /// Normalized core score, 0-80.
    pub core_score: i32,
    /// Normalized timing score, 0-20.
    pub timing_score: i32,
    /// 0.75 + timing_raw / 80, applied to the core score.
    pub timing_multiplier: f64,
    /// core_score * timing_multiplier, before the risk deduction.
    pub pre_risk: f64,
    /// Final composite score, clamped to 0-100.
    pub final_score: i32,
}

/// Tiered categorical signal derived from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    StrongBuy,
    Buy,
    Watch,
    Weak,
    NoSignal,
}

impl Signal {
    /// Classify a final score into its tier. Bands are ordered and
    /// non-overlapping, highest threshold first.
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 78 => Signal::StrongBuy,
            s if s >= 65 => Signal::Buy,
            s if s >= 50 => Signal::Watch,
            s if s >= 35 => Signal::Weak,
            _ => Signal::NoSignal,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Signal::StrongBuy => "STRONG BUY",
            Signal::Buy => "BUY",
            Signal::Watch => "WATCH",
            Signal::Weak => "WEAK",
            Signal::NoSignal => "NO SIGNAL",
        }
    }

    /// Presentation tier letter. Part of the contract, consumed downstream.
    pub fn tier(&self) -> char {
        match self {
            Signal::StrongBuy => 'A',
            Signal::Buy => 'B',
            Signal::Watch => 'C',
            Signal::Weak => 'D',
            Signal::NoSignal => 'F',
        }
    }
}

/// Confidence in the final score, gated by data completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLabel {
    High,
    Moderate,
    Low,
    Incomplete,
}

impl ConfidenceLabel {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceLabel::High => "HIGH",
            ConfidenceLabel::Moderate => "MODERATE",
            ConfidenceLabel::Low => "LOW",
            ConfidenceLabel::Incomplete => "INCOMPLETE, score unreliable",
        }
    }
}

/// Terminal output of the trade-structure decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Action label, e.g. "BUY CALLS, FULL CONVICTION".
    pub action: String,
    /// One-line rationale.
    pub reason: String,
    /// Longer execution detail.
    pub detail: String,
    /// Identifier of the rule that fired.
    pub rule: String,
    /// The fired rule's preconditions, in evaluation order, for audit.
    pub preconditions: Vec<String>,
}

/// Full result of one evaluation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    pub score: ScoreResult,
    pub confidence: ConfidenceLabel,
    /// Percentage of all known factors with a non-null value, 0-100.
    pub completeness_pct: u8,
    pub signal: Signal,
    pub recommendation: Recommendation,
    pub evaluated_at: DateTime<Utc>,
}
