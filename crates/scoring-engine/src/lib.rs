//! The scoring engine façade.
//!
//! Two operations face the embedding application: `interpret` turns a raw
//! provider record into auto-scored factor values, and `evaluate` turns a
//! merged factor sheet into the full result object. Both are pure and
//! synchronous; callers may invoke them concurrently without locking.

pub mod narrative;
pub mod presets;

pub use narrative::{narrative, Narrative};

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;

use composite_scorer::{completeness_pct, compute_scores, confidence_label};
use factor_interpreters::{interpret_record, SectorTables};
use scoring_core::{validate_catalog, Evaluation, FactorId, FactorValue, ScoringError, Signal};
use trade_structure::{recommend, DecisionInputs};

pub use scoring_core::merge_overrides;

/// Stateless evaluation engine. Holds only the sector reference tables.
pub struct ScoringEngine {
    tables: SectorTables,
}

impl ScoringEngine {
    /// Build an engine over the given sector tables.
    ///
    /// Fails fast on any factor-catalog inconsistency so a bad table edit
    /// surfaces at startup, not mid-evaluation.
    pub fn new(tables: SectorTables) -> Result<Self, ScoringError> {
        validate_catalog()?;
        Ok(Self { tables })
    }

    /// Engine over the built-in sector table revision.
    pub fn with_builtin_tables() -> Result<Self, ScoringError> {
        Self::new(SectorTables::default())
    }

    pub fn tables(&self) -> &SectorTables {
        &self.tables
    }

    /// Auto-interpret a raw provider record into factor values.
    ///
    /// Always-manual factors are never filled. Factors without sufficient
    /// evidence come back unscored rather than defaulted.
    pub fn interpret(&self, raw: &Value) -> HashMap<FactorId, FactorValue> {
        let values = interpret_record(raw, &self.tables);
        let scored = values.values().filter(|v| v.is_scored()).count();
        tracing::info!(scored, total = values.len(), "interpreted provider record");
        for (id, value) in &values {
            if !value.is_scored() {
                tracing::warn!(factor = id.as_str(), "interpreter declined to score");
            }
        }
        values
    }

    /// Evaluate a merged factor sheet into the full result object.
    ///
    /// A sheet with zero evidence still produces a complete, well-typed
    /// result (score 0, INCOMPLETE, PASS); the only error path is the
    /// unreachable decision-tree exhaustion.
    pub fn evaluate(
        &self,
        values: &HashMap<FactorId, FactorValue>,
    ) -> Result<Evaluation, ScoringError> {
        let score = compute_scores(values);
        let completeness = completeness_pct(values);
        let confidence = confidence_label(score.final_score, completeness);
        let signal = Signal::from_score(score.final_score);
        let inputs = DecisionInputs::derive(&score, values);
        let recommendation = recommend(&inputs)?;

        tracing::info!(
            final_score = score.final_score,
            completeness,
            signal = signal.label(),
            action = %recommendation.action,
            "evaluation complete"
        );

        Ok(Evaluation {
            score,
            confidence,
            completeness_pct: completeness,
            signal,
            recommendation,
            evaluated_at: Utc::now(),
        })
    }
}
