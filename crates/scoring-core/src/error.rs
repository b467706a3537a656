use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    /// A factor definition violates a construction-time invariant
    /// (score/anchor length mismatch, weight not equal to the table maximum).
    #[error("Factor catalog inconsistency: {0}")]
    Catalog(String),

    /// No decision rule matched. Unreachable while the fallback rule is
    /// unconditional; surfacing it means the rule table itself is broken.
    #[error("Decision tree exhausted: no rule matched")]
    DecisionTreeExhausted,

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
