//! Completeness-gated confidence.

use scoring_core::ConfidenceLabel;

/// Label the confidence in a final score given data completeness.
///
/// Completeness gates first: a high score computed from sparse data must
/// come back INCOMPLETE, never HIGH. The remaining bands scale the score by
/// completeness before thresholding.
pub fn confidence_label(final_score: i32, complete_pct: u8) -> ConfidenceLabel {
    if complete_pct < 50 {
        return ConfidenceLabel::Incomplete;
    }

    let adjusted = final_score as f64 * (0.5 + complete_pct as f64 / 200.0);
    if adjusted >= 70.0 && complete_pct >= 80 {
        ConfidenceLabel::High
    } else if adjusted >= 55.0 && complete_pct >= 60 {
        ConfidenceLabel::Moderate
    } else {
        ConfidenceLabel::Low
    }
}
