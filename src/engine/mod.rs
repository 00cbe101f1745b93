//! The detection engine.
//!
//! Pure, synchronous scan pipeline over the compiled rule catalog:
//!
//! ```text
//! raw text ──> Matcher (raw text, all rules) ──> matches ──> Scorer ──> raw score
//!     │                                                                    │
//!     └──> Normalizer (side channel) ──> Heuristics (benign, OCR)          │
//!                                            │                             v
//!                                            └────────────────────> Dampener ──> Classifier
//! ```
//!
//! The engine is deterministic and explainable: no model inference, no
//! hidden state, no I/O. Every input, however malformed, yields a
//! well-formed [`AnalysisResult`].

mod analyzer;
mod heuristics;
mod matcher;
mod normalize;
mod threshold;

pub use analyzer::{
    dampen, score, AnalysisMeta, AnalysisResult, AnalyzeOptions, Analyzer, CategoryGroups, Risk,
    MAX_SCORE,
};
pub use heuristics::{is_benign_context, looks_like_ocr};
pub use matcher::{find_matches, RuleMatch};
pub use normalize::normalize;
pub use threshold::{ThresholdMode, ThresholdPolicy};

/// Scan text against the built-in catalog.
///
/// Convenience wrapper over [`Analyzer`] for one-off scans; services that
/// scan per request should hold an [`Analyzer`] instead.
pub fn analyze(text: &str, options: &AnalyzeOptions) -> AnalysisResult {
    Analyzer::new().analyze(text, options)
}
