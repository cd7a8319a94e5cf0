//! Trust Fusion Engine
//!
//! Combines a classifier [`Signal`] into a bounded trust score plus a
//! deterministic, human-readable reason. Each label carries a fixed base
//! score; confidence perturbs the base by up to ±15 points around a
//! zero-point at confidence 0.5, so high-confidence extreme classifications
//! pull toward the extremes while low-confidence output regresses to the
//! base.

use veritas_common::models::{ContentLabel, Signal};

/// Maximum points the confidence term can move a score off its base
const CONFIDENCE_SWING: f32 = 0.3;

/// Fused score and explanation for one signal
#[derive(Debug, Clone)]
pub struct FusedScore {
    /// Trust score, always clamped to [0,100]
    pub trust_score: u8,
    /// Canonical per-label explanation, parameterized by confidence
    pub reason: String,
    /// Confidence echoed as a percentage rounded to one decimal
    pub confidence_pct: f32,
}

/// Trust fusion engine with the fixed per-label base score table
#[derive(Debug, Default, Clone)]
pub struct TrustFuser;

impl TrustFuser {
    pub fn new() -> Self {
        Self
    }

    /// Fixed base score for a label
    ///
    /// Unknown classifier labels never reach this table: the detector
    /// adapter maps them to the fallback path, which emits `Uncertain`.
    pub fn base_score(label: ContentLabel) -> u8 {
        match label {
            ContentLabel::Factual => 90,
            ContentLabel::Credible => 85,
            ContentLabel::Satire => 60,
            ContentLabel::Uncertain => 50,
            ContentLabel::Clickbait => 30,
            ContentLabel::Conspiracy => 15,
            ContentLabel::Misinformation => 10,
        }
    }

    /// Fuse one signal into a bounded score and reason
    ///
    /// `score = clamp(base + confidence * 0.3 * 100 - 15, 0, 100)`
    ///
    /// Fusion never fails; the signal's confidence is already clamped to
    /// [0,1] on construction.
    pub fn fuse(&self, signal: &Signal) -> FusedScore {
        let base = Self::base_score(signal.label) as f32;
        let raw = base + signal.confidence * CONFIDENCE_SWING * 100.0 - 15.0;
        let trust_score = raw.round().clamp(0.0, 100.0) as u8;

        let confidence_pct = (signal.confidence * 1000.0).round() / 10.0;

        FusedScore {
            trust_score,
            reason: Self::reason(signal.label, confidence_pct),
            confidence_pct,
        }
    }

    /// One canonical reason template per label, parameterized by the
    /// rounded confidence percentage (deterministic for testability)
    fn reason(label: ContentLabel, confidence_pct: f32) -> String {
        match label {
            ContentLabel::Misinformation => format!(
                "AI model classified as misinformation with {confidence_pct:.1}% confidence. \
                 Multiple indicators suggest this content may be false or misleading."
            ),
            ContentLabel::Conspiracy => format!(
                "Content matches conspiracy theory patterns with {confidence_pct:.1}% confidence. \
                 Claims appear to be unsubstantiated."
            ),
            ContentLabel::Clickbait => format!(
                "Detected as clickbait with {confidence_pct:.1}% confidence. \
                 Content uses sensationalist language to attract attention."
            ),
            ContentLabel::Satire => format!(
                "Classified as satire/humor with {confidence_pct:.1}% confidence. \
                 Content appears to be intentionally humorous or satirical."
            ),
            ContentLabel::Credible => format!(
                "Classified as credible information with {confidence_pct:.1}% confidence. \
                 Content appears to be factual and well-sourced."
            ),
            ContentLabel::Factual => format!(
                "Classified as factual news with {confidence_pct:.1}% confidence. \
                 Content appears to be legitimate news reporting."
            ),
            ContentLabel::Uncertain => format!(
                "Classified as 'uncertain' with {confidence_pct:.1}% confidence."
            ),
        }
    }
}
