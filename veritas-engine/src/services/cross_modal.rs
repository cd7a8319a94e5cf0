//! Cross-Modal Consistency Combiner
//!
//! Scores agreement between text and accompanying image/audio content.
//! Image agreement comes from an external image-text matcher; audio
//! agreement is Jaccard word-set similarity between the text and an
//! external transcription. Collaborator failures are absorbed locally with
//! a neutral similarity substitute and flagged on the report, never raised.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::warn;
use veritas_common::models::{ConsistencyTier, CrossModalReport, ModalityPair};

use crate::types::{AudioTranscriber, ImageTextMatcher};

/// Neutral similarity recorded when a collaborator call fails
const NEUTRAL_SIMILARITY: f32 = 0.5;

/// Fixed combination weights: cross-modal evidence independently
/// corroborates the text, so it outweighs the unimodal score.
const TEXT_WEIGHT: f32 = 0.4;
const CROSS_MODAL_WEIGHT: f32 = 0.6;

/// Jaccard similarity between the lower-cased word sets of two texts
///
/// |intersection| / |union|; defined as 0.0 when either set is empty.
pub fn jaccard_similarity(a: &str, b: &str) -> f32 {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();
    let set_a: HashSet<&str> = a_lower.split_whitespace().collect();
    let set_b: HashSet<&str> = b_lower.split_whitespace().collect();

    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count();
    let union = set_a.union(&set_b).count();
    intersection as f32 / union as f32
}

/// Combined trust score when cross-modal data exists:
/// `round(0.4 * text_score + 0.6 * cross_modal_score)`
pub fn combined_trust(text_score: u8, cross_modal_score: u8) -> u8 {
    let combined = TEXT_WEIGHT * text_score as f32 + CROSS_MODAL_WEIGHT * cross_modal_score as f32;
    combined.round().clamp(0.0, 100.0) as u8
}

/// Combiner over the optional image-text and audio-transcription
/// collaborators
pub struct CrossModalCombiner {
    matcher: Option<Arc<dyn ImageTextMatcher>>,
    transcriber: Option<Arc<dyn AudioTranscriber>>,
}

impl CrossModalCombiner {
    pub fn new(
        matcher: Option<Arc<dyn ImageTextMatcher>>,
        transcriber: Option<Arc<dyn AudioTranscriber>>,
    ) -> Self {
        Self { matcher, transcriber }
    }

    /// Combiner with no collaborators; every report degrades to
    /// `NoMultimodalContent`
    pub fn disabled() -> Self {
        Self {
            matcher: None,
            transcriber: None,
        }
    }

    /// Assess cross-modal consistency for one item's text and media refs
    ///
    /// Never fails: collaborator errors become a neutral similarity for the
    /// affected pair plus a `degraded` marker on the report.
    pub async fn combine(
        &self,
        text: &str,
        image_ref: Option<&str>,
        audio_ref: Option<&str>,
    ) -> CrossModalReport {
        let mut similarity_scores = BTreeMap::new();
        let mut degraded = false;

        if let (Some(image_ref), Some(matcher)) = (image_ref, &self.matcher) {
            let score = match matcher.similarity(text, image_ref).await {
                Ok(score) => score.clamp(0.0, 1.0),
                Err(e) => {
                    warn!(matcher = matcher.name(), error = %e, "image-text similarity failed, substituting neutral score");
                    degraded = true;
                    NEUTRAL_SIMILARITY
                }
            };
            similarity_scores.insert(ModalityPair::TextImage, score);
        }

        if let (Some(audio_ref), Some(transcriber)) = (audio_ref, &self.transcriber) {
            let score = match transcriber.transcribe(audio_ref).await {
                Ok(transcript) => jaccard_similarity(text, &transcript),
                Err(e) => {
                    warn!(transcriber = transcriber.name(), error = %e, "transcription failed, substituting neutral score");
                    degraded = true;
                    NEUTRAL_SIMILARITY
                }
            };
            similarity_scores.insert(ModalityPair::TextAudio, score);
        }

        let (consistency, score) = Self::assess(&similarity_scores);
        let reasoning = Self::reasoning(consistency);

        CrossModalReport {
            consistency,
            similarity_scores,
            score,
            reasoning,
            degraded,
        }
    }

    /// Map the mean pairwise similarity onto a tier and 0-100 score
    fn assess(scores: &BTreeMap<ModalityPair, f32>) -> (ConsistencyTier, u8) {
        if scores.is_empty() {
            return (ConsistencyTier::NoMultimodalContent, 50);
        }

        let avg: f32 = scores.values().sum::<f32>() / scores.len() as f32;

        let (tier, raw) = if avg >= 0.7 {
            (ConsistencyTier::High, 80.0 + (avg - 0.7) * 100.0)
        } else if avg >= 0.5 {
            (ConsistencyTier::Moderate, 60.0 + (avg - 0.5) * 100.0)
        } else if avg >= 0.3 {
            (ConsistencyTier::Low, 30.0 + (avg - 0.3) * 100.0)
        } else {
            (ConsistencyTier::Inconsistent, avg * 100.0)
        };

        (tier, raw.round().clamp(0.0, 100.0) as u8)
    }

    fn reasoning(tier: ConsistencyTier) -> String {
        match tier {
            ConsistencyTier::High => {
                "Cross-modal analysis shows high consistency between text and accompanying media. \
                 This suggests authentic, well-coordinated multimedia content."
            }
            ConsistencyTier::Moderate => {
                "Cross-modal analysis shows moderate consistency. Some discrepancies detected \
                 but content appears generally coherent."
            }
            ConsistencyTier::Low => {
                "Cross-modal analysis shows low consistency. Significant discrepancies detected \
                 between modalities, suggesting potential manipulation."
            }
            ConsistencyTier::Inconsistent => {
                "Cross-modal analysis shows high inconsistency. Major discrepancies detected \
                 between text and accompanying media. This may indicate manipulated or \
                 misleading content."
            }
            ConsistencyTier::NoMultimodalContent => {
                "No multimodal content available for cross-modal analysis. Only text content \
                 was analyzed."
            }
        }
        .to_string()
    }
}
