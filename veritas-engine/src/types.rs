//! Collaborator traits and boundary types for the Veritas engine
//!
//! The ML inference capabilities (zero-shot text classification, image-text
//! matching, speech transcription) and the synthetic content feed are
//! external collaborators. They appear here only as trait seams; the engine
//! treats every implementation as a black box and degrades gracefully when
//! one is missing or misbehaves.

use thiserror::Error;
use veritas_common::models::ContentItem;

/// Errors surfaced by external collaborators
///
/// These never escape the engine: the detector adapter and cross-modal
/// combiner absorb them and substitute deterministic fallbacks.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Collaborator is not loaded or otherwise unusable
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// Collaborator returned data the adapter cannot interpret
    #[error("Malformed collaborator output: {0}")]
    MalformedOutput(String),

    /// Collaborator call failed at runtime
    #[error("Collaborator call failed: {0}")]
    CallFailed(String),
}

/// Raw output of a zero-shot text classifier
///
/// Parallel arrays, most-confident label first. Validated at the adapter
/// boundary before anything downstream sees it.
#[derive(Debug, Clone)]
pub struct ClassifierOutput {
    pub labels: Vec<String>,
    pub scores: Vec<f32>,
}

impl ClassifierOutput {
    /// Winning (label, score) pair after shape validation
    ///
    /// Rejects empty output, length-mismatched arrays, and out-of-range
    /// scores so downstream code never handles a malformed signal.
    pub fn top(&self) -> Result<(&str, f32), CollaboratorError> {
        if self.labels.is_empty() || self.labels.len() != self.scores.len() {
            return Err(CollaboratorError::MalformedOutput(format!(
                "parallel arrays mismatched: {} labels, {} scores",
                self.labels.len(),
                self.scores.len()
            )));
        }
        let score = self.scores[0];
        if !(0.0..=1.0).contains(&score) {
            return Err(CollaboratorError::MalformedOutput(format!(
                "top score out of range: {score}"
            )));
        }
        Ok((&self.labels[0], score))
    }
}

/// Zero-shot text classification capability
#[async_trait::async_trait]
pub trait TextClassifier: Send + Sync {
    /// Classifier name for provenance tracking
    fn name(&self) -> &'static str;

    /// Capability check consumed by the detector adapter to choose the
    /// fallback path without relying on error interception for control flow
    fn is_available(&self) -> bool {
        true
    }

    /// Classify text against the engine's label set
    async fn classify(&self, text: &str) -> Result<ClassifierOutput, CollaboratorError>;
}

/// Image-text similarity capability (e.g. a CLIP-style model)
#[async_trait::async_trait]
pub trait ImageTextMatcher: Send + Sync {
    /// Matcher name for provenance tracking
    fn name(&self) -> &'static str;

    /// Similarity between text and the referenced image, in [0,1]
    async fn similarity(
        &self,
        text: &str,
        image_ref: &str,
    ) -> Result<f32, CollaboratorError>;
}

/// Speech-to-text transcription capability (e.g. a Whisper-style model)
#[async_trait::async_trait]
pub trait AudioTranscriber: Send + Sync {
    /// Transcriber name for provenance tracking
    fn name(&self) -> &'static str;

    /// Plain-text transcription of the referenced audio
    async fn transcribe(&self, audio_ref: &str) -> Result<String, CollaboratorError>;
}

/// Source of content items for the scheduling agent's pull path
#[async_trait::async_trait]
pub trait ContentSource: Send + Sync {
    /// Produce the next item; ids must be monotonic within the source
    async fn next_item(&self) -> Result<ContentItem, CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_rejects_empty_output() {
        let out = ClassifierOutput { labels: vec![], scores: vec![] };
        assert!(out.top().is_err());
    }

    #[test]
    fn top_rejects_mismatched_arrays() {
        let out = ClassifierOutput {
            labels: vec!["misinformation".into(), "clickbait".into()],
            scores: vec![0.9],
        };
        assert!(out.top().is_err());
    }

    #[test]
    fn top_rejects_out_of_range_score() {
        let out = ClassifierOutput {
            labels: vec!["misinformation".into()],
            scores: vec![1.5],
        };
        assert!(out.top().is_err());
    }

    #[test]
    fn top_returns_most_confident_pair() {
        let out = ClassifierOutput {
            labels: vec!["factual news".into(), "clickbait".into()],
            scores: vec![0.8, 0.2],
        };
        let (label, score) = out.top().unwrap();
        assert_eq!(label, "factual news");
        assert_eq!(score, 0.8);
    }
}
