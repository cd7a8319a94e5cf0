//! Text Detector Adapter
//!
//! Wraps the optional zero-shot text classifier collaborator behind a
//! uniform, infallible interface: `classify` always yields a usable
//! [`Signal`], degrading to the keyword heuristic when the classifier is
//! missing, unavailable, erroring, or returns malformed output.

use std::sync::Arc;

use tracing::warn;
use veritas_common::models::{ContentLabel, Signal};

use crate::services::keyword_heuristic;
use crate::types::TextClassifier;

/// Detector output: a signal plus the fallback explanation when the
/// heuristic path produced it
#[derive(Debug, Clone)]
pub struct Detection {
    pub signal: Signal,
    /// Present only on the fallback path; replaces the fuser's template
    /// reason so the caller sees why the primary classifier was bypassed
    pub fallback_reason: Option<String>,
}

/// Uniform adapter around one text classification capability
pub struct TextDetector {
    classifier: Option<Arc<dyn TextClassifier>>,
}

impl TextDetector {
    /// Adapter over a concrete classifier collaborator
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    /// Adapter with no primary classifier; every call takes the fallback path
    pub fn fallback_only() -> Self {
        Self { classifier: None }
    }

    /// True when a primary classifier is wired and reports itself usable
    pub fn is_available(&self) -> bool {
        self.classifier.as_ref().is_some_and(|c| c.is_available())
    }

    /// Classify text, never failing
    ///
    /// Internal failures (unavailable model, collaborator error, malformed
    /// parallel arrays, unrecognized label) degrade to the keyword
    /// heuristic; the returned signal's `source` records which path ran.
    pub async fn classify(&self, text: &str) -> Detection {
        let classifier = match &self.classifier {
            Some(c) if c.is_available() => c,
            Some(c) => {
                warn!(classifier = c.name(), "classifier reports unavailable, using fallback");
                return Self::fallback(text);
            }
            None => return Self::fallback(text),
        };

        let output = match classifier.classify(text).await {
            Ok(output) => output,
            Err(e) => {
                warn!(classifier = classifier.name(), error = %e, "classifier call failed, using fallback");
                return Self::fallback(text);
            }
        };

        let (label_str, confidence) = match output.top() {
            Ok(top) => top,
            Err(e) => {
                warn!(classifier = classifier.name(), error = %e, "classifier output rejected, using fallback");
                return Self::fallback(text);
            }
        };

        let label = match ContentLabel::parse(label_str) {
            Some(label) => label,
            None => {
                warn!(
                    classifier = classifier.name(),
                    label = label_str,
                    "classifier label outside the closed set, using fallback"
                );
                return Self::fallback(text);
            }
        };

        Detection {
            signal: Signal::new(label, confidence, classifier.name()),
            fallback_reason: None,
        }
    }

    fn fallback(text: &str) -> Detection {
        let verdict = keyword_heuristic::classify(text);
        let reason = verdict.reason();
        Detection {
            signal: verdict.signal,
            fallback_reason: Some(reason),
        }
    }
}
