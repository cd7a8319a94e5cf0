//! Keyword Heuristic Fallback Classifier
//!
//! Deterministic keyword-count classifier used whenever the primary text
//! classifier is unavailable or misbehaves. Total over all inputs (including
//! the empty string) and a pure function of the input text and the static
//! keyword tables, so fallback results are reproducible in tests.

use veritas_common::models::{ContentLabel, Signal};

/// Adapter name recorded as signal provenance for fallback results
pub const FALLBACK_SOURCE: &str = "keyword-fallback";

/// Fallback signals carry a fixed mid confidence: the heuristic has an
/// opinion but no model behind it.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Curated misinformation indicator phrases (matched in lower-cased text)
const MISINFORMATION_KEYWORDS: &[&str] = &[
    "conspiracy",
    "fake news",
    "hoax",
    "cover up",
    "they don't want you to know",
    "miracle cure",
    "secret",
    "hidden truth",
    "government hiding",
    "mainstream media lies",
];

/// Curated credibility indicator phrases (matched in lower-cased text)
const CREDIBILITY_KEYWORDS: &[&str] = &[
    "study shows",
    "research indicates",
    "according to",
    "scientists say",
    "peer-reviewed",
    "evidence suggests",
    "data shows",
];

/// Outcome of the keyword heuristic
#[derive(Debug, Clone)]
pub struct HeuristicVerdict {
    pub signal: Signal,
    /// Misinformation indicator phrases found
    pub misinfo_hits: usize,
    /// Credibility indicator phrases found
    pub credible_hits: usize,
}

impl HeuristicVerdict {
    /// Deterministic explanation naming the indicator counts
    pub fn reason(&self) -> String {
        match self.signal.label {
            ContentLabel::Misinformation => format!(
                "Fallback analysis: found {} misinformation indicator(s) against {} credibility indicator(s).",
                self.misinfo_hits, self.credible_hits
            ),
            ContentLabel::Credible => format!(
                "Fallback analysis: found {} credibility indicator(s) against {} misinformation indicator(s).",
                self.credible_hits, self.misinfo_hits
            ),
            _ => "Fallback analysis: mixed indicators, unable to determine.".to_string(),
        }
    }
}

/// Classify text by counting indicator phrases
///
/// Majority of misinformation hits yields `Misinformation`, majority of
/// credibility hits yields `Credible`, ties (including zero hits on both
/// sides) yield `Uncertain`. Confidence is fixed at [`FALLBACK_CONFIDENCE`].
pub fn classify(text: &str) -> HeuristicVerdict {
    let lowered = text.to_lowercase();

    let misinfo_hits = MISINFORMATION_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(*kw))
        .count();
    let credible_hits = CREDIBILITY_KEYWORDS
        .iter()
        .filter(|kw| lowered.contains(*kw))
        .count();

    let label = if misinfo_hits > credible_hits {
        ContentLabel::Misinformation
    } else if credible_hits > misinfo_hits {
        ContentLabel::Credible
    } else {
        ContentLabel::Uncertain
    };

    HeuristicVerdict {
        signal: Signal::new(label, FALLBACK_CONFIDENCE, FALLBACK_SOURCE),
        misinfo_hits,
        credible_hits,
    }
}
