//! Domain models for the Veritas trust-scoring engine
//!
//! Defines the records that flow through the detection pipeline:
//! content items in, classifier signals through fusion, analysis results
//! out into the bounded log store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Kind of content carried by a [`ContentItem`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Text,
    Image,
    Video,
    Audio,
    Multimodal,
}

impl ContentType {
    /// Canonical lowercase string form
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "text",
            ContentType::Image => "image",
            ContentType::Video => "video",
            ContentType::Audio => "audio",
            ContentType::Multimodal => "multimodal",
        }
    }
}

/// One unit of content submitted for analysis
///
/// The engine never owns binary payloads: `image_ref` and `audio_ref` are
/// opaque handles whose bytes remain with the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Monotonic id, unique within the producing component
    pub id: u64,
    /// Text payload, always present
    pub content: String,
    pub content_type: ContentType,
    /// Free-form language tag (default "en")
    pub language: String,
    /// Author handle, if the feed supplies one
    pub author: Option<String>,
    /// Opaque handle to an image payload owned by the caller
    pub image_ref: Option<String>,
    /// Opaque handle to an audio payload owned by the caller
    pub audio_ref: Option<String>,
    /// Set at creation, immutable thereafter
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a text-only item with defaults for the optional fields
    pub fn text(id: u64, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            content_type: ContentType::Text,
            language: "en".to_string(),
            author: None,
            image_ref: None,
            audio_ref: None,
            created_at: Utc::now(),
        }
    }

    /// True when an image or audio reference accompanies the text
    pub fn has_media(&self) -> bool {
        self.image_ref.is_some() || self.audio_ref.is_some()
    }
}

/// Closed label set produced by classifiers
///
/// Matches the zero-shot label strings the text classifier is prompted with;
/// free-form strings outside the set map to `None` via [`ContentLabel::parse`]
/// and fuse at the neutral base score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentLabel {
    Misinformation,
    Credible,
    Satire,
    Clickbait,
    Conspiracy,
    Factual,
    Uncertain,
}

impl ContentLabel {
    /// Canonical wire string, as presented to the zero-shot classifier
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentLabel::Misinformation => "misinformation",
            ContentLabel::Credible => "credible information",
            ContentLabel::Satire => "satire or humor",
            ContentLabel::Clickbait => "clickbait",
            ContentLabel::Conspiracy => "conspiracy theory",
            ContentLabel::Factual => "factual news",
            ContentLabel::Uncertain => "uncertain",
        }
    }

    /// Map a classifier label string onto the closed set
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "misinformation" => Some(ContentLabel::Misinformation),
            "credible information" | "credible" => Some(ContentLabel::Credible),
            "satire or humor" | "satire" => Some(ContentLabel::Satire),
            "clickbait" => Some(ContentLabel::Clickbait),
            "conspiracy theory" | "conspiracy" => Some(ContentLabel::Conspiracy),
            "factual news" | "factual" => Some(ContentLabel::Factual),
            "uncertain" => Some(ContentLabel::Uncertain),
            _ => None,
        }
    }

    /// All labels offered to the zero-shot classifier, in prompt order
    pub fn classifier_labels() -> [&'static str; 6] {
        [
            "misinformation",
            "credible information",
            "satire or humor",
            "clickbait",
            "conspiracy theory",
            "factual news",
        ]
    }
}

/// One classifier's labeled, confidence-scored output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Signal {
    pub label: ContentLabel,
    /// Confidence in [0,1], clamped on construction
    pub confidence: f32,
    /// Adapter that produced this signal, for provenance
    pub source: String,
}

impl Signal {
    /// Create a new signal with clamped confidence (0.0-1.0)
    pub fn new(label: ContentLabel, confidence: f32, source: impl Into<String>) -> Self {
        Self {
            label,
            confidence: confidence.clamp(0.0, 1.0),
            source: source.into(),
        }
    }
}

/// Modality pair for cross-modal similarity scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalityPair {
    TextImage,
    TextAudio,
}

impl ModalityPair {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModalityPair::TextImage => "text_image",
            ModalityPair::TextAudio => "text_audio",
        }
    }
}

/// Aggregate cross-modal consistency assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyTier {
    NoMultimodalContent,
    Inconsistent,
    Low,
    Moderate,
    High,
}

impl ConsistencyTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsistencyTier::NoMultimodalContent => "no_multimodal_content",
            ConsistencyTier::Inconsistent => "inconsistent",
            ConsistencyTier::Low => "low",
            ConsistencyTier::Moderate => "moderate",
            ConsistencyTier::High => "high",
        }
    }
}

/// Cross-modal consistency sub-record on an [`AnalysisResult`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrossModalReport {
    pub consistency: ConsistencyTier,
    /// Pairwise similarity scores, each in [0,1]
    pub similarity_scores: BTreeMap<ModalityPair, f32>,
    /// Cross-modal trust score (0-100)
    pub score: u8,
    /// Human-readable assessment text
    pub reasoning: String,
    /// Set when a collaborator failed and a neutral similarity was
    /// substituted; informational only, never an error to the caller
    pub degraded: bool,
}

/// Fused outcome for one content item
///
/// Created exactly once by the fusion pipeline and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Id of the analyzed [`ContentItem`]
    pub item_id: u64,
    /// Bounded trust score, always in [0,100]
    pub trust_score: u8,
    /// Non-empty explanation for the score
    pub reason: String,
    /// Winning label, when a signal was available
    pub classification: Option<ContentLabel>,
    /// Winning confidence as a percentage rounded to one decimal
    pub confidence: Option<f32>,
    /// Present only when media references accompanied the item
    pub cross_modal: Option<CrossModalReport>,
    /// Set when fusion completed
    pub analyzed_at: DateTime<Utc>,
}

/// Storage wrapper around an [`AnalysisResult`]
///
/// Owned exclusively by the result log store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Store-local monotonic counter, unique within the store lifetime
    pub sequence_id: u64,
    pub result: AnalysisResult,
    pub logged_at: DateTime<Utc>,
}

/// Aggregate statistics over the result log store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub count: usize,
    /// Mean trust score, rounded to one decimal; 0.0 when empty
    pub average_trust_score: f64,
    /// Entries with trust_score >= 70
    pub high_count: usize,
    /// Entries with trust_score in [30, 70)
    pub medium_count: usize,
    /// Entries with trust_score < 30
    pub low_count: usize,
    pub latest_timestamp: Option<DateTime<Utc>>,
}

impl LogSummary {
    /// Well-defined zero-state returned for an empty store
    pub fn empty() -> Self {
        Self {
            count: 0,
            average_trust_score: 0.0,
            high_count: 0,
            medium_count: 0,
            low_count: 0,
            latest_timestamp: None,
        }
    }
}

/// Snapshot of the scheduling agent's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStatus {
    pub running: bool,
    /// Ticks that fully completed (analysis appended to the store)
    pub items_processed: u64,
    /// Seconds since the agent last started, 0.0 if never started
    pub uptime_seconds: f64,
}
