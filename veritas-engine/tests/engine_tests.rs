//! End-to-end engine tests through the public facade
//!
//! Exercises the push path (`analyze`, `analyze_cross_modal`), log store
//! queries, and classifier degradation, with stub collaborators standing in
//! for the external ML models.

use std::sync::Arc;

use veritas_common::config::EngineConfig;
use veritas_common::events::EngineEvent;
use veritas_common::models::{ConsistencyTier, ContentItem, ContentLabel, ContentType, ModalityPair};
use veritas_engine::types::{
    AudioTranscriber, ClassifierOutput, CollaboratorError, ContentSource, ImageTextMatcher,
    TextClassifier,
};
use veritas_engine::{Collaborators, Engine};

/// Source that never produces; these tests drive the push path only
struct IdleSource;

#[async_trait::async_trait]
impl ContentSource for IdleSource {
    async fn next_item(&self) -> Result<ContentItem, CollaboratorError> {
        Err(CollaboratorError::Unavailable("idle".to_string()))
    }
}

/// Stub zero-shot classifier keyed off content markers
struct MarkerClassifier;

#[async_trait::async_trait]
impl TextClassifier for MarkerClassifier {
    fn name(&self) -> &'static str {
        "marker-classifier"
    }

    async fn classify(&self, text: &str) -> Result<ClassifierOutput, CollaboratorError> {
        let label = if text.contains("hoax") {
            "misinformation"
        } else if text.contains("mayor") {
            "factual news"
        } else {
            "credible information"
        };
        Ok(ClassifierOutput {
            labels: vec![label.to_string()],
            scores: vec![0.5],
        })
    }
}

struct FixedMatcher(f32);

#[async_trait::async_trait]
impl ImageTextMatcher for FixedMatcher {
    fn name(&self) -> &'static str {
        "fixed-matcher"
    }

    async fn similarity(&self, _text: &str, _image_ref: &str) -> Result<f32, CollaboratorError> {
        Ok(self.0)
    }
}

struct EchoTranscriber(&'static str);

#[async_trait::async_trait]
impl AudioTranscriber for EchoTranscriber {
    fn name(&self) -> &'static str {
        "echo-transcriber"
    }

    async fn transcribe(&self, _audio_ref: &str) -> Result<String, CollaboratorError> {
        Ok(self.0.to_string())
    }
}

fn engine_with(collaborators: Collaborators) -> Engine {
    Engine::new(&EngineConfig::default(), collaborators, Arc::new(IdleSource))
}

#[tokio::test]
async fn analyze_scores_and_logs() {
    let engine = engine_with(Collaborators {
        text_classifier: Some(Arc::new(MarkerClassifier)),
        ..Default::default()
    });

    let result = engine
        .analyze("The mayor opened the new bridge", ContentType::Text)
        .await;
    // factual base 90, confidence 0.5 lands on the base
    assert_eq!(result.trust_score, 90);
    assert_eq!(result.classification, Some(ContentLabel::Factual));
    assert_eq!(result.confidence, Some(50.0));

    let logs = engine.recent_logs(10);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].result.item_id, result.item_id);
    assert_eq!(logs[0].sequence_id, 1);
}

#[tokio::test]
async fn analyze_without_collaborators_uses_fallback() {
    let engine = engine_with(Collaborators::default());

    let result = engine
        .analyze("Total hoax, a secret they hide", ContentType::Text)
        .await;
    assert_eq!(result.classification, Some(ContentLabel::Misinformation));
    // misinformation base 10, fallback confidence 0.5 lands on the base
    assert_eq!(result.trust_score, 10);
    assert!(result.reason.starts_with("Fallback analysis"));
}

#[tokio::test]
async fn analyze_cross_modal_combines_text_and_media() {
    let engine = engine_with(Collaborators {
        text_classifier: Some(Arc::new(MarkerClassifier)),
        image_matcher: Some(Arc::new(FixedMatcher(0.9))),
        transcriber: Some(Arc::new(EchoTranscriber("the mayor opened the new bridge"))),
        ..Default::default()
    });

    let result = engine
        .analyze_cross_modal(
            "the mayor opened the new bridge",
            Some("img-1".to_string()),
            Some("audio-1".to_string()),
        )
        .await;

    let report = result.cross_modal.as_ref().unwrap();
    assert_eq!(report.similarity_scores.len(), 2);
    assert_eq!(report.similarity_scores[&ModalityPair::TextAudio], 1.0);
    // avg = (0.9 + 1.0) / 2 = 0.95 → high tier, 80 + 25 = 100 (clamped)
    assert_eq!(report.consistency, ConsistencyTier::High);
    assert_eq!(report.score, 100);
    assert!(!report.degraded);
    // round(0.4 * 90 + 0.6 * 100) = 96
    assert_eq!(result.trust_score, 96);
}

#[tokio::test]
async fn analyze_cross_modal_without_media_is_text_only() {
    let engine = engine_with(Collaborators {
        text_classifier: Some(Arc::new(MarkerClassifier)),
        image_matcher: Some(Arc::new(FixedMatcher(0.9))),
        ..Default::default()
    });

    let result = engine
        .analyze_cross_modal("the mayor opened the new bridge", None, None)
        .await;
    assert!(result.cross_modal.is_none());
    assert_eq!(result.trust_score, 90);
}

#[tokio::test]
async fn logs_in_range_filters_by_score() {
    let engine = engine_with(Collaborators {
        text_classifier: Some(Arc::new(MarkerClassifier)),
        ..Default::default()
    });

    // Scores: hoax → 10, mayor → 90, default → 85
    engine.analyze("total hoax number one", ContentType::Text).await;
    engine.analyze("the mayor spoke", ContentType::Text).await;
    engine.analyze("another hoax claim", ContentType::Text).await;
    engine.analyze("plain report", ContentType::Text).await;

    let low = engine.logs_in_range(0, 30, 10);
    let ids: Vec<u64> = low.iter().map(|e| e.result.item_id).collect();
    // Both hoax entries, most recent first
    assert_eq!(ids, vec![3, 1]);

    let summary = engine.summary();
    assert_eq!(summary.count, 4);
    assert_eq!(summary.low_count, 2);
    assert_eq!(summary.high_count, 2);
}

#[tokio::test]
async fn ingest_dispatches_on_media_refs() {
    let engine = engine_with(Collaborators {
        text_classifier: Some(Arc::new(MarkerClassifier)),
        image_matcher: Some(Arc::new(FixedMatcher(0.9))),
        ..Default::default()
    });

    let mut item = ContentItem::text(42, "the mayor opened the new bridge");
    item.image_ref = Some("img-1".to_string());

    let result = engine.ingest(item).await;
    // Caller-assigned id is preserved, media takes the cross-modal path
    assert_eq!(result.item_id, 42);
    assert!(result.cross_modal.is_some());

    let plain = engine.ingest(ContentItem::text(43, "the mayor spoke")).await;
    assert!(plain.cross_modal.is_none());
    assert_eq!(engine.recent_logs(10).len(), 2);
}

#[tokio::test]
async fn item_ids_are_monotonic_across_push_calls() {
    let engine = engine_with(Collaborators::default());
    let a = engine.analyze("first", ContentType::Text).await;
    let b = engine.analyze("second", ContentType::Text).await;
    assert_eq!(b.item_id, a.item_id + 1);
}

#[tokio::test]
async fn clear_logs_reports_count_and_emits_event() {
    let engine = engine_with(Collaborators::default());
    let mut events = engine.event_bus().subscribe();

    engine.analyze("one", ContentType::Text).await;
    engine.analyze("two", ContentType::Text).await;
    assert_eq!(engine.clear_logs(), 2);
    assert_eq!(engine.clear_logs(), 0);
    assert_eq!(engine.summary().count, 0);

    let mut cleared_counts = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let EngineEvent::LogsCleared { evicted, .. } = event {
            cleared_counts.push(evicted);
        }
    }
    assert_eq!(cleared_counts, vec![2, 0]);
}

#[tokio::test]
async fn results_serialize_with_modality_keys() {
    let engine = engine_with(Collaborators {
        image_matcher: Some(Arc::new(FixedMatcher(0.9))),
        ..Default::default()
    });

    let result = engine
        .analyze_cross_modal("caption text", Some("img-1".to_string()), None)
        .await;

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["trust_score"], result.trust_score);
    assert_eq!(json["cross_modal"]["consistency"], "high");
    assert!(json["cross_modal"]["similarity_scores"]["text_image"].is_number());
}

#[tokio::test]
async fn multimodal_content_type_inferred_from_refs() {
    let engine = engine_with(Collaborators {
        image_matcher: Some(Arc::new(FixedMatcher(0.5))),
        ..Default::default()
    });

    let result = engine
        .analyze_cross_modal("caption text", Some("img-9".to_string()), None)
        .await;
    let report = result.cross_modal.as_ref().unwrap();
    assert_eq!(report.consistency, ConsistencyTier::Moderate);
    assert_eq!(report.similarity_scores[&ModalityPair::TextImage], 0.5);
}
