//! Analysis pipeline: detector → fusion → (cross-modal) → result
//!
//! The pipeline never fails. Every path through it ends in a complete
//! [`AnalysisResult`]: collaborator failures are absorbed by the detector
//! adapter and the cross-modal combiner before they reach this layer.

use chrono::Utc;
use veritas_common::models::{AnalysisResult, ContentItem};

use crate::fusion::TrustFuser;
use crate::services::cross_modal::{combined_trust, CrossModalCombiner};
use crate::services::text_detector::TextDetector;

/// Orchestrates one item's trip through detection and fusion
pub struct AnalysisPipeline {
    detector: TextDetector,
    combiner: CrossModalCombiner,
    fuser: TrustFuser,
}

impl AnalysisPipeline {
    pub fn new(detector: TextDetector, combiner: CrossModalCombiner) -> Self {
        Self {
            detector,
            combiner,
            fuser: TrustFuser::new(),
        }
    }

    /// Analyze an item's text content only
    pub async fn analyze(&self, item: &ContentItem) -> AnalysisResult {
        let detection = self.detector.classify(&item.content).await;
        let fused = self.fuser.fuse(&detection.signal);

        // The fallback path explains itself; the primary path uses the
        // fuser's canonical per-label template.
        let reason = detection.fallback_reason.unwrap_or(fused.reason);

        AnalysisResult {
            item_id: item.id,
            trust_score: fused.trust_score,
            reason,
            classification: Some(detection.signal.label),
            confidence: Some(fused.confidence_pct),
            cross_modal: None,
            analyzed_at: Utc::now(),
        }
    }

    /// Analyze an item, weighing in cross-modal consistency when media
    /// references accompany the text
    ///
    /// With cross-modal data present the text score contributes 40% and the
    /// cross-modal score 60%; without media refs this is plain [`analyze`].
    ///
    /// [`analyze`]: AnalysisPipeline::analyze
    pub async fn analyze_cross_modal(&self, item: &ContentItem) -> AnalysisResult {
        let mut result = self.analyze(item).await;

        if !item.has_media() {
            return result;
        }

        let report = self
            .combiner
            .combine(&item.content, item.image_ref.as_deref(), item.audio_ref.as_deref())
            .await;

        // Combination applies only when at least one pairwise score exists;
        // a combiner without collaborators still attaches its report.
        if !report.similarity_scores.is_empty() {
            result.trust_score = combined_trust(result.trust_score, report.score);
        }
        result.cross_modal = Some(report);
        result
    }

    /// Dispatch on the item: media-bearing items take the cross-modal path
    pub async fn analyze_item(&self, item: &ContentItem) -> AnalysisResult {
        if item.has_media() {
            self.analyze_cross_modal(item).await
        } else {
            self.analyze(item).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::types::{ClassifierOutput, CollaboratorError, ImageTextMatcher, TextClassifier};
    use veritas_common::models::{ConsistencyTier, ContentLabel};

    struct CredibleClassifier;

    #[async_trait::async_trait]
    impl TextClassifier for CredibleClassifier {
        fn name(&self) -> &'static str {
            "stub-zero-shot"
        }

        async fn classify(&self, _text: &str) -> Result<ClassifierOutput, CollaboratorError> {
            Ok(ClassifierOutput {
                labels: vec!["credible information".into(), "clickbait".into()],
                scores: vec![0.5, 0.5],
            })
        }
    }

    struct FixedMatcher(f32);

    #[async_trait::async_trait]
    impl ImageTextMatcher for FixedMatcher {
        fn name(&self) -> &'static str {
            "stub-matcher"
        }

        async fn similarity(&self, _t: &str, _i: &str) -> Result<f32, CollaboratorError> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn text_only_result_is_complete() {
        let pipeline = AnalysisPipeline::new(
            TextDetector::new(Arc::new(CredibleClassifier)),
            CrossModalCombiner::disabled(),
        );
        let item = ContentItem::text(1, "City opens new library");

        let result = pipeline.analyze_item(&item).await;
        assert_eq!(result.item_id, 1);
        // credible base 85, confidence 0.5 lands on the base
        assert_eq!(result.trust_score, 85);
        assert_eq!(result.classification, Some(ContentLabel::Credible));
        assert!(!result.reason.is_empty());
        assert!(result.cross_modal.is_none());
    }

    #[tokio::test]
    async fn media_item_combines_scores() {
        let pipeline = AnalysisPipeline::new(
            TextDetector::new(Arc::new(CredibleClassifier)),
            CrossModalCombiner::new(Some(Arc::new(FixedMatcher(0.2))), None),
        );
        let mut item = ContentItem::text(2, "Photo shows flooded street");
        item.image_ref = Some("img-77".to_string());

        let result = pipeline.analyze_item(&item).await;
        let report = result.cross_modal.as_ref().unwrap();
        assert_eq!(report.consistency, ConsistencyTier::Inconsistent);
        assert_eq!(report.score, 20);
        // round(0.4 * 85 + 0.6 * 20) = round(46.0) = 46
        assert_eq!(result.trust_score, 46);
    }

    #[tokio::test]
    async fn media_item_without_collaborators_keeps_text_score() {
        let pipeline = AnalysisPipeline::new(
            TextDetector::new(Arc::new(CredibleClassifier)),
            CrossModalCombiner::disabled(),
        );
        let mut item = ContentItem::text(3, "Photo shows flooded street");
        item.image_ref = Some("img-77".to_string());

        let result = pipeline.analyze_item(&item).await;
        let report = result.cross_modal.as_ref().unwrap();
        assert_eq!(report.consistency, ConsistencyTier::NoMultimodalContent);
        assert_eq!(result.trust_score, 85);
    }
}
