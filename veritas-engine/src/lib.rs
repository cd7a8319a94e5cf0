//! veritas-engine library interface
//!
//! Exposes the engine core for integration testing and for any transport
//! layer built on top: the analysis pipeline, the result log store, and the
//! scheduling agent, wired together behind the [`Engine`] facade.

pub mod agent;
pub mod fusion;
pub mod pipeline;
pub mod services;
pub mod store;
pub mod types;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use veritas_common::config::EngineConfig;
use veritas_common::events::{EngineEvent, EventBus};
use veritas_common::models::{
    AgentStatus, AnalysisResult, ContentItem, ContentType, LogEntry, LogSummary,
};

use crate::agent::SchedulingAgent;
use crate::pipeline::AnalysisPipeline;
use crate::services::{CrossModalCombiner, TextDetector};
use crate::store::ResultLogStore;
use crate::types::{AudioTranscriber, ContentSource, ImageTextMatcher, TextClassifier};

/// External ML collaborators wired into the engine
///
/// Every field is optional; missing collaborators degrade to the
/// deterministic fallback paths rather than disabling analysis.
#[derive(Default)]
pub struct Collaborators {
    pub text_classifier: Option<Arc<dyn TextClassifier>>,
    pub image_matcher: Option<Arc<dyn ImageTextMatcher>>,
    pub transcriber: Option<Arc<dyn AudioTranscriber>>,
}

/// Engine facade shared between the scheduling agent and direct callers
pub struct Engine {
    pipeline: Arc<AnalysisPipeline>,
    store: Arc<ResultLogStore>,
    agent: Arc<SchedulingAgent>,
    event_bus: EventBus,
    language_default: String,
    /// Ids for caller-submitted items; the pull path's feed assigns its own
    next_item_id: AtomicU64,
}

impl Engine {
    /// Wire the pipeline, store, and agent from configuration
    pub fn new(
        config: &EngineConfig,
        collaborators: Collaborators,
        source: Arc<dyn ContentSource>,
    ) -> Self {
        let event_bus = EventBus::new(100);

        let detector = match collaborators.text_classifier {
            Some(classifier) => TextDetector::new(classifier),
            None => TextDetector::fallback_only(),
        };
        let combiner =
            CrossModalCombiner::new(collaborators.image_matcher, collaborators.transcriber);

        let pipeline = Arc::new(AnalysisPipeline::new(detector, combiner));
        let store = Arc::new(ResultLogStore::new(config.log_capacity));
        let agent = Arc::new(SchedulingAgent::new(
            Arc::clone(&pipeline),
            Arc::clone(&store),
            source,
            event_bus.clone(),
            Duration::from_secs_f64(config.agent_interval_secs),
            Duration::from_secs_f64(config.tick_backoff_secs),
        ));

        Self {
            pipeline,
            store,
            agent,
            event_bus,
            language_default: config.language_default.clone(),
            next_item_id: AtomicU64::new(1),
        }
    }

    fn make_item(&self, content: String, content_type: ContentType) -> ContentItem {
        ContentItem {
            id: self.next_item_id.fetch_add(1, Ordering::Relaxed),
            content,
            content_type,
            language: self.language_default.clone(),
            author: None,
            image_ref: None,
            audio_ref: None,
            created_at: Utc::now(),
        }
    }

    /// Analyze one caller-submitted item synchronously (push path)
    ///
    /// The result is appended to the log store before it is returned.
    pub async fn analyze(
        &self,
        content: impl Into<String>,
        content_type: ContentType,
    ) -> AnalysisResult {
        let item = self.make_item(content.into(), content_type);
        let result = self.pipeline.analyze(&item).await;
        self.record(result)
    }

    /// Analyze caller-submitted content with media references, weighing in
    /// cross-modal consistency
    pub async fn analyze_cross_modal(
        &self,
        content: impl Into<String>,
        image_ref: Option<String>,
        audio_ref: Option<String>,
    ) -> AnalysisResult {
        let content_type = if image_ref.is_some() || audio_ref.is_some() {
            ContentType::Multimodal
        } else {
            ContentType::Text
        };
        let mut item = self.make_item(content.into(), content_type);
        item.image_ref = image_ref;
        item.audio_ref = audio_ref;

        let result = self.pipeline.analyze_cross_modal(&item).await;
        self.record(result)
    }

    /// Analyze a fully-formed item supplied by the caller
    ///
    /// Runs the same analyze-and-append unit as one agent tick: items with
    /// media references take the cross-modal path.
    pub async fn ingest(&self, item: ContentItem) -> AnalysisResult {
        let result = self.pipeline.analyze_item(&item).await;
        self.record(result)
    }

    fn record(&self, result: AnalysisResult) -> AnalysisResult {
        let entry = self.store.append(result);
        self.event_bus.emit(EngineEvent::ItemAnalyzed {
            item_id: entry.result.item_id,
            trust_score: entry.result.trust_score,
            timestamp: entry.result.analyzed_at,
        });
        entry.result
    }

    /// Most recent log entries, newest first
    pub fn recent_logs(&self, limit: usize) -> Vec<LogEntry> {
        self.store.recent(limit)
    }

    /// Log entries with trust score in `[min, max]`, newest first
    pub fn logs_in_range(&self, min: u8, max: u8, limit: usize) -> Vec<LogEntry> {
        self.store.filter_by_trust_range(min, max, limit)
    }

    /// Aggregate statistics over the retained log entries
    pub fn summary(&self) -> LogSummary {
        self.store.summary()
    }

    /// Empty the log store, returning the number of evicted entries
    pub fn clear_logs(&self) -> usize {
        let evicted = self.store.clear();
        self.event_bus.emit(EngineEvent::LogsCleared {
            evicted,
            timestamp: Utc::now(),
        });
        evicted
    }

    /// Start the scheduling agent; no-op (returns false) if already running
    pub fn start_agent(&self) -> bool {
        self.agent.start()
    }

    /// Stop the scheduling agent and wait for its loop to exit
    pub async fn stop_agent(&self) {
        self.agent.stop().await;
    }

    /// Agent state snapshot
    pub fn status(&self) -> AgentStatus {
        self.agent.status()
    }

    /// Subscribe-side handle to the system event bus
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
