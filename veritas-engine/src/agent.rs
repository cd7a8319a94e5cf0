//! Scheduling Agent
//!
//! Drives the analysis pipeline at a fixed cadence: each tick pulls one
//! item from the content source, runs it through the pipeline, and appends
//! the result to the log store. The inter-tick wait is the loop's only
//! suspension point that observes cancellation, so a tick's work-unit is
//! never abandoned mid-fusion and shutdown latency is bounded by one tick
//! interval.
//!
//! State machine: idle → running → stopping → idle. `start()` while running
//! is a no-op; a failed tick is logged, backs off, and never terminates the
//! loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use veritas_common::events::{EngineEvent, EventBus};
use veritas_common::models::AgentStatus;

use crate::pipeline::AnalysisPipeline;
use crate::store::ResultLogStore;
use crate::types::ContentSource;

/// Agent lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running,
    Stopping,
}

struct Lifecycle {
    phase: Phase,
    started_at: Option<Instant>,
    cancel: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

/// Continuously-running driver of the analysis pipeline
pub struct SchedulingAgent {
    pipeline: Arc<AnalysisPipeline>,
    store: Arc<ResultLogStore>,
    source: Arc<dyn ContentSource>,
    event_bus: EventBus,
    /// Wait between ticks
    interval: Duration,
    /// Fixed pause after a failed tick
    backoff: Duration,
    /// Ticks that fully completed, cumulative across runs
    items_processed: AtomicU64,
    lifecycle: Mutex<Lifecycle>,
}

impl SchedulingAgent {
    pub fn new(
        pipeline: Arc<AnalysisPipeline>,
        store: Arc<ResultLogStore>,
        source: Arc<dyn ContentSource>,
        event_bus: EventBus,
        interval: Duration,
        backoff: Duration,
    ) -> Self {
        Self {
            pipeline,
            store,
            source,
            event_bus,
            interval,
            backoff,
            items_processed: AtomicU64::new(0),
            lifecycle: Mutex::new(Lifecycle {
                phase: Phase::Idle,
                started_at: None,
                cancel: None,
                handle: None,
            }),
        }
    }

    /// Transition idle → running and spawn the tick loop
    ///
    /// Returns false (and does nothing) when the agent is already running
    /// or still stopping.
    pub fn start(self: &Arc<Self>) -> bool {
        let mut lifecycle = self.lifecycle.lock().expect("agent lifecycle lock poisoned");
        if lifecycle.phase != Phase::Idle {
            debug!("agent start ignored: not idle");
            return false;
        }

        let cancel = CancellationToken::new();
        lifecycle.phase = Phase::Running;
        lifecycle.started_at = Some(Instant::now());
        lifecycle.cancel = Some(cancel.clone());

        let agent = Arc::clone(self);
        lifecycle.handle = Some(tokio::spawn(async move {
            agent.run_loop(cancel).await;
        }));

        info!(interval_ms = self.interval.as_millis() as u64, "scheduling agent started");
        self.event_bus.emit(EngineEvent::AgentStarted { timestamp: Utc::now() });
        true
    }

    /// Request cancellation and wait for the loop to reach its next
    /// suspension point and exit
    pub async fn stop(&self) {
        let (cancel, handle) = {
            let mut lifecycle = self.lifecycle.lock().expect("agent lifecycle lock poisoned");
            if lifecycle.phase != Phase::Running {
                return;
            }
            lifecycle.phase = Phase::Stopping;
            (lifecycle.cancel.take(), lifecycle.handle.take())
        };

        info!("stopping scheduling agent");
        if let Some(cancel) = cancel {
            cancel.cancel();
        }
        if let Some(handle) = handle {
            // The loop only observes cancellation between ticks, so this
            // wait is bounded by one tick interval plus in-flight work.
            let _ = handle.await;
        }
    }

    /// Current agent state snapshot
    pub fn status(&self) -> AgentStatus {
        let lifecycle = self.lifecycle.lock().expect("agent lifecycle lock poisoned");
        AgentStatus {
            running: lifecycle.phase == Phase::Running,
            items_processed: self.items_processed.load(Ordering::Relaxed),
            uptime_seconds: lifecycle
                .started_at
                .map(|t| t.elapsed().as_secs_f64())
                .unwrap_or(0.0),
        }
    }

    /// Seconds since the agent last started, 0.0 if never started
    pub fn uptime(&self) -> f64 {
        self.status().uptime_seconds
    }

    async fn run_loop(self: Arc<Self>, cancel: CancellationToken) {
        let mut consecutive_failures: u32 = 0;

        loop {
            // One tick executes to completion without yielding to
            // cancellation; partial ticks are never abandoned.
            match self.source.next_item().await {
                Ok(item) => {
                    debug!(item_id = item.id, content_type = item.content_type.as_str(), "tick pulled item");
                    let result = self.pipeline.analyze_item(&item).await;
                    let entry = self.store.append(result);
                    self.items_processed.fetch_add(1, Ordering::Relaxed);
                    consecutive_failures = 0;
                    self.event_bus.emit(EngineEvent::ItemAnalyzed {
                        item_id: entry.result.item_id,
                        trust_score: entry.result.trust_score,
                        timestamp: entry.result.analyzed_at,
                    });
                }
                Err(e) => {
                    // No cap or circuit breaker: the agent retries forever
                    // and the consecutive count is surfaced for operators.
                    consecutive_failures += 1;
                    error!(error = %e, consecutive_failures, "agent tick failed, backing off");
                    self.event_bus.emit(EngineEvent::TickFailed {
                        message: e.to_string(),
                        consecutive_failures,
                        timestamp: Utc::now(),
                    });

                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        _ = tokio::time::sleep(self.backoff) => {}
                    }
                    continue;
                }
            }

            // Sole cancellation observation point.
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        let items_processed = self.items_processed.load(Ordering::Relaxed);
        {
            let mut lifecycle = self.lifecycle.lock().expect("agent lifecycle lock poisoned");
            lifecycle.phase = Phase::Idle;
        }
        info!(items_processed, "scheduling agent stopped");
        self.event_bus.emit(EngineEvent::AgentStopped {
            items_processed,
            timestamp: Utc::now(),
        });
    }
}
