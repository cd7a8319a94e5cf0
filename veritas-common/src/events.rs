//! Event types for the Veritas engine
//!
//! Provides shared event definitions and the EventBus used to broadcast
//! system events (agent lifecycle, per-item analysis, maintenance) to any
//! interested subscriber without coupling the producers to them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Veritas system events
///
/// Events are broadcast via [`EventBus`]; a future transport layer can
/// serialize them for SSE transmission without touching the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineEvent {
    /// Scheduling agent entered the running state
    AgentStarted {
        /// When the agent started
        timestamp: DateTime<Utc>,
    },

    /// Scheduling agent left the running state
    AgentStopped {
        /// Ticks that fully completed during this run
        items_processed: u64,
        /// When the agent stopped
        timestamp: DateTime<Utc>,
    },

    /// One content item completed analysis and was appended to the log store
    ItemAnalyzed {
        /// Id of the analyzed content item
        item_id: u64,
        /// Fused trust score (0-100)
        trust_score: u8,
        /// When fusion completed
        timestamp: DateTime<Utc>,
    },

    /// One agent tick failed; the agent backs off and continues
    TickFailed {
        /// Failure description
        message: String,
        /// Consecutive failures observed so far, including this one
        consecutive_failures: u32,
        /// When the failure was observed
        timestamp: DateTime<Utc>,
    },

    /// Result log store was explicitly cleared
    LogsCleared {
        /// Number of entries removed
        evicted: usize,
        /// When the store was cleared
        timestamp: DateTime<Utc>,
    },
}

/// Central event distribution bus
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
///
/// # Examples
///
/// ```
/// use veritas_common::events::{EngineEvent, EventBus};
///
/// let bus = EventBus::new(100);
/// let mut rx = bus.subscribe();
///
/// bus.emit(EngineEvent::AgentStarted { timestamp: chrono::Utc::now() });
/// ```
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<EngineEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns the number of subscribers the event reached. A bus with no
    /// subscribers is not an error: the engine runs headless in tests and
    /// the event is simply dropped.
    pub fn emit(&self, event: EngineEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
