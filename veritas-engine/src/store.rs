//! Result Log Store
//!
//! Fixed-capacity, insertion-ordered ring of analysis results. The store is
//! the only mutable resource shared between the scheduling agent's loop and
//! external push callers, so every mutation goes through one lock; entries
//! are immutable after append and eviction is strictly FIFO.
//!
//! Reads (`recent`, `filter_by_trust_range`, `summary`) return fresh
//! snapshots, never live iterators, so concurrent appends after a call
//! returns cannot interfere with the caller's view.

use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::Utc;
use tracing::info;
use veritas_common::models::{AnalysisResult, LogEntry, LogSummary};

/// Default retained entries, matching the original deployment sizing
pub const DEFAULT_CAPACITY: usize = 100;

/// Severity bucket for log display, keyed off the trust score
fn severity(trust_score: u8) -> &'static str {
    match trust_score {
        80..=100 => "high-trust",
        60..=79 => "moderate-trust",
        40..=59 => "unclear",
        20..=39 => "low-trust",
        _ => "critical",
    }
}

struct StoreInner {
    entries: VecDeque<LogEntry>,
    next_sequence_id: u64,
}

/// Bounded in-memory log of analysis results
pub struct ResultLogStore {
    max_capacity: usize,
    inner: Mutex<StoreInner>,
}

impl ResultLogStore {
    /// Store with the given maximum capacity (entries beyond it evict the
    /// oldest, FIFO)
    pub fn new(max_capacity: usize) -> Self {
        Self {
            max_capacity: max_capacity.max(1),
            inner: Mutex::new(StoreInner {
                entries: VecDeque::with_capacity(max_capacity.max(1)),
                next_sequence_id: 1,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_capacity
    }

    /// Append a result, assigning the next sequence id
    ///
    /// O(1) amortized; evicts the oldest entry once the store is full.
    pub fn append(&self, result: AnalysisResult) -> LogEntry {
        info!(
            item_id = result.item_id,
            trust_score = result.trust_score,
            severity = severity(result.trust_score),
            reason = %result.reason,
            "analysis result logged"
        );

        let mut inner = self.inner.lock().expect("log store lock poisoned");
        let entry = LogEntry {
            sequence_id: inner.next_sequence_id,
            result,
            logged_at: Utc::now(),
        };
        inner.next_sequence_id += 1;

        inner.entries.push_back(entry.clone());
        if inner.entries.len() > self.max_capacity {
            inner.entries.pop_front();
        }
        entry
    }

    /// Most recently appended entries first, up to `limit`
    pub fn recent(&self, limit: usize) -> Vec<LogEntry> {
        let inner = self.inner.lock().expect("log store lock poisoned");
        inner.entries.iter().rev().take(limit).cloned().collect()
    }

    /// Entries whose trust score lies in `[min, max]` (inclusive), most
    /// recent first, up to `limit`
    pub fn filter_by_trust_range(&self, min: u8, max: u8, limit: usize) -> Vec<LogEntry> {
        let inner = self.inner.lock().expect("log store lock poisoned");
        inner
            .entries
            .iter()
            .rev()
            .filter(|e| e.result.trust_score >= min && e.result.trust_score <= max)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Aggregate statistics; the empty store yields the zero-state summary
    pub fn summary(&self) -> LogSummary {
        let inner = self.inner.lock().expect("log store lock poisoned");
        if inner.entries.is_empty() {
            return LogSummary::empty();
        }

        let count = inner.entries.len();
        let total: u64 = inner.entries.iter().map(|e| e.result.trust_score as u64).sum();
        let average = total as f64 / count as f64;

        let mut high_count = 0;
        let mut medium_count = 0;
        let mut low_count = 0;
        for entry in &inner.entries {
            match entry.result.trust_score {
                70..=100 => high_count += 1,
                30..=69 => medium_count += 1,
                _ => low_count += 1,
            }
        }

        LogSummary {
            count,
            average_trust_score: (average * 10.0).round() / 10.0,
            high_count,
            medium_count,
            low_count,
            latest_timestamp: inner.entries.back().map(|e| e.result.analyzed_at),
        }
    }

    /// Remove every entry, returning how many were evicted
    ///
    /// Sequence ids are not reset: they stay unique for the store lifetime.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock().expect("log store lock poisoned");
        let evicted = inner.entries.len();
        inner.entries.clear();
        if evicted > 0 {
            info!(evicted, "result log cleared");
        }
        evicted
    }
}

impl Default for ResultLogStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
