use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Where a served snapshot came from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotSource {
    Computed,
    Cache,
}

/// Derived dashboard view: lifetime per-carrier totals plus the same-day
/// operational summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardSnapshot {
    /// Count per carrier over the whole ledger, seeded with zeros for the
    /// configured display set.
    pub carriers: BTreeMap<String, u64>,
    pub total_today: u64,
    pub collected_today: u64,
    pub failed_today: u64,
    pub last_updated: DateTime<Utc>,
    pub source: SnapshotSource,
}

/// Persisted same-day counters carried over from scans the ledger no longer
/// holds. A full system reset folds the live counters in here before
/// clearing the ledger, so the day's throughput survives manifest cycles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyBaseline {
    pub date: NaiveDate,
    pub total: u64,
    pub collected: u64,
    pub failed: u64,
}

impl DailyBaseline {
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            total: 0,
            collected: 0,
            failed: 0,
        }
    }

    /// Counters contributed for `today`; a baseline from another day
    /// contributes nothing.
    pub fn counts_for(&self, today: NaiveDate) -> (u64, u64, u64) {
        if self.date == today {
            (self.total, self.collected, self.failed)
        } else {
            (0, 0, 0)
        }
    }

    /// Adds counters for `today`, restarting from zero when the stored
    /// baseline belongs to an earlier day.
    pub fn absorb(&mut self, today: NaiveDate, total: u64, collected: u64, failed: u64) {
        if self.date != today {
            *self = Self::zero(today);
        }
        self.total += total;
        self.collected += collected;
        self.failed += failed;
    }
}

fn cache_dirty_default() -> bool {
    true
}

/// Cached snapshot plus the invalidation flag and the persisted pieces of
/// daily-summary state (baseline and reset watermark).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardCache {
    #[serde(skip)]
    cached: Option<DashboardSnapshot>,
    #[serde(skip, default = "cache_dirty_default")]
    dirty: bool,
    pub baseline: DailyBaseline,
    /// Scans with `seq` below this watermark do not count toward the daily
    /// summary. Advanced by `reset_daily_summary`.
    pub reset_seq: u64,
}

impl DashboardCache {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            cached: None,
            dirty: true,
            baseline: DailyBaseline::zero(today),
            reset_seq: 0,
        }
    }

    /// Marks the cached snapshot stale. Called by every mutating ledger
    /// operation.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Returns the cached snapshot if it is still valid, tagged as served
    /// from cache.
    pub fn serve(&self) -> Option<DashboardSnapshot> {
        if self.dirty {
            return None;
        }
        self.cached.clone().map(|mut snapshot| {
            snapshot.source = SnapshotSource::Cache;
            snapshot
        })
    }

    pub fn store(&mut self, snapshot: DashboardSnapshot) {
        self.cached = Some(snapshot);
        self.dirty = false;
    }
}
