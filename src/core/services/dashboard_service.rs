//! Per-carrier and per-day counter aggregation.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::clock::Clock;
use crate::core::station::StationState;
use crate::domain::{
    DailyBaseline, DashboardSnapshot, DispositionStatus, SnapshotSource,
};

use super::{ServiceError, ServiceResult};

/// Outcome of a batch carrier assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CarrierBatchReport {
    pub updated: usize,
}

pub struct DashboardService;

impl DashboardService {
    /// Recomputes the snapshot from the ledger. Carrier counts span the
    /// whole ledger lifetime; the daily counters cover today's scans above
    /// the reset watermark plus the carried-over baseline.
    pub fn compute(
        state: &StationState,
        display_carriers: &[String],
        clock: &dyn Clock,
    ) -> DashboardSnapshot {
        let today = clock.today();
        let mut carriers: BTreeMap<String, u64> = display_carriers
            .iter()
            .map(|name| (name.clone(), 0))
            .collect();
        let (mut total, mut collected, mut failed) = state.dashboard.baseline.counts_for(today);

        for record in state.scans.records() {
            if let Some(carrier) = &record.carrier {
                *carriers.entry(carrier.clone()).or_insert(0) += 1;
            }
            if record.scan_date == today && record.seq >= state.dashboard.reset_seq {
                total += 1;
                match record.status {
                    Some(DispositionStatus::Collected) => collected += 1,
                    Some(DispositionStatus::Failed) => failed += 1,
                    None => {}
                }
            }
        }

        DashboardSnapshot {
            carriers,
            total_today: total,
            collected_today: collected,
            failed_today: failed,
            last_updated: clock.now(),
            source: SnapshotSource::Computed,
        }
    }

    /// Serves the cached snapshot when still valid, recomputing otherwise.
    pub fn get(
        state: &mut StationState,
        display_carriers: &[String],
        clock: &dyn Clock,
    ) -> DashboardSnapshot {
        if let Some(snapshot) = state.dashboard.serve() {
            return snapshot;
        }
        Self::refresh(state, display_carriers, clock)
    }

    /// Forces a recomputation, bypassing any cached value.
    pub fn refresh(
        state: &mut StationState,
        display_carriers: &[String],
        clock: &dyn Clock,
    ) -> DashboardSnapshot {
        let snapshot = Self::compute(state, display_carriers, clock);
        state.dashboard.store(snapshot.clone());
        snapshot
    }

    /// Zeroes the day's collected/failed/total counters without touching
    /// scan records or carrier totals, by restarting the baseline and
    /// advancing the watermark past every current record.
    pub fn reset_daily_summary(state: &mut StationState, clock: &dyn Clock) {
        state.dashboard.baseline = DailyBaseline::zero(clock.today());
        state.dashboard.reset_seq = state.scans.high_water_seq();
        state.dashboard.invalidate();
        tracing::info!("daily dashboard summary reset");
    }

    /// Folds today's live counters into the persisted baseline. Invoked
    /// right before an operation destroys the scan ledger, so the day's
    /// throughput survives manifest cycles.
    pub(crate) fn absorb_today_into_baseline(state: &mut StationState, clock: &dyn Clock) {
        let today = clock.today();
        let (mut total, mut collected, mut failed) = (0, 0, 0);
        for record in state.scans.records() {
            if record.scan_date == today && record.seq >= state.dashboard.reset_seq {
                total += 1;
                match record.status {
                    Some(DispositionStatus::Collected) => collected += 1,
                    Some(DispositionStatus::Failed) => failed += 1,
                    None => {}
                }
            }
        }
        state
            .dashboard
            .baseline
            .absorb(today, total, collected, failed);
    }

    /// Assigns a carrier to one record.
    pub fn assign_carrier(
        state: &mut StationState,
        code: &str,
        carrier: &str,
    ) -> ServiceResult<()> {
        let record = state
            .scans
            .get_mut(code)
            .ok_or_else(|| ServiceError::NotFound(code.to_string()))?;
        record.carrier = Some(carrier.to_string());
        state.dashboard.invalidate();
        Ok(())
    }

    /// Assigns `carrier` to every record missing one. Running it twice in a
    /// row reports zero updates the second time.
    pub fn assign_carrier_to_all_unset(
        state: &mut StationState,
        carrier: &str,
    ) -> CarrierBatchReport {
        let updated = state.scans.assign_carrier_to_unset(carrier);
        if updated > 0 {
            state.dashboard.invalidate();
        }
        CarrierBatchReport { updated }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::services::recon_service::ReconService;
    use crate::core::services::status_service::StatusService;
    use crate::domain::DispositionStatus;
    use chrono::{Duration, TimeZone, Utc};

    const CARRIERS: &[&str] = &["JADLOG", "LOGAN"];

    fn display() -> Vec<String> {
        CARRIERS.iter().map(|name| name.to_string()).collect()
    }

    fn clock() -> FixedClock {
        FixedClock::at(Utc.with_ymd_and_hms(2026, 8, 4, 9, 30, 0).unwrap())
    }

    fn seeded_state(clock: &FixedClock) -> StationState {
        let mut state = StationState::new(clock.today());
        state.manifest.import(["A1", "A2", "A3"]);
        for code in ["A1", "A2"] {
            ReconService::scan(&mut state, code.to_string(), None, clock);
        }
        StatusService::set_status(&mut state, "A1", DispositionStatus::Collected).unwrap();
        DashboardService::assign_carrier(&mut state, "A1", "JADLOG").unwrap();
        state
    }

    #[test]
    fn daily_counters_track_todays_scans() {
        let clock = clock();
        let mut state = seeded_state(&clock);
        let snapshot = DashboardService::refresh(&mut state, &display(), &clock);
        assert_eq!(snapshot.total_today, 2);
        assert_eq!(snapshot.collected_today, 1);
        assert_eq!(snapshot.failed_today, 0);
        assert_eq!(snapshot.carriers["JADLOG"], 1);
        assert_eq!(snapshot.carriers["LOGAN"], 0);
    }

    #[test]
    fn yesterdays_scans_do_not_count_toward_today() {
        let clock = clock();
        let mut state = seeded_state(&clock);
        clock.advance(Duration::days(1));
        let snapshot = DashboardService::refresh(&mut state, &display(), &clock);
        assert_eq!(snapshot.total_today, 0);
        assert_eq!(snapshot.carriers["JADLOG"], 1);
    }

    #[test]
    fn get_serves_from_cache_until_invalidated() {
        let clock = clock();
        let mut state = seeded_state(&clock);
        let first = DashboardService::get(&mut state, &display(), &clock);
        assert_eq!(first.source, SnapshotSource::Computed);

        let second = DashboardService::get(&mut state, &display(), &clock);
        assert_eq!(second.source, SnapshotSource::Cache);

        StatusService::set_status(&mut state, "A2", DispositionStatus::Failed).unwrap();
        let third = DashboardService::get(&mut state, &display(), &clock);
        assert_eq!(third.source, SnapshotSource::Computed);
        assert_eq!(third.failed_today, 1);
    }

    #[test]
    fn daily_reset_zeroes_today_but_keeps_carrier_totals() {
        let clock = clock();
        let mut state = seeded_state(&clock);
        DashboardService::reset_daily_summary(&mut state, &clock);
        let snapshot = DashboardService::refresh(&mut state, &display(), &clock);
        assert_eq!(snapshot.total_today, 0);
        assert_eq!(snapshot.collected_today, 0);
        assert_eq!(snapshot.carriers["JADLOG"], 1);

        // Scans after the reset count again.
        ReconService::scan(&mut state, "A3".to_string(), None, &clock);
        let snapshot = DashboardService::refresh(&mut state, &display(), &clock);
        assert_eq!(snapshot.total_today, 1);
    }

    #[test]
    fn unknown_carriers_extend_the_display_set() {
        let clock = clock();
        let mut state = seeded_state(&clock);
        DashboardService::assign_carrier(&mut state, "A2", "NEW EXPRESS").unwrap();
        let snapshot = DashboardService::refresh(&mut state, &display(), &clock);
        assert_eq!(snapshot.carriers["NEW EXPRESS"], 1);
    }

    #[test]
    fn batch_assignment_is_idempotent() {
        let clock = clock();
        let mut state = seeded_state(&clock);
        let first = DashboardService::assign_carrier_to_all_unset(&mut state, "LOGAN");
        assert_eq!(first.updated, 1);
        let second = DashboardService::assign_carrier_to_all_unset(&mut state, "LOGAN");
        assert_eq!(second.updated, 0);
    }
}
