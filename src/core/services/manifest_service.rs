//! Manifest imports and the destructive whole-system reset.

use serde::Serialize;

use crate::core::clock::Clock;
use crate::core::station::StationState;
use crate::ledger::ImportReport;

use super::dashboard_service::DashboardService;

/// Counts removed by a full system reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResetReport {
    pub manifest_removed: usize,
    pub scans_removed: usize,
}

pub struct ManifestService;

impl ManifestService {
    /// Imports codes into the manifest. With `clear_existing` this REPLACES
    /// the manifest and destroys the scan ledger: scans against the old
    /// manifest are meaningless once the expectation set is replaced.
    /// Today's dashboard counters are folded into the baseline first, so
    /// the day's throughput survives the cycle change.
    pub fn import_codes<I, S>(
        state: &mut StationState,
        codes: I,
        clear_existing: bool,
        clock: &dyn Clock,
    ) -> ImportReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if clear_existing {
            DashboardService::absorb_today_into_baseline(state, clock);
            state.manifest.clear();
            let dropped = state.scans.clear();
            state.dashboard.invalidate();
            tracing::info!(dropped, "manifest replaced; scan ledger cleared");
        }
        let report = state.manifest.import(codes);
        tracing::info!(
            imported = report.imported,
            duplicates = report.duplicates_skipped,
            "manifest import finished"
        );
        report
    }

    /// Clears manifest and ledger together. The same-day dashboard summary
    /// is preserved via the baseline; carrier totals drop with the records
    /// they were derived from.
    pub fn reset(state: &mut StationState, clock: &dyn Clock) -> ResetReport {
        DashboardService::absorb_today_into_baseline(state, clock);
        let manifest_removed = state.manifest.clear();
        let scans_removed = state.scans.clear();
        state.dashboard.invalidate();
        tracing::info!(manifest_removed, scans_removed, "station reset");
        ResetReport {
            manifest_removed,
            scans_removed,
        }
    }

    /// Removes a single not-yet-scanned expected code.
    pub fn remove_code(state: &mut StationState, code: &str) -> bool {
        state.manifest.remove(code)
    }
}
