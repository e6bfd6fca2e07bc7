use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::clock::{Clock, SystemClock};
use crate::core::services::{
    CarrierBatchReport, DashboardService, ManifestService, ReconService, ResetReport,
    ServiceResult, StationStats, StatusService,
};
use crate::domain::{
    normalize_code, DashboardCache, DashboardSnapshot, DispositionStatus, ScanOutcome, ScanRecord,
};
use crate::errors::StationError;
use crate::ledger::{DeleteReport, ImportReport, ManifestStore, ScanLedger};
use crate::storage::StorageBackend;

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Shared mutable state of one counting station: one active manifest, the
/// scan ledger, and the dashboard cache/baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationState {
    pub manifest: ManifestStore,
    pub scans: ScanLedger,
    pub dashboard: DashboardCache,
    #[serde(default = "StationState::schema_version_default")]
    pub schema_version: u8,
}

impl StationState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            manifest: ManifestStore::default(),
            scans: ScanLedger::default(),
            dashboard: DashboardCache::new(today),
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

/// Facade over the station state. All operations take the one state lock,
/// which makes the duplicate-check-plus-insert of a scan atomic per code;
/// manual-scanning throughput does not warrant anything finer grained.
pub struct Station {
    state: Mutex<StationState>,
    clock: Box<dyn Clock>,
    display_carriers: Vec<String>,
}

impl Station {
    pub fn new(display_carriers: Vec<String>) -> Self {
        Self::with_clock(display_carriers, Box::new(SystemClock))
    }

    pub fn with_clock(display_carriers: Vec<String>, clock: Box<dyn Clock>) -> Self {
        let state = StationState::new(clock.today());
        Self {
            state: Mutex::new(state),
            clock,
            display_carriers,
        }
    }

    fn lock(&self) -> MutexGuard<'_, StationState> {
        self.state.lock().expect("station state lock poisoned")
    }

    /// Imports manifest codes. `clear_existing` replaces the manifest and
    /// clears the scan ledger; callers confirm that upstream.
    pub fn import_codes<I, S>(&self, codes: I, clear_existing: bool) -> ImportReport
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut state = self.lock();
        ManifestService::import_codes(&mut state, codes, clear_existing, self.clock.as_ref())
    }

    /// Submits one scanned code. Empty input is rejected before it reaches
    /// the reconciliation engine. `armed` is the caller's currently selected
    /// disposition, applied to a freshly accepted record.
    pub fn scan(
        &self,
        raw_code: &str,
        armed: Option<DispositionStatus>,
    ) -> ServiceResult<ScanOutcome> {
        let code = normalize_code(raw_code);
        if code.is_empty() {
            return Err(
                StationError::Validation("tracking code must not be empty".into()).into(),
            );
        }
        let mut state = self.lock();
        Ok(ReconService::scan(&mut state, code, armed, self.clock.as_ref()))
    }

    pub fn set_status(&self, raw_code: &str, status: DispositionStatus) -> ServiceResult<()> {
        let code = self.require_code(raw_code)?;
        let mut state = self.lock();
        StatusService::set_status(&mut state, &code, status)
    }

    pub fn assign_carrier(&self, raw_code: &str, carrier: &str) -> ServiceResult<()> {
        let code = self.require_code(raw_code)?;
        let carrier = Self::require_carrier(carrier)?;
        let mut state = self.lock();
        DashboardService::assign_carrier(&mut state, &code, &carrier)
    }

    pub fn assign_carrier_to_all_unset(&self, carrier: &str) -> ServiceResult<CarrierBatchReport> {
        let carrier = Self::require_carrier(carrier)?;
        let mut state = self.lock();
        Ok(DashboardService::assign_carrier_to_all_unset(
            &mut state, &carrier,
        ))
    }

    pub fn delete_scan(&self, raw_code: &str) -> ServiceResult<ScanRecord> {
        let code = self.require_code(raw_code)?;
        let mut state = self.lock();
        ReconService::delete(&mut state, &code)
    }

    pub fn delete_scans(&self, raw_codes: &[String]) -> DeleteReport {
        let codes: Vec<String> = raw_codes
            .iter()
            .map(|raw| normalize_code(raw))
            .filter(|code| !code.is_empty())
            .collect();
        let mut state = self.lock();
        ReconService::delete_many(&mut state, &codes)
    }

    /// Removes a single expected code from the manifest.
    pub fn remove_manifest_code(&self, raw_code: &str) -> ServiceResult<bool> {
        let code = self.require_code(raw_code)?;
        let mut state = self.lock();
        Ok(ManifestService::remove_code(&mut state, &code))
    }

    /// Full system reset: clears manifest and ledger together, preserving
    /// the same-day dashboard summary.
    pub fn reset(&self) -> ResetReport {
        let mut state = self.lock();
        ManifestService::reset(&mut state, self.clock.as_ref())
    }

    pub fn list_missing(&self) -> Vec<String> {
        StatusService::list_missing(&self.lock())
    }

    pub fn list_scanned(&self) -> Vec<ScanRecord> {
        StatusService::list_scanned(&self.lock())
    }

    pub fn list_by_status(&self, status: Option<DispositionStatus>) -> Vec<ScanRecord> {
        StatusService::list_by_status(&self.lock(), status)
    }

    pub fn stats(&self) -> StationStats {
        StatusService::stats(&self.lock())
    }

    /// Cached-unless-dirty dashboard view.
    pub fn dashboard(&self) -> DashboardSnapshot {
        let mut state = self.lock();
        DashboardService::get(&mut state, &self.display_carriers, self.clock.as_ref())
    }

    /// Forces recomputation, bypassing the cache.
    pub fn refresh_dashboard(&self) -> DashboardSnapshot {
        let mut state = self.lock();
        DashboardService::refresh(&mut state, &self.display_carriers, self.clock.as_ref())
    }

    pub fn reset_daily_summary(&self) {
        let mut state = self.lock();
        DashboardService::reset_daily_summary(&mut state, self.clock.as_ref());
    }

    pub fn save_to(&self, storage: &dyn StorageBackend) -> Result<PathBuf, StationError> {
        let state = self.lock();
        storage.save(&state)
    }

    /// Restores a station from a stored snapshot, or starts fresh when none
    /// exists. The dashboard cache always loads dirty.
    pub fn load_from(
        storage: &dyn StorageBackend,
        display_carriers: Vec<String>,
        clock: Box<dyn Clock>,
    ) -> Result<Self, StationError> {
        let state = match storage.load()? {
            Some(mut state) => {
                state.dashboard.invalidate();
                state
            }
            None => StationState::new(clock.today()),
        };
        Ok(Self {
            state: Mutex::new(state),
            clock,
            display_carriers,
        })
    }

    fn require_code(&self, raw: &str) -> ServiceResult<String> {
        let code = normalize_code(raw);
        if code.is_empty() {
            return Err(
                StationError::Validation("tracking code must not be empty".into()).into(),
            );
        }
        Ok(code)
    }

    fn require_carrier(raw: &str) -> ServiceResult<String> {
        let carrier = raw.trim().to_string();
        if carrier.is_empty() {
            return Err(
                StationError::Validation("carrier name must not be empty".into()).into(),
            );
        }
        Ok(carrier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::services::ServiceError;
    use chrono::{TimeZone, Utc};
    use std::sync::{Arc, Barrier};
    use std::thread;

    fn test_station() -> Station {
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2026, 8, 4, 9, 30, 0).unwrap());
        Station::with_clock(vec!["JADLOG".into()], Box::new(clock))
    }

    #[test]
    fn empty_code_is_rejected_before_reconciliation() {
        let station = test_station();
        let err = station.scan("   ", None).expect_err("blank input");
        assert!(matches!(
            err,
            ServiceError::Station(StationError::Validation(_))
        ));
    }

    #[test]
    fn scan_is_case_insensitive() {
        let station = test_station();
        station.import_codes(["A1"], false);
        assert!(station.scan("a1", None).unwrap().is_accepted());
        assert!(matches!(
            station.scan("A1", None).unwrap(),
            ScanOutcome::AlreadyScanned(_)
        ));
    }

    #[test]
    fn concurrent_scans_of_one_code_accept_exactly_once() {
        let station = Arc::new(test_station());
        station.import_codes(["A2"], false);

        let barrier = Arc::new(Barrier::new(2));
        let mut handles = Vec::new();
        for _ in 0..2 {
            let station = Arc::clone(&station);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                station.scan("A2", None).unwrap()
            }));
        }

        let outcomes: Vec<ScanOutcome> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        let accepted = outcomes.iter().filter(|o| o.is_accepted()).count();
        let duplicates = outcomes
            .iter()
            .filter(|o| matches!(o, ScanOutcome::AlreadyScanned(_)))
            .count();
        assert_eq!((accepted, duplicates), (1, 1));
        assert_eq!(station.list_scanned().len(), 1);
    }

    #[test]
    fn reset_preserves_daily_summary_but_clears_state() {
        let station = test_station();
        station.import_codes(["A1", "A2"], false);
        station.scan("A1", None).unwrap();

        let report = station.reset();
        assert_eq!(report.manifest_removed, 2);
        assert_eq!(report.scans_removed, 1);
        assert!(station.list_scanned().is_empty());
        assert_eq!(station.dashboard().total_today, 1);
    }

    #[test]
    fn blank_carrier_is_a_validation_error() {
        let station = test_station();
        let err = station
            .assign_carrier_to_all_unset("  ")
            .expect_err("blank carrier");
        assert!(matches!(
            err,
            ServiceError::Station(StationError::Validation(_))
        ));
    }
}
