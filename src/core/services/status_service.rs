//! Disposition assignment and the derived read-only queries.

use serde::Serialize;

use crate::core::station::StationState;
use crate::domain::{DispositionStatus, ScanRecord};

use super::{ServiceError, ServiceResult};

/// Totals recovered for the operator overview.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationStats {
    pub expected: usize,
    pub scanned_in_manifest: usize,
    pub missing: usize,
    pub scanned_total: usize,
    pub percent_scanned: f64,
}

pub struct StatusService;

impl StatusService {
    /// Overwrites the disposition of an existing record. Any status may
    /// replace any other; there is no transition state machine.
    pub fn set_status(
        state: &mut StationState,
        code: &str,
        status: DispositionStatus,
    ) -> ServiceResult<()> {
        let record = state
            .scans
            .get_mut(code)
            .ok_or_else(|| ServiceError::NotFound(code.to_string()))?;
        record.status = Some(status);
        state.dashboard.invalidate();
        Ok(())
    }

    pub fn list_by_status(
        state: &StationState,
        status: Option<DispositionStatus>,
    ) -> Vec<ScanRecord> {
        state.scans.by_status(status)
    }

    /// Manifest codes with no corresponding scan, in set order.
    pub fn list_missing(state: &StationState) -> Vec<String> {
        state
            .manifest
            .iter()
            .filter(|code| state.scans.get(code).is_none())
            .cloned()
            .collect()
    }

    /// All records, most recent first.
    pub fn list_scanned(state: &StationState) -> Vec<ScanRecord> {
        state.scans.sorted_recent_first()
    }

    pub fn stats(state: &StationState) -> StationStats {
        let expected = state.manifest.len();
        let missing = Self::list_missing(state).len();
        let scanned_in_manifest = expected - missing;
        let percent_scanned = if expected > 0 {
            scanned_in_manifest as f64 / expected as f64 * 100.0
        } else {
            0.0
        };
        StationStats {
            expected,
            scanned_in_manifest,
            missing,
            scanned_total: state.scans.len(),
            percent_scanned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{Clock, FixedClock};
    use crate::core::services::recon_service::ReconService;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::at(Utc.with_ymd_and_hms(2026, 8, 4, 9, 30, 0).unwrap())
    }

    fn scanned_state(codes: &[&str], scan: &[&str]) -> StationState {
        let clock = clock();
        let mut state = StationState::new(clock.today());
        state.manifest.import(codes.iter().copied());
        for code in scan {
            ReconService::scan(&mut state, (*code).to_string(), None, &clock);
        }
        state
    }

    #[test]
    fn set_status_overwrites_freely() {
        let mut state = scanned_state(&["A1"], &["A1"]);
        StatusService::set_status(&mut state, "A1", DispositionStatus::Failed).unwrap();
        StatusService::set_status(&mut state, "A1", DispositionStatus::Collected).unwrap();
        let collected = StatusService::list_by_status(&state, Some(DispositionStatus::Collected));
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].code, "A1");
    }

    #[test]
    fn set_status_on_unknown_code_is_not_found() {
        let mut state = scanned_state(&["A1"], &[]);
        let err = StatusService::set_status(&mut state, "A1", DispositionStatus::Failed)
            .expect_err("no record yet");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[test]
    fn missing_is_manifest_minus_scanned() {
        let state = scanned_state(&["A1", "A2", "A3"], &["A1"]);
        assert_eq!(StatusService::list_missing(&state), vec!["A2", "A3"]);
    }

    #[test]
    fn manifest_splits_into_missing_and_scanned() {
        let state = scanned_state(&["A1", "A2", "A3"], &["A2", "A3"]);
        let stats = StatusService::stats(&state);
        assert_eq!(stats.expected, stats.missing + stats.scanned_in_manifest);
        assert_eq!(stats.scanned_total, 2);
        assert!((stats.percent_scanned - 66.666).abs() < 0.1);
    }
}
