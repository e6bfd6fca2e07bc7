//! Reconciliation of incoming scans against the expected manifest.

use crate::core::clock::Clock;
use crate::core::station::StationState;
use crate::domain::{DispositionStatus, ScanOutcome, ScanRecord};
use crate::ledger::DeleteReport;

use super::{ServiceError, ServiceResult};

/// Decides whether an incoming scan is a manifest hit, a duplicate, or
/// unknown, and records accepted scans in the ledger.
pub struct ReconService;

impl ReconService {
    /// Resolves one normalized, non-empty code. The duplicate check and the
    /// insert happen on the same exclusive state reference, so callers that
    /// serialize access (the station lock) get exactly one `Accepted` per
    /// code.
    pub fn scan(
        state: &mut StationState,
        code: String,
        armed: Option<DispositionStatus>,
        clock: &dyn Clock,
    ) -> ScanOutcome {
        if state.scans.get(&code).is_none() && !state.manifest.contains(&code) {
            tracing::debug!(code = %code, "scan rejected: not on manifest");
            return ScanOutcome::NotExpected { code };
        }
        match state.scans.admit(code, clock.now(), clock.today(), armed) {
            Ok(record) => {
                state.dashboard.invalidate();
                tracing::debug!(code = %record.code, seq = record.seq, "scan accepted");
                ScanOutcome::Accepted(record)
            }
            Err(existing) => ScanOutcome::AlreadyScanned(existing),
        }
    }

    /// Deletes the record for `code`, freeing it for re-scan.
    pub fn delete(state: &mut StationState, code: &str) -> ServiceResult<ScanRecord> {
        let record = state
            .scans
            .remove(code)
            .ok_or_else(|| ServiceError::NotFound(code.to_string()))?;
        state.dashboard.invalidate();
        Ok(record)
    }

    /// Batch deletion; missing codes are reported, not errors.
    pub fn delete_many(state: &mut StationState, codes: &[String]) -> DeleteReport {
        let report = state.scans.remove_many(codes);
        if !report.deleted.is_empty() {
            state.dashboard.invalidate();
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::station::StationState;
    use crate::domain::DispositionStatus;
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock::at(Utc.with_ymd_and_hms(2026, 8, 4, 9, 30, 0).unwrap())
    }

    fn state_with_manifest(codes: &[&str]) -> StationState {
        let mut state = StationState::new(clock().today());
        state.manifest.import(codes.iter().copied());
        state
    }

    #[test]
    fn first_scan_accepts_and_second_reports_duplicate() {
        let clock = clock();
        let mut state = state_with_manifest(&["A1"]);

        let first = ReconService::scan(&mut state, "A1".into(), None, &clock);
        assert!(first.is_accepted());

        let second = ReconService::scan(&mut state, "A1".into(), None, &clock);
        match second {
            ScanOutcome::AlreadyScanned(record) => assert_eq!(record.code, "A1"),
            other => panic!("expected AlreadyScanned, got {other:?}"),
        }
        assert_eq!(state.scans.len(), 1);
    }

    #[test]
    fn unknown_codes_are_reported_but_never_recorded() {
        let clock = clock();
        let mut state = state_with_manifest(&["A1"]);

        let outcome = ReconService::scan(&mut state, "Z9".into(), None, &clock);
        assert_eq!(
            outcome,
            ScanOutcome::NotExpected {
                code: "Z9".to_string()
            }
        );
        assert!(state.scans.is_empty());
    }

    #[test]
    fn armed_status_is_applied_to_accepted_scans() {
        let clock = clock();
        let mut state = state_with_manifest(&["A1"]);

        let outcome =
            ReconService::scan(&mut state, "A1".into(), Some(DispositionStatus::Failed), &clock);
        match outcome {
            ScanOutcome::Accepted(record) => {
                assert_eq!(record.status, Some(DispositionStatus::Failed));
            }
            other => panic!("expected Accepted, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_scan_wins_over_manifest_absence() {
        let clock = clock();
        let mut state = state_with_manifest(&["A1"]);
        ReconService::scan(&mut state, "A1".into(), None, &clock);
        state.manifest.remove("A1");

        let outcome = ReconService::scan(&mut state, "A1".into(), None, &clock);
        assert!(matches!(outcome, ScanOutcome::AlreadyScanned(_)));
    }

    #[test]
    fn delete_frees_the_code_for_rescan() {
        let clock = clock();
        let mut state = state_with_manifest(&["A1"]);
        ReconService::scan(&mut state, "A1".into(), None, &clock);

        ReconService::delete(&mut state, "A1").expect("record exists");
        let outcome = ReconService::scan(&mut state, "A1".into(), None, &clock);
        assert!(outcome.is_accepted());
    }

    #[test]
    fn delete_missing_record_is_not_found() {
        let mut state = state_with_manifest(&["A1"]);
        let err = ReconService::delete(&mut state, "A1").expect_err("nothing scanned yet");
        assert!(matches!(err, ServiceError::NotFound(_)));
    }
}
