mod common;

use chrono::{TimeZone, Utc};
use common::{display_carriers, test_station};
use station_core::core::{FixedClock, Station};
use station_core::domain::DispositionStatus;
use station_core::storage::{JsonStorage, StorageBackend};
use tempfile::tempdir;

fn reload_clock() -> Box<FixedClock> {
    Box::new(FixedClock::at(
        Utc.with_ymd_and_hms(2026, 8, 4, 17, 0, 0).unwrap(),
    ))
}

#[test]
fn snapshot_roundtrip_restores_ledger_and_daily_state() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let (_clock, station) = test_station();
    station.import_codes(["A1", "A2", "A3"], false);
    station.scan("A1", Some(DispositionStatus::Collected)).unwrap();
    station.scan("A2", None).unwrap();
    station.assign_carrier("A1", "JADLOG").unwrap();
    station.reset_daily_summary();
    station.scan("A3", None).unwrap();

    let expected = station.refresh_dashboard();
    let path = station.save_to(&storage).unwrap();
    assert_eq!(path, storage.snapshot_path());

    let restored = Station::load_from(&storage, display_carriers(), reload_clock()).unwrap();
    assert_eq!(restored.list_scanned().len(), 3);
    assert_eq!(restored.list_missing(), Vec::<String>::new());

    let snapshot = restored.dashboard();
    // Only the post-reset scan counts toward today, exactly as before saving.
    assert_eq!(snapshot.total_today, expected.total_today);
    assert_eq!(snapshot.total_today, 1);
    assert_eq!(snapshot.carriers["JADLOG"], 1);

    let record = restored
        .list_by_status(Some(DispositionStatus::Collected))
        .pop()
        .expect("collected record survives");
    assert_eq!(record.code, "A1");
    assert_eq!(record.carrier.as_deref(), Some("JADLOG"));
}

#[test]
fn load_without_snapshot_starts_fresh() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let station = Station::load_from(&storage, display_carriers(), reload_clock()).unwrap();
    assert!(station.list_scanned().is_empty());
    assert_eq!(station.stats().expected, 0);
}

#[test]
fn freed_codes_stay_freed_across_restarts() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let (_clock, station) = test_station();
    station.import_codes(["A1"], false);
    station.scan("A1", None).unwrap();
    station.delete_scan("A1").unwrap();
    station.save_to(&storage).unwrap();

    let restored = Station::load_from(&storage, display_carriers(), reload_clock()).unwrap();
    assert!(restored.scan("A1", None).unwrap().is_accepted());
}
