use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use station_core::core::{FixedClock, Station};

fn manifest_codes(count: usize) -> Vec<String> {
    (0..count).map(|idx| format!("BR{:08}", idx)).collect()
}

fn build_station(count: usize) -> Station {
    let clock = FixedClock::at(Utc.with_ymd_and_hms(2026, 8, 4, 8, 0, 0).unwrap());
    let station = Station::with_clock(vec!["JADLOG".into()], Box::new(clock));
    station.import_codes(manifest_codes(count), false);
    station
}

fn bench_scan_ingest(c: &mut Criterion) {
    c.bench_function("scan_admit_1k", |b| {
        b.iter_batched(
            || (build_station(1_000), manifest_codes(1_000)),
            |(station, codes)| {
                for code in &codes {
                    black_box(station.scan(code, None).expect("scan"));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_dashboard_refresh(c: &mut Criterion) {
    let station = build_station(5_000);
    for code in manifest_codes(5_000) {
        station.scan(&code, None).expect("scan");
    }
    station
        .assign_carrier_to_all_unset("JADLOG")
        .expect("carrier assignment");

    c.bench_function("dashboard_refresh_5k", |b| {
        b.iter(|| black_box(station.refresh_dashboard()))
    });
}

criterion_group!(benches, bench_scan_ingest, bench_dashboard_refresh);
criterion_main!(benches);
