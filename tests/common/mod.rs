use std::sync::Arc;

use chrono::{TimeZone, Utc};
use station_core::core::{FixedClock, Station};

/// Display set used across the integration suites.
pub fn display_carriers() -> Vec<String> {
    ["JADLOG", "LOGAN", "CORREIOS"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Station pinned to a deterministic clock; the handle allows tests to move
/// time forward.
pub fn test_station() -> (Arc<FixedClock>, Station) {
    let clock = Arc::new(FixedClock::at(
        Utc.with_ymd_and_hms(2026, 8, 4, 9, 30, 0).unwrap(),
    ));
    let station = Station::with_clock(display_carriers(), Box::new(Arc::clone(&clock)));
    (clock, station)
}
