pub mod dashboard;
pub mod scan;

pub use dashboard::{DailyBaseline, DashboardCache, DashboardSnapshot, SnapshotSource};
pub use scan::{normalize_code, DispositionStatus, ScanOutcome, ScanRecord};
