pub mod manifest;
pub mod scans;

pub use manifest::{ImportReport, ManifestStore};
pub use scans::{DeleteReport, ScanLedger};
