pub mod carrier;
pub mod dashboard;
pub mod manifest;
pub mod scan;
pub mod status;
pub mod system;

use crate::cli::io;
use crate::cli::registry::CommandRegistry;
use crate::domain::ScanRecord;

pub(crate) fn register_all(registry: &mut CommandRegistry) {
    for entry in system::definitions() {
        registry.register(entry);
    }
    for entry in manifest::definitions() {
        registry.register(entry);
    }
    for entry in scan::definitions() {
        registry.register(entry);
    }
    for entry in status::definitions() {
        registry.register(entry);
    }
    for entry in carrier::definitions() {
        registry.register(entry);
    }
    for entry in dashboard::definitions() {
        registry.register(entry);
    }
}

/// Renders scan records as aligned rows: code, time, disposition, carrier.
pub(crate) fn print_records(records: &[ScanRecord]) {
    if records.is_empty() {
        io::print_warning("No scan records to show.");
        return;
    }
    for record in records {
        io::print_info(format!(
            "  {:<24} {:<20} {:<10} {}",
            record.code,
            record.timestamp.format("%Y-%m-%d %H:%M:%S"),
            record
                .status
                .map(|status| status.label())
                .unwrap_or("none"),
            record.carrier.as_deref().unwrap_or("-"),
        ));
    }
    io::print_info(format!("Total: {}", records.len()));
}
