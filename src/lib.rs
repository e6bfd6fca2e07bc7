#![doc(test(attr(deny(warnings))))]

//! Station Core implements the scan-reconciliation and status-aggregation
//! engine behind a warehouse counting station: matching scanned tracking
//! codes against an expected manifest, classifying dispositions, and
//! deriving per-carrier and per-day dashboard counters.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Station Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
