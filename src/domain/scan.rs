use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Disposition applied to a scanned item after it has been counted.
///
/// A record with no disposition (`Option::None`) has been scanned but not
/// yet classified.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DispositionStatus {
    Collected,
    Failed,
}

impl DispositionStatus {
    /// Parses an operator-entered status token, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "collected" => Some(Self::Collected),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Collected => "collected",
            Self::Failed => "failed",
        }
    }
}

/// One accepted scan event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScanRecord {
    pub id: Uuid,
    /// Monotonic insertion sequence; never reused, even across ledger clears.
    pub seq: u64,
    /// Normalized tracking code. Unique within the ledger.
    pub code: String,
    /// Event time. Immutable once created.
    pub timestamp: DateTime<Utc>,
    /// Station-local calendar day the scan happened on.
    pub scan_date: NaiveDate,
    /// Whether the code was on the manifest when the scan was accepted.
    pub present_in_manifest: bool,
    pub status: Option<DispositionStatus>,
    pub carrier: Option<String>,
}

impl ScanRecord {
    pub(crate) fn new(
        seq: u64,
        code: String,
        timestamp: DateTime<Utc>,
        scan_date: NaiveDate,
        status: Option<DispositionStatus>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            seq,
            code,
            timestamp,
            scan_date,
            present_in_manifest: true,
            status,
            carrier: None,
        }
    }
}

/// Result of submitting one code to the reconciliation engine.
///
/// `AlreadyScanned` and `NotExpected` are expected business outcomes, not
/// errors: duplicate scans signal operator error and must stay
/// distinguishable from a first-time success.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Accepted(ScanRecord),
    AlreadyScanned(ScanRecord),
    NotExpected { code: String },
}

impl ScanOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    /// Human-readable message relayed verbatim by the transport layer.
    pub fn message(&self) -> String {
        match self {
            Self::Accepted(record) => {
                format!("Item {} reconciled against the manifest.", record.code)
            }
            Self::AlreadyScanned(record) => format!(
                "Item {} was already scanned at {}.",
                record.code,
                record.timestamp.format("%Y-%m-%d %H:%M:%S")
            ),
            Self::NotExpected { code } => {
                format!("Item {} is not on the expected manifest.", code)
            }
        }
    }
}

/// Normalizes an operator-entered tracking code: trim plus uppercase.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_uppercases() {
        assert_eq!(normalize_code("  br123xy "), "BR123XY");
        assert_eq!(normalize_code("\t\n"), "");
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(
            DispositionStatus::parse("Collected"),
            Some(DispositionStatus::Collected)
        );
        assert_eq!(
            DispositionStatus::parse(" FAILED "),
            Some(DispositionStatus::Failed)
        );
        assert_eq!(DispositionStatus::parse("pending"), None);
    }

    #[test]
    fn outcome_messages_mention_the_code() {
        let outcome = ScanOutcome::NotExpected {
            code: "Z9".to_string(),
        };
        assert!(outcome.message().contains("Z9"));
        assert!(!outcome.is_accepted());
    }
}
