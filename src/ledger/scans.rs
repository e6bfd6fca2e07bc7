use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DispositionStatus, ScanRecord};

/// Outcome of a batch deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteReport {
    pub deleted: Vec<String>,
    pub not_found: Vec<String>,
}

/// Append-ordered store of accepted scans. Enforces at most one record per
/// code; the insertion sequence is monotonic and survives clears so it can
/// serve as a watermark.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanLedger {
    records: Vec<ScanRecord>,
    next_seq: u64,
}

impl ScanLedger {
    pub fn get(&self, code: &str) -> Option<&ScanRecord> {
        self.records.iter().find(|record| record.code == code)
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut ScanRecord> {
        self.records.iter_mut().find(|record| record.code == code)
    }

    /// Inserts a record for `code`, or hands back a copy of the existing one
    /// when the code was already scanned.
    pub fn admit(
        &mut self,
        code: String,
        timestamp: DateTime<Utc>,
        scan_date: NaiveDate,
        status: Option<DispositionStatus>,
    ) -> Result<ScanRecord, ScanRecord> {
        if let Some(existing) = self.get(&code) {
            return Err(existing.clone());
        }
        let record = ScanRecord::new(self.next_seq, code, timestamp, scan_date, status);
        self.next_seq += 1;
        self.records.push(record.clone());
        Ok(record)
    }

    /// Removes the record for `code`, freeing it to be scanned again.
    pub fn remove(&mut self, code: &str) -> Option<ScanRecord> {
        let index = self.records.iter().position(|record| record.code == code)?;
        Some(self.records.remove(index))
    }

    pub fn remove_many(&mut self, codes: &[String]) -> DeleteReport {
        let mut report = DeleteReport {
            deleted: Vec::new(),
            not_found: Vec::new(),
        };
        for code in codes {
            match self.remove(code) {
                Some(record) => report.deleted.push(record.code),
                None => report.not_found.push(code.clone()),
            }
        }
        report
    }

    /// Clears all records. The sequence counter keeps running.
    pub fn clear(&mut self) -> usize {
        let removed = self.records.len();
        self.records.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ScanRecord] {
        &self.records
    }

    /// Next sequence number to be assigned; usable as an exclusive
    /// watermark over everything currently in the ledger.
    pub fn high_water_seq(&self) -> u64 {
        self.next_seq
    }

    /// All records, most recent first. Timestamp ties resolve to the later
    /// insertion, keeping re-fetches deterministic.
    pub fn sorted_recent_first(&self) -> Vec<ScanRecord> {
        let mut records = self.records.clone();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.seq.cmp(&a.seq)));
        records
    }

    /// Records with the given disposition (`None` = no disposition), most
    /// recent first.
    pub fn by_status(&self, status: Option<DispositionStatus>) -> Vec<ScanRecord> {
        let mut records: Vec<ScanRecord> = self
            .records
            .iter()
            .filter(|record| record.status == status)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.seq.cmp(&a.seq)));
        records
    }

    /// Sets `carrier` on every record currently missing one. Idempotent.
    pub fn assign_carrier_to_unset(&mut self, carrier: &str) -> usize {
        let mut updated = 0;
        for record in &mut self.records {
            if record.carrier.is_none() {
                record.carrier = Some(carrier.to_string());
                updated += 1;
            }
        }
        updated
    }
}
