use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::LoanService;
use crate::domain::{Amount, BlockHeight, UserId};

/// One loan as it appears in a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLoan {
    pub user: UserId,
    pub principal: Amount,
    pub interest_accrued: Amount,
    pub last_updated: BlockHeight,
}

/// Ledger snapshot for JSON export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub version: String,
    pub loans: Vec<SnapshotLoan>,
}

/// Output encodings for snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    Csv,
}

impl SnapshotFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(SnapshotFormat::Json),
            "csv" => Some(SnapshotFormat::Csv),
            _ => None,
        }
    }
}

/// Exporter for writing the ledger state out
pub struct Exporter<'a> {
    service: &'a LoanService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a LoanService) -> Self {
        Self { service }
    }

    /// Build a snapshot of every loan, ordered by user.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let loans = self
            .service
            .list_loans()
            .into_iter()
            .map(|entry| SnapshotLoan {
                user: entry.user,
                principal: entry.loan.principal,
                interest_accrued: entry.loan.interest_accrued,
                last_updated: entry.loan.last_updated,
            })
            .collect();

        LedgerSnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            loans,
        }
    }

    /// Write the snapshot in the requested format, returning the loan count.
    pub fn export<W: Write>(&self, writer: W, format: SnapshotFormat) -> Result<usize> {
        match format {
            SnapshotFormat::Json => Ok(self.export_json(writer)?.loans.len()),
            SnapshotFormat::Csv => self.export_csv(writer),
        }
    }

    /// Export loans to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let snapshot = self.snapshot();
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["user", "principal", "interest_accrued", "last_updated"])?;

        let mut count = 0;
        for loan in &snapshot.loans {
            csv_writer.write_record([
                loan.user.clone(),
                loan.principal.to_string(),
                loan.interest_accrued.to_string(),
                loan.last_updated.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the ledger as a JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<LedgerSnapshot> {
        let snapshot = self.snapshot();

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_service() -> LoanService {
        let mut service = LoanService::in_memory();
        service.issue_loan("user-b", 500).unwrap();
        service.issue_loan("user-a", 1000).unwrap();
        service.accrue_interest("user-a", 144).unwrap();
        service
    }

    #[test]
    fn test_export_csv() {
        let service = sample_service();
        let mut out = Vec::new();

        let count = Exporter::new(&service).export_csv(&mut out).unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "user,principal,interest_accrued,last_updated\nuser-a,1000,2,144\nuser-b,500,0,0\n"
        );
    }

    #[test]
    fn test_export_json() {
        let service = sample_service();
        let mut out = Vec::new();

        Exporter::new(&service).export_json(&mut out).unwrap();

        let parsed: LedgerSnapshot = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(parsed.loans.len(), 2);
        assert_eq!(parsed.loans[0].user, "user-a");
        assert_eq!(parsed.loans[0].interest_accrued, 2);
    }

    #[test]
    fn test_export_empty_ledger() {
        let service = LoanService::in_memory();
        let mut out = Vec::new();

        let count = Exporter::new(&service)
            .export(&mut out, SnapshotFormat::Csv)
            .unwrap();

        assert_eq!(count, 0);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "user,principal,interest_accrued,last_updated\n"
        );
    }
}
