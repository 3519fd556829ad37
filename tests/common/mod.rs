// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use loan_ledger::application::LoanService;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a test service with an empty ledger
pub fn test_service() -> LoanService {
    LoanService::in_memory()
}

/// Helper to write a script file into a fresh temporary directory
pub fn write_script(name: &str, contents: &str) -> Result<(PathBuf, TempDir)> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join(name);
    let mut file = std::fs::File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok((path, temp_dir))
}

/// Test fixture: standard borrowers
pub struct StandardLoans;

impl StandardLoans {
    /// Issue 1000 to user-1 and accrue one day of interest
    pub fn one_day_accrued(service: &mut LoanService) -> Result<()> {
        service.issue_loan("user-1", 1000)?;
        service.accrue_interest("user-1", 144)?;
        Ok(())
    }

    /// Issue loans to several users at once
    pub fn issue_many(service: &mut LoanService, loans: &[(&str, i64)]) -> Result<()> {
        for (user, amount) in loans {
            service.issue_loan(user, *amount)?;
        }
        Ok(())
    }
}
