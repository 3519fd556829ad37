// Installs a process-wide logger, so this file holds a single test.

use log::{Level, LevelFilter, Log, Metadata, Record};
use loan_ledger::application::LoanService;
use std::sync::Mutex;

struct CaptureLogger {
    warnings: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            if let Ok(mut warnings) = self.warnings.lock() {
                warnings.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    warnings: Mutex::new(Vec::new()),
};

fn take_warnings() -> Vec<String> {
    std::mem::take(&mut *LOGGER.warnings.lock().unwrap())
}

#[test]
fn test_only_rejected_operations_warn() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let mut service = LoanService::in_memory();

    // Plain lookups stay quiet
    assert!(service.get_loan("user-2").is_err());
    assert!(take_warnings().is_empty());

    assert!(service.accrue_interest("user-2", 144).is_err());
    assert_eq!(
        take_warnings(),
        vec!["rejected interest accrual for user-2: no loan exists"]
    );

    assert!(service.get_total_loan_balance("user-2", 144).is_err());
    assert_eq!(
        take_warnings(),
        vec!["rejected balance query for user-2: no loan exists"]
    );

    service.issue_loan("user-1", 1000).unwrap();
    assert!(service.issue_loan("user-1", 500).is_err());
    assert_eq!(
        take_warnings(),
        vec!["rejected loan issue for user-1: loan already exists"]
    );
}
