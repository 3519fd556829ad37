use log::{debug, info, warn};

use crate::domain::{calculate_interest, Amount, BlockHeight, Loan, UserId};
use crate::storage::LoanRepository;

use super::LedgerError;

/// Application service providing the loan ledger operations.
/// This is the primary interface for any client (CLI, scripts, tests).
#[derive(Debug, Default)]
pub struct LoanService {
    repo: LoanRepository,
}

/// A stored loan together with its holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoanEntry {
    pub user: UserId,
    pub loan: Loan,
}

impl LoanService {
    /// Create a new loan service over the given repository.
    pub fn new(repo: LoanRepository) -> Self {
        Self { repo }
    }

    /// Create a service with an empty ledger.
    pub fn in_memory() -> Self {
        Self::new(LoanRepository::new())
    }

    // ========================
    // Loan operations
    // ========================

    /// Issue a loan of `amount` to `user`.
    /// A user may hold only one loan at a time.
    pub fn issue_loan(&mut self, user: &str, amount: Amount) -> Result<(), LedgerError> {
        if self.repo.contains(user) {
            warn!("rejected loan issue for {}: loan already exists", user);
            return Err(LedgerError::LoanAlreadyExists(user.to_string()));
        }

        self.repo.save_loan(user, Loan::new(amount));
        debug!("issued loan of {} to {}", amount, user);
        Ok(())
    }

    /// Fold the interest owed since the last update into the stored loan and
    /// move its accrual mark to `current_block_height`.
    pub fn accrue_interest(
        &mut self,
        user: &str,
        current_block_height: BlockHeight,
    ) -> Result<(), LedgerError> {
        let mut loan = self.get_loan(user).inspect_err(|_| {
            warn!("rejected interest accrual for {}: no loan exists", user);
        })?;

        let elapsed = loan.elapsed_since_update(current_block_height);
        let interest = calculate_interest(loan.principal, elapsed);
        loan.apply_interest(interest, current_block_height);
        self.repo.save_loan(user, loan);

        debug!(
            "accrued {} interest for {} over {} blocks (total accrued {})",
            interest, user, elapsed, loan.interest_accrued
        );
        Ok(())
    }

    /// Balance owed at `current_block_height`: principal, stored interest,
    /// and interest due since the last update. Nothing is written.
    pub fn get_total_loan_balance(
        &self,
        user: &str,
        current_block_height: BlockHeight,
    ) -> Result<Amount, LedgerError> {
        let loan = self.get_loan(user).inspect_err(|_| {
            warn!("rejected balance query for {}: no loan exists", user);
        })?;
        let additional = calculate_interest(
            loan.principal,
            loan.elapsed_since_update(current_block_height),
        );
        Ok(loan.total_with(additional))
    }

    /// Get the stored loan for `user`.
    pub fn get_loan(&self, user: &str) -> Result<Loan, LedgerError> {
        self.repo
            .get_loan(user)
            .ok_or_else(|| LedgerError::LoanNotFound(user.to_string()))
    }

    /// List all loans, ordered by user.
    pub fn list_loans(&self) -> Vec<LoanEntry> {
        self.repo
            .list_loans()
            .into_iter()
            .map(|(user, loan)| LoanEntry { user, loan })
            .collect()
    }

    // ========================
    // Administration
    // ========================

    /// Clear every loan from the ledger.
    pub fn reset(&mut self) {
        let dropped = self.repo.len();
        self.repo.clear();
        info!("ledger reset ({} loans dropped)", dropped);
    }
}
