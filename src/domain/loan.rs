use serde::{Deserialize, Serialize};

/// Opaque identifier of the borrower holding a loan.
pub type UserId = String;

/// Loan amounts are plain integers. There is no currency or minor unit.
pub type Amount = i64;

/// Block height standing in for elapsed time.
/// Signed so that `current - last_updated` never wraps when a caller
/// passes a height lower than the one previously recorded.
pub type BlockHeight = i64;

/// One user's outstanding debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loan {
    pub principal: Amount,
    pub interest_accrued: Amount,
    pub last_updated: BlockHeight,
}

impl Loan {
    /// A freshly issued loan: nothing accrued, never updated.
    pub fn new(principal: Amount) -> Self {
        Self {
            principal,
            interest_accrued: 0,
            last_updated: 0,
        }
    }

    /// Blocks elapsed between the last accrual and `current`.
    /// Saturates at the `i64` bounds; any saturated span is far outside the
    /// interest schedule and accrues nothing.
    pub fn elapsed_since_update(&self, current: BlockHeight) -> BlockHeight {
        current.saturating_sub(self.last_updated)
    }

    /// Principal plus stored interest plus `additional` interest that has
    /// not been persisted yet. Clamped to the `i64` range.
    pub fn total_with(&self, additional: Amount) -> Amount {
        self.principal
            .saturating_add(self.interest_accrued)
            .saturating_add(additional)
    }

    /// Fold `interest` into the stored balance and move the accrual mark.
    pub fn apply_interest(&mut self, interest: Amount, current: BlockHeight) {
        self.interest_accrued = self.interest_accrued.saturating_add(interest);
        self.last_updated = current;
    }
}
