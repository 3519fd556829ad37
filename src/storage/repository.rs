use std::collections::HashMap;

use crate::domain::{Loan, UserId};

/// In-memory store of loans, at most one per user.
///
/// The repository is owned by whoever constructs it; there is no shared or
/// global instance. Contents live only as long as the value.
#[derive(Debug, Default)]
pub struct LoanRepository {
    loans: HashMap<UserId, Loan>,
}

impl LoanRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the loan held by `user`, if any.
    pub fn get_loan(&self, user: &str) -> Option<Loan> {
        self.loans.get(user).copied()
    }

    pub fn contains(&self, user: &str) -> bool {
        self.loans.contains_key(user)
    }

    /// Insert or overwrite the loan for `user`.
    pub fn save_loan(&mut self, user: &str, loan: Loan) {
        self.loans.insert(user.to_string(), loan);
    }

    /// All loans, ordered by user id.
    pub fn list_loans(&self) -> Vec<(UserId, Loan)> {
        let mut loans: Vec<(UserId, Loan)> = self
            .loans
            .iter()
            .map(|(user, loan)| (user.clone(), *loan))
            .collect();
        loans.sort_by(|a, b| a.0.cmp(&b.0));
        loans
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    /// Drop every loan.
    pub fn clear(&mut self) {
        self.loans.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_get() {
        let mut repo = LoanRepository::new();
        assert!(repo.get_loan("user-1").is_none());

        repo.save_loan("user-1", Loan::new(1000));

        assert!(repo.contains("user-1"));
        assert_eq!(repo.get_loan("user-1"), Some(Loan::new(1000)));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_save_overwrites() {
        let mut repo = LoanRepository::new();
        repo.save_loan("user-1", Loan::new(1000));

        let mut updated = Loan::new(1000);
        updated.apply_interest(2, 144);
        repo.save_loan("user-1", updated);

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get_loan("user-1").map(|l| l.interest_accrued), Some(2));
    }

    #[test]
    fn test_list_is_sorted_by_user() {
        let mut repo = LoanRepository::new();
        repo.save_loan("carol", Loan::new(3));
        repo.save_loan("alice", Loan::new(1));
        repo.save_loan("bob", Loan::new(2));

        let users: Vec<String> = repo.list_loans().into_iter().map(|(u, _)| u).collect();
        assert_eq!(users, vec!["alice", "bob", "carol"]);
    }

    #[test]
    fn test_clear() {
        let mut repo = LoanRepository::new();
        repo.save_loan("user-1", Loan::new(1000));
        repo.save_loan("user-2", Loan::new(500));

        repo.clear();

        assert!(repo.is_empty());
        assert!(!repo.contains("user-1"));
    }
}
