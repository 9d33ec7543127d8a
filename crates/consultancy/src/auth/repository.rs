use super::domain::AdminAccount;
use crate::storage::{MemoryTable, RepositoryError};

pub trait AdminRepository: Send + Sync {
    fn insert(&self, account: AdminAccount) -> Result<AdminAccount, RepositoryError>;
    /// Case-insensitive lookup.
    fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, RepositoryError>;
    fn fetch(&self, id: &str) -> Result<Option<AdminAccount>, RepositoryError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryAdminRepository {
    accounts: MemoryTable<AdminAccount>,
}

impl AdminRepository for MemoryAdminRepository {
    fn insert(&self, account: AdminAccount) -> Result<AdminAccount, RepositoryError> {
        if self.find_by_email(&account.email)?.is_some() {
            return Err(RepositoryError::Conflict(account.email));
        }
        self.accounts.insert(account)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>, RepositoryError> {
        self.accounts
            .find(|account| account.email.eq_ignore_ascii_case(email.trim()))
    }

    fn fetch(&self, id: &str) -> Result<Option<AdminAccount>, RepositoryError> {
        self.accounts.get(id)
    }
}
