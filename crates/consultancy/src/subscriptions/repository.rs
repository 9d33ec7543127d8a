use super::domain::Subscription;
use crate::storage::{MemoryTable, RepositoryError};

pub trait SubscriptionRepository: Send + Sync {
    fn insert(&self, subscription: Subscription) -> Result<Subscription, RepositoryError>;
    fn update(&self, subscription: Subscription) -> Result<(), RepositoryError>;
    fn find_by_email(&self, email: &str) -> Result<Option<Subscription>, RepositoryError>;
    /// Newest first.
    fn list(&self) -> Result<Vec<Subscription>, RepositoryError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemorySubscriptionRepository {
    subscriptions: MemoryTable<Subscription>,
}

impl SubscriptionRepository for MemorySubscriptionRepository {
    fn insert(&self, subscription: Subscription) -> Result<Subscription, RepositoryError> {
        if self.find_by_email(&subscription.email)?.is_some() {
            return Err(RepositoryError::Conflict(subscription.email));
        }
        self.subscriptions.insert(subscription)
    }

    fn update(&self, subscription: Subscription) -> Result<(), RepositoryError> {
        self.subscriptions.update(subscription)
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Subscription>, RepositoryError> {
        self.subscriptions
            .find(|subscription| subscription.email.eq_ignore_ascii_case(email))
    }

    fn list(&self) -> Result<Vec<Subscription>, RepositoryError> {
        let mut subscriptions = self.subscriptions.all()?;
        subscriptions.sort_by(|a, b| b.subscribed_at.cmp(&a.subscribed_at));
        Ok(subscriptions)
    }
}
