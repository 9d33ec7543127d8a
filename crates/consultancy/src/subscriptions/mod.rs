//! Newsletter subscriptions.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

pub use domain::{Subscription, SubscriptionForm, UnsubscribeForm};
pub use repository::{MemorySubscriptionRepository, SubscriptionRepository};
pub use router::subscription_router;
pub use service::{SubscribeOutcome, SubscriptionService};

use crate::storage::RepositoryError;
use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum SubscriptionError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("{0} is already subscribed")]
    AlreadySubscribed(String),
    #[error("{0} is not subscribed")]
    NotSubscribed(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
