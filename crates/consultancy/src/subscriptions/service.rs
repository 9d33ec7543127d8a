use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::domain::{Subscription, SubscriptionForm, UnsubscribeForm};
use super::repository::SubscriptionRepository;
use super::SubscriptionError;
use crate::notifications::NotificationDispatcher;
use crate::validation::{self, ValidationErrors};
use crate::workflows::leads::Submitted;

const MAX_INTERESTS: usize = 10;

#[derive(Debug)]
pub enum SubscribeOutcome {
    Created(Submitted<Subscription>),
    Reactivated(Submitted<Subscription>),
}

impl SubscribeOutcome {
    pub fn subscription(&self) -> &Subscription {
        match self {
            SubscribeOutcome::Created(submitted) | SubscribeOutcome::Reactivated(submitted) => {
                &submitted.record
            }
        }
    }
}

pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository>,
    dispatcher: NotificationDispatcher,
}

impl SubscriptionService {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            repository,
            dispatcher,
        }
    }

    pub fn subscribe(&self, form: &SubscriptionForm) -> Result<SubscribeOutcome, SubscriptionError> {
        let mut errors = ValidationErrors::default();
        let email = validation::email(&mut errors, "email", form.email.as_deref());
        let name = validation::optional_text(&mut errors, "name", form.name.as_deref(), 100);
        if form.interests.len() > MAX_INTERESTS {
            errors.push(
                "interests",
                format!("at most {MAX_INTERESTS} interests may be selected"),
            );
        }
        let interests: Vec<String> = form
            .interests
            .iter()
            .map(|interest| interest.trim().to_string())
            .filter(|interest| !interest.is_empty())
            .collect();
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let now = Utc::now();
        match self.repository.find_by_email(&email)? {
            Some(existing) if existing.active => Err(SubscriptionError::AlreadySubscribed(email)),
            Some(mut existing) => {
                existing.active = true;
                existing.unsubscribed_at = None;
                existing.subscribed_at = now;
                existing.name = name.or(existing.name);
                if !interests.is_empty() {
                    existing.interests = interests;
                }
                self.repository.update(existing.clone())?;
                info!(subscription_id = %existing.id, "subscription reactivated");
                let notification = self.dispatcher.subscriber_joined(&existing);
                Ok(SubscribeOutcome::Reactivated(Submitted {
                    record: existing,
                    notification,
                }))
            }
            None => {
                let subscription = Subscription {
                    id: format!("sub-{}", Uuid::new_v4()),
                    email,
                    name,
                    interests,
                    active: true,
                    subscribed_at: now,
                    unsubscribed_at: None,
                };
                let stored = self.repository.insert(subscription)?;
                info!(subscription_id = %stored.id, "subscription created");
                let notification = self.dispatcher.subscriber_joined(&stored);
                Ok(SubscribeOutcome::Created(Submitted {
                    record: stored,
                    notification,
                }))
            }
        }
    }

    pub fn unsubscribe(&self, form: &UnsubscribeForm) -> Result<Subscription, SubscriptionError> {
        let mut errors = ValidationErrors::default();
        let email = validation::email(&mut errors, "email", form.email.as_deref());
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let mut subscription = self
            .repository
            .find_by_email(&email)?
            .filter(|subscription| subscription.active)
            .ok_or_else(|| SubscriptionError::NotSubscribed(email.clone()))?;

        subscription.active = false;
        subscription.unsubscribed_at = Some(Utc::now());
        self.repository.update(subscription.clone())?;
        info!(subscription_id = %subscription.id, "subscription cancelled");
        Ok(subscription)
    }

    pub fn list(&self) -> Result<Vec<Subscription>, SubscriptionError> {
        Ok(self.repository.list()?)
    }

    pub fn active_count(&self) -> Result<usize, SubscriptionError> {
        Ok(self
            .repository
            .list()?
            .iter()
            .filter(|subscription| subscription.active)
            .count())
    }
}
