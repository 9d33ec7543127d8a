use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::templates::{self, LeadTemplate};
use super::transport::{EmailMessage, EmailTransport};
use crate::subscriptions::Subscription;
use crate::workflows::leads::{DemoBooking, LeadRecord};

/// Addresses and links stamped into outgoing mail.
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    pub from_address: String,
    /// Recipient of internal alerts; alerts are skipped when unset.
    pub admin_address: Option<String>,
    pub client_url: String,
}

/// Outcome of one batch, returned by the spawned task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub delivered: usize,
    pub failed: usize,
}

/// Single entry point for all outbound email. Every method renders its
/// messages, spawns the sends, and returns immediately; transport failures
/// are logged and never reach the caller.
#[derive(Clone)]
pub struct NotificationDispatcher {
    transport: Arc<dyn EmailTransport>,
    settings: DispatchSettings,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher")
            .field("transport", &self.transport.name())
            .field("settings", &self.settings)
            .finish()
    }
}

impl NotificationDispatcher {
    pub fn new(transport: Arc<dyn EmailTransport>, settings: DispatchSettings) -> Self {
        Self {
            transport,
            settings,
        }
    }

    /// Category template to the submitter plus one admin alert.
    pub fn lead_received(&self, lead: &LeadRecord) -> JoinHandle<DispatchReport> {
        let template = LeadTemplate::for_category(lead.lead_category);
        let mut messages = vec![self.message(
            &lead.email,
            template.subject().to_string(),
            templates::lead_submitter_body(lead, template, &self.settings.client_url),
            template.id(),
        )];

        if let Some(admin) = &self.settings.admin_address {
            messages.push(self.message(
                admin,
                templates::lead_admin_subject(lead),
                templates::lead_admin_body(lead),
                "admin-lead-alert",
            ));
        }

        self.spawn_batch("lead_received", messages)
    }

    pub fn subscriber_joined(&self, subscription: &Subscription) -> JoinHandle<DispatchReport> {
        let mut messages = vec![self.message(
            &subscription.email,
            "Welcome to our newsletter".to_string(),
            templates::welcome_body(subscription, &self.settings.client_url),
            "subscription-welcome",
        )];

        if let Some(admin) = &self.settings.admin_address {
            messages.push(self.message(
                admin,
                format!("New subscriber: {}", subscription.email),
                templates::subscription_admin_body(subscription),
                "admin-subscription-alert",
            ));
        }

        self.spawn_batch("subscriber_joined", messages)
    }

    pub fn demo_booked(&self, booking: &DemoBooking) -> JoinHandle<DispatchReport> {
        let mut messages = vec![self.message(
            &booking.email,
            "Your demo request is confirmed".to_string(),
            templates::demo_confirmation_body(booking),
            "demo-confirmation",
        )];

        if let Some(admin) = &self.settings.admin_address {
            messages.push(self.message(
                admin,
                format!("New demo booking: {}", booking.name),
                templates::demo_admin_body(booking),
                "admin-demo-alert",
            ));
        }

        self.spawn_batch("demo_booked", messages)
    }

    fn message(&self, to: &str, subject: String, html: String, template: &str) -> EmailMessage {
        EmailMessage {
            to: to.to_string(),
            from: self.settings.from_address.clone(),
            subject,
            html,
            template: template.to_string(),
        }
    }

    fn spawn_batch(
        &self,
        event: &'static str,
        messages: Vec<EmailMessage>,
    ) -> JoinHandle<DispatchReport> {
        let transport = Arc::clone(&self.transport);

        tokio::spawn(async move {
            let mut report = DispatchReport::default();
            for message in &messages {
                report.attempted += 1;
                match transport.send(message).await {
                    Ok(()) => {
                        report.delivered += 1;
                        debug!(event, template = %message.template, transport = transport.name(), "email sent");
                    }
                    Err(err) => {
                        report.failed += 1;
                        warn!(
                            event,
                            template = %message.template,
                            transport = transport.name(),
                            error = %err,
                            "email delivery failed"
                        );
                    }
                }
            }
            report
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::RecordingTransport;
    use chrono::Utc;

    fn subscription() -> Subscription {
        Subscription {
            id: "sub-1".to_string(),
            email: "reader@example.com".to_string(),
            name: Some("Reader".to_string()),
            interests: vec!["ai".to_string()],
            active: true,
            subscribed_at: Utc::now(),
            unsubscribed_at: None,
        }
    }

    fn settings(admin: Option<&str>) -> DispatchSettings {
        DispatchSettings {
            from_address: "hello@consultancy.dev".to_string(),
            admin_address: admin.map(str::to_string),
            client_url: "http://localhost:3000".to_string(),
        }
    }

    #[tokio::test]
    async fn admin_alert_is_skipped_without_admin_address() {
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = NotificationDispatcher::new(transport.clone(), settings(None));

        let report = dispatcher
            .subscriber_joined(&subscription())
            .await
            .expect("task completes");

        assert_eq!(report.attempted, 1);
        assert_eq!(transport.templates(), vec!["subscription-welcome"]);
    }

    #[tokio::test]
    async fn failures_are_counted_not_raised() {
        let transport = Arc::new(RecordingTransport::failing());
        let dispatcher =
            NotificationDispatcher::new(transport.clone(), settings(Some("ops@example.com")));

        let report = dispatcher
            .subscriber_joined(&subscription())
            .await
            .expect("task completes");

        assert_eq!(
            report,
            DispatchReport {
                attempted: 2,
                delivered: 0,
                failed: 2,
            }
        );
        assert_eq!(transport.sent()[1].to, "ops@example.com");
    }
}
