use std::sync::Mutex;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Rendered email ready for a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub from: String,
    pub subject: String,
    pub html: String,
    /// Template identifier, for logs and assertions.
    pub template: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("email transport unavailable: {0}")]
    Unavailable(String),
    #[error("email provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Delivery seam; implementations attempt exactly one send per call.
#[async_trait]
pub trait EmailTransport: Send + Sync {
    fn name(&self) -> &'static str;

    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError>;
}

/// Used when no provider key is configured: the mail is only logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTransport;

#[async_trait]
impl EmailTransport for LogTransport {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            template = %message.template,
            "email transport not configured; message logged only"
        );
        Ok(())
    }
}

/// Keeps every message in memory instead of sending it. Optionally fails
/// each send after recording the attempt.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<EmailMessage>>,
    failing: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }

    pub fn templates(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .map(|message| message.template)
            .collect()
    }
}

#[async_trait]
impl EmailTransport for RecordingTransport {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(message.clone());
        }
        if self.failing {
            return Err(TransportError::Unavailable(
                "recording transport set to fail".to_string(),
            ));
        }
        Ok(())
    }
}
