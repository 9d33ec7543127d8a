use async_trait::async_trait;
use serde::Serialize;

use super::transport::{EmailMessage, EmailTransport, TransportError};

const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

/// SendGrid v3 mail-send client.
#[derive(Clone)]
pub struct SendGridTransport {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for SendGridTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SendGridTransport")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl SendGridTransport {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, SENDGRID_SEND_URL)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MailSendRequest<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    value: &'a str,
}

fn request_body(message: &EmailMessage) -> MailSendRequest<'_> {
    MailSendRequest {
        personalizations: [Personalization {
            to: [Address { email: &message.to }],
        }],
        from: Address {
            email: &message.from,
        },
        subject: &message.subject,
        content: [Content {
            kind: "text/html",
            value: &message.html,
        }],
    }
}

#[async_trait]
impl EmailTransport for SendGridTransport {
    fn name(&self) -> &'static str {
        "sendgrid"
    }

    async fn send(&self, message: &EmailMessage) -> Result<(), TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body(message))
            .send()
            .await
            .map_err(|err| TransportError::Unavailable(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(TransportError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
