//! Outbound email: template rendering, the transport seam, and the single
//! fire-and-forget dispatcher every workflow sends through.

pub mod dispatcher;
pub mod sendgrid;
pub mod templates;
pub mod transport;

pub use dispatcher::{DispatchReport, DispatchSettings, NotificationDispatcher};
pub use sendgrid::SendGridTransport;
pub use templates::LeadTemplate;
pub use transport::{
    EmailMessage, EmailTransport, LogTransport, RecordingTransport, TransportError,
};
