//! HTML bodies for every outbound mail. User-supplied text is escaped.

use std::fmt::Write as _;

use crate::subscriptions::Subscription;
use crate::workflows::leads::{DemoBooking, LeadCategory, LeadRecord};

/// Submitter-facing template chosen from the lead category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadTemplate {
    HotLead,
    WarmLead,
    ColdLead,
    Default,
}

impl LeadTemplate {
    pub const fn for_category(category: LeadCategory) -> Self {
        match category {
            LeadCategory::Hot => LeadTemplate::HotLead,
            LeadCategory::Warm => LeadTemplate::WarmLead,
            LeadCategory::Cold => LeadTemplate::ColdLead,
            LeadCategory::Unfit => LeadTemplate::Default,
        }
    }

    pub const fn id(self) -> &'static str {
        match self {
            LeadTemplate::HotLead => "hot-lead",
            LeadTemplate::WarmLead => "warm-lead",
            LeadTemplate::ColdLead => "cold-lead",
            LeadTemplate::Default => "default",
        }
    }

    pub const fn subject(self) -> &'static str {
        match self {
            LeadTemplate::HotLead => "Let's schedule your priority consultation",
            LeadTemplate::WarmLead => "Thanks for reaching out: here's what happens next",
            LeadTemplate::ColdLead => "Resources to help you plan your project",
            LeadTemplate::Default => "We received your message",
        }
    }
}

pub(crate) fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn layout(heading: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><body style=\"font-family:Arial,sans-serif;color:#1f2937;\">\
<div style=\"max-width:600px;margin:0 auto;padding:24px;\">\
<h1 style=\"color:#4f46e5;font-size:22px;\">{heading}</h1>{body}\
<p style=\"margin-top:32px;font-size:12px;color:#6b7280;\">You are receiving this email because you contacted us through our website.</p>\
</div></body></html>"
    )
}

pub fn lead_submitter_body(lead: &LeadRecord, template: LeadTemplate, client_url: &str) -> String {
    let name = escape_html(&lead.name);
    let project = escape_html(lead.project_type.label());
    let mut body = format!("<p>Hi {name},</p>");

    match template {
        LeadTemplate::HotLead => {
            let _ = write!(
                body,
                "<p>Thank you for telling us about your <strong>{project}</strong> project. \
Based on your timeline and scope, a senior consultant will reach out within 24 hours.</p>\
<p>Want to move faster? <a href=\"{client_url}/book-demo\">Book a priority consultation</a> \
at a time that suits you.</p>"
            );
        }
        LeadTemplate::WarmLead => {
            let _ = write!(
                body,
                "<p>Thanks for your interest in a <strong>{project}</strong> engagement. \
Our team will review your requirements and get back to you within two business days.</p>\
<p>Meanwhile, browse <a href=\"{client_url}/case-studies\">our case studies</a> to see how \
we have delivered similar projects.</p>"
            );
        }
        LeadTemplate::ColdLead => {
            let _ = write!(
                body,
                "<p>Thanks for reaching out about your <strong>{project}</strong> idea. \
While you plan, these resources may help:</p>\
<ul><li><a href=\"{client_url}/blog\">Our engineering blog</a></li>\
<li><a href=\"{client_url}/services\">Service overview and engagement models</a></li></ul>\
<p>We will follow up when you are ready to take the next step.</p>"
            );
        }
        LeadTemplate::Default => {
            body.push_str(
                "<p>We received your message and a member of our team will get back to you.</p>",
            );
        }
    }

    body.push_str("<p>Best regards,<br/>The Team</p>");
    layout(template.subject(), &body)
}

pub fn lead_admin_subject(lead: &LeadRecord) -> String {
    let prefix = if lead.lead_category == LeadCategory::Hot {
        "[URGENT] "
    } else {
        ""
    };
    format!(
        "{prefix}New {} lead ({}/100): {}",
        lead.lead_category.label(),
        lead.lead_score,
        lead.company
    )
}

pub fn lead_admin_body(lead: &LeadRecord) -> String {
    let mut rows = String::new();
    for (label, value) in [
        ("Name", lead.name.as_str()),
        ("Email", lead.email.as_str()),
        ("Company", lead.company.as_str()),
        ("Phone", lead.phone.as_str()),
        ("Project type", lead.project_type.label()),
        ("Budget", lead.budget.label()),
        ("Timeline", lead.timeline.label()),
        ("Source", lead.source.label()),
        ("Category", lead.lead_category.label()),
    ] {
        let _ = write!(
            rows,
            "<tr><td style=\"padding:4px 12px 4px 0;\"><strong>{label}</strong></td><td>{}</td></tr>",
            escape_html(value)
        );
    }
    let _ = write!(
        rows,
        "<tr><td style=\"padding:4px 12px 4px 0;\"><strong>Score</strong></td><td>{}</td></tr>",
        lead.lead_score
    );

    let body = format!(
        "<table>{rows}</table><h3>Description</h3><p>{}</p><p>Lead id: {}</p>",
        escape_html(&lead.description),
        escape_html(&lead.id.0)
    );
    layout("New lead submitted", &body)
}

pub fn welcome_body(subscription: &Subscription, client_url: &str) -> String {
    let greeting = subscription
        .name
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "there".to_string());
    let body = format!(
        "<p>Hi {greeting},</p><p>Thanks for subscribing! You'll receive our latest articles, \
case studies, and event invitations.</p>\
<p><a href=\"{client_url}/blog\">Start with our latest posts</a>.</p>"
    );
    layout("Welcome aboard", &body)
}

pub fn subscription_admin_body(subscription: &Subscription) -> String {
    let interests = if subscription.interests.is_empty() {
        "none given".to_string()
    } else {
        escape_html(&subscription.interests.join(", "))
    };
    let body = format!(
        "<p><strong>{}</strong> subscribed.</p><p>Interests: {interests}</p>",
        escape_html(&subscription.email)
    );
    layout("New subscriber", &body)
}

pub fn demo_confirmation_body(booking: &DemoBooking) -> String {
    let when = booking
        .preferred_date
        .as_deref()
        .map(|date| format!(" for <strong>{}</strong>", escape_html(date)))
        .unwrap_or_default();
    let body = format!(
        "<p>Hi {},</p><p>Your demo request{when} is confirmed. We'll send a calendar invite shortly.</p>",
        escape_html(&booking.name)
    );
    layout("Your demo request", &body)
}

pub fn demo_admin_body(booking: &DemoBooking) -> String {
    let body = format!(
        "<p><strong>{}</strong> ({}) requested a demo.</p><p>Company: {}</p><p>Preferred date: {}</p><p>{}</p>",
        escape_html(&booking.name),
        escape_html(&booking.email),
        escape_html(booking.company.as_deref().unwrap_or("-")),
        escape_html(booking.preferred_date.as_deref().unwrap_or("-")),
        escape_html(booking.message.as_deref().unwrap_or("")),
    );
    layout("New demo booking", &body)
}
