use super::common::{cold_boundary_form, hot_form};
use crate::workflows::leads::{
    validate_contact, validate_demo_booking, Budget, ContactForm, DemoBookingForm, LeadSource,
};

fn fields(form: &ContactForm) -> Vec<String> {
    validate_contact(form)
        .expect_err("form should be rejected")
        .details
        .into_iter()
        .map(|detail| detail.field)
        .collect()
}

#[test]
fn accepts_a_complete_form_and_normalizes_email() {
    let submission = validate_contact(&hot_form()).expect("valid form");
    assert_eq!(submission.email, "priya@example.com");
    assert_eq!(submission.budget, Budget::Above20Lakh);
    assert_eq!(submission.source, LeadSource::Referral);
    assert!(validate_contact(&cold_boundary_form()).is_ok());
}

#[test]
fn empty_form_reports_every_required_field() {
    let fields = fields(&ContactForm::default());
    for expected in [
        "name",
        "email",
        "company",
        "phone",
        "projectType",
        "budget",
        "timeline",
        "source",
        "description",
        "submittedAt",
    ] {
        assert!(fields.iter().any(|f| f == expected), "missing {expected}");
    }
}

#[test]
fn unknown_enum_labels_are_rejected() {
    let form = ContactForm {
        budget: Some("A lot".to_string()),
        source: Some("Billboard".to_string()),
        ..hot_form()
    };
    assert_eq!(fields(&form), vec!["budget", "source"]);
}

#[test]
fn length_bounds_are_enforced() {
    let form = ContactForm {
        name: Some("P".to_string()),
        description: Some("too short".to_string()),
        subject: Some("s".repeat(201)),
        ..hot_form()
    };
    assert_eq!(fields(&form), vec!["name", "description", "subject"]);
}

#[test]
fn phone_and_timestamp_shapes_are_checked() {
    let form = ContactForm {
        phone: Some("call me maybe".to_string()),
        submitted_at: Some("yesterday".to_string()),
        ..hot_form()
    };
    assert_eq!(fields(&form), vec!["phone", "submittedAt"]);
}

#[test]
fn demo_booking_needs_name_and_email() {
    let errors = validate_demo_booking(&DemoBookingForm::default()).expect_err("rejected");
    let fields: Vec<_> = errors.details.iter().map(|d| d.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "email"]);

    let request = validate_demo_booking(&DemoBookingForm {
        name: Some("Arjun".to_string()),
        email: Some("arjun@example.com".to_string()),
        preferred_date: Some("  ".to_string()),
        ..DemoBookingForm::default()
    })
    .expect("valid booking");
    assert_eq!(request.preferred_date, None);
}
