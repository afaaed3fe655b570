//! Shared fixtures for unit tests.

use std::sync::Arc;

use time::macros::datetime;
use time::OffsetDateTime;

use crate::clock::FixedClock;
use crate::form::FormState;
use crate::schema::FormSchema;

/// 2026-10-16, mid-morning UTC.
pub(crate) const NOW: OffsetDateTime = datetime!(2026-10-16 09:30:00 UTC);

pub(crate) fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(NOW))
}

pub(crate) fn application_form() -> FormState {
    FormState::new(Arc::new(FormSchema::application()), clock())
}

pub(crate) fn contact_form() -> FormState {
    FormState::new(Arc::new(FormSchema::contact()), clock())
}

pub(crate) fn fill_application(form: &mut FormState) {
    let values = [
        ("first_name", "Amal"),
        ("last_name", "Hassan"),
        ("email", "amal.hassan@example.com"),
        ("phone", "100 123 4567"),
        ("country_code", "+20"),
        ("voice_memo_link", "https://vocaroo.com/1ofrZHJc0yVb"),
        ("available_start_date", "2026-11-01"),
        ("employment_status", "between-jobs"),
        ("application_source", "linkedin"),
    ];

    for (name, value) in values.iter() {
        form.set_field(name, *value).expect("fill application field");
    }
}

pub(crate) fn fill_contact(form: &mut FormState) {
    let values = [
        ("first_name", "Jordan"),
        ("last_name", "O'Neil"),
        ("work_email", "jordan@northwind.example"),
        ("phone", "+1 415 555 0100"),
        ("country_code", "+1"),
        ("company_website", "https://northwind.example"),
        ("job_title", "Head of Support"),
        ("country", "us"),
        ("monthly_budget", "5k-10k"),
        ("project_details", "We need overnight phone coverage for our US customers."),
        ("hear_about_us", "clutch"),
    ];

    for (name, value) in values.iter() {
        form.set_field(name, *value).expect("fill contact field");
    }

    form.set_field("services", vec!["phone-support", "lead-generation"])
        .expect("fill contact services");
}
