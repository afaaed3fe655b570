use regex::Regex;

use super::catalog::{
    calling_codes, choices, APPLICANT_COUNTRIES, APPLICATION_SOURCES, EMPLOYMENT_STATUSES,
};
use crate::feedback::FeedbackText;
use crate::schema::{FieldKind, FieldSchema, FormKind, FormSchema, Rule};

const VERSION: u32 = 3;

const PHONE: &str = r"^[+]?[1-9][\d\s\-()]{7,15}$";

/// Hosts voice memos may be shared from.
const VOICE_MEMO_HOSTS: &[&str] = &["vocaroo.com"];

pub(super) fn schema() -> FormSchema {
    use FieldKind::*;

    let phone = Regex::new(PHONE).expect("application phone pattern compiles");

    FormSchema {
        kind: FormKind::Application,
        version: VERSION,
        title: "Agent Application Form".to_owned(),
        fields: vec![
            FieldSchema::new("first_name", "First Name", Text, "First name is required")
                .rule(Rule::min_length(2, "First name must be at least 2 characters"))
                .rule(Rule::max_length(50, "First name must be less than 50 characters")),
            FieldSchema::new("last_name", "Last Name", Text, "Last name is required")
                .rule(Rule::min_length(2, "Last name must be at least 2 characters"))
                .rule(Rule::max_length(50, "Last name must be less than 50 characters")),
            FieldSchema::new("email", "Email Address", Text, "Email is required")
                .rule(Rule::max_length(100, "Email must be less than 100 characters"))
                .rule(Rule::email("Please enter a valid email address")),
            FieldSchema::new("phone", "Phone Number", Text, "Phone number is required")
                .rule(Rule::pattern(phone, "Please enter a valid phone number")),
            FieldSchema::new("country_code", "Country Code", Choice, "Country code is required")
                .rule(Rule::one_of(
                    calling_codes(APPLICANT_COUNTRIES),
                    "Please select a listed country code",
                )),
            FieldSchema::new(
                "voice_memo_link",
                "Voice Memo Link",
                Text,
                "Voice memo link is required",
            )
            .rule(Rule::url("Please enter a valid URL"))
            .rule(Rule::host_in(VOICE_MEMO_HOSTS, "Please use a Vocaroo.com link")),
            FieldSchema::new(
                "available_start_date",
                "When are you available to start?",
                Date,
                "Please select your available start date",
            )
            .rule(Rule::not_in_past("Your start date can't be in the past")),
            FieldSchema::new(
                "employment_status",
                "What is your current employment status?",
                Choice,
                "Please select your employment status",
            )
            .rule(Rule::one_of(
                choices(EMPLOYMENT_STATUSES),
                "Please select your employment status",
            )),
            FieldSchema::new(
                "application_source",
                "Where did you apply from?",
                Choice,
                "Please select where you found this opportunity",
            )
            .rule(Rule::one_of(
                choices(APPLICATION_SOURCES),
                "Please select where you found this opportunity",
            )),
        ],
        pairings: vec![],
        feedback: FeedbackText {
            success_title: "Application Submitted Successfully!".to_owned(),
            success_detail: "We'll review your application and contact you within 48 hours."
                .to_owned(),
            failure_title: "Submission Failed".to_owned(),
            failure_detail:
                "Please check your information and try again, or contact support.".to_owned(),
        },
    }
}
