use regex::Regex;

use super::catalog::{
    calling_codes, choices, countries, country_calling_codes, CLIENT_COUNTRIES, MONTHLY_BUDGETS,
    REFERRAL_CHANNELS, SERVICES,
};
use crate::feedback::FeedbackText;
use crate::schema::{FieldKind, FieldSchema, FormKind, FormSchema, Pairing, Rule};

const VERSION: u32 = 5;

const NAME: &str = r"^[a-zA-Z\s'-]+$";
const PHONE: &str = r"^[+]?[1-9][\d\s\-()]{7,20}$";

pub(super) fn schema() -> FormSchema {
    use FieldKind::*;

    let name = Regex::new(NAME).expect("contact name pattern compiles");
    let phone = Regex::new(PHONE).expect("contact phone pattern compiles");

    FormSchema {
        kind: FormKind::Contact,
        version: VERSION,
        title: "Schedule Your Free Consultation".to_owned(),
        fields: vec![
            FieldSchema::new("first_name", "First Name", Text, "First name is required")
                .rule(Rule::max_length(50, "First name must be less than 50 characters"))
                .rule(Rule::pattern(
                    name.clone(),
                    "First name can only contain letters, spaces, hyphens, and apostrophes",
                )),
            FieldSchema::new("last_name", "Last Name", Text, "Last name is required")
                .rule(Rule::max_length(50, "Last name must be less than 50 characters"))
                .rule(Rule::pattern(
                    name,
                    "Last name can only contain letters, spaces, hyphens, and apostrophes",
                )),
            FieldSchema::new("work_email", "Work Email", Text, "Email is required")
                .rule(Rule::max_length(100, "Email must be less than 100 characters"))
                .rule(Rule::email("Please enter a valid email address")),
            FieldSchema::new("phone", "Phone Number", Text, "Phone number is required")
                .rule(Rule::max_length(25, "Phone number is too long"))
                .rule(Rule::pattern(
                    phone,
                    "Please enter a valid phone number (7-20 digits)",
                )),
            FieldSchema::new("country_code", "Country Code", Choice, "Country code is required")
                .rule(Rule::one_of(
                    calling_codes(CLIENT_COUNTRIES),
                    "Please select a listed country code",
                )),
            FieldSchema::new("company_website", "Company Website", Text, "")
                .optional()
                .rule(Rule::max_length(200, "Website URL is too long"))
                .rule(Rule::url("Please enter a valid URL")),
            FieldSchema::new("job_title", "Job Title", Text, "Job title is required")
                .rule(Rule::max_length(100, "Job title must be less than 100 characters")),
            FieldSchema::new("country", "Country", Choice, "Country is required").rule(
                Rule::one_of(countries(CLIENT_COUNTRIES), "Please select a listed country"),
            ),
            FieldSchema::new(
                "services",
                "Services you're interested in",
                MultiChoice,
                "Please select at least one service",
            )
            .rule(Rule::min_items(1, "Please select at least one service"))
            .rule(Rule::one_of(
                choices(SERVICES),
                "Please choose from the listed services",
            )),
            FieldSchema::new(
                "monthly_budget",
                "Estimated Monthly Budget",
                Choice,
                "Please select your estimated monthly budget",
            )
            .rule(Rule::one_of(
                choices(MONTHLY_BUDGETS),
                "Please select your estimated monthly budget",
            )),
            FieldSchema::new(
                "project_details",
                "Project Details",
                Text,
                "Please provide more details about your needs (minimum 10 characters)",
            )
            .rule(Rule::min_length(
                10,
                "Please provide more details about your needs (minimum 10 characters)",
            ))
            .rule(Rule::max_length(
                2000,
                "Project details must be less than 2000 characters",
            )),
            FieldSchema::new(
                "hear_about_us",
                "How did you hear about us?",
                Choice,
                "Please tell us how you heard about us",
            )
            .rule(Rule::one_of(
                choices(REFERRAL_CHANNELS),
                "Please tell us how you heard about us",
            )),
        ],
        pairings: vec![Pairing {
            field: "country".to_owned(),
            dependent: "country_code".to_owned(),
            pairs: country_calling_codes(CLIENT_COUNTRIES),
            message: "Country code doesn't match the selected country".to_owned(),
        }],
        feedback: FeedbackText {
            success_title: "Consultation Request Submitted!".to_owned(),
            success_detail:
                "We'll contact you within 24 hours to schedule your free consultation.".to_owned(),
            failure_title: "Submission Failed".to_owned(),
            failure_detail: "There was an error submitting your request. Please try again or contact us directly.".to_owned(),
        },
    }
}
