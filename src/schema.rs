//! Declarative field schemas.
//!
//! A [`FormSchema`] is configuration data: the built-in versions live in
//! [`crate::forms`], and a deployment may replace either with a JSON file
//! of the same shape. Validation never fails loudly; every problem is
//! reported as a [`Violation`].

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};
use url::Url;

use crate::errors::{IntakeError, SchemaError};
use crate::feedback::FeedbackText;
use crate::normalization::{normalize_list, normalize_text};
use crate::record::{Collection, SUBMITTED_AT};

lazy_static! {
    static ref EMAIL: Regex = Regex::new(
        r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$"
    )
    .expect("email pattern compiles");
}

/// The forms this service accepts.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Application,
    Contact,
}

impl FormKind {
    /// The collection records of this kind are appended to.
    pub fn collection(self) -> Collection {
        match self {
            FormKind::Application => Collection::Applications,
            FormKind::Contact => Collection::Contacts,
        }
    }

    /// The path segment the form is served under.
    pub fn path(self) -> &'static str {
        match self {
            FormKind::Application => "apply",
            FormKind::Contact => "contact",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for FormKind {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "apply" | "application" => Ok(FormKind::Application),
            "contact" => Ok(FormKind::Contact),
            other => Err(IntakeError::UnknownForm(other.to_owned())),
        }
    }
}

/// A raw value as entered by the user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Empty,
    Text(String),
    List(Vec<String>),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Empty
    }
}

impl From<&str> for FieldValue {
    fn from(text: &str) -> Self {
        FieldValue::Text(text.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(text: String) -> Self {
        FieldValue::Text(text)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(items: Vec<&str>) -> Self {
        FieldValue::List(items.into_iter().map(str::to_owned).collect())
    }
}

/// How a field’s cleaned value is interpreted and written to a record.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text, written as a string.
    Text,

    /// A calendar date, written as `YYYY-MM-DD`.
    Date,

    /// A single option, written as its value.
    Choice,

    /// Any number of options, written as an array of values.
    MultiChoice,
}

/// One selectable option.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Choice {
    pub value: String,
    pub label: String,
}

impl Choice {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single validation rule and the message shown when it fails.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    MinLength {
        min: usize,
        message: String,
    },
    MaxLength {
        max: usize,
        message: String,
    },
    Pattern {
        #[serde(with = "pattern")]
        pattern: Regex,
        message: String,
    },
    Email {
        message: String,
    },
    Url {
        message: String,
    },
    /// The value must be a URL on one of these hosts or their subdomains.
    HostIn {
        hosts: Vec<String>,
        message: String,
    },
    OneOf {
        options: Vec<Choice>,
        message: String,
    },
    /// The date must be today or later.
    NotInPast {
        message: String,
    },
    MinItems {
        min: usize,
        message: String,
    },
}

impl Rule {
    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Rule::MinLength {
            min,
            message: message.into(),
        }
    }

    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Rule::MaxLength {
            max,
            message: message.into(),
        }
    }

    pub fn pattern(pattern: Regex, message: impl Into<String>) -> Self {
        Rule::Pattern {
            pattern,
            message: message.into(),
        }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Rule::Email {
            message: message.into(),
        }
    }

    pub fn url(message: impl Into<String>) -> Self {
        Rule::Url {
            message: message.into(),
        }
    }

    pub fn host_in(hosts: &[&str], message: impl Into<String>) -> Self {
        Rule::HostIn {
            hosts: hosts.iter().map(|h| (*h).to_owned()).collect(),
            message: message.into(),
        }
    }

    pub fn one_of(options: Vec<Choice>, message: impl Into<String>) -> Self {
        Rule::OneOf {
            options,
            message: message.into(),
        }
    }

    pub fn not_in_past(message: impl Into<String>) -> Self {
        Rule::NotInPast {
            message: message.into(),
        }
    }

    pub fn min_items(min: usize, message: impl Into<String>) -> Self {
        Rule::MinItems {
            min,
            message: message.into(),
        }
    }

    /// The name the rule is written under.
    pub fn name(&self) -> &'static str {
        match self {
            Rule::MinLength { .. } => "min_length",
            Rule::MaxLength { .. } => "max_length",
            Rule::Pattern { .. } => "pattern",
            Rule::Email { .. } => "email",
            Rule::Url { .. } => "url",
            Rule::HostIn { .. } => "host_in",
            Rule::OneOf { .. } => "one_of",
            Rule::NotInPast { .. } => "not_in_past",
            Rule::MinItems { .. } => "min_items",
        }
    }

    /// Whether the rule can say anything about values of `kind`.
    pub fn applies_to(&self, kind: FieldKind) -> bool {
        match self {
            Rule::MinLength { .. }
            | Rule::MaxLength { .. }
            | Rule::Pattern { .. }
            | Rule::Email { .. }
            | Rule::Url { .. }
            | Rule::HostIn { .. } => kind == FieldKind::Text,
            Rule::OneOf { .. } => matches!(kind, FieldKind::Choice | FieldKind::MultiChoice),
            Rule::NotInPast { .. } => kind == FieldKind::Date,
            Rule::MinItems { .. } => kind == FieldKind::MultiChoice,
        }
    }

    fn check(&self, value: &Cleaned, context: &ValidationContext) -> Result<(), Violation> {
        use Cleaned::*;
        use ViolationKind::*;

        match (self, value) {
            (Rule::MinLength { min, message }, Text(text)) if text.chars().count() < *min => {
                Err(Violation::new(TooShort, message))
            }
            (Rule::MaxLength { max, message }, Text(text)) if text.chars().count() > *max => {
                Err(Violation::new(TooLong, message))
            }
            (Rule::Pattern { pattern, message }, Text(text)) if !pattern.is_match(text) => {
                Err(Violation::new(WrongFormat, message))
            }
            (Rule::Email { message }, Text(text)) if !EMAIL.is_match(text) => {
                Err(Violation::new(WrongFormat, message))
            }
            (Rule::Url { message }, Text(text)) if parse_web_url(text).is_none() => {
                Err(Violation::new(WrongFormat, message))
            }
            (Rule::HostIn { hosts, message }, Text(text)) if !is_on_hosts(text, hosts) => {
                Err(Violation::new(NotAllowed, message))
            }
            (Rule::OneOf { options, message }, Text(text)) if !offers(options, text) => {
                Err(Violation::new(NotAllowed, message))
            }
            (Rule::OneOf { options, message }, List(items))
                if !items.iter().all(|item| offers(options, item)) =>
            {
                Err(Violation::new(NotAllowed, message))
            }
            (Rule::NotInPast { message }, Day(date)) if *date < context.today => {
                Err(Violation::new(InPast, message))
            }
            (Rule::MinItems { min, message }, List(items)) if items.len() < *min => {
                Err(Violation::new(TooFew, message))
            }
            _ => Ok(()),
        }
    }
}

/// Why a value was refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    TooShort,
    TooLong,
    WrongFormat,
    NotAllowed,
    InPast,
    TooFew,
}

/// A failed validation, with the message to show next to the field.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What validation needs to know about the outside world.
#[derive(Clone, Copy, Debug)]
pub struct ValidationContext {
    pub today: Date,
}

impl ValidationContext {
    pub fn new(today: Date) -> Self {
        Self { today }
    }
}

/// A normalized value about to be checked against the rules.
enum Cleaned {
    Missing,
    Text(String),
    Day(Date),
    List(Vec<String>),
}

/// A single field of a form.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FieldSchema {
    /// The name the front-end uses for the field.
    pub name: String,

    /// The backend column, if it differs from the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    column: Option<String>,

    pub label: String,

    pub kind: FieldKind,

    #[serde(default = "default_required")]
    pub required: bool,

    /// Shown when a required field is left empty.
    pub required_message: String,

    #[serde(default)]
    pub rules: Vec<Rule>,
}

fn default_required() -> bool {
    true
}

impl FieldSchema {
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        kind: FieldKind,
        required_message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            column: None,
            label: label.into(),
            kind,
            required: true,
            required_message: required_message.into(),
            rules: vec![],
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// The backend column this field is written to.
    pub fn column(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    fn offers_choices(&self) -> bool {
        self.rules.iter().any(|rule| matches!(rule, Rule::OneOf { .. }))
    }

    /// Checks `value` and returns it as it should be written to the
    /// backend: `null` for an empty optional field, a string, or an
    /// array of strings.
    pub fn validate(
        &self,
        value: &FieldValue,
        context: &ValidationContext,
    ) -> Result<Value, Violation> {
        let cleaned = self.clean(value)?;

        if let Cleaned::Missing = cleaned {
            return if self.required {
                Err(Violation::new(ViolationKind::Missing, &self.required_message))
            } else {
                Ok(Value::Null)
            };
        }

        for rule in &self.rules {
            rule.check(&cleaned, context)?;
        }

        Ok(match cleaned {
            Cleaned::Missing => Value::Null,
            Cleaned::Text(text) => Value::String(text),
            Cleaned::Day(date) => Value::String(format_date(date)),
            Cleaned::List(items) => Value::Array(items.into_iter().map(Value::String).collect()),
        })
    }

    fn clean(&self, value: &FieldValue) -> Result<Cleaned, Violation> {
        let cleaned = match (self.kind, value) {
            (_, FieldValue::Empty) => Cleaned::Missing,
            (FieldKind::MultiChoice, FieldValue::Text(text)) => {
                list_or_missing(normalize_list(std::slice::from_ref(text)))
            }
            (FieldKind::MultiChoice, FieldValue::List(items)) => {
                list_or_missing(normalize_list(items))
            }
            (_, FieldValue::Text(text)) => text_or_missing(normalize_text(text)),
            (_, FieldValue::List(items)) => {
                let mut items = normalize_list(items);

                match items.len() {
                    0 => Cleaned::Missing,
                    1 => Cleaned::Text(items.remove(0)),
                    _ => {
                        return Err(Violation::new(
                            ViolationKind::WrongFormat,
                            format!("{} takes a single value", self.label),
                        ))
                    }
                }
            }
        };

        match (self.kind, cleaned) {
            (FieldKind::Date, Cleaned::Text(text)) => parse_date(&text).map(Cleaned::Day).ok_or_else(|| {
                Violation::new(
                    ViolationKind::WrongFormat,
                    format!("{} must be a date such as 2025-01-31", self.label),
                )
            }),
            (_, cleaned) => Ok(cleaned),
        }
    }
}

fn text_or_missing(text: String) -> Cleaned {
    if text.is_empty() {
        Cleaned::Missing
    } else {
        Cleaned::Text(text)
    }
}

fn list_or_missing(items: Vec<String>) -> Cleaned {
    if items.is_empty() {
        Cleaned::Missing
    } else {
        Cleaned::List(items)
    }
}

/// Ties the value of one field to the value of another, such as a
/// country to its calling code.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Pairing {
    /// The field whose value decides.
    pub field: String,

    /// The field that is marked invalid when the pair isn’t allowed.
    pub dependent: String,

    /// The allowed `(field, dependent)` values. A `field` value that isn’t
    /// listed here allows any `dependent` value.
    pub pairs: Vec<(String, String)>,

    pub message: String,
}

impl Pairing {
    fn allows(&self, value: &str, dependent: &str) -> bool {
        let mut listed = self.pairs.iter().filter(|(v, _)| v == value).peekable();

        listed.peek().is_none() || listed.any(|(_, d)| d == dependent)
    }
}

/// A complete, versioned form definition.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FormSchema {
    pub kind: FormKind,

    /// Bumped whenever fields, rules or options change.
    pub version: u32,

    pub title: String,

    pub fields: Vec<FieldSchema>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pairings: Vec<Pairing>,

    pub feedback: FeedbackText,
}

impl FormSchema {
    /// The current application form.
    pub fn application() -> Self {
        crate::forms::application()
    }

    /// The current contact form.
    pub fn contact() -> Self {
        crate::forms::contact()
    }

    /// The current built-in form of the given kind.
    pub fn builtin(kind: FormKind) -> Self {
        match kind {
            FormKind::Application => Self::application(),
            FormKind::Contact => Self::contact(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Validates every field, in schema order, then applies the pairings
    /// between fields that passed on their own.
    pub fn validate_all(
        &self,
        values: &[FieldValue],
        context: &ValidationContext,
    ) -> Vec<Result<Value, Violation>> {
        let mut results: Vec<_> = self
            .fields
            .iter()
            .zip(values.iter())
            .map(|(field, value)| field.validate(value, context))
            .collect();

        for pairing in &self.pairings {
            let (i, j) = match (self.position(&pairing.field), self.position(&pairing.dependent)) {
                (Some(i), Some(j)) => (i, j),
                _ => continue,
            };

            let allowed = match (&results[i], &results[j]) {
                (Ok(Value::String(value)), Ok(Value::String(dependent))) => {
                    pairing.allows(value, dependent)
                }
                _ => true,
            };

            if !allowed {
                results[j] = Err(Violation::new(ViolationKind::NotAllowed, &pairing.message));
            }
        }

        results
    }

    /// Verifies that the schema can produce well-formed records.
    pub fn check(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::Empty);
        }

        for (i, field) in self.fields.iter().enumerate() {
            let earlier = &self.fields[..i];

            if earlier.iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }

            if earlier.iter().any(|f| f.column() == field.column()) {
                return Err(SchemaError::DuplicateColumn {
                    column: field.column().to_owned(),
                });
            }

            if field.name == SUBMITTED_AT || field.column() == SUBMITTED_AT {
                return Err(SchemaError::ReservedColumn {
                    name: field.name.clone(),
                    column: field.column().to_owned(),
                });
            }

            if let Some(rule) = field.rules.iter().find(|r| !r.applies_to(field.kind)) {
                return Err(SchemaError::InapplicableRule {
                    field: field.name.clone(),
                    rule: rule.name().to_owned(),
                });
            }

            if matches!(field.kind, FieldKind::Choice | FieldKind::MultiChoice) && !field.offers_choices() {
                return Err(SchemaError::MissingOptions {
                    field: field.name.clone(),
                });
            }
        }

        for pairing in &self.pairings {
            for name in &[&pairing.field, &pairing.dependent] {
                if self.position(name).is_none() {
                    return Err(SchemaError::UnknownPairedField {
                        name: (*name).clone(),
                    });
                }
            }
        }

        Ok(())
    }

    /// Verifies that the schema describes the expected form.
    pub fn check_kind(&self, expected: FormKind) -> Result<(), SchemaError> {
        if self.kind == expected {
            Ok(())
        } else {
            Err(SchemaError::WrongKind {
                expected: expected.to_string(),
                found: self.kind.to_string(),
            })
        }
    }
}

/// Parses `YYYY-MM-DD`, or takes the UTC date of an RFC 3339 timestamp.
fn parse_date(text: &str) -> Option<Date> {
    use time::format_description::well_known::Rfc3339;

    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .ok()
        .or_else(|| {
            OffsetDateTime::parse(text, &Rfc3339)
                .ok()
                .map(|timestamp| timestamp.to_offset(UtcOffset::UTC).date())
        })
}

fn format_date(date: Date) -> String {
    // the format has no fallible components
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| date.to_string())
}

fn parse_web_url(text: &str) -> Option<Url> {
    let url = Url::parse(text).ok()?;

    match (url.scheme(), url.host_str()) {
        ("http", Some(host)) | ("https", Some(host)) if !host.is_empty() => Some(url),
        _ => None,
    }
}

fn is_on_hosts(text: &str, hosts: &[String]) -> bool {
    let url = match parse_web_url(text) {
        Some(url) => url,
        None => return false,
    };

    let host = match url.host_str() {
        Some(host) => host.trim_end_matches('.').to_ascii_lowercase(),
        None => return false,
    };

    hosts.iter().any(|allowed| {
        let allowed = allowed.to_ascii_lowercase();
        host == allowed || host.ends_with(&format!(".{}", allowed))
    })
}

fn offers(options: &[Choice], value: &str) -> bool {
    options.iter().any(|o| o.value == value)
}

mod pattern {
    use regex::Regex;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(pattern: &Regex, serializer: S) -> Result<S::Ok, S::Error>
    where S: Serializer {
        serializer.serialize_str(pattern.as_str())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Regex, D::Error>
    where D: Deserializer<'de> {
        let raw = String::deserialize(deserializer)?;
        Regex::new(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use super::*;

    fn context() -> ValidationContext {
        ValidationContext::new(date!(2026 - 10 - 16))
    }

    fn name_field() -> FieldSchema {
        FieldSchema::new("first_name", "First name", FieldKind::Text, "First name is required")
            .rule(Rule::min_length(2, "First name must be at least 2 characters"))
            .rule(Rule::max_length(5, "First name is too long"))
    }

    #[test]
    fn empty_and_blank_are_missing() {
        let field = name_field();

        for value in &[
            FieldValue::Empty,
            FieldValue::from(""),
            FieldValue::from("   "),
            FieldValue::List(vec![]),
        ] {
            let violation = field.validate(value, &context()).unwrap_err();
            assert_eq!(violation.kind, ViolationKind::Missing);
            assert_eq!(violation.message, "First name is required");
        }
    }

    #[test]
    fn optional_empty_fields_are_null() {
        let field = FieldSchema::new("company_website", "Website", FieldKind::Text, "")
            .optional()
            .rule(Rule::url("Please enter a valid URL"));

        assert_eq!(field.validate(&FieldValue::from(" "), &context()), Ok(Value::Null));
        assert_eq!(
            field.validate(&FieldValue::from("not a url"), &context()).unwrap_err().kind,
            ViolationKind::WrongFormat
        );
    }

    #[test]
    fn lengths_count_characters_after_trimming() {
        let field = name_field();

        assert_eq!(
            field.validate(&FieldValue::from(" A "), &context()).unwrap_err().kind,
            ViolationKind::TooShort
        );
        assert_eq!(field.validate(&FieldValue::from(" Zoë "), &context()), Ok(json!("Zoë")));
        assert_eq!(
            field.validate(&FieldValue::from("Zoëlla"), &context()).unwrap_err().kind,
            ViolationKind::TooLong
        );
    }

    #[test]
    fn rules_report_the_first_failure() {
        let field = FieldSchema::new("email", "Email", FieldKind::Text, "Email is required")
            .rule(Rule::max_length(10, "too long"))
            .rule(Rule::email("not an email"));

        let violation = field
            .validate(&FieldValue::from("someone@example.com"), &context())
            .unwrap_err();
        assert_eq!(violation.message, "too long");
    }

    #[test]
    fn emails_are_checked() {
        let field = FieldSchema::new("email", "Email", FieldKind::Text, "required")
            .rule(Rule::email("not an email"));

        for good in &["a@example.com", "first.last+tag@sub.example.co.uk", "o'neil@example.org"] {
            assert!(field.validate(&FieldValue::from(*good), &context()).is_ok(), "{}", good);
        }

        for bad in &["a@b", "@example.com", ".a@example.com", "a..b@example.com", "a b@example.com", "a@-x.com"] {
            assert!(field.validate(&FieldValue::from(*bad), &context()).is_err(), "{}", bad);
        }
    }

    #[test]
    fn hosts_must_match_the_allow_list() {
        let field = FieldSchema::new("voice_memo_link", "Voice memo", FieldKind::Text, "required")
            .rule(Rule::url("Please enter a valid URL"))
            .rule(Rule::host_in(&["vocaroo.com"], "Please use a Vocaroo.com link"));

        assert!(field.validate(&FieldValue::from("https://vocaroo.com/abc"), &context()).is_ok());
        assert!(field.validate(&FieldValue::from("https://www.Vocaroo.com/abc"), &context()).is_ok());

        for bad in &[
            "https://example.com/abc",
            "https://vocaroo.com.evil.net/abc",
            "https://notvocaroo.com/abc",
            "https://example.com/?u=vocaroo.com",
        ] {
            let violation = field.validate(&FieldValue::from(*bad), &context()).unwrap_err();
            assert_eq!(violation.kind, ViolationKind::NotAllowed, "{}", bad);
        }

        let violation = field.validate(&FieldValue::from("vocaroo.com/abc"), &context()).unwrap_err();
        assert_eq!(violation.kind, ViolationKind::WrongFormat);
    }

    #[test]
    fn dates_must_not_be_in_the_past() {
        let field = FieldSchema::new("available_start_date", "Start date", FieldKind::Date, "required")
            .rule(Rule::not_in_past("Please select a date from today onwards"));

        assert_eq!(field.validate(&FieldValue::from("2026-10-16"), &context()), Ok(json!("2026-10-16")));
        assert_eq!(
            field.validate(&FieldValue::from("2026-11-02T00:00:00.000Z"), &context()),
            Ok(json!("2026-11-02"))
        );
        assert_eq!(
            field.validate(&FieldValue::from("2026-10-15"), &context()).unwrap_err().kind,
            ViolationKind::InPast
        );
        assert_eq!(
            field.validate(&FieldValue::from("next tuesday"), &context()).unwrap_err().kind,
            ViolationKind::WrongFormat
        );
    }

    #[test]
    fn timestamps_are_read_as_utc_dates() {
        let field = FieldSchema::new("available_start_date", "Start date", FieldKind::Date, "required")
            .rule(Rule::not_in_past("Please select a date from today onwards"));

        // 2026-10-15T20:00Z
        assert_eq!(
            field.validate(&FieldValue::from("2026-10-16T01:00:00+05:00"), &context()).unwrap_err().kind,
            ViolationKind::InPast
        );

        // 2026-10-16T03:00Z
        assert_eq!(
            field.validate(&FieldValue::from("2026-10-15T22:00:00-05:00"), &context()),
            Ok(json!("2026-10-16"))
        );
    }

    #[test]
    fn multiple_choices_are_sets_of_offered_values() {
        let field = FieldSchema::new("services", "Services", FieldKind::MultiChoice, "Please select at least one service")
            .rule(Rule::one_of(
                vec![Choice::new("cold-calling", "Cold Calling"), Choice::new("lead-generation", "Lead Generation")],
                "Please choose from the listed services",
            ));

        let violation = field.validate(&FieldValue::List(vec![]), &context()).unwrap_err();
        assert_eq!(violation.message, "Please select at least one service");

        assert_eq!(
            field.validate(&FieldValue::from(vec!["lead-generation", "cold-calling", "lead-generation"]), &context()),
            Ok(json!(["lead-generation", "cold-calling"]))
        );
        assert_eq!(field.validate(&FieldValue::from("cold-calling"), &context()), Ok(json!(["cold-calling"])));
        assert_eq!(
            field.validate(&FieldValue::from(vec!["cold-calling", "bookkeeping"]), &context()).unwrap_err().kind,
            ViolationKind::NotAllowed
        );
    }

    #[test]
    fn single_choices_refuse_several_values() {
        let field = FieldSchema::new("monthly_budget", "Budget", FieldKind::Choice, "required")
            .rule(Rule::one_of(vec![Choice::new("discuss", "Let's discuss")], "not offered"));

        assert_eq!(field.validate(&FieldValue::from(vec!["discuss"]), &context()), Ok(json!("discuss")));
        assert_eq!(
            field.validate(&FieldValue::from(vec!["discuss", "other"]), &context()).unwrap_err().kind,
            ViolationKind::WrongFormat
        );
        assert_eq!(
            field.validate(&FieldValue::from("other"), &context()).unwrap_err().kind,
            ViolationKind::NotAllowed
        );
    }

    #[test]
    fn min_items_counts_distinct_choices() {
        let field = FieldSchema::new("languages", "Languages", FieldKind::MultiChoice, "required")
            .rule(Rule::min_items(2, "Please select at least two languages"));

        assert_eq!(
            field.validate(&FieldValue::from(vec!["en", "en"]), &context()).unwrap_err().kind,
            ViolationKind::TooFew
        );
        assert!(field.validate(&FieldValue::from(vec!["en", "ar"]), &context()).is_ok());
    }

    #[test]
    fn schemas_round_trip_through_json() {
        let schema = FormSchema::application();
        let encoded = serde_json::to_string(&schema).expect("encode schema");
        let decoded: FormSchema = serde_json::from_str(&encoded).expect("decode schema");

        assert_eq!(decoded.kind, FormKind::Application);
        assert_eq!(decoded.fields.len(), schema.fields.len());
        assert!(decoded.check().is_ok());

        let phone = decoded.field("phone").expect("phone field");
        assert!(phone.validate(&FieldValue::from("+20 100 123 4567"), &context()).is_ok());
        assert!(phone.validate(&FieldValue::from("0100"), &context()).is_err());
    }

    #[test]
    fn check_rejects_reserved_and_duplicate_columns() {
        let mut schema = FormSchema::contact();
        schema
            .fields
            .push(FieldSchema::new("when", "When", FieldKind::Text, "required").with_column("submitted_at"));
        assert!(matches!(schema.check(), Err(SchemaError::ReservedColumn { .. })));

        let mut schema = FormSchema::contact();
        schema
            .fields
            .push(FieldSchema::new("email_again", "Email", FieldKind::Text, "required").with_column("work_email"));
        assert_eq!(
            schema.check(),
            Err(SchemaError::DuplicateColumn {
                column: "work_email".to_owned()
            })
        );

        let mut schema = FormSchema::contact();
        let first = schema.fields[0].clone();
        schema.fields.push(first);
        assert!(matches!(schema.check(), Err(SchemaError::DuplicateField { .. })));
    }

    #[test]
    fn check_rejects_rules_that_cannot_apply() {
        let schema: FormSchema = serde_json::from_value(json!({
            "kind": "application",
            "version": 1,
            "title": "Apply",
            "fields": [{
                "name": "available_start_date",
                "label": "Start date",
                "kind": "text",
                "required_message": "required",
                "rules": [{"rule": "not_in_past", "message": "past"}],
            }],
            "feedback": FormSchema::application().feedback,
        }))
        .expect("decode schema");
        assert_eq!(
            schema.check(),
            Err(SchemaError::InapplicableRule {
                field: "available_start_date".to_owned(),
                rule: "not_in_past".to_owned(),
            })
        );

        let mut schema = FormSchema::contact();
        schema.fields.push(
            FieldSchema::new("referrer", "Referrer", FieldKind::Choice, "required")
                .rule(Rule::min_items(1, "pick one")),
        );
        assert!(matches!(schema.check(), Err(SchemaError::InapplicableRule { ref rule, .. }) if rule == "min_items"));

        let mut schema = FormSchema::contact();
        schema
            .fields
            .push(FieldSchema::new("industry", "Industry", FieldKind::MultiChoice, "required"));
        assert_eq!(
            schema.check(),
            Err(SchemaError::MissingOptions {
                field: "industry".to_owned()
            })
        );

        let mut schema = FormSchema::application();
        schema.fields.push(
            FieldSchema::new("languages", "Languages", FieldKind::MultiChoice, "required")
                .rule(Rule::one_of(vec![Choice::new("en", "English")], "not offered"))
                .rule(Rule::email("not an email")),
        );
        assert!(matches!(schema.check(), Err(SchemaError::InapplicableRule { ref rule, .. }) if rule == "email"));
    }

    #[test]
    fn pairings_mark_the_dependent_field() {
        let schema = FormSchema::contact();
        let values: Vec<FieldValue> = schema
            .fields
            .iter()
            .map(|f| match f.name.as_str() {
                "country" => FieldValue::from("us"),
                "country_code" => FieldValue::from("+44"),
                _ => FieldValue::Empty,
            })
            .collect();

        let results = schema.validate_all(&values, &context());
        let code = schema.position("country_code").expect("country code field");
        let country = schema.position("country").expect("country field");

        assert_eq!(results[code].as_ref().unwrap_err().kind, ViolationKind::NotAllowed);
        assert_eq!(results[country], Ok(json!("us")));

        let mut schema = FormSchema::contact();
        schema.pairings[0].dependent = "fax".to_owned();
        assert_eq!(
            schema.check(),
            Err(SchemaError::UnknownPairedField {
                name: "fax".to_owned()
            })
        );
    }

    #[test]
    fn unlisted_values_allow_any_pair() {
        let pairing = Pairing {
            field: "country".to_owned(),
            dependent: "country_code".to_owned(),
            pairs: vec![("us".to_owned(), "+1".to_owned()), ("kz".to_owned(), "+7".to_owned())],
            message: "mismatch".to_owned(),
        };

        assert!(pairing.allows("us", "+1"));
        assert!(!pairing.allows("us", "+7"));
        assert!(pairing.allows("other", "+44"));
    }

    #[test]
    fn form_kinds_parse_from_paths() {
        assert_eq!("apply".parse::<FormKind>().ok(), Some(FormKind::Application));
        assert_eq!("contact".parse::<FormKind>().ok(), Some(FormKind::Contact));
        assert!("careers".parse::<FormKind>().is_err());
        assert_eq!(FormKind::Contact.collection(), Collection::Contacts);
    }
}
