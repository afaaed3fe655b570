use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use log::{debug, o};
use serde_json::Value;
use warp::{
    http::StatusCode,
    reject,
    reply::{json, with_header, with_status, Reply},
};

use crate::environment::Environment;
use crate::errors::IntakeError;
use crate::form::FormState;
use crate::routes::{
    rejection::{Context, Rejection},
    response::SuccessResponse,
};
use crate::schema::{FieldValue, FormKind};
use crate::submission::Outcome;

const SERVER_TIMING_HEADER: &str = "server-timing";
type RouteResult = Result<Box<dyn Reply>, reject::Rejection>;

macro_rules! timed {
    ($($expression:stmt);+) => {
        let start = Instant::now();

        let result = { $($expression)+ };

        Ok(Box::new(with_header(
            result,
            SERVER_TIMING_HEADER,
            format_server_timing(start.elapsed()),
        )) as Box<dyn Reply>)
    };
}

pub async fn schema(environment: Environment, form: String) -> RouteResult {
    timed! {
        let kind = parse_kind(&form, Context::schema)?;
        let schema = environment.forms.get(kind);

        json(&*schema)
    }
}

pub async fn validate(environment: Environment, form: String, body: Value) -> RouteResult {
    timed! {
        let kind = parse_kind(&form, Context::validate)?;
        let state = fill_form(&environment, kind, body)
            .map_err(|e| reject::custom(Rejection::new(Context::validate(&form), e)))?;

        let fields: BTreeMap<&str, _> = state.statuses().collect();

        json(&SuccessResponse::Validation {
            fields,
            can_submit: state.can_submit(),
        })
    }
}

pub async fn submit(environment: Environment, form: String, body: Value) -> RouteResult {
    timed! {
        let kind = parse_kind(&form, Context::submit)?;
        let logger = environment.logger.new(o!("form" => kind.path()));

        debug!(logger, "Parsing submission...");
        let state = fill_form(&environment, kind, body)
            .map_err(|e| reject::custom(Rejection::new(Context::submit(&form), e)))?;

        debug!(logger, "Submitting...");
        let state = Mutex::new(state);
        let outcome = environment.submitter.submit(&state).await;

        let feedback = state
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .snapshot()
            .feedback;

        let (status, errors) = match outcome {
            Outcome::Submitted { .. } => (StatusCode::CREATED, BTreeMap::new()),
            Outcome::Failed { .. } => (StatusCode::BAD_GATEWAY, BTreeMap::new()),
            Outcome::InFlight => (StatusCode::CONFLICT, BTreeMap::new()),
            Outcome::Invalid(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                violations
                    .into_iter()
                    .map(|(name, violation)| (name, violation.message))
                    .collect(),
            ),
        };

        debug!(logger, "Sending response..."; "status" => status.as_u16());
        with_status(json(&SuccessResponse::Submission { feedback, errors }), status)
    }
}

fn parse_kind(form: &str, context: fn(&str) -> Context) -> Result<FormKind, reject::Rejection> {
    form.parse()
        .map_err(|e| reject::custom(Rejection::new(context(form), e)))
}

/// Builds a form from a JSON object of field names and values.
fn fill_form(environment: &Environment, kind: FormKind, body: Value) -> Result<FormState, IntakeError> {
    let fields = match body {
        Value::Object(fields) => fields,
        _ => return Err(IntakeError::MalformedSubmission),
    };

    let mut form = FormState::new(environment.forms.get(kind), environment.clock.clone());

    for (name, value) in fields {
        let value = field_value(&name, value)?;
        form.set_field(&name, value)?;
    }

    Ok(form)
}

fn field_value(name: &str, value: Value) -> Result<FieldValue, IntakeError> {
    let malformed = || IntakeError::MalformedValue {
        name: name.to_owned(),
    };

    match value {
        Value::Null => Ok(FieldValue::Empty),
        Value::String(text) => Ok(FieldValue::Text(text)),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => Ok(text),
                _ => Err(malformed()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::List),
        _ => Err(malformed()),
    }
}

fn format_server_timing(seconds: Duration) -> String {
    format!("handler;dur={}", seconds.as_secs_f64() * 1000.0)
}
