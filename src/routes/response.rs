use std::collections::BTreeMap;

use serde::Serialize;

use crate::feedback::Feedback;
use crate::form::FieldStatus;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SuccessResponse<'a> {
    Healthz {
        revision: Option<&'a str>,
        timestamp: Option<&'a str>,
        version: &'a str,
    },
    Submission {
        feedback: Feedback,
        #[serde(skip_serializing_if = "BTreeMap::is_empty")]
        errors: BTreeMap<String, String>,
    },
    Validation {
        fields: BTreeMap<&'a str, &'a FieldStatus>,
        can_submit: bool,
    },
}
