use serde::{Deserialize, Serialize};

use crate::form::Phase;

/// The messages a form shows once a submission has settled.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct FeedbackText {
    pub success_title: String,
    pub success_detail: String,
    pub failure_title: String,
    pub failure_detail: String,
}

/// What the user should currently see about their submission.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Feedback {
    Idle,
    Pending,
    Success { title: String, detail: String },
    Error { title: String, detail: String },
}

impl Feedback {
    /// Maps a form phase to what should be shown for it.
    pub fn for_phase(phase: Phase, text: &FeedbackText) -> Self {
        match phase {
            Phase::Incomplete | Phase::Ready => Feedback::Idle,
            Phase::Submitting => Feedback::Pending,
            Phase::Submitted => Feedback::Success {
                title: text.success_title.clone(),
                detail: text.success_detail.clone(),
            },
            Phase::Failed => Feedback::Error {
                title: text.failure_title.clone(),
                detail: text.failure_detail.clone(),
            },
        }
    }
}
