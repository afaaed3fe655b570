use serde::Serialize;
use warp::reject;

use crate::errors::IntakeError;

#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: IntakeError,
}

impl Rejection {
    pub fn new(context: Context, error: IntakeError) -> Self {
        Rejection { context, error }
    }

    pub fn flatten(&self) -> FlattenedRejection {
        FlattenedRejection {
            context: self.context.clone(),
            message: format!("{}", self.error),
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct FlattenedRejection {
    #[serde(flatten)]
    pub(crate) context: Context,
    pub(crate) message: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Context {
    Schema { form: String },
    Submit { form: String },
    Validate { form: String },
}

impl Context {
    pub fn schema(form: &str) -> Context {
        Context::Schema {
            form: form.to_owned(),
        }
    }

    pub fn submit(form: &str) -> Context {
        Context::Submit {
            form: form.to_owned(),
        }
    }

    pub fn validate(form: &str) -> Context {
        Context::Validate {
            form: form.to_owned(),
        }
    }
}
