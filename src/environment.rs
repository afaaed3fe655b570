use std::sync::Arc;

use log::Logger;

use crate::clock::Clock;
use crate::schema::{FormKind, FormSchema};
use crate::submission::Submitter;

/// The schemas currently served, one per form.
#[derive(Clone, Debug)]
pub struct Forms {
    pub application: Arc<FormSchema>,
    pub contact: Arc<FormSchema>,
}

impl Forms {
    pub fn new(application: FormSchema, contact: FormSchema) -> Self {
        Self {
            application: Arc::new(application),
            contact: Arc::new(contact),
        }
    }

    /// The built-in schemas.
    pub fn builtin() -> Self {
        Self::new(FormSchema::application(), FormSchema::contact())
    }

    pub fn get(&self, kind: FormKind) -> Arc<FormSchema> {
        match kind {
            FormKind::Application => self.application.clone(),
            FormKind::Contact => self.contact.clone(),
        }
    }
}

/// Everything a request handler needs.
#[derive(Clone)]
pub struct Environment {
    pub logger: Arc<Logger>,
    pub forms: Arc<Forms>,
    pub submitter: Arc<Submitter>,
    pub clock: Arc<dyn Clock>,
}

impl Environment {
    pub fn new(
        logger: Arc<Logger>,
        forms: Arc<Forms>,
        submitter: Arc<Submitter>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            logger,
            forms,
            submitter,
            clock,
        }
    }
}
