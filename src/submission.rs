//! The submission handler: turns a valid form into a stored record.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, error, info, o, Logger};
use uuid::Uuid;

use crate::clock::Clock;
use crate::form::{FormState, Refusal};
use crate::schema::Violation;
use crate::store::Store;

/// How a call to [`Submitter::submit`] ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// The record was stored and the form cleared.
    Submitted { id: Uuid },
    /// The store refused the record; the form keeps its values. The
    /// cause is logged under `id`.
    Failed { id: Uuid },
    /// Another submission of the form is pending. Nothing was sent.
    InFlight,
    /// Some fields don’t pass their rules. Nothing was sent.
    Invalid(BTreeMap<String, Violation>),
}

pub struct Submitter {
    store: Arc<dyn Store>,
    clock: Arc<dyn Clock>,
    logger: Arc<Logger>,
}

impl Submitter {
    pub fn new(store: Arc<dyn Store>, clock: Arc<dyn Clock>, logger: Arc<Logger>) -> Self {
        Self { store, clock, logger }
    }

    /// Submits the form once. The lock is released while the store is
    /// working, so observers and edits aren’t blocked, but a second
    /// submission of the same form is refused until this one settles.
    pub async fn submit(&self, form: &Mutex<FormState>) -> Outcome {
        let now = self.clock.now();

        let (kind, record) = {
            let mut state = lock(form);
            let kind = state.kind();

            match state.begin_submission(now) {
                Ok(record) => (kind, record),
                Err(Refusal::InFlight) => {
                    debug!(self.logger, "Submission already in flight"; "form" => kind.path());
                    return Outcome::InFlight;
                }
                Err(Refusal::Invalid(violations)) => {
                    debug!(self.logger, "Refusing invalid submission"; "form" => kind.path(), "fields" => violations.len());
                    return Outcome::Invalid(violations);
                }
            }
        };

        let id = Uuid::new_v4();
        let logger = self
            .logger
            .new(o!("form" => kind.path(), "submission" => id.to_string()));

        debug!(logger, "Inserting record..."; "collection" => kind.collection().as_str(), "columns" => record.len());

        let result = self.store.insert(kind.collection(), record).await;

        let mut state = lock(form);

        match result {
            Ok(()) => {
                state.finish_submission(true);
                info!(logger, "Stored submission");

                Outcome::Submitted { id }
            }
            Err(e) => {
                state.finish_submission(false);
                error!(logger, "Failed to store submission"; "error" => e.to_string(), "details" => format!("{:?}", e));

                Outcome::Failed { id }
            }
        }
    }
}

fn lock(form: &Mutex<FormState>) -> MutexGuard<FormState> {
    form.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::feedback::Feedback;
    use crate::form::Phase;
    use crate::record::Collection;
    use crate::schema::{FieldValue, ViolationKind};
    use crate::store::mock::MockStore;
    use crate::test_support::{application_form, clock, contact_form, fill_application, fill_contact};

    fn submitter(store: Arc<MockStore>) -> Submitter {
        Submitter::new(store, clock(), Arc::new(log::discard()))
    }

    #[tokio::test]
    async fn stored_application_has_every_column() {
        let store = Arc::new(MockStore::new());
        let form = Mutex::new(application_form());
        fill_application(&mut lock(&form));

        let outcome = submitter(store.clone()).submit(&form).await;
        assert!(matches!(outcome, Outcome::Submitted { .. }));

        let records = store.records();
        assert_eq!(records.len(), 1);

        let (collection, record) = &records[0];
        assert_eq!(*collection, Collection::Applications);
        assert_eq!(
            serde_json::to_value(record).expect("encode record"),
            json!({
                "first_name": "Amal",
                "last_name": "Hassan",
                "email": "amal.hassan@example.com",
                "phone": "100 123 4567",
                "country_code": "+20",
                "voice_memo_link": "https://vocaroo.com/1ofrZHJc0yVb",
                "available_start_date": "2026-11-01",
                "employment_status": "between-jobs",
                "application_source": "linkedin",
                "submitted_at": "2026-10-16T09:30:00Z",
            })
        );
    }

    #[tokio::test]
    async fn stored_contact_keeps_services_as_a_list() {
        let store = Arc::new(MockStore::new());
        let form = Mutex::new(contact_form());
        fill_contact(&mut lock(&form));

        submitter(store.clone()).submit(&form).await;

        let records = store.records();
        let (collection, record) = &records[0];
        assert_eq!(*collection, Collection::Contacts);
        assert_eq!(record.len(), 13);
        assert_eq!(
            record.get("services"),
            Some(&json!(["phone-support", "lead-generation"]))
        );
        assert_eq!(record.submitted_at(), Some("2026-10-16T09:30:00Z"));
    }

    #[tokio::test]
    async fn success_clears_the_form() {
        let store = Arc::new(MockStore::new());
        let form = Mutex::new(contact_form());
        fill_contact(&mut lock(&form));

        submitter(store).submit(&form).await;

        let state = lock(&form);
        assert_eq!(state.phase(), Phase::Submitted);
        assert!(state.values().all(|(_, v)| *v == FieldValue::Empty));
        assert!(!state.is_dirty());
        assert!(!state.can_submit());

        match state.snapshot().feedback {
            Feedback::Success { title, .. } => assert_eq!(title, "Consultation Request Submitted!"),
            other => panic!("expected success feedback, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failure_keeps_what_was_entered() {
        let store = Arc::new(MockStore::new());
        store.set_failing(true);

        let form = Mutex::new(application_form());
        fill_application(&mut lock(&form));
        let before: Vec<FieldValue> = lock(&form).values().map(|(_, v)| v.clone()).collect();

        let submitter = submitter(store.clone());
        let outcome = submitter.submit(&form).await;
        assert!(matches!(outcome, Outcome::Failed { .. }));

        {
            let state = lock(&form);
            assert_eq!(state.phase(), Phase::Failed);
            assert_eq!(state.values().map(|(_, v)| v.clone()).collect::<Vec<_>>(), before);
            assert!(state.can_submit());

            match state.snapshot().feedback {
                Feedback::Error { title, detail } => {
                    assert_eq!(title, "Submission Failed");
                    assert!(!detail.contains("store set to fail"));
                }
                other => panic!("expected error feedback, got {:?}", other),
            }
        }

        store.set_failing(false);
        let outcome = submitter.submit(&form).await;
        assert!(matches!(outcome, Outcome::Submitted { .. }));
        assert_eq!(store.records().len(), 1);
        assert_eq!(store.attempts(), 2);
    }

    #[tokio::test]
    async fn one_submission_at_a_time() {
        let store = Arc::new(MockStore::gated());
        let form = Mutex::new(contact_form());
        fill_contact(&mut lock(&form));

        let submitter = submitter(store.clone());

        let first = submitter.submit(&form);
        let second = async {
            while lock(&form).phase() != Phase::Submitting {
                tokio::task::yield_now().await;
            }

            assert!(!lock(&form).can_submit());
            let outcome = submitter.submit(&form).await;
            store.release();

            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first, Outcome::Submitted { .. }));
        assert_eq!(second, Outcome::InFlight);
        assert_eq!(store.attempts(), 1);
        assert_eq!(store.records().len(), 1);
    }

    #[tokio::test]
    async fn reset_does_not_cancel_a_pending_submission() {
        let store = Arc::new(MockStore::gated());
        let form = Mutex::new(contact_form());
        fill_contact(&mut lock(&form));

        let submitter = submitter(store.clone());

        let first = submitter.submit(&form);
        let second = async {
            while lock(&form).phase() != Phase::Submitting {
                tokio::task::yield_now().await;
            }

            {
                let mut state = lock(&form);
                state.reset();
                assert_eq!(state.phase(), Phase::Submitting);
                assert!(state.values().all(|(_, v)| *v == FieldValue::Empty));

                fill_contact(&mut state);
                assert!(state.is_valid());
                assert!(!state.can_submit());
            }

            let outcome = submitter.submit(&form).await;
            store.release();

            outcome
        };

        let (first, second) = tokio::join!(first, second);

        assert!(matches!(first, Outcome::Submitted { .. }));
        assert_eq!(second, Outcome::InFlight);
        assert_eq!(store.attempts(), 1);

        let state = lock(&form);
        assert_eq!(state.phase(), Phase::Submitted);
        assert!(state.values().all(|(_, v)| *v == FieldValue::Empty));
    }

    /// Submits a filled contact form and changes the job title while the
    /// insert is pending.
    async fn edit_while_pending(failing: bool) -> (Outcome, Arc<MockStore>, Mutex<FormState>) {
        let store = Arc::new(MockStore::gated());
        store.set_failing(failing);

        let form = Mutex::new(contact_form());
        fill_contact(&mut lock(&form));

        let submitter = submitter(store.clone());

        let submission = submitter.submit(&form);
        let edit = async {
            while lock(&form).phase() != Phase::Submitting {
                tokio::task::yield_now().await;
            }

            {
                let mut state = lock(&form);
                state.set_field("job_title", "Support Director").expect("set job title");
                assert_eq!(state.phase(), Phase::Submitting);
                assert_eq!(state.snapshot().feedback, Feedback::Pending);
            }

            store.release();
        };

        let (outcome, ()) = tokio::join!(submission, edit);

        (outcome, store, form)
    }

    #[tokio::test]
    async fn edits_while_pending_are_kept_on_failure() {
        let (outcome, store, form) = edit_while_pending(true).await;

        assert!(matches!(outcome, Outcome::Failed { .. }));
        assert!(store.records().is_empty());

        let state = lock(&form);
        assert_eq!(state.phase(), Phase::Failed);
        assert_eq!(state.value("job_title"), Some(&FieldValue::from("Support Director")));
        assert!(state.can_submit());
    }

    #[tokio::test]
    async fn edits_while_pending_are_not_sent() {
        let (outcome, store, form) = edit_while_pending(false).await;

        assert!(matches!(outcome, Outcome::Submitted { .. }));

        let records = store.records();
        assert_eq!(records[0].1.get("job_title"), Some(&json!("Head of Support")));

        let state = lock(&form);
        assert_eq!(state.phase(), Phase::Submitted);
        assert_eq!(state.value("job_title"), Some(&FieldValue::Empty));
    }

    #[tokio::test]
    async fn observers_follow_the_submission() {
        for &failing in &[false, true] {
            let store = Arc::new(MockStore::new());
            store.set_failing(failing);

            let form = Mutex::new(contact_form());
            fill_contact(&mut lock(&form));

            let seen: Arc<Mutex<Vec<(Phase, Feedback)>>> = Arc::new(Mutex::new(vec![]));
            let sink = seen.clone();
            lock(&form).subscribe(move |snapshot| {
                sink.lock()
                    .unwrap()
                    .push((snapshot.phase, snapshot.feedback.clone()))
            });

            submitter(store).submit(&form).await;

            let seen = seen.lock().unwrap();
            let phases: Vec<Phase> = seen.iter().map(|(phase, _)| *phase).collect();
            let settled = if failing { Phase::Failed } else { Phase::Submitted };
            assert_eq!(phases, vec![Phase::Submitting, settled]);

            assert_eq!(seen[0].1, Feedback::Pending);
            match (&seen[1].1, failing) {
                (Feedback::Success { title, .. }, false) => {
                    assert_eq!(title, "Consultation Request Submitted!")
                }
                (Feedback::Error { title, .. }, true) => assert_eq!(title, "Submission Failed"),
                (other, _) => panic!("unexpected feedback {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn invalid_forms_are_not_sent() {
        let store = Arc::new(MockStore::new());
        let form = Mutex::new(contact_form());
        fill_contact(&mut lock(&form));
        lock(&form)
            .set_field("services", Vec::<String>::new())
            .expect("clear services");

        match submitter(store.clone()).submit(&form).await {
            Outcome::Invalid(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations["services"].kind, ViolationKind::Missing);
                assert_eq!(violations["services"].message, "Please select at least one service");
            }
            other => panic!("expected invalid outcome, got {:?}", other),
        }

        assert_eq!(store.attempts(), 0);
        assert_eq!(lock(&form).phase(), Phase::Incomplete);
    }

    #[tokio::test]
    async fn editing_after_success_starts_over() {
        let store = Arc::new(MockStore::new());
        let form = Mutex::new(contact_form());
        fill_contact(&mut lock(&form));

        submitter(store).submit(&form).await;

        let mut state = lock(&form);
        state.set_field("first_name", "Jordan").expect("set first name");
        assert_eq!(state.phase(), Phase::Incomplete);
        assert_eq!(state.snapshot().feedback, Feedback::Idle);
    }
}
