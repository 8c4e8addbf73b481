//! In-memory stand-ins for the page and the platform.
//!
//! Each helper is cheap to clone and clones share state, so a test can hand
//! one copy to an [`Adapter`](crate::Adapter) and inspect another afterwards.

use crate::{
    AdapterError, CeremonyError, CeremonyProvider, Form, FormError, FormLocator, Notifier,
    Submission,
};
use mfa_wire::{Assertion, Attestation, CredentialCreationOptions, CredentialRequestOptions};
use parking_lot::Mutex;
use std::{
    cell::Cell,
    collections::{BTreeMap, VecDeque},
    sync::Arc,
};

#[derive(Debug, Default)]
struct FormState {
    attributes: BTreeMap<String, String>,
    fields: BTreeMap<String, String>,
    writes: Vec<(String, String)>,
    submissions: usize,
    refuse_submit: bool,
    write_limit: Option<usize>,
}

/// A form held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryForm(Arc<Mutex<FormState>>);

impl MemoryForm {
    /// An empty form with no attributes and no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute on the form element.
    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.lock().attributes.insert(name.into(), value.into());
        self
    }

    /// Add a field with an initial value.
    pub fn with_field(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.lock().fields.insert(name.into(), value.into());
        self
    }

    /// Make every [`Form::submit`] call fail.
    pub fn refusing_submit(self) -> Self {
        self.0.lock().refuse_submit = true;
        self
    }

    /// Make [`Form::set_field`] fail once `limit` writes have succeeded.
    pub fn with_write_limit(self, limit: usize) -> Self {
        self.0.lock().write_limit = Some(limit);
        self
    }

    /// Current value of a field.
    pub fn value(&self, name: &str) -> Option<String> {
        self.0.lock().fields.get(name).cloned()
    }

    /// Every `(field, value)` write made through [`Form::set_field`], in order.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.0.lock().writes.clone()
    }

    /// How many times the form was submitted.
    pub fn submissions(&self) -> usize {
        self.0.lock().submissions
    }
}

impl Form for MemoryForm {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.lock().attributes.get(name).cloned()
    }

    fn field(&self, name: &str) -> Result<String, FormError> {
        self.value(name)
            .ok_or_else(|| FormError(format!("form has no field named '{name}'")))
    }

    fn set_field(&self, name: &str, value: &str) -> Result<(), FormError> {
        let mut state = self.0.lock();
        if state
            .write_limit
            .is_some_and(|limit| state.writes.len() >= limit)
        {
            return Err(FormError(format!("field '{name}' is read-only")));
        }
        let Some(field) = state.fields.get_mut(name) else {
            return Err(FormError(format!("form has no field named '{name}'")));
        };
        *field = value.to_string();
        state.writes.push((name.to_string(), value.to_string()));
        Ok(())
    }

    fn submit(&self) -> Result<(), FormError> {
        let mut state = self.0.lock();
        if state.refuse_submit {
            return Err(FormError("submission refused".into()));
        }
        state.submissions += 1;
        Ok(())
    }
}

/// A page holding any number of [`MemoryForm`]s.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    forms: Vec<MemoryForm>,
}

impl MemoryDocument {
    /// A page without forms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a form to the page.
    pub fn with_form(mut self, form: MemoryForm) -> Self {
        self.forms.push(form);
        self
    }
}

impl FormLocator for MemoryDocument {
    type Form = MemoryForm;

    fn locate(&self, marker: &str) -> Option<MemoryForm> {
        self.forms
            .iter()
            .find(|form| form.attribute(marker).is_some())
            .cloned()
    }
}

/// A `submit` event that records whether its default was prevented.
#[derive(Debug, Default)]
pub struct MemorySubmission {
    prevented: Cell<bool>,
}

impl MemorySubmission {
    /// Whether [`Submission::prevent_default`] was called.
    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl Submission for MemorySubmission {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

#[derive(Debug, Default)]
struct Script {
    attestations: Mutex<VecDeque<Result<Attestation, CeremonyError>>>,
    assertions: Mutex<VecDeque<Result<Assertion, CeremonyError>>>,
    creation_requests: Mutex<Vec<CredentialCreationOptions>>,
    assertion_requests: Mutex<Vec<CredentialRequestOptions>>,
}

/// A [`CeremonyProvider`] that answers from a queue of prepared outcomes
/// and remembers the options it was called with.
///
/// Calls beyond the prepared outcomes fail with [`CeremonyError::Platform`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider(Arc<Script>);

impl ScriptedProvider {
    /// Queue the outcome of the next `create` call.
    pub fn then_create(self, outcome: Result<Attestation, CeremonyError>) -> Self {
        self.0.attestations.lock().push_back(outcome);
        self
    }

    /// Queue the outcome of the next `get` call.
    pub fn then_get(self, outcome: Result<Assertion, CeremonyError>) -> Self {
        self.0.assertions.lock().push_back(outcome);
        self
    }

    /// Options passed to every `create` call so far.
    pub fn creation_requests(&self) -> Vec<CredentialCreationOptions> {
        self.0.creation_requests.lock().clone()
    }

    /// Options passed to every `get` call so far.
    pub fn assertion_requests(&self) -> Vec<CredentialRequestOptions> {
        self.0.assertion_requests.lock().clone()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
impl CeremonyProvider for ScriptedProvider {
    async fn create(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<Attestation, CeremonyError> {
        self.0.creation_requests.lock().push(options.clone());
        self.0
            .attestations
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(CeremonyError::Platform("no scripted attestation".into())))
    }

    async fn get(&self, options: &CredentialRequestOptions) -> Result<Assertion, CeremonyError> {
        self.0.assertion_requests.lock().push(options.clone());
        self.0
            .assertions
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(CeremonyError::Platform("no scripted assertion".into())))
    }
}

/// A [`Notifier`] that keeps every error it is shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier(Arc<Mutex<Vec<AdapterError>>>);

impl RecordingNotifier {
    /// Errors shown so far, oldest first.
    pub fn notifications(&self) -> Vec<AdapterError> {
        self.0.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, error: &AdapterError) {
        self.0.lock().push(error.clone());
    }
}
