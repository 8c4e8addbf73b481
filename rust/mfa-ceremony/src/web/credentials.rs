//! `navigator.credentials` as a [`CeremonyProvider`].

use crate::{CeremonyError, CeremonyProvider};
use ipld_core::ipld::Ipld;
use js_sys::{Array, Object, Reflect, Uint8Array};
use mfa_wire::{
    Assertion, Attestation, AuthenticatorSelection, CredentialCreationOptions,
    CredentialDescriptor, CredentialRequestOptions, Extensions, PublicKeyCredentialCreationOptions,
    PublicKeyCredentialRequestOptions,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Runs ceremonies through the browser's Web Authentication API.
#[derive(Debug, Clone, Copy, Default)]
pub struct NavigatorCredentials;

impl NavigatorCredentials {
    /// The provider for the current global scope.
    pub fn new() -> Self {
        Self
    }

    async fn call<F>(&self, request: F) -> Result<JsValue, CeremonyError>
    where
        F: FnOnce(&web_sys::CredentialsContainer) -> Result<js_sys::Promise, JsValue>,
    {
        let container = web_sys::window()
            .ok_or_else(|| CeremonyError::Unavailable("no window in this scope".into()))?
            .navigator()
            .credentials();
        // Browsers without WebAuthn expose no `credentials` member at all.
        if JsValue::from(container.clone()).is_undefined() {
            return Err(CeremonyError::Unavailable(
                "navigator.credentials is undefined".into(),
            ));
        }

        let promise = request(&container).map_err(|error| rejection(&error))?;
        let credential = JsFuture::from(promise)
            .await
            .map_err(|error| rejection(&error))?;

        if credential.is_null() || credential.is_undefined() {
            return Err(CeremonyError::Platform("no credential was returned".into()));
        }
        Ok(credential)
    }
}

#[async_trait::async_trait(?Send)]
impl CeremonyProvider for NavigatorCredentials {
    async fn create(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<Attestation, CeremonyError> {
        let wrapper = Object::new();
        set_property(&wrapper, "publicKey", &creation_options(&options.public_key)?)?;

        let credential = self
            .call(|container| container.create_with_options(wrapper.unchecked_ref()))
            .await?;
        let response = property(&credential, "response")?;

        Ok(Attestation {
            client_data: extract_response_field(&response, "clientDataJSON")?,
            attestation_object: extract_response_field(&response, "attestationObject")?,
        })
    }

    async fn get(&self, options: &CredentialRequestOptions) -> Result<Assertion, CeremonyError> {
        let wrapper = Object::new();
        set_property(&wrapper, "publicKey", &request_options(&options.public_key)?)?;

        let credential = self
            .call(|container| container.get_with_options(wrapper.unchecked_ref()))
            .await?;
        let response = property(&credential, "response")?;

        Ok(Assertion {
            signature: extract_response_field(&response, "signature")?,
            client_data: extract_response_field(&response, "clientDataJSON")?,
            credential_id: extract_response_field(&credential, "rawId")?,
            authenticator_data: extract_response_field(&response, "authenticatorData")?,
        })
    }
}

fn creation_options(options: &PublicKeyCredentialCreationOptions) -> Result<Object, CeremonyError> {
    let public_key = Object::new();

    let rp = Object::new();
    if let Some(id) = &options.rp.id {
        set_property(&rp, "id", &JsValue::from_str(id))?;
    }
    set_property(&rp, "name", &JsValue::from_str(&options.rp.name))?;
    set_property(&public_key, "rp", &rp)?;

    let user = Object::new();
    set_property(&user, "id", &Uint8Array::from(options.user.id.as_slice()))?;
    set_property(&user, "name", &JsValue::from_str(&options.user.name))?;
    set_property(
        &user,
        "displayName",
        &JsValue::from_str(&options.user.display_name),
    )?;
    set_property(&public_key, "user", &user)?;

    set_property(
        &public_key,
        "challenge",
        &Uint8Array::from(options.challenge.as_slice()),
    )?;

    let params = Array::new();
    for parameter in &options.pub_key_cred_params {
        let entry = Object::new();
        set_property(&entry, "type", &JsValue::from_str(parameter.kind.as_str()))?;
        set_property(&entry, "alg", &JsValue::from_f64(parameter.alg as f64))?;
        params.push(&entry);
    }
    set_property(&public_key, "pubKeyCredParams", &params)?;

    if let Some(timeout) = options.timeout {
        set_property(&public_key, "timeout", &JsValue::from_f64(timeout.into()))?;
    }
    if !options.exclude_credentials.is_empty() {
        set_property(
            &public_key,
            "excludeCredentials",
            &descriptors(&options.exclude_credentials)?,
        )?;
    }
    if let Some(selection) = &options.authenticator_selection {
        set_property(
            &public_key,
            "authenticatorSelection",
            &authenticator_selection(selection)?,
        )?;
    }
    if let Some(attestation) = options.attestation {
        set_property(
            &public_key,
            "attestation",
            &JsValue::from_str(attestation.as_str()),
        )?;
    }
    if let Some(extensions) = &options.extensions {
        set_property(&public_key, "extensions", &extension_inputs(extensions)?)?;
    }

    Ok(public_key)
}

fn request_options(options: &PublicKeyCredentialRequestOptions) -> Result<Object, CeremonyError> {
    let public_key = Object::new();

    set_property(
        &public_key,
        "challenge",
        &Uint8Array::from(options.challenge.as_slice()),
    )?;
    if let Some(timeout) = options.timeout {
        set_property(&public_key, "timeout", &JsValue::from_f64(timeout.into()))?;
    }
    if let Some(rp_id) = &options.rp_id {
        set_property(&public_key, "rpId", &JsValue::from_str(rp_id))?;
    }
    if !options.allow_credentials.is_empty() {
        set_property(
            &public_key,
            "allowCredentials",
            &descriptors(&options.allow_credentials)?,
        )?;
    }
    if let Some(user_verification) = options.user_verification {
        set_property(
            &public_key,
            "userVerification",
            &JsValue::from_str(user_verification.as_str()),
        )?;
    }
    if let Some(extensions) = &options.extensions {
        set_property(&public_key, "extensions", &extension_inputs(extensions)?)?;
    }

    Ok(public_key)
}

fn descriptors(credentials: &[CredentialDescriptor]) -> Result<Array, CeremonyError> {
    let list = Array::new();
    for credential in credentials {
        let descriptor = Object::new();
        set_property(
            &descriptor,
            "type",
            &JsValue::from_str(credential.kind.as_str()),
        )?;
        set_property(
            &descriptor,
            "id",
            &Uint8Array::from(credential.id.as_slice()),
        )?;
        if let Some(transports) = &credential.transports {
            let hints: Array = transports
                .iter()
                .map(|transport| JsValue::from_str(transport))
                .collect();
            set_property(&descriptor, "transports", &hints)?;
        }
        list.push(&descriptor);
    }
    Ok(list)
}

fn authenticator_selection(selection: &AuthenticatorSelection) -> Result<Object, CeremonyError> {
    let object = Object::new();
    if let Some(attachment) = selection.authenticator_attachment {
        set_property(
            &object,
            "authenticatorAttachment",
            &JsValue::from_str(attachment.as_str()),
        )?;
    }
    if let Some(resident_key) = selection.resident_key {
        set_property(
            &object,
            "residentKey",
            &JsValue::from_str(resident_key.as_str()),
        )?;
    }
    if let Some(required) = selection.require_resident_key {
        set_property(&object, "requireResidentKey", &JsValue::from_bool(required))?;
    }
    if let Some(user_verification) = selection.user_verification {
        set_property(
            &object,
            "userVerification",
            &JsValue::from_str(user_verification.as_str()),
        )?;
    }
    Ok(object)
}

fn extension_inputs(extensions: &Extensions) -> Result<Object, CeremonyError> {
    let object = Object::new();
    for (name, value) in extensions {
        set_property(&object, name, &ipld_value(value)?)?;
    }
    Ok(object)
}

/// Largest integer a JavaScript number holds exactly.
const MAX_SAFE_INTEGER: u128 = (1 << 53) - 1;

/// Convert extension input data to the JS value the platform expects.
///
/// Byte strings become `Uint8Array`s, which every binary extension input
/// accepts as a `BufferSource`.
fn ipld_value(value: &Ipld) -> Result<JsValue, CeremonyError> {
    Ok(match value {
        Ipld::Null => JsValue::NULL,
        Ipld::Bool(flag) => JsValue::from_bool(*flag),
        Ipld::Integer(number) if number.unsigned_abs() <= MAX_SAFE_INTEGER => {
            JsValue::from_f64(*number as f64)
        }
        Ipld::Integer(number) => {
            return Err(CeremonyError::NotSupported(format!(
                "extension input {number} is not exactly representable in JavaScript"
            )));
        }
        Ipld::Float(number) => JsValue::from_f64(*number),
        Ipld::String(text) => JsValue::from_str(text),
        Ipld::Bytes(bytes) => Uint8Array::from(bytes.as_slice()).into(),
        Ipld::List(items) => {
            let list = Array::new();
            for item in items {
                list.push(&ipld_value(item)?);
            }
            list.into()
        }
        Ipld::Map(entries) => {
            let object = Object::new();
            for (key, item) in entries {
                set_property(&object, key, &ipld_value(item)?)?;
            }
            object.into()
        }
        Ipld::Link(cid) => JsValue::from_str(&cid.to_string()),
    })
}

/// Map a rejected promise onto a [`CeremonyError`] by its `DOMException` name.
fn rejection(error: &JsValue) -> CeremonyError {
    let name = Reflect::get(error, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
        .unwrap_or_default();
    let message = Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{error:?}"));
    CeremonyError::from_dom_exception(&name, message)
}

/// Member `key` of a platform object.
fn property(target: &JsValue, key: &str) -> Result<JsValue, CeremonyError> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(|error| {
        CeremonyError::Platform(format!("reading '{key}' threw {error:?}"))
    })
}

/// Set member `key` of an options dictionary under construction.
fn set_property(target: &Object, key: &str, value: &JsValue) -> Result<(), CeremonyError> {
    match Reflect::set(target, &JsValue::from_str(key), value) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CeremonyError::Platform(format!("'{key}' is read-only"))),
        Err(error) => Err(CeremonyError::Platform(format!(
            "writing '{key}' threw {error:?}"
        ))),
    }
}

/// Copy a binary member of the authenticator's response out of JS memory.
///
/// The platform hands these out as `ArrayBuffer`s; a missing member means the
/// response does not belong to the ceremony that was asked for.
fn extract_response_field(target: &JsValue, key: &str) -> Result<Vec<u8>, CeremonyError> {
    let buffer = property(target, key)?;
    if buffer.is_null() || buffer.is_undefined() {
        return Err(CeremonyError::Platform(format!(
            "authenticator response has no '{key}'"
        )));
    }
    Ok(Uint8Array::new(&buffer).to_vec())
}
