//! Authentication: `navigator.credentials.get()` behind a form marked
//! `data-fido2-auth`.

use crate::{Adapter, AdapterSettings, Ceremony, CeremonyError, CeremonyProvider};
use mfa_wire::{Assertion, CredentialRequestOptions};
use std::future::Future;

/// The authentication ceremony.
#[derive(Debug, Clone, Copy)]
pub struct Authentication;

impl Ceremony for Authentication {
    type Options = CredentialRequestOptions;
    type Output = Assertion;

    const NAME: &'static str = "authentication";

    fn marker(settings: &AdapterSettings) -> &str {
        &settings.auth_marker
    }

    fn perform<'a, P>(
        provider: &'a P,
        options: &'a Self::Options,
    ) -> impl Future<Output = Result<Self::Output, CeremonyError>> + 'a
    where
        P: CeremonyProvider + ?Sized,
    {
        provider.get(options)
    }
}

/// An [`Adapter`] bound to the authentication form.
pub type AuthenticationAdapter<F, P, N> = Adapter<Authentication, F, P, N>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        AUTH_MARKER, AdapterError, RESULT_FIELD,
        helpers::{MemoryDocument, MemoryForm, MemorySubmission, RecordingNotifier, ScriptedProvider},
    };
    use anyhow::Result;
    use mfa_wire::{CredentialDescriptor, PublicKeyCredentialRequestOptions, Transport};
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use wasm_bindgen_test::wasm_bindgen_test;

    fn options() -> CredentialRequestOptions {
        CredentialRequestOptions {
            public_key: PublicKeyCredentialRequestOptions {
                challenge: vec![0x5a; 32],
                timeout: Some(60_000),
                rp_id: Some("example.test".into()),
                allow_credentials: vec![CredentialDescriptor::public_key(vec![3; 64])],
                user_verification: None,
                extensions: None,
            },
        }
    }

    fn assertion() -> Assertion {
        Assertion {
            signature: vec![0x30; 70],
            client_data: br#"{"type":"webauthn.get","challenge":"WlpaWg"}"#.to_vec(),
            credential_id: vec![3; 64],
            authenticator_data: vec![0x49; 37],
        }
    }

    fn page() -> Result<(MemoryDocument, MemoryForm)> {
        let form = MemoryForm::new()
            .with_attribute(AUTH_MARKER, options().encode()?)
            .with_field(RESULT_FIELD, "");
        Ok((MemoryDocument::new().with_form(form.clone()), form))
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), tokio::test)]
    async fn it_posts_the_assertion_back() -> Result<()> {
        let (document, form) = page()?;
        let provider = ScriptedProvider::default().then_get(Ok(assertion()));

        let adapter = Rc::new(
            AuthenticationAdapter::install(
                &document,
                provider.clone(),
                RecordingNotifier::default(),
                &AdapterSettings::default(),
            )
            .expect("form is present"),
        );

        let submission = MemorySubmission::default();
        Rc::clone(&adapter).intercept(&submission).await?;

        assert!(submission.default_prevented());
        assert_eq!(provider.assertion_requests(), vec![options()]);
        assert_eq!(form.submissions(), 1);
        assert_eq!(
            Assertion::decode(&form.value(RESULT_FIELD).unwrap())?,
            assertion()
        );
        Ok(())
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), tokio::test)]
    async fn it_reports_a_cancelled_ceremony_and_stays_put() -> Result<()> {
        let (document, form) = page()?;
        let provider = ScriptedProvider::default().then_get(Err(CeremonyError::NotAllowed(
            "The operation either timed out or was not allowed.".into(),
        )));
        let notifier = RecordingNotifier::default();

        let adapter = Rc::new(
            AuthenticationAdapter::install(
                &document,
                provider,
                notifier.clone(),
                &AdapterSettings::default(),
            )
            .expect("form is present"),
        );

        let submission = MemorySubmission::default();
        let outcome = Rc::clone(&adapter).intercept(&submission).await;

        assert!(submission.default_prevented());
        assert!(matches!(
            outcome,
            Err(AdapterError::Ceremony(CeremonyError::NotAllowed(_)))
        ));
        assert!(form.writes().is_empty());
        assert_eq!(form.value(RESULT_FIELD).as_deref(), Some(""));
        assert_eq!(form.submissions(), 0);
        assert_eq!(notifier.notifications().len(), 1);
        Ok(())
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), tokio::test)]
    async fn it_retries_with_the_same_options_after_a_failure() -> Result<()> {
        let (document, form) = page()?;
        let provider = ScriptedProvider::default()
            .then_get(Err(CeremonyError::Aborted("dismissed".into())))
            .then_get(Ok(assertion()));
        let notifier = RecordingNotifier::default();

        let adapter = Rc::new(
            AuthenticationAdapter::install(
                &document,
                provider.clone(),
                notifier.clone(),
                &AdapterSettings::default(),
            )
            .expect("form is present"),
        );

        let first = Rc::clone(&adapter).intercept(&MemorySubmission::default()).await;
        assert!(first.is_err());
        assert_eq!(form.submissions(), 0);

        Rc::clone(&adapter).intercept(&MemorySubmission::default()).await?;

        assert_eq!(form.submissions(), 1);
        assert_eq!(form.writes().len(), 1);
        assert_eq!(notifier.notifications().len(), 1);
        let requests = provider.assertion_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0], requests[1]);
        Ok(())
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), tokio::test)]
    async fn it_binds_only_to_its_own_marker() -> Result<()> {
        let registration = MemoryForm::new()
            .with_attribute("data-fido2-create", "00")
            .with_field(RESULT_FIELD, "");
        let (_, authentication) = page()?;
        let document = MemoryDocument::new()
            .with_form(registration.clone())
            .with_form(authentication.clone());

        let adapter = AuthenticationAdapter::install(
            &document,
            ScriptedProvider::default().then_get(Ok(assertion())),
            RecordingNotifier::default(),
            &AdapterSettings::default(),
        )
        .expect("form is present");
        adapter.submit().await?;

        assert_eq!(authentication.submissions(), 1);
        assert_eq!(registration.submissions(), 0);
        assert!(registration.writes().is_empty());
        Ok(())
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), tokio::test)]
    async fn it_honours_custom_markup_settings() -> Result<()> {
        let form = MemoryForm::new()
            .with_attribute("data-passkey-login", options().encode()?)
            .with_field("assertion", "");
        let document = MemoryDocument::new().with_form(form.clone());
        let settings = AdapterSettings {
            auth_marker: "data-passkey-login".into(),
            result_field: "assertion".into(),
            ..AdapterSettings::default()
        };

        let adapter = AuthenticationAdapter::install(
            &document,
            ScriptedProvider::default().then_get(Ok(assertion())),
            RecordingNotifier::default(),
            &settings,
        )
        .expect("form is present");
        adapter.submit().await?;

        assert_eq!(form.submissions(), 1);
        assert!(form.value("assertion").is_some_and(|value| !value.is_empty()));
        Ok(())
    }
}
