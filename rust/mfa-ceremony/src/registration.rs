//! Registration: `navigator.credentials.create()` behind a form marked
//! `data-fido2-create`.

use crate::{Adapter, AdapterSettings, Ceremony, CeremonyError, CeremonyProvider};
use mfa_wire::{Attestation, CredentialCreationOptions};
use std::future::Future;

/// The registration ceremony.
#[derive(Debug, Clone, Copy)]
pub struct Registration;

impl Ceremony for Registration {
    type Options = CredentialCreationOptions;
    type Output = Attestation;

    const NAME: &'static str = "registration";

    fn marker(settings: &AdapterSettings) -> &str {
        &settings.create_marker
    }

    fn perform<'a, P>(
        provider: &'a P,
        options: &'a Self::Options,
    ) -> impl Future<Output = Result<Self::Output, CeremonyError>> + 'a
    where
        P: CeremonyProvider + ?Sized,
    {
        provider.create(options)
    }
}

/// An [`Adapter`] bound to the registration form.
pub type RegistrationAdapter<F, P, N> = Adapter<Registration, F, P, N>;
