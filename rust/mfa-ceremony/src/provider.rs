use crate::CeremonyError;
use mfa_wire::{Assertion, Attestation, CredentialCreationOptions, CredentialRequestOptions};

/// The platform's public-key credential capability.
///
/// In a browser this is `navigator.credentials`; tests substitute a scripted
/// implementation so no real authenticator is involved.
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait CeremonyProvider {
    /// Create a new credential (registration).
    async fn create(
        &self,
        options: &CredentialCreationOptions,
    ) -> Result<Attestation, CeremonyError>;

    /// Produce an assertion with an existing credential (authentication).
    async fn get(&self, options: &CredentialRequestOptions) -> Result<Assertion, CeremonyError>;
}
