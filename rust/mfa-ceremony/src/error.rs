//! Error types for the ceremony adapter.

use mfa_wire::WireError;
use thiserror::Error;

/// Failures reported by a [`CeremonyProvider`](crate::CeremonyProvider).
///
/// The browser implementation maps the `DOMException` names thrown by
/// `navigator.credentials` onto these variants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CeremonyError {
    /// The user cancelled, the prompt timed out, or the platform refused
    /// (`NotAllowedError`).
    #[error("The operation either timed out or was not allowed: {0}")]
    NotAllowed(String),

    /// The authenticator already holds an excluded credential
    /// (`InvalidStateError`).
    #[error("This authenticator is already registered: {0}")]
    InvalidState(String),

    /// No requested algorithm or option is supported (`NotSupportedError`).
    #[error("The requested options are not supported: {0}")]
    NotSupported(String),

    /// The relying party id does not match the page origin (`SecurityError`).
    #[error("The relying party is not valid for this page: {0}")]
    Security(String),

    /// The ceremony was aborted (`AbortError`).
    #[error("The operation was aborted: {0}")]
    Aborted(String),

    /// `navigator.credentials` is missing from this environment.
    #[error("Public-key credentials are not available: {0}")]
    Unavailable(String),

    /// Any other rejection, including malformed platform responses.
    #[error("The authenticator reported an error: {0}")]
    Platform(String),
}

impl CeremonyError {
    /// Map a `DOMException` name and message onto a variant.
    pub fn from_dom_exception(name: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match name {
            "NotAllowedError" => CeremonyError::NotAllowed(message),
            "InvalidStateError" => CeremonyError::InvalidState(message),
            "NotSupportedError" => CeremonyError::NotSupported(message),
            "SecurityError" => CeremonyError::Security(message),
            "AbortError" => CeremonyError::Aborted(message),
            _ if name.is_empty() => CeremonyError::Platform(message),
            _ => CeremonyError::Platform(format!("{name}: {message}")),
        }
    }
}

/// A form operation failed (missing result field, submit refused).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Form error: {0}")]
pub struct FormError(pub String);

/// Everything a submission attempt can fail with.
///
/// Each variant is surfaced to the user; none of them leaves the result field
/// written or the form submitted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdapterError {
    /// The options payload embedded in the form could not be decoded.
    #[error("Invalid ceremony options: {0}")]
    Options(WireError),

    /// The platform ceremony was rejected.
    #[error(transparent)]
    Ceremony(#[from] CeremonyError),

    /// The ceremony result could not be encoded.
    #[error("Unable to encode the ceremony result: {0}")]
    Result(WireError),

    /// Writing the result or resubmitting the form failed.
    #[error(transparent)]
    Form(#[from] FormError),
}
