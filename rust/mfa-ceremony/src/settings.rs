/// Marker attribute on the registration form; its value is the encoded
/// [`CredentialCreationOptions`](mfa_wire::CredentialCreationOptions).
pub const CREATE_MARKER: &str = "data-fido2-create";

/// Marker attribute on the authentication form; its value is the encoded
/// [`CredentialRequestOptions`](mfa_wire::CredentialRequestOptions).
pub const AUTH_MARKER: &str = "data-fido2-auth";

/// Name of the form field that receives the encoded ceremony result.
pub const RESULT_FIELD: &str = "code";

/// The markup contract an adapter binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterSettings {
    /// Attribute marking the registration form.
    pub create_marker: String,
    /// Attribute marking the authentication form.
    pub auth_marker: String,
    /// Field the encoded result is written into.
    pub result_field: String,
}

impl Default for AdapterSettings {
    fn default() -> Self {
        Self {
            create_marker: CREATE_MARKER.into(),
            auth_marker: AUTH_MARKER.into(),
            result_field: RESULT_FIELD.into(),
        }
    }
}
