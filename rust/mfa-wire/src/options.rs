//! Ceremony options issued by the server and embedded in the page.
//!
//! The shapes mirror the dictionaries accepted by
//! `navigator.credentials.create()` and `navigator.credentials.get()`:
//! field names are camelCase on the wire, binary members are CBOR byte
//! strings, and optional members are omitted rather than encoded as null.

use crate::Transport;
use ipld_core::ipld::Ipld;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Client extension inputs, carried through to the platform untouched.
pub type Extensions = BTreeMap<String, Ipld>;

/// Argument of `navigator.credentials.create()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCreationOptions {
    /// Options for the public-key credential being created.
    pub public_key: PublicKeyCredentialCreationOptions,
}

impl Transport for CredentialCreationOptions {}

/// Argument of `navigator.credentials.get()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequestOptions {
    /// Options for the assertion being requested.
    pub public_key: PublicKeyCredentialRequestOptions,
}

impl Transport for CredentialRequestOptions {}

/// Registration ceremony parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialCreationOptions {
    /// The relying party the credential is scoped to.
    pub rp: RelyingParty,
    /// The account the credential is created for.
    pub user: UserEntity,
    /// Server-generated nonce the authenticator signs over.
    #[serde(with = "serde_bytes")]
    pub challenge: Vec<u8>,
    /// Acceptable key types, most preferred first.
    pub pub_key_cred_params: Vec<CredentialParameters>,
    /// Ceremony timeout hint in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    /// Credentials already registered for this user.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_credentials: Vec<CredentialDescriptor>,
    /// Constraints on which authenticators may take part.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_selection: Option<AuthenticatorSelection>,
    /// How much attestation the relying party wants to see.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<AttestationConveyance>,
    /// Client extension inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}

/// Authentication ceremony parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCredentialRequestOptions {
    /// Server-generated nonce the authenticator signs over.
    #[serde(with = "serde_bytes")]
    pub challenge: Vec<u8>,
    /// Ceremony timeout hint in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    /// Relying party identifier; the platform defaults it to the page origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rp_id: Option<String>,
    /// Credentials that may answer the request. Empty means any
    /// discoverable credential.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow_credentials: Vec<CredentialDescriptor>,
    /// Whether the authenticator must verify the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_verification: Option<UserVerification>,
    /// Client extension inputs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Extensions>,
}

/// Relying party entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelyingParty {
    /// Domain the credential is bound to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable name shown by the authenticator.
    pub name: String,
}

/// User entity for registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    /// Opaque user handle.
    #[serde(with = "serde_bytes")]
    pub id: Vec<u8>,
    /// Account name, e.g. a username or email address.
    pub name: String,
    /// Name shown to the user by the authenticator.
    pub display_name: String,
}

/// The only credential type the platform API defines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialType {
    /// `"public-key"`
    #[default]
    #[serde(rename = "public-key")]
    PublicKey,
}

impl CredentialType {
    /// The name the platform API uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            CredentialType::PublicKey => "public-key",
        }
    }
}

/// One acceptable key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialParameters {
    /// Credential type.
    #[serde(rename = "type")]
    pub kind: CredentialType,
    /// COSE algorithm identifier (`-7` is ES256, `-257` is RS256).
    pub alg: i64,
}

/// Reference to an existing credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDescriptor {
    /// Credential type.
    #[serde(rename = "type")]
    pub kind: CredentialType,
    /// Raw credential id.
    #[serde(with = "serde_bytes")]
    pub id: Vec<u8>,
    /// Transport hints, e.g. `"usb"` or `"internal"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transports: Option<Vec<String>>,
}

impl CredentialDescriptor {
    /// A descriptor for a public-key credential without transport hints.
    pub fn public_key(id: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: CredentialType::PublicKey,
            id: id.into(),
            transports: None,
        }
    }
}

/// Authenticator selection criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatorSelection {
    /// Platform or roaming authenticator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_attachment: Option<AuthenticatorAttachment>,
    /// Whether a discoverable credential should be created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resident_key: Option<ResidentKeyRequirement>,
    /// Legacy form of `resident_key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_resident_key: Option<bool>,
    /// Whether the authenticator must verify the user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_verification: Option<UserVerification>,
}

/// Authenticator attachment modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthenticatorAttachment {
    /// Built into the client device.
    Platform,
    /// Removable, e.g. a security key.
    CrossPlatform,
}

impl AuthenticatorAttachment {
    /// The name the platform API uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticatorAttachment::Platform => "platform",
            AuthenticatorAttachment::CrossPlatform => "cross-platform",
        }
    }
}

/// Discoverable credential requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResidentKeyRequirement {
    #[allow(missing_docs)]
    Discouraged,
    #[allow(missing_docs)]
    Preferred,
    #[allow(missing_docs)]
    Required,
}

impl ResidentKeyRequirement {
    /// The name the platform API uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResidentKeyRequirement::Discouraged => "discouraged",
            ResidentKeyRequirement::Preferred => "preferred",
            ResidentKeyRequirement::Required => "required",
        }
    }
}

/// User verification requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserVerification {
    #[allow(missing_docs)]
    Required,
    #[allow(missing_docs)]
    Preferred,
    #[allow(missing_docs)]
    Discouraged,
}

impl UserVerification {
    /// The name the platform API uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserVerification::Required => "required",
            UserVerification::Preferred => "preferred",
            UserVerification::Discouraged => "discouraged",
        }
    }
}

/// Attestation conveyance preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttestationConveyance {
    #[allow(missing_docs)]
    None,
    #[allow(missing_docs)]
    Indirect,
    #[allow(missing_docs)]
    Direct,
    #[allow(missing_docs)]
    Enterprise,
}

impl AttestationConveyance {
    /// The name the platform API uses.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttestationConveyance::None => "none",
            AttestationConveyance::Indirect => "indirect",
            AttestationConveyance::Direct => "direct",
            AttestationConveyance::Enterprise => "enterprise",
        }
    }
}
