use crate::Transport;
use serde::{Deserialize, Serialize};

// Fields are declared in DAG-CBOR key order (shorter keys first) so the
// in-memory layout reads the same as the encoded map.

/// Outcome of a registration ceremony, as posted back to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attestation {
    /// `response.clientDataJSON`, verbatim.
    #[serde(with = "serde_bytes")]
    pub client_data: Vec<u8>,
    /// `response.attestationObject`, verbatim.
    #[serde(with = "serde_bytes")]
    pub attestation_object: Vec<u8>,
}

impl Transport for Attestation {}

/// Outcome of an authentication ceremony, as posted back to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assertion {
    /// `response.signature`, verbatim.
    #[serde(with = "serde_bytes")]
    pub signature: Vec<u8>,
    /// `response.clientDataJSON`, verbatim.
    #[serde(with = "serde_bytes")]
    pub client_data: Vec<u8>,
    /// `rawId` of the credential that answered.
    #[serde(with = "serde_bytes")]
    pub credential_id: Vec<u8>,
    /// `response.authenticatorData`, verbatim.
    #[serde(with = "serde_bytes")]
    pub authenticator_data: Vec<u8>,
}

impl Transport for Assertion {}

/// Server side: parse the result field of a submitted registration form.
pub fn decode_attestation(text: &str) -> Result<Attestation, crate::WireError> {
    Attestation::decode(text)
}

/// Server side: parse the result field of a submitted authentication form.
pub fn decode_assertion(text: &str) -> Result<Assertion, crate::WireError> {
    Assertion::decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_reproduces_attestation_bytes_exactly() {
        let attestation_object: Vec<u8> = (0u8..16).collect();
        let client_data: Vec<u8> = (0u8..37).map(|byte| byte.wrapping_mul(7)).collect();
        let attestation = Attestation {
            client_data: client_data.clone(),
            attestation_object: attestation_object.clone(),
        };

        let decoded = decode_attestation(&attestation.encode().unwrap()).unwrap();

        assert_eq!(decoded.attestation_object, attestation_object);
        assert_eq!(decoded.client_data, client_data);
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_keeps_non_utf8_client_data_intact() {
        let assertion = Assertion {
            signature: vec![0xff, 0xfe, 0x00],
            client_data: vec![0xc3, 0x28, 0xa0, 0xa1],
            credential_id: vec![0x80],
            authenticator_data: vec![],
        };

        let decoded = decode_assertion(&assertion.encode().unwrap()).unwrap();

        assert_eq!(decoded, assertion);
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_orders_assertion_keys_canonically() {
        let text = Assertion {
            signature: vec![],
            client_data: vec![],
            credential_id: vec![],
            authenticator_data: vec![],
        }
        .encode()
        .unwrap();

        let position = |key: &str| text.find(&hex::encode(key)).unwrap();
        assert!(position("signature") < position("clientData"));
        assert!(position("clientData") < position("credentialId"));
        assert!(position("credentialId") < position("authenticatorData"));
    }
}
