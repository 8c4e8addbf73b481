use crate::WireError;
use serde::{Serialize, de::DeserializeOwned};

/// Versions of the transport representation.
///
/// Only one version exists. It is named so that the page and the server can
/// refer to the same thing, and so a future format has somewhere to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireFormat {
    /// DAG-CBOR bytes rendered as lowercase hexadecimal text.
    ///
    /// Decoding accepts either hex case but rejects anything else, including
    /// surrounding whitespace, and rejects bytes left over after the
    /// top-level CBOR value.
    CborHex,
}

impl WireFormat {
    /// The format written by this crate.
    pub const CURRENT: Self = Self::CborHex;

    /// Stable, human readable identifier of the format.
    pub fn name(&self) -> &'static str {
        match self {
            WireFormat::CborHex => "cbor-hex/1",
        }
    }

    /// Serialize `value` into transport text.
    pub fn encode<T>(&self, value: &T) -> Result<String, WireError>
    where
        T: Serialize + ?Sized,
    {
        match self {
            WireFormat::CborHex => {
                let bytes = serde_ipld_dagcbor::to_vec(value)
                    .map_err(|error| WireError::Encode(error.to_string()))?;
                Ok(hex::encode(bytes))
            }
        }
    }

    /// Parse transport text back into a `T`.
    pub fn decode<T>(&self, text: &str) -> Result<T, WireError>
    where
        T: DeserializeOwned,
    {
        match self {
            WireFormat::CborHex => {
                let bytes = hex::decode(text)?;
                serde_ipld_dagcbor::from_slice(&bytes)
                    .map_err(|error| WireError::Decode(error.to_string()))
            }
        }
    }
}

impl std::fmt::Display for WireFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Values that travel between page and server in the transport representation.
///
/// Implemented for the two option payloads and the two ceremony results;
/// both methods use [`WireFormat::CURRENT`].
pub trait Transport: Serialize + DeserializeOwned {
    /// Encode into transport text.
    fn encode(&self) -> Result<String, WireError> {
        WireFormat::CURRENT.encode(self)
    }

    /// Decode from transport text.
    fn decode(text: &str) -> Result<Self, WireError> {
        WireFormat::CURRENT.decode(text)
    }
}
