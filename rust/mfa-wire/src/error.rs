use thiserror::Error;

/// Errors raised while moving values in or out of the transport representation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WireError {
    /// The text is not valid hexadecimal (odd length or a non-hex character).
    #[error("Transport text is not valid hex: {0}")]
    Hex(#[from] hex::FromHexError),

    /// The bytes are not a well-formed CBOR encoding of the expected value.
    #[error("Failed to decode transport value: {0}")]
    Decode(String),

    /// The value could not be serialized.
    #[error("Failed to encode transport value: {0}")]
    Encode(String),
}
