use thiserror::Error;

/// Errors produced while rendering QR codes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QrError {
    /// The text does not fit in any QR symbol.
    #[error("Unable to encode QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// The element could not be updated.
    #[error("Unable to update element: {0}")]
    Dom(String),
}
