#![warn(missing_docs)]

//! Transport encoding shared by the browser ceremony adapter and the server
//! that issues challenges and verifies their results.
//!
//! Everything that crosses the page boundary travels in one textual format,
//! [`WireFormat::CborHex`]: the value is serialized as DAG-CBOR (so binary
//! fields stay CBOR byte strings and map keys come out in canonical order) and
//! the resulting bytes are written as lowercase hexadecimal.
//!
//! ```text
//!   server                         page                          server
//!   CredentialCreationOptions ──▸ data-fido2-create ──▸ create()
//!                                                         │
//!   decode_attestation ◂──────── <input name=code> ◂── Attestation
//! ```
//!
//! Both halves of the contract live here so the encoder and the decoder can
//! never drift apart: the page uses [`Transport::decode`] on options and
//! [`Transport::encode`] on results, the server does the reverse.

mod error;
pub use error::WireError;

mod format;
pub use format::*;

pub mod options;
pub use options::*;

mod result;
pub use result::*;
