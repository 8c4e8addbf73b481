#![warn(missing_docs)]

//! Renders QR codes for page elements that carry their text in a marker
//! attribute (`data-qr` by default).
//!
//! Symbol encoding is delegated to the [`qrcode`] crate. This crate scales the
//! module grid to a fixed size, as SVG markup or as canvas pixels, and walks
//! the page.
//!
//! ```
//! let svg = mfa_qr::render_svg("otpauth://totp/Example:alice?secret=JBSWY3DP", 200)?;
//! assert!(svg.starts_with("<svg"));
//! # Ok::<(), mfa_qr::QrError>(())
//! ```

mod error;
pub use error::*;

mod svg;
pub use svg::*;

mod surface;
pub use surface::*;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod web;
#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub use web::*;
