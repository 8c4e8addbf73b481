#![warn(missing_docs)]

//! Binds HTML forms to the platform's public-key credential ceremonies.
//!
//! A page carries at most one registration form and at most one
//! authentication form, each marked with an attribute whose value is the
//! server's encoded ceremony options (see [`mfa_wire`]). For each marked form
//! an [`Adapter`] is installed that:
//!
//! 1. decodes the options once, at installation;
//! 2. intercepts `submit`, preventing the browser's own submission;
//! 3. runs the ceremony through a [`CeremonyProvider`];
//! 4. on success writes the encoded result into the form's result field and
//!    submits the form programmatically;
//! 5. on failure tells the user through a [`Notifier`] and leaves the form
//!    untouched so the user can try again.
//!
//! # Modules
//!
//! - **[`registration`]** / **[`authentication`]**: the two ceremonies.
//! - **`web`** (`wasm32-unknown-unknown` only): DOM forms,
//!   `navigator.credentials` and `alert()`.
//! - **`helpers`** (feature `helpers`): in-memory forms, scripted providers and
//!   a recording notifier for tests.

mod error;
pub use error::*;

mod settings;
pub use settings::*;

mod form;
pub use form::*;

mod provider;
pub use provider::*;

mod notifier;
pub use notifier::*;

mod adapter;
pub use adapter::*;

pub mod authentication;
pub mod registration;

pub use authentication::{Authentication, AuthenticationAdapter};
pub use registration::{Registration, RegistrationAdapter};

#[cfg(any(test, feature = "helpers"))]
pub mod helpers;

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
pub mod web;
