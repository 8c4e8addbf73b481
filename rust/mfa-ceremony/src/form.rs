//! The adapter's view of the page.
//!
//! Adapters never query global document state themselves; they are handed a
//! [`FormLocator`] and work through the [`Form`] it yields. The browser
//! implementation lives in `web`, an in-memory one in `helpers`.

use crate::FormError;

/// A form element the adapter reads options from and writes results into.
pub trait Form {
    /// Value of an attribute on the form element itself.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Current value of the named field.
    fn field(&self, name: &str) -> Result<String, FormError>;

    /// Set the value of the named field.
    fn set_field(&self, name: &str, value: &str) -> Result<(), FormError>;

    /// Submit the form programmatically, without dispatching another
    /// `submit` event.
    fn submit(&self) -> Result<(), FormError>;
}

/// Finds the form carrying a marker attribute.
pub trait FormLocator {
    /// The form type this locator yields.
    type Form: Form;

    /// The first form bearing `marker`, if any.
    fn locate(&self, marker: &str) -> Option<Self::Form>;
}

/// A submission the adapter intercepts.
pub trait Submission {
    /// Stop the browser's own synchronous submission.
    fn prevent_default(&self);
}
