use crate::AdapterError;

/// Surfaces a failed submission attempt to the user.
pub trait Notifier {
    /// Show `error` to the user.
    fn notify(&self, error: &AdapterError);
}
