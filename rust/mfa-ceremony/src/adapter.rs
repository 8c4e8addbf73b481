use crate::{
    AdapterError, AdapterSettings, CeremonyError, CeremonyProvider, Form, FormLocator, Notifier,
    Submission,
};
use futures::future::LocalBoxFuture;
use mfa_wire::{Transport, WireError};
use std::{future::Future, marker::PhantomData, rc::Rc};
use tracing::{debug, warn};

/// One direction of the credential ceremony.
///
/// Ties together the marker that identifies the form, the options decoded
/// from it, the provider operation that runs, and the result posted back.
pub trait Ceremony {
    /// Options embedded in the form.
    type Options: Transport;
    /// Result written into the form's result field.
    type Output: Transport;

    /// Name used in logs.
    const NAME: &'static str;

    /// The marker attribute of this ceremony's form.
    fn marker(settings: &AdapterSettings) -> &str;

    /// Run the ceremony.
    fn perform<'a, P>(
        provider: &'a P,
        options: &'a Self::Options,
    ) -> impl Future<Output = Result<Self::Output, CeremonyError>> + 'a
    where
        P: CeremonyProvider + ?Sized;
}

/// A form bound to one ceremony.
///
/// Options are decoded exactly once, when the adapter is installed. A
/// payload that fails to decode does not stop installation: the adapter still
/// takes over the form so the failure is reported on submission instead of
/// the form posting garbage to the server.
pub struct Adapter<C, F, P, N>
where
    C: Ceremony,
{
    form: F,
    options: Result<C::Options, WireError>,
    provider: P,
    notifier: N,
    result_field: String,
    ceremony: PhantomData<C>,
}

impl<C, F, P, N> Adapter<C, F, P, N>
where
    C: Ceremony,
    F: Form,
    P: CeremonyProvider,
    N: Notifier,
{
    /// Find this ceremony's form and bind to it.
    ///
    /// Returns `None`, having touched nothing, when the page has no such form.
    pub fn install<L>(
        locator: &L,
        provider: P,
        notifier: N,
        settings: &AdapterSettings,
    ) -> Option<Self>
    where
        L: FormLocator<Form = F>,
    {
        let marker = C::marker(settings);
        let Some(form) = locator.locate(marker) else {
            debug!(ceremony = C::NAME, marker, "No form to bind");
            return None;
        };

        let options = C::Options::decode(&form.attribute(marker).unwrap_or_default());
        match &options {
            Ok(_) => debug!(ceremony = C::NAME, marker, "Bound form"),
            Err(error) => warn!(ceremony = C::NAME, %error, "Bound form with unusable options"),
        }

        Some(Self {
            form,
            options,
            provider,
            notifier,
            result_field: settings.result_field.clone(),
            ceremony: PhantomData,
        })
    }

    /// The bound form.
    pub fn form(&self) -> &F {
        &self.form
    }

    /// The options decoded at installation.
    pub fn options(&self) -> Result<&C::Options, &WireError> {
        self.options.as_ref()
    }

    /// Run one submission attempt.
    ///
    /// On success the result field has been written and the form submitted,
    /// once each. On failure neither has happened and the error has been
    /// passed to the notifier.
    pub async fn submit(&self) -> Result<(), AdapterError> {
        let outcome = self.attempt().await;
        match &outcome {
            Ok(()) => debug!(ceremony = C::NAME, "Ceremony completed; form submitted"),
            Err(error) => {
                warn!(ceremony = C::NAME, %error, "Ceremony failed");
                self.notifier.notify(error);
            }
        }
        outcome
    }

    async fn attempt(&self) -> Result<(), AdapterError> {
        let options = self
            .options
            .as_ref()
            .map_err(|error| AdapterError::Options(error.clone()))?;

        let output = C::perform(&self.provider, options).await?;
        let encoded = output.encode().map_err(AdapterError::Result)?;

        let previous = self.form.field(&self.result_field)?;
        self.form.set_field(&self.result_field, &encoded)?;
        if let Err(error) = self.form.submit() {
            // The result must not linger in a form that was never sent.
            if let Err(restore) = self.form.set_field(&self.result_field, &previous) {
                warn!(
                    ceremony = C::NAME,
                    field = %self.result_field,
                    error = %restore,
                    "Unable to clear the result of an unsent form"
                );
            }
            return Err(error.into());
        }

        Ok(())
    }
}

impl<C, F, P, N> Adapter<C, F, P, N>
where
    C: Ceremony + 'static,
    F: Form + 'static,
    P: CeremonyProvider + 'static,
    N: Notifier + 'static,
{
    /// Handle a `submit` event.
    ///
    /// The default submission is prevented before this returns, i.e. while the
    /// event is still being dispatched; the ceremony itself runs when the
    /// returned future is polled.
    pub fn intercept(
        self: Rc<Self>,
        submission: &dyn Submission,
    ) -> LocalBoxFuture<'static, Result<(), AdapterError>> {
        submission.prevent_default();
        Box::pin(async move { self.submit().await })
    }
}

impl<C, F, P, N> std::fmt::Debug for Adapter<C, F, P, N>
where
    C: Ceremony,
    F: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("ceremony", &C::NAME)
            .field("form", &self.form)
            .field("options", &self.options.as_ref().map(|_| "decoded"))
            .field("result_field", &self.result_field)
            .finish()
    }
}
