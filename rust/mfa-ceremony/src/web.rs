//! Browser bindings: DOM forms, `navigator.credentials` and `alert()`.
//!
//! ```ignore
//! let window = web_sys::window().expect("no window");
//! let settings = AdapterSettings::default();
//! mfa_ceremony::web::install::<Registration>(&window, &settings)?;
//! mfa_ceremony::web::install::<Authentication>(&window, &settings)?;
//! ```

mod credentials;
pub use credentials::*;

mod form;
pub use form::*;

use crate::{Adapter, AdapterError, AdapterSettings, Ceremony, CeremonyProvider, Notifier};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, Window};

/// Shows errors with `window.alert()`.
#[derive(Debug, Clone)]
pub struct AlertNotifier {
    window: Window,
}

impl AlertNotifier {
    /// A notifier alerting through `window`.
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Notifier for AlertNotifier {
    fn notify(&self, error: &AdapterError) {
        if let Err(error) = self.window.alert_with_message(&error.to_string()) {
            tracing::error!(?error, "Unable to show alert");
        }
    }
}

/// Route `submit` events of the adapter's form through the adapter.
///
/// The listener lives for the rest of the page's lifetime.
pub fn attach<C, P, N>(adapter: Rc<Adapter<C, DomForm, P, N>>) -> Result<(), JsValue>
where
    C: Ceremony + 'static,
    P: CeremonyProvider + 'static,
    N: Notifier + 'static,
{
    let target = adapter.form().element().clone();
    let listener = Closure::wrap(Box::new(move |event: Event| {
        let pending = Rc::clone(&adapter).intercept(&DomSubmission::new(event));
        // Failures were already logged and shown to the user.
        spawn_local(async move {
            let _ = pending.await;
        });
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback("submit", listener.as_ref().unchecked_ref())?;
    listener.forget();
    Ok(())
}

/// Bind ceremony `C` to its form in `window`'s document, if the page has one.
///
/// Returns whether a form was found.
pub fn install<C>(window: &Window, settings: &AdapterSettings) -> Result<bool, JsValue>
where
    C: Ceremony + 'static,
{
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    let adapter = Adapter::<C, _, _, _>::install(
        &DomLocator::new(document),
        NavigatorCredentials::new(),
        AlertNotifier::new(window.clone()),
        settings,
    );

    match adapter {
        Some(adapter) => {
            attach(Rc::new(adapter))?;
            Ok(true)
        }
        None => Ok(false),
    }
}
