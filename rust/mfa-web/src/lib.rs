//! Browser entry point.
//!
//! Loading the module installs the registration and authentication adapters
//! on whichever marked forms the page contains and renders every `data-qr`
//! element, using the default markup contract. Nothing happens on native
//! targets.

#[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
mod entry {
    use anyhow::{Result, anyhow};
    use mfa_ceremony::{AdapterSettings, Authentication, Registration, web::install};
    use mfa_qr::{DomQrSurface, QrSettings, render_all};
    use wasm_bindgen::prelude::*;
    use web_sys::Window;

    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        setup(&window).map_err(|error| JsValue::from_str(&error.to_string()))
    }

    /// Bind the ceremony forms and draw the QR codes of `window`'s page.
    fn setup(window: &Window) -> Result<()> {
        let settings = AdapterSettings::default();
        let registration = install::<Registration>(window, &settings)
            .map_err(|error| anyhow!("registration form: {error:?}"))?;
        let authentication = install::<Authentication>(window, &settings)
            .map_err(|error| anyhow!("authentication form: {error:?}"))?;

        let document = window
            .document()
            .ok_or_else(|| anyhow!("window has no document"))?;
        let codes = render_all(&DomQrSurface::new(document), &QrSettings::default());

        tracing::debug!(registration, authentication, codes, "Page wired");
        Ok(())
    }
}
