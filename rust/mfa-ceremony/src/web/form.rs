use crate::{Form, FormError, FormLocator, Submission};
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlFormElement, HtmlInputElement};

/// Finds marked forms in a DOM document.
#[derive(Debug, Clone)]
pub struct DomLocator {
    document: Document,
}

impl DomLocator {
    /// A locator searching `document`.
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl FormLocator for DomLocator {
    type Form = DomForm;

    fn locate(&self, marker: &str) -> Option<DomForm> {
        let element = match self.document.query_selector(&format!("form[{marker}]")) {
            Ok(element) => element?,
            Err(error) => {
                tracing::warn!(marker, ?error, "Invalid form marker");
                return None;
            }
        };
        element.dyn_into::<HtmlFormElement>().ok().map(DomForm)
    }
}

/// A `<form>` element.
#[derive(Debug, Clone)]
pub struct DomForm(HtmlFormElement);

impl DomForm {
    /// The underlying element.
    pub fn element(&self) -> &HtmlFormElement {
        &self.0
    }

    fn input(&self, name: &str) -> Result<HtmlInputElement, FormError> {
        self.0
            .query_selector(&format!("[name=\"{name}\"]"))
            .map_err(|error| FormError(format!("invalid field name '{name}': {error:?}")))?
            .ok_or_else(|| FormError(format!("form has no field named '{name}'")))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| FormError(format!("field '{name}' is not an input")))
    }
}

impl From<HtmlFormElement> for DomForm {
    fn from(element: HtmlFormElement) -> Self {
        Self(element)
    }
}

impl Form for DomForm {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn field(&self, name: &str) -> Result<String, FormError> {
        Ok(self.input(name)?.value())
    }

    fn set_field(&self, name: &str, value: &str) -> Result<(), FormError> {
        self.input(name)?.set_value(value);
        Ok(())
    }

    fn submit(&self) -> Result<(), FormError> {
        // `HTMLFormElement.submit()` does not fire another `submit` event.
        self.0
            .submit()
            .map_err(|error| FormError(format!("submit failed: {error:?}")))
    }
}

/// A DOM `submit` event.
#[derive(Debug)]
pub struct DomSubmission(Event);

impl DomSubmission {
    /// Wrap `event`.
    pub fn new(event: Event) -> Self {
        Self(event)
    }
}

impl Submission for DomSubmission {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}
