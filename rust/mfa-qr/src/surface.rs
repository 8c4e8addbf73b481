use crate::{QrError, QrSymbol};
use tracing::{debug, warn};

/// Attribute that carries the text to encode.
pub const QR_MARKER: &str = "data-qr";

/// Edge length of the rendered square.
pub const QR_SIZE: u32 = 200;

/// Markup contract for QR rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSettings {
    /// Attribute that carries the text to encode.
    pub marker: String,
    /// Edge length of the rendered square.
    pub size: u32,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            marker: QR_MARKER.into(),
            size: QR_SIZE,
        }
    }
}

/// An element that displays a QR code.
pub trait QrElement {
    /// Value of an attribute on the element.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Display `symbol` as a `size`×`size` square.
    fn show(&self, symbol: &QrSymbol, size: u32) -> Result<(), QrError>;
}

/// The set of elements carrying a marker.
pub trait QrSurface {
    /// Element type yielded by this surface.
    type Element: QrElement;

    /// Every element bearing `marker`, in document order.
    fn elements(&self, marker: &str) -> Vec<Self::Element>;
}

/// Render every marked element on `surface`.
///
/// Returns how many elements now show a code. Elements whose text cannot be
/// encoded or updated are logged and skipped.
pub fn render_all<S>(surface: &S, settings: &QrSettings) -> usize
where
    S: QrSurface,
{
    let mut rendered = 0;
    for element in surface.elements(&settings.marker) {
        let text = element.attribute(&settings.marker).unwrap_or_default();
        match QrSymbol::encode(&text).and_then(|symbol| element.show(&symbol, settings.size)) {
            Ok(()) => rendered += 1,
            Err(error) => warn!(%error, length = text.len(), "Skipping QR element"),
        }
    }
    debug!(rendered, marker = %settings.marker, "Rendered QR codes");
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::{cell::RefCell, collections::BTreeMap, rc::Rc};

    #[cfg(all(target_arch = "wasm32", target_os = "unknown"))]
    use wasm_bindgen_test::wasm_bindgen_test;

    #[derive(Clone, Default)]
    struct Element {
        attributes: BTreeMap<String, String>,
        content: Rc<RefCell<Option<String>>>,
    }

    impl Element {
        fn marked(marker: &str, text: &str) -> Self {
            let mut element = Self::default();
            element.attributes.insert(marker.into(), text.into());
            element
        }

        fn content(&self) -> Option<String> {
            self.content.borrow().clone()
        }
    }

    impl QrElement for Element {
        fn attribute(&self, name: &str) -> Option<String> {
            self.attributes.get(name).cloned()
        }

        fn show(&self, symbol: &QrSymbol, size: u32) -> Result<(), QrError> {
            *self.content.borrow_mut() = Some(symbol.to_svg(size));
            Ok(())
        }
    }

    struct Page(Vec<Element>);

    impl QrSurface for Page {
        type Element = Element;

        fn elements(&self, marker: &str) -> Vec<Element> {
            self.0
                .iter()
                .filter(|element| element.attributes.contains_key(marker))
                .cloned()
                .collect()
        }
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_renders_identical_text_identically() {
        let first = Element::marked(QR_MARKER, "https://example.test/x");
        let second = Element::marked(QR_MARKER, "https://example.test/x");
        let page = Page(vec![first.clone(), second.clone()]);

        assert_eq!(render_all(&page, &QrSettings::default()), 2);

        let svg = first.content().unwrap();
        assert!(svg.contains(r#"width="200" height="200""#));
        assert_eq!(second.content(), Some(svg));
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_skips_unencodable_elements_and_carries_on() {
        let too_long = Element::marked(QR_MARKER, &"x".repeat(8_000));
        let fine = Element::marked(QR_MARKER, "otpauth://totp/Example:alice");
        let unmarked = Element::default();
        let page = Page(vec![too_long.clone(), fine.clone(), unmarked.clone()]);

        assert_eq!(render_all(&page, &QrSettings::default()), 1);
        assert_eq!(too_long.content(), None);
        assert!(fine.content().is_some());
        assert_eq!(unmarked.content(), None);
    }

    #[cfg_attr(all(target_arch = "wasm32", target_os = "unknown"), wasm_bindgen_test)]
    #[cfg_attr(not(all(target_arch = "wasm32", target_os = "unknown")), test)]
    fn it_honours_custom_settings() {
        let element = Element::marked("data-code", "hello");
        let page = Page(vec![element.clone()]);
        let settings = QrSettings {
            marker: "data-code".into(),
            size: 96,
        };

        assert_eq!(render_all(&page, &QrSettings::default()), 0);
        assert_eq!(render_all(&page, &settings), 1);
        assert!(element.content().unwrap().contains(r#"width="96""#));
    }
}
