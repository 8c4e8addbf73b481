use crate::{QrElement, QrError, QrSurface, QrSymbol};
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlImageElement,
};

/// Finds marked elements in a DOM document.
#[derive(Debug, Clone)]
pub struct DomQrSurface {
    document: Document,
}

impl DomQrSurface {
    /// A surface over `document`.
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl QrSurface for DomQrSurface {
    type Element = Element;

    fn elements(&self, marker: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(&format!("[{marker}]")) else {
            tracing::warn!(marker, "Invalid QR marker");
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

/// `<canvas>` is painted, `<img>` gets an SVG data URL, anything else has its
/// content replaced by inline SVG.
impl QrElement for Element {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn show(&self, symbol: &QrSymbol, size: u32) -> Result<(), QrError> {
        if let Some(canvas) = self.dyn_ref::<HtmlCanvasElement>() {
            return paint(canvas, symbol, size);
        }
        if let Some(image) = self.dyn_ref::<HtmlImageElement>() {
            image.set_width(size);
            image.set_height(size);
            image.set_src(&data_url(&symbol.to_svg(size)));
            return Ok(());
        }
        self.set_inner_html(&symbol.to_svg(size));
        Ok(())
    }
}

fn data_url(svg: &str) -> String {
    let encoded: String = js_sys::encode_uri_component(svg).into();
    format!("data:image/svg+xml,{encoded}")
}

/// Draw the modules on a `size`×`size` canvas, snapping module edges to whole
/// pixels so neighbouring modules leave no seams.
fn paint(canvas: &HtmlCanvasElement, symbol: &QrSymbol, size: u32) -> Result<(), QrError> {
    canvas.set_width(size);
    canvas.set_height(size);

    let context = canvas
        .get_context("2d")
        .map_err(|error| QrError::Dom(format!("{error:?}")))?
        .ok_or_else(|| QrError::Dom("canvas has no 2d context".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| QrError::Dom("unexpected 2d context type".into()))?;

    let scale = f64::from(size) / symbol.extent() as f64;
    let edge = |module: usize| (module as f64 * scale).round();

    context.set_fill_style_str("#fff");
    context.fill_rect(0.0, 0.0, f64::from(size), f64::from(size));
    context.set_fill_style_str("#000");
    for (x, y) in symbol.dark_modules() {
        let (left, top) = (edge(x), edge(y));
        context.fill_rect(left, top, edge(x + 1) - left, edge(y + 1) - top);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{QUIET_ZONE, QrSettings, render_all};
    use pretty_assertions::assert_eq;
    use wasm_bindgen_test::wasm_bindgen_test;

    wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

    const TEXT: &str = "https://example.test/x";

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn pixel(canvas: &HtmlCanvasElement, x: f64, y: f64) -> [u8; 4] {
        let context: CanvasRenderingContext2d =
            canvas.get_context("2d").unwrap().unwrap().unchecked_into();
        let data = context.get_image_data(x, y, 1.0, 1.0).unwrap().data();
        [data[0], data[1], data[2], data[3]]
    }

    #[wasm_bindgen_test]
    fn it_paints_canvases_at_the_requested_size() {
        let canvas: HtmlCanvasElement = document()
            .create_element("canvas")
            .unwrap()
            .unchecked_into();
        let symbol = QrSymbol::encode(TEXT).unwrap();

        canvas.show(&symbol, 200).unwrap();

        assert_eq!((canvas.width(), canvas.height()), (200, 200));
        let module = 200.0 / symbol.extent() as f64;
        let finder = (QUIET_ZONE as f64 + 0.5) * module;
        assert_eq!(pixel(&canvas, finder, finder), [0, 0, 0, 255]);
        assert_eq!(pixel(&canvas, 1.0, 1.0), [255, 255, 255, 255]);
        assert_eq!(canvas.inner_html(), "");
    }

    #[wasm_bindgen_test]
    fn it_points_images_at_an_escaped_svg_data_url() {
        let image: HtmlImageElement = document()
            .create_element("img")
            .unwrap()
            .unchecked_into();
        let symbol = QrSymbol::encode(TEXT).unwrap();

        image.show(&symbol, 200).unwrap();

        let source = image.src();
        let payload = source
            .strip_prefix("data:image/svg+xml,")
            .expect("svg data url");
        assert!(!payload.contains('#'));
        assert!(!payload.contains('"'));
        assert!(payload.contains("%23fff"));
        let decoded: String = js_sys::decode_uri_component(payload).unwrap().into();
        assert_eq!(decoded, symbol.to_svg(200));
        assert_eq!((image.width(), image.height()), (200, 200));
    }

    #[wasm_bindgen_test]
    fn it_renders_every_kind_of_marked_element_on_the_page() {
        let document = document();
        let container = document.create_element("section").unwrap();
        for tag in ["canvas", "img", "div"] {
            let element = document.create_element(tag).unwrap();
            element.set_attribute("data-qr-page", TEXT).unwrap();
            container.append_child(&element).unwrap();
        }
        document.body().unwrap().append_child(&container).unwrap();

        let settings = QrSettings {
            marker: "data-qr-page".into(),
            size: 120,
        };
        let rendered = render_all(&DomQrSurface::new(document.clone()), &settings);

        assert_eq!(rendered, 3);
        let inline = container.query_selector("div").unwrap().unwrap();
        assert!(inline.inner_html().starts_with("<svg"));
        assert!(inline.inner_html().contains(r#"width="120""#));
    }
}
