use crate::QrError;
use qrcode::{Color, QrCode};
use std::fmt::Write;

/// Light modules required around the symbol.
pub const QUIET_ZONE: usize = 4;

/// An encoded QR symbol: a square grid of dark and light modules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    width: usize,
    dark: Vec<bool>,
}

impl QrSymbol {
    /// Encode `text` in the smallest symbol that holds it.
    pub fn encode(text: &str) -> Result<Self, QrError> {
        let code = QrCode::new(text.as_bytes())?;
        Ok(Self {
            width: code.width(),
            dark: code
                .to_colors()
                .into_iter()
                .map(|color| color == Color::Dark)
                .collect(),
        })
    }

    /// Modules per side, quiet zone included.
    pub fn extent(&self) -> usize {
        self.width + 2 * QUIET_ZONE
    }

    /// Positions of the dark modules in `extent()` coordinates, row by row.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.dark
            .iter()
            .enumerate()
            .filter(|(_, dark)| **dark)
            .map(|(index, _)| {
                (
                    index % self.width + QUIET_ZONE,
                    index / self.width + QUIET_ZONE,
                )
            })
    }

    /// Standalone SVG document of `size`×`size` pixels.
    ///
    /// The `viewBox` is expressed in modules so the symbol scales to `size`
    /// without resampling.
    pub fn to_svg(&self, size: u32) -> String {
        let extent = self.extent();
        let mut path = String::new();
        for (x, y) in self.dark_modules() {
            // Writing to a String cannot fail.
            let _ = write!(path, "M{x},{y}h1v1h-1z");
        }

        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{size}" height="{size}" viewBox="0 0 {extent} {extent}" shape-rendering="crispEdges"><rect width="{extent}" height="{extent}" fill="#fff"/><path fill="#000" d="{path}"/></svg>"##
        )
    }
}

/// Render `text` as a standalone SVG document of `size`×`size` pixels.
///
/// Identical input yields identical output.
pub fn render_svg(text: &str, size: u32) -> Result<String, QrError> {
    Ok(QrSymbol::encode(text)?.to_svg(size))
}
