use resvg::{tiny_skia, usvg};

use super::image::{RankingRenderer, SvgRankingRenderer};
use crate::error::{LedgerError, Result};
use crate::operations::ClientTotal;

/// Raster backend. Lays the image out as SVG and rasterizes it with resvg.
pub struct PngRankingRenderer {
    options: usvg::Options<'static>,
}

impl PngRankingRenderer {
    /// Uses the fonts installed on this system for the labels.
    pub fn new() -> Self {
        let mut options = usvg::Options::default();
        options.fontdb_mut().load_system_fonts();
        log::debug!("Loaded {} font face(s)", options.fontdb.len());
        Self { options }
    }
}

impl Default for PngRankingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RankingRenderer for PngRankingRenderer {
    fn file_extension(&self) -> &'static str {
        "png"
    }

    fn render(&self, title: &str, ranking: &[ClientTotal]) -> Result<Vec<u8>> {
        let svg = SvgRankingRenderer.render(title, ranking)?;
        let tree = usvg::Tree::from_data(&svg, &self.options).map_err(LedgerError::render)?;
        let size = tree.size().to_int_size();
        let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height()).ok_or_else(|| {
            LedgerError::render(format!(
                "Invalid image size {}x{}",
                size.width(),
                size.height()
            ))
        })?;
        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
        pixmap.encode_png().map_err(LedgerError::render)
    }
}
