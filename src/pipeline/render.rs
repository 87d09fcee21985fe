//! Page rasterisation via pdfium.
//!
//! The rest of the pipeline talks to [`RenderEngine`] / [`PageRenderer`]
//! only, so tests (and any other backend) can stand in for pdfium without
//! linking the native library.
//!
//! ## Why scale by DPI, not by pixel cap?
//!
//! Every asset is specified by resolution (200 DPI display, 600 DPI print,
//! 300 DPI split raster) and cards are all the same physical size, so a
//! fixed scale factor of `dpi / 72` gives predictable output dimensions.

use crate::error::SpellbookError;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// PDF user-space units per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Page dimensions in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

/// An opened document that can rasterise its pages.
pub trait PageRenderer {
    fn page_count(&self) -> usize;

    /// Size of the 0-based page `index` in points.
    fn page_size(&self, index: usize) -> Result<PageSize, SpellbookError>;

    /// Rasterise the 0-based page `index` at `dpi`, form-field appearances included.
    fn render(&self, index: usize, dpi: u32) -> Result<DynamicImage, SpellbookError>;
}

/// Something that can open a PDF for rendering.
pub trait RenderEngine {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageRenderer + 'a>, SpellbookError>;
}

/// [`RenderEngine`] backed by a bound pdfium library.
pub struct PdfiumEngine {
    pdfium: Pdfium,
}

impl PdfiumEngine {
    /// Bind pdfium, looking in order at:
    ///
    /// 1. `PDFIUM_LIB_PATH` — the library file itself or its directory
    /// 2. the current working directory
    /// 3. the system library search path
    pub fn bind() -> Result<Self, SpellbookError> {
        let bindings = match std::env::var_os("PDFIUM_LIB_PATH") {
            Some(p) => {
                let p = PathBuf::from(p);
                let lib = if p.is_dir() {
                    Pdfium::pdfium_platform_library_name_at_path(&p)
                } else {
                    p
                };
                debug!("Binding pdfium from {}", lib.display());
                Pdfium::bind_to_library(lib)
            }
            None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                .or_else(|_| Pdfium::bind_to_system_library()),
        }
        .map_err(|e| SpellbookError::PdfiumBindingFailed(format!("{e:?}")))?;

        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }
}

impl RenderEngine for PdfiumEngine {
    fn open<'a>(&'a self, path: &Path) -> Result<Box<dyn PageRenderer + 'a>, SpellbookError> {
        let document = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| SpellbookError::CorruptPdf {
                path: path.to_path_buf(),
                detail: format!("{e:?}"),
            })?;
        info!("PDF loaded: {} pages", document.pages().len());
        Ok(Box::new(PdfiumDocument { document }))
    }
}

struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl PdfiumDocument<'_> {
    fn page(&self, index: usize) -> Result<PdfPage<'_>, SpellbookError> {
        self.document
            .pages()
            .get(index as u16)
            .map_err(|e| SpellbookError::RasterisationFailed {
                page: index + 1,
                detail: format!("{e:?}"),
            })
    }
}

impl PageRenderer for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_size(&self, index: usize) -> Result<PageSize, SpellbookError> {
        let page = self.page(index)?;
        Ok(PageSize {
            width: page.width().value,
            height: page.height().value,
        })
    }

    fn render(&self, index: usize, dpi: u32) -> Result<DynamicImage, SpellbookError> {
        let page = self.page(index)?;
        let render_config = PdfRenderConfig::new()
            .scale_page_by_factor(dpi as f32 / POINTS_PER_INCH)
            .render_form_data(true);

        let bitmap = page.render_with_config(&render_config).map_err(|e| {
            SpellbookError::RasterisationFailed {
                page: index + 1,
                detail: format!("{e:?}"),
            }
        })?;

        let image = bitmap.as_image();
        debug!(
            "Rendered page {} at {} DPI → {}x{} px",
            index + 1,
            dpi,
            image.width(),
            image.height()
        );
        Ok(image)
    }
}
