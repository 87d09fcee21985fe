//! Asset fan-out: one accepted page → split PDF, WebP, PNG.
//!
//! All three renders start from the source page. The split PDF carries a
//! raster of the page instead of the page itself, which bakes the filled-in
//! form fields into pixels so every viewer shows the same card. The print
//! PNG is rendered from the vector source, never from that raster.

use crate::config::SpellbookConfig;
use crate::error::SpellbookError;
use crate::pipeline::render::{PageRenderer, PageSize};
use image::{DynamicImage, ImageFormat};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where the three assets of one spell were written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetPaths {
    pub split_document: PathBuf,
    pub display_image: PathBuf,
    pub high_res_image: PathBuf,
}

/// Write the split PDF, display WebP and print PNG for the 0-based page
/// `index`, named after `slug`.
///
/// Existing files with the same slug are overwritten. The first failure
/// aborts; assets written before it are left in place.
pub fn produce(
    renderer: &dyn PageRenderer,
    index: usize,
    slug: &str,
    config: &SpellbookConfig,
) -> Result<AssetPaths, SpellbookError> {
    let page = index + 1;

    // ── Split document ───────────────────────────────────────────────────
    let split_document = config.split_document_path(slug);
    let size = renderer.page_size(index)?;
    let raster = renderer.render(index, config.split_document_dpi)?;
    ensure_parent(&split_document)?;
    write_split_document(&raster, size, &split_document).map_err(|detail| {
        SpellbookError::SplitDocumentFailed {
            page,
            path: split_document.clone(),
            detail,
        }
    })?;

    // ── Display image ────────────────────────────────────────────────────
    let display_image = config.display_image_path(slug);
    let display = renderer.render(index, config.display_dpi)?;
    ensure_parent(&display_image)?;
    write_webp(&display, config.display_quality, &display_image).map_err(|detail| {
        SpellbookError::ImageEncodingFailed {
            page,
            path: display_image.clone(),
            detail,
        }
    })?;

    // ── Print image ──────────────────────────────────────────────────────
    let high_res_image = config.high_res_image_path(slug);
    let print = renderer.render(index, config.high_res_dpi)?;
    ensure_parent(&high_res_image)?;
    write_png(&print, &high_res_image).map_err(|detail| SpellbookError::ImageEncodingFailed {
        page,
        path: high_res_image.clone(),
        detail,
    })?;

    debug!("Page {page}: assets written for '{slug}'");
    Ok(AssetPaths {
        split_document,
        display_image,
        high_res_image,
    })
}

/// Create the parent directory of `path` if needed.
pub fn ensure_parent(path: &Path) -> Result<(), SpellbookError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .map_err(|source| SpellbookError::OutputWriteFailed {
                path: parent.to_path_buf(),
                source,
            }),
        _ => Ok(()),
    }
}

/// A one-page PDF of `size` points with `raster` stretched over the whole page.
pub fn write_split_document(
    raster: &DynamicImage,
    size: PageSize,
    path: &Path,
) -> Result<(), String> {
    let rgb = raster.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => Object::Integer(width as i64),
            "Height" => Object::Integer(height as i64),
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        rgb.into_raw(),
    ));

    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    Object::Real(size.width),
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(size.height),
                    Object::Integer(0),
                    Object::Integer(0),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
            Operation::new("Q", vec![]),
        ],
    };
    let content_bytes = content.encode().map_err(|e| e.to_string())?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(size.width),
            Object::Real(size.height),
        ],
        "Resources" => dictionary! {
            "XObject" => dictionary! { "Im0" => image_id },
        },
        "Contents" => content_id,
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    // Flate-compresses the raster and content streams.
    doc.compress();
    doc.save(path).map_err(|e| e.to_string())?;
    Ok(())
}

/// Lossy WebP at `quality` (1–100). Alpha is dropped; cards are opaque.
///
/// libwebp refuses images wider or taller than 16383 px.
pub fn write_webp(image: &DynamicImage, quality: u8, path: &Path) -> Result<(), String> {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let encoded = webp::Encoder::from_rgb(rgb.as_raw(), width, height)
        .encode_simple(false, quality as f32)
        .map_err(|e| format!("WebP encoding failed ({width}x{height} px): {e:?}"))?;
    std::fs::write(path, &*encoded).map_err(|e| e.to_string())
}

/// Lossless PNG.
pub fn write_png(image: &DynamicImage, path: &Path) -> Result<(), String> {
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| e.to_string())
}
