//! Regenerate print PNGs from already-split spell PDFs.
//!
//! Useful after changing the print DPI: every `<stem>.pdf` in the input
//! directory becomes `<stem>.png` in the output directory, rendered from
//! its first page. No form reading and no collection changes.

use crate::error::SpellbookError;
use crate::output::HiresOutcome;
use crate::pipeline::assets::write_png;
use crate::pipeline::input::list_pdfs;
use crate::pipeline::render::RenderEngine;
use crate::progress::BatchProgressCallback;
use std::path::Path;
use tracing::info;

/// Render page 1 of every PDF in `input_dir` at `dpi` into `output_dir`.
///
/// An empty or missing input directory is not an error; it returns
/// [`HiresOutcome::NoInputs`] without creating anything.
pub fn regenerate_hires(
    input_dir: &Path,
    output_dir: &Path,
    dpi: u32,
    engine: &dyn RenderEngine,
    progress: &dyn BatchProgressCallback,
) -> Result<HiresOutcome, SpellbookError> {
    let pdfs = list_pdfs(input_dir)?;
    if pdfs.is_empty() {
        info!("No PDFs found in {}/", input_dir.display());
        return Ok(HiresOutcome::NoInputs);
    }

    std::fs::create_dir_all(output_dir).map_err(|source| SpellbookError::OutputWriteFailed {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let total = pdfs.len();
    info!("Generating {dpi} DPI lossless PNG for {total} spell PDFs");
    progress.on_batch_start(total);

    let mut written = Vec::with_capacity(total);
    for (i, pdf) in pdfs.iter().enumerate() {
        let stem = pdf
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let out_path = output_dir.join(format!("{stem}.png"));

        let renderer = engine.open(pdf)?;
        let image = renderer.render(0, dpi)?;
        write_png(&image, &out_path).map_err(|detail| SpellbookError::ImageEncodingFailed {
            page: 1,
            path: out_path.clone(),
            detail,
        })?;

        progress.on_page_accepted(i + 1, total, &format!("{stem}.png"));
        written.push(out_path);
    }

    progress.on_batch_complete(written.len(), 0);
    info!(
        "{} high-res PNG images saved to {}/",
        written.len(),
        output_dir.display()
    );
    Ok(HiresOutcome::Generated(written))
}
