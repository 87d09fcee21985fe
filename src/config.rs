//! Configuration for splitting a spell deck.
//!
//! All run behaviour is controlled through [`SpellbookConfig`], built via
//! [`SpellbookConfigBuilder`]. The defaults reproduce the fixed layout the
//! spell website expects (`spells/`, `images/`, `high_res_images/`,
//! `data/spells.js`), so a bare `SpellbookConfig::default()` is a complete
//! configuration.

use crate::error::SpellbookError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory for split single-page PDFs.
pub const DEFAULT_SPLIT_DOCUMENT_DIR: &str = "spells";
/// Directory for compressed web-display images.
pub const DEFAULT_DISPLAY_IMAGE_DIR: &str = "images";
/// Directory for lossless print images.
pub const DEFAULT_HIGH_RES_IMAGE_DIR: &str = "high_res_images";
/// The `spells.js` collection the website loads.
pub const DEFAULT_COLLECTION_PATH: &str = "data/spells.js";
/// WebP quality (1–100).
pub const DEFAULT_DISPLAY_QUALITY: u8 = 85;
/// Resolution for the web-display image.
pub const DEFAULT_DISPLAY_DPI: u32 = 200;
/// Resolution for the high-res print PNG.
pub const DEFAULT_HIGH_RES_DPI: u32 = 600;
/// Resolution used to bake form fields into the split PDF.
pub const DEFAULT_SPLIT_DOCUMENT_DPI: u32 = 300;

const DPI_RANGE: std::ops::RangeInclusive<u32> = 36..=1200;

/// Configuration for one run over a spell deck.
///
/// # Example
/// ```rust
/// use spellbook_split::{LevelPolicy, SpellbookConfig};
///
/// let config = SpellbookConfig::builder()
///     .output_root("site")
///     .display_quality(90)
///     .level_policy(LevelPolicy::Strict)
///     .build()
///     .unwrap();
/// assert!(config.display_image_dir.ends_with("images"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellbookConfig {
    /// Where `<slug>.pdf` split documents are written. Default: `spells`.
    pub split_document_dir: PathBuf,

    /// Where `<slug>.webp` display images are written. Default: `images`.
    pub display_image_dir: PathBuf,

    /// Where `<slug>.png` print images are written. Default: `high_res_images`.
    pub high_res_image_dir: PathBuf,

    /// The collection file new records are appended to. Default: `data/spells.js`.
    pub collection_path: PathBuf,

    /// Directory the website is served from. Asset paths stored in the
    /// collection are relative to it. Default: empty (the working directory).
    #[serde(default)]
    pub site_root: PathBuf,

    /// Lossy WebP quality for display images, 1–100. Default: 85.
    pub display_quality: u8,

    /// Rendering DPI for display images. Default: 200.
    pub display_dpi: u32,

    /// Rendering DPI for print images. Default: 600.
    ///
    /// Rendered straight from the source page, never from the rasterised
    /// split document, so vector text stays sharp at print size.
    pub high_res_dpi: u32,

    /// Rendering DPI of the raster embedded in split documents. Default: 300.
    ///
    /// The split PDF carries an image of the page rather than the page
    /// itself so that form-field appearances are baked in and look the same
    /// in every viewer.
    pub split_document_dpi: u32,

    /// What to do with a full card whose level is missing or non-numeric.
    pub level_policy: LevelPolicy,

    /// What school/level/classes a name-only card receives.
    pub name_only_policy: NameOnlyPolicy,
}

impl Default for SpellbookConfig {
    fn default() -> Self {
        Self {
            split_document_dir: PathBuf::from(DEFAULT_SPLIT_DOCUMENT_DIR),
            display_image_dir: PathBuf::from(DEFAULT_DISPLAY_IMAGE_DIR),
            high_res_image_dir: PathBuf::from(DEFAULT_HIGH_RES_IMAGE_DIR),
            collection_path: PathBuf::from(DEFAULT_COLLECTION_PATH),
            site_root: PathBuf::new(),
            display_quality: DEFAULT_DISPLAY_QUALITY,
            display_dpi: DEFAULT_DISPLAY_DPI,
            high_res_dpi: DEFAULT_HIGH_RES_DPI,
            split_document_dpi: DEFAULT_SPLIT_DOCUMENT_DPI,
            level_policy: LevelPolicy::default(),
            name_only_policy: NameOnlyPolicy::default(),
        }
    }
}

impl SpellbookConfig {
    /// Create a new builder for `SpellbookConfig`.
    pub fn builder() -> SpellbookConfigBuilder {
        SpellbookConfigBuilder {
            config: Self::default(),
        }
    }

    /// `<split_document_dir>/<slug>.pdf`
    pub fn split_document_path(&self, slug: &str) -> PathBuf {
        self.split_document_dir.join(format!("{slug}.pdf"))
    }

    /// `<display_image_dir>/<slug>.webp`
    pub fn display_image_path(&self, slug: &str) -> PathBuf {
        self.display_image_dir.join(format!("{slug}.webp"))
    }

    /// `<high_res_image_dir>/<slug>.png`
    pub fn high_res_image_path(&self, slug: &str) -> PathBuf {
        self.high_res_image_dir.join(format!("{slug}.png"))
    }

    /// `path` as the website links to it: relative to [`Self::site_root`]
    /// when it lies under it, unchanged otherwise.
    pub fn site_path(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.site_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

/// Builder for [`SpellbookConfig`].
#[derive(Debug)]
pub struct SpellbookConfigBuilder {
    config: SpellbookConfig,
}

impl SpellbookConfigBuilder {
    /// Re-root all four output locations under `root`, keeping their
    /// default relative names. `root` also becomes the site root.
    pub fn output_root(mut self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.config.site_root = root.to_path_buf();
        self.config.split_document_dir = root.join(DEFAULT_SPLIT_DOCUMENT_DIR);
        self.config.display_image_dir = root.join(DEFAULT_DISPLAY_IMAGE_DIR);
        self.config.high_res_image_dir = root.join(DEFAULT_HIGH_RES_IMAGE_DIR);
        self.config.collection_path = root.join(DEFAULT_COLLECTION_PATH);
        self
    }

    pub fn split_document_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.split_document_dir = dir.into();
        self
    }

    pub fn display_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.display_image_dir = dir.into();
        self
    }

    pub fn high_res_image_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.high_res_image_dir = dir.into();
        self
    }

    pub fn collection_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.collection_path = path.into();
        self
    }

    pub fn display_quality(mut self, quality: u8) -> Self {
        self.config.display_quality = quality;
        self
    }

    pub fn display_dpi(mut self, dpi: u32) -> Self {
        self.config.display_dpi = dpi;
        self
    }

    pub fn high_res_dpi(mut self, dpi: u32) -> Self {
        self.config.high_res_dpi = dpi;
        self
    }

    pub fn split_document_dpi(mut self, dpi: u32) -> Self {
        self.config.split_document_dpi = dpi;
        self
    }

    pub fn level_policy(mut self, policy: LevelPolicy) -> Self {
        self.config.level_policy = policy;
        self
    }

    pub fn name_only_policy(mut self, policy: NameOnlyPolicy) -> Self {
        self.config.name_only_policy = policy;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SpellbookConfig, SpellbookError> {
        let c = &self.config;
        if !(1..=100).contains(&c.display_quality) {
            return Err(SpellbookError::InvalidConfig(format!(
                "display quality must be 1–100, got {}",
                c.display_quality
            )));
        }
        for (label, dpi) in [
            ("display", c.display_dpi),
            ("high-res", c.high_res_dpi),
            ("split-document", c.split_document_dpi),
        ] {
            if !DPI_RANGE.contains(&dpi) {
                return Err(SpellbookError::InvalidConfig(format!(
                    "{label} DPI must be {}–{}, got {dpi}",
                    DPI_RANGE.start(),
                    DPI_RANGE.end()
                )));
            }
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Handling of a full card whose `Level_` field is missing or not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LevelPolicy {
    /// Warn, count the page as skipped and keep going. (default)
    #[default]
    Skip,
    /// Stop the whole run at the offending page.
    Strict,
}

/// What a name-only card (`PName_` field) gets for school, level and classes.
///
/// Name-only cards carry no school or level fields of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NameOnlyPolicy {
    /// School `"Unknown"`, level 0, no classes. (default)
    #[default]
    Blank,
    /// Copy school, level and classes from the most recent full card of the
    /// same run; [`NameOnlyPolicy::Blank`] values when there is none yet.
    InheritPrevious,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_site_layout() {
        let c = SpellbookConfig::default();
        assert_eq!(c.split_document_dir, PathBuf::from("spells"));
        assert_eq!(c.display_image_dir, PathBuf::from("images"));
        assert_eq!(c.high_res_image_dir, PathBuf::from("high_res_images"));
        assert_eq!(c.collection_path, PathBuf::from("data/spells.js"));
        assert_eq!(c.display_quality, 85);
        assert_eq!(c.display_dpi, 200);
        assert_eq!(c.high_res_dpi, 600);
        assert_eq!(c.split_document_dpi, 300);
        assert_eq!(c.level_policy, LevelPolicy::Skip);
        assert_eq!(c.name_only_policy, NameOnlyPolicy::Blank);
    }

    #[test]
    fn asset_paths_derive_from_slug() {
        let c = SpellbookConfig::default();
        assert_eq!(
            c.split_document_path("magic-missile"),
            PathBuf::from("spells/magic-missile.pdf")
        );
        assert_eq!(
            c.display_image_path("magic-missile"),
            PathBuf::from("images/magic-missile.webp")
        );
        assert_eq!(
            c.high_res_image_path("magic-missile"),
            PathBuf::from("high_res_images/magic-missile.png")
        );
    }

    #[test]
    fn output_root_reroots_everything() {
        let c = SpellbookConfig::builder()
            .output_root("/tmp/site")
            .build()
            .unwrap();
        assert_eq!(c.split_document_dir, PathBuf::from("/tmp/site/spells"));
        assert_eq!(c.collection_path, PathBuf::from("/tmp/site/data/spells.js"));
    }

    #[test]
    fn site_path_is_relative_to_output_root() {
        let c = SpellbookConfig::builder()
            .output_root("site")
            .build()
            .unwrap();
        assert_eq!(
            c.site_path(&c.display_image_path("light")),
            PathBuf::from("images/light.webp")
        );
        assert_eq!(
            c.site_path(Path::new("elsewhere/light.pdf")),
            PathBuf::from("elsewhere/light.pdf")
        );
    }

    #[test]
    fn site_path_without_root_is_unchanged() {
        let c = SpellbookConfig::default();
        assert_eq!(
            c.site_path(&c.split_document_path("light")),
            PathBuf::from("spells/light.pdf")
        );
    }

    #[test]
    fn quality_out_of_range_rejected() {
        let err = SpellbookConfig::builder()
            .display_quality(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("quality"));
    }

    #[test]
    fn dpi_out_of_range_rejected() {
        let err = SpellbookConfig::builder()
            .high_res_dpi(5000)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("high-res DPI"), "got: {err}");
    }
}
