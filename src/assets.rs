//! # Static Card Assets
//!
//! Templates, markers, the tide curve strip, weather icons and fonts, loaded
//! once at startup and shared read-only between renders.
//!
//! ## Directory Layout
//! ```text
//! assets/
//! ├── templates/   template.png, template_compact.png, time_marker.png,
//! │                hi_tide_marker.png, lo_tide_marker.png, tide_graph.png
//! ├── icons/       <icon>.png for every condition theme
//! └── fonts/       DejaVuSans-Bold.ttf, DejaVuSansCondensed.ttf,
//!                  DejaVuSansCondensed-Bold.ttf
//! ```
//!
//! Any missing, unreadable or malformed file fails [`AssetSet::load`]. A
//! process that cannot load its assets must not serve renders.

use crate::layout::{LayoutConstants, LayoutVariant};
use crate::text::FontStyle;
use crate::theme::THEMES;
use image::RgbaImage;
use rusttype::Font;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal problems with the on-disk asset set.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("cannot read asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot decode image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("cannot parse font {0}")]
    Font(PathBuf),

    #[error("template {path} is {actual:?}, layout expects {expected:?}")]
    TemplateSize {
        path: PathBuf,
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

/// The three font faces used on the card.
pub struct Fonts {
    bold: Font<'static>,
    condensed: Font<'static>,
    bold_condensed: Font<'static>,
}

impl Fonts {
    pub fn get(&self, style: FontStyle) -> &Font<'static> {
        match style {
            FontStyle::Bold => &self.bold,
            FontStyle::Condensed => &self.condensed,
            FontStyle::BoldCondensed => &self.bold_condensed,
        }
    }
}

/// Every image and font a render needs.
pub struct AssetSet {
    pub template_full: RgbaImage,
    pub template_compact: RgbaImage,
    pub time_marker: RgbaImage,
    pub hi_tide_marker: RgbaImage,
    pub lo_tide_marker: RgbaImage,
    pub tide_graph: RgbaImage,
    /// Weather icons keyed by theme icon name
    pub icons: HashMap<&'static str, RgbaImage>,
    pub fonts: Fonts,
}

impl AssetSet {
    /// Load and validate the asset set rooted at `dir`.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self, AssetError> {
        let dir = dir.as_ref();
        let templates = dir.join("templates");

        let template_full = load_template(&templates.join("template.png"), LayoutVariant::Full)?;
        let template_compact = load_template(
            &templates.join("template_compact.png"),
            LayoutVariant::Compact,
        )?;

        let mut icons = HashMap::with_capacity(THEMES.len());
        for theme in THEMES.iter() {
            if !icons.contains_key(theme.icon) {
                let path = dir.join("icons").join(format!("{}.png", theme.icon));
                icons.insert(theme.icon, load_image(&path)?);
            }
        }

        let fonts_dir = dir.join("fonts");
        let fonts = Fonts {
            bold: load_font(&fonts_dir.join(FontStyle::Bold.file_name()))?,
            condensed: load_font(&fonts_dir.join(FontStyle::Condensed.file_name()))?,
            bold_condensed: load_font(&fonts_dir.join(FontStyle::BoldCondensed.file_name()))?,
        };

        let assets = Self {
            template_full,
            template_compact,
            time_marker: load_image(&templates.join("time_marker.png"))?,
            hi_tide_marker: load_image(&templates.join("hi_tide_marker.png"))?,
            lo_tide_marker: load_image(&templates.join("lo_tide_marker.png"))?,
            tide_graph: load_image(&templates.join("tide_graph.png"))?,
            icons,
            fonts,
        };

        tracing::info!(
            dir = %dir.display(),
            icons = assets.icons.len(),
            "Loaded tide card assets"
        );

        Ok(assets)
    }

    pub fn template(&self, variant: LayoutVariant) -> &RgbaImage {
        match variant {
            LayoutVariant::Full => &self.template_full,
            LayoutVariant::Compact => &self.template_compact,
        }
    }

    pub fn icon(&self, name: &str) -> Option<&RgbaImage> {
        self.icons.get(name)
    }
}

fn load_image(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let image = image::load_from_memory(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

fn load_template(path: &Path, variant: LayoutVariant) -> Result<RgbaImage, AssetError> {
    let image = load_image(path)?;
    let expected = LayoutConstants::for_variant(variant).canvas;
    if image.dimensions() != expected {
        return Err(AssetError::TemplateSize {
            path: path.to_path_buf(),
            expected,
            actual: image.dimensions(),
        });
    }
    Ok(image)
}

fn load_font(path: &Path) -> Result<Font<'static>, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Font::try_from_vec(bytes).ok_or_else(|| AssetError::Font(path.to_path_buf()))
}

/// Asset directory shipped with the crate.
pub fn bundled_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets")
}
