//! Trait catalog: palette, background colors, and part images per category.
//!
//! The JSON shape is
//!
//! ```json
//! {
//!   "version": "1",
//!   "bgcolors": ["d5d7e1", "e1d7d5"],
//!   "palette": ["", "000000", "..."],
//!   "images": { "bodies": [{ "filename": "body-teal", "data": "0x..." }], "...": [] }
//! }
//! ```

use std::{path::Path, sync::OnceLock};

use serde::{Deserialize, Serialize};

use crate::{
    foundation::{
        core::{Palette, Rgb8},
        error::{NounError, NounResult},
    },
    layer::{EncodedImage, Layer, PartKind},
};

pub mod resolver;
pub mod seed;

const BUILTIN_CATALOG_JSON: &str = include_str!("../assets/catalog.json");

static BUILTIN: OnceLock<Result<TraitCatalog, String>> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartImage {
    pub filename: String,
    pub data: EncodedImage,
}

impl PartImage {
    pub fn to_layer(&self, kind: PartKind) -> Layer {
        Layer::new(self.filename.clone(), kind, self.data.clone())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogImages {
    pub bodies: Vec<PartImage>,
    pub accessories: Vec<PartImage>,
    pub heads: Vec<PartImage>,
    pub glasses: Vec<PartImage>,
}

impl CatalogImages {
    pub fn for_kind(&self, kind: PartKind) -> &[PartImage] {
        match kind {
            PartKind::Body => &self.bodies,
            PartKind::Accessory => &self.accessories,
            PartKind::Head => &self.heads,
            PartKind::Glasses => &self.glasses,
            PartKind::Custom => &[],
        }
    }
}

/// Number of choices in each seeded category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryCounts {
    pub backgrounds: usize,
    pub bodies: usize,
    pub accessories: usize,
    pub heads: usize,
    pub glasses: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitCatalog {
    /// Catalog revision. Seeds are only reproducible against the same revision.
    pub version: String,
    pub bgcolors: Vec<Rgb8>,
    pub palette: Palette,
    pub images: CatalogImages,
}

impl TraitCatalog {
    /// The catalog compiled into the crate, parsed once per process.
    pub fn builtin() -> NounResult<&'static TraitCatalog> {
        let parsed = BUILTIN.get_or_init(|| {
            Self::from_json_str(BUILTIN_CATALOG_JSON).map_err(|e| e.to_string())
        });
        parsed
            .as_ref()
            .map_err(|e| NounError::serde(format!("built-in catalog: {e}")))
    }

    pub fn from_json_str(s: &str) -> NounResult<Self> {
        let catalog: TraitCatalog =
            serde_json::from_str(s).map_err(|e| NounError::serde(format!("catalog json: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> NounResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| NounError::io(format!("read catalog '{}'", path.display()), e))?;
        Self::from_json_str(&text)
    }

    pub fn counts(&self) -> CategoryCounts {
        CategoryCounts {
            backgrounds: self.bgcolors.len(),
            bodies: self.images.bodies.len(),
            accessories: self.images.accessories.len(),
            heads: self.images.heads.len(),
            glasses: self.images.glasses.len(),
        }
    }

    /// Check that every category is non-empty and every part decodes against the palette.
    pub fn validate(&self) -> NounResult<()> {
        if self.bgcolors.is_empty() {
            return Err(NounError::validation("catalog has no background colors"));
        }
        if self.palette.len() < 2 {
            return Err(NounError::validation(
                "catalog palette needs the transparent slot and at least one color",
            ));
        }

        for kind in [
            PartKind::Body,
            PartKind::Accessory,
            PartKind::Head,
            PartKind::Glasses,
        ] {
            let parts = self.images.for_kind(kind);
            if parts.is_empty() {
                return Err(NounError::validation(format!(
                    "catalog has no {} images",
                    kind.as_str()
                )));
            }
            for part in parts {
                let spans = part
                    .data
                    .decode()
                    .and_then(|img| img.spans())
                    .map_err(|e| {
                        NounError::validation(format!("catalog part '{}': {e}", part.filename))
                    })?;
                for span in spans {
                    self.palette.get(span.color).map_err(|e| {
                        NounError::validation(format!("catalog part '{}': {e}", part.filename))
                    })?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads_and_is_shared() {
        let a = TraitCatalog::builtin().unwrap();
        let b = TraitCatalog::builtin().unwrap();
        assert!(std::ptr::eq(a, b));

        assert_eq!(a.version, "1");
        assert_eq!(
            a.counts(),
            CategoryCounts {
                backgrounds: 2,
                bodies: 6,
                accessories: 5,
                heads: 6,
                glasses: 4,
            }
        );
        assert_eq!(a.palette.get(0).unwrap(), None);
    }

    #[test]
    fn empty_category_is_rejected() {
        let mut catalog = TraitCatalog::builtin().unwrap().clone();
        catalog.images.heads.clear();
        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("no head images"), "{err}");
    }

    #[test]
    fn part_using_unknown_color_is_rejected() {
        let mut catalog = TraitCatalog::builtin().unwrap().clone();
        // One cell painted with color 0xff, far past the palette end.
        catalog.images.glasses[0].data = EncodedImage::new("0x000001010001ff");
        let err = catalog.validate().unwrap_err();
        assert!(matches!(err, NounError::Validation(_)), "{err}");
        assert!(err.to_string().contains("glasses-square-red"), "{err}");
    }

    #[test]
    fn malformed_json_is_serde_error() {
        let err = TraitCatalog::from_json_str("{\"version\": 1}").unwrap_err();
        assert!(matches!(err, NounError::Serde(_)), "{err}");
    }

    #[test]
    fn missing_catalog_file_is_io_error() {
        let err = TraitCatalog::from_path("definitely/not/here/catalog.json").unwrap_err();
        assert!(matches!(err, NounError::Io { .. }), "{err}");
    }
}
