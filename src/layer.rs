use serde::{Deserialize, Serialize};

pub mod codec;

pub use codec::EncodedImage;

/// Catalog category a layer was drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Body,
    Accessory,
    Head,
    Glasses,
    /// A layer encoded from a local raster file rather than the catalog.
    Custom,
}

impl PartKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Body => "body",
            Self::Accessory => "accessory",
            Self::Head => "head",
            Self::Glasses => "glasses",
            Self::Custom => "custom",
        }
    }
}

/// Named part image. Layers render bottom-to-top in list order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Display name, e.g. `head-goat`.
    pub name: String,
    pub kind: PartKind,
    pub data: EncodedImage,
}

impl Layer {
    pub fn new(name: impl Into<String>, kind: PartKind, data: EncodedImage) -> Self {
        Self {
            name: name.into(),
            kind,
            data,
        }
    }
}

/// Append `custom` so it draws above every resolved part.
///
/// Overlapping cells are won by the later layer, so the custom layer always goes last; it is never
/// interleaved or reordered by name.
pub fn inject_custom_layer(mut layers: Vec<Layer>, custom: Layer) -> Vec<Layer> {
    tracing::debug!(name = %custom.name, below = layers.len(), "injecting custom layer");
    layers.push(custom);
    layers
}
