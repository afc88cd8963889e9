//! Run-length layer payloads.
//!
//! A payload is hex text (optionally `0x`-prefixed):
//!
//! - byte 0: palette index (always 0 for the built-in catalog)
//! - bytes 1..5: bounds `top, right, bottom, left` on the part grid, `right`/`bottom` exclusive
//! - then `(length, color)` byte pairs, row-major starting at `(left, top)`
//!
//! Runs never cross the right bound. Color index 0 is transparent.

use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::GRID_SIZE,
    error::{NounError, NounResult},
};

const HEADER_LEN: usize = 5;

/// Bounding box of the drawn region of a part.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    pub top: u8,
    /// Exclusive.
    pub right: u8,
    /// Exclusive.
    pub bottom: u8,
    pub left: u8,
}

impl Bounds {
    pub fn width(self) -> u8 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(self) -> u8 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn is_empty(self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    fn validate(self) -> NounResult<()> {
        let max = GRID_SIZE as u8;
        if self.left > self.right || self.top > self.bottom {
            return Err(NounError::render(format!(
                "inverted bounds (top {}, right {}, bottom {}, left {})",
                self.top, self.right, self.bottom, self.left
            )));
        }
        if self.right > max || self.bottom > max {
            return Err(NounError::render(format!(
                "bounds exceed the {max}x{max} grid (right {}, bottom {})",
                self.right, self.bottom
            )));
        }
        Ok(())
    }
}

/// One run of identical color indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Run {
    pub length: u8,
    pub color: u8,
}

/// A run placed on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub x: u8,
    pub y: u8,
    pub length: u8,
    pub color: u8,
}

/// Structured form of a layer payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodedImage {
    pub palette_index: u8,
    pub bounds: Bounds,
    pub runs: Vec<Run>,
}

impl DecodedImage {
    /// Crop a row-major grid of palette indices to its drawn region and run-length encode it.
    pub fn from_index_grid(width: u32, height: u32, indices: &[u8]) -> NounResult<Self> {
        if width > GRID_SIZE || height > GRID_SIZE {
            return Err(NounError::validation(format!(
                "index grid {width}x{height} exceeds {GRID_SIZE}x{GRID_SIZE}"
            )));
        }
        if indices.len() != (width * height) as usize {
            return Err(NounError::validation(format!(
                "index grid has {} cells, expected {}",
                indices.len(),
                width * height
            )));
        }

        let at = |x: u32, y: u32| indices[(y * width + x) as usize];

        let mut top = u32::MAX;
        let mut bottom = 0;
        let mut left = u32::MAX;
        let mut right = 0;
        for y in 0..height {
            for x in 0..width {
                if at(x, y) != 0 {
                    top = top.min(y);
                    bottom = bottom.max(y + 1);
                    left = left.min(x);
                    right = right.max(x + 1);
                }
            }
        }
        if top == u32::MAX {
            return Ok(Self::default());
        }

        let mut runs = Vec::new();
        for y in top..bottom {
            let mut x = left;
            while x < right {
                let color = at(x, y);
                let mut length = 1u32;
                while x + length < right && at(x + length, y) == color && length < 255 {
                    length += 1;
                }
                runs.push(Run {
                    length: length as u8,
                    color,
                });
                x += length;
            }
        }

        Ok(Self {
            palette_index: 0,
            bounds: Bounds {
                top: top as u8,
                right: right as u8,
                bottom: bottom as u8,
                left: left as u8,
            },
            runs,
        })
    }

    /// Place every run on the grid, validating that runs stay inside the bounds.
    pub fn spans(&self) -> NounResult<Vec<Span>> {
        self.bounds.validate()?;
        let b = self.bounds;
        let mut out = Vec::with_capacity(self.runs.len());
        let mut x = b.left;
        let mut y = b.top;
        for (i, run) in self.runs.iter().enumerate() {
            if run.length == 0 {
                return Err(NounError::render(format!("run {i} has zero length")));
            }
            if y >= b.bottom {
                return Err(NounError::render(format!(
                    "run {i} starts below the bottom bound {}",
                    b.bottom
                )));
            }
            let end = u16::from(x) + u16::from(run.length);
            if end > u16::from(b.right) {
                return Err(NounError::render(format!(
                    "run {i} at ({x}, {y}) overruns the right bound {}",
                    b.right
                )));
            }
            out.push(Span {
                x,
                y,
                length: run.length,
                color: run.color,
            });
            x = end as u8;
            if x == b.right {
                x = b.left;
                y += 1;
            }
        }
        Ok(out)
    }
}

/// Hex-encoded layer payload, kept as text exactly as it appears in a catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// Wrap payload text without validating it. [`EncodedImage::decode`] reports bad payloads.
    pub fn new(data: impl Into<String>) -> Self {
        Self(data.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn encode(image: &DecodedImage) -> Self {
        let b = image.bounds;
        let mut bytes = Vec::with_capacity(HEADER_LEN + image.runs.len() * 2);
        bytes.extend_from_slice(&[image.palette_index, b.top, b.right, b.bottom, b.left]);
        for run in &image.runs {
            bytes.push(run.length);
            bytes.push(run.color);
        }
        Self(format!("0x{}", hex::encode(&bytes)))
    }

    pub fn decode(&self) -> NounResult<DecodedImage> {
        let digits = self.0.strip_prefix("0x").unwrap_or(self.0.as_str());
        let bytes = hex::decode(digits)
            .map_err(|e| NounError::render(format!("layer payload is not hex: {e}")))?;
        if bytes.len() < HEADER_LEN {
            return Err(NounError::render(format!(
                "layer payload has {} bytes, header needs {HEADER_LEN}",
                bytes.len()
            )));
        }
        let body = &bytes[HEADER_LEN..];
        if !body.len().is_multiple_of(2) {
            return Err(NounError::render("layer payload ends with half a run"));
        }

        let bounds = Bounds {
            top: bytes[1],
            right: bytes[2],
            bottom: bytes[3],
            left: bytes[4],
        };
        bounds.validate()?;

        Ok(DecodedImage {
            palette_index: bytes[0],
            bounds,
            runs: body
                .chunks_exact(2)
                .map(|r| Run {
                    length: r[0],
                    color: r[1],
                })
                .collect(),
        })
    }
}
