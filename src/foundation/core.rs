use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{NounError, NounResult};

/// Side length of the pixel grid every part is drawn on.
pub const GRID_SIZE: u32 = 32;

/// One trait index per catalog category.
///
/// Indices are only meaningful against the catalog that produced them; an index that is out of
/// range for its category is reported by the resolver, never clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seed {
    /// Index into the background color list.
    pub background: u32,
    /// Index into the body images.
    pub body: u32,
    /// Index into the accessory images.
    pub accessory: u32,
    /// Index into the head images.
    pub head: u32,
    /// Index into the glasses images.
    pub glasses: u32,
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{ background: {}, body: {}, accessory: {}, head: {}, glasses: {} }}",
            self.background, self.body, self.accessory, self.head, self.glasses
        )
    }
}

/// Opaque sRGB color, written as `rrggbb` in catalogs and documents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `rrggbb` or `#rrggbb` (case-insensitive).
    pub fn parse_hex(s: &str) -> NounResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 {
            return Err(NounError::validation(format!(
                "color \"{s}\" must be 6 hex digits (rrggbb)"
            )));
        }
        let bytes = hex::decode(s)
            .map_err(|e| NounError::validation(format!("color \"{s}\": {e}")))?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }

    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Squared euclidean distance in RGB space.
    pub fn distance_sq(self, other: Rgb8) -> u32 {
        let d = |a: u8, b: u8| {
            let v = i32::from(a) - i32::from(b);
            (v * v) as u32
        };
        d(self.r, other.r) + d(self.g, other.g) + d(self.b, other.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Rgb8::parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Index-to-color lookup table shared by every part image.
///
/// Entry 0 is the transparent slot; every other entry is an opaque color. The table is loaded
/// once with its catalog and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Option<Rgb8>>,
}

impl Palette {
    /// Build a palette from its opaque colors; the transparent slot is prepended.
    pub fn from_opaque(colors: impl IntoIterator<Item = Rgb8>) -> Self {
        let mut out = vec![None];
        out.extend(colors.into_iter().map(Some));
        Self { colors: out }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Look up an index. `Ok(None)` means transparent.
    pub fn get(&self, index: u8) -> NounResult<Option<Rgb8>> {
        self.colors
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| {
                NounError::render(format!(
                    "color index {index} is outside the palette (len {})",
                    self.colors.len()
                ))
            })
    }

    /// Find the palette index of `color`, falling back to the nearest opaque entry.
    ///
    /// Returns `None` only when the palette has no opaque entries.
    pub fn nearest_index(&self, color: Rgb8) -> Option<u8> {
        self.colors
            .iter()
            .enumerate()
            .take(usize::from(u8::MAX) + 1)
            .filter_map(|(i, c)| c.map(|c| (i, c.distance_sq(color))))
            .min_by_key(|&(i, d)| (d, i))
            .map(|(i, _)| i as u8)
    }
}

impl Serialize for Palette {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let raw: Vec<String> = self
            .colors
            .iter()
            .map(|c| c.map(Rgb8::to_hex).unwrap_or_default())
            .collect();
        raw.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<String>::deserialize(deserializer)?;
        let mut colors = Vec::with_capacity(raw.len());
        for (i, s) in raw.iter().enumerate() {
            match (i, s.is_empty()) {
                (0, true) => colors.push(None),
                (0, false) => {
                    return Err(serde::de::Error::custom(
                        "palette entry 0 must be \"\" (transparent)",
                    ));
                }
                (_, true) => {
                    return Err(serde::de::Error::custom(format!(
                        "palette entry {i} is empty; only entry 0 may be transparent"
                    )));
                }
                (_, false) => colors.push(Some(
                    Rgb8::parse_hex(s).map_err(serde::de::Error::custom)?,
                )),
            }
        }
        Ok(Self { colors })
    }
}

/// Canvas background: the catalog index and the color it resolved to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Background {
    pub index: u32,
    pub color: Rgb8,
}

/// 32-byte nonce mixed with the identifier when deriving a seed (a block hash on chain).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Entropy(pub [u8; 32]);

impl Entropy {
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    /// Draw 32 bytes from the thread-local CSPRNG.
    pub fn random() -> Self {
        use rand::Rng as _;

        let mut bytes = [0u8; 32];
        rand::rng().fill(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Identifier in `0..10_000`, matching the placeholder range used when no identifier is given.
pub fn random_identifier() -> u64 {
    use rand::Rng as _;

    rand::rng().random_range(0..10_000)
}

impl fmt::Display for Entropy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl FromStr for Entropy {
    type Err = NounError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != 64 {
            return Err(NounError::validation(format!(
                "entropy must be 32 bytes (64 hex digits), got {} digits",
                digits.len()
            )));
        }
        let mut out = [0u8; 32];
        hex::decode_to_slice(digits, &mut out)
            .map_err(|e| NounError::validation(format!("entropy: {e}")))?;
        Ok(Self(out))
    }
}

impl Serialize for Entropy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Entropy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rgb_hex_parse_and_format() {
        assert_eq!(Rgb8::parse_hex("#E1D7D5").unwrap(), Rgb8::new(0xe1, 0xd7, 0xd5));
        assert_eq!(Rgb8::new(0x0a, 0, 0xff).to_hex(), "0a00ff");
        assert!(Rgb8::parse_hex("fff").is_err());
        assert!(Rgb8::parse_hex("gg0000").is_err());
    }

    #[test]
    fn palette_requires_transparent_slot_zero() {
        let p: Palette = serde_json::from_value(json!(["", "000000", "ffffff"])).unwrap();
        assert_eq!(p.len(), 3);
        assert_eq!(p.get(0).unwrap(), None);
        assert_eq!(p.get(2).unwrap(), Some(Rgb8::new(255, 255, 255)));
        assert!(p.get(3).is_err());

        assert!(serde_json::from_value::<Palette>(json!(["000000"])).is_err());
        assert!(serde_json::from_value::<Palette>(json!(["", ""])).is_err());
    }

    #[test]
    fn nearest_index_prefers_exact_then_closest() {
        let p = Palette::from_opaque([
            Rgb8::new(0, 0, 0),
            Rgb8::new(255, 255, 255),
            Rgb8::new(250, 0, 0),
        ]);
        assert_eq!(p.nearest_index(Rgb8::new(255, 255, 255)), Some(2));
        assert_eq!(p.nearest_index(Rgb8::new(255, 10, 10)), Some(3));
        assert_eq!(p.nearest_index(Rgb8::new(20, 20, 20)), Some(1));
        assert_eq!(Palette::from_opaque([]).nearest_index(Rgb8::new(1, 2, 3)), None);
    }

    #[test]
    fn entropy_parses_prefixed_hex() {
        let s = format!("0x{}", "ab".repeat(32));
        let e: Entropy = s.parse().unwrap();
        assert_eq!(e.0, [0xab; 32]);
        assert_eq!(e.to_string(), s);

        assert!("0x1234".parse::<Entropy>().is_err());
        assert!(format!("0x{}", "zz".repeat(32)).parse::<Entropy>().is_err());
        assert!(format!("0x+f{}", "00".repeat(31)).parse::<Entropy>().is_err());

        let upper: Entropy = format!("0X{}", "AB".repeat(32)).parse().unwrap();
        assert_eq!(upper, e);
    }

    #[test]
    fn random_entropy_differs_between_draws() {
        assert_ne!(Entropy::random(), Entropy::random());
        assert!(random_identifier() < 10_000);
    }
}
