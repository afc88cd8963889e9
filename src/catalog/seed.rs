use sha2::{Digest as _, Sha256};

use crate::{
    catalog::CategoryCounts,
    foundation::{
        core::{Entropy, Seed},
        error::{NounError, NounResult},
    },
};

/// Width of the digest window read for each category.
const WINDOW_BITS: u32 = 48;

/// Right-shift (in bits) applied to the digest for background, body, accessory, head, glasses.
const SHIFTS: [u32; 5] = [0, 48, 96, 144, 192];

/// SHA-256 over `entropy ‖ identifier`, the identifier widened to a 32-byte big-endian word.
pub fn seed_digest(identifier: u64, entropy: &Entropy) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&identifier.to_be_bytes());

    let mut hasher = Sha256::new();
    hasher.update(entropy.as_bytes());
    hasher.update(word);
    hasher.finalize().into()
}

/// `(digest >> shift) & (2^48 - 1)`, reading the digest as a 256-bit big-endian integer.
fn window(digest: &[u8; 32], shift: u32) -> u64 {
    debug_assert!(shift.is_multiple_of(8) && shift + WINDOW_BITS <= 256);
    let end = 32 - (shift / 8) as usize;
    let start = end - (WINDOW_BITS / 8) as usize;
    digest[start..end]
        .iter()
        .fold(0u64, |acc, &b| (acc << 8) | u64::from(b))
}

fn pick(digest: &[u8; 32], shift: u32, count: usize, category: &str) -> NounResult<u32> {
    if count == 0 {
        return Err(NounError::resolution(format!(
            "cannot pick a {category}: catalog category is empty"
        )));
    }
    Ok((window(digest, shift) % count as u64) as u32)
}

/// Derive one index per category from the identifier and entropy.
///
/// Deterministic: the same `(identifier, entropy, counts)` always yields the same seed.
pub fn derive_seed(
    identifier: u64,
    entropy: &Entropy,
    counts: &CategoryCounts,
) -> NounResult<Seed> {
    let digest = seed_digest(identifier, entropy);
    Ok(Seed {
        background: pick(&digest, SHIFTS[0], counts.backgrounds, "background")?,
        body: pick(&digest, SHIFTS[1], counts.bodies, "body")?,
        accessory: pick(&digest, SHIFTS[2], counts.accessories, "accessory")?,
        head: pick(&digest, SHIFTS[3], counts.heads, "head")?,
        glasses: pick(&digest, SHIFTS[4], counts.glasses, "glasses")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNTS: CategoryCounts = CategoryCounts {
        backgrounds: 2,
        bodies: 6,
        accessories: 5,
        heads: 6,
        glasses: 4,
    };

    #[test]
    fn digest_is_pinned() {
        assert_eq!(
            hex::encode(&seed_digest(42, &Entropy::zero())),
            "c77673a8cc11eb4f660ce1a4ca446423df3b68677ba4c1c1846351ddbeb2e5ef"
        );
    }

    #[test]
    fn windows_read_from_the_low_end() {
        let mut digest = [0u8; 32];
        digest[26..].copy_from_slice(&[0, 0, 0, 0, 0x01, 0x02]);
        digest[20..26].copy_from_slice(&[0, 0, 0, 0, 0, 0x07]);
        assert_eq!(window(&digest, 0), 0x0102);
        assert_eq!(window(&digest, 48), 0x07);
        assert_eq!(window(&digest, 192), 0);
    }

    #[test]
    fn derive_seed_is_pinned() {
        let seed = derive_seed(42, &Entropy::zero(), &COUNTS).unwrap();
        assert_eq!(
            seed,
            Seed {
                background: 1,
                body: 1,
                accessory: 4,
                head: 2,
                glasses: 3,
            }
        );

        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = i as u8;
        }
        let seed = derive_seed(7, &Entropy(bytes), &COUNTS).unwrap();
        assert_eq!(
            seed,
            Seed {
                background: 0,
                body: 5,
                accessory: 3,
                head: 5,
                glasses: 1,
            }
        );
    }

    #[test]
    fn derive_seed_stays_in_range() {
        for id in 0..200u64 {
            let s = derive_seed(id, &Entropy([id as u8; 32]), &COUNTS).unwrap();
            assert!((s.background as usize) < COUNTS.backgrounds);
            assert!((s.body as usize) < COUNTS.bodies);
            assert!((s.accessory as usize) < COUNTS.accessories);
            assert!((s.head as usize) < COUNTS.heads);
            assert!((s.glasses as usize) < COUNTS.glasses);
        }
    }

    #[test]
    fn empty_category_is_resolution_error() {
        let counts = CategoryCounts {
            heads: 0,
            ..COUNTS
        };
        let err = derive_seed(1, &Entropy::zero(), &counts).unwrap_err();
        assert!(matches!(err, NounError::Resolution(_)), "{err}");
    }
}
