//! Object key derivation.
//!
//! Keys are `{orientation}/{random-id}.mp4`. The random id is 32 bytes from
//! the thread-local CSPRNG, URL-safe base64 without padding. Uniqueness
//! relies solely on the random source's entropy, never on file contents;
//! collisions are probabilistically negligible across the store's lifetime.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use clipdock_core::constants::VIDEO_EXTENSION;
use clipdock_core::models::Orientation;
use rand::RngCore;

const KEY_RANDOM_BYTES: usize = 32;

/// Derive a fresh object key for a video of the given orientation.
///
/// Keys are never reused and never mutated once assigned.
pub fn derive_object_key(orientation: Orientation) -> String {
    let mut raw = [0u8; KEY_RANDOM_BYTES];
    rand::rng().fill_bytes(&mut raw);
    format!(
        "{}/{}.{}",
        orientation.key_prefix(),
        URL_SAFE_NO_PAD.encode(raw),
        VIDEO_EXTENSION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_shape() {
        let key = derive_object_key(Orientation::Landscape);
        let (prefix, rest) = key.split_once('/').expect("key has a path segment");
        assert_eq!(prefix, "landscape");
        let id = rest.strip_suffix(".mp4").expect("key has the mp4 extension");
        // 32 bytes of unpadded URL-safe base64
        assert_eq!(id.len(), 43);
        assert!(id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_keys_are_pairwise_distinct() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let key = derive_object_key(Orientation::Other);
            assert!(seen.insert(key), "derived a duplicate object key");
        }
    }

    #[test]
    fn test_prefix_follows_orientation() {
        assert!(derive_object_key(Orientation::Landscape).starts_with("landscape/"));
        assert!(derive_object_key(Orientation::Portrait).starts_with("portrait/"));
        assert!(derive_object_key(Orientation::Other).starts_with("other/"));
    }
}
