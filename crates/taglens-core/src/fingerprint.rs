//! Request fingerprinting
//!
//! A fingerprint is the deterministic cache key derived from normalized
//! request text: equal normalized text always maps to the same key, and the
//! 256-bit digest makes collisions between different texts negligible.

use sha2::{Digest, Sha256};

/// Normalize request text before fingerprinting: trim leading/trailing
/// whitespace and collapse internal whitespace runs to single spaces.
///
/// Returns an empty string for blank input; callers reject that case before
/// fingerprinting.
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Deterministic cache key for normalized request text
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Compute the fingerprint of already-normalized text.
    ///
    /// Precondition: `normalized` is non-empty. Empty input is rejected by
    /// the service before any fingerprinting happens.
    pub fn of(normalized: &str) -> Self {
        debug_assert!(
            !normalized.is_empty(),
            "fingerprinting requires non-empty normalized text"
        );

        let mut hasher = Sha256::new();
        hasher.update(normalized.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Eight hex chars is plenty for log correlation
        let hex = self.to_string();
        write!(f, "Fingerprint({})", &hex[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_collapses() {
        assert_eq!(normalize("  hello   world \n"), "hello world");
        assert_eq!(normalize("one\ttwo\nthree"), "one two three");
        assert_eq!(normalize("already normal"), "already normal");
    }

    #[test]
    fn test_normalize_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n  "), "");
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let a = Fingerprint::of("quantum error correction");
        let b = Fingerprint::of("quantum error correction");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_fingerprint_distinct_texts() {
        let a = Fingerprint::of("graph neural networks");
        let b = Fingerprint::of("graph neural network");
        assert_ne!(a, b);
    }

    #[test]
    fn test_equivalent_whitespace_same_fingerprint() {
        let a = Fingerprint::of(&normalize("  deep   learning "));
        let b = Fingerprint::of(&normalize("deep learning"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_display_is_hex() {
        let fp = Fingerprint::of("abc");
        let hex = fp.to_string();
        assert_eq!(hex.len(), 64);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
