use sha2::{Digest, Sha256};

/// Computes the content fingerprint of an artifact
///
/// The fingerprint is a SHA-256 digest rendered as lowercase hex. It
/// is used purely for equality comparison between the artifact about
/// to be written and what is already on disk.
pub fn fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_deterministic() {
        assert_eq!(fingerprint(b"Hello"), fingerprint(b"Hello"));
    }

    #[test]
    fn test_fingerprint_differs_on_content() {
        assert_ne!(fingerprint(b"Hello"), fingerprint(b"World"));
    }

    #[test]
    fn test_fingerprint_differs_on_single_byte() {
        assert_ne!(fingerprint(b"Hello"), fingerprint(b"Hello "));
    }

    #[test]
    fn test_fingerprint_empty_input() {
        // SHA-256 of the empty string
        assert_eq!(
            fingerprint(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_fingerprint_is_hex() {
        let fp = fingerprint(b"anything");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
