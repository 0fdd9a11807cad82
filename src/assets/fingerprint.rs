use sha2::{Digest, Sha256};

/// Length of an asset identity in hex characters.
pub const FINGERPRINT_LEN: usize = 8;

/// First 8 hex characters of the SHA-256 of `bytes`. Identical content
/// always yields the same identity; distinct assets practically never
/// collide within this prefix.
pub fn fingerprint(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest
        .iter()
        .take(FINGERPRINT_LEN / 2)
        .map(|b| format!("{b:02x}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_is_sha256_prefix() {
        // sha256("hello") = 2cf24dba5fb0a30e...
        assert_eq!(fingerprint(b"hello"), "2cf24dba");
    }

    #[test]
    fn test_fingerprint_length_and_stability() {
        let a = fingerprint(b"some image bytes");
        let b = fingerprint(b"some image bytes");
        assert_eq!(a.len(), FINGERPRINT_LEN);
        assert_eq!(a, b);
        assert_ne!(a, fingerprint(b"other image bytes"));
    }
}
