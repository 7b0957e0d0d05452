//! One-way, salted password hashing with a bounded input length.
//!
//! Secrets are truncated to [`MAX_SECRET_BYTES`] before hashing AND before
//! verification. The truncation must stay identical on both paths: changing
//! it on one side silently invalidates every previously stored credential.

/// Maximum number of secret bytes fed into the hash function.
pub const MAX_SECRET_BYTES: usize = 72;

fn truncated(secret: &str) -> &[u8] {
    let bytes = secret.as_bytes();
    &bytes[..bytes.len().min(MAX_SECRET_BYTES)]
}

/// Hashes a secret with a per-call random salt embedded in the returned
/// PHC-format digest.
pub fn generate_hash(secret: &str) -> String {
    password_auth::generate_hash(truncated(secret))
}

/// Verifies a secret against a stored digest. Malformed digests are treated as
/// a failed verification, never an error.
pub fn verify(secret: &str, digest: &str) -> bool {
    password_auth::verify_password(truncated(secret), digest).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verify_round_trip() {
        let digest = generate_hash("s3cret!");
        assert!(verify("s3cret!", &digest));
        assert!(!verify("wrong", &digest));
    }

    #[test]
    fn salts_are_per_call() {
        assert_ne!(generate_hash("s3cret!"), generate_hash("s3cret!"));
    }

    #[test]
    fn truncation_is_symmetric_beyond_72_bytes() {
        let prefix = "x".repeat(MAX_SECRET_BYTES);
        let long_a = format!("{prefix}AAAA");
        let long_b = format!("{prefix}BBBB");

        // Secrets differing only beyond byte 72 hash and verify identically
        let digest = generate_hash(&long_a);
        assert!(verify(&long_b, &digest));
        assert!(verify(&prefix, &digest));

        // Secrets differing inside the first 72 bytes do not
        let different = format!("y{}", &prefix[1..]);
        assert!(!verify(&different, &digest));
    }

    #[test]
    fn malformed_digest_is_false_not_a_panic() {
        assert!(!verify("s3cret!", "not-a-phc-digest"));
        assert!(!verify("s3cret!", ""));
    }
}
