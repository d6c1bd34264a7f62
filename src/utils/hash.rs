use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256, the content hash the scan service keys reports by.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);

    let hash_result = hasher.finalize();
    hex::encode(hash_result)
}

/// Compare a server-reported digest against a local one, ignoring case.
pub fn same_digest(local: &str, reported: &str) -> bool {
    local.eq_ignore_ascii_case(reported.trim())
}
