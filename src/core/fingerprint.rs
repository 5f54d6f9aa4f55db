//! Content fingerprints for change detection.

use sha2::{Digest, Sha256};

const DIGEST_PREFIX_LEN: usize = 16;

/// Cheap, comparable digest of a text buffer.
///
/// Only used to decide whether a buffer still matches what was last loaded or saved. Equal
/// content always yields equal fingerprints; distinct content collides with negligible
/// probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    len: usize,
    digest: [u8; DIGEST_PREFIX_LEN],
}

impl Fingerprint {
    pub fn compute(content: &str) -> Self {
        let hash = Sha256::digest(content.as_bytes());
        let mut digest = [0u8; DIGEST_PREFIX_LEN];
        digest.copy_from_slice(&hash[..DIGEST_PREFIX_LEN]);

        Self {
            len: content.len(),
            digest,
        }
    }

    /// Byte length of the content this fingerprint was computed from.
    pub fn content_len(&self) -> usize {
        self.len
    }

    /// Returns whether `content` would produce this fingerprint.
    pub fn matches(&self, content: &str) -> bool {
        // Length check first: most edits change the length and skip hashing entirely.
        content.len() == self.len && Self::compute(content) == *self
    }
}

impl Default for Fingerprint {
    fn default() -> Self {
        Self::compute("")
    }
}
