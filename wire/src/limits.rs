//! Configurable limits for bounded decoding.

/// Wire-level limits for framing.
///
/// These limits are enforced while decoding to prevent resource exhaustion
/// from hostile length prefixes. Message-level limits (nesting depth,
/// repeated element counts) belong to the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum declared length of a single length-delimited block.
    pub max_block_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            // 1 MiB covers any realistic packet field
            max_block_len: 1024 * 1024,
        }
    }
}

impl Limits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_block_len: 1024,
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_block_len: usize::MAX,
        }
    }
}
