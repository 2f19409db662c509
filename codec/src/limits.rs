//! Limits for codec-level decoding.

use wire::Limits as WireLimits;

/// Codec-specific limits enforced during packet decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecLimits {
    /// Maximum size of a whole encoded packet.
    pub max_message_bytes: usize,
    /// Maximum number of nested message levels below the top-level packet.
    pub max_depth: usize,
    /// Maximum number of elements in one message array.
    pub max_array_elements: usize,
    /// Framing limits applied to every block.
    pub wire: WireLimits,
}

impl Default for CodecLimits {
    fn default() -> Self {
        Self {
            max_message_bytes: 1024 * 1024,
            max_depth: 32,
            max_array_elements: 4096,
            wire: WireLimits::default(),
        }
    }
}

impl CodecLimits {
    /// Creates limits suitable for testing with smaller values.
    #[must_use]
    pub const fn for_testing() -> Self {
        Self {
            max_message_bytes: 4096,
            max_depth: 8,
            max_array_elements: 64,
            wire: WireLimits::for_testing(),
        }
    }

    /// Creates limits with no restrictions (use with caution).
    #[must_use]
    pub const fn unlimited() -> Self {
        Self {
            max_message_bytes: usize::MAX,
            max_depth: usize::MAX,
            max_array_elements: usize::MAX,
            wire: WireLimits::unlimited(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_limits_are_reasonable() {
        let limits = CodecLimits::default();
        assert_eq!(limits.max_depth, 32);
        assert!(limits.max_array_elements >= 1024);
        assert!(limits.max_message_bytes >= limits.wire.max_block_len);
    }

    #[test]
    fn testing_limits_smaller() {
        let test_limits = CodecLimits::for_testing();
        let default_limits = CodecLimits::default();
        assert!(test_limits.max_depth < default_limits.max_depth);
        assert!(test_limits.max_message_bytes < default_limits.max_message_bytes);
        assert!(test_limits.wire.max_block_len < default_limits.wire.max_block_len);
    }

    #[test]
    fn unlimited_limits() {
        let limits = CodecLimits::unlimited();
        assert_eq!(limits.max_depth, usize::MAX);
        assert_eq!(limits.wire.max_block_len, usize::MAX);
    }
}
