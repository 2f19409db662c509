//! Reusable scratch state for encoding.

/// Payload lengths computed by the sizing pass, consumed by the write pass.
///
/// Every nested message and every message array reserves one slot in
/// pre-order, so the write pass can emit each block prefix without
/// buffering the payload first. Reusing one scratch across calls avoids
/// reallocating the slot vector.
#[derive(Debug, Default)]
pub struct EncodeScratch {
    lens: Vec<usize>,
}

impl EncodeScratch {
    /// Creates a new scratch buffer with no pre-allocated capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn clear(&mut self) {
        self.lens.clear();
    }

    pub(crate) fn reserve_slot(&mut self) -> usize {
        self.lens.push(0);
        self.lens.len() - 1
    }

    pub(crate) fn fill_slot(&mut self, slot: usize, len: usize) {
        self.lens[slot] = len;
    }

    pub(crate) fn slot(&self, slot: usize) -> usize {
        self.lens[slot]
    }
}
