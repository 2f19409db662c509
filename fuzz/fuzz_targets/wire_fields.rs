#![no_main]

use libfuzzer_sys::fuzz_target;
use wire::{FieldIter, Limits, RawValue};

fuzz_target!(|data: &[u8]| {
    let limits = Limits::for_testing();
    let mut iter = FieldIter::new(data, &limits);
    let mut last = 0usize;
    while let Some(Ok(field)) = iter.next() {
        assert!(iter.position() > last);
        last = iter.position();
        if let RawValue::LengthDelimited(block) = field.value {
            assert!(block.len() <= limits.max_block_len);
        }
    }
});
