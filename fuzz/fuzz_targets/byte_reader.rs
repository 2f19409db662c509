#![no_main]

use libfuzzer_sys::fuzz_target;
use primitives::{ByteReader, GuidLayout};

fuzz_target!(|data: &[u8]| {
    let mut reader = ByteReader::new(data);
    let mut idx = 0usize;

    // Use input bytes to drive a bounded sequence of operations.
    while idx < data.len() && idx < 1024 {
        let op = data[idx] % 7;
        idx += 1;

        let result = match op {
            0 => reader.read_varu32().map(drop),
            1 => reader.read_vars32().map(drop),
            2 => reader.read_bool_strict().map(drop),
            3 => reader.read_f32().map(drop),
            4 => reader.read_str().map(drop),
            5 => reader.read_guid(GuidLayout::Mixed).map(drop),
            _ => reader.skip(usize::from(data[idx - 1] % 8)),
        };
        if result.is_err() {
            break;
        }
    }
    assert!(reader.position() <= data.len());
});
