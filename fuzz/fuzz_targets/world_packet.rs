#![no_main]

use codec::{decode_packet_with_limits, encode_packet_to_vec, CodecLimits, Message};
use demo_packets::WorldPacket;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let schema = WorldPacket::schema();
    let limits = CodecLimits::for_testing();

    let Ok(packet) = decode_packet_with_limits(&schema, data, &limits) else {
        return;
    };
    // Anything that decodes re-encodes to a canonical form that is stable.
    let Ok(canonical) = encode_packet_to_vec(&packet) else {
        return;
    };
    let again = decode_packet_with_limits(&schema, &canonical, &CodecLimits::unlimited())
        .expect("canonical encoding must decode");
    assert_eq!(encode_packet_to_vec(&again).ok(), Some(canonical));

    let _ = WorldPacket::from_packet(&packet);
});
