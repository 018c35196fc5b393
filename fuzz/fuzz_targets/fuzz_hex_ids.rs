#![no_main]

use libfuzzer_sys::fuzz_target;

use tipline_types::{SourceHash, TipId};

// Identifier parsing must reject malformed hex without panicking, and
// anything it accepts must print back to the same bytes.
fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(id) = TipId::from_hex(text) {
        assert_eq!(TipId::from_hex(&id.to_string()).ok(), Some(id));
    }
    let _ = SourceHash::from_hex(text);
    let _ = tipline_crypto::blake2b_256(data);
});
