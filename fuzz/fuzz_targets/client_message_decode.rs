//! Fuzz target for ClientMessage::decode
//!
//! The server decodes every client frame with this. It should NEVER panic,
//! and anything it accepts must re-encode to a frame that decodes to the
//! same content.

#![no_main]

use libfuzzer_sys::fuzz_target;
use randomchat_proto::ClientMessage;

fuzz_target!(|raw: &str| {
    let Ok(message) = ClientMessage::decode(raw) else {
        return;
    };

    let encoded = message.encode().expect("accepted message must encode");
    let decoded = ClientMessage::decode(&encoded).expect("re-encoded message must decode");
    assert_eq!(decoded.content(), message.content());
});
