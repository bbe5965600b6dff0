//! Fuzz target for InboundFrame::classify
//!
//! Classification must accept any text. Invariants:
//! - Never panics
//! - Anything but a JSON object is Unparseable and keeps the raw text
//! - A JSON object is only Unparseable when its kind is userCount

#![no_main]

use libfuzzer_sys::fuzz_target;
use randomchat_proto::InboundFrame;

fuzz_target!(|raw: &str| {
    let frame = InboundFrame::classify(raw);

    let object = serde_json::from_str::<serde_json::Value>(raw)
        .ok()
        .filter(serde_json::Value::is_object);
    match frame {
        InboundFrame::Unparseable { raw: kept } => {
            assert_eq!(kept, raw, "unparseable frame must keep raw text");
            if let Some(object) = object {
                let kind = object.get("kind").and_then(serde_json::Value::as_str);
                assert_eq!(kind, Some("userCount"), "JSON object rejected: {raw}");
            }
        },
        _ => assert!(object.is_some(), "non-object input classified as structured: {raw}"),
    }
});
