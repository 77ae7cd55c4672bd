//! Property-based tests for the wire codec.

use proptest::prelude::*;
use timeflies_core::{Marker, Position, WireError, WireMessage};

fn message_strategy() -> impl Strategy<Value = WireMessage> {
    prop_oneof![
        ".{0,64}".prop_map(|text| WireMessage::TextChanged { text }),
        (0usize..256, any::<char>(), any::<u32>(), any::<u32>()).prop_map(|(index, ch, x, y)| {
            WireMessage::MarkerObserved { index, marker: Marker::new(ch, Position::new(x, y)) }
        }),
    ]
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(message in message_strategy()) {
        let frame = message.encode().unwrap();
        prop_assert_eq!(WireMessage::decode(&frame).unwrap(), message);
    }

    #[test]
    fn prop_decode_never_panics(frame in prop::collection::vec(any::<u8>(), 0..128)) {
        match WireMessage::decode(&frame) {
            Ok(_) | Err(WireError::Decode(_)) => {},
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
    }
}
