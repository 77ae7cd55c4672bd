//! Property-based tests for the transition function.
//!
//! Tests verify that invariants hold under arbitrary message sequences.

use proptest::prelude::*;
use timeflies_app::{DisplayText, LetterMap, LetterSource, Model, Msg, TrackingMode, update};
use timeflies_core::{Marker, Position};

fn marker_strategy() -> impl Strategy<Value = Marker> {
    (any::<char>(), 0u32..2000, 0u32..2000).prop_map(|(ch, x, y)| Marker::new(ch, Position::new(x, y)))
}

/// Generate random messages.
fn msg_strategy() -> impl Strategy<Value = Msg> {
    prop_oneof![
        1 => Just(Msg::RequestEdit),
        1 => "[a-z ]{0,8}".prop_map(Msg::EditedText),
        1 => "[a-z ]{0,8}".prop_map(Msg::SubmitEdit),
        2 => Just(Msg::ToggleLocalTracking),
        2 => Just(Msg::ToggleRemoteTracking),
        3 => (0usize..8, marker_strategy())
            .prop_map(|(index, marker)| Msg::MarkerObserved { index, marker }),
        3 => (0usize..8, marker_strategy())
            .prop_map(|(index, marker)| Msg::RemoteMarkerObserved { index, marker }),
        1 => "[a-z ]{0,8}".prop_map(Msg::RemoteTextChanged),
    ]
}

fn toggle_strategy() -> impl Strategy<Value = Msg> {
    prop_oneof![Just(Msg::ToggleLocalTracking), Just(Msg::ToggleRemoteTracking)]
}

/// Reference mode machine for toggles.
fn expected_mode(mode: TrackingMode, msg: &Msg) -> TrackingMode {
    match (mode, msg) {
        (TrackingMode::Local, Msg::ToggleLocalTracking)
        | (TrackingMode::Remote, Msg::ToggleRemoteTracking) => TrackingMode::Disabled,
        (_, Msg::ToggleLocalTracking) => TrackingMode::Local,
        (_, Msg::ToggleRemoteTracking) => TrackingMode::Remote,
        (mode, _) => mode,
    }
}

proptest! {
    #[test]
    fn prop_toggles_follow_mode_cycle(toggles in prop::collection::vec(toggle_strategy(), 0..40)) {
        let mut model = Model::new("hi");
        let mut mode = TrackingMode::Disabled;

        for toggle in toggles {
            mode = expected_mode(mode, &toggle);
            model = update(toggle, model);
            prop_assert_eq!(model.letters.mode(), mode);
        }
    }

    #[test]
    fn prop_mode_switch_preserves_markers(
        entries in prop::collection::btree_map(0usize..16, marker_strategy(), 0..8),
        start_local in any::<bool>(),
    ) {
        let (letters, toggle) = if start_local {
            (LetterSource::Local(entries.clone()), Msg::ToggleRemoteTracking)
        } else {
            (LetterSource::Remote(entries.clone()), Msg::ToggleLocalTracking)
        };
        let model = Model { letters, text: DisplayText::Showing("x".into()) };

        let switched = update(toggle, model);
        prop_assert_eq!(switched.letters.markers(), Some(&entries));
    }

    #[test]
    fn prop_local_marker_inserts_only_when_local(
        msgs in prop::collection::vec(msg_strategy(), 0..30),
        index in 0usize..8,
        marker in marker_strategy(),
    ) {
        let mut model = Model::new("time");
        for msg in msgs {
            model = update(msg, model);
        }

        let next = update(Msg::MarkerObserved { index, marker }, model.clone());
        match &model.letters {
            LetterSource::Local(before) => {
                let mut expected: LetterMap = before.clone();
                expected.insert(index, marker);
                prop_assert_eq!(next.letters, LetterSource::Local(expected));
            },
            _ => prop_assert_eq!(&next, &model),
        }
    }

    #[test]
    fn prop_submit_always_shows(
        msgs in prop::collection::vec(msg_strategy(), 0..30),
        text in "[a-z]{0,8}",
    ) {
        let mut model = Model::new("start");
        for msg in msgs {
            model = update(msg, model);
        }

        let letters = model.letters.clone();
        let next = update(Msg::SubmitEdit(text.clone()), model);
        prop_assert_eq!(next.text, DisplayText::Showing(text));
        prop_assert_eq!(next.letters, letters);
    }

    #[test]
    fn prop_text_messages_never_touch_letters(
        msgs in prop::collection::vec(msg_strategy(), 0..30),
        text in "[a-z]{0,8}",
    ) {
        let mut model = Model::new("start");
        for msg in msgs {
            model = update(msg, model);
        }

        for msg in [
            Msg::RequestEdit,
            Msg::EditedText(text.clone()),
            Msg::RemoteTextChanged(text.clone()),
        ] {
            let before = model.letters.clone();
            model = update(msg, model);
            prop_assert_eq!(&model.letters, &before);
        }
    }
}
