//! Property-based tests for App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.
//! This ensures behavioral correctness across all possible execution paths.

use proptest::prelude::*;
use randomchat_app::{App, AppAction, AppEvent, KeyInput, Origin, Phase};
use randomchat_client::Endpoint;

/// Raw payloads covering every classification branch.
fn payload_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..1000).prop_map(|n| format!(r#"{{"kind":"userCount","userCount":{n}}}"#)),
        prop_oneof![
            Just("connectedToServer"),
            Just("connectedToUser"),
            Just("userLeft"),
            Just("somethingElse"),
        ]
        .prop_map(|s| format!(r#"{{"kind":"statusMessage","status":"{s}"}}"#)),
        "[a-z ]{0,20}".prop_map(|c| format!(r#"{{"messageContent":"{c}"}}"#)),
        ".{0,20}",
    ]
}

#[derive(Debug, Clone)]
enum Input {
    Event(AppEvent),
    Start,
    Send(String),
    End,
}

fn input_strategy() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => payload_strategy().prop_map(|raw| Input::Event(AppEvent::MessageReceived(raw))),
        1 => Just(Input::Event(AppEvent::Opened)),
        1 => Just(Input::Event(AppEvent::Closed)),
        1 => any::<char>().prop_map(|c| Input::Event(AppEvent::Key(KeyInput::Char(c)))),
        1 => Just(Input::Event(AppEvent::Key(KeyInput::Enter))),
        1 => Just(Input::Start),
        2 => ".{0,12}".prop_map(Input::Send),
        1 => Just(Input::End),
    ]
}

fn sends(actions: &[AppAction]) -> usize {
    actions.iter().filter(|a| matches!(a, AppAction::SendText { .. })).count()
}

proptest! {
    /// Property: inbound frames never shrink the transcript, and a userCount
    /// frame never adds an entry
    #[test]
    fn prop_transcript_only_grows(payloads in prop::collection::vec(payload_strategy(), 0..50)) {
        let mut app = App::new(Endpoint::default());
        app.start_session().expect("start");
        app.handle(AppEvent::Opened);

        for raw in payloads {
            let before = app.session().transcript().len();
            let is_count = raw.contains(r#""kind":"userCount""#);
            app.handle(AppEvent::MessageReceived(raw));
            let after = app.session().transcript().len();

            prop_assert!(after >= before);
            if is_count {
                prop_assert_eq!(after, before);
            } else {
                prop_assert_eq!(after, before + 1);
            }
        }
    }

    /// Property: sends are accepted only while paired, blank text never
    /// produces a frame or an entry, and peer count is zero once closed
    #[test]
    fn prop_session_invariants(inputs in prop::collection::vec(input_strategy(), 0..80)) {
        let mut app = App::new(Endpoint::default());

        for input in inputs {
            let phase = app.phase();
            let before = app.session().transcript().len();

            match input {
                Input::Event(event) => {
                    let was_closed = matches!(event, AppEvent::Closed);
                    let actions = app.handle(event);
                    if sends(&actions) > 0 {
                        prop_assert_eq!(phase, Phase::PairedChatting);
                    }
                    if was_closed && phase.is_active() {
                        prop_assert_eq!(app.phase(), Phase::Closed);
                    }
                },
                Input::Start => {
                    let result = app.start_session();
                    prop_assert_eq!(result.is_ok(), !phase.is_active());
                    if result.is_ok() {
                        prop_assert!(app.session().transcript().is_empty());
                    }
                },
                Input::Send(text) => {
                    let result = app.send_text(&text);
                    let after = app.session().transcript().len();
                    if text.trim().is_empty() {
                        prop_assert_eq!(result, Ok(vec![]));
                        prop_assert_eq!(after, before);
                    } else if phase == Phase::PairedChatting {
                        let actions = result.expect("accepted while paired");
                        prop_assert_eq!(sends(&actions), 1);
                        prop_assert_eq!(after, before + 1);
                        let last = app.session().transcript().last().expect("entry");
                        prop_assert_eq!(last.origin(), Origin::SelfSent);
                    } else {
                        prop_assert!(result.is_err());
                        prop_assert_eq!(after, before);
                    }
                },
                Input::End => {
                    app.end_session();
                    if phase.is_active() {
                        prop_assert_eq!(app.phase(), Phase::Closed);
                    } else {
                        prop_assert_eq!(app.phase(), phase);
                    }
                },
            }

            if matches!(app.phase(), Phase::Closed | Phase::Idle) {
                prop_assert_eq!(app.snapshot().peer_count, 0);
            }
            prop_assert!(app.input().chars().count() <= randomchat_app::MAX_INPUT_CHARS);
        }
    }

    /// Property: inbound frames outside an active session change nothing
    #[test]
    fn prop_idle_ignores_frames(payloads in prop::collection::vec(payload_strategy(), 0..20)) {
        let mut app = App::new(Endpoint::default());

        for raw in payloads {
            prop_assert!(app.handle(AppEvent::MessageReceived(raw)).is_empty());
        }

        prop_assert_eq!(app.phase(), Phase::Idle);
        prop_assert!(app.session().transcript().is_empty());
    }
}
