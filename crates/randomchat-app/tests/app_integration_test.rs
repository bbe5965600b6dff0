//! Integration tests for App and Bridge behavior.
//!
//! Synthetic transport notices are fed through the Bridge into the App, the
//! same path the runtime uses, without a socket.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - App phase reflects the expected transition
//! - Transcript gained exactly the expected entries
//! - Transport commands carry the exact wire payload

use randomchat_app::{
    App, AppAction, AppEvent, Bridge, MATCH_FOUND_TEXT, Origin, PEER_LEFT_TEXT, Phase,
    TranscriptEntry, WELCOME_TEXT,
};
use randomchat_client::{Endpoint, TransportCommand, TransportNotice};

/// Process actions from App through Bridge and update App state.
fn process_actions(
    app: &mut App,
    bridge: &mut Bridge,
    actions: Vec<AppAction>,
) -> Vec<TransportCommand> {
    for action in actions {
        match action {
            AppAction::Connect { .. } | AppAction::SendText { .. } | AppAction::Disconnect => {
                let events = bridge.process_app_action(action);
                for event in events {
                    app.handle(event);
                }
            },
            AppAction::Render | AppAction::Quit => {},
        }
    }

    bridge.take_outgoing()
}

/// Simulate receiving a payload from the server.
fn receive(app: &mut App, bridge: &mut Bridge, raw: &str) {
    let connection = bridge.connection().expect("live connection");
    let events = bridge.handle_notice(TransportNotice::text(connection, raw));
    for event in events {
        app.handle(event);
    }
}

/// App whose session has started and whose transport has opened.
fn connecting_app() -> (App, Bridge) {
    let mut app = App::new(Endpoint::default());
    let mut bridge = Bridge::new();

    let actions = app.start_session().expect("start session");
    let commands = process_actions(&mut app, &mut bridge, actions);
    assert!(matches!(commands.as_slice(), [TransportCommand::Connect { .. }]));
    assert_eq!(app.phase(), Phase::Connecting);

    (app, bridge)
}

fn open(app: &mut App, bridge: &mut Bridge) {
    let connection = bridge.connection().expect("pending connection");
    for event in bridge.handle_notice(TransportNotice::opened(connection)) {
        app.handle(event);
    }
}

/// App paired with a peer, following scenarios A and B.
fn paired_app() -> (App, Bridge) {
    let (mut app, mut bridge) = connecting_app();
    open(&mut app, &mut bridge);
    receive(&mut app, &mut bridge, r#"{"kind":"statusMessage","status":"connectedToServer"}"#);
    receive(&mut app, &mut bridge, r#"{"kind":"statusMessage","status":"connectedToUser"}"#);
    assert_eq!(app.phase(), Phase::PairedChatting);
    (app, bridge)
}

fn last_entry(app: &App) -> TranscriptEntry {
    app.session().transcript().last().cloned().expect("transcript entry")
}

#[test]
fn scenario_a_welcome_while_connecting() {
    let (mut app, _bridge) = connecting_app();

    // The manager only forwards text once open; drive the App directly.
    app.handle(AppEvent::MessageReceived(
        r#"{"kind":"statusMessage","status":"connectedToServer"}"#.to_string(),
    ));

    // Oracle: waiting with exactly one welcome line
    assert_eq!(app.phase(), Phase::WaitingForPeer);
    assert_eq!(app.session().transcript().entries(), &[TranscriptEntry::new(
        Origin::System,
        WELCOME_TEXT
    )]);
}

#[test]
fn scenario_b_match_found() {
    let (mut app, mut bridge) = connecting_app();
    open(&mut app, &mut bridge);
    receive(&mut app, &mut bridge, r#"{"kind":"statusMessage","status":"connectedToServer"}"#);

    receive(&mut app, &mut bridge, r#"{"kind":"statusMessage","status":"connectedToUser"}"#);

    assert_eq!(app.phase(), Phase::PairedChatting);
    assert_eq!(app.session().transcript().len(), 2);
    assert_eq!(last_entry(&app), TranscriptEntry::new(Origin::System, MATCH_FOUND_TEXT));
}

#[test]
fn scenario_c_send_while_paired() {
    let (mut app, mut bridge) = paired_app();
    let before = app.session().transcript().len();

    let actions = app.send_text("hello").expect("send accepted");
    let commands = process_actions(&mut app, &mut bridge, actions);

    // Oracle: optimistic entry plus exactly one wire frame
    assert_eq!(app.session().transcript().len(), before + 1);
    assert_eq!(last_entry(&app), TranscriptEntry::new(Origin::SelfSent, "hello"));
    match commands.as_slice() {
        [TransportCommand::Transmit { payload, .. }] => assert_eq!(
            payload,
            r#"{"kind":"clientMessage","messageContent":"hello","receiver":"server","sender":"client"}"#
        ),
        other => panic!("expected one transmit, got {other:?}"),
    }
}

#[test]
fn scenario_d_peer_message() {
    let (mut app, mut bridge) = paired_app();

    receive(&mut app, &mut bridge, r#"{"messageContent":"hi there"}"#);

    assert_eq!(last_entry(&app), TranscriptEntry::new(Origin::Peer, "hi there"));
    assert_eq!(app.phase(), Phase::PairedChatting);
}

#[test]
fn scenario_e_peer_left_keeps_count() {
    let (mut app, mut bridge) = paired_app();
    receive(&mut app, &mut bridge, r#"{"kind":"userCount","userCount":6}"#);
    assert_eq!(app.snapshot().peer_count, 6);

    receive(&mut app, &mut bridge, r#"{"kind":"statusMessage","status":"userLeft"}"#);

    assert_eq!(app.phase(), Phase::WaitingForPeer);
    assert_eq!(last_entry(&app), TranscriptEntry::new(Origin::System, PEER_LEFT_TEXT));
    assert_eq!(app.snapshot().peer_count, 6);
}

#[test]
fn scenario_f_unparseable_payload() {
    let (mut app, mut bridge) = paired_app();

    receive(&mut app, &mut bridge, "oops");

    assert_eq!(last_entry(&app), TranscriptEntry::new(Origin::System, "oops"));
    assert_eq!(app.phase(), Phase::PairedChatting);
}

#[test]
fn null_payload_is_a_system_line() {
    let (mut app, mut bridge) = paired_app();

    receive(&mut app, &mut bridge, "null");

    assert_eq!(last_entry(&app), TranscriptEntry::new(Origin::System, "null"));
    assert_eq!(app.phase(), Phase::PairedChatting);
}

#[test]
fn user_count_adds_no_entry() {
    let (mut app, mut bridge) = paired_app();
    let before = app.session().transcript().len();

    receive(&mut app, &mut bridge, r#"{"kind":"userCount","userCount":2}"#);

    assert_eq!(app.session().transcript().len(), before);
    assert_eq!(app.snapshot().peer_count, 2);
}

#[test]
fn transport_close_ends_session() {
    let (mut app, mut bridge) = paired_app();
    receive(&mut app, &mut bridge, r#"{"kind":"userCount","userCount":3}"#);

    let connection = bridge.connection().expect("live connection");
    for event in bridge.handle_notice(TransportNotice::closed(connection, None)) {
        app.handle(event);
    }

    // Oracle: closed, count reset, transcript kept for display
    assert_eq!(app.phase(), Phase::Closed);
    assert_eq!(app.snapshot().peer_count, 0);
    assert!(!app.session().transcript().is_empty());
    assert!(bridge.connection().is_none());
}

#[test]
fn restart_after_close_has_empty_transcript() {
    let (mut app, mut bridge) = paired_app();
    let actions = app.end_session();
    let commands = process_actions(&mut app, &mut bridge, actions);
    assert!(matches!(commands.as_slice(), [TransportCommand::Disconnect { .. }]));

    let actions = app.start_session().expect("restart");
    let commands = process_actions(&mut app, &mut bridge, actions);

    assert!(matches!(commands.as_slice(), [TransportCommand::Connect { .. }]));
    assert_eq!(app.phase(), Phase::Connecting);
    assert!(app.session().transcript().is_empty());
}

#[test]
fn stale_notice_after_restart_is_dropped() {
    let (mut app, mut bridge) = paired_app();
    let old = bridge.connection().expect("live connection");

    let actions = app.end_session();
    process_actions(&mut app, &mut bridge, actions);
    let actions = app.start_session().expect("restart");
    process_actions(&mut app, &mut bridge, actions);

    let events = bridge.handle_notice(TransportNotice::text(old, r#"{"messageContent":"late"}"#));
    assert!(events.is_empty());
    assert!(app.session().transcript().is_empty());
}

/// One App/Bridge pair in each phase.
fn app_in_every_phase() -> Vec<(App, Bridge)> {
    let idle = (App::new(Endpoint::default()), Bridge::new());

    let connecting = connecting_app();

    let (mut app, mut bridge) = connecting_app();
    open(&mut app, &mut bridge);
    let waiting = (app, bridge);

    let paired = paired_app();

    let (mut app, mut bridge) = paired_app();
    let actions = app.end_session();
    process_actions(&mut app, &mut bridge, actions);
    let closed = (app, bridge);

    vec![idle, connecting, waiting, paired, closed]
}

#[test]
fn blank_send_is_dropped_in_every_phase() {
    let phases: Vec<Phase> = app_in_every_phase().iter().map(|(app, _)| app.phase()).collect();
    assert_eq!(phases, vec![
        Phase::Idle,
        Phase::Connecting,
        Phase::WaitingForPeer,
        Phase::PairedChatting,
        Phase::Closed,
    ]);

    for (mut app, mut bridge) in app_in_every_phase() {
        let before = app.session().transcript().len();

        for text in ["", "   ", "\t"] {
            let actions = app.send_text(text).expect("blank send is not an error");
            assert!(actions.is_empty(), "{} produced actions for {text:?}", app.phase());
            assert!(process_actions(&mut app, &mut bridge, actions).is_empty());
        }

        assert_eq!(app.session().transcript().len(), before, "{}", app.phase());
    }
}

#[test]
fn send_while_waiting_is_rejected() {
    let (mut app, mut bridge) = connecting_app();
    open(&mut app, &mut bridge);

    assert!(app.send_text("hello").is_err());
    assert!(app.session().transcript().is_empty());
    assert!(bridge.take_outgoing().is_empty());
}

#[test]
fn typed_message_flows_to_wire() {
    let (mut app, mut bridge) = paired_app();
    let mut commands = Vec::new();

    for c in "yo".chars() {
        let actions = app.handle(AppEvent::Key(randomchat_app::KeyInput::Char(c)));
        commands.extend(process_actions(&mut app, &mut bridge, actions));
    }
    let actions = app.handle(AppEvent::Key(randomchat_app::KeyInput::Enter));
    commands.extend(process_actions(&mut app, &mut bridge, actions));

    assert_eq!(commands.len(), 1);
    assert_eq!(last_entry(&app), TranscriptEntry::new(Origin::SelfSent, "yo"));
}
