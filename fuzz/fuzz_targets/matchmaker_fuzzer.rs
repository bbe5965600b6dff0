//! Fuzz target for the server Matchmaker
//!
//! Random accepts, messages and closes across a small id space.
//!
//! # Invariants
//!
//! - Pairing is symmetric: partner_of(a) == Some(b) iff partner_of(b) == Some(a)
//! - A session is never both waiting and paired
//! - At most one session is left waiting after every event
//! - Session count never exceeds the configured limit
//! - Messages are only relayed to the sender's partner

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use randomchat_proto::ServerFrame;
use randomchat_server::{Matchmaker, MatchmakerConfig, ServerAction, ServerEvent};

#[derive(Debug, Clone, Arbitrary)]
struct Scenario {
    max_connections: u8,
    events: Vec<FuzzEvent>,
}

#[derive(Debug, Clone, Arbitrary)]
enum FuzzEvent {
    Accept(u8),
    Message { session: u8, text: String },
    Close(u8),
}

fuzz_target!(|scenario: Scenario| {
    let max_connections = usize::from(scenario.max_connections % 16) + 1;
    let mut matchmaker = Matchmaker::new(MatchmakerConfig { max_connections });

    for event in scenario.events {
        let (event, sender) = match event {
            FuzzEvent::Accept(id) => (ServerEvent::ConnectionAccepted { session_id: id.into() }, None),
            FuzzEvent::Message { session, text } => {
                let session_id = u64::from(session);
                (ServerEvent::MessageReceived { session_id, text }, Some(session_id))
            },
            FuzzEvent::Close(id) => (ServerEvent::ConnectionClosed { session_id: id.into() }, None),
        };

        let partner = sender.and_then(|id| matchmaker.partner_of(id));
        let Ok(actions) = matchmaker.process_event(event) else {
            continue;
        };

        if sender.is_some() {
            for action in &actions {
                if let ServerAction::SendToSession { session_id, frame } = action {
                    assert_eq!(Some(*session_id), partner, "relay to non-partner: {frame:?}");
                    assert!(matches!(frame, ServerFrame::ServerMessage { .. }));
                }
            }
        }

        let waiting: Vec<u64> = matchmaker.waiting().collect();
        assert!(waiting.len() <= 1, "more than one session waiting: {waiting:?}");
        assert!(matchmaker.session_count() <= max_connections);

        for id in 0..=u64::from(u8::MAX) {
            if let Some(partner) = matchmaker.partner_of(id) {
                assert_eq!(matchmaker.partner_of(partner), Some(id), "asymmetric pair");
                assert!(!waiting.contains(&id), "session {id} both waiting and paired");
            }
        }
    }
});
