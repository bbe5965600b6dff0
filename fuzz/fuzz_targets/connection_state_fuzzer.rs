//! Fuzz target for the client ConnectionManager state machine
//!
//! Ensure a single live connection and stale-notice isolation
//!
//! # Strategy
//!
//! - Intents: start, send and end in any order, including double starts
//! - Notices: open, text and close for the current connection
//! - Stale notices: the same events tagged with older connection ids
//!
//! # Invariants
//!
//! - At most one connection is current at any time
//! - Connection ids only increase
//! - Transmit is only issued while the current connection is open
//! - Notices for a non-current connection produce no actions

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use randomchat_client::{
    ConnectionAction, ConnectionId, ConnectionManager, Endpoint, TransportCommand,
    TransportNotice,
};

#[derive(Debug, Clone, Arbitrary)]
enum Op {
    Start,
    Send(String),
    End,
    Opened { age: u8 },
    Text { age: u8, text: String },
    Closed { age: u8 },
}

fuzz_target!(|ops: Vec<Op>| {
    let endpoint = Endpoint::new("localhost:8080");
    let mut manager = ConnectionManager::new();
    let mut highest_id = 0_u64;

    for op in ops {
        let was_open = manager.is_open();
        let current = manager.current();

        let (actions, stale) = match op {
            Op::Start => (manager.start_session(&endpoint).unwrap_or_default(), false),
            Op::Send(text) => (manager.send_text(&text), false),
            Op::End => (manager.end_session(), false),
            Op::Opened { age } => notice(&mut manager, current, age, TransportNotice::opened),
            Op::Text { age, text } => {
                notice(&mut manager, current, age, |id| TransportNotice::text(id, text))
            },
            Op::Closed { age } => {
                notice(&mut manager, current, age, |id| TransportNotice::closed(id, None))
            },
        };

        if stale {
            assert!(actions.is_empty(), "stale notice produced actions: {actions:?}");
        }

        for action in &actions {
            if let ConnectionAction::Transport(TransportCommand::Transmit { connection, .. }) =
                action
            {
                assert!(was_open, "transmit while not open");
                assert_eq!(Some(*connection), current);
            }
        }

        if let Some(id) = manager.current() {
            assert!(id.get() >= highest_id, "connection id went backwards");
            highest_id = id.get();
        }
    }
});

/// Deliver a notice for the current connection, or for an older one when
/// `age` is non-zero. Returns the actions and whether the notice was stale.
fn notice(
    manager: &mut ConnectionManager,
    current: Option<ConnectionId>,
    age: u8,
    build: impl FnOnce(ConnectionId) -> TransportNotice,
) -> (Vec<ConnectionAction>, bool) {
    let Some(current) = current else {
        return (Vec::new(), false);
    };

    let age = u64::from(age % 4);
    let Some(target) = current.get().checked_sub(age).filter(|&id| id > 0) else {
        return (Vec::new(), false);
    };

    let stale = age > 0;
    (manager.handle_transport(build(ConnectionId::new(target))), stale)
}
