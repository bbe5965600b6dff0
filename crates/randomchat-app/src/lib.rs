//! Application layer for randomchat
//!
//! Pure session state machine and generic runtime for the chat client,
//! enabling deterministic testing with the same code that runs in
//! production.
//!
//! # Components
//!
//! - [`App`]: Session state machine (frame classification, transcript, input)
//! - [`Bridge`]: Connection bridge (translates App actions to connection
//!   manager calls)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod error;
mod event;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::{App, MATCH_FOUND_TEXT, MAX_INPUT_CHARS, PEER_LEFT_TEXT, WELCOME_TEXT};
pub use bridge::Bridge;
pub use driver::Driver;
pub use error::SessionError;
pub use event::AppEvent;
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::{Origin, Phase, Session, Snapshot, Transcript, TranscriptEntry};
