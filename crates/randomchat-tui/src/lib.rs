//! Terminal UI for randomchat
//!
//! A thin shell over [`randomchat_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`randomchat_app::Runtime`]
//!
//! This crate only handles terminal input, rendering and wiring the WebSocket
//! transport.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod terminal;
pub mod ui;

pub use randomchat_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
