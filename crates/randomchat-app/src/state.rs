//! Observable session state types.
//!
//! This module defines the data structures that represent one chat session as
//! the rendering layer sees it: the [`Phase`], the presence count and the
//! ordered [`Transcript`].
//!
//! These structures serve as the "View Model" for the application. They are
//! mutated only by [`crate::App`]; everything outside the crate gets them
//! through a read-only [`Snapshot`].

use std::fmt;

/// Session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// No session started yet.
    #[default]
    Idle,
    /// Connection requested, waiting for the transport.
    Connecting,
    /// In the server's waiting line.
    WaitingForPeer,
    /// Paired with an anonymous peer.
    PairedChatting,
    /// Session ended.
    Closed,
}

impl Phase {
    /// Whether a connection is open or being opened.
    pub fn is_active(self) -> bool {
        matches!(self, Self::Connecting | Self::WaitingForPeer | Self::PairedChatting)
    }

    /// Whether the server has admitted this session.
    pub fn is_online(self) -> bool {
        matches!(self, Self::WaitingForPeer | Self::PairedChatting)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Connecting => "connecting",
            Self::WaitingForPeer => "waiting for peer",
            Self::PairedChatting => "chatting",
            Self::Closed => "closed",
        };
        f.write_str(label)
    }
}

/// Who a transcript line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Typed by the local user.
    SelfSent,
    /// Relayed from the paired peer.
    Peer,
    /// Generated locally from server status or errors.
    System,
}

impl Origin {
    /// Display prefix for lines from this origin.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::SelfSent => "You:",
            Self::Peer => "Anonymous:",
            Self::System => "Bot:",
        }
    }
}

/// One transcript line. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    origin: Origin,
    text: String,
}

impl TranscriptEntry {
    /// Create an entry.
    pub fn new(origin: Origin, text: impl Into<String>) -> Self {
        Self { origin, text: text.into() }
    }

    /// Who the line came from.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Line text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Append-only transcript.
///
/// Entries are kept in arrival or send order. There is no way to remove or
/// edit an entry; a new session starts a new transcript.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// Empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, origin: Origin, text: impl Into<String>) {
        self.entries.push(TranscriptEntry::new(origin, text));
    }

    /// Entries, oldest first.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent entry.
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

/// State of one connect-to-close lifecycle.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub(crate) phase: Phase,
    pub(crate) peer_count: u32,
    pub(crate) transcript: Transcript,
}

impl Session {
    /// Fresh idle session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Users online as last reported by the server. Zero unless the server
    /// has admitted this session.
    pub fn peer_count(&self) -> u32 {
        if self.phase.is_online() { self.peer_count } else { 0 }
    }

    /// Ordered transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }
}

/// Read-only view handed to the rendering layer after every state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot<'a> {
    /// Current phase.
    pub phase: Phase,
    /// Users online.
    pub peer_count: u32,
    /// Transcript, oldest first.
    pub transcript: &'a [TranscriptEntry],
}

impl<'a> From<&'a Session> for Snapshot<'a> {
    fn from(session: &'a Session) -> Self {
        Self {
            phase: session.phase(),
            peer_count: session.peer_count(),
            transcript: session.transcript.entries(),
        }
    }
}
