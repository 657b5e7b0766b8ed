pub mod client;
pub mod commands;
pub mod config;
pub mod error;
pub mod profile;
pub mod scrollback;
pub mod session;
pub mod state;
pub mod wire;

// Re-export main types for convenience
pub use client::RelayClient;
pub use commands::Command;
pub use config::Config;
pub use error::RelayError;
pub use profile::Profile;
pub use scrollback::{LineId, LineKind, Scrollback, ScrollbackLine};
pub use session::{Mode, SessionState, Submission, TerminalSession};
pub use state::{ChatMessage, ChatRole};
pub use wire::{ChatReply, ChatRequest, ErrorPayload};
