//! Terminal session: command interpreter, chat mode and scrollback
//!
//! The session never performs I/O itself. A chat submission hands back a
//! [`ChatRequest`] for the caller to send; the outcome is fed back through
//! [`TerminalSession::complete_chat`]. [`TerminalSession::exchange`] does both
//! steps against a [`RelayClient`].

use tracing::{debug, warn};

use crate::client::RelayClient;
use crate::commands::{self, Command};
use crate::error::RelayError;
use crate::profile::Profile;
use crate::scrollback::{LineId, Scrollback};
use crate::state::ChatMessage;
use crate::wire::ChatRequest;

pub const THINKING_LINE: &str = "🤖 Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Command,
    Chat,
}

/// Interpreter state. Being in flight implies chat mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Command,
    ChatIdle,
    ChatAwaiting { placeholder: LineId, message: String },
}

/// What a call to [`TerminalSession::submit`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Blank input, or a chat call is still in flight
    Ignored,
    /// Answered locally
    Handled,
    /// Chat message that must be sent to the relay
    Chat(ChatRequest),
}

pub struct TerminalSession {
    profile: Profile,
    state: SessionState,
    scrollback: Scrollback,
    transcript: Vec<ChatMessage>,
}

impl TerminalSession {
    pub fn new(profile: Profile) -> Self {
        let scrollback = Scrollback::new(profile.welcome_line());
        Self {
            profile,
            state: SessionState::Command,
            scrollback,
            transcript: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        match self.state {
            SessionState::Command => Mode::Command,
            SessionState::ChatIdle | SessionState::ChatAwaiting { .. } => Mode::Chat,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::ChatAwaiting { .. })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Line currently showing the "thinking" placeholder, if any.
    pub fn pending_placeholder(&self) -> Option<LineId> {
        match &self.state {
            SessionState::ChatAwaiting { placeholder, .. } => Some(*placeholder),
            _ => None,
        }
    }

    pub fn scrollback(&self) -> &Scrollback {
        &self.scrollback
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn submit(&mut self, line: &str) -> Submission {
        if line.trim().is_empty() {
            return Submission::Ignored;
        }

        let command = Command::from_str(&commands::normalize(line));
        match self.state {
            SessionState::Command => self.dispatch_command(line, command),
            SessionState::ChatIdle => self.dispatch_chat(line, command),
            SessionState::ChatAwaiting { .. } => {
                debug!("chat call in flight, ignoring submission");
                Submission::Ignored
            }
        }
    }

    fn dispatch_command(&mut self, raw: &str, command: Option<Command>) -> Submission {
        debug!(?command, "dispatching command");
        match command {
            Some(Command::Clear) => {
                self.clear();
                return Submission::Handled;
            }
            Some(Command::Chatbot) => {
                self.state = SessionState::ChatIdle;
            }
            _ => {}
        }

        let response = command
            .and_then(|c| c.response(&self.profile))
            .unwrap_or_else(|| commands::not_found_line(raw));
        self.echo_and_respond(raw, response);
        Submission::Handled
    }

    fn dispatch_chat(&mut self, raw: &str, command: Option<Command>) -> Submission {
        match command {
            Some(Command::Exit) => {
                self.state = SessionState::Command;
                self.echo_and_respond(raw, commands::EXITED_CHAT_LINE);
                Submission::Handled
            }
            Some(Command::Clear) => {
                self.clear();
                Submission::Handled
            }
            Some(Command::Chatbot) => {
                self.echo_and_respond(raw, commands::CHAT_ALREADY_ACTIVE_LINE);
                Submission::Handled
            }
            _ => {
                self.scrollback.push_input(format!("> {}", raw));
                let placeholder = self.scrollback.push_output(THINKING_LINE);
                let request = ChatRequest {
                    message: raw.to_string(),
                    chat_history: self.transcript.clone(),
                };
                self.state = SessionState::ChatAwaiting {
                    placeholder,
                    message: raw.to_string(),
                };
                Submission::Chat(request)
            }
        }
    }

    fn echo_and_respond(&mut self, raw: &str, response: impl Into<String>) {
        self.scrollback.push_input(format!("> {}", raw));
        self.scrollback.push_output(response);
    }

    fn clear(&mut self) {
        self.scrollback.reset(commands::CLEARED_LINE);
        self.transcript.clear();
    }

    /// Apply the outcome of the chat call started by the last submission.
    pub fn complete_chat(&mut self, result: Result<String, RelayError>) {
        let (placeholder, message) = match &self.state {
            SessionState::ChatAwaiting { placeholder, message } => (*placeholder, message.clone()),
            _ => {
                warn!("chat result arrived with no call in flight, dropping it");
                return;
            }
        };

        let text = match result {
            Ok(reply) => {
                let text = format!("🤖 {}", reply);
                self.transcript.push(ChatMessage::user(message));
                self.transcript.push(ChatMessage::assistant(reply));
                text
            }
            Err(err) => {
                warn!(error = %err, "chat call failed");
                format!("❌ Error: {}", err)
            }
        };
        self.scrollback.replace(placeholder, text);

        self.state = SessionState::ChatIdle;
    }

    /// Submit a line and, if it produced a chat request, send it and apply
    /// the result before returning.
    pub async fn exchange(&mut self, line: &str, client: &RelayClient) -> Submission {
        let submission = self.submit(line);
        if let Submission::Chat(request) = &submission {
            let result = client.complete(request).await;
            self.complete_chat(result);
        }
        submission
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new(Profile::default())
    }
}
