use std::borrow::Cow;

use portfolio_core::{
    ChatRequest, Config, LineKind, Mode, RelayClient, RelayError, Submission, TerminalSession,
};
use tracing::debug;

use crate::tui::{AppEvent, EventSender};

pub struct App {
    // Core state
    pub should_quit: bool,
    pub session: TerminalSession,
    pub client: RelayClient,
    events: EventSender,

    // Prompt line
    pub input: String,
    pub cursor: usize, // cursor position in input, in chars

    // Scrollback view
    pub scroll: u16,
    pub follow_output: bool,
    pub view_height: u16,    // inner height of the scrollback area
    pub content_height: u16, // wrapped height of the scrollback, measured at render
    seen_revision: Option<u64>,

    // Animation state
    pub animation_frame: u8, // 0-2 for ellipsis animation
}

impl App {
    pub fn new(config: &Config, events: EventSender) -> Self {
        let token = config.resolve_relay_token();
        let client = RelayClient::new(&config.resolve_relay_url(), token.as_deref());

        Self {
            should_quit: false,
            session: TerminalSession::new(config.profile()),
            client,
            events,

            input: String::new(),
            cursor: 0,

            scroll: 0,
            follow_output: true,
            view_height: 0,
            content_height: 0,
            seen_revision: None,

            animation_frame: 0,
        }
    }

    pub fn mode(&self) -> Mode {
        self.session.mode()
    }

    pub fn prompt(&self) -> &'static str {
        match self.mode() {
            Mode::Command => ">",
            Mode::Chat => "🤖>",
        }
    }

    pub fn input_placeholder(&self) -> &'static str {
        match self.mode() {
            Mode::Command => "type a command...",
            Mode::Chat => "ask me anything...",
        }
    }

    /// Typing is disabled while a chat call is in flight.
    pub fn accepts_input(&self) -> bool {
        !self.session.is_pending()
    }

    /// Hand the prompt line to the session and clear it.
    pub fn submit_input(&mut self) {
        if self.input.trim().is_empty() || self.session.is_pending() {
            return;
        }

        let line = std::mem::take(&mut self.input);
        self.cursor = 0;

        if let Submission::Chat(request) = self.session.submit(&line) {
            self.spawn_chat(request);
        }
    }

    fn spawn_chat(&mut self, request: ChatRequest) {
        let client = self.client.clone();
        let tx = self.events.clone();
        debug!(endpoint = client.endpoint(), "spawning chat call");

        tokio::spawn(async move {
            let call = tokio::spawn(async move { client.complete(&request).await });
            let result = match call.await {
                Ok(result) => result,
                Err(e) => Err(RelayError::transport(format!("chat task failed: {}", e))),
            };
            let _ = tx.send(AppEvent::ChatFinished(result));
        });
    }

    pub fn finish_chat(&mut self, result: Result<String, RelayError>) {
        self.session.complete_chat(result);
        self.animation_frame = 0;
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.session.is_pending() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    /// Text to draw for a scrollback line; the pending placeholder animates.
    pub fn display_text(&self, index: usize) -> Cow<'_, str> {
        let is_placeholder = self
            .session
            .pending_placeholder()
            .is_some_and(|id| id.index() == index);
        if is_placeholder {
            let dots = ".".repeat((self.animation_frame as usize) + 1);
            return Cow::Owned(format!("🤖 Thinking{}", dots));
        }
        self.session
            .scrollback()
            .lines()
            .get(index)
            .map(|line| Cow::Borrowed(line.text.as_str()))
            .unwrap_or_default()
    }

    pub fn line_kind(&self, index: usize) -> LineKind {
        self.session
            .scrollback()
            .lines()
            .get(index)
            .map(|line| line.kind)
            .unwrap_or(LineKind::Output)
    }

    fn max_scroll(&self) -> u16 {
        let visible_height = if self.view_height > 0 {
            self.view_height
        } else {
            20
        };
        self.content_height.saturating_sub(visible_height)
    }

    /// Jump to the newest line whenever the scrollback changed since the last
    /// frame, and keep following it until the user scrolls up.
    ///
    /// `content_height` must already hold the wrapped height for this frame.
    pub fn sync_view(&mut self) {
        let revision = self.session.scrollback().revision();
        if self.seen_revision != Some(revision) {
            self.seen_revision = Some(revision);
            self.follow_output = true;
        }

        let max = self.max_scroll();
        if self.follow_output {
            self.scroll = max;
        } else {
            self.scroll = self.scroll.min(max);
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
        self.follow_output = false;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        let max = self.max_scroll();
        self.scroll = self.scroll.saturating_add(lines).min(max);
        self.follow_output = self.scroll >= max;
    }

    pub fn page_height(&self) -> u16 {
        (self.view_height / 2).max(1)
    }
}
