use portfolio_core::{LineKind, Mode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};

use crate::app::App;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, scrollback, prompt, footer
    let [header_area, body_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_scrollback(app, frame, body_area);
    render_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let mode_indicator = match app.mode() {
        Mode::Command => String::new(),
        Mode::Chat => " (chatbot)".to_string(),
    };

    let title = Line::from(vec![
        Span::styled(" terminal", Style::default().fg(Color::Cyan).bold()),
        Span::styled(mode_indicator, Style::default().fg(Color::Yellow)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn line_style(kind: LineKind, text: &str) -> Style {
    match kind {
        LineKind::Input => Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        LineKind::Output if text.starts_with("❌") => Style::default().fg(Color::Red),
        LineKind::Output => Style::default(),
    }
}

fn render_scrollback(app: &mut App, frame: &mut Frame, area: Rect) {
    let pending = app.session.pending_placeholder().map(|id| id.index());
    let mut lines: Vec<Line> = Vec::new();
    for index in 0..app.session.scrollback().len() {
        let kind = app.line_kind(index);
        let text = app.display_text(index);
        let mut style = line_style(kind, &text);
        if pending == Some(index) {
            style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
        }
        for part in text.split('\n') {
            lines.push(Line::from(Span::styled(part.to_string(), style)));
        }
    }

    // Measure with the same wrapping the paragraph renders with, minus borders
    let scrollback = Paragraph::new(Text::from(lines)).wrap(Wrap { trim: false });
    let inner_width = area.width.saturating_sub(2);
    app.view_height = area.height.saturating_sub(2);
    app.content_height = u16::try_from(scrollback.line_count(inner_width)).unwrap_or(u16::MAX);
    app.sync_view();

    let border_color = match app.mode() {
        Mode::Command => Color::DarkGray,
        Mode::Chat => Color::Yellow,
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" ~/{} ", app.session.profile().handle));

    frame.render_widget(scrollback.block(block).scroll((app.scroll, 0)), area);

    if app.content_height > app.view_height {
        let mut state =
            ScrollbarState::new(app.content_height.saturating_sub(app.view_height) as usize)
                .position(app.scroll as usize);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area,
            &mut state,
        );
    }
}

fn render_input(app: &App, frame: &mut Frame, area: Rect) {
    let border_color = if app.accepts_input() {
        Color::Yellow
    } else {
        Color::DarkGray
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let prompt = app.prompt();
    // Terminal cells taken by the prompt and the space after it
    let prompt_cells = match app.mode() {
        Mode::Command => 2,
        Mode::Chat => 4,
    };

    // Horizontal scrolling keeps the cursor visible
    let inner_width = (area.width.saturating_sub(2) as usize).saturating_sub(prompt_cells);
    let scroll_offset = if inner_width == 0 {
        0
    } else if app.cursor >= inner_width {
        app.cursor - inner_width + 1
    } else {
        0
    };

    let body = if app.input.is_empty() {
        Span::styled(app.input_placeholder(), Style::default().fg(Color::DarkGray))
    } else {
        let visible: String = app
            .input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Span::styled(visible, Style::default().fg(Color::Cyan))
    };

    let line = Line::from(vec![
        Span::styled(format!("{} ", prompt), Style::default().fg(Color::Green).bold()),
        body,
    ]);
    frame.render_widget(Paragraph::new(line).block(input_block), area);

    if app.accepts_input() {
        let cursor_x = (prompt_cells + app.cursor - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let (mode_text, mode_style) = match app.mode() {
        Mode::Command => (" COMMAND ", Style::default().bg(Color::Blue).fg(Color::White)),
        Mode::Chat => (" CHAT ", Style::default().bg(Color::Yellow).fg(Color::Black)),
    };

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" run ", label_style),
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" scroll ", label_style),
    ];
    if app.mode() == Mode::Chat {
        hints.extend(vec![
            Span::styled(" exit ", key_style),
            Span::styled(" leave chat ", label_style),
        ]);
    }
    hints.extend(vec![
        Span::styled(" Esc ", key_style),
        Span::styled(" quit ", label_style),
    ]);

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::Config;
    use ratatui::{backend::TestBackend, Terminal};
    use tokio::sync::mpsc;

    fn screen_text(app: &mut App) -> String {
        screen_text_sized(app, 80, 24)
    }

    fn screen_text_sized(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_welcome_and_prompt() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);

        let text = screen_text(&mut app);
        assert!(text.contains("Welcome"));
        assert!(text.contains("type a command..."));
        assert!(text.contains("COMMAND"));
    }

    #[test]
    fn chat_mode_changes_header_and_footer() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);
        app.input = "chatbot".to_string();
        app.submit_input();

        let text = screen_text(&mut app);
        assert!(text.contains("(chatbot)"));
        assert!(text.contains("CHAT"));
        assert!(text.contains("ask me anything..."));
    }

    #[test]
    fn long_reply_tail_stays_on_screen() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);
        app.session.submit("chatbot");
        app.session.submit("hi");

        let mut reply: Vec<String> = (0..40).map(|i| format!("word{:02}", i)).collect();
        reply.push("ENDMARK".to_string());
        app.finish_chat(Ok(reply.join(" ")));

        let text = screen_text_sized(&mut app, 30, 12);
        assert!(text.contains("ENDMARK"));
        assert!(text.contains("word39"));
        assert_eq!(app.view_height, 5);
        assert_eq!(app.scroll, app.content_height - app.view_height);
    }
}
