//! Main chat event loop and UI rendering
//!
//! This module contains the event loop that handles user input, renders the
//! transcript, and relays chain events from in-flight submissions.

use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use reqwest::Client;
use std::{error::Error, io, time::Duration};
use tokio::sync::mpsc;
use unicode_width::UnicodeWidthStr;

use crate::core::chain::{spawn_chain, spawn_quit, ChainEvent, ChainParams};
use crate::core::transcript::{Transcript, TranscriptRole};
use crate::utils::logging::LoggingState;

/// Interaction state for one chat session.
///
/// Chain tasks never touch this directly; they report back over the event
/// channel and only the UI task mutates the transcript, so renders cannot
/// race even with several chains in flight.
pub struct App {
    transcript: Transcript,
    input: String,
    scroll_offset: u16,
    auto_scroll: bool,
    client: Client,
    base_url: String,
    logging: LoggingState,
    tx: mpsc::UnboundedSender<ChainEvent>,
}

impl App {
    pub fn new(
        base_url: String,
        logging: LoggingState,
        tx: mpsc::UnboundedSender<ChainEvent>,
    ) -> Self {
        App {
            transcript: Transcript::new(),
            input: String::new(),
            scroll_offset: 0,
            auto_scroll: true,
            client: Client::new(),
            base_url,
            logging,
            tx,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    fn record(&mut self, role: TranscriptRole, text: impl Into<String>) {
        let entry = self.transcript.append(role, text);
        let _ = self.logging.log_line(&entry.display_line());
    }

    /// Submits the input buffer as one chain. The `User:` line lands in the
    /// transcript before the chain task exists; empty input is forwarded
    /// as-is. Submitting while earlier chains are pending starts another
    /// independent chain.
    pub fn submit_input(&mut self) {
        let user_input = std::mem::take(&mut self.input);
        self.record(TranscriptRole::User, user_input.clone());
        spawn_chain(ChainParams {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            user_input,
            tx: self.tx.clone(),
        });
    }

    /// Issues the stop command: one transcript line, one fire-and-forget
    /// POST. Repeated stops are not deduplicated.
    pub fn issue_stop(&mut self) {
        self.record(TranscriptRole::Command, "Stop");
        spawn_quit(self.client.clone(), self.base_url.clone());
    }

    /// Renders one chain event as its transcript line. Replies are shown as
    /// compact JSON, the same shape they came in over the wire.
    pub fn apply_chain_event(&mut self, event: ChainEvent) {
        match event {
            ChainEvent::Selection(value) => {
                self.record(TranscriptRole::Selector, value.to_string());
            }
            ChainEvent::Completion(value) => {
                self.record(TranscriptRole::Response, value.to_string());
            }
            ChainEvent::Failed(description) => {
                self.record(TranscriptRole::Error, description);
            }
        }
    }

    fn build_display_lines(&self) -> Vec<Line<'_>> {
        let mut lines = Vec::new();

        for entry in self.transcript.entries() {
            let (prefix_style, text_style) = match entry.role {
                TranscriptRole::User => (
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Cyan),
                ),
                TranscriptRole::Selector => (
                    Style::default()
                        .fg(Color::Magenta)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::DarkGray),
                ),
                TranscriptRole::Response => (
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::White),
                ),
                TranscriptRole::Command => (
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Yellow),
                ),
                TranscriptRole::Error => (
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    Style::default().fg(Color::Red),
                ),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{}: ", entry.role.prefix()), prefix_style),
                Span::styled(entry.text.as_str(), text_style),
            ]));
            lines.push(Line::from("")); // Empty line for spacing
        }

        lines
    }

    fn calculate_max_scroll_offset(&self, available_height: u16) -> u16 {
        let total_lines = self.build_display_lines().len() as u16;
        total_lines.saturating_sub(available_height)
    }

    fn scroll_to_bottom(&mut self, available_height: u16) {
        self.scroll_offset = self.calculate_max_scroll_offset(available_height);
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let lines = app.build_display_lines();

    // Account for the title row only; the transcript area has no borders.
    let available_height = chunks[0].height.saturating_sub(1);
    let total_lines = lines.len() as u16;
    let max_offset = total_lines.saturating_sub(available_height);
    let scroll_offset = app.scroll_offset.min(max_offset);

    let transcript_paragraph = Paragraph::new(lines)
        .block(Block::default().title("Chat - Relaychat"))
        .wrap(Wrap { trim: true })
        .scroll((scroll_offset, 0));

    f.render_widget(transcript_paragraph, chunks[0]);

    let input = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Type your message (Enter to send, Esc to stop, Ctrl+C to quit)"),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(input, chunks[1]);

    f.set_cursor_position((
        chunks[1].x + app.input.width() as u16 + 1,
        chunks[1].y + 1,
    ));
}

fn transcript_height(terminal_height: u16) -> u16 {
    // 3 rows for the input box, 1 for the transcript title.
    terminal_height.saturating_sub(3).saturating_sub(1)
}

/// Runs the interactive session until the user quits.
pub async fn run_chat(
    base_url: String,
    log_file: Option<String>,
) -> Result<(), Box<dyn Error>> {
    let logging = LoggingState::new(log_file)?;
    if logging.is_active() {
        logging.begin_session()?;
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<ChainEvent>();
    let mut app = App::new(base_url, logging, tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = loop {
        terminal.draw(|f| ui(f, &app))?;

        let available_height = transcript_height(terminal.size()?.height);

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        break Ok(());
                    }
                    KeyCode::Enter => {
                        app.submit_input();
                        if app.auto_scroll {
                            app.scroll_to_bottom(available_height);
                        }
                    }
                    KeyCode::Esc => {
                        app.issue_stop();
                        if app.auto_scroll {
                            app.scroll_to_bottom(available_height);
                        }
                    }
                    KeyCode::Char(c) => {
                        app.input.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input.pop();
                    }
                    KeyCode::Up => {
                        app.auto_scroll = false;
                        app.scroll_offset = app.scroll_offset.saturating_sub(1);
                        if app.scroll_offset == 0 {
                            app.auto_scroll = true;
                        }
                    }
                    KeyCode::Down => {
                        let max_scroll = app.calculate_max_scroll_offset(available_height);
                        app.scroll_offset = app.scroll_offset.saturating_add(1).min(max_scroll);
                        if app.scroll_offset >= max_scroll {
                            app.auto_scroll = true;
                        }
                    }
                    _ => {}
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => {
                        app.auto_scroll = false;
                        app.scroll_offset = app.scroll_offset.saturating_sub(3);
                        if app.scroll_offset == 0 {
                            app.auto_scroll = true;
                        }
                    }
                    MouseEventKind::ScrollDown => {
                        let max_scroll = app.calculate_max_scroll_offset(available_height);
                        app.scroll_offset = app.scroll_offset.saturating_add(3).min(max_scroll);
                        if app.scroll_offset >= max_scroll {
                            app.auto_scroll = true;
                        }
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Drain whatever the in-flight chains produced since the last tick.
        // Events from concurrent chains interleave in arrival order.
        let mut received_any = false;
        while let Ok(chain_event) = rx.try_recv() {
            app.apply_chain_event(chain_event);
            received_any = true;
        }
        if received_any && app.auto_scroll {
            app.scroll_to_bottom(available_height);
        }
    };

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
