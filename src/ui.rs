//! TUI module using ratatui.
//!
//! One URL field, Enter to summarise, a spinner while the pipeline runs, then
//! the summary or an error. Input is ignored while a request is in flight.

pub mod components;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::{DefaultTerminal, Frame};

use crate::agent::Summariser;
use crate::pipeline::{PipelineError, Stage, SummaryPipeline};
use crate::summary::Summary;
use crate::youtube::TranscriptSource;

const IDLE_POLL: Duration = Duration::from_millis(250);
const SPINNER_INTERVAL: Duration = Duration::from_millis(100);
const PAGE: u16 = 10;

/// What the current request looks like on screen
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Running(Stage),
    Done(Summary),
    Failed(String),
}

/// Result of handling one key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Submit(String),
    Quit,
}

/// Request state for the TUI
#[derive(Debug)]
pub struct App {
    pub input: String,
    pub phase: Phase,
    pub scroll: u16,
    tick: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            input: String::new(),
            phase: Phase::Idle,
            scroll: 0,
            tick: 0,
        }
    }
}

impl App {
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Running(_))
    }

    /// Apply a key press and report what the event loop should do
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press || self.is_busy() {
            return Action::None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => return Action::Quit,
            KeyCode::Char('u') if ctrl => self.input.clear(),
            KeyCode::Esc => return Action::Quit,
            KeyCode::Enter => return Action::Submit(self.input.clone()),
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(PAGE),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(PAGE),
            _ => {}
        }
        Action::None
    }

    /// Mark a new request as started
    pub fn start(&mut self) {
        self.phase = Phase::Running(Stage::Validating);
        self.scroll = 0;
    }

    pub fn set_stage(&mut self, stage: Stage) {
        if self.is_busy() {
            self.phase = Phase::Running(stage);
        }
    }

    /// Store the outcome of the request that was running
    pub fn finish(&mut self, result: Result<Summary, PipelineError>) {
        self.phase = match result {
            Ok(summary) => Phase::Done(summary),
            Err(e) => Phase::Failed(e.user_message()),
        };
    }

    fn advance_spinner(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}

/// Run the TUI until the user quits
pub async fn run<T, S>(pipeline: &SummaryPipeline<T, S>) -> io::Result<()>
where
    T: TranscriptSource,
    S: Summariser,
{
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, pipeline).await;
    ratatui::restore();
    result
}

async fn event_loop<T, S>(
    terminal: &mut DefaultTerminal,
    pipeline: &SummaryPipeline<T, S>,
) -> io::Result<()>
where
    T: TranscriptSource,
    S: Summariser,
{
    let mut app = App::default();

    loop {
        terminal.draw(|frame| draw(frame, &app))?;

        if !event::poll(IDLE_POLL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        match app.handle_key(key) {
            Action::Quit => return Ok(()),
            Action::Submit(url) => run_request(terminal, &mut app, pipeline, &url).await?,
            Action::None => {}
        }
    }
}

/// Drive one request to completion, redrawing the spinner meanwhile
async fn run_request<T, S>(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    pipeline: &SummaryPipeline<T, S>,
    url: &str,
) -> io::Result<()>
where
    T: TranscriptSource,
    S: Summariser,
{
    let (tx, mut stages) = tokio::sync::mpsc::unbounded_channel();
    app.start();

    let request = pipeline.run_with_progress(url, move |stage| {
        let _ = tx.send(stage);
    });
    tokio::pin!(request);

    let mut ticker = tokio::time::interval(SPINNER_INTERVAL);
    let result = loop {
        tokio::select! {
            result = &mut request => break result,
            _ = ticker.tick() => {
                while let Ok(stage) = stages.try_recv() {
                    app.set_stage(stage);
                }
                app.advance_spinner();
                discard_pending_input()?;
                terminal.draw(|frame| draw(frame, app))?;
            }
        }
    };

    app.finish(result);
    Ok(())
}

/// Swallow keystrokes typed while a request is running
fn discard_pending_input() -> io::Result<()> {
    while event::poll(Duration::ZERO)? {
        event::read()?;
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let [title, input, status, body, help] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("recap", Style::new().add_modifier(Modifier::BOLD)),
            Span::raw(": in-depth summary from YouTube or any website"),
        ])),
        title,
    );

    draw_input(frame, app, input);

    frame.render_widget(Paragraph::new(status_line(app)), status);

    draw_body(frame, app, body);

    frame.render_widget(
        Paragraph::new("Enter summarise · ↑/↓ PgUp/PgDn scroll · Ctrl-U clear · Esc quit")
            .style(Style::new().fg(Color::DarkGray)),
        help,
    );
}

fn draw_input(frame: &mut Frame, app: &App, area: Rect) {
    let border = if app.is_busy() {
        Style::new().fg(Color::DarkGray)
    } else {
        Style::new().fg(Color::Yellow)
    };
    let block = Block::bordered().title(" URL ").border_style(border);

    // Keep the end of long URLs visible
    let width = area.width.saturating_sub(2) as usize;
    let chars = app.input.chars().count();
    let visible: String = app
        .input
        .chars()
        .skip(chars.saturating_sub(width.saturating_sub(1)))
        .collect();

    frame.render_widget(Paragraph::new(visible.as_str()).block(block), area);

    if !app.is_busy() {
        let x = area.x + 1 + visible.chars().count() as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn status_line(app: &App) -> Line<'static> {
    match &app.phase {
        Phase::Idle => Line::from("Paste a YouTube or website URL and press Enter."),
        Phase::Running(stage) => Line::from(vec![
            Span::styled(
                components::spinner_frame(app.tick),
                Style::new().fg(Color::Yellow),
            ),
            Span::raw(format!(" {stage}...")),
        ]),
        Phase::Done(summary) => Line::from(format!(
            "{} summary · {} · {} words",
            summary.source,
            summary.model,
            summary.word_count()
        ))
        .style(Style::new().fg(Color::Green)),
        Phase::Failed(_) => Line::from("Request failed").style(Style::new().fg(Color::Red)),
    }
}

fn draw_body(frame: &mut Frame, app: &App, area: Rect) {
    let paragraph = match &app.phase {
        Phase::Idle => Paragraph::new(Text::from(vec![
            Line::from("Summaries cover an overview, the key points and notable details."),
            Line::from("YouTube links are summarised from the video transcript."),
        ]))
        .style(Style::new().fg(Color::DarkGray)),
        Phase::Running(_) => Paragraph::new("Waiting...").block(Block::bordered()),
        Phase::Done(summary) => Paragraph::new(Text::from(components::markdown_lines(&summary.text)))
            .block(Block::bordered().title(format!(" {} ", summary.url)))
            .wrap(Wrap { trim: false })
            .scroll((app.scroll, 0)),
        Phase::Failed(message) => Paragraph::new(message.as_str())
            .style(Style::new().fg(Color::Red))
            .block(
                Block::bordered()
                    .title(" Error ")
                    .border_style(Style::new().fg(Color::Red)),
            )
            .wrap(Wrap { trim: true }),
    };

    frame.render_widget(paragraph, area);
}
