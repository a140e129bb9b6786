//! Ratatui-based terminal dashboard.
//!
//! The TUI renders the three metric sections as tabs (Overview, Monthly,
//! Year-to-Date), auto-loads the default dataset on startup, and lets the
//! user load a file manually or reload the default source. Variances are
//! drawn green when non-negative and red when negative; load progress and
//! failures go to the status line, never through an error path.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs},
};

use crate::app::pipeline::RunOutput;
use crate::cli::LoadArgs;
use crate::data::DataClient;
use crate::domain::{LoadConfig, MetricGroup};
use crate::error::AppError;
use crate::report::{totals_line_month, totals_line_ytd, variance_vs_plan, variance_vs_prior};

const TAB_TITLES: [&str; 3] = ["Overview", "Monthly", "Year-to-Date"];

/// Start the TUI.
pub fn run(args: LoadArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::runtime(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode()
            .map_err(|e| AppError::runtime(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::runtime(format!(
                "Failed to enter alternate screen: {e}"
            )));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// Mirrors the load-status states of the dashboard: in progress, loaded,
/// or waiting on the user after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusKind {
    Loading,
    Success,
    Error,
}

struct App {
    config: LoadConfig,
    client: DataClient,
    tab: usize,
    path_input: String,
    editing_path: bool,
    status: String,
    status_kind: StatusKind,
    run: Option<RunOutput>,
}

impl App {
    fn new(args: LoadArgs) -> Result<Self, AppError> {
        let client = DataClient::from_env()?;
        let mut app = Self {
            config: crate::app::load_config_from_args(&args),
            client,
            tab: 0,
            path_input: String::new(),
            editing_path: false,
            status: "Loading latest data...".to_string(),
            status_kind: StatusKind::Loading,
            run: None,
        };
        app.reload();
        Ok(app)
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::runtime(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::runtime(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::runtime(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_path {
            self.handle_path_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Right | KeyCode::Tab => {
                self.tab = (self.tab + 1) % TAB_TITLES.len();
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.tab = (self.tab + TAB_TITLES.len() - 1) % TAB_TITLES.len();
            }
            KeyCode::Char(c @ '1'..='3') => {
                self.tab = (c as usize) - ('1' as usize);
            }
            KeyCode::Char('o') => {
                self.editing_path = true;
                self.path_input.clear();
                self.status =
                    "Enter a dataset path (.csv, .xlsx, .json). Enter to load, Esc to cancel."
                        .to_string();
                self.status_kind = StatusKind::Loading;
            }
            KeyCode::Char('r') => {
                self.config = LoadConfig::default_source();
                self.reload();
            }
            _ => {}
        }

        false
    }

    fn handle_path_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_path = false;
                self.status = "Load canceled.".to_string();
                self.status_kind = StatusKind::Error;
            }
            KeyCode::Enter => {
                self.editing_path = false;
                let trimmed = self.path_input.trim().to_string();
                if trimmed.is_empty() {
                    self.status = "Load canceled.".to_string();
                    self.status_kind = StatusKind::Error;
                } else {
                    self.config = LoadConfig::for_file(trimmed);
                    self.reload();
                }
            }
            KeyCode::Backspace => {
                self.path_input.pop();
            }
            KeyCode::Char(c) => {
                self.path_input.push(c);
            }
            _ => {}
        }
    }

    /// Run the load pipeline for the current config. A newer load fully
    /// replaces the previous result; failures become status text and leave
    /// the last good result on screen.
    fn reload(&mut self) {
        self.status = "Loading latest data...".to_string();
        self.status_kind = StatusKind::Loading;

        match crate::app::pipeline::run_load(&self.config, &self.client) {
            Ok(run) => {
                self.status = match &self.config.file {
                    Some(_) => format!("Loaded {} ({} rows).", run.source, run.rows),
                    None => format!(
                        "Auto-loaded latest data ({} rows, {}).",
                        run.rows,
                        chrono::Local::now().date_naive()
                    ),
                };
                self.status_kind = StatusKind::Success;
                self.run = Some(run);
            }
            Err(err) => {
                self.status = err.to_string();
                self.status_kind = StatusKind::Error;
            }
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_tabs(frame, chunks[1]);
        self.draw_body(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled("gdash", Style::default().fg(Color::Cyan)),
            Span::raw(" — portfolio gains vs plan"),
        ];

        if let Some(run) = &self.run {
            let latest = if run.report.latest.is_empty() {
                "no data".to_string()
            } else {
                run.report.latest.label()
            };
            spans.push(Span::styled(
                format!("  |  latest: {latest}  |  source: {}  |  n={}", run.source, run.rows),
                Style::default().fg(Color::Gray),
            ));
        }

        let p = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let tabs = Tabs::new(TAB_TITLES.iter().map(|t| Line::from(*t)))
            .select(self.tab)
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(tabs, area);
    }

    fn draw_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title(TAB_TITLES[self.tab])
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let Some(run) = &self.run else {
            let msg = Paragraph::new("Waiting for data... (o to load a file)")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let report = &run.report;
        if report.latest.is_empty() {
            let msg = Paragraph::new("Dataset has no periods. Load a file with year/month rows.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        }

        let mut lines: Vec<Line> = Vec::new();
        match self.tab {
            0 => {
                lines.extend(group_lines(
                    format!("Year-to-Date ({})", report.latest.year),
                    &report.ytd,
                    totals_line_ytd(&report.ytd),
                ));
                lines.push(Line::raw(""));
                lines.extend(group_lines(
                    format!("Current Month ({})", report.latest.label()),
                    &report.monthly,
                    totals_line_month(&report.monthly),
                ));
            }
            1 => {
                lines.extend(group_lines(
                    format!("Performance for {}", report.latest.label()),
                    &report.monthly,
                    totals_line_month(&report.monthly),
                ));
            }
            _ => {
                lines.extend(group_lines(
                    format!("Year {} Performance", report.latest.year),
                    &report.ytd,
                    totals_line_ytd(&report.ytd),
                ));
            }
        }

        frame.render_widget(Paragraph::new(Text::from(lines)), inner);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = if self.editing_path {
            Line::from(vec![
                Span::styled("Path: ", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(self.path_input.clone()),
                Span::styled("▏", Style::default().fg(Color::Yellow)),
            ])
        } else {
            let help = "←/→ tabs  o open file  r reload default  q quit";
            Line::from(vec![
                Span::styled(help, Style::default().fg(Color::Gray)),
                Span::raw(" | "),
                Span::styled(self.status.clone(), status_style(self.status_kind)),
            ])
        };

        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn status_style(kind: StatusKind) -> Style {
    match kind {
        StatusKind::Loading => Style::default().fg(Color::Yellow),
        StatusKind::Success => Style::default().fg(Color::Green),
        StatusKind::Error => Style::default().fg(Color::Red),
    }
}

/// Build the styled lines for one metric group.
fn group_lines(title: String, g: &MetricGroup, totals: String) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(totals),
        variance_line("vs Plan: ", variance_vs_plan(g), g.vs_plan >= 0.0),
        variance_line("vs Prior Year: ", variance_vs_prior(g), g.vs_prior >= 0.0),
    ]
}

fn variance_line(label: &'static str, value: String, non_negative: bool) -> Line<'static> {
    let color = if non_negative { Color::Green } else { Color::Red };
    Line::from(vec![
        Span::raw(label),
        Span::styled(value, Style::default().fg(color)),
    ])
}
