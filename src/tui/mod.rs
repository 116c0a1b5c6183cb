// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Hermod-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Hermod and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal dashboard.
//!
//! The dashboard thread owns all mutable state. Each tick it commits
//! finished background runs, draws, then polls the terminal for at most
//! 250ms, so solver results appear without any key press. Results tagged
//! with a superseded generation are dropped on the floor.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table, TableState, Tabs},
};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::client::{Backend, Fetched};
use crate::model::{Hop, NodeId, RouteRun, Strategy};
use crate::pipeline::{PipelineEvent, Pipelines};
use crate::scene::{Scene, StrategyTint};
use crate::session::{Comparison, RouteGate, Session};

mod map;
mod theme;

use map::{draw_map, MapParams};
use theme::TuiTheme;

const POLL_INTERVAL: Duration = Duration::from_millis(250);
const WORKDAY_MAP_PADDING: f64 = 60.0;
const COMPARE_MAP_PADDING: f64 = 40.0;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "🅷 🅴 🆁 🅼 🅾 🅳 ";

/// Runs the dashboard until the user quits. Background work arrives over
/// `events`; new work is launched through `pipelines`.
pub fn run<B: Backend + 'static>(
    session: Session,
    pipelines: Pipelines<B>,
    events: UnboundedReceiver<PipelineEvent>,
    solver_label: String,
) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(session, pipelines, events, solver_label, theme);
    app.reload();

    while !app.should_quit {
        app.drain_events();
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Jobs,
    Workday,
    Compare,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Jobs, Tab::Workday, Tab::Compare];

    fn title(self) -> &'static str {
        match self {
            Self::Jobs => "Jobs",
            Self::Workday => "Work day",
            Self::Compare => "Compare",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Jobs => 0,
            Self::Workday => 1,
            Self::Compare => 2,
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Jobs => Self::Workday,
            Self::Workday => Self::Compare,
            Self::Compare => Self::Jobs,
        }
    }

    fn prev(self) -> Self {
        match self {
            Self::Jobs => Self::Compare,
            Self::Workday => Self::Jobs,
            Self::Compare => Self::Workday,
        }
    }
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App<B: Backend + 'static> {
    session: Session,
    pipelines: Pipelines<B>,
    events: UnboundedReceiver<PipelineEvent>,
    theme: TuiTheme,
    solver_label: String,
    tab: Tab,
    jobs_state: TableState,
    show_weights: bool,
    busy: Option<String>,
    toast: Option<Toast>,
    should_quit: bool,
}

impl<B: Backend + 'static> App<B> {
    fn new(
        session: Session,
        pipelines: Pipelines<B>,
        events: UnboundedReceiver<PipelineEvent>,
        solver_label: String,
        theme: TuiTheme,
    ) -> Self {
        Self {
            session,
            pipelines,
            events,
            theme,
            solver_label,
            tab: Tab::Jobs,
            jobs_state: TableState::default(),
            show_weights: false,
            busy: None,
            toast: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_key_code(key.code) {
            self.should_quit = true;
        }
    }

    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            KeyCode::Char('1') => self.tab = Tab::Jobs,
            KeyCode::Char('2') => self.tab = Tab::Workday,
            KeyCode::Char('3') => self.tab = Tab::Compare,
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('t') => self.check_topology(),
            KeyCode::Char('g') => self.run_strategy(Strategy::Greedy),
            KeyCode::Char('o') => self.run_strategy(Strategy::Optimal),
            KeyCode::Char('c') => self.run_comparison(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.cycle_start(1),
            KeyCode::Char('-') => self.cycle_start(-1),
            KeyCode::Char('w') => self.toggle_weights(),
            KeyCode::Char('y') => self.yank_route_summary(),
            KeyCode::Up | KeyCode::Char('k') => self.jobs_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => self.jobs_cursor(1),
            _ => {}
        }
        false
    }

    fn reload(&mut self) {
        self.pipelines.load_dataset();
        self.busy = Some("loading dataset".to_owned());
    }

    fn check_topology(&mut self) {
        if self.session.dataset().is_empty() {
            self.set_toast("No dataset loaded; press r");
            return;
        }
        self.pipelines.check_topology();
        self.busy = Some("topology check".to_owned());
    }

    fn run_strategy(&mut self, strategy: Strategy) {
        let Some(start) = self.route_start() else {
            return;
        };
        self.pipelines
            .run_strategy(strategy, start, self.session.index().clone());
        self.busy = Some(format!("{strategy} run"));
        self.tab = Tab::Workday;
    }

    fn run_comparison(&mut self) {
        let Some(start) = self.route_start() else {
            return;
        };
        self.pipelines
            .run_comparison(start, self.session.index().clone());
        self.busy = Some("comparison".to_owned());
        self.tab = Tab::Compare;
    }

    /// Start node for a strategy run, provided the gate allows one.
    fn route_start(&mut self) -> Option<NodeId> {
        if self.session.dataset().is_empty() {
            self.set_toast("No dataset loaded; press r");
            return None;
        }
        match self.session.route_gate() {
            RouteGate::Unchecked => {
                self.set_toast("Run the topology check first (t)");
                return None;
            }
            RouteGate::Cycle => {
                self.set_toast("Precedence cycle; routing disabled");
                return None;
            }
            RouteGate::Ready => {}
        }
        let start = self.session.start_node();
        if start.is_none() {
            self.set_toast("No start node selected");
        }
        start
    }

    fn cycle_start(&mut self, step: isize) {
        let Some(node) = self.session.cycle_start_node(step) else {
            self.set_toast("No depots loaded");
            return;
        };
        // Pending runs answer for the old start; let them die quietly.
        self.pipelines.invalidate();
        self.busy = None;
        self.set_toast(format!("Start node: {node}"));
    }

    fn toggle_weights(&mut self) {
        self.show_weights = !self.show_weights;
        self.set_toast(if self.show_weights {
            "Edge weights shown"
        } else {
            "Edge weights hidden"
        });
    }

    fn jobs_cursor(&mut self, delta: isize) {
        if self.tab != Tab::Jobs {
            return;
        }
        let len = self.session.dataset().jobs().len();
        if len == 0 {
            self.jobs_state.select(None);
            return;
        }
        let current = self.jobs_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).clamp(0, len as isize - 1) as usize;
        self.jobs_state.select(Some(next));
    }

    fn yank_route_summary(&mut self) {
        let summary = match self.tab {
            Tab::Compare => self.session.comparison().and_then(|comparison| {
                let lines: Vec<String> = [comparison.greedy(), comparison.optimal()]
                    .into_iter()
                    .flatten()
                    .map(route_summary)
                    .collect();
                if lines.is_empty() {
                    None
                } else {
                    Some(lines.join("\n"))
                }
            }),
            _ => self.session.workday().map(route_summary),
        };
        let Some(summary) = summary else {
            self.set_toast("No route to copy");
            return;
        };

        match copy_to_clipboard(&summary) {
            Ok(backend) => self.set_toast(format!("Copied route summary ({backend})")),
            Err(err) => self.set_toast(format!("Clipboard error: {err}")),
        }
    }

    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            if event.seq() != self.pipelines.current_seq() {
                continue;
            }
            self.commit(event);
        }
    }

    fn commit(&mut self, event: PipelineEvent) {
        self.busy = None;
        match event {
            PipelineEvent::DatasetLoaded {
                dataset, notices, ..
            } => {
                let depots = dataset.nodes().len();
                let jobs = dataset.jobs().len();
                self.session.replace_dataset(dataset);
                self.jobs_state = TableState::default();
                if jobs > 0 {
                    self.jobs_state.select(Some(0));
                }
                if notices.is_empty() {
                    self.set_toast(format!("Loaded {depots} depots, {jobs} jobs"));
                } else {
                    self.set_toast(notices.join("; "));
                }
            }
            PipelineEvent::TopoChecked { outcome, .. } => match outcome {
                Ok(topo) => {
                    let toast = if topo.has_cycle {
                        "Topology check: precedence cycle; routing disabled".to_owned()
                    } else {
                        format!("Topology check passed ({} jobs ordered)", topo.order.len())
                    };
                    self.session.set_topology(Some(topo));
                    self.set_toast(toast);
                }
                Err(unavailable) => {
                    self.session.set_topology(None);
                    self.set_toast(unavailable.to_string());
                }
            },
            PipelineEvent::StrategyComputed { outcome, .. } => match outcome {
                Ok(run) => {
                    self.set_toast(run_summary_line(&run));
                    self.session.set_workday(Some(run));
                }
                Err(unavailable) => {
                    self.session.set_workday(None);
                    self.set_toast(unavailable.to_string());
                }
            },
            PipelineEvent::ComparisonComputed {
                greedy, optimal, ..
            } => {
                let mut notes = Vec::new();
                let greedy = commit_side("greedy", greedy, &mut notes);
                let optimal = commit_side("optimal", optimal, &mut notes);
                let comparison = Comparison::new(greedy, optimal);
                let toast = match comparison.gap() {
                    Some(gap) => format!("Comparison ready, gap {}", fmt_cost(gap)),
                    None => notes.join("; "),
                };
                self.session.set_comparison(Some(comparison));
                self.set_toast(toast);
            }
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(2),
        });
    }
}

fn commit_side(
    label: &str,
    outcome: Fetched<RouteRun>,
    notes: &mut Vec<String>,
) -> Option<RouteRun> {
    match outcome {
        Ok(run) => Some(run),
        Err(unavailable) => {
            notes.push(format!("{label}: {unavailable}"));
            None
        }
    }
}

fn fmt_cost(cost: f64) -> String {
    if cost.fract() == 0.0 {
        format!("{cost:.0}")
    } else {
        format!("{cost:.1}")
    }
}

fn run_summary_line(run: &RouteRun) -> String {
    let path = run.path();
    let mut line = format!(
        "{} cost {}, {} hops",
        run.strategy(),
        fmt_cost(run.result().total_cost),
        path.hops().len()
    );
    if !path.skipped_jobs().is_empty() {
        line.push_str(&format!(", {} jobs skipped", path.skipped_jobs().len()));
    }
    if path.dropped_legs() > 0 {
        line.push_str(&format!(", {} legs dropped", path.dropped_legs()));
    }
    line
}

/// One-line, paste-friendly description of a finished run.
fn route_summary(run: &RouteRun) -> String {
    let order = run
        .result()
        .job_order
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ");
    format!(
        "{} from node {}: cost {}, jobs [{}], {} hops",
        run.strategy(),
        run.result().start_node,
        fmt_cost(run.result().total_cost),
        order,
        run.path().hops().len()
    )
}

fn pane_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push_str(": ");
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

fn draw<B: Backend + 'static>(frame: &mut Frame<'_>, app: &mut App<B>) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);
    let header_area = layout[0];
    let body_area = layout[1];
    let status_area = layout[2];

    let titles: Vec<Line<'_>> = Tab::ALL
        .iter()
        .map(|tab| Line::from(format!(" [{}] {} ", tab.index() + 1, tab.title())))
        .collect();
    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(app.theme.base_style())
        .highlight_style(app.theme.selection_style());
    frame.render_widget(tabs, header_area);

    match app.tab {
        Tab::Jobs => draw_jobs_tab(frame, app, body_area),
        Tab::Workday => draw_workday_tab(frame, app, body_area),
        Tab::Compare => draw_compare_tab(frame, app, body_area),
    }

    let toast_snapshot = app
        .toast
        .as_ref()
        .map(|toast| (toast.message.clone(), toast.expires_at));
    let toast_suffix = match toast_snapshot {
        Some((message, expires_at)) if expires_at > Instant::now() => message,
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };

    let status = Paragraph::new(status_line(app, &toast_suffix));
    frame.render_widget(status, status_area);
    let brand = Paragraph::new(footer_brand_line()).alignment(Alignment::Right);
    frame.render_widget(brand, status_area);
}

fn draw_jobs_tab<B: Backend + 'static>(frame: &mut Frame<'_>, app: &mut App<B>, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(42), Constraint::Percentage(58)])
        .split(area);

    draw_jobs_table(frame, app, panes[0]);

    let scene = Scene::compose(&app.session, &[], StrategyTint::Neutral, WORKDAY_MAP_PADDING);
    draw_map(
        frame,
        panes[1],
        MapParams {
            scene,
            theme: &app.theme,
            start: app.session.start_node(),
            show_weights: app.show_weights,
            title: pane_title("Depot map", None),
            focused: false,
        },
    );
}

fn draw_jobs_table<B: Backend + 'static>(frame: &mut Frame<'_>, app: &mut App<B>, area: Rect) {
    let dataset = app.session.dataset();
    let jobs = dataset.jobs();

    let header = Row::new(vec!["Job", "Type", "Depot", "Name"]).style(
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row<'_>> = jobs
        .iter()
        .map(|job| {
            let name = dataset
                .node(job.node_id())
                .map(|node| node.name().to_owned())
                .unwrap_or_else(|| "unknown".to_owned());
            Row::new(vec![
                job.id().to_string(),
                job.kind().to_string(),
                job.node_id().to_string(),
                name,
            ])
        })
        .collect();

    let title = pane_title("Jobs", Some(&jobs.len().to_string()));
    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(app.theme.panel_border_style(true)),
    )
    .highlight_style(app.theme.selection_style());

    frame.render_stateful_widget(table, area, &mut app.jobs_state);
}

fn draw_workday_tab<B: Backend + 'static>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let (hops, tint, tail): (&[Hop], StrategyTint, Option<String>) = match app.session.workday() {
        Some(run) => (
            run.path().hops(),
            StrategyTint::for_strategy(run.strategy()),
            Some(run_summary_line(run)),
        ),
        None => (&[], StrategyTint::Neutral, None),
    };

    let scene = Scene::compose(&app.session, hops, tint, WORKDAY_MAP_PADDING);
    draw_map(
        frame,
        area,
        MapParams {
            scene,
            theme: &app.theme,
            start: app.session.start_node(),
            show_weights: app.show_weights,
            title: pane_title("Work day", tail.as_deref()),
            focused: true,
        },
    );
}

fn draw_compare_tab<B: Backend + 'static>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let comparison = app.session.comparison();
    draw_compare_side(
        frame,
        app,
        panes[0],
        "Greedy",
        comparison.and_then(|comparison| comparison.greedy()),
        StrategyTint::Greedy,
    );
    draw_compare_side(
        frame,
        app,
        panes[1],
        "Optimal",
        comparison.and_then(|comparison| comparison.optimal()),
        StrategyTint::Optimal,
    );
}

fn draw_compare_side<B: Backend + 'static>(
    frame: &mut Frame<'_>,
    app: &App<B>,
    area: Rect,
    label: &str,
    run: Option<&RouteRun>,
    tint: StrategyTint,
) {
    let (hops, tail) = match run {
        Some(run) => (run.path().hops(), Some(run_summary_line(run))),
        None => (&[][..], None),
    };

    let scene = Scene::compose(&app.session, hops, tint, COMPARE_MAP_PADDING);
    draw_map(
        frame,
        area,
        MapParams {
            scene,
            theme: &app.theme,
            start: app.session.start_node(),
            show_weights: app.show_weights,
            title: pane_title(label, tail.as_deref()),
            focused: false,
        },
    );
}

fn status_line<B: Backend + 'static>(app: &App<B>, toast: &str) -> Line<'static> {
    let mut spans = Vec::<Span<'static>>::new();

    let start = app
        .session
        .start_node()
        .map(|node| node.to_string())
        .unwrap_or_else(|| "—".to_owned());
    push_status_entry(&mut spans, "Start", &start);
    push_status_entry(&mut spans, "Solver", &app.solver_label);
    let topo = match app.session.route_gate() {
        RouteGate::Ready => "ok",
        RouteGate::Cycle => "cycle",
        RouteGate::Unchecked => "—",
    };
    push_status_entry(&mut spans, "Topo", topo);
    if let Some(busy) = &app.busy {
        push_status_entry(&mut spans, "Busy", busy);
    }
    push_status_entry(&mut spans, "Keys", "t/g/o/c/r/+/-/w/y/q");

    let toast = toast.trim();
    if !toast.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::styled(
            "Toast:".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
        spans.push(Span::raw(toast.to_owned()));
    }

    Line::from(spans)
}

fn push_status_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(
        format!("{label}:"),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.push(Span::styled(
        value.to_owned(),
        Style::default()
            .fg(FOOTER_KEY_COLOR)
            .add_modifier(Modifier::BOLD),
    ));
}

fn footer_brand_line() -> Line<'static> {
    Line::from(vec![Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR),
    )])
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}

fn copy_to_clipboard(text: &str) -> Result<&'static str, String> {
    let mut stdout = io::stdout();
    execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())?;
    Ok("osc52")
}

fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
