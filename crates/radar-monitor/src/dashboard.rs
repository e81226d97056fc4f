//! TUI Dashboard using ratatui.

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use radar_core::types::{DateRange, LiveQuote, Signal, SignalTable};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::chart::{ChartRange, ChartSeries};
use crate::format::{format_currency, format_price, RecentRow, Summary};

const LIQUIDITY_COLOR: Color = Color::Rgb(0, 180, 255);
const PRICE_COLOR: Color = Color::Rgb(247, 147, 26);

/// Lines kept for the log pane.
const MESSAGE_LINES: usize = 3;

/// Actions the dashboard delegates to its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardAction {
    /// Invalidate cached data and fetch again
    Refresh,
    /// Write the full table to CSV
    Export,
}

/// Dashboard state.
pub struct DashboardState {
    pub table: SignalTable,
    pub quote: LiveQuote,
    pub range: DateRange,
    pub ticker: String,
    pub chart_range: ChartRange,
    pub recent_rows: usize,
    pub messages: VecDeque<String>,
}

impl DashboardState {
    pub fn new(table: SignalTable, quote: LiveQuote, range: DateRange, ticker: impl Into<String>) -> Self {
        Self {
            table,
            quote,
            range,
            ticker: ticker.into(),
            chart_range: ChartRange::default(),
            recent_rows: 30,
            messages: VecDeque::with_capacity(MESSAGE_LINES + 1),
        }
    }

    pub fn with_recent_rows(mut self, rows: usize) -> Self {
        self.recent_rows = rows;
        self
    }

    /// Append a line to the log pane, dropping the oldest beyond its height.
    pub fn push_message(&mut self, message: impl Into<String>) {
        self.messages.push_back(message.into());
        while self.messages.len() > MESSAGE_LINES {
            self.messages.pop_front();
        }
    }

    fn summary(&self) -> Option<Summary> {
        self.table.latest().map(|row| Summary::new(row, self.quote))
    }
}

fn signal_color(signal: Signal) -> Color {
    match signal {
        Signal::StrongLong => Color::Green,
        Signal::Divergence => Color::Red,
        Signal::BuyOpportunity => Color::Yellow,
        Signal::Neutral => Color::Gray,
    }
}

/// TUI Dashboard.
pub struct Dashboard {
    refresh_ms: u64,
}

impl Dashboard {
    /// Create a new dashboard.
    pub fn new(refresh_ms: u64) -> Self {
        Self { refresh_ms }
    }

    /// Run the dashboard until the user quits.
    ///
    /// `on_action` handles refresh and export requests, updating the state in
    /// place.
    pub fn run<F>(&self, state: &mut DashboardState, mut on_action: F) -> io::Result<()>
    where
        F: FnMut(DashboardAction, &mut DashboardState),
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal, state, &mut on_action);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<F>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        state: &mut DashboardState,
        on_action: &mut F,
    ) -> io::Result<()>
    where
        F: FnMut(DashboardAction, &mut DashboardState),
    {
        loop {
            terminal.draw(|f| self.ui(f, &*state))?;

            if !event::poll(Duration::from_millis(self.refresh_ms))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('r') => {
                    state.push_message("Refreshing data...");
                    terminal.draw(|f| self.ui(f, &*state))?;
                    on_action(DashboardAction::Refresh, state);
                }
                KeyCode::Char('e') => on_action(DashboardAction::Export, state),
                KeyCode::Char(c) => {
                    if let Some(range) = ChartRange::from_key(c) {
                        state.chart_range = range;
                    }
                }
                _ => {}
            }
        }
    }

    fn ui(&self, frame: &mut Frame, state: &DashboardState) {
        let table_height = (state.recent_rows.min(state.table.len()) as u16).saturating_add(3).min(18);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),            // Header
                Constraint::Length(4),            // Indicators
                Constraint::Min(12),              // Chart
                Constraint::Length(table_height), // Recent signals
                Constraint::Length(5),            // Messages
            ])
            .split(frame.area());

        self.render_header(frame, chunks[0], state);
        self.render_indicators(frame, chunks[1], state);
        self.render_chart(frame, chunks[2], state);
        self.render_recent(frame, chunks[3], state);
        self.render_messages(frame, chunks[4], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let mut spans = vec![
            Span::styled("Macro Radar", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" | "),
            Span::styled(state.range.to_string(), Style::default().fg(Color::Cyan)),
            Span::raw(" | Range: "),
        ];
        for (i, range) in ChartRange::ALL.iter().enumerate() {
            let style = if *range == state.chart_range {
                Style::default().fg(PRICE_COLOR).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(format!("{}:{} ", i + 1, range.label()), style));
        }
        spans.push(Span::raw("| 'r' refresh  'e' export  'q' quit"));

        let header = Paragraph::new(Line::from(spans))
            .block(Block::default().borders(Borders::ALL).title("Liquidity Radar"));
        frame.render_widget(header, area);
    }

    fn render_indicators(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(25); 4])
            .split(area);

        let Some(summary) = state.summary() else {
            let empty = Paragraph::new("No data").block(Block::default().borders(Borders::ALL));
            frame.render_widget(empty, area);
            return;
        };

        let mut price_line = vec![Span::styled(
            summary.price_text(),
            Style::default().add_modifier(Modifier::BOLD),
        )];
        if let (Some(text), Some(pct)) = (summary.change_text(), summary.change_pct) {
            let color = if pct >= 0.0 { Color::Green } else { Color::Red };
            price_line.push(Span::raw("  "));
            price_line.push(Span::styled(text, Style::default().fg(color)));
        }

        let metric = |title: String, line: Line<'static>| {
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(title))
        };

        frame.render_widget(
            metric(summary.price_label(&state.ticker), Line::from(price_line)),
            cards[0],
        );
        frame.render_widget(
            metric("Net Liquidity".to_string(), Line::from(summary.liquidity_text())),
            cards[1],
        );
        frame.render_widget(
            metric("Correlation".to_string(), Line::from(summary.correlation_text())),
            cards[2],
        );
        frame.render_widget(
            metric(
                "Signal".to_string(),
                Line::from(Span::styled(
                    summary.signal.to_string(),
                    Style::default()
                        .fg(signal_color(summary.signal))
                        .add_modifier(Modifier::BOLD),
                )),
            ),
            cards[3],
        );
    }

    fn render_chart(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let visible = state.chart_range.visible(state.table.rows());
        let block = Block::default().borders(Borders::ALL).title(format!(
            "Liquidity vs {} ({})",
            state.ticker,
            state.chart_range.label()
        ));

        let Some(series) = ChartSeries::build(visible) else {
            frame.render_widget(Paragraph::new("No data").block(block), area);
            return;
        };

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(12)])
            .split(area);

        let datasets = vec![
            Dataset::default()
                .name("Liquidity ($B)")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(LIQUIDITY_COLOR))
                .data(&series.liquidity),
            Dataset::default()
                .name(format!("{} ($)", state.ticker))
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(PRICE_COLOR))
                .data(&series.price),
        ];

        let date_label = |d: chrono::NaiveDate| Span::raw(d.format("%Y-%m-%d").to_string());
        let liquidity_label = |f: f64| Span::raw(format_currency(series.liquidity_at(f), 0));

        let chart = Chart::new(datasets)
            .block(block)
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds(series.x_bounds)
                    .labels(vec![
                        date_label(series.first_date),
                        date_label(series.mid_date()),
                        date_label(series.last_date),
                    ]),
            )
            .y_axis(
                Axis::default()
                    .title("Net Liquidity ($B)")
                    .style(Style::default().fg(LIQUIDITY_COLOR))
                    .bounds(series.liquidity_bounds)
                    .labels(vec![liquidity_label(0.0), liquidity_label(0.5), liquidity_label(1.0)]),
            );
        frame.render_widget(chart, columns[0]);

        self.render_price_axis(frame, columns[1], &series);
    }

    /// Right-hand price labels aligned with the top, middle and bottom of the
    /// chart's plotting area.
    fn render_price_axis(&self, frame: &mut Frame, area: Rect, series: &ChartSeries) {
        // Border row on top, border plus x-axis labels at the bottom
        let plot_height = area.height.saturating_sub(4) as usize;
        let mut lines = vec![Line::from(""); plot_height + 1];
        if let Some(first) = lines.first_mut() {
            *first = Line::from(format_price(series.price_at(1.0)));
        }
        if plot_height > 2 {
            lines[plot_height / 2] = Line::from(format_price(series.price_at(0.5)));
        }
        if let Some(last) = lines.last_mut() {
            *last = Line::from(format_price(series.price_at(0.0)));
        }
        lines.insert(0, Line::from(Span::styled(
            "Price ($)",
            Style::default().fg(PRICE_COLOR),
        )));

        let axis = Paragraph::new(lines)
            .style(Style::default().fg(PRICE_COLOR))
            .alignment(Alignment::Left);
        frame.render_widget(axis, area);
    }

    fn render_recent(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let header_cells = ["Date", "Price", "Net Liquidity", "Correlation", "Signal"]
            .iter()
            .map(|h| Cell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows = RecentRow::recent(&state.table, state.recent_rows)
            .into_iter()
            .map(|r| {
                let color = signal_color(r.signal);
                Row::new(vec![
                    Cell::from(r.date),
                    Cell::from(r.price),
                    Cell::from(r.net_liquidity),
                    Cell::from(r.correlation),
                    Cell::from(r.signal.to_string()).style(Style::default().fg(color)),
                ])
            });

        let table = Table::new(
            rows,
            [
                Constraint::Percentage(18),
                Constraint::Percentage(18),
                Constraint::Percentage(22),
                Constraint::Percentage(14),
                Constraint::Percentage(28),
            ],
        )
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Recent Signal History"));

        frame.render_widget(table, area);
    }

    fn render_messages(&self, frame: &mut Frame, area: Rect, state: &DashboardState) {
        let messages: Vec<Line> = state
            .messages
            .iter()
            .rev()
            .map(|m| Line::from(m.as_str()))
            .collect();

        let paragraph =
            Paragraph::new(messages).block(Block::default().borders(Borders::ALL).title("Log"));
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as DateDuration, NaiveDate};
    use radar_core::types::SignalRow;
    use ratatui::backend::TestBackend;

    fn state(rows: usize) -> DashboardState {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let table: SignalTable = (0..rows)
            .map(|i| SignalRow {
                date: base + DateDuration::days(i as i64),
                net_liquidity: 6000.0 + i as f64,
                asset_price: 40_000.0 + 50.0 * i as f64,
                liquidity_sma20: None,
                price_sma20: None,
                rolling_correlation: Some(0.9),
                signal: if i % 2 == 0 { Signal::StrongLong } else { Signal::Neutral },
            })
            .collect();
        let range = DateRange::new(base, base + DateDuration::days(rows as i64)).unwrap();
        DashboardState::new(table, LiveQuote::default(), range, "BTC-USD").with_recent_rows(5)
    }

    fn render(state: &DashboardState) -> String {
        let dashboard = Dashboard::new(100);
        let mut terminal = Terminal::new(TestBackend::new(140, 48)).unwrap();
        terminal.draw(|f| dashboard.ui(f, state)).unwrap();

        let buffer = terminal.backend().buffer();
        let area = buffer.area;
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_renders_indicators_and_table() {
        let screen = render(&state(40));

        assert!(screen.contains("BTC Price"));
        assert!(screen.contains("$41,950"));
        assert!(screen.contains("$6,039.00 B"));
        assert!(screen.contains("0.90"));
        assert!(screen.contains("Recent Signal History"));
        assert!(screen.contains("2024-02-09"));
    }

    #[test]
    fn test_renders_empty_table() {
        let screen = render(&state(0));
        assert!(screen.contains("No data"));
    }

    #[test]
    fn test_messages_show_newest() {
        let mut state = state(10);
        for i in 0..5 {
            state.push_message(format!("message {}", i));
        }
        let screen = render(&state);
        assert!(screen.contains("message 4"));
        assert!(!screen.contains("message 0"));
    }

    #[test]
    fn test_message_log_is_bounded() {
        let mut state = state(10);
        for i in 0..1000 {
            state.push_message(format!("refresh {}", i));
        }
        assert_eq!(state.messages.len(), MESSAGE_LINES);
        assert_eq!(state.messages.front().map(String::as_str), Some("refresh 997"));
        assert_eq!(state.messages.back().map(String::as_str), Some("refresh 999"));
    }
}
