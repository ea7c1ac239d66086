use crate::calc::grid::month_name;
use crate::calc::{DateRange, GridCell, MonthCursor, QuickRange};
use crate::picker::{CommittedDateTime, PickerSession};
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{
    self, Event as CEvent, KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io::Stdout;
use std::time::Duration as StdDuration;

/// Inner popup width: seven 3-character day cells.
const GRID_WIDTH: u16 = 21;
const GRID_ROWS: u16 = 6;

pub struct App {
    session: PickerSession,
    today: NaiveDate,
    /// Grid index (0..42) the keyboard cursor is on while the popup is open.
    hover: usize,
    show_quick_ranges: bool,
    /// Transient result line (quick range or commit). Cleared on next keypress.
    status: Option<(String, Color)>,
    committed: Option<CommittedDateTime>,
    /// Rects remembered from the last render, for mouse hit-testing.
    popup_area: Option<Rect>,
    grid_area: Option<Rect>,
}

impl App {
    pub fn new(session: PickerSession, today: NaiveDate) -> Self {
        App {
            session,
            today,
            hover: 0,
            show_quick_ranges: false,
            status: None,
            committed: None,
            popup_area: None,
            grid_area: None,
        }
    }

    pub fn last_committed(&self) -> Option<&CommittedDateTime> {
        self.committed.as_ref()
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        // Clear the previous result message on every keypress
        self.status = None;

        if !self.session.is_open() {
            match code {
                KeyCode::Char('q') => return true,
                KeyCode::Char('o') | KeyCode::Enter | KeyCode::Char(' ') => {
                    self.session.open();
                    self.hover = self.session.cursor().first_weekday_offset();
                }
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('o') => self.session.toggle(),
            KeyCode::Esc => self.session.escape(),
            KeyCode::Char('x') => self.session.cancel(),
            KeyCode::Char('s') => {
                if let Some(value) = self.session.commit() {
                    self.status = Some((format!("Selected: {value}"), Color::Green));
                    self.committed = Some(value);
                }
            }
            KeyCode::Char('r') => self.show_quick_ranges = !self.show_quick_ranges,
            KeyCode::Char('1') => self.apply_quick_range(QuickRange::Today),
            KeyCode::Char('2') => self.apply_quick_range(QuickRange::Last7Days),
            KeyCode::Char('3') => self.apply_quick_range(QuickRange::ThisMonth),
            KeyCode::Char('n') => self.session.navigate_month(1),
            KeyCode::Char('p') => self.session.navigate_month(-1),
            KeyCode::Left => {
                if self.hover > 0 {
                    self.hover -= 1;
                }
            }
            KeyCode::Right => {
                if self.hover + 1 < crate::calc::GRID_CELLS {
                    self.hover += 1;
                }
            }
            KeyCode::Up => {
                if self.hover >= 7 {
                    self.hover -= 7;
                }
            }
            KeyCode::Down => {
                if self.hover + 7 < crate::calc::GRID_CELLS {
                    self.hover += 7;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(cell) = self.session.current_grid().get(self.hover).copied() {
                    self.session.select_day(cell);
                }
            }
            KeyCode::Char('H') => {
                let hour = self.session.selection().hour;
                self.session.set_hour(if hour == 12 { 1 } else { hour + 1 });
            }
            KeyCode::Char('h') => {
                let hour = self.session.selection().hour;
                self.session.set_hour(if hour == 1 { 12 } else { hour - 1 });
            }
            KeyCode::Char('M') => {
                let minute = self.session.selection().minute;
                self.session.set_minute((minute + 1) % 60);
            }
            KeyCode::Char('m') => {
                let minute = self.session.selection().minute;
                self.session.set_minute(if minute == 0 { 59 } else { minute - 1 });
            }
            KeyCode::Char('a') => {
                let meridiem = self.session.selection().meridiem;
                self.session.set_meridiem(meridiem.toggled());
            }
            _ => {}
        }
        false
    }

    pub fn handle_mouse(&mut self, ev: MouseEvent) {
        if !matches!(ev.kind, MouseEventKind::Down(MouseButton::Left)) {
            return;
        }
        if !self.session.is_open() {
            return;
        }
        let pos = Position::new(ev.column, ev.row);
        if let Some(grid) = self.grid_area {
            if grid.contains(pos) {
                let col = ((ev.column - grid.x) / 3) as usize;
                let row = (ev.row - grid.y) as usize;
                if col < 7 {
                    let idx = row * 7 + col;
                    if let Some(cell) = self.session.current_grid().get(idx).copied() {
                        self.hover = idx;
                        self.session.select_day(cell);
                    }
                }
                return;
            }
        }
        if let Some(popup) = self.popup_area {
            if !popup.contains(pos) {
                self.status = None;
                self.session.outside_interaction();
            }
        }
    }

    fn apply_quick_range(&mut self, preset: QuickRange) {
        if let Some(range) = self.session.apply_quick_range(preset) {
            self.status = Some((format_range_status(preset, range), Color::Cyan));
            self.show_quick_ranges = false;
        }
    }

    pub fn render(&mut self, f: &mut Frame) {
        let area = f.area();
        self.render_backdrop(f, area);
        if self.session.is_open() {
            self.render_popup(f, area);
        } else {
            self.popup_area = None;
            self.grid_area = None;
        }
        self.render_status(f, area);
    }

    fn render_backdrop(&self, f: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "DateTime Picker",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "o = open picker   q = quit",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
        ];
        if let Some(value) = &self.committed {
            lines.push(Line::from(vec![
                Span::styled("Committed  ", Style::default().add_modifier(Modifier::DIM)),
                Span::raw(value.to_string()),
            ]));
        }
        if let Some(preset) = self.session.last_applied() {
            lines.push(Line::from(vec![
                Span::styled("Quick      ", Style::default().add_modifier(Modifier::DIM)),
                Span::raw(preset.label()),
            ]));
        }
        let p = Paragraph::new(lines).block(Block::default().borders(Borders::NONE));
        f.render_widget(p, area);
    }

    fn render_popup(&mut self, f: &mut Frame, area: Rect) {
        let quick_lines: u16 = if self.show_quick_ranges { 3 } else { 1 };
        // quick panel + month header + day names + grid + time + actions
        let inner_height = quick_lines + 1 + 1 + GRID_ROWS + 1 + 1;
        let popup = Rect {
            x: area.x + 2,
            y: area.y + 1,
            width: (GRID_WIDTH + 4).min(area.width.saturating_sub(2)),
            height: (inner_height + 2).min(area.height.saturating_sub(1)),
        };
        f.render_widget(Clear, popup);

        let cursor = self.session.cursor();
        let selection = self.session.selection();
        let grid = self.session.current_grid();

        let mut lines: Vec<Line> = Vec::new();
        if self.show_quick_ranges {
            lines.push(quick_line("1", QuickRange::Today));
            lines.push(quick_line("2", QuickRange::Last7Days));
            lines.push(quick_line("3", QuickRange::ThisMonth));
        } else {
            lines.push(Line::from(Span::styled(
                "r = quick ranges",
                Style::default().fg(Color::Cyan),
            )));
        }

        let title = format!("{} {}", month_name(cursor.month0), cursor.year);
        lines.push(Line::from(vec![
            Span::styled("<p ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:^15}", title),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(" n>", Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(Span::styled(
            "Su Mo Tu We Th Fr Sa",
            Style::default().fg(Color::DarkGray),
        )));

        for row in 0..GRID_ROWS as usize {
            let mut spans = Vec::new();
            for col in 0..7usize {
                let idx = row * 7 + col;
                let cell = grid[idx];
                let style = day_cell_style(
                    selection.day == Some(cell.day) && cell.is_current_month,
                    cell.is_current_month,
                    idx == self.hover,
                    self.is_today(cursor, cell),
                );
                spans.push(Span::styled(format!("{:2}", cell.day), style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(vec![
            Span::styled(
                format!(
                    "{}:{:02} {}",
                    selection.hour, selection.minute, selection.meridiem
                ),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  h/H m/M a", Style::default().fg(Color::DarkGray)),
        ]));
        lines.push(Line::from(Span::styled(
            "s=Set x=Cancel Esc=hide",
            Style::default().fg(Color::DarkGray),
        )));

        let block = Block::default().borders(Borders::ALL).title(" pick ");
        let p = Paragraph::new(lines).block(block);
        f.render_widget(p, popup);

        self.popup_area = Some(popup);
        self.grid_area = Some(Rect {
            x: popup.x + 1,
            y: popup.y + 1 + quick_lines + 2,
            width: GRID_WIDTH.min(popup.width.saturating_sub(2)),
            height: GRID_ROWS.min(popup.height.saturating_sub(2)),
        });
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let Some((msg, color)) = &self.status else {
            return;
        };
        if area.height < 2 {
            return;
        }
        let status_area = Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        };
        let p = Paragraph::new(Line::from(Span::styled(
            msg.clone(),
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        )));
        f.render_widget(p, status_area);
    }

    fn is_today(&self, cursor: MonthCursor, cell: GridCell) -> bool {
        cell.is_current_month
            && cursor == MonthCursor::from_date(self.today)
            && cell.day == self.today.day()
    }
}

fn quick_line(key: &str, preset: QuickRange) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key} "), Style::default().fg(Color::DarkGray)),
        Span::styled(preset.label(), Style::default().fg(Color::Cyan)),
    ])
}

/// Style for one grid cell. "Today" is a host-side overlay; the grid
/// itself carries no clock knowledge.
pub(crate) fn day_cell_style(
    is_selected: bool,
    is_current_month: bool,
    is_hovered: bool,
    is_today: bool,
) -> Style {
    let mut style = if is_selected && is_current_month {
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD)
    } else if !is_current_month {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };
    if is_today && is_current_month {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if is_hovered {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

/// Status line mirroring the quick-range result, e.g.
/// "Selected: Last 7 Days - Nov 28 to Dec 5, 2025".
pub(crate) fn format_range_status(preset: QuickRange, range: DateRange) -> String {
    match preset {
        QuickRange::Today => format!(
            "Selected: Today - {} {}, {}",
            month_name(range.end.month0()),
            range.end.day(),
            range.end.year()
        ),
        QuickRange::Last7Days => format!(
            "Selected: Last 7 Days - {} {} to {} {}, {}",
            month_name(range.start.month0()),
            range.start.day(),
            month_name(range.end.month0()),
            range.end.day(),
            range.end.year()
        ),
        QuickRange::ThisMonth => format!(
            "Selected: This Month - {} {}",
            month_name(range.start.month0()),
            range.start.year()
        ),
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;
        if event::poll(StdDuration::from_millis(16))? {
            match event::read()? {
                CEvent::Key(key) => {
                    if app.handle_key(key.code, key.modifiers) {
                        break;
                    }
                }
                CEvent::Mouse(ev) => app.handle_mouse(ev),
                _ => {}
            }
        }
    }
    Ok(())
}
