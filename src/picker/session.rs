use crate::calc::grid::month_name;
use crate::calc::{build_grid, DateRange, GridCell, MonthCursor, QuickRange};
use crate::data::{AppSettings, Meridiem, Selection};
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;
use std::fmt;

/// Visibility state. The selection snapshot taken on open lives inside
/// the `Open` variant so it cannot outlive the open phase.
enum PickerState {
    Closed,
    Open { snapshot: Selection },
}

/// The full in-memory state of one picker instance between mount and
/// unmount. All transitions are synchronous and total: invalid inputs
/// (wrong day for the month, out-of-range time fields, navigation deltas
/// other than ±1) are defined no-ops rather than errors.
pub struct PickerSession {
    state: PickerState,
    cursor: MonthCursor,
    selection: Selection,
    last_applied: Option<QuickRange>,
    /// Injected wall-clock read, swapped for a fixed date in tests.
    clock: Box<dyn Fn() -> NaiveDate>,
}

impl PickerSession {
    pub fn new(settings: &AppSettings, cursor: MonthCursor) -> Self {
        Self::with_clock(settings, cursor, Box::new(|| Local::now().date_naive()))
    }

    pub fn with_clock(
        settings: &AppSettings,
        cursor: MonthCursor,
        clock: Box<dyn Fn() -> NaiveDate>,
    ) -> Self {
        PickerSession {
            state: PickerState::Closed,
            cursor,
            selection: Selection::new(
                settings.default_hour,
                settings.default_minute,
                settings.default_meridiem,
            ),
            last_applied: None,
            clock,
        }
    }

    // ── Read accessors ────────────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        matches!(self.state, PickerState::Open { .. })
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn last_applied(&self) -> Option<QuickRange> {
        self.last_applied
    }

    /// The 42-cell display grid for the current cursor.
    pub fn current_grid(&self) -> Vec<GridCell> {
        build_grid(self.cursor)
    }

    // ── Visibility transitions ────────────────────────────────────────────────

    /// Snapshots the selection so `cancel()` can restore it. Opening an
    /// already-open session does not retake the snapshot.
    pub fn open(&mut self) {
        if let PickerState::Closed = self.state {
            self.state = PickerState::Open {
                snapshot: self.selection.clone(),
            };
        }
    }

    /// Closes without committing and without restoring the snapshot;
    /// in-progress edits stay.
    pub fn close(&mut self) {
        self.state = PickerState::Closed;
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Cancel key signal: close, keep edits.
    pub fn escape(&mut self) {
        self.close();
    }

    /// Pointer activity outside the control's bounds: close, keep edits.
    pub fn outside_interaction(&mut self) {
        self.close();
    }

    /// Explicit cancel: restores the selection snapshotted at the most
    /// recent `open()` and closes.
    pub fn cancel(&mut self) {
        if let PickerState::Open { snapshot } =
            std::mem::replace(&mut self.state, PickerState::Closed)
        {
            self.selection = snapshot;
        }
    }

    /// Consolidates the current cursor and selection into one value and
    /// closes. A missing day commits anyway; the day stays unset in the
    /// emitted value. Returns None when the session is not open.
    pub fn commit(&mut self) -> Option<CommittedDateTime> {
        if !self.is_open() {
            return None;
        }
        self.state = PickerState::Closed;
        Some(CommittedDateTime {
            month: month_name(self.cursor.month0),
            day: self.selection.day,
            year: self.cursor.year,
            hour: self.selection.hour,
            minute: self.selection.minute,
            meridiem: self.selection.meridiem,
        })
    }

    // ── In-picker edits ───────────────────────────────────────────────────────

    /// Moves the displayed month by exactly one. Other deltas are
    /// rejected. The selected day number is deliberately left alone even
    /// when it does not exist in the new month.
    pub fn navigate_month(&mut self, delta: i32) {
        if !self.is_open() || delta.abs() != 1 {
            return;
        }
        self.cursor = self.cursor.shifted(delta);
    }

    /// Picks a day from the displayed grid. Cells belonging to an
    /// adjacent month are ignored.
    pub fn select_day(&mut self, cell: GridCell) {
        if self.is_open() && cell.is_current_month {
            self.selection.day = Some(cell.day);
        }
    }

    pub fn set_hour(&mut self, hour: u32) {
        if self.is_open() {
            self.selection.set_hour(hour);
        }
    }

    pub fn set_minute(&mut self, minute: u32) {
        if self.is_open() {
            self.selection.set_minute(minute);
        }
    }

    pub fn set_meridiem(&mut self, meridiem: Meridiem) {
        if self.is_open() {
            self.selection.set_meridiem(meridiem);
        }
    }

    /// Evaluates a preset against the injected clock, applies its cursor
    /// and day side effects, and returns the resulting range as an
    /// informational event. Distinct from `commit()`: the session stays
    /// open. Returns None when the session is not open.
    pub fn apply_quick_range(&mut self, preset: QuickRange) -> Option<DateRange> {
        if !self.is_open() {
            return None;
        }
        let today = (self.clock)();
        let range = preset.evaluate(today);
        match preset {
            QuickRange::Today => {
                self.selection.day = Some(today.day());
                self.cursor = MonthCursor::from_date(today);
            }
            QuickRange::Last7Days => {}
            QuickRange::ThisMonth => {
                self.cursor = MonthCursor::from_date(range.start);
            }
        }
        self.last_applied = Some(preset);
        Some(range)
    }
}

/// The single consolidated value emitted by `commit()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommittedDateTime {
    pub month: &'static str,
    pub day: Option<u32>,
    pub year: i32,
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl fmt::Display for CommittedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.day {
            Some(day) => write!(f, "{} {}, {}", self.month, day, self.year)?,
            None => write!(f, "{} ?, {}", self.month, self.year)?,
        }
        write!(f, " {}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}
