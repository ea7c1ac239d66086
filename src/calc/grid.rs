use chrono::{Datelike, NaiveDate};

/// Fixed display size: 6 weeks of 7 days, regardless of month length.
pub const GRID_CELLS: usize = 42;

/// The (year, month) pair the grid currently displays. `month0` is
/// zero-based (0 = January .. 11 = December), matching chrono's
/// `Datelike::month0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    pub month0: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month0: u32) -> Self {
        MonthCursor { year, month0 }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        MonthCursor {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// First day of the displayed month.
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Weekday index of day 1: 0 = Sunday .. 6 = Saturday.
    pub fn first_weekday_offset(self) -> usize {
        self.first_day().weekday().num_days_from_sunday() as usize
    }

    pub fn days_in_month(self) -> u32 {
        days_in_month(self.year, self.month0)
    }

    /// Cursor shifted by `delta` months, wrapping year boundaries.
    pub fn shifted(self, delta: i32) -> MonthCursor {
        let total = self.year * 12 + self.month0 as i32 + delta;
        MonthCursor {
            year: total.div_euclid(12),
            month0: total.rem_euclid(12) as u32,
        }
    }
}

/// One of the 42 display slots. Trailing next-month cells are tagged as
/// neither current- nor previous-month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct GridCell {
    pub day: u32,
    pub is_current_month: bool,
    pub is_prev_month: bool,
}

/// Builds the 42-cell display grid for `cursor`'s month: the tail of the
/// previous month, the full current month, then the head of the next
/// month. Pure: same cursor always yields the same cells.
pub fn build_grid(cursor: MonthCursor) -> Vec<GridCell> {
    let offset = cursor.first_weekday_offset() as u32;
    let days = cursor.days_in_month();
    let prev_last = cursor.shifted(-1).days_in_month();

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for day in (prev_last + 1 - offset)..=prev_last {
        cells.push(GridCell {
            day,
            is_current_month: false,
            is_prev_month: true,
        });
    }
    for day in 1..=days {
        cells.push(GridCell {
            day,
            is_current_month: true,
            is_prev_month: false,
        });
    }
    let mut day = 1;
    while cells.len() < GRID_CELLS {
        cells.push(GridCell {
            day,
            is_current_month: false,
            is_prev_month: false,
        });
        day += 1;
    }
    cells
}

/// Day count of a month via day 0 of the following month.
pub(crate) fn days_in_month(year: i32, month0: u32) -> u32 {
    let next = MonthCursor::new(year, month0).shifted(1);
    next.first_day()
        .pred_opt()
        .map(|d| d.day())
        .unwrap_or(31)
}

pub(crate) fn month_name(month0: u32) -> &'static str {
    match month0 {
        0 => "Jan",
        1 => "Feb",
        2 => "Mar",
        3 => "Apr",
        4 => "May",
        5 => "Jun",
        6 => "Jul",
        7 => "Aug",
        8 => "Sep",
        9 => "Oct",
        10 => "Nov",
        11 => "Dec",
        _ => "???",
    }
}
