use crate::calc::grid::month_name;
use crate::calc::{build_grid, GridCell, MonthCursor};
use anyhow::{bail, Result};

pub fn run(year: i32, month: u32, json: bool) -> Result<()> {
    if !(1..=12).contains(&month) {
        bail!("Month must be 1-12, got {month}.");
    }
    let cursor = MonthCursor::new(year, month - 1);
    let cells = build_grid(cursor);
    write_grid(cursor, &cells, json, &mut std::io::stdout())
}

/// Prints the 42-cell grid, seven columns per row. Adjacent-month days
/// carry a trailing dot in text mode.
pub(crate) fn write_grid<W: std::io::Write>(
    cursor: MonthCursor,
    cells: &[GridCell],
    json: bool,
    out: &mut W,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(cells)?)?;
        return Ok(());
    }

    let title = format!("{} {}", month_name(cursor.month0), cursor.year);
    writeln!(out, "{:^20}", title)?;
    writeln!(out, "Su Mo Tu We Th Fr Sa")?;
    for week in cells.chunks(7) {
        let row: String = week
            .iter()
            .map(|c| {
                if c.is_current_month {
                    format!("{:2} ", c.day)
                } else {
                    format!("{:2}.", c.day)
                }
            })
            .collect();
        writeln!(out, "{}", row.trim_end())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_output(year: i32, month0: u32, json: bool) -> String {
        let cursor = MonthCursor::new(year, month0);
        let cells = build_grid(cursor);
        let mut buf = Vec::new();
        write_grid(cursor, &cells, json, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_text_output_has_title_header_and_six_weeks() {
        let out = grid_output(2025, 11, false);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert!(lines[0].contains("Dec 2025"));
        assert_eq!(lines[1], "Su Mo Tu We Th Fr Sa");
    }

    #[test]
    fn test_text_output_marks_adjacent_month_days() {
        let out = grid_output(2025, 11, false);
        let lines: Vec<&str> = out.lines().collect();
        // Dec 2025: first cell is Nov 30, last row ends in January days
        assert!(lines[2].starts_with("30."));
        assert!(lines[7].ends_with("10."));
    }

    #[test]
    fn test_json_output_serializes_cells() {
        let out = grid_output(2025, 11, true);
        assert!(out.contains("\"is_current_month\": true"));
        assert!(out.contains("\"is_prev_month\": true"));
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), 42);
    }

    #[test]
    fn test_run_rejects_out_of_range_month() {
        assert!(run(2025, 0, false).is_err());
        assert!(run(2025, 13, false).is_err());
    }
}
