use crate::calc::{DateRange, QuickRange};
use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};

pub fn run(preset: &str, today: Option<&str>, json: bool) -> Result<()> {
    let preset = parse_preset(preset)?;
    let today = match today {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("failed to parse --today '{raw}' (expected YYYY-MM-DD)"))?,
        None => Local::now().date_naive(),
    };
    let range = preset.evaluate(today);
    write_range(preset, range, json, &mut std::io::stdout())
}

pub(crate) fn parse_preset(name: &str) -> Result<QuickRange> {
    match name.to_lowercase().as_str() {
        "today" => Ok(QuickRange::Today),
        "last7days" | "last-7-days" => Ok(QuickRange::Last7Days),
        "thismonth" | "this-month" => Ok(QuickRange::ThisMonth),
        other => bail!("Unknown preset '{other}' (expected today, last7days, or thismonth)."),
    }
}

pub(crate) fn write_range<W: std::io::Write>(
    preset: QuickRange,
    range: DateRange,
    json: bool,
    out: &mut W,
) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&range)?)?;
        return Ok(());
    }
    writeln!(out, "{}", preset.label())?;
    writeln!(out, "start: {}", range.start.format("%Y-%m-%d"))?;
    writeln!(out, "end:   {}", range.end.format("%Y-%m-%d"))?;
    Ok(())
}
