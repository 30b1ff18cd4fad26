//! Duration summary printed at the end of a run

use crate::session::DurationTotals;
use std::io::{self, Write};

/// Format hours at full precision, always with a fractional part (`2.0`, `0.5`)
pub fn format_hours(hours: f64) -> String {
    format!("{:?}", hours)
}

/// Write the three summary lines
pub fn write_report<W: Write>(out: &mut W, totals: &DurationTotals, goal_hours: f64) -> io::Result<()> {
    writeln!(
        out,
        "{} hrs/{} hrs collected on spjall",
        format_hours(totals.total_hours()),
        goal_hours
    )?;
    writeln!(out, "{} total valid hrs", format_hours(totals.valid_hours()))?;
    writeln!(out, "{} partially valid hrs", format_hours(totals.partial_hours()))?;
    Ok(())
}

/// Print the summary to stdout
pub fn print_report(totals: &DurationTotals, goal_hours: f64) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_report(&mut out, totals, goal_hours)?;
    out.flush()
}
