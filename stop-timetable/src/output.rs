//! Rendering a finished timetable.

use std::fmt::Write;

use crate::domain::{StopCode, TimetableEntry};

/// Plain-text timetable: a block per line, destinations indented beneath.
pub fn render_text(stop: &StopCode, entries: &[TimetableEntry]) -> String {
    if entries.is_empty() {
        return format!("No buses found stopping at {stop}.\n");
    }

    let mut out = String::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        // Writing to a String cannot fail
        let _ = writeln!(out, "Line {}", entry.line);
        for (destination, times) in entry.arrival_times.iter() {
            let _ = writeln!(out, "  {destination}");
            for time in times {
                let _ = writeln!(out, "    {time}");
            }
        }
    }
    out
}

/// The entry list as pretty-printed JSON.
pub fn render_json(entries: &[TimetableEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(entries)
}
