//! Date text handling. Canonical form is zero-padded `YYYY-MM-DD`; input
//! additionally accepts `mm/dd/yyyy`, and `mm/dd` with an implied year.

use chrono::{Datelike, NaiveDate};

fn ymd(y: &str, m: &str, d: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(
        y.trim().parse().ok()?,
        m.trim().parse().ok()?,
        d.trim().parse().ok()?,
    )
}

/// Parse a fully-specified date: `yyyy-mm-dd` or `mm/dd/yyyy`, padded or
/// not. Deterministic, with no implied fields, so command records replay the
/// same way forever.
pub fn parse(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.contains('/') {
        let parts: Vec<&str> = text.split('/').collect();
        match parts[..] {
            [m, d, y] => ymd(y, m, d),
            _ => None,
        }
    } else if text.contains('-') {
        let parts: Vec<&str> = text.split('-').collect();
        match parts[..] {
            [y, m, d] => ymd(y, m, d),
            _ => None,
        }
    } else {
        None
    }
}

/// Parse user input, allowing bare `mm/dd` to take `today`'s year. The
/// result should be canonicalized with [`format`] before it reaches a
/// command, so nothing date-relative is ever recorded.
pub fn parse_input(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    let text = text.trim();
    if text.contains('/') {
        let parts: Vec<&str> = text.split('/').collect();
        if let [m, d] = parts[..] {
            let year = today.year().to_string();
            return ymd(&year, m, d);
        }
    }
    parse(text)
}

/// Canonical `YYYY-MM-DD`
pub fn format(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Compact `m/d` used for day labels
pub fn format_short(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}
