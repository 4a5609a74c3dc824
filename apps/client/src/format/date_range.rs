use chrono::NaiveDate;

pub const PRESENT: &str = "Present";

/// Start/end pair as edited; flat form `"Jan 2023 - Present"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

pub fn format_date_range(range: &DateRange) -> String {
    match (range.start.is_empty(), range.end.is_empty()) {
        (false, false) => format!("{} - {}", range.start, range.end),
        (false, true) => range.start.clone(),
        (true, false) => format!(" - {}", range.end),
        (true, true) => String::new(),
    }
}

pub fn parse_date_range(flat: &str) -> DateRange {
    match flat.split_once(" - ") {
        Some((start, end)) => DateRange {
            start: start.trim().to_string(),
            end: end.trim().to_string(),
        },
        None => DateRange {
            start: flat.trim().to_string(),
            end: String::new(),
        },
    }
}

/// `"Mar 2021"` → 2021-03-01. `"Present"` and anything unreadable → `None`.
pub fn month_year(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("01 {}", value.trim()), "%d %b %Y").ok()
}

/// True unless both ends are readable months and the end precedes the start.
/// Unreadable values are left to the per-field validators.
pub fn is_ordered(start: &str, end: &str) -> bool {
    if end.trim() == PRESENT {
        return true;
    }
    match (month_year(start), month_year(end)) {
        (Some(s), Some(e)) => e >= s,
        _ => true,
    }
}
