use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::columns::ColumnMap;
use crate::table::{CellValue, RawRow};

pub const UNKNOWN_DATE: &str = "Unknown Date";

const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y";

// Two-digit-year formats come first: "%Y" would happily read "24" as year 24.
const DATE_FORMATS: &[&str] = &[
    "%m/%d/%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%d-%b-%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%d %B %Y",
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

re!(re_non_numeric, r"[^0-9.\-]+");
re!(re_leading_decimal, r"^-?(?:\d+\.?\d*|\.\d+)");

/// A statement row reduced to the three values detection cares about.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    /// Lowercased, trimmed description text.
    pub description: String,
    /// Spend magnitude; NaN when the amount cell held no number.
    pub amount: f64,
    pub date: String,
}

impl ParsedRow {
    /// Only rows with a positive magnitude take part in detection.
    pub fn is_chargeable(&self) -> bool {
        self.amount > 0.0
    }
}

pub struct RowParser;

impl RowParser {
    pub fn parse(row: &RawRow) -> ParsedRow {
        let columns = ColumnMap::sniff(row);

        let raw_description = match columns.description {
            Some(key) => row.get(key).map(ToString::to_string).unwrap_or_default(),
            None => row.values().map(ToString::to_string).collect::<Vec<_>>().join(" "),
        };

        // No amount column means no amount: other numeric columns are not guessed at.
        let amount = columns
            .amount
            .and_then(|key| row.get(key))
            .map(|cell| clean_amount(&cell.to_string()))
            .unwrap_or(0.0);

        let date = match columns.date {
            Some(key) => format_date(row.get(key)),
            None => UNKNOWN_DATE.to_string(),
        };

        ParsedRow {
            description: normalize_text(&raw_description),
            amount,
            date,
        }
    }
}

pub fn normalize_text(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

/// Strips everything but digits, `.` and `-`, then reads the longest leading
/// decimal number. Returns its magnitude, or NaN when there is none.
pub fn clean_amount(raw: &str) -> f64 {
    let cleaned = re_non_numeric().replace_all(raw, "");
    re_leading_decimal()
        .find(&cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(f64::abs)
        .unwrap_or(f64::NAN)
}

/// Renders a date cell as "Jan 12, 2024". Unparseable text is passed through
/// unchanged; a missing, blank, zero or NaN cell becomes "Unknown Date".
pub fn format_date(cell: Option<&CellValue>) -> String {
    match cell {
        None => UNKNOWN_DATE.to_string(),
        // A zero or NaN cell counts as empty, like a blank text cell.
        Some(CellValue::Number(millis)) if *millis == 0.0 || millis.is_nan() => {
            UNKNOWN_DATE.to_string()
        }
        Some(CellValue::Number(millis)) => {
            if !millis.is_finite() {
                return millis.to_string();
            }
            DateTime::from_timestamp_millis(*millis as i64)
                .map(|dt| display_date(dt.date_naive()))
                .unwrap_or_else(|| millis.to_string())
        }
        Some(CellValue::Text(raw)) => {
            if raw.trim().is_empty() {
                return UNKNOWN_DATE.to_string();
            }
            parse_calendar_date(raw)
                .map(display_date)
                .unwrap_or_else(|| raw.clone())
        }
    }
}

fn display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}
