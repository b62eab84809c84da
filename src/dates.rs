use anyhow::{Context, Result};
use chrono::{Months, NaiveDate};

/// Format used for every date written to the JSON and YAML files.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

const US_FORMAT: &str = "%m/%d/%Y";

/// Parse a compact date token as it appears in `cardata.csv`.
///
/// Everything except ASCII digits is discarded, then the last four digits
/// are the year:
/// - 8 digits: `MM DD YYYY`
/// - 7 digits: `M DD YYYY`
///
/// Any other digit count, an out-of-range component (month 1-12, day 1-31,
/// year 1900-2100) or a day that does not exist in that month yields `None`.
/// Slash-separated dates (`05/02/2018`) collapse to the 8-digit form, so
/// the output of [`format_us`] always parses back.
pub fn parse_digit_date(token: &str) -> Option<NaiveDate> {
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();

    let (month, rest) = match digits.len() {
        8 => digits.split_at(2),
        7 => digits.split_at(1),
        _ => return None,
    };
    let (day, year) = rest.split_at(2);

    let month: u32 = month.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    let year: i32 = year.parse().ok()?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || !(1900..=2100).contains(&year) {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month, day)
}

/// Parse an ISO `YYYY-MM-DD` date. Blank input means "no date".
pub fn parse_iso(value: &str) -> Result<Option<NaiveDate>> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, ISO_FORMAT)
        .map(Some)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", value))
}

/// Parse a `MM/DD/YYYY` date as typed for a new CSV record.
pub fn parse_us(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, US_FORMAT)
        .with_context(|| format!("Invalid date '{}', expected MM/DD/YYYY", value))
}

/// Add calendar months, clamping the day to the length of the target month.
///
/// `2024-01-31 + 1` is `2024-02-29`; `2023-01-31 + 1` is `2023-02-28`.
/// Saturates at the latest representable date.
pub fn add_months(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
}

/// Format a date the way the CSV stores it after `fix-dates`: `MM/DD/YYYY`.
pub fn format_us(date: NaiveDate) -> String {
    date.format(US_FORMAT).to_string()
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[cfg(test)]
#[path = "dates_test.rs"]
mod tests;
