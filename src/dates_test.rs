use chrono::NaiveDate;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ── parse_digit_date ─────────────────────────────────────────────────────

#[test]
fn eight_digits_are_month_day_year() {
    assert_eq!(super::parse_digit_date("12052018"), Some(ymd(2018, 12, 5)));
}

#[test]
fn seven_digits_use_single_digit_month() {
    assert_eq!(super::parse_digit_date("5022018"), Some(ymd(2018, 5, 2)));
}

#[test]
fn separators_are_ignored() {
    assert_eq!(super::parse_digit_date("05/02/2018"), Some(ymd(2018, 5, 2)));
    assert_eq!(super::parse_digit_date(" 1-15-2020 "), Some(ymd(2020, 1, 15)));
}

#[test]
fn other_lengths_are_rejected() {
    assert_eq!(super::parse_digit_date(""), None);
    assert_eq!(super::parse_digit_date("522018"), None);
    assert_eq!(super::parse_digit_date("120520181"), None);
    assert_eq!(super::parse_digit_date("oil change"), None);
}

#[test]
fn out_of_range_components_are_rejected() {
    assert_eq!(super::parse_digit_date("13012018"), None);
    assert_eq!(super::parse_digit_date("00012018"), None);
    assert_eq!(super::parse_digit_date("01322018"), None);
    assert_eq!(super::parse_digit_date("01011899"), None);
    assert_eq!(super::parse_digit_date("01012101"), None);
}

#[test]
fn impossible_calendar_days_are_rejected() {
    assert_eq!(super::parse_digit_date("02312018"), None);
    assert_eq!(super::parse_digit_date("02292019"), None);
    assert_eq!(super::parse_digit_date("02292020"), Some(ymd(2020, 2, 29)));
}

#[test]
fn us_format_round_trips_through_digit_parser() {
    let date = ymd(2019, 3, 7);
    assert_eq!(super::format_us(date), "03/07/2019");
    assert_eq!(super::parse_digit_date(&super::format_us(date)), Some(date));
}

// ── parse_iso ────────────────────────────────────────────────────────────

#[test]
fn parse_iso_accepts_blank_as_none() {
    assert_eq!(super::parse_iso("  ").unwrap(), None);
    assert_eq!(super::parse_iso("2021-06-30").unwrap(), Some(ymd(2021, 6, 30)));
}

#[test]
fn parse_iso_rejects_us_format() {
    let err = super::parse_iso("06/30/2021").unwrap_err().to_string();
    assert!(err.contains("YYYY-MM-DD"), "unexpected error: {}", err);
}

// ── add_months ───────────────────────────────────────────────────────────

#[test]
fn add_months_crosses_year_boundary() {
    assert_eq!(super::add_months(ymd(2018, 11, 15), 6), ymd(2019, 5, 15));
    assert_eq!(super::add_months(ymd(2018, 1, 1), 120), ymd(2028, 1, 1));
}

#[test]
fn add_months_clamps_to_month_end() {
    assert_eq!(super::add_months(ymd(2023, 1, 31), 1), ymd(2023, 2, 28));
    assert_eq!(super::add_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
    assert_eq!(super::add_months(ymd(2024, 8, 31), 1), ymd(2024, 9, 30));
}

#[test]
fn add_zero_months_is_identity() {
    assert_eq!(super::add_months(ymd(2022, 4, 10), 0), ymd(2022, 4, 10));
}

#[test]
fn parse_us_is_strict_about_order() {
    assert_eq!(super::parse_us("05/02/2018").unwrap(), ymd(2018, 5, 2));
    assert_eq!(super::parse_us(" 5/2/2018 ").unwrap(), ymd(2018, 5, 2));
    assert!(super::parse_us("2018-05-02").is_err());
    assert!(super::parse_us("05022018").is_err());
    let err = super::parse_us("13/01/2018").unwrap_err().to_string();
    assert!(err.contains("expected MM/DD/YYYY"), "got: {}", err);
}
