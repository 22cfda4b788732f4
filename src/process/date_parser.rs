// src/process/date_parser.rs

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})$").expect("ISO date regex"));

static NUMERIC_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})/(\d{1,2})(?:/(\d{4}))?$").expect("numeric date regex")
});

static DAY_OF_MONTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{1,2})(?:st|nd|rd|th)?$").expect("day-of-month regex"));

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const FILLER: [&str; 2] = ["of", "the"];

/// Parses the loose dates found on the dashboard ("Tuesday 27 October")
/// into calendar dates, filling in `default_year` when the text has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateParser {
    pub default_year: i32,
}

impl DateParser {
    pub fn new(default_year: i32) -> Self {
        Self { default_year }
    }

    /// Uses the current local year for dates written without one.
    pub fn current_year() -> Self {
        Self::new(Local::now().year())
    }

    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if let Some(caps) = ISO_DATE.captures(text) {
            return NaiveDate::from_ymd_opt(
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                caps[3].parse().ok()?,
            );
        }
        if let Some(caps) = NUMERIC_DATE.captures(text) {
            let year = match caps.get(3) {
                Some(y) => y.as_str().parse().ok()?,
                None => self.default_year,
            };
            return NaiveDate::from_ymd_opt(year, caps[2].parse().ok()?, caps[1].parse().ok()?);
        }
        self.parse_words(text)
    }

    fn parse_words(&self, text: &str) -> Option<NaiveDate> {
        let mut month = None;
        let mut day = None;
        let mut year = None;

        let tokens = text
            .split(|c: char| c.is_whitespace() || c == ',' || c == '.')
            .filter(|t| !t.is_empty());

        for token in tokens {
            let lower = token.to_ascii_lowercase();
            if let Some(m) = month_number(&lower) {
                if month.replace(m).is_some() {
                    return None;
                }
            } else if is_weekday(&lower) || FILLER.contains(&lower.as_str()) {
                continue;
            } else if let Some(caps) = DAY_OF_MONTH.captures(&lower) {
                if day.replace(caps[1].parse::<u32>().ok()?).is_some() {
                    return None;
                }
            } else if lower.len() == 4 && lower.bytes().all(|b| b.is_ascii_digit()) {
                if year.replace(lower.parse::<i32>().ok()?).is_some() {
                    return None;
                }
            } else {
                return None;
            }
        }

        NaiveDate::from_ymd_opt(year.unwrap_or(self.default_year), month?, day?)
    }
}

/// Full names and prefixes of at least three letters ("Oct", "Sept").
fn month_number(token: &str) -> Option<u32> {
    if token.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(token))
        .map(|i| i as u32 + 1)
}

fn is_weekday(token: &str) -> bool {
    token.len() >= 3 && WEEKDAYS.iter().any(|d| d.starts_with(token))
}
