use chrono::{Datelike, Month, NaiveDate, Weekday};
use phf::phf_map;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

const DAYS_OF_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub static WEEKDAY_ABBREVIATIONS: phf::Map<&'static str, Weekday> = phf_map! {
    "sun" => Weekday::Sun,
    "mon" => Weekday::Mon,
    "tue" => Weekday::Tue,
    "wed" => Weekday::Wed,
    "thu" => Weekday::Thu,
    "fri" => Weekday::Fri,
    "sat" => Weekday::Sat,
};

pub static MONTH_ABBREVIATIONS: phf::Map<&'static str, Month> = phf_map! {
    "jan" => Month::January,
    "feb" => Month::February,
    "mar" => Month::March,
    "apr" => Month::April,
    "may" => Month::May,
    "jun" => Month::June,
    "jul" => Month::July,
    "aug" => Month::August,
    "sep" => Month::September,
    "oct" => Month::October,
    "nov" => Month::November,
    "dec" => Month::December,
};

/// Spellings that are not a prefix of the full name.
static WEEKDAY_ALIASES: phf::Map<&'static str, Weekday> = phf_map! {
    "weds" => Weekday::Wed,
};

/// Expands abbreviated years: 0-49 are in the 2000s, 50-99 in the 1900s.
pub fn normalize_year(year: i32) -> i32 {
    match year {
        0..=49 => year + 2000,
        50..=99 => year + 1900,
        _ => year,
    }
}

/// Every fourth year is a leap year, without the centurial exception.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0
}

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let days = DAYS_OF_MONTH[month.number_from_month() as usize - 1];
    if *month == Month::February && is_leap_year(year) {
        days + 1
    } else {
        days
    }
}

/// Weekday of the first day of the month, 0 for Sunday up to 6 for Saturday.
pub fn first_weekday(month: &Month, year: i32) -> u32 {
    // weekdays repeat every 400 years
    let year = 2000 + year.rem_euclid(400);

    NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
        .map_or(0, |date| date.weekday().num_days_from_sunday())
}

pub fn day_name(weekday: Weekday) -> &'static str {
    DAY_NAMES[weekday.num_days_from_sunday() as usize]
}

fn match_name<T: Copy>(
    table: &phf::Map<&'static str, T>,
    word: &str,
    full_name: impl Fn(T) -> &'static str,
) -> Option<T> {
    let word = word.strip_suffix('.').unwrap_or(word).to_lowercase();
    let value = *table.get(word.get(..3)?)?;

    if full_name(value).to_lowercase().starts_with(&word) {
        Some(value)
    } else {
        None
    }
}

/// Matches `thu`, `thurs.` or `Thursday`, but not `thumb`.
pub fn parse_weekday(word: &str) -> Option<Weekday> {
    let alias = word.strip_suffix('.').unwrap_or(word).to_lowercase();

    WEEKDAY_ALIASES
        .get(alias.as_str())
        .copied()
        .or_else(|| match_name(&WEEKDAY_ABBREVIATIONS, word, day_name))
}

pub fn parse_month(word: &str) -> Option<Month> {
    match_name(&MONTH_ABBREVIATIONS, word, |month: Month| month.name())
}
