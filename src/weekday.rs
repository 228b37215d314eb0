use chrono::{Month, Weekday};
use derive_more::Constructor;

use crate::datetime::{days_of_month, first_weekday, parse_month, parse_weekday};
use crate::error::{Error, ErrorKind, Result};
use crate::page::CalendarPage;
use crate::syntax::{parse_complete, unsigned, word};

/// Which occurrences of a weekday within a month a rule selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ordinal {
    /// 1 to 5
    Nth(u32),
    Last,
    Every,
}

/// A rule such as `third thursday+1 in Nov text`.
#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct WeekdayRule {
    pub ordinal: Ordinal,
    pub weekday: Weekday,
    pub offset_days: u32,
    pub target_month: Month,
    pub text: String,
}

/// `thu` or `thursday+2`. `None` if the word is not a weekday at all.
fn weekday_with_offset(word: &str) -> Option<Result<(Weekday, u32)>> {
    let (name, offset) = match word.split_once('+') {
        Some((name, offset)) => (name, Some(offset)),
        None => (word, None),
    };

    let weekday = parse_weekday(name)?;

    Some(match offset {
        Some(offset) => parse_complete(unsigned, offset).map(|days| (weekday, days)),
        None => Ok((weekday, 0)),
    })
}

impl WeekdayRule {
    /// Scans leading words for a weekday, a month and the noise word `in`.
    /// The first other word starts the annotation text.
    pub fn parse(ordinal: Ordinal, args: &str, default_month: Month) -> Result<Self> {
        let mut weekday = None;
        let mut offset_days = 0;
        let mut target_month = default_month;

        let mut input = args;
        let text = loop {
            let (rest, w) = match word(input) {
                Ok(parsed) => parsed,
                Err(_) => break "",
            };

            if weekday.is_none() {
                if let Some(parsed) = weekday_with_offset(w) {
                    let (day, offset) = parsed?;
                    weekday = Some(day);
                    offset_days = offset;
                    input = rest;
                    continue;
                }
            }

            if let Some(month) = parse_month(w) {
                target_month = month;
            } else if !w.eq_ignore_ascii_case("in") {
                break input;
            }

            input = rest;
        };

        let weekday = weekday.ok_or_else(|| Error::from(ErrorKind::WeekdayParse))?;

        Ok(WeekdayRule::new(
            ordinal,
            weekday,
            offset_days,
            target_month,
            text.to_owned(),
        ))
    }

    /// Day numbers selected by this rule in the target month of `year`,
    /// shifted by the offset. Days shifted past the month end are dropped.
    pub fn days(&self, year: i32) -> Vec<u32> {
        let last_day = days_of_month(&self.target_month, year);
        let first = first_weekday(&self.target_month, year);
        let target = self.weekday.num_days_from_sunday();

        let mut occurrences = (1..=last_day).filter(|day| (first + day - 1) % 7 == target);

        let selected: Vec<u32> = match self.ordinal {
            Ordinal::Every => occurrences.collect(),
            Ordinal::Last => occurrences.last().into_iter().collect(),
            Ordinal::Nth(n) => n
                .checked_sub(1)
                .and_then(|skip| occurrences.nth(skip as usize))
                .into_iter()
                .collect(),
        };

        selected
            .into_iter()
            .filter_map(|day| day.checked_add(self.offset_days))
            .filter(|day| *day <= last_day)
            .collect()
    }
}

/// Parses a weekday rule and places its text into the matching boxes of
/// `page`. Rules for other months are skipped.
pub fn resolve(ordinal: Ordinal, args: &str, page: &mut CalendarPage) -> Result<()> {
    let rule = WeekdayRule::parse(ordinal, args, page.month())?;

    if rule.target_month != page.month() {
        log::debug!(
            "Skipping rule for {} on page for {}",
            rule.target_month.name(),
            page.month().name()
        );
        return Ok(());
    }

    for day in rule.days(page.year()) {
        page.add_to_box(day, &rule.text);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated_days(page: &CalendarPage) -> Vec<u32> {
        (1..=page.days())
            .filter(|day| page.day_box(*day).map_or(false, |b| !b.is_empty()))
            .collect()
    }

    #[test]
    fn parse_full_rule() {
        let rule =
            WeekdayRule::parse(Ordinal::Nth(4), "thursday+1 in Nov Day after", Month::May)
                .unwrap();
        assert_eq!(
            rule,
            WeekdayRule::new(
                Ordinal::Nth(4),
                Weekday::Thu,
                1,
                Month::November,
                "Day after".to_owned()
            )
        );
    }

    #[test]
    fn parse_defaults_to_page_month() {
        let rule = WeekdayRule::parse(Ordinal::Every, "wed monoplane club", Month::May).unwrap();
        assert_eq!(rule.weekday, Weekday::Wed);
        assert_eq!(rule.target_month, Month::May);
        assert_eq!(rule.offset_days, 0);
        assert_eq!(rule.text, "monoplane club");
    }

    #[test]
    fn parse_without_weekday_fails() {
        let err = WeekdayRule::parse(Ordinal::Nth(1), "in Nov meeting", Month::May).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::WeekdayParse));

        let err = WeekdayRule::parse(Ordinal::Nth(1), "", Month::May).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::WeekdayParse));
    }

    #[test]
    fn parse_malformed_offset_fails() {
        let err = WeekdayRule::parse(Ordinal::Nth(1), "mon+x text", Month::May).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::ArgumentParse));
    }

    #[test]
    fn every_thursday_in_month_starting_thursday() {
        // December 2016 starts on a Thursday and has 31 days
        let mut page = CalendarPage::new(2016, Month::December);
        resolve(Ordinal::Every, "thursday text", &mut page).unwrap();
        assert_eq!(annotated_days(&page), vec![1, 8, 15, 22, 29]);
    }

    #[test]
    fn last_friday_of_june() {
        // June 2019 has its last Friday on the 28th
        let mut page = CalendarPage::new(2019, Month::June);
        resolve(Ordinal::Last, "fri in jun text", &mut page).unwrap();
        assert_eq!(annotated_days(&page), vec![28]);
    }

    #[test]
    fn third_monday_shifted() {
        // third Monday of May 2016 is the 16th
        let mut page = CalendarPage::new(2016, Month::May);
        resolve(Ordinal::Nth(3), "mon+1 text", &mut page).unwrap();
        assert_eq!(annotated_days(&page), vec![17]);
    }

    #[test]
    fn shift_past_month_end_is_dropped() {
        // last Saturday of April 2016 is the 30th
        let rule = WeekdayRule::new(
            Ordinal::Last,
            Weekday::Sat,
            1,
            Month::April,
            "x".to_owned(),
        );
        assert_eq!(rule.days(2016), Vec::<u32>::new());

        let rule = WeekdayRule::new(
            Ordinal::Nth(3),
            Weekday::Mon,
            20,
            Month::May,
            "x".to_owned(),
        );
        assert_eq!(rule.days(2016), Vec::<u32>::new());
    }

    #[test]
    fn huge_offset_drops_every_occurrence() {
        let mut page = CalendarPage::new(2016, Month::May);
        resolve(Ordinal::Every, "mon+4294967295 text", &mut page).unwrap();
        assert_eq!(annotated_days(&page), Vec::<u32>::new());

        let rule = WeekdayRule::new(
            Ordinal::Last,
            Weekday::Tue,
            u32::MAX - 10,
            Month::May,
            "x".to_owned(),
        );
        assert_eq!(rule.days(2016), Vec::<u32>::new());
    }

    #[test]
    fn fifth_occurrence_may_not_exist() {
        // February 2015 has exactly four of every weekday
        let rule = WeekdayRule::new(
            Ordinal::Nth(5),
            Weekday::Sun,
            0,
            Month::February,
            "x".to_owned(),
        );
        assert_eq!(rule.days(2015), Vec::<u32>::new());
    }

    #[test]
    fn every_with_offset_keeps_all_occurrences() {
        // Sundays of May 2016: 1, 8, 15, 22, 29
        let rule = WeekdayRule::new(
            Ordinal::Every,
            Weekday::Sun,
            2,
            Month::May,
            "x".to_owned(),
        );
        assert_eq!(rule.days(2016), vec![3, 10, 17, 24, 31]);
    }

    #[test]
    fn rules_for_other_months_are_skipped() {
        let mut page = CalendarPage::new(2016, Month::May);
        let before = page.clone();
        resolve(Ordinal::Nth(4), "thu in nov Thanksgiving", &mut page).unwrap();
        assert_eq!(page, before);
    }
}
