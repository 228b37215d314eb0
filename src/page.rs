use chrono::{Datelike, Local, Month};
use num_traits::FromPrimitive;

use crate::datetime::{days_of_month, normalize_year};
use crate::error::{Error, ErrorKind, Result};

pub const DEFAULT_BOX_WIDTH: usize = 14;
pub const DEFAULT_BOX_HEIGHT: usize = 4;

pub const MAX_BOX_WIDTH: usize = 32;
pub const MAX_BOX_HEIGHT: usize = 64;

/// Highest day number any month can have.
pub const MAX_DAYS: u32 = 31;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBox {
    pub lines: usize,
    pub text: String,
    pub class: Option<String>,
}

impl DayBox {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Everything a single rendered month is made of. Directives mutate it in
/// place, the renderer only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarPage {
    year: i32,
    month: Month,
    pub title: String,
    pub head: String,
    pub foot: String,
    pub box_width: usize,
    pub box_height: usize,
    boxes: Vec<DayBox>,
}

impl CalendarPage {
    pub fn new(year: i32, month: Month) -> Self {
        CalendarPage {
            year,
            month,
            title: String::new(),
            head: String::new(),
            foot: String::new(),
            box_width: DEFAULT_BOX_WIDTH,
            box_height: DEFAULT_BOX_HEIGHT,
            boxes: vec![DayBox::default(); MAX_DAYS as usize],
        }
    }

    pub fn for_today() -> Self {
        let today = Local::now().date_naive();
        let month = Month::from_u32(today.month()).unwrap_or(Month::January);

        Self::new(today.year(), month)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn days(&self) -> u32 {
        days_of_month(&self.month, self.year)
    }

    pub fn set_month(&mut self, month: Month) {
        self.month = month;
    }

    /// Sets the year, expanding two digit years.
    pub fn set_year(&mut self, year: i32) {
        self.year = normalize_year(year);
    }

    /// Moves one month forward or backward, rolling the year over at the
    /// ends of the year. Fails without moving if the year would overflow.
    pub fn advance_month(&mut self, forward: bool) -> Result<()> {
        let (year, month) = if forward {
            match self.month {
                Month::December => (self.year.checked_add(1), Month::January),
                month => (Some(self.year), month.succ()),
            }
        } else {
            match self.month {
                Month::January => (self.year.checked_sub(1), Month::December),
                month => (Some(self.year), month.pred()),
            }
        };

        self.year =
            year.ok_or_else(|| Error::new(ErrorKind::ArgumentParse, "year out of range"))?;
        self.month = month;
        Ok(())
    }

    /// Whether `month` (1-12) and an optional, possibly abbreviated year
    /// refer to the month on this page.
    pub fn shows(&self, month: u32, year: Option<i32>) -> bool {
        month == self.month.number_from_month()
            && year.map_or(true, |y| normalize_year(y) == self.year)
    }

    pub fn day_box(&self, day: u32) -> Option<&DayBox> {
        if day >= 1 && day <= self.days() {
            self.boxes.get(day as usize - 1)
        } else {
            None
        }
    }

    pub fn box_mut(&mut self, day: u32) -> Option<&mut DayBox> {
        if day >= 1 && day <= self.days() {
            self.boxes.get_mut(day as usize - 1)
        } else {
            None
        }
    }

    /// Appends a line of text to a day's box. Days outside the current month
    /// are ignored, the return value tells whether the text was placed.
    pub fn add_to_box(&mut self, day: u32, text: &str) -> bool {
        match self.box_mut(day) {
            Some(day_box) => {
                day_box.text += "<br>";
                day_box.text += text;
                day_box.lines += 1;
                true
            }
            None => false,
        }
    }

    pub fn set_box_class(&mut self, day: u32, class: &str) -> bool {
        match self.box_mut(day) {
            Some(day_box) => {
                day_box.class = Some(class.to_owned());
                true
            }
            None => false,
        }
    }

    pub fn append_head(&mut self, text: &str) {
        self.head += " ";
        self.head += text;
    }

    pub fn append_foot(&mut self, text: &str) {
        self.foot += " ";
        self.foot += text;
    }
}
