use chrono::Month;
use derive_more::Constructor;
use std::iter;

use crate::datetime::{days_of_month, first_weekday, DAY_NAMES};
use crate::page::{CalendarPage, MAX_BOX_HEIGHT, MAX_BOX_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct MonthLayout {
    /// Column of day 1, 0 for Sunday.
    pub first_weekday: u32,
    pub days: u32,
    pub rows: u32,
}

impl MonthLayout {
    pub const COLUMNS: u32 = 7;

    pub fn of(month: &Month, year: i32) -> Self {
        let first_weekday = first_weekday(month, year);
        let days = days_of_month(month, year);
        let rows = (first_weekday + days + Self::COLUMNS - 1) / Self::COLUMNS;

        Self::new(first_weekday, days, rows)
    }

    /// Day numbers in grid order, `None` for unused cells.
    pub fn cells(&self) -> Vec<Option<u32>> {
        iter::repeat(None)
            .take(self.first_weekday as usize)
            .chain((1..=self.days).map(Some))
            .chain(iter::repeat(None))
            .take((self.rows * Self::COLUMNS) as usize)
            .collect()
    }
}

/// Right-justifies `number` in `width` characters using non-breaking spaces.
/// Numbers wider than `width` keep their last digits.
fn rjust_number(number: u32, width: usize) -> String {
    let digits = number.to_string();
    let skip = digits.len().saturating_sub(width);

    "&nbsp;".repeat(width.saturating_sub(digits.len())) + &digits[skip..]
}

fn render_box(output: &mut String, page: &CalendarPage, day: u32, row: usize, col: usize) {
    output.push_str(&format!("<td class=\"box row{} col{}", row + 1, col + 1));
    if let Some(class) = page.day_box(day).and_then(|b| b.class.as_deref()) {
        output.push(' ');
        output.push_str(class);
    }
    output.push_str("\">\n");

    output.push_str(&format!(
        "<span class=\"daynumber\">{}</span>\n",
        rjust_number(day, page.box_width.min(MAX_BOX_WIDTH))
    ));

    let (lines, text) = page
        .day_box(day)
        .map_or((0, ""), |b| (b.lines, b.text.as_str()));

    output.push_str("<span class=\"boxcontent\">\n");
    if text.is_empty() {
        output.push_str("<br>");
    }
    let height = page.box_height.min(MAX_BOX_HEIGHT);
    output.push_str(&"<br>".repeat(height.saturating_sub(lines)));
    output.push_str(text);
    output.push_str("</span>\n");
}

/// Renders the page as an HTML fragment: title, head, a month grid and foot.
pub fn render(page: &CalendarPage) -> String {
    let month = page.month();
    let layout = MonthLayout::of(&month, page.year());

    let mut output = String::from("<div class=\"calendar\">\n");

    if !page.title.is_empty() {
        output += &format!("<h1>{}</h1>\n\n", page.title);
    }
    if !page.head.is_empty() {
        output += &format!("<span class=\"head\">\n{}</span>\n", page.head);
    }
    output += &format!("<h2>{} {}</h2>\n\n", month.name(), page.year());

    output += "<table summary=\"calendar\">\n<tr>";
    for name in DAY_NAMES.iter() {
        output += &format!("<th class=\"headbox\">{}</th>", name);
    }
    output += "</tr>\n\n";

    for (row, cells) in layout
        .cells()
        .chunks(MonthLayout::COLUMNS as usize)
        .enumerate()
    {
        output += "<tr>\n";
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                Some(day) => render_box(&mut output, page, *day, row, col),
                None => output += "<td class=\"unused\">&nbsp;\n",
            }
            output += "</td>\n";
        }
        output += "</tr>\n\n";
    }

    output += "</table>\n\n";

    if !page.foot.is_empty() {
        output += &format!("<span class=\"foot\">\n{}</span>\n", page.foot);
    }
    output += "</div>\n";

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn rows_cover_the_month() {
        for year in 2015..2025 {
            for month in 1..=12 {
                let month = Month::from_u32(month).unwrap();
                let layout = MonthLayout::of(&month, year);
                let expected = ((layout.first_weekday + layout.days) as f64 / 7.0).ceil() as u32;
                assert_eq!(layout.rows, expected);
                assert!(layout.rows >= 4 && layout.rows <= 6);
            }
        }
    }

    #[test]
    fn known_layouts() {
        // February 2015 starts on a Sunday and fits exactly four rows
        assert_eq!(MonthLayout::of(&Month::February, 2015), MonthLayout::new(0, 28, 4));
        // October 2016 starts on a Saturday and needs six rows
        assert_eq!(MonthLayout::of(&Month::October, 2016), MonthLayout::new(6, 31, 6));
    }

    #[test]
    fn right_justified_day_numbers() {
        assert_eq!(rjust_number(7, 3), "&nbsp;&nbsp;7");
        assert_eq!(rjust_number(17, 2), "17");
        assert_eq!(rjust_number(17, 1), "7");
        assert_eq!(rjust_number(17, 0), "");

        let wide = rjust_number(5, 70000);
        assert_eq!(wide.matches("&nbsp;").count(), 69999);
        assert!(wide.ends_with("&nbsp;5"));
    }

    #[test]
    fn oversized_boxes_are_clamped() {
        let mut page = CalendarPage::new(2015, Month::February);
        page.box_width = 70000;
        page.box_height = usize::MAX;
        let html = render(&page);

        let padding = "&nbsp;".repeat(MAX_BOX_WIDTH - 1);
        assert!(html.contains(&format!("<span class=\"daynumber\">{}1</span>", padding)));
        let blank = "<br>".repeat(MAX_BOX_HEIGHT + 1);
        assert!(html.contains(&format!("<span class=\"boxcontent\">\n{}</span>", blank)));
    }

    #[test]
    fn empty_page_has_no_optional_blocks() {
        let page = CalendarPage::new(2015, Month::February);
        let html = render(&page);

        assert!(html.starts_with("<div class=\"calendar\">\n<h2>February 2015</h2>\n\n"));
        assert!(html.ends_with("</table>\n\n</div>\n"));
        assert!(!html.contains("<h1>"));
        assert!(!html.contains("class=\"head\""));
        assert!(!html.contains("class=\"foot\""));
        assert_eq!(html.matches("<tr>\n").count(), 4);
        assert_eq!(html.matches("<td class=\"box ").count(), 28);
        assert_eq!(html.matches("<td class=\"unused\">").count(), 0);
        assert_eq!(html.matches("<th class=\"headbox\">").count(), 7);
        // one blank line plus the default box height of four
        assert_eq!(
            html.matches("<span class=\"boxcontent\">\n<br><br><br><br><br></span>").count(),
            28
        );
    }

    #[test]
    fn unused_cells_pad_the_grid() {
        let page = CalendarPage::new(2016, Month::October);
        let html = render(&page);
        assert_eq!(html.matches("<tr>\n").count(), 6);
        assert_eq!(html.matches("<td class=\"unused\">&nbsp;\n</td>\n").count(), 6 * 7 - 31);
        assert!(html.contains("<td class=\"box row1 col7\">"));
        assert!(html.contains("<td class=\"box row6 col2\">"));
    }

    #[test]
    fn box_with_text_and_class() {
        let mut page = CalendarPage::new(2015, Month::February);
        page.title = "Club".to_owned();
        page.append_head("Welcome");
        page.append_foot("Bye");
        page.box_width = 3;
        page.box_height = 2;
        page.add_to_box(3, "Meeting");
        page.set_box_class(3, "important");

        let html = render(&page);
        assert!(html.contains("<h1>Club</h1>\n\n<span class=\"head\">\n Welcome</span>\n<h2>"));
        assert!(html.contains(
            "<td class=\"box row1 col3 important\">\n\
             <span class=\"daynumber\">&nbsp;&nbsp;3</span>\n\
             <span class=\"boxcontent\">\n<br><br>Meeting</span>\n</td>\n"
        ));
        assert!(html.ends_with("</table>\n\n<span class=\"foot\">\n Bye</span>\n</div>\n"));
    }

    #[test]
    fn overfull_box_is_not_padded() {
        let mut page = CalendarPage::new(2015, Month::February);
        page.box_height = 1;
        page.add_to_box(1, "a");
        page.add_to_box(1, "b");
        let html = render(&page);
        assert!(html.contains("<span class=\"boxcontent\">\n<br>a<br>b</span>"));
    }
}
