use chrono::Month;
use itertools::Itertools;
use num_traits::FromPrimitive;
use std::iter;

use crate::diagnostics::Diagnostics;
use crate::error::{Error, ErrorKind, Result};
use crate::page::{CalendarPage, MAX_BOX_HEIGHT, MAX_BOX_WIDTH};
use crate::source::{has_calin_ext, Source};
use crate::syntax::{date, parse_complete, split_command, step, unsigned, DateSpec, Step};
use crate::weekday::{self, Ordinal};

pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 16;

pub type ActionResult = Result<()>;

pub enum Action {
    Arg(fn(&mut CalendarPage, &str) -> ActionResult),
    Weekday(Ordinal),
    Include,
}

fn parse_date(token: &str) -> Result<DateSpec> {
    parse_complete(date, token)
}

fn add_date_text(page: &mut CalendarPage, token: &str, text: &str) -> ActionResult {
    let spec = parse_date(token)?;

    if page.shows(spec.month, spec.year) {
        page.add_to_box(spec.day, text);
    }
    Ok(())
}

fn parse_box_size(arg: &str, max: usize) -> Result<usize> {
    match parse_complete(unsigned, arg)? as usize {
        size if size <= max => Ok(size),
        _ => Err(Error::new(
            ErrorKind::ArgumentParse,
            &format!("box size must be at most {}", max),
        )),
    }
}

fn set_date_class(page: &mut CalendarPage, arg: &str) -> ActionResult {
    let (token, class) = split_command(arg);
    if class.is_empty() {
        return Err(Error::from(ErrorKind::UnparsableLine));
    }

    let spec = parse_date(token)?;

    if page.shows(spec.month, spec.year) {
        page.set_box_class(spec.day, class);
    }
    Ok(())
}

const COMMANDS: &[(&'static str, Action)] = &[
    (
        "title",
        Action::Arg(|page, arg| {
            page.title = arg.to_owned();
            Ok(())
        }),
    ),
    (
        "boxwidth",
        Action::Arg(|page, arg| {
            page.box_width = parse_box_size(arg, MAX_BOX_WIDTH)?;
            Ok(())
        }),
    ),
    (
        "boxheight",
        Action::Arg(|page, arg| {
            page.box_height = parse_box_size(arg, MAX_BOX_HEIGHT)?;
            Ok(())
        }),
    ),
    (
        "month",
        Action::Arg(|page, arg| {
            match parse_complete(step, arg)? {
                Step::Next => page.advance_month(true)?,
                Step::Prev => page.advance_month(false)?,
                Step::Absolute(month) => {
                    let month = Month::from_i32(month).ok_or_else(|| {
                        Error::new(ErrorKind::ArgumentParse, "month must be within 1-12")
                    })?;
                    page.set_month(month);
                }
            }
            Ok(())
        }),
    ),
    (
        "year",
        Action::Arg(|page, arg| {
            let year = match parse_complete(step, arg)? {
                Step::Next => page.year().checked_add(1),
                Step::Prev => page.year().checked_sub(1),
                Step::Absolute(year) => Some(year),
            };
            let year =
                year.ok_or_else(|| Error::new(ErrorKind::ArgumentParse, "year out of range"))?;
            page.set_year(year);
            Ok(())
        }),
    ),
    (
        "head",
        Action::Arg(|page, arg| {
            page.append_head(arg);
            Ok(())
        }),
    ),
    (
        "foot",
        Action::Arg(|page, arg| {
            page.append_foot(arg);
            Ok(())
        }),
    ),
    ("class", Action::Arg(set_date_class)),
    ("first", Action::Weekday(Ordinal::Nth(1))),
    ("second", Action::Weekday(Ordinal::Nth(2))),
    ("third", Action::Weekday(Ordinal::Nth(3))),
    ("fourth", Action::Weekday(Ordinal::Nth(4))),
    ("fifth", Action::Weekday(Ordinal::Nth(5))),
    ("last", Action::Weekday(Ordinal::Last)),
    ("every", Action::Weekday(Ordinal::Every)),
    ("include", Action::Include),
];

pub fn match_action(cmd: &str) -> Option<&'static Action> {
    COMMANDS
        .iter()
        .find(|(name, _)| *name == cmd)
        .map(|(_, act)| act)
}

/// Runs description files against a calendar page.
pub struct Interpreter<'a> {
    source: &'a dyn Source,
    diagnostics: &'a mut dyn Diagnostics,
    include_stack: Vec<String>,
    max_include_depth: usize,
}

impl<'a> Interpreter<'a> {
    pub fn new(source: &'a dyn Source, diagnostics: &'a mut dyn Diagnostics) -> Self {
        Interpreter {
            source,
            diagnostics,
            include_stack: Vec::new(),
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    pub fn max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Loads `path` and applies its directives to `page`. Empty paths,
    /// paths that are not description files and unreadable or empty files
    /// leave the page untouched.
    pub fn process(&mut self, path: &str, page: &mut CalendarPage) {
        if path.is_empty() || !has_calin_ext(path) {
            log::debug!("Ignoring input '{}'", path);
            return;
        }

        if self.include_stack.iter().any(|p| p == path) {
            let chain = self
                .include_stack
                .iter()
                .map(String::as_str)
                .chain(iter::once(path))
                .join(" -> ");
            self.diagnostics.report(Error::new(ErrorKind::IncludeCycle, &chain));
            return;
        }

        if self.include_stack.len() >= self.max_include_depth {
            self.diagnostics.report(Error::new(ErrorKind::IncludeDepth, path));
            return;
        }

        let content = match self.source.fetch(path) {
            Ok(content) => content,
            Err(e) => {
                log::info!("Skipping '{}': {}", path, e);
                return;
            }
        };

        self.include_stack.push(path.to_owned());
        self.process_str(&content, page);
        self.include_stack.pop();
    }

    /// Applies already loaded description text to `page`.
    pub fn process_str(&mut self, content: &str, page: &mut CalendarPage) {
        for line in content.split('\n') {
            self.process_line(line.trim_end_matches('\r'), page);
        }
    }

    fn process_line(&mut self, line: &str, page: &mut CalendarPage) {
        let (cmd, arg) = split_command(line);
        log::trace!("cmd='{}' arg='{}'", cmd, arg);

        let result = match cmd {
            "" | "*" => Ok(()),
            cmd if cmd.contains('/') => add_date_text(page, cmd, arg),
            cmd => match match_action(cmd) {
                Some(Action::Arg(act)) => act(page, arg),
                Some(Action::Weekday(ordinal)) => weekday::resolve(*ordinal, arg, page),
                Some(Action::Include) => {
                    self.process(arg, page);
                    Ok(())
                }
                None => Err(Error::new(ErrorKind::UnknownCommand, cmd)),
            },
        };

        if let Err(e) = result {
            self.report(e, line);
        }
    }

    fn report(&mut self, error: Error, line: &str) {
        let message = match &error.message {
            Some(msg) => format!("{} (in '{}')", msg, line),
            None => line.to_owned(),
        };
        self.diagnostics.report(error.with_msg(&message));
    }
}
