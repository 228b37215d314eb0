//! Small `nom` parsers for the pieces of a description line.

use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, take_till, take_while},
    character::complete::{char, digit1, one_of},
    combinator::{all_consuming, eof, map, map_res, opt, recognize, rest, value},
    sequence::{pair, preceded, terminated, tuple},
    IResult,
};

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Next,
    Prev,
    Absolute(i32),
}

/// `month/day[/year]` as written in a directive, not yet checked against a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSpec {
    pub month: u32,
    pub day: u32,
    pub year: Option<i32>,
}

fn spaces(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ' ')(input)
}

fn command_and_rest(input: &str) -> IResult<&str, (&str, &str)> {
    pair(take_till(|c: char| c == ' '), preceded(spaces, rest))(input)
}

/// Splits a line into its command token and the rest of the line.
pub fn split_command(line: &str) -> (&str, &str) {
    command_and_rest(line).map_or((line, ""), |(_, split)| split)
}

/// A single space-delimited word, consuming the spaces after it.
pub fn word(input: &str) -> IResult<&str, &str> {
    terminated(is_not(" "), spaces)(input)
}

pub fn unsigned(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |s: &str| s.parse::<u32>())(input)
}

pub fn integer(input: &str) -> IResult<&str, i32> {
    map_res(recognize(pair(opt(one_of("+-")), digit1)), |s: &str| {
        s.parse::<i32>()
    })(input)
}

/// `next`, `+1`, `prev`, `-1` or an absolute number.
pub fn step(input: &str) -> IResult<&str, Step> {
    alt((
        value(Step::Next, terminated(alt((tag("next"), tag("+1"))), eof)),
        value(Step::Prev, terminated(alt((tag("prev"), tag("-1"))), eof)),
        map(integer, Step::Absolute),
    ))(input)
}

pub fn date(input: &str) -> IResult<&str, DateSpec> {
    map(
        tuple((
            unsigned,
            preceded(char('/'), unsigned),
            opt(preceded(char('/'), integer)),
        )),
        |(month, day, year)| DateSpec { month, day, year },
    )(input)
}

/// Runs `parser` over the whole of `input`.
pub fn parse_complete<'a, T, P>(parser: P, input: &'a str) -> Result<T>
where
    P: FnMut(&'a str) -> IResult<&'a str, T>,
{
    let (_, value) = all_consuming(parser)(input)?;
    Ok(value)
}
