// Date token parser.
//
// Grammar:
//   fixed    = int "/" int              (year from a separate field)
//   relative = digit ... Weekday ... Mon
// The weekday name may appear anywhere in a relative token; the month
// abbreviation must end it. Both lists are scanned in calendar order and the
// first hit wins.

use std::str::FromStr;

use crate::ast::*;
use crate::error::{ParseError, Span};

/// Parse a date token plus an optional separate year field.
///
/// Month and day are any integers in `0..=65535`; they are not checked against
/// the calendar. A year field that is not an integer is ignored and the rule
/// falls back to [`FixedAnnual`].
pub fn parse_rule(date_token: &str, year_token: Option<&str>) -> Result<DateRule, ParseError> {
    let token = date_token.trim();
    if token.is_empty() {
        return Err(ParseError::unrecognized(date_token));
    }

    if token.contains('/') {
        let (month, day) = parse_month_day(token)?;
        let year = year_token.and_then(|y| y.trim().parse::<i16>().ok());
        return Ok(match year {
            Some(year) => FixedDated::new(month, day, year).into(),
            None => FixedAnnual::new(month, day).into(),
        });
    }

    parse_relative(token).map(DateRule::from)
}

fn parse_month_day(token: &str) -> Result<(u16, u16), ParseError> {
    let mut fields = token.split('/');
    let (Some(month), Some(day), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(ParseError::unrecognized(token));
    };
    let month = parse_field(token, month, 0)?;
    let day = parse_field(token, day, month_field_len(token) + 1)?;
    Ok((month, day))
}

fn month_field_len(token: &str) -> usize {
    token.find('/').unwrap_or(token.len())
}

fn parse_field(token: &str, field: &str, start: usize) -> Result<u16, ParseError> {
    field
        .trim()
        .parse::<u16>()
        .map_err(|_| ParseError::malformed(token, field, Span::new(start, start + field.len())))
}

fn parse_relative(token: &str) -> Result<RelativeWeekday, ParseError> {
    let occurrence = token
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| ParseError::MissingOccurrence {
            token: token.to_string(),
        })? as u8;

    let weekday = Weekday::ALL
        .into_iter()
        .find(|wd| token.contains(wd.name()))
        .ok_or_else(|| ParseError::UnknownWeekday {
            token: token.to_string(),
        })?;

    let month = MonthName::ALL
        .into_iter()
        .find(|m| token.ends_with(m.abbrev()))
        .ok_or_else(|| ParseError::UnknownMonth {
            token: token.to_string(),
        })?;

    Ok(RelativeWeekday::new(occurrence, weekday, month))
}

impl FromStr for DateRule {
    type Err = ParseError;

    /// Accepts the combined `MM/DD,YYYY` form as well as bare tokens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(',') {
            Some((date, year)) => parse_rule(date, Some(year)),
            None => parse_rule(s, None),
        }
    }
}
