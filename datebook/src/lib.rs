//! datebook — named calendar entries and when they happen.
//!
//! Entries follow one of three date rules:
//!
//! - `MM/DD`: the same day every year,
//! - `MM/DD` with a year: something that happened once, remembered yearly,
//! - `3MondayJan`: the nth weekday of a month.
//!
//! # Examples
//!
//! ```
//! use datebook::{Agenda, Entry, Recurrence};
//! use jiff::civil::date;
//!
//! let mlk = Entry::parse("MLK Day", "3MondayJan", None).unwrap();
//! assert_eq!(mlk.next_occurrence(date(2026, 1, 1)), date(2026, 1, 19));
//!
//! let agenda: Agenda = datebook::entries_from_str(
//!     "Pi Day,03/14\nBicycle Day,04/19,1943\n",
//!     None,
//! )
//! .into_iter()
//! .collect();
//! let soon = agenda.in_next_months(date(2026, 3, 1), 2);
//! assert_eq!(soon.len(), 2);
//! ```

pub mod ast;
pub mod display;
pub mod error;
pub mod eval;
pub mod parser;
pub mod query;
pub mod source;

pub use ast::{
    DateRule, Entry, FixedAnnual, FixedDated, MonthName, RelativeWeekday, RuleKind, Weekday,
};
pub use error::{LoadError, ParseError};
pub use eval::Recurrence;
pub use parser::parse_rule;
pub use query::{Agenda, Occurrence, Window};
pub use source::{entries_from_str, Loader, LoaderConfig, RawRecord};

use jiff::civil::Date;

/// The current date in the system time zone.
///
/// Queries never read the clock themselves; resolve "today" once here and
/// pass it along.
pub fn today() -> Date {
    jiff::Zoned::now().date()
}

// --- Entry convenience methods ---

impl Entry {
    /// Build an entry from a name and its date/year tokens.
    pub fn parse(
        name: impl Into<String>,
        date_token: &str,
        year_token: Option<&str>,
    ) -> Result<Self, ParseError> {
        Ok(Entry::new(name, parse_rule(date_token, year_token)?))
    }

    /// Whether `date_token` is a date token this crate understands.
    pub fn validate(date_token: &str) -> bool {
        date_token.parse::<DateRule>().is_ok()
    }

    /// The anniversary in `year` if this is a dated entry.
    pub fn anniversary(&self, year: i16) -> Option<Date> {
        match self.rule() {
            DateRule::FixedDated(r) => r.anniversary(year),
            _ => None,
        }
    }

    /// Years since the original date if this is a dated entry.
    pub fn years_since(&self, date: Date) -> Option<i32> {
        match self.rule() {
            DateRule::FixedDated(r) => Some(r.years_since(date)),
            _ => None,
        }
    }
}
