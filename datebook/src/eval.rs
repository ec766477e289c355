use jiff::civil::Date;
use jiff::Span;

use crate::ast::*;

/// Occurrence queries shared by every rule variant.
///
/// All methods are pure: the same inputs always give the same dates.
pub trait Recurrence {
    /// The next occurrence after `from`.
    ///
    /// Strictly after `from` for any real month/day. A day of 0 builds the
    /// last day of the previous month, so next year's date can land on `from`
    /// itself (`01/00` from Dec 31).
    fn next_occurrence(&self, from: Date) -> Date;

    /// Whether `date` is an occurrence.
    fn occurs_on(&self, date: Date) -> bool;

    /// Every occurrence in `[start, end]`, ascending.
    fn occurrences_between(&self, start: Date, end: Date) -> Vec<Date>;
}

/// Build a date from possibly out-of-range parts.
///
/// Months past December roll into the following years, and days past the end
/// of the month roll into the following months: `(2025, 2, 30)` is
/// 2025-03-02 and `(2026, 1, 0)` is 2025-12-31. Returns `None` only when the
/// result is outside the range jiff supports.
pub fn civil_date(year: i32, month: i32, day: i32) -> Option<Date> {
    let months = i64::from(year) * 12 + i64::from(month) - 1;
    let year = i16::try_from(months.div_euclid(12)).ok()?;
    let month = (months.rem_euclid(12) + 1) as i8;
    let first = Date::new(year, month, 1).ok()?;
    let offset = Span::new().try_days(i64::from(day) - 1).ok()?;
    first.checked_add(offset).ok()
}

fn in_range(date: Date, start: Date, end: Date) -> bool {
    start <= date && date <= end
}

/// Same month/day this year if still ahead of `from`, otherwise next year.
fn next_anniversary(month: u16, day: u16, from: Date) -> Date {
    let year = i32::from(from.year());
    match civil_date(year, month.into(), day.into()) {
        Some(date) if date > from => date,
        _ => civil_date(year + 1, month.into(), day.into()).unwrap_or(Date::MAX),
    }
}

impl Recurrence for FixedAnnual {
    fn next_occurrence(&self, from: Date) -> Date {
        next_anniversary(self.month, self.day, from)
    }

    fn occurs_on(&self, date: Date) -> bool {
        i32::from(date.month()) == i32::from(self.month)
            && i32::from(date.day()) == i32::from(self.day)
    }

    fn occurrences_between(&self, start: Date, end: Date) -> Vec<Date> {
        (start.year()..=end.year())
            .filter_map(|year| civil_date(year.into(), self.month.into(), self.day.into()))
            .filter(|date| in_range(*date, start, end))
            .collect()
    }
}

impl FixedDated {
    /// The original date, if it is representable.
    pub fn date(&self) -> Option<Date> {
        self.anniversary(self.year)
    }

    /// The same month/day in `year`. No check against the original year.
    ///
    /// `None` only when the result is outside jiff's supported range.
    pub fn anniversary(&self, year: i16) -> Option<Date> {
        civil_date(year.into(), self.month.into(), self.day.into())
    }

    /// Whole calendar years from the original year to `date`'s year.
    /// Negative when `date` comes first.
    pub fn years_since(&self, date: Date) -> i32 {
        i32::from(date.year()) - i32::from(self.year)
    }
}

impl Recurrence for FixedDated {
    /// The next anniversary; the stored year plays no part.
    fn next_occurrence(&self, from: Date) -> Date {
        next_anniversary(self.month, self.day, from)
    }

    /// Only the original date matches, not its anniversaries.
    fn occurs_on(&self, date: Date) -> bool {
        date.year() == self.year
            && i32::from(date.month()) == i32::from(self.month)
            && i32::from(date.day()) == i32::from(self.day)
    }

    fn occurrences_between(&self, start: Date, end: Date) -> Vec<Date> {
        self.date()
            .filter(|date| in_range(*date, start, end))
            .into_iter()
            .collect()
    }
}

/// Day of month (1-based, possibly past the month's end) of the nth `weekday`
/// in the month starting at `first`.
fn expected_day(first: Date, weekday: Weekday, occurrence: u8) -> i32 {
    let first_weekday = i32::from(Weekday::from_jiff(first.weekday()).number());
    let offset = (i32::from(weekday.number()) - first_weekday + 7) % 7;
    1 + offset + (i32::from(occurrence) - 1) * 7
}

/// Get the nth weekday of a month (1-indexed). Returns None if it doesn't exist.
pub fn nth_weekday_of_month(
    year: i16,
    month: MonthName,
    weekday: Weekday,
    occurrence: u8,
) -> Option<Date> {
    let first = Date::new(year, month.number() as i8, 1).ok()?;
    let day = expected_day(first, weekday, occurrence);
    let date = civil_date(year.into(), month.number().into(), day)?;
    // Overflowed into a neighbouring month: no such occurrence this year.
    (date.year() == year && date.month() == first.month()).then_some(date)
}

impl RelativeWeekday {
    /// This rule's date in `year`, if the month has that many of the weekday.
    pub fn in_year(&self, year: i16) -> Option<Date> {
        nth_weekday_of_month(year, self.month, self.weekday, self.occurrence)
    }
}

impl Recurrence for RelativeWeekday {
    /// Falls back to [`Date::MAX`] when neither this year nor next has the
    /// occurrence (a fifth weekday that is missing two years running).
    fn next_occurrence(&self, from: Date) -> Date {
        if let Some(date) = self.in_year(from.year()).filter(|date| *date > from) {
            return date;
        }
        from.year()
            .checked_add(1)
            .and_then(|year| self.in_year(year))
            .unwrap_or(Date::MAX)
    }

    fn occurs_on(&self, date: Date) -> bool {
        i16::from(date.month()) == i16::from(self.month.number())
            && date.weekday() == self.weekday.to_jiff()
            && i32::from(date.day())
                == expected_day(date.first_of_month(), self.weekday, self.occurrence)
    }

    fn occurrences_between(&self, start: Date, end: Date) -> Vec<Date> {
        (start.year()..=end.year())
            .filter_map(|year| self.in_year(year))
            .filter(|date| in_range(*date, start, end))
            .collect()
    }
}

impl Recurrence for DateRule {
    fn next_occurrence(&self, from: Date) -> Date {
        match self {
            DateRule::FixedAnnual(r) => r.next_occurrence(from),
            DateRule::FixedDated(r) => r.next_occurrence(from),
            DateRule::RelativeWeekday(r) => r.next_occurrence(from),
        }
    }

    fn occurs_on(&self, date: Date) -> bool {
        match self {
            DateRule::FixedAnnual(r) => r.occurs_on(date),
            DateRule::FixedDated(r) => r.occurs_on(date),
            DateRule::RelativeWeekday(r) => r.occurs_on(date),
        }
    }

    fn occurrences_between(&self, start: Date, end: Date) -> Vec<Date> {
        match self {
            DateRule::FixedAnnual(r) => r.occurrences_between(start, end),
            DateRule::FixedDated(r) => r.occurrences_between(start, end),
            DateRule::RelativeWeekday(r) => r.occurrences_between(start, end),
        }
    }
}

impl Recurrence for Entry {
    fn next_occurrence(&self, from: Date) -> Date {
        self.rule().next_occurrence(from)
    }

    fn occurs_on(&self, date: Date) -> bool {
        self.rule().occurs_on(date)
    }

    fn occurrences_between(&self, start: Date, end: Date) -> Vec<Date> {
        self.rule().occurrences_between(start, end)
    }
}
