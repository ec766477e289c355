//! Queries over collections of entries.
//!
//! Every function here takes the reference date explicitly. Callers that want
//! "now" resolve it once with [`today`](crate::today) and pass it in.

use jiff::civil::Date;
use jiff::Span;

use crate::ast::{Entry, RuleKind};
use crate::eval::{civil_date, Recurrence};

/// One entry tied to one of its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub entry: &'a Entry,
    pub date: Date,
}

#[cfg(feature = "serde")]
impl serde::Serialize for Occurrence<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", self.entry.name())?;
        map.serialize_entry("date", &self.date)?;
        map.serialize_entry("source", &self.entry.source())?;
        map.end()
    }
}

/// How far ahead of the reference date a window reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Window {
    Days(u32),
    Weeks(u32),
    /// Calendar months. The day of month is kept and rolls over when the
    /// target month is shorter: Jan 31 + 1 month is Mar 3 in a common year.
    Months(u32),
    /// Calendar years. Feb 29 + 1 year is Mar 1.
    Years(u32),
}

impl Window {
    /// Last day (inclusive) of the window starting at `from`.
    ///
    /// Saturates at [`Date::MAX`].
    pub fn end_from(self, from: Date) -> Date {
        let end = match self {
            Window::Days(n) => add_days(from, i64::from(n)),
            Window::Weeks(n) => add_days(from, i64::from(n) * 7),
            Window::Months(n) => i32::try_from(n).ok().and_then(|n| {
                civil_date(
                    from.year().into(),
                    i32::from(from.month()).checked_add(n)?,
                    from.day().into(),
                )
            }),
            Window::Years(n) => i32::try_from(n).ok().and_then(|n| {
                civil_date(
                    i32::from(from.year()).checked_add(n)?,
                    from.month().into(),
                    from.day().into(),
                )
            }),
        };
        end.unwrap_or(Date::MAX)
    }
}

fn add_days(from: Date, days: i64) -> Option<Date> {
    let span = Span::new().try_days(days).ok()?;
    from.checked_add(span).ok()
}

/// Entries whose next occurrence after `from` falls within `[from, end]`,
/// sorted by date. Ties keep input order.
pub fn entries_until<'a, I>(entries: I, from: Date, end: Date) -> Vec<Occurrence<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut hits: Vec<Occurrence<'a>> = entries
        .into_iter()
        .map(|entry| Occurrence {
            entry,
            date: entry.next_occurrence(from),
        })
        .filter(|occ| from <= occ.date && occ.date <= end)
        .collect();
    hits.sort_by_key(|occ| occ.date);
    hits
}

/// Entries coming up within `window` of `from`, sorted by date.
pub fn entries_within<'a, I>(entries: I, from: Date, window: Window) -> Vec<Occurrence<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries_until(entries, from, window.end_from(from))
}

pub fn entries_in_next_days<'a, I>(entries: I, from: Date, days: u32) -> Vec<Occurrence<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries_within(entries, from, Window::Days(days))
}

pub fn entries_in_next_weeks<'a, I>(entries: I, from: Date, weeks: u32) -> Vec<Occurrence<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries_within(entries, from, Window::Weeks(weeks))
}

pub fn entries_in_next_months<'a, I>(entries: I, from: Date, months: u32) -> Vec<Occurrence<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries_within(entries, from, Window::Months(months))
}

pub fn entries_in_next_years<'a, I>(entries: I, from: Date, years: u32) -> Vec<Occurrence<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries_within(entries, from, Window::Years(years))
}

/// Entries that occur on `date`.
pub fn entries_on_date<'a, I>(entries: I, date: Date) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.occurs_on(date))
        .collect()
}

/// Fixed-date entries whose raw month and day fields equal `month`/`day`.
///
/// Relative-weekday entries never match, even in a year where their date
/// happens to land on `month`/`day`.
pub fn entries_on_month_day<'a, I>(entries: I, month: u16, day: u16) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.rule().month_day() == Some((month, day)))
        .collect()
}

pub fn entries_by_kind<'a, I>(entries: I, kind: RuleKind) -> Vec<&'a Entry>
where
    I: IntoIterator<Item = &'a Entry>,
{
    entries
        .into_iter()
        .filter(|entry| entry.kind() == kind)
        .collect()
}

/// Every occurrence of every entry within `[start, end]`, sorted by date.
/// Ties keep input order.
pub fn occurrences_between<'a, I>(entries: I, start: Date, end: Date) -> Vec<Occurrence<'a>>
where
    I: IntoIterator<Item = &'a Entry>,
{
    let mut all: Vec<Occurrence<'a>> = entries
        .into_iter()
        .flat_map(|entry| {
            entry
                .occurrences_between(start, end)
                .into_iter()
                .map(move |date| Occurrence { entry, date })
        })
        .collect();
    all.sort_by_key(|occ| occ.date);
    all
}

/// An owned collection of entries with the query layer as methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agenda {
    entries: Vec<Entry>,
}

impl Agenda {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    pub fn within(&self, from: Date, window: Window) -> Vec<Occurrence<'_>> {
        entries_within(&self.entries, from, window)
    }

    pub fn in_next_days(&self, from: Date, days: u32) -> Vec<Occurrence<'_>> {
        self.within(from, Window::Days(days))
    }

    pub fn in_next_weeks(&self, from: Date, weeks: u32) -> Vec<Occurrence<'_>> {
        self.within(from, Window::Weeks(weeks))
    }

    pub fn in_next_months(&self, from: Date, months: u32) -> Vec<Occurrence<'_>> {
        self.within(from, Window::Months(months))
    }

    pub fn in_next_years(&self, from: Date, years: u32) -> Vec<Occurrence<'_>> {
        self.within(from, Window::Years(years))
    }

    pub fn on_date(&self, date: Date) -> Vec<&Entry> {
        entries_on_date(&self.entries, date)
    }

    pub fn on_month_day(&self, month: u16, day: u16) -> Vec<&Entry> {
        entries_on_month_day(&self.entries, month, day)
    }

    pub fn by_kind(&self, kind: RuleKind) -> Vec<&Entry> {
        entries_by_kind(&self.entries, kind)
    }

    pub fn between(&self, start: Date, end: Date) -> Vec<Occurrence<'_>> {
        occurrences_between(&self.entries, start, end)
    }
}

impl FromIterator<Entry> for Agenda {
    fn from_iter<T: IntoIterator<Item = Entry>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl Extend<Entry> for Agenda {
    fn extend<T: IntoIterator<Item = Entry>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::*;
    use jiff::civil::date;

    fn sample() -> Vec<Entry> {
        vec![
            Entry::new("New Year", FixedAnnual::new(1, 1)),
            Entry::new("Pi Day", FixedAnnual::new(3, 14)),
            Entry::new("Bicycle Day", FixedDated::new(4, 19, 1943)),
            Entry::new(
                "MLK Day",
                RelativeWeekday::new(3, Weekday::Monday, MonthName::January),
            ),
            Entry::new("Halloween", FixedAnnual::new(10, 31)),
            Entry::new(
                "Thanksgiving",
                RelativeWeekday::new(4, Weekday::Thursday, MonthName::November),
            ),
        ]
    }

    fn names<'a>(hits: impl IntoIterator<Item = &'a Entry>) -> Vec<&'a str> {
        hits.into_iter().map(Entry::name).collect()
    }

    #[test]
    fn window_ends() {
        let from = date(2026, 1, 31);
        assert_eq!(Window::Days(10).end_from(from), date(2026, 2, 10));
        assert_eq!(Window::Weeks(2).end_from(from), date(2026, 2, 14));
        assert_eq!(Window::Months(1).end_from(from), date(2026, 3, 3));
        assert_eq!(Window::Months(12).end_from(from), date(2027, 1, 31));
        assert_eq!(Window::Years(1).end_from(from), date(2027, 1, 31));
        assert_eq!(Window::Years(1).end_from(date(2024, 2, 29)), date(2025, 3, 1));
        assert_eq!(Window::Days(0).end_from(from), from);
    }

    #[test]
    fn window_saturates() {
        let from = date(9999, 6, 1);
        assert_eq!(Window::Years(5).end_from(from), Date::MAX);
        assert_eq!(Window::Days(u32::MAX).end_from(from), Date::MAX);
        assert_eq!(Window::Months(u32::MAX).end_from(from), Date::MAX);
    }

    #[test]
    fn next_days_sorted_and_bounded() {
        let entries = sample();
        let from = date(2026, 10, 19);
        let hits = entries_in_next_days(&entries, from, 45);
        let got: Vec<_> = hits.iter().map(|o| (o.entry.name(), o.date)).collect();
        assert_eq!(
            got,
            vec![
                ("Halloween", date(2026, 10, 31)),
                ("Thanksgiving", date(2026, 11, 26)),
            ]
        );
    }

    #[test]
    fn window_end_is_inclusive() {
        let entries = sample();
        let hits = entries_in_next_days(&entries, date(2026, 10, 19), 12);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].date, date(2026, 10, 31));
        assert!(entries_in_next_days(&entries, date(2026, 10, 19), 11).is_empty());
    }

    #[test]
    fn next_months_crosses_year() {
        let entries = sample();
        let hits = entries_in_next_months(&entries, date(2026, 12, 1), 4);
        let got: Vec<_> = hits.iter().map(|o| o.entry.name()).collect();
        assert_eq!(got, vec!["New Year", "MLK Day", "Pi Day"]);
    }

    #[test]
    fn next_years_includes_everything_once() {
        let entries = sample();
        let hits = entries_in_next_years(&entries, date(2026, 10, 19), 1);
        assert_eq!(hits.len(), entries.len());
        assert!(hits.windows(2).all(|w| w[0].date <= w[1].date));
        // anniversaries count for dated entries
        let bike = hits.iter().find(|o| o.entry.name() == "Bicycle Day").unwrap();
        assert_eq!(bike.date, date(2027, 4, 19));
    }

    #[test]
    fn next_weeks() {
        let entries = sample();
        let hits = entries_in_next_weeks(&entries, date(2026, 10, 19), 6);
        assert_eq!(names(hits.iter().map(|o| o.entry)), vec!["Halloween", "Thanksgiving"]);
    }

    #[test]
    fn ties_keep_input_order() {
        let entries = vec![
            Entry::new("b", FixedAnnual::new(5, 1)),
            Entry::new("a", FixedAnnual::new(5, 1)),
            Entry::new("c", FixedDated::new(5, 1, 1886)),
        ];
        let hits = entries_in_next_days(&entries, date(2026, 4, 30), 1);
        assert_eq!(names(hits.iter().map(|o| o.entry)), vec!["b", "a", "c"]);
    }

    #[test]
    fn on_date_uses_occurs_on() {
        let entries = sample();
        assert_eq!(
            names(entries_on_date(&entries, date(2026, 1, 19))),
            vec!["MLK Day"]
        );
        assert_eq!(
            names(entries_on_date(&entries, date(1943, 4, 19))),
            vec!["Bicycle Day"]
        );
        assert!(entries_on_date(&entries, date(2026, 4, 19)).is_empty());
    }

    #[test]
    fn on_month_day_excludes_relative() {
        let entries = sample();
        // MLK Day lands on Jan 19 in 2026, but has no fixed day
        assert!(entries_on_month_day(&entries, 1, 19).is_empty());
        assert_eq!(
            names(entries_on_month_day(&entries, 4, 19)),
            vec!["Bicycle Day"]
        );
        assert_eq!(names(entries_on_month_day(&entries, 1, 1)), vec!["New Year"]);
    }

    #[test]
    fn by_kind() {
        let entries = sample();
        assert_eq!(
            names(entries_by_kind(&entries, RuleKind::RelativeWeekday)),
            vec!["MLK Day", "Thanksgiving"]
        );
        assert_eq!(
            names(entries_by_kind(&entries, RuleKind::FixedDated)),
            vec!["Bicycle Day"]
        );
        assert_eq!(entries_by_kind(&entries, RuleKind::FixedAnnual).len(), 3);
    }

    #[test]
    fn between_collects_all_years() {
        let entries = sample();
        let hits = occurrences_between(&entries, date(2025, 12, 1), date(2027, 1, 31));
        let got: Vec<_> = hits.iter().map(|o| (o.entry.name(), o.date)).collect();
        assert_eq!(
            got,
            vec![
                ("New Year", date(2026, 1, 1)),
                ("MLK Day", date(2026, 1, 19)),
                ("Pi Day", date(2026, 3, 14)),
                ("Halloween", date(2026, 10, 31)),
                ("Thanksgiving", date(2026, 11, 26)),
                ("New Year", date(2027, 1, 1)),
                ("MLK Day", date(2027, 1, 18)),
            ]
        );
    }

    #[test]
    fn agenda_delegates() {
        let mut agenda: Agenda = sample().into_iter().collect();
        agenda.push(Entry::new("Leap", FixedAnnual::new(2, 29)));
        assert_eq!(agenda.len(), 7);
        assert_eq!(agenda.on_month_day(2, 29).len(), 1);
        assert_eq!(agenda.by_kind(RuleKind::FixedAnnual).len(), 4);
        assert_eq!(agenda.in_next_days(date(2028, 2, 28), 1)[0].date, date(2028, 2, 29));
        assert_eq!(agenda.on_date(date(2026, 3, 14)).len(), 1);
        assert!(!agenda.between(date(2026, 1, 1), date(2026, 12, 31)).is_empty());
    }
}
