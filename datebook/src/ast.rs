#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A named calendar event governed by one date rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    name: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    source: Option<String>,
    rule: DateRule,
}

impl Entry {
    /// Create an entry with no provenance. `name` is expected to be non-empty.
    pub fn new(name: impl Into<String>, rule: impl Into<DateRule>) -> Self {
        Self {
            name: name.into(),
            source: None,
            rule: rule.into(),
        }
    }

    /// Attach an opaque provenance tag, such as the file the entry came from.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn rule(&self) -> &DateRule {
        &self.rule
    }

    pub fn kind(&self) -> RuleKind {
        self.rule.kind()
    }
}

/// The date rule of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateRule {
    /// `MM/DD`: the same month and day every year.
    FixedAnnual(FixedAnnual),
    /// `MM/DD,YYYY`: something that happened once, remembered yearly.
    FixedDated(FixedDated),
    /// `3MondayJan`: the nth weekday of a month, every year.
    RelativeWeekday(RelativeWeekday),
}

impl DateRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Self::FixedAnnual(_) => RuleKind::FixedAnnual,
            Self::FixedDated(_) => RuleKind::FixedDated,
            Self::RelativeWeekday(_) => RuleKind::RelativeWeekday,
        }
    }

    /// Raw `(month, day)` fields of the fixed-date variants.
    pub fn month_day(&self) -> Option<(u16, u16)> {
        match self {
            Self::FixedAnnual(r) => Some((r.month, r.day)),
            Self::FixedDated(r) => Some((r.month, r.day)),
            Self::RelativeWeekday(_) => None,
        }
    }
}

impl From<FixedAnnual> for DateRule {
    fn from(rule: FixedAnnual) -> Self {
        Self::FixedAnnual(rule)
    }
}

impl From<FixedDated> for DateRule {
    fn from(rule: FixedDated) -> Self {
        Self::FixedDated(rule)
    }
}

impl From<RelativeWeekday> for DateRule {
    fn from(rule: RelativeWeekday) -> Self {
        Self::RelativeWeekday(rule)
    }
}

#[cfg(feature = "serde")]
impl Serialize for DateRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DateRule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Tag identifying which variant a rule is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RuleKind {
    FixedAnnual,
    FixedDated,
    RelativeWeekday,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FixedAnnual => "fixed_annual",
            Self::FixedDated => "fixed_dated",
            Self::RelativeWeekday => "relative_weekday",
        }
    }
}

/// Same month and day every year.
///
/// Neither field is validated. A day past the end of the month rolls over
/// into the next month when a concrete date is built for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedAnnual {
    pub month: u16,
    pub day: u16,
}

impl FixedAnnual {
    pub fn new(month: u16, day: u16) -> Self {
        Self { month, day }
    }
}

/// A one-time event on a specific date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedDated {
    pub month: u16,
    pub day: u16,
    pub year: i16,
}

impl FixedDated {
    pub fn new(month: u16, day: u16, year: i16) -> Self {
        Self { month, day, year }
    }
}

/// The nth `weekday` of `month`, every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelativeWeekday {
    /// 1 for the first, 5 for the fifth. Occurrences a month does not
    /// contain yield no date for that year.
    pub occurrence: u8,
    pub weekday: Weekday,
    pub month: MonthName,
}

impl RelativeWeekday {
    pub fn new(occurrence: u8, weekday: Weekday, month: MonthName) -> Self {
        Self {
            occurrence,
            weekday,
            month,
        }
    }
}

/// Day of the week, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// In the order date tokens are scanned.
    pub const ALL: [Weekday; 7] = [
        Self::Sunday,
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
    ];

    /// English name as it appears in date tokens.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sunday => "Sunday",
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
        }
    }

    /// Sunday=0 through Saturday=6.
    pub fn number(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.get(n as usize).copied()
    }

    pub fn to_jiff(self) -> jiff::civil::Weekday {
        match self {
            Self::Sunday => jiff::civil::Weekday::Sunday,
            Self::Monday => jiff::civil::Weekday::Monday,
            Self::Tuesday => jiff::civil::Weekday::Tuesday,
            Self::Wednesday => jiff::civil::Weekday::Wednesday,
            Self::Thursday => jiff::civil::Weekday::Thursday,
            Self::Friday => jiff::civil::Weekday::Friday,
            Self::Saturday => jiff::civil::Weekday::Saturday,
        }
    }

    pub fn from_jiff(wd: jiff::civil::Weekday) -> Self {
        match wd {
            jiff::civil::Weekday::Sunday => Self::Sunday,
            jiff::civil::Weekday::Monday => Self::Monday,
            jiff::civil::Weekday::Tuesday => Self::Tuesday,
            jiff::civil::Weekday::Wednesday => Self::Wednesday,
            jiff::civil::Weekday::Thursday => Self::Thursday,
            jiff::civil::Weekday::Friday => Self::Friday,
            jiff::civil::Weekday::Saturday => Self::Saturday,
        }
    }
}

/// Month of the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MonthName {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl MonthName {
    pub const ALL: [MonthName; 12] = [
        Self::January,
        Self::February,
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
        Self::August,
        Self::September,
        Self::October,
        Self::November,
        Self::December,
    ];

    /// Three-letter abbreviation as it appears in date tokens.
    pub fn abbrev(self) -> &'static str {
        match self {
            Self::January => "Jan",
            Self::February => "Feb",
            Self::March => "Mar",
            Self::April => "Apr",
            Self::May => "May",
            Self::June => "Jun",
            Self::July => "Jul",
            Self::August => "Aug",
            Self::September => "Sep",
            Self::October => "Oct",
            Self::November => "Nov",
            Self::December => "Dec",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Self::January => 1,
            Self::February => 2,
            Self::March => 3,
            Self::April => 4,
            Self::May => 5,
            Self::June => 6,
            Self::July => 7,
            Self::August => 8,
            Self::September => 9,
            Self::October => 10,
            Self::November => 11,
            Self::December => 12,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        n.checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_numbers_are_sunday_based() {
        for (i, wd) in Weekday::ALL.iter().enumerate() {
            assert_eq!(wd.number() as usize, i);
            assert_eq!(Weekday::from_number(i as u8), Some(*wd));
            assert_eq!(Weekday::from_jiff(wd.to_jiff()), *wd);
        }
        assert_eq!(Weekday::from_number(7), None);
    }

    #[test]
    fn month_numbers() {
        assert_eq!(MonthName::from_number(0), None);
        assert_eq!(MonthName::from_number(1), Some(MonthName::January));
        assert_eq!(MonthName::from_number(12), Some(MonthName::December));
        assert_eq!(MonthName::from_number(13), None);
    }

    #[test]
    fn month_day_only_for_fixed_rules() {
        assert_eq!(DateRule::from(FixedAnnual::new(3, 14)).month_day(), Some((3, 14)));
        assert_eq!(
            DateRule::from(FixedDated::new(8, 19, 1919)).month_day(),
            Some((8, 19))
        );
        let relative = RelativeWeekday::new(3, Weekday::Monday, MonthName::January);
        assert_eq!(DateRule::from(relative).month_day(), None);
    }

    #[test]
    fn entry_accessors() {
        let entry = Entry::new("Pi Day", FixedAnnual::new(3, 14)).with_source("math.csv");
        assert_eq!(entry.name(), "Pi Day");
        assert_eq!(entry.source(), Some("math.csv"));
        assert_eq!(entry.kind(), RuleKind::FixedAnnual);
    }
}
