//! Basic datebook API walkthrough: parse, evaluate, match, display.

use datebook::{DateRule, Entry, Recurrence};
use jiff::civil::date;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse a date token
    let rule: DateRule = "4ThursdayNov".parse()?;
    println!("Parsed: {rule}");

    let thanksgiving = Entry::new("Thanksgiving", rule);

    // Compute the next occurrence
    let from = date(2026, 10, 19);
    println!(
        "Next {} after {from}: {}",
        thanksgiving.name(),
        thanksgiving.next_occurrence(from)
    );

    // Every occurrence over a few years
    println!("\n2026-2030:");
    for d in thanksgiving.occurrences_between(date(2026, 1, 1), date(2030, 12, 31)) {
        println!("  {d}");
    }

    // Check a date
    println!(
        "\n2026-11-26 matches: {}",
        thanksgiving.occurs_on(date(2026, 11, 26))
    );

    // Dated entries remember their year
    let moon = Entry::parse("Moon landing", "07/20", Some("1969"))?;
    println!(
        "{} was {} years ago on its next anniversary ({})",
        moon.name(),
        moon.years_since(moon.next_occurrence(from)).unwrap_or_default(),
        moon.next_occurrence(from)
    );

    // Display roundtrips through parsing
    let roundtripped: DateRule = moon.rule().to_string().parse()?;
    assert_eq!(moon.rule(), &roundtripped);
    println!("\nRoundtrip: {roundtripped}");

    Ok(())
}
