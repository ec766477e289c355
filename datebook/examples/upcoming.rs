//! List what is coming up from a directory of record files.
//!
//! ```text
//! cargo run --example upcoming -- ./calendars 14
//! RUST_LOG=datebook=debug cargo run --example upcoming -- ./calendars
//! ```

use std::path::PathBuf;

use datebook::{Agenda, Loader, LoaderConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // `RUST_LOG` overrides the default filter if set.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("datebook=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = std::env::args().skip(1);
    let root = PathBuf::from(args.next().unwrap_or_else(|| ".".to_string()));
    let days: u32 = match args.next() {
        Some(n) => n.parse()?,
        None => 7,
    };

    let loader = Loader::new(LoaderConfig::default());
    let agenda = Agenda::new(loader.load_dir(&root)?);
    let today = datebook::today();

    // Upcoming occurrences are strictly after today, so list today separately.
    for entry in agenda.on_date(today) {
        println!("* {today}  {}", entry.name());
    }

    let upcoming = agenda.in_next_days(today, days);
    if upcoming.is_empty() {
        eprintln!("nothing in the next {days} days");
        return Ok(());
    }

    for occ in &upcoming {
        match occ.entry.years_since(occ.date) {
            Some(years) => println!("  {}  {} ({years})", occ.date, occ.entry.name()),
            None => println!("  {}  {}", occ.date, occ.entry.name()),
        }
    }
    Ok(())
}
