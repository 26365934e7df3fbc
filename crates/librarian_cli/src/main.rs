//! Demonstration entry point.
//!
//! # Responsibility
//! - Bootstrap logging from the environment.
//! - Run the fixed catalog scenario and print every reported event.

mod config;

use config::CliConfig;
use librarian_core::{Book, Catalog, ConsoleReporter, LendOutcome, Reader, ReaderId};
use log::info;

const DEMO_TITLE: &str = "The Art of War";
const DEMO_READER_ID: ReaderId = 1;

fn main() {
    let config = CliConfig::from_env();
    if let Some(settings) = config.log_settings() {
        if let Err(err) = settings.and_then(|settings| librarian_core::init_logging(&settings)) {
            eprintln!("logging disabled: {err}");
        }
    }
    info!(
        "event=demo_start module=cli status=ok version={}",
        librarian_core::core_version()
    );

    let mut catalog = Catalog::new().with_reporter(ConsoleReporter);

    catalog.add_book(Book::new(DEMO_TITLE, "Sun Tzu", "BK001"));
    catalog.add_book(Book::new("Meditations", "Marcus Aurelius", "BK002"));

    catalog.add_reader(Reader::new(1, "Ivan Ivanov", "ivanov@example.com"));
    catalog.add_reader(Reader::new(2, "Maria Petrova", "petrova@example.com"));

    println!("{}", catalog.display_books());
    println!("{}", catalog.display_readers());

    if let LendOutcome::Created(loan) = catalog.lend_book(DEMO_TITLE, DEMO_READER_ID) {
        println!("{}", catalog.loan_details(&loan));
    }

    println!("{}", catalog.display_books());
    info!("event=demo_finish module=cli status=ok");
}
