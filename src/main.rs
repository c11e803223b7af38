use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    rc::Rc,
};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use library_catalog::{
    ActivityLog, Book, BookCursor, Catalog, CatalogEvent, CatalogObserver, User,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the catalog console
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the patron checking books in and out
    #[arg(short, long, default_value = "Johnny")]
    user: String,

    /// Print the genre listing as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long)]
    verbose: bool,

    /// Print the catalog activity log before exiting
    #[arg(long)]
    history: bool,
}

/// Prints a notification for checkouts and returns
#[derive(Debug)]
struct ConsoleNotifier;

impl CatalogObserver for ConsoleNotifier {
    fn on_event(&self, event: &CatalogEvent) {
        match event {
            CatalogEvent::CheckedOut { .. } => {
                println!("{}", format!("NOTIFICATION: {} has been checked out!", event.title()).green());
            }
            CatalogEvent::CheckoutRefused { .. } => {
                println!("{}", format!("{} is not available", event.title()).yellow());
            }
            CatalogEvent::Returned { .. } => {
                println!("{}", format!("NOTIFICATION: {} has been returned!", event.title()).green());
            }
            CatalogEvent::BookAdded { .. } | CatalogEvent::ReturnMissed { .. } => {}
        }
    }
}

/// Install the stderr log subscriber
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

/// Stock the catalog with the sample collection
fn seed_catalog(catalog: &mut Catalog) {
    catalog.add_book(Book::new("La La Land", "Oscars", "movies"));
    catalog.add_book(Book::new("Moonlight", "Unknown", "movies"));
    catalog.add_book(Book::new("Murder on the Orient Express", "Agatha Christie", "mystery"));
}

/// Print a prompt and read one trimmed line, `None` at end of input
fn prompt(input: &mut impl BufRead, out: &mut impl Write, label: &str) -> Result<Option<String>> {
    write!(out, "{label}").context("failed to write prompt")?;
    out.flush().context("failed to flush output")?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask for a title and then a genre
fn prompt_book(input: &mut impl BufRead, out: &mut impl Write) -> Result<Option<(String, String)>> {
    let Some(title) = prompt(input, out, "Enter title: ")? else {
        return Ok(None);
    };
    let Some(genre) = prompt(input, out, "Enter genre: ")? else {
        return Ok(None);
    };
    Ok(Some((title, genre)))
}

/// Print the available books of a genre
fn list_genre(out: &mut impl Write, catalog: &Catalog, genre: &str, json: bool) -> Result<()> {
    if json {
        let books: Vec<&Book> = catalog.genre_iterator(genre).collect();
        let rendered = serde_json::to_string_pretty(&books).context("failed to render listing")?;
        writeln!(out, "{rendered}")?;
        return Ok(());
    }

    let mut books = catalog.genre_iterator(genre);
    if !books.has_next() {
        writeln!(out, "{}", format!("No available books in {genre}").yellow())?;
    }
    while books.has_next() {
        let book = books.get_next()?;
        writeln!(out, "{book}")?;
    }
    Ok(())
}

/// Print a book's description and availability after an operation
fn show_availability(out: &mut impl Write, catalog: &Catalog, genre: &str, title: &str) -> Result<()> {
    match catalog.search_collection(genre, title) {
        Some(book) => writeln!(out, "{book} availability: {}", book.is_available())?,
        None => writeln!(out, "{}", "Book is not found.".yellow())?,
    }
    Ok(())
}

/// Run one list / checkout / return round against the catalog
///
/// Running out of input at any prompt ends the round without an error.
fn run_session(
    input: &mut impl BufRead,
    out: &mut impl Write,
    catalog: &RefCell<Catalog>,
    user: &User,
    json: bool,
) -> Result<()> {
    let Some(genre) = prompt(input, out, "Enter genre: ")? else {
        return Ok(());
    };
    list_genre(out, &catalog.borrow(), &genre, json)?;

    writeln!(out, "{}", "Checkout Book:".bold())?;
    let Some((title, genre)) = prompt_book(input, out)? else {
        return Ok(());
    };
    match user.checkout_book(&genre, &title) {
        Ok(report) => info!(user = user.name(), ?report, "checkout finished"),
        Err(notice) => writeln!(out, "{}", notice.to_string().red())?,
    }
    show_availability(out, &catalog.borrow(), &genre, &title)?;

    writeln!(out, "{}", "Return Book:".bold())?;
    let Some((title, genre)) = prompt_book(input, out)? else {
        return Ok(());
    };
    if let Some(notice) = user.return_book(&genre, &title) {
        writeln!(out, "{}", notice.to_string().red())?;
    }
    show_availability(out, &catalog.borrow(), &genre, &title)?;
    Ok(())
}

/// Print every recorded catalog event
fn print_history(log: &ActivityLog) {
    println!("\n{}", "Catalog Activity:".bold());
    for (number, event) in (1..).zip(log.entries()) {
        println!("{number}. {event:?}");
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let log = ActivityLog::new();
    let catalog = Rc::new(RefCell::new(Catalog::new()));
    {
        let mut catalog = catalog.borrow_mut();
        catalog.register_observer(Box::new(log.clone()));
        catalog.register_observer(Box::new(ConsoleNotifier));
        seed_catalog(&mut catalog);
    }

    println!("{}", "Library Catalog".green().bold());
    println!("Genres: {}", catalog.borrow().genres().join(", "));

    let user = User::new(&args.user, Rc::clone(&catalog));
    info!(user = user.name(), "session started");

    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();
    run_session(&mut input, &mut out, &catalog, &user, args.json)?;

    if args.history {
        print_history(&log);
    }
    Ok(())
}
