//! booklend Binary
//!
//! Starts the interactive console for one patron.

use std::io;

use booklend::shell::{ask_patron, Answer, Prompter, Session};
use booklend::{Config, Library, Patron};
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

/// booklend console
#[derive(Parser, Debug)]
#[command(name = "booklend")]
#[command(about = "Track a small library's books and loans")]
#[command(version)]
struct Args {
    /// Data directory holding books.json and loans.json
    #[arg(short, long, default_value = "./booklend_data")]
    data_dir: String,

    /// Patron name (asked for interactively when omitted)
    #[arg(short, long)]
    patron: Option<String>,

    /// Maximum concurrent loans per patron
    #[arg(long, default_value = "3")]
    max_books: usize,

    /// Maximum loan duration in months
    #[arg(long, default_value = "2")]
    max_months: u32,
}

fn main() {
    // Logs go to stderr so they stay out of the console tables
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("booklend v{}", booklend::VERSION);
    tracing::info!("Data directory: {}", args.data_dir);

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .max_books(args.max_books)
        .max_months(args.max_months)
        .build();

    // A malformed store is fatal
    let library = match Library::open(config) {
        Ok(library) => library,
        Err(e) => {
            tracing::error!("Failed to open library: {}", e);
            eprintln!("booklend: {e}");
            std::process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let patron = match args.patron {
        Some(name) => library.find_patron(&name),
        None => match ask_patron(&library, &mut prompter) {
            Ok(Answer::Value(patron)) => patron,
            Ok(Answer::Cancelled) => return,
            Err(e) => fail(e),
        },
    };

    run(library, patron, prompter);
}

fn run<R: io::BufRead, W: io::Write>(library: Library, patron: Patron, prompter: Prompter<R, W>) {
    tracing::info!(patron = %patron.name, "session started");

    let mut session = Session::new(library, patron, prompter);
    if let Err(e) = session.run() {
        fail(e);
    }

    tracing::info!("session ended");
}

fn fail(e: booklend::LibraryError) -> ! {
    tracing::error!("Session error: {}", e);
    eprintln!("booklend: {e}");
    std::process::exit(1);
}
