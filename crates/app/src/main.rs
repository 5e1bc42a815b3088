use std::fmt;
use std::io::{self, BufRead, Write};

use services::{Clock, ReviewSession, SessionConfig, SessionError, Trainer};
use storage::repository::Store;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidSigma { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSigma { raw } => write!(f, "invalid --sigma value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--data-dir <dir>] [--glossary <name>]");
    eprintln!("                      [--ordering <policy>] [--sigma <f>] [--translation-first]");
    eprintln!();
    eprintln!("Orderings: alphabetic | random | net-errors | net-errors-weighted");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --data-dir .");
    eprintln!("  --glossary glossario");
    eprintln!("  --ordering random");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TRAINER_DATA_DIR, TRAINER_GLOSSARY, TRAINER_ORDERING");
}

struct Args {
    data_dir: String,
    glossary: String,
    ordering: String,
    sigma: Option<f64>,
    foreign_in_front: bool,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut data_dir = std::env::var("TRAINER_DATA_DIR").unwrap_or_else(|_| ".".into());
        let mut glossary =
            std::env::var("TRAINER_GLOSSARY").unwrap_or_else(|_| "glossario".into());
        let mut ordering = std::env::var("TRAINER_ORDERING").unwrap_or_else(|_| "random".into());
        let mut sigma = None;
        let mut foreign_in_front = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--data-dir" => data_dir = require_value(args, "--data-dir")?,
                "--glossary" => glossary = require_value(args, "--glossary")?,
                "--ordering" => ordering = require_value(args, "--ordering")?,
                "--sigma" => {
                    let value = require_value(args, "--sigma")?;
                    let parsed: f64 = value
                        .parse()
                        .map_err(|_| ArgsError::InvalidSigma { raw: value.clone() })?;
                    sigma = Some(parsed);
                }
                "--translation-first" => foreign_in_front = false,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            data_dir,
            glossary,
            ordering,
            sigma,
            foreign_in_front,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_card(session: &ReviewSession) {
    let (Some(front), Some(state)) = (session.current_front(), session.cursor()) else {
        return;
    };
    println!();
    println!(
        "[{} / {}]  ({}/{})",
        state.section,
        state.subsection,
        session.position() + 1,
        session.len()
    );
    println!("  {front}");
}

/// Drive the session over stdin until the deck runs out or the user quits.
///
/// Empty line or `r` reveals, `o` records a correct answer, `e` a wrong one,
/// `q` quits.
fn run_review_loop(session: &mut ReviewSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = String::new();

    print_card(session);
    loop {
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "" | "r" => match session.reveal() {
                Ok(back) => println!("  = {back}"),
                Err(SessionError::AlreadyRevealed) => {
                    println!("(already shown; answer with o or e)");
                }
                Err(_) => break,
            },
            cmd @ ("o" | "e") => match session.feedback(cmd == "e") {
                Ok(_) => print_card(session),
                Err(SessionError::NotRevealed) => {
                    println!("(reveal first: press enter)");
                }
                Err(SessionError::ExhaustedDeck) => {
                    println!("Deck finished.");
                    break;
                }
                Err(_) => break,
            },
            "q" => break,
            other => {
                println!("(unknown command '{other}'; enter = reveal, o = ok, e = error, q = quit)");
            }
        }
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Name and ordering validation happens here, before any file access.
    let config = SessionConfig::from_names(
        &args.glossary,
        &args.ordering,
        args.sigma,
        args.foreign_in_front,
    )?;

    let store = Store::csv(&args.data_dir);
    let trainer = Trainer::from_store(Clock::default_clock(), &store);

    let mut session = trainer.start_session(&config)?;
    run_review_loop(&mut session)?;

    let answered = session.answered();
    let ok = session.ok_count();
    let missed = session.miss_count();
    let saved = trainer.finish_session(&config, session)?;

    println!();
    println!("Answered {answered} ({ok} ok, {missed} missed); {saved} words in history.");
    println!("Ci vediamo dopo!");
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
