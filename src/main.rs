// minicalc: compile a source file to three-address code

use std::fmt;
use std::fs;
use std::io;
use std::process::ExitCode;

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use tracing::{info, Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;

use minicalc::compile;
use minicalc::parser::lexer::Lexer;

/// Environment variable selecting the log level
const LOG_ENV: &str = "MINICALC_LOG";

/// Command-line configuration
#[derive(Debug, PartialEq)]
struct Config {
    path: String,
    dump_tokens: bool,
}

#[derive(Debug, PartialEq)]
enum UsageError {
    MissingPath,
    ExtraArgument(String),
    UnknownFlag(String),
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageError::MissingPath => write!(f, "No input file provided"),
            UsageError::ExtraArgument(arg) => write!(f, "Unexpected argument '{}'", arg),
            UsageError::UnknownFlag(flag) => write!(f, "Unknown option '{}'", flag),
        }
    }
}

impl Config {
    fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, UsageError> {
        let mut path = None;
        let mut dump_tokens = false;

        for arg in args {
            if arg == "--tokens" {
                dump_tokens = true;
            } else if arg.starts_with("--") {
                return Err(UsageError::UnknownFlag(arg));
            } else if path.is_some() {
                return Err(UsageError::ExtraArgument(arg));
            } else {
                path = Some(arg);
            }
        }

        let path = path.ok_or(UsageError::MissingPath)?;
        Ok(Config { path, dump_tokens })
    }
}

fn log_level(value: Option<&str>) -> Level {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("error") => Level::ERROR,
        Some("info") => Level::INFO,
        Some("debug") => Level::DEBUG,
        Some("trace") => Level::TRACE,
        _ => Level::WARN,
    }
}

/// Plain-text log lines unless `ansi` is set
fn log_subscriber<W>(level: Level, ansi: bool, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .with_max_level(level)
        .finish()
}

fn report_error(message: impl fmt::Display) {
    if io::stderr().is_tty() {
        eprintln!("{} {}", "Error:".red().bold(), message);
    } else {
        eprintln!("Error: {}", message);
    }
}

fn main() -> ExitCode {
    let level = log_level(std::env::var(LOG_ENV).ok().as_deref());
    let subscriber = log_subscriber(level, io::stderr().is_tty(), io::stderr);
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let mut args = std::env::args();
    let program_name = args.next().unwrap_or_else(|| "minicalc".to_string());

    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            report_error(e);
            eprintln!();
            eprintln!("Usage: {} [--tokens] <input_file>", program_name);
            return ExitCode::from(2);
        }
    };

    let source = match fs::read_to_string(&config.path) {
        Ok(source) => source,
        Err(e) => {
            report_error(format!("{}: {}", config.path, e));
            return ExitCode::FAILURE;
        }
    };
    info!(path = %config.path, bytes = source.len(), "compiling");

    if config.dump_tokens {
        println!("Tokens:");
        match Lexer::new(&source).tokenize() {
            Ok(tokens) => {
                for token in tokens.iter().filter(|t| !t.is_eof()) {
                    println!("{}", token);
                }
            }
            Err(e) => {
                report_error(e);
                return ExitCode::FAILURE;
            }
        }
        println!("--- End of tokens ---");
        println!();
    }

    let compiled = match compile(&source) {
        Ok(compiled) => compiled,
        Err(e) => {
            report_error(e);
            return ExitCode::FAILURE;
        }
    };

    println!("Intermediate Code:");
    for line in compiled.listing() {
        println!("{}", line);
    }

    println!();
    println!("Symbol Table:");
    for symbol in compiled.symbols.iter() {
        println!("{}: {}", symbol.name, symbol);
    }

    ExitCode::SUCCESS
}
