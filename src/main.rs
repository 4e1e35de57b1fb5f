//! seshat CLI: booking-confirmation emails → iCalendar files.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use seshat::config::{self, DEFAULT_EMAILS_DIR, DEFAULT_ICS_DIR, RunConfig};
use seshat::model::BusyStatus;
use seshat::pipeline;
use seshat::prompt;
use seshat::source;

#[derive(Parser)]
#[command(
    name = "seshat",
    version,
    about = "Convert QA booking-confirmation emails into iCalendar files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract bookings and write one .ics file per booking.
    Convert {
        /// Directory containing the confirmation emails (prompted if omitted).
        #[arg(long)]
        emails_dir: Option<PathBuf>,

        /// Directory to write the .ics files to (prompted if omitted).
        #[arg(long)]
        ics_dir: Option<PathBuf>,

        /// Busy status for all events: FREE, TENTATIVE, BUSY, or OOF
        /// (prompted if omitted).
        #[arg(long)]
        busy_status: Option<BusyStatus>,

        /// Skip the confirmation prompt before writing files.
        #[arg(long)]
        yes: bool,
    },

    /// Extract bookings and print the JSON report without writing files.
    Inspect {
        /// Directory containing the confirmation emails.
        #[arg(long, default_value = DEFAULT_EMAILS_DIR)]
        emails_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            emails_dir,
            ics_dir,
            busy_status,
            yes,
        } => convert(emails_dir, ics_dir, busy_status, yes),
        Commands::Inspect { emails_dir } => inspect(&emails_dir),
    }
}

/// The full interactive flow: resolve directories and busy status, show
/// the extraction report, confirm, then emit calendar files.
fn convert(
    emails_dir: Option<PathBuf>,
    ics_dir: Option<PathBuf>,
    busy_status: Option<BusyStatus>,
    yes: bool,
) -> Result<()> {
    // Input directory: flag (validated) or prompt (re-prompts until valid).
    let emails_dir = match emails_dir {
        Some(dir) => {
            config::require_directory(&dir)?;
            dir
        }
        None => prompt::prompt_existing_directory(
            "Enter the directory where your email files are located (default: ./emails):",
            DEFAULT_EMAILS_DIR,
        )
        .into_diagnostic()?,
    };

    let documents = source::scan_directory(&emails_dir)?;
    if documents.is_empty() {
        println!("No HTML files found in the specified directory.");
        return Ok(());
    }

    let busy_status = match busy_status {
        Some(status) => status,
        None => prompt::prompt_busy_status().into_diagnostic()?,
    };

    let records = pipeline::extract_all(&documents);
    print_report(&records)?;

    let proceed = yes
        || prompt::prompt_confirm(
            "Do you want to create ICS files for the bookings? (default: y)",
            true,
        )
        .into_diagnostic()?;
    if !proceed {
        println!("Exiting without creating ICS files.");
        return Ok(());
    }

    let ics_dir = match ics_dir {
        Some(dir) => dir,
        None => PathBuf::from(
            prompt::prompt_line(
                "Confirm the directory where ICS files will be saved (default: ./ics):",
                DEFAULT_ICS_DIR,
            )
            .into_diagnostic()?,
        ),
    };
    config::ensure_output_directory(&ics_dir)?;

    let run = RunConfig {
        emails_dir,
        ics_dir,
        busy_status,
    };

    let summary = pipeline::write_calendars(&records, &run);
    println!(
        "Done: {} file(s) written, {} booking(s) without dates, {} failure(s).",
        summary.written, summary.skipped_empty, summary.failed
    );

    Ok(())
}

/// Extraction-only mode: print the JSON report, write nothing.
fn inspect(emails_dir: &Path) -> Result<()> {
    config::require_directory(emails_dir)?;

    let documents = source::scan_directory(emails_dir)?;
    if documents.is_empty() {
        println!("No HTML files found in the specified directory.");
        return Ok(());
    }

    let records = pipeline::extract_all(&documents);
    print_report(&records)?;

    Ok(())
}

fn print_report(records: &[seshat::BookingRecord]) -> Result<()> {
    let reports: Vec<_> = records.iter().map(|r| r.report()).collect();
    println!(
        "{}",
        serde_json::to_string_pretty(&reports).into_diagnostic()?
    );
    Ok(())
}
