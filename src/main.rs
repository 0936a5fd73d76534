use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use minute_math::prompt::{Prompter, Target};
use minute_math::{
    read_names, run_batch, run_single, BatchReport, PdfDirectory, Settings, StudentOutcome,
    StudentReport, WorksheetConfig,
};

/// Generate printable arithmetic worksheets as PDF files.
#[derive(Debug, Parser)]
#[command(name = "minute-math", version, about)]
struct Cli {
    /// Lowest number drawn.
    #[arg(long, allow_hyphen_values = true)]
    low: Option<i32>,

    /// Highest number drawn.
    #[arg(long, allow_hyphen_values = true)]
    high: Option<i32>,

    /// addition, subtraction, multiplication or division (any case).
    #[arg(long, short)]
    operation: Option<String>,

    /// Number of problems per worksheet.
    #[arg(long, short = 'n')]
    count: Option<usize>,

    /// Pin one operand (multiplication) or the divisor (division).
    #[arg(long, allow_hyphen_values = true)]
    fixed_factor: Option<i32>,

    /// Student name for a single worksheet.
    #[arg(long, short, conflicts_with = "names")]
    student: Option<String>,

    /// Newline-delimited student list; one worksheet per name.
    #[arg(long)]
    names: Option<PathBuf>,

    /// Directory for the generated PDFs.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Settings file (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible problem sets.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the run report as JSON.
    #[arg(long)]
    json: bool,

    /// Ask for everything on the terminal.
    #[arg(long, short)]
    interactive: bool,
}

fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), default_level))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<BatchReport> {
    let mut settings = Settings::load(cli.config.as_deref()).context("loading settings")?;
    if let Some(dir) = &cli.output_dir {
        settings.output_dir = dir.clone();
    }
    init_tracing(&settings.log_level);
    debug!(?settings, "settings loaded");
    info!("minute-math v{}", env!("CARGO_PKG_VERSION"));

    let flags = (cli.low, cli.high, cli.operation.as_deref());
    let (config, target) = match flags {
        (Some(low), Some(high), Some(operation)) if !cli.interactive => {
            let config = WorksheetConfig::new(
                low,
                high,
                operation,
                cli.count.unwrap_or(settings.default_problem_count),
                cli.fixed_factor,
            )?;
            let target = match &cli.names {
                Some(path) => Target::Batch { names_path: path.clone(), names: read_names(path)? },
                None => Target::Single { student: cli.student.clone() },
            };
            (config, target)
        }
        _ => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            let answers = prompter.ask_run(cli.count.unwrap_or(settings.default_problem_count))?;
            (answers.config, answers.target)
        }
    };

    std::fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("creating {}", settings.output_dir.display()))?;
    let options = settings.batch_options(cli.seed);
    let mut sink = PdfDirectory::new(&settings.output_dir);

    let report = match target {
        Target::Batch { names_path, names } => {
            info!(list = %names_path.display(), "batch mode");
            run_batch(&config, &names, &options, &mut sink)?
        }
        Target::Single { student } => {
            let path = run_single(&config, student.as_deref(), &options, &mut sink)?;
            BatchReport {
                operation: Some(config.operation),
                students: vec![StudentReport {
                    student: student.unwrap_or_default(),
                    outcome: StudentOutcome::Created { path },
                }],
            }
        }
    };
    Ok(report)
}

fn print_report(report: &BatchReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    for entry in &report.students {
        match &entry.outcome {
            StudentOutcome::Created { path } => println!("Created {}", path.display()),
            StudentOutcome::Failed { reason } => println!("Failed  {}", reason),
        }
    }
    Ok(())
}

/// False when there was work to do and no worksheet came out of it.
fn run_succeeded(report: &BatchReport) -> bool {
    !report.all_failed()
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;
    match run(cli).and_then(|report| print_report(&report, json).map(|()| report)) {
        Ok(report) if run_succeeded(&report) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
