use crate::commands::{run_check, run_classify, run_log, run_pipeline};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use job_fit::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "job-fit",
    about = "Score scraped jobs, route them to a resume and skip ones already applied to",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check whether a job was already applied to within the lookback window
    Check(CheckArgs),
    /// Decide the resume category for a set of fit scores
    Classify(ClassifyArgs),
    /// Score, classify and deduplicate a scraped job list
    Run(RunArgs),
    /// Record a submitted application in the tracker
    Log(LogArgs),
}

#[derive(Args, Debug, Default, Clone)]
pub(crate) struct TrackerArgs {
    /// Tracker directory holding one CSV file per sheet
    #[arg(long)]
    pub(crate) tracker: Option<PathBuf>,
    /// Tracker sheet name
    #[arg(long)]
    pub(crate) sheet: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct CheckArgs {
    #[arg(long)]
    pub(crate) company: String,
    #[arg(long)]
    pub(crate) position: String,
    /// Job description text
    #[arg(long, conflicts_with = "description_file")]
    pub(crate) description: Option<String>,
    /// File holding the job description
    #[arg(long)]
    pub(crate) description_file: Option<PathBuf>,
    /// Evaluate the lookback window as of this date (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Print the result as JSON
    #[arg(long)]
    pub(crate) json: bool,
    #[command(flatten)]
    pub(crate) tracker: TrackerArgs,
}

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) sde: i32,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) cloud_support: i32,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) sharepoint_support: i32,
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) application_support: i32,
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// Scraper output: JSON array of job postings
    #[arg(long)]
    pub(crate) jobs: PathBuf,
    /// Where to write the kept jobs
    #[arg(long, default_value = "good_score_jobs.json")]
    pub(crate) output: PathBuf,
    /// Directory with one resume template per category (`<category>.txt`)
    #[arg(long)]
    pub(crate) templates: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) tracker: TrackerArgs,
}

#[derive(Args, Debug)]
pub(crate) struct LogArgs {
    #[arg(long)]
    pub(crate) company: String,
    #[arg(long)]
    pub(crate) position: String,
    /// Application date (YYYY-MM-DD); defaults to today
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) applied_on: Option<NaiveDate>,
    /// File holding the job description to store with the row
    #[arg(long)]
    pub(crate) description_file: Option<PathBuf>,
    #[command(flatten)]
    pub(crate) tracker: TrackerArgs,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => run_check(args),
        Command::Classify(args) => run_classify(args),
        Command::Run(args) => run_pipeline(args),
        Command::Log(args) => run_log(args),
    }
}
