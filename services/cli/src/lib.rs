mod cli;
mod commands;
mod infra;

use job_fit::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
