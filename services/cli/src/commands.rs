use crate::cli::{CheckArgs, ClassifyArgs, LogArgs, RunArgs};
use crate::infra::{bootstrap, read_description, reference_time, tracker_config};
use chrono::Local;
use job_fit::error::AppError;
use job_fit::workflows::category::{Category, CategoryDecision, FitScoreSet};
use job_fit::workflows::dedup::{DeduplicationEngine, MatchEvidence};
use job_fit::workflows::pipeline::{
    load_candidates, write_artifact, FitPipeline, FitRun, GeminiScorer, PipelineError,
    ResumeTemplates,
};
use job_fit::workflows::tracker::{ApplicationLogEntry, CsvWorkbook, HistoryEntry, HistoryStore};
use serde::Serialize;
use tracing::info;

#[derive(Debug, Serialize)]
struct CheckReport<'a> {
    company: &'a str,
    position: &'a str,
    history_available: bool,
    history_entries: usize,
    applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    evidence: Option<MatchEvidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    matched: Option<&'a HistoryEntry>,
}

pub(crate) fn run_check(args: CheckArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let tracker = tracker_config(config.tracker, args.tracker.tracker, args.tracker.sheet);
    let description = read_description(args.description, args.description_file.as_deref())?
        .unwrap_or_default();

    let workbook = CsvWorkbook::new(&tracker.directory);
    let engine = DeduplicationEngine::from_source(
        &workbook,
        &tracker.settings,
        reference_time(args.today),
    );
    let found = engine.find_match(&args.company, &args.position, &description);

    let report = CheckReport {
        company: &args.company,
        position: &args.position,
        history_available: engine.history().is_available(),
        history_entries: engine.history().len(),
        applied: found.is_some(),
        evidence: found.as_ref().map(|found| found.evidence),
        matched: found.as_ref().map(|found| found.entry),
    };

    if args.json {
        let rendered = serde_json::to_string_pretty(&report).map_err(PipelineError::from)?;
        println!("{rendered}");
        return Ok(());
    }

    if let HistoryStore::Unavailable(reason) = engine.history() {
        println!("History unavailable ({reason}); duplicate check skipped.");
    }
    match (report.evidence, report.matched) {
        (Some(evidence), Some(entry)) => {
            let applied = entry
                .applied_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "unknown date".to_string());
            let reason = match evidence {
                MatchEvidence::CompanyAndPosition => "company and position match".to_string(),
                MatchEvidence::SimilarDescription { score } => {
                    format!("description similarity {score}")
                }
            };
            println!(
                "Already applied: {} / {} on {} ({})",
                args.company, args.position, applied, reason
            );
        }
        _ => println!(
            "Not applied: {} / {} ({} tracker entries checked)",
            args.company, args.position, report.history_entries
        ),
    }
    Ok(())
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let scores = FitScoreSet::new(
        args.sde,
        args.cloud_support,
        args.sharepoint_support,
        args.application_support,
    );
    let decision = CategoryDecision::default();
    let (best, best_score) = scores.best();

    match decision.decide(&scores) {
        Category::Resume(category) => println!("{category}"),
        Category::Skip => println!(
            "skip (best {best} at {best_score}, floor {})",
            decision.thresholds().fallback_floor
        ),
    }
    Ok(())
}

pub(crate) fn run_pipeline(args: RunArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let tracker = tracker_config(config.tracker, args.tracker.tracker, args.tracker.sheet);
    let template_dir = args.templates.unwrap_or(config.scorer.template_dir.clone());

    let templates = ResumeTemplates::load(&template_dir)?;
    let mut scorer = GeminiScorer::from_config(&config.scorer, templates)?;
    let jobs = load_candidates(&args.jobs)?;
    info!(jobs = jobs.len(), keys = scorer.keys().len(), model = %config.scorer.model, "starting fit run");

    let workbook = CsvWorkbook::new(&tracker.directory);
    let engine = DeduplicationEngine::from_source(
        &workbook,
        &tracker.settings,
        Local::now().naive_local(),
    );
    let pipeline = FitPipeline::new(&engine, CategoryDecision::default());
    let run = pipeline.run(&mut scorer, jobs);

    write_artifact(&args.output, &run.kept)?;
    print_run_summary(&run, &args.output.display().to_string());

    match run.halted {
        Some(reason) => Err(AppError::Halted {
            reason,
            unprocessed: run.unprocessed,
        }),
        None => Ok(()),
    }
}

fn print_run_summary(run: &FitRun, output: &str) {
    println!("Kept {} job(s) -> {}", run.kept.len(), output);
    for kept in &run.kept {
        println!(
            "  - [{}] {} at {}",
            kept.category, kept.job.position, kept.job.company
        );
    }
    println!(
        "Skipped {} below threshold, dropped {} already applied, {} failed",
        run.skipped.len(),
        run.duplicates.len(),
        run.failures.len()
    );
    for failure in &run.failures {
        println!(
            "  ! {} at {}: {}",
            failure.job.position, failure.job.company, failure.error
        );
    }
}

pub(crate) fn run_log(args: LogArgs) -> Result<(), AppError> {
    let config = bootstrap()?;
    let tracker = tracker_config(config.tracker, args.tracker.tracker, args.tracker.sheet);
    let description = read_description(None, args.description_file.as_deref())?;

    let entry = ApplicationLogEntry {
        company: args.company,
        position: args.position,
        applied_on: args.applied_on.unwrap_or_else(|| Local::now().date_naive()),
        description,
    };
    let workbook = CsvWorkbook::new(&tracker.directory);
    let path = workbook.append_application(&tracker.settings.sheet_name, &entry)?;

    info!(company = %entry.company, position = %entry.position, path = %path.display(), "application logged");
    println!(
        "Logged {} / {} on {} in {}",
        entry.company,
        entry.position,
        entry.applied_date_label(),
        path.display()
    );
    Ok(())
}
