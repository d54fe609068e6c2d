mod app;
mod config;
mod effects;
mod ui;

use std::path::Path;

use anyhow::{bail, Context};
use deck_logging::LogDestination;

use app::JobQueryArgs;

const USAGE: &str = "\
jobdeck - job-search dashboard terminal client

Usage:
  jobdeck jobs [--search <text>] [--status <status>] [--source <source>]
               [--min-score <n>] [--min-salary <n>] [--page <n>]
  jobdeck apply <job_id>...
  jobdeck apply-one <job_id> [--cover-letter <text>] [--resume <version>]
  jobdeck move <application_id> <status>
  jobdeck pipeline

Configuration is read from ./jobdeck.ron when present.";

fn main() -> anyhow::Result<()> {
    deck_logging::initialize(LogDestination::File);
    let config = config::load(Path::new("."));

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("jobs") => {
            let query = parse_job_args(&mut args)?;
            app::run_jobs(&config, query)
        }
        Some("apply") => {
            let job_ids: Vec<String> = args.collect();
            if job_ids.is_empty() {
                bail!("apply expects at least one job id\n\n{USAGE}");
            }
            app::run_apply(&config, job_ids)
        }
        Some("apply-one") => {
            let Some(job_id) = args.next() else {
                bail!("apply-one expects a job id\n\n{USAGE}");
            };
            let mut cover_letter = None;
            let mut resume_version = None;
            while let Some(flag) = args.next() {
                match flag.as_str() {
                    "--cover-letter" => cover_letter = Some(expect_value(&mut args, "--cover-letter")?),
                    "--resume" => resume_version = Some(expect_value(&mut args, "--resume")?),
                    other => bail!("unknown flag {other:?}\n\n{USAGE}"),
                }
            }
            app::run_apply_one(&config, job_id, cover_letter, resume_version)
        }
        Some("move") => {
            let (Some(application_id), Some(status)) = (args.next(), args.next()) else {
                bail!("move expects an application id and a status\n\n{USAGE}");
            };
            app::run_move(&config, application_id, status)
        }
        Some("pipeline") => app::run_pipeline(&config),
        Some(other) => bail!("unknown command {other:?}\n\n{USAGE}"),
        None => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

fn parse_job_args(args: &mut impl Iterator<Item = String>) -> anyhow::Result<JobQueryArgs> {
    let mut query = JobQueryArgs::default();
    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--search" => query.search = Some(expect_value(args, "--search")?),
            "--status" => query.status = Some(expect_value(args, "--status")?),
            "--source" => query.source = Some(expect_value(args, "--source")?),
            "--min-score" => {
                query.min_score = Some(
                    expect_value(args, "--min-score")?
                        .parse()
                        .context("--min-score expects a number")?,
                );
            }
            "--min-salary" => {
                query.min_salary = Some(
                    expect_value(args, "--min-salary")?
                        .parse()
                        .context("--min-salary expects a number")?,
                );
            }
            "--page" => {
                query.page = Some(
                    expect_value(args, "--page")?
                        .parse()
                        .context("--page expects a number")?,
                );
            }
            other => bail!("unknown flag {other:?}\n\n{USAGE}"),
        }
    }
    Ok(query)
}

fn expect_value(args: &mut impl Iterator<Item = String>, flag: &str) -> anyhow::Result<String> {
    args.next()
        .with_context(|| format!("{flag} expects a value"))
}
