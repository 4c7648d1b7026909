//! Command implementations

use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::adapters::toml_config::AppConfig;
use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::{PlanArgs, ProbeArgs, SplitArgs};
use crate::domain::model::{ReelRequest, RunReport, SegmentDuration, SegmentPlan, SegmentStatus};
use crate::utils::time::format_clock;

/// Execute the split command
pub async fn split(args: SplitArgs, config: &AppConfig) -> Result<ExitCode> {
    // Reject bad input before any tool is touched
    let request = ReelRequest::new(
        args.input,
        args.output_dir,
        args.title,
        &args.segment_duration,
    )
    .context("Invalid split request")?;

    let container = DefaultAppContainer::new(config);
    let report = container
        .reel_interactor()
        .execute(&request)
        .await
        .with_context(|| format!("Failed to split {}", request.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.success() {
        Ok(ExitCode::SUCCESS)
    } else {
        error!("{} reel(s) failed", report.failures().len());
        Ok(ExitCode::FAILURE)
    }
}

/// Execute the plan command
pub async fn plan(args: PlanArgs, config: &AppConfig) -> Result<ExitCode> {
    let segment_duration =
        SegmentDuration::parse(&args.segment_duration).context("Invalid segment duration")?;

    let container = DefaultAppContainer::new(config);
    let plan = container
        .reel_interactor()
        .plan(&args.input, segment_duration)
        .await
        .with_context(|| format!("Failed to plan {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(ExitCode::SUCCESS)
}

/// Execute the probe command
pub async fn probe(args: ProbeArgs, config: &AppConfig) -> Result<ExitCode> {
    let container = DefaultAppContainer::new(config);
    let seconds = container
        .reel_interactor()
        .probe(&args.input)
        .await
        .with_context(|| format!("Failed to probe {}", args.input.display()))?;

    info!("{} lasts {}", args.input.display(), format_clock(seconds));
    println!("{}", seconds);
    Ok(ExitCode::SUCCESS)
}

fn print_plan(plan: &SegmentPlan) {
    println!(
        "Duration: {:.3}s ({})",
        plan.total_duration,
        format_clock(plan.total_duration)
    );
    println!("Reels:    {} x {}", plan.len(), plan.segment_duration);
    for segment in plan.iter() {
        println!(
            "  Part {:<3} {} - {}",
            segment.index,
            format_clock(segment.start),
            format_clock(segment.start + plan.effective_duration(segment))
        );
    }
}

fn print_report(report: &RunReport) {
    println!(
        "Generated {} of {} reels in {}",
        report.succeeded_count(),
        report.segments.len(),
        report.output_dir.display()
    );
    for outcome in &report.segments {
        match &outcome.status {
            SegmentStatus::Succeeded { output } => {
                println!("  Part {:<3} ok      {}", outcome.index, output.display());
            }
            SegmentStatus::Failed { message, .. } => {
                println!("  Part {:<3} FAILED  {}", outcome.index, message);
            }
        }
    }
}
