//! Command implementations

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use crate::app::compose_interactor::ComposeInteractor;
use crate::app::container::AppContainer;
use crate::cli::args::{ComposeArgs, PlanArgs, ProbeArgs};
use crate::config::AppConfig;
use crate::domain::model::ProfileKind;
use crate::planner::CompositionPlan;
use crate::utils::time::TimeParser;

/// One ffmpeg invocation the encoder would run
#[derive(Debug, Serialize)]
pub struct CommandLine {
    pub profile: ProfileKind,
    pub program: String,
    pub args: Vec<String>,
}

/// Dry-run output of the plan command
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    pub plan: &'a CompositionPlan,
    pub filter_complex: String,
    pub commands: Vec<CommandLine>,
}

#[derive(Debug, Serialize)]
struct ProbeReport {
    path: String,
    duration: f64,
    timestamp: String,
}

/// Execute the compose command
pub fn compose(container: &dyn AppContainer, config: &AppConfig, args: ComposeArgs) -> Result<()> {
    let request = args.request.to_request(config.subtitles.segment_mode)?;
    info!(
        "Composing {} clips over {} into {}",
        request.clips.len(),
        request.narration.display(),
        request.output.display()
    );

    let report = container
        .compose_interactor()
        .compose(&request)
        .context("Composition failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Output:    {}", report.output.display());
        println!("Duration:  {:.3}s", report.narration_duration);
        println!("Frame:     {}", report.frame);
        println!("Clips:     {} x {:.3}s", report.clip_count, report.slice_length);
        println!("Subtitles: {} cues", report.cue_count);
        println!("Encoder:   {} ({} attempt(s))", report.profile, report.attempts);
    }
    Ok(())
}

/// Execute the plan command
pub fn plan(container: &dyn AppContainer, config: &AppConfig, args: PlanArgs) -> Result<()> {
    let request = args.request.to_request(config.subtitles.segment_mode)?;
    let plan = container
        .compose_interactor()
        .plan(&request, args.duration)
        .context("Planning failed")?;

    let job = ComposeInteractor::encode_job(&request, &plan);
    let settings = container.encode_settings();
    let program = config.tools.ffmpeg.display().to_string();
    let commands: Vec<CommandLine> = settings
        .attempt_order()
        .into_iter()
        .map(|(profile, encoder)| CommandLine {
            profile,
            program: program.clone(),
            args: settings.build_args(&job, encoder),
        })
        .collect();

    if args.json {
        let report = PlanReport {
            plan: &plan,
            filter_complex: plan.graph.render(),
            commands,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let parser = TimeParser::new();
    println!(
        "Narration: {} ({:.3}s, {})",
        plan.narration.path.display(),
        plan.narration.duration,
        parser.format_time(plan.narration.duration)
    );
    println!("Frame:     {}", plan.frame);
    println!("Clips:     {} x {:.3}s", plan.slices.len(), plan.slice_length());
    for cue in &plan.cues {
        println!(
            "  [{} -> {}] {}",
            parser.format_time(cue.start),
            parser.format_time(cue.end),
            cue.text
        );
    }
    println!("Filter graph:");
    for directive in plan.graph.directives() {
        println!("  {}", directive.render());
    }
    println!("Maps:      {}", plan.graph.map_args().join(" "));
    for command in &commands {
        println!("{}: {} {}", command.profile, command.program, command.args.join(" "));
    }
    Ok(())
}

/// Execute the probe command
pub fn probe(container: &dyn AppContainer, args: ProbeArgs) -> Result<()> {
    if !args.input.is_file() {
        return Err(anyhow::anyhow!("Input file does not exist: {}", args.input.display()));
    }

    let duration = container
        .probe_port()
        .probe_duration(&args.input)
        .with_context(|| format!("Failed to probe {}", args.input.display()))?;
    let timestamp = TimeParser::new().format_time(duration);

    if args.json {
        let report = ProbeReport {
            path: args.input.display().to_string(),
            duration,
            timestamp,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{:.3}s ({})", duration, timestamp);
    }
    Ok(())
}
