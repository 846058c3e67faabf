//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::args::{CollapseArgs, CutArgs, InspectArgs};
use crate::config::EditorConfig;
use crate::cutter::{ExportEvent, SegmentCutter};
use crate::probe::MediaProbe;
use crate::project::Project;
use crate::session::EditorSession;
use crate::utils::time::{format_time, parse_ranges};

/// Execute the collapse command
pub fn collapse(args: CollapseArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let mut project = Project::load(Path::new(&args.project)).context("Failed to load project")?;
    // A config embedded in the project wins over the CLI-supplied one.
    if project.config.is_none() {
        project.config = Some(config);
    }
    let session = EditorSession::from_project(project);
    let collapsed = session.collapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&collapsed)?);
        return Ok(());
    }

    let deleted_total: f64 = collapsed.deleted_ranges.iter().map(|r| r.duration()).sum();
    println!("Original duration:  {}", format_time(session.original_duration()));
    println!("Deleted:            {} across {} range(s)", format_time(deleted_total), collapsed.deleted_ranges.len());
    println!("Collapsed duration: {}", format_time(collapsed.total_duration));
    println!("Video segments:     {}", collapsed.video_track.items.len());
    println!("Script items:       {}", collapsed.script_track.items.len());
    println!("Export segments:    {}", session.export_plan().len());
    Ok(())
}

/// Execute the cut command
pub async fn cut(args: CutArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let cutter = SegmentCutter::new()
        .with_binary(args.ffmpeg.clone())
        .with_tolerance(config.duration_tolerance);
    let output = Path::new(&args.output);

    let progress = |event: ExportEvent| match event {
        ExportEvent::Progress(fraction) => {
            info!("Export progress: {:.0}%", fraction * 100.0);
        }
        ExportEvent::Done(path) => info!("Export done: {}", path.display()),
        ExportEvent::Error(message) => info!("Export error: {message}"),
    };

    let report = match (&args.project, &args.input, &args.ranges) {
        (Some(project_path), None, None) => {
            let project =
                Project::load(Path::new(project_path)).context("Failed to load project")?;
            let session = EditorSession::from_project(project);
            let plan = session.export_plan();
            info!("Export plan: {} segment(s)", plan.len());
            cutter
                .export(&plan, output, Some(&progress))
                .await
                .context("Failed to export project")?
        }
        (None, Some(input), Some(ranges)) => {
            let keep = parse_ranges(ranges).context("Invalid --ranges")?;
            cutter
                .cut(Path::new(input), &keep, output, Some(&progress))
                .await
                .context("Failed to cut input")?
        }
        _ => anyhow::bail!("Provide either --project, or --input with --ranges"),
    };

    println!(
        "Wrote {} ({} segment(s), {} expected{})",
        report.output.display(),
        report.segments,
        format_time(report.expected_duration),
        report
            .actual_duration
            .map(|d| format!(", {} probed", format_time(d)))
            .unwrap_or_default()
    );
    Ok(())
}

/// Execute the inspect command
pub async fn inspect(args: InspectArgs) -> Result<()> {
    let probe = MediaProbe::new();
    let media_info = probe
        .inspect(Path::new(&args.input))
        .await
        .context("Failed to inspect input file")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&media_info)?);
        return Ok(());
    }

    println!("Duration: {}", format_time(media_info.duration));
    if let (Some(width), Some(height)) = (media_info.width, media_info.height) {
        println!("Video:    {width}x{height}");
    }
    Ok(())
}

fn load_config(path: Option<&str>) -> Result<EditorConfig> {
    match path {
        Some(path) => {
            EditorConfig::load(Path::new(path)).context("Failed to load configuration")
        }
        None => Ok(EditorConfig::default()),
    }
}
