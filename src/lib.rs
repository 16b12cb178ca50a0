//! Urbansas filter - cut an audio-video traffic dataset into low-occupancy segments.
//!
//! The crate finds the spans of each recording in which at most a given
//! number of vehicles is visible in every frame, cuts the matching video and
//! audio clips, and rewrites both annotation tables onto the new clips.

#![warn(missing_docs)]

pub mod annotations;
pub mod audio;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod segment;
pub mod video;

use annotations::{
    AnnotationTable, AudioAnnotation, VideoAnnotation, read_audio_annotations,
    read_video_annotations,
};
use chrono::Utc;
use clap::Parser;
use cli::{Cli, Command, ConfigAction, FilterArgs};
use config::{Config, config_file_path, load_default_config, save_default_config};
use output::{
    CsvWriter, ManifestSettings, ManifestSummary, SegmentManifest, write_all, write_manifest,
};
use pipeline::{FilterContext, FilterSettings, prepare_output_layout, process_file, scan_segments};
use segment::framewise_counts;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for the urbansas-filter CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.filter.verbose, cli.filter.quiet);

    let config = load_default_config(cli.config.as_deref())?;

    if let Some(command) = cli.command {
        return handle_command(command, &cli.filter, cli.config.as_deref(), &config);
    }

    filter_dataset(&cli.filter, &config)
}

/// Filter the whole dataset and write the filtered copy.
fn filter_dataset(args: &FilterArgs, config: &Config) -> Result<()> {
    use crate::output::progress;
    use std::time::Instant;

    let total_start = Instant::now();

    let settings = FilterSettings::resolve(args, config)?;
    let input = settings.input_layout();

    let (video_table, audio_table) = load_tables(&settings)?;
    let files = framewise_counts(&video_table.rows);
    info!(
        "Loaded {} video and {} audio annotation(s) for {} file(s)",
        video_table.rows.len(),
        audio_table.rows.len(),
        files.len()
    );
    info!(
        "Keeping segments with at most {} vehicle(s) per frame, longer than {}s",
        settings.max_vehicles, settings.min_duration
    );

    let ctx = FilterContext::new(settings);
    prepare_output_layout(&ctx.output, ctx.settings.fps, !ctx.settings.annotations_only)?;

    let mut video_by_file = video_table.group_by_file();
    let mut audio_by_file = audio_table.group_by_file();

    let stop = install_stop_handler();

    let progress_enabled = !args.quiet && !args.no_progress;
    let file_progress = progress::create_file_progress(files.len(), progress_enabled);

    let mut filtered_video: Vec<VideoAnnotation> = Vec::new();
    let mut filtered_audio: Vec<AudioAnnotation> = Vec::new();
    let mut entries = Vec::new();
    let mut summary = ManifestSummary {
        files_total: files.len(),
        ..ManifestSummary::default()
    };
    let mut completed = 0;
    let mut interrupted = false;

    for file in &files {
        if stop.load(Ordering::SeqCst) {
            interrupted = true;
            break;
        }

        progress::set_progress_file(file_progress.as_ref(), &file.filename);
        let video = video_by_file.remove(&file.filename).unwrap_or_default();
        let audio = audio_by_file.remove(&file.filename).unwrap_or_default();

        match process_file(&ctx, file, &video, &audio) {
            Ok(result) => {
                if result.segments() > 0 {
                    summary.files_with_segments += 1;
                }
                summary.segments += result.segments();
                summary.total_duration += result
                    .entries
                    .iter()
                    .map(|entry| entry.segment.duration())
                    .sum::<f64>();
                filtered_video.extend(result.video);
                filtered_audio.extend(result.audio);
                entries.extend(result.entries);
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.filename, e);
                summary.files_failed += 1;
                if args.fail_fast {
                    progress::finish_progress(file_progress, "Failed");
                    return Err(e);
                }
            }
        }
        completed += 1;
        progress::inc_progress(file_progress.as_ref());
    }

    progress::finish_progress(
        file_progress,
        if interrupted { "Interrupted" } else { "Complete" },
    );

    let output = &ctx.output;
    let mut writer = CsvWriter::new(&output.video_annotations_path(), video_table.headers)?;
    write_all(&mut writer, &filtered_video)?;
    let mut writer = CsvWriter::new(&output.audio_annotations_path(), audio_table.headers)?;
    write_all(&mut writer, &filtered_audio)?;

    let manifest = SegmentManifest {
        generated_at: Utc::now(),
        settings: ManifestSettings {
            max_vehicles: ctx.settings.max_vehicles,
            min_duration: ctx.settings.min_duration,
            fps: ctx.settings.fps,
            input_root: input.root().to_path_buf(),
            media_written: !ctx.settings.annotations_only,
            audio_time_base: ctx.settings.audio_time_base.to_string(),
        },
        summary,
        segments: entries,
    };
    write_manifest(&output.manifest_path(), &manifest)?;

    let summary = &manifest.summary;
    info!(
        "Complete: {} segment(s) ({:.1}s) from {} of {} file(s), {} error(s) in {:.2}s",
        summary.segments,
        summary.total_duration,
        summary.files_with_segments,
        summary.files_total,
        summary.files_failed,
        total_start.elapsed().as_secs_f64()
    );
    info!(
        "The dataset has been filtered to have a maximum of {} vehicle(s) in each frame. The minimum allowed duration is {}s.",
        ctx.settings.max_vehicles, ctx.settings.min_duration
    );

    if summary.files_failed > 0 {
        warn!("{} file(s) had errors", summary.files_failed);
    }

    if interrupted {
        return Err(Error::Interrupted {
            files_completed: completed,
            files_total: summary.files_total,
        });
    }

    Ok(())
}

type AnnotationTables = (AnnotationTable<VideoAnnotation>, AnnotationTable<AudioAnnotation>);

/// Read both annotation tables of the source dataset.
fn load_tables(settings: &FilterSettings) -> Result<AnnotationTables> {
    let input = settings.input_layout();
    let video_path = input.video_annotations_path();
    let audio_path = input.audio_annotations_path();

    for path in [&video_path, &audio_path] {
        if !path.is_file() {
            cli::help::print_missing_dataset_help(settings);
            return Err(Error::DatasetNotFound { path: path.clone() });
        }
    }

    Ok((
        read_video_annotations(&video_path)?,
        read_audio_annotations(&audio_path)?,
    ))
}

/// Request a stop after the current file on Ctrl+C.
fn install_stop_handler() -> Arc<AtomicBool> {
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);

    if let Err(e) = ctrlc::set_handler(move || {
        if flag.swap(true, Ordering::SeqCst) {
            // second Ctrl+C
            std::process::exit(130);
        }
    }) {
        warn!("Failed to install Ctrl+C handler: {e}");
    }

    stop
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(
    command: Command,
    args: &FilterArgs,
    config_path: Option<&Path>,
    config: &Config,
) -> Result<()> {
    match command {
        Command::Scan { json } => handle_scan_command(args, config, json),
        Command::Config { action } => handle_config_command(action, config_path),
    }
}

#[allow(clippy::print_stdout)]
fn handle_scan_command(args: &FilterArgs, config: &Config, json: bool) -> Result<()> {
    let settings = FilterSettings::resolve(args, config)?;
    let path = settings.input_layout().video_annotations_path();
    if !path.is_file() {
        cli::help::print_missing_dataset_help(&settings);
        return Err(Error::DatasetNotFound { path });
    }

    let table = read_video_annotations(&path)?;
    let scan = scan_segments(&table.rows, settings.max_vehicles, settings.min_duration);

    if json {
        let text = serde_json::to_string_pretty(&scan).map_err(|e| Error::Internal {
            message: format!("failed to serialize scan results: {e}"),
        })?;
        println!("{text}");
        return Ok(());
    }

    for file in &scan {
        if let Some(ref message) = file.error {
            println!("{}: skipped ({message})", file.filename);
            continue;
        }
        println!(
            "{}: {} frame(s), {} segment(s)",
            file.filename,
            file.frames,
            file.segments.len()
        );
        for (index, segment) in file.segments.iter().enumerate() {
            println!(
                "  {}  frames {}-{}  {:.1}s-{:.1}s  ({:.1}s)",
                annotations::segment_id(&file.filename, index),
                segment.start_frame_id,
                segment.end_frame_id,
                segment.start_time(),
                segment.end_time(),
                segment.duration()
            );
        }
    }

    let total: usize = scan.iter().map(|file| file.segments.len()).sum();
    println!();
    println!("{total} segment(s) in {} file(s)", scan.len());

    Ok(())
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Init => {
            let path = config_file_path(config_path)?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let saved_path = save_default_config(&Config::default(), config_path)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  Edit [dataset] input_root to point at your copy of the dataset.");
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config(config_path)?;
            let text =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            println!("{text}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path(config_path)?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
