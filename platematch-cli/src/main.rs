mod config;

use clap::Parser;
use config::{Config, DetectorKind, InputKind};
use platematch::io::load_frame;
use platematch::{
    load_gallery_dir, Annotator, FixedRegions, MatchResult, Outcome, Pipeline, RegionDetector,
};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(author, version, about = "PlateMatch CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Log pipeline decisions to stderr.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct ResultRecord {
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    matched: bool,
    label: Option<String>,
    score: Option<f32>,
}

impl From<&MatchResult> for ResultRecord {
    fn from(value: &MatchResult) -> Self {
        let (label, score) = match &value.outcome {
            Outcome::Matched { label, score } => (Some(label.clone()), Some(*score)),
            Outcome::Unmatched => (None, None),
        };
        Self {
            x: value.region.x,
            y: value.region.y,
            width: value.region.width,
            height: value.region.height,
            matched: value.outcome.is_matched(),
            label,
            score,
        }
    }
}

#[derive(Debug, Serialize)]
struct ImageReport {
    input: String,
    width: usize,
    height: usize,
    results: Vec<ResultRecord>,
}

#[cfg(feature = "opencv")]
#[derive(Debug, Serialize)]
struct VideoReport {
    input: String,
    frames: usize,
    regions: usize,
    matched: usize,
}

#[cfg(feature = "opencv")]
impl VideoReport {
    fn new(input: &str, summary: platematch::RunSummary) -> Self {
        Self {
            input: input.to_string(),
            frames: summary.frames,
            regions: summary.regions,
            matched: summary.matched,
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("platematch=info".parse()?),
            )
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let mut config: Config = serde_json::from_str(&config_text)?;
    if config.gallery_dir.is_empty() || config.input.path.is_empty() {
        return Err("gallery_dir and input.path must be set in the config".into());
    }
    if config.frame_delay_ms == 0 {
        return Err("frame_delay_ms must be at least 1".into());
    }

    let gallery = load_gallery_dir(&config.gallery_dir, config.gallery_order.into())?;
    let detector = build_detector(&config)?;
    let pipeline_config = config.pipeline_config();
    let annotator = Annotator::new(pipeline_config.overlay.clone())?;
    let mut pipeline = Pipeline::new(gallery, detector, pipeline_config)?;

    match config.input.kind {
        InputKind::Image => run_image(&config, &mut pipeline, &annotator),
        InputKind::Video => run_video(&config, &mut pipeline, &annotator),
    }
}

fn build_detector(config: &Config) -> CliResult<Box<dyn RegionDetector>> {
    match config.detector.kind {
        DetectorKind::Fixed => Ok(Box::new(FixedRegions::new(
            config.detector.fixed_regions(),
        ))),
        DetectorKind::Cascade => cascade_detector(config),
    }
}

#[cfg(feature = "opencv")]
fn cascade_detector(config: &Config) -> CliResult<Box<dyn RegionDetector>> {
    let detector = platematch::cv::CascadeDetector::open(&config.detector.classifier_path)?;
    Ok(Box::new(detector))
}

#[cfg(not(feature = "opencv"))]
fn cascade_detector(_config: &Config) -> CliResult<Box<dyn RegionDetector>> {
    Err("the cascade detector requires building with the `opencv` feature".into())
}

fn run_image(
    config: &Config,
    pipeline: &mut Pipeline<Box<dyn RegionDetector>>,
    annotator: &Annotator,
) -> CliResult<()> {
    let frame = load_frame(&config.input.path, config.frame_width)?;
    let results = pipeline.process_frame(&frame)?;

    if config.output_path.is_some() || config.display {
        let mut annotated = frame.to_rgb_image()?;
        annotator.annotate(&mut annotated, &results);
        if let Some(path) = &config.output_path {
            annotated.save(path)?;
        }
        if config.display {
            show_until_key(annotated.as_raw(), frame.width(), frame.height())?;
        }
    }

    let report = ImageReport {
        input: config.input.path.clone(),
        width: frame.width(),
        height: frame.height(),
        results: results.iter().map(ResultRecord::from).collect(),
    };
    write_report(config, &report)
}

#[cfg(feature = "opencv")]
fn show_until_key(rgb: &[u8], width: usize, height: usize) -> CliResult<()> {
    let window = platematch::cv::Window::new("platematch")?;
    window.show_rgb(rgb, width, height)?;
    window.wait_key(0)?;
    Ok(())
}

#[cfg(not(feature = "opencv"))]
fn show_until_key(_rgb: &[u8], _width: usize, _height: usize) -> CliResult<()> {
    Err("display requires building with the `opencv` feature".into())
}

#[cfg(feature = "opencv")]
fn run_video(
    config: &Config,
    pipeline: &mut Pipeline<Box<dyn RegionDetector>>,
    annotator: &Annotator,
) -> CliResult<()> {
    use platematch::cv::{VideoSource, Window};
    use platematch::Frame;
    use std::ops::ControlFlow;

    if config.output_path.is_some() {
        tracing::warn!("output_path is ignored for video input");
    }
    let source = VideoSource::open(&config.input.path, config.frame_width)?;
    let window = if config.display {
        Some(Window::new("platematch")?)
    } else {
        None
    };
    let delay = i32::try_from(config.frame_delay_ms).unwrap_or(i32::MAX);

    let summary = pipeline.run(source, |frame: &Frame, results: &[MatchResult]| {
        let Some(window) = &window else {
            return Ok(ControlFlow::Continue(()));
        };
        let mut annotated = frame.to_rgb_image()?;
        annotator.annotate(&mut annotated, results);
        window.show_rgb(annotated.as_raw(), frame.width(), frame.height())?;
        if window.wait_key(delay)? == Some(config.quit_key) {
            return Ok(ControlFlow::Break(()));
        }
        Ok(ControlFlow::Continue(()))
    })?;

    write_report(config, &VideoReport::new(&config.input.path, summary))
}

#[cfg(not(feature = "opencv"))]
fn run_video(
    _config: &Config,
    _pipeline: &mut Pipeline<Box<dyn RegionDetector>>,
    _annotator: &Annotator,
) -> CliResult<()> {
    Err("video input requires building with the `opencv` feature".into())
}

fn write_report<T: Serialize>(config: &Config, report: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(report)?;
    match &config.report_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}
