use crate::config::load_config;
use crate::layout::ContentSize;
use crate::layout_dump::write_layout_dump;
use crate::measure::CardMeasure;
use crate::parser::parse_timeline;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::timeline::Timeline;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tlr", version, about = "Chronological timeline renderer")]
pub struct Args {
    /// Timeline document (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, timeline, card)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Container width
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f64,

    /// Container height
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f64,

    /// Lay events out along a vertical axis
    #[arg(long = "vertical")]
    pub vertical: bool,

    /// Plain list without an axis (wins over --vertical)
    #[arg(long = "list")]
    pub list: bool,

    /// First year of an explicit range (needs --endYear)
    #[arg(long = "startYear")]
    pub start_year: Option<i32>,

    /// Last year of an explicit range (needs --startYear)
    #[arg(long = "endYear")]
    pub end_year: Option<i32>,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Skip font lookup and use built-in glyph widths
    #[arg(long = "fastText")]
    pub fast_text: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;
    if args.fast_text {
        config.layout.fast_text_metrics = true;
    }

    let input = read_input(args.input.as_deref())?;
    let mut document = parse_timeline(&input).context("failed to parse timeline document")?;
    document.vertical |= args.vertical;
    document.list |= args.list;
    if args.start_year.is_some() || args.end_year.is_some() {
        document.start_year = args.start_year;
        document.end_year = args.end_year;
    }
    tracing::info!(
        events = document.events.len(),
        vertical = document.vertical,
        list = document.list,
        "timeline document loaded"
    );

    let measure = CardMeasure::new(&config.layout, &config.theme);
    let mut timeline = Timeline::from_document(&document, config.layout.clone(), Box::new(measure));
    timeline.attach(ContentSize::new(args.width, args.height))?;
    let layout = timeline
        .snapshot()
        .ok_or_else(|| anyhow::anyhow!("no layout was produced"))?;

    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout, &document.events)?;
    }

    let svg = render_svg(
        &layout,
        &document.events,
        &document.label,
        &config.theme,
        timeline.config(),
    );
    match args.output_format {
        OutputFormat::Svg => write_output_svg(&svg, args.output.as_deref())?,
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &config.render, &config.theme)?;
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    output
        .clone()
        .ok_or_else(|| anyhow::anyhow!("Output path required for {ext} output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layout_flags() {
        let args = Args::try_parse_from([
            "tlr",
            "-i",
            "events.json5",
            "--vertical",
            "--startYear",
            "1970",
            "--endYear",
            "2010",
            "-e",
            "png",
            "-o",
            "out.png",
        ])
        .unwrap();
        assert!(args.vertical);
        assert!(!args.list);
        assert_eq!((args.start_year, args.end_year), (Some(1970), Some(2010)));
        assert!(matches!(args.output_format, OutputFormat::Png));
        assert_eq!(args.width, 1200.0);
    }

    #[test]
    fn png_needs_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        assert_eq!(
            ensure_output(&Some(PathBuf::from("a.png")), "png").unwrap(),
            PathBuf::from("a.png")
        );
    }
}
