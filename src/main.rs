use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use svgexport::platform::{DirDownloadSink, LogReporter, PreviewUpdate};
use svgexport::{AsyncConverter, ConverterConfig, ExportFormat};

#[derive(Parser)]
#[command(name = "svgexport", version, about = "Rasterize SVG markup to PNG/JPG files")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,

    /// JSON config file overriding the built-in defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory the exported files are written to
    #[arg(short, long, global = true, default_value = ".", value_name = "DIR")]
    out_dir: PathBuf,

    /// Pause between the files of a multi-file batch, in milliseconds
    #[arg(long, global = true, value_name = "MS")]
    delay_ms: Option<u64>,

    /// JPEG encoder quality (1-100)
    #[arg(long, global = true, value_name = "Q")]
    jpeg_quality: Option<u8>,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Export a single rendition at a custom size
    One {
        /// SVG input file, or `-` to read stdin
        input: PathBuf,
        /// Output width in pixels (defaults to the configured export box)
        #[arg(short = 'W', long)]
        width: Option<u32>,
        /// Output height in pixels (defaults to the configured export box)
        #[arg(short = 'H', long)]
        height: Option<u32>,
        /// Output format
        #[arg(short, long, default_value = "png", value_parser = parse_format)]
        format: ExportFormat,
    },
    /// Export the fixed icon-size set as PNG
    Icons {
        /// SVG input file, or `-` to read stdin
        input: PathBuf,
    },
    /// Export the combined bundle: default box in PNG and JPG plus the icon set
    All {
        /// SVG input file, or `-` to read stdin
        input: PathBuf,
    },
}

fn parse_format(s: &str) -> Result<ExportFormat, String> {
    s.parse()
}

fn load_config(path: &Path) -> anyhow::Result<ConverterConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ConverterConfig::default(),
    };
    if let Some(ms) = cli.delay_ms {
        config.pacing_delay_ms = ms;
    }
    if let Some(quality) = cli.jpeg_quality {
        config.jpeg_quality = quality;
    }
    let default_size = config.default_size;

    let input = match &cli.command {
        CliCommand::One { input, .. } | CliCommand::Icons { input } | CliCommand::All { input } => {
            input.clone()
        }
    };
    let markup = read_input(&input)?;

    let converter = AsyncConverter::new(
        config,
        Arc::new(DirDownloadSink::new(&cli.out_dir)),
        Arc::new(LogReporter),
    );

    match converter.set_source(&markup).await? {
        PreviewUpdate::Updated => {}
        PreviewUpdate::Cleared => bail!("{}: input is empty", input.display()),
        PreviewUpdate::Rejected => bail!(
            "{}: input is not renderable SVG markup (missing <svg> or </svg>)",
            input.display()
        ),
    }

    let count = match cli.command {
        CliCommand::One { width, height, format, .. } => {
            converter
                .export_one(
                    width.unwrap_or(default_size),
                    height.unwrap_or(default_size),
                    format,
                )
                .await?
        }
        CliCommand::Icons { .. } => converter.export_icon_set().await?,
        CliCommand::All { .. } => converter.export_all_formats().await?,
    };

    println!("Exported {} file(s) to {}", count, cli.out_dir.display());
    converter.close().await?;
    Ok(())
}
