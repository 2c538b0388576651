use std::{
    ffi::OsString,
    io::{self, Write as _},
    num::NonZeroU32,
};

use anyhow::Context as _;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use waveform_batch::{
    BatchOpts, ColorPolicy, ColorStrategy, RasterFormat, RenderPolicy, WaveformEngine, run_batch,
};

/// Long flags that may also be spelled with one dash (`-fn=solid`).
const LONG_FLAGS: &[&str] = &[
    "bg",
    "fg",
    "alt",
    "resolution",
    "x",
    "y",
    "sharpness",
    "fn",
    "format",
    "seed",
    "parallel",
    "threads",
    "log-level",
    "help",
    "version",
];

/// Reads a JSON batch of base64 audio payloads on stdin and writes a JSON batch of base64
/// waveform images to stdout.
#[derive(Parser, Debug)]
#[command(name = "waveform", version)]
struct Cli {
    /// Hex background color of output waveform images.
    #[arg(long, default_value = "#FFFFFF")]
    bg: String,

    /// Hex foreground color of output waveform images.
    #[arg(long, default_value = "#000000")]
    fg: String,

    /// Hex alternate color of output waveform images (defaults to the foreground color).
    #[arg(long)]
    alt: Option<String>,

    /// Number of times audio is read and drawn per second of audio.
    #[arg(long, default_value = "1")]
    resolution: NonZeroU32,

    /// Scaling factor for the image X-axis.
    #[arg(long = "x", default_value = "1")]
    scale_x: NonZeroU32,

    /// Scaling factor for the image Y-axis.
    #[arg(long = "y", default_value = "1")]
    scale_y: NonZeroU32,

    /// Sharpening factor used to add curvature to a scaled image.
    #[arg(long, default_value_t = 1)]
    sharpness: u32,

    #[arg(long = "fn", default_value = "solid", help = fn_help())]
    strategy: String,

    /// Container of the returned images.
    #[arg(long, value_enum, default_value_t = FormatChoice::Tiff)]
    format: FormatChoice,

    /// Seed for the `fuzz` function, for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Render the requests of a batch concurrently.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Log filter used when `RUST_LOG` is unset. Logs go to stderr.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Tiff,
    Png,
}

impl From<FormatChoice> for RasterFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Tiff => RasterFormat::Tiff,
            FormatChoice::Png => RasterFormat::Png,
        }
    }
}

fn fn_help() -> String {
    format!(
        "Function used to color output waveform images {}",
        ColorStrategy::options()
    )
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_from(normalize_go_flags(std::env::args_os()));
    init_tracing(&cli.log_level);

    // Resolved before stdin is touched: a bad strategy never consumes input.
    let colors = ColorPolicy::resolve(
        &cli.bg,
        &cli.fg,
        cli.alt.as_deref().unwrap_or(""),
        &cli.strategy,
    )?;
    let policy = RenderPolicy::build(
        colors,
        cli.resolution,
        cli.scale_x,
        cli.scale_y,
        cli.sharpness,
    )
    .with_fuzz_seed(cli.seed);
    let opts = BatchOpts {
        format: cli.format.into(),
        parallel: cli.parallel,
        threads: cli.threads,
    };
    tracing::debug!(?policy, ?opts, "configuration resolved");

    let doc = run_batch(io::stdin().lock(), &WaveformEngine::new(), &policy, &opts)
        .context("process request batch")?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(&doc)
        .and_then(|()| stdout.write_all(b"\n"))
        .and_then(|()| stdout.flush())
        .context("write response document")?;
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Rewrite `-name[=value]` into `--name[=value]` for known long flags.
fn normalize_go_flags(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    args.into_iter()
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            let Some(rest) = s.strip_prefix('-') else {
                return arg;
            };
            if rest.starts_with('-') {
                return arg;
            }
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{s}"))
            } else {
                arg
            }
        })
        .collect()
}
