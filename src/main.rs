use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info, warn};
use progress_arc::config::{AppConfig, OutputFormat};
use progress_arc::{Attribute, ProgressArc, SimulatedHost};
use std::io::Write;
use std::path::PathBuf;

/// progress-arc - Render an animated circular progress indicator
#[derive(Parser, Debug, Clone)]
#[command(name = "progress-arc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Attribute to set, as NAME=VALUE (repeatable, e.g. -a percentage=42 -a color=#ff0000)
    #[arg(short = 'a', long = "attr", value_name = "NAME=VALUE", value_parser = parse_attribute)]
    attributes: Vec<(String, String)>,

    /// Percentage shown before animating to the target
    #[arg(long = "from", value_name = "PERCENT")]
    from: Option<f64>,

    /// Output format (defaults to the configured one)
    #[arg(short = 'f', long = "format", value_enum)]
    format: Option<OutputFormat>,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long = "out", value_name = "PATH")]
    out: Option<PathBuf>,

    /// Configuration file (defaults to the user config directory)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// List the attribute names and exit
    #[arg(long = "list-attributes")]
    list_attributes: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

/// Parse an attribute string "NAME=VALUE" into its parts
fn parse_attribute(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Expected format: NAME=VALUE (e.g., percentage=50), got: {}", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("Missing attribute name in: {}", s));
    }
    Ok((name.to_string(), value.to_string()))
}

fn main() {
    // Parse command line arguments
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info (normal verbosity)
    // Level 2: debug (detailed)
    // Level 3+: trace (every animation frame)
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    info!("Starting progress-arc v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli) {
        error!("{e:#}");
        eprintln!("progress-arc: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list_attributes {
        for attribute in Attribute::ALL {
            println!("{attribute}");
        }
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!("Ignoring user config: {e:#}");
            AppConfig::default()
        }),
    };
    let format = cli.format.unwrap_or(config.output_format);

    let mut host = SimulatedHost::new(config.frame_interval());
    let mut widget = ProgressArc::new();

    // Configured attributes first, command line attributes override them
    let changes: Vec<(&str, Option<&str>)> = config
        .attributes
        .iter()
        .map(|(name, value)| (name.as_str(), Some(value.as_str())))
        .chain(
            cli.attributes
                .iter()
                .map(|(name, value)| (name.as_str(), Some(value.as_str()))),
        )
        .collect();
    let warnings = widget.set_attributes(&changes, &mut host);
    if !warnings.is_empty() {
        info!("{} attribute warning(s)", warnings.len());
    }

    if let Some(from) = cli.from {
        widget.jump_to(from);
    }
    widget.connect(&mut host);

    let patches = host.run_until_idle(&mut widget);
    info!(
        "Animation settled at {} after {} frame(s)",
        widget.display().text,
        host.frames_delivered()
    );

    let output = match format {
        OutputFormat::Html => widget.render(),
        OutputFormat::Json => serde_json::to_string_pretty(&widget.render_state())?,
        OutputFormat::Frames => {
            let mut lines = String::new();
            for patch in &patches {
                lines.push_str(&serde_json::to_string(patch)?);
                lines.push('\n');
            }
            lines
        }
        OutputFormat::Png => return write_png(&widget, cli.out.as_ref()),
    };

    match &cli.out {
        Some(path) => std::fs::write(path, output)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

#[cfg(feature = "cairo")]
fn write_png(widget: &ProgressArc, out: Option<&PathBuf>) -> Result<()> {
    let Some(path) = out else {
        bail!("PNG output needs --out <PATH>");
    };
    progress_arc_render::render_png(&widget.render_state(), path)
}

#[cfg(not(feature = "cairo"))]
fn write_png(_widget: &ProgressArc, _out: Option<&PathBuf>) -> Result<()> {
    bail!("PNG output requires building with the `cairo` feature")
}
