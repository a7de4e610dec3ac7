//! ASCII torus - a ray-marched spinning donut in the terminal
//!
//! Usage:
//!   ascii_torus                    - Animate until interrupted
//!   ascii_torus --frames 90        - Animate 90 frames, then exit
//!   ascii_torus --debug            - Render 10 frames to ./debug/frame_XXX.txt files
//!   ascii_torus --config torus.yaml

use anyhow::Context;
use ascii_torus::animation::{Animator, SystemClock};
use ascii_torus::renderer::FrameRenderer;
use ascii_torus::scene::SceneParameters;
use ascii_torus::terminal::TerminalDisplay;
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "ascii_torus")]
#[command(version = "0.1.0")]
#[command(about = "Ray-marched rotating torus rendered as ASCII art")]
struct Cli {
    /// YAML file overriding scene parameters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Stop after this many frames instead of running until interrupted
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    frames: Option<u64>,

    /// Write frames to ./debug/ instead of animating in the terminal
    #[arg(short, long)]
    debug: bool,
}

const DEBUG_FRAMES: u64 = 10;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never land inside a frame on stdout
    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    // No --config means the built-in scene and no file access at all
    let params = match &cli.config {
        Some(path) => SceneParameters::from_file(path)
            .with_context(|| format!("Error loading configuration from {:?}", path))?,
        None => SceneParameters::default(),
    };

    tracing::info!(?params, "Scene parameters");

    if cli.debug {
        return run_debug_mode(&params, cli.frames.unwrap_or(DEBUG_FRAMES));
    }

    let mut animator = Animator::new(params, TerminalDisplay::stdout(), SystemClock::new());

    // Without --frames the loop only ends when the process is interrupted
    let limit = cli.frames;

    match animator.run(|stats| limit.map_or(true, |n| stats.index + 1 < n)) {
        Ok(frames) => {
            tracing::info!(frames, "Animation finished");
            Ok(())
        }
        // Reader went away (e.g. piped into head): not an error
        Err(e) if e.is_broken_pipe() => {
            tracing::info!(frames = animator.frames(), "Output closed");
            Ok(())
        }
        Err(e) => Err(e).context("Terminal output failed"),
    }
}

/// Debug mode: render frames at evenly spaced animation times into ./debug/
fn run_debug_mode(params: &SceneParameters, count: u64) -> anyhow::Result<()> {
    let debug_dir = Path::new("debug");
    fs::create_dir_all(debug_dir).context("Failed to create debug directory")?;

    let renderer = FrameRenderer::new(params);
    // Space the frames as the live loop would at the target frame rate
    let step = params.frame_interval().as_secs_f64();

    for index in 0..count {
        let angle = params.rotation_angle(index as f64 * step);
        let frame = renderer.render(angle);

        let filename = debug_dir.join(format!("frame_{:03}.txt", index));
        fs::write(&filename, frame.to_string())
            .with_context(|| format!("Failed to write {}", filename.display()))?;
        println!("Wrote {} (angle {:.3}, {} cells lit)", filename.display(), angle, frame.coverage());
    }

    println!("\nDebug frames saved to ./debug/");
    println!("View with: cat debug/frame_000.txt");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["ascii_torus"]);
        assert!(cli.config.is_none());
        assert!(cli.frames.is_none());
        assert!(!cli.debug);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["ascii_torus", "--frames", "3", "--debug", "--log-level", "debug"]);
        assert_eq!(cli.frames, Some(3));
        assert!(cli.debug);
        assert_eq!(cli.log_level.map(|l| l.to_string()), Some("debug".to_string()));
    }

    #[test]
    fn test_cli_verifies() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
