use anyhow::Context;
use clap::Parser;
use legendterm::options::Options;
use legendterm::presenter::Presenter;
use std::path::PathBuf;

/// A scroll-driven terminal character showcase.
#[derive(Parser)]
#[command(name = "legendterm", version, about)]
struct Cli {
    /// Path to a YAML options file.
    #[arg(long, env = "LEGENDTERM_CONFIG")]
    config: Option<PathBuf>,

    /// Frame rate cap.
    #[arg(long)]
    fps: Option<u16>,

    /// Animation speed multiplier; 2.0 runs everything at half speed.
    #[arg(long)]
    time_scale: Option<f32>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();
    let mut options = Options::load(cli.config.as_deref()).context("loading options")?;
    if let Some(fps) = cli.fps {
        options.fps = fps;
    }
    if let Some(time_scale) = cli.time_scale {
        options.time_scale = time_scale;
    }

    Presenter::new(options).present().context("running showcase")?;
    Ok(())
}
