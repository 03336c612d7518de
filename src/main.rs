//! castplay CLI: play an asciicast v2 recording in the current terminal.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use castplay::{Options, OsTerminal, Player, StreamFrameSource, Terminal};

#[derive(Debug, Parser)]
#[command(name = "castplay", version, about = "Play asciicast v2 terminal recordings")]
struct Cli {
    /// Path to an asciicast v2 file
    file: PathBuf,

    /// Speed adjustment: >1 speeds playback up, <1 slows it down
    #[arg(short, long, default_value_t = 1.0)]
    speed: f64,

    /// Longest wait between frames, in seconds (0 disables the cap)
    #[arg(short, long, default_value_t = 2.0)]
    max_wait: f64,

    /// Play even if the recording is larger than this terminal
    #[arg(long)]
    ignore_size_check: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = StreamFrameSource::open(&cli.file)
        .with_context(|| format!("open recording {:?}", cli.file))?;

    let terminal = Arc::new(OsTerminal::new()?);

    let mut options = Options::default().speed(cli.speed);
    if cli.max_wait > 0.0 {
        options = options.max_wait(Duration::from_secs_f64(cli.max_wait));
    }
    if cli.ignore_size_check {
        options = options.ignore_size_check();
    }

    let sink: Arc<dyn Terminal> = terminal.clone();
    let player = Player::new(source, sink, options)?;

    let result = player.play();

    // Stops the key-reading loop; the terminal itself stays open.
    let _ = terminal.close();

    result.map_err(Into::into)
}
