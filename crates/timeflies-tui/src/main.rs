//! timeflies TUI entry point.
//!
//! # Usage
//!
//! ```bash
//! # Letters of the default phrase trail the mouse
//! timeflies-tui
//!
//! # Custom text, slower trail, laggy echo peer, logs to a file
//! timeflies-tui --text "hello" --stagger-ms 250 --echo-latency-ms 80 --log-file timeflies.log
//! ```

use std::{fs::File, sync::Mutex, time::Duration};

use clap::Parser;
use timeflies_app::{Runtime, RuntimeConfig, peer::EchoConfig, view::OverlayLayout};
use timeflies_core::SystemEnv;
use timeflies_tui::TerminalDriver;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Letters that trail the mouse, locally or through an echo peer
#[derive(Parser, Debug)]
#[command(name = "timeflies-tui")]
#[command(about = "Terminal letter-tracking demo with an in-process echo peer")]
#[command(version)]
struct Args {
    /// Initial display string
    #[arg(short, long, default_value = "time flies like an arrow")]
    text: String,

    /// Delay between consecutive letters, in milliseconds
    #[arg(long, default_value_t = 100)]
    stagger_ms: u64,

    /// Echo peer latency, in milliseconds
    #[arg(long, default_value_t = 0)]
    echo_latency_ms: u64,

    /// Horizontal distance between letters, in view units (one cell is 10)
    #[arg(long, default_value_t = 10)]
    letter_spacing: u32,

    /// Horizontal offset of the first letter from the pointer, in view units
    #[arg(long, default_value_t = 15)]
    offset_x: u32,

    /// Write logs to this file (the terminal is owned by the UI)
    #[arg(long)]
    log_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            stagger: Duration::from_millis(self.stagger_ms),
            echo: EchoConfig { latency: Duration::from_millis(self.echo_latency_ms) },
            layout: OverlayLayout { letter_spacing: self.letter_spacing, offset_x: self.offset_x },
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
            .with(filter)
            .init();
    }

    tracing::info!(text = %args.text, "timeflies starting");

    let driver = TerminalDriver::new()?;
    let runtime = Runtime::new(driver, SystemEnv::new(), args.text.clone(), args.runtime_config());

    Ok(runtime.run().await?)
}
