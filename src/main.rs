//! LabLights — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │   SysfsPins (PinPort)  LogEventSink  MonotonicClock      │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │   ┌──────────────────────────────────────────────────┐   │
//! │   │  Controller: debounce · match · apply            │   │
//! │   └──────────────────────────────────────────────────┘   │
//! │                                                          │
//! │   PollLoop (fixed-interval ticker)                       │
//! └──────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use lablights::adapters::log_sink::LogEventSink;
use lablights::adapters::sysfs::{DEFAULT_GPIO_ROOT, SysfsPins};
use lablights::adapters::time::MonotonicClock;
use lablights::app::service::Controller;
use lablights::config::{Config, ValidationWarning};
use lablights::install::{CONFIG_PATH, install};
use lablights::scheduler::PollLoop;

#[derive(Parser)]
#[command(
    name = "lablights",
    about = "Rule-driven switch and light controller for GPIO headers",
    version,
    propagate_version = true
)]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, global = true, env = "LABLIGHTS_CONFIG", default_value = CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the controller until a hardware fault occurs
    Run {
        /// sysfs GPIO directory
        #[arg(long, default_value = DEFAULT_GPIO_ROOT)]
        gpio_root: PathBuf,
    },

    /// Load and validate the configuration, then exit
    Check,

    /// Install the binary, systemd unit and default configuration
    Install {
        /// Install prefix (staging root), default is /
        #[arg(short, long, default_value = "/")]
        prefix: PathBuf,

        /// Overwrite the configuration with the defaults even if it exists
        #[arg(long)]
        reset: bool,
    },
}

fn load(path: &Path) -> Result<Config> {
    let (config, warnings) =
        Config::load(path).with_context(|| format!("load config {}", path.display()))?;
    report(&warnings);
    Ok(config)
}

fn report(warnings: &[ValidationWarning]) {
    for w in warnings {
        warn!("{}", w);
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { gpio_root } => {
            let config = load(&cli.config)?;
            info!("LabLights v{}", env!("CARGO_PKG_VERSION"));

            let mut controller = Controller::new(&config, SysfsPins::new(gpio_root));
            let mut sink = LogEventSink::new();
            let mut poll = PollLoop::new(MonotonicClock::new(), config.poll_interval());

            poll.start(&mut controller, &mut sink)
                .context("initialise pins")?;

            // Only returns on a fault; every fault is fatal for the process.
            let Err(fault) = poll.run(&mut controller, &mut sink);
            bail!("{:?} fault: {}", fault.fault(), fault);
        }
        Commands::Check => {
            let config = load(&cli.config)?;
            println!(
                "{}: {} switches, {} lights, {} actions, debounce {}ms, poll {}ms",
                cli.config.display(),
                config.switches.len(),
                config.lights.len(),
                config.actions.len(),
                config.debounce_ms,
                config.poll_interval_ms,
            );
            Ok(())
        }
        Commands::Install { prefix, reset } => {
            let exe = std::env::current_exe().context("locate running executable")?;
            let out = install(&exe, &prefix, reset).context("install")?;
            println!("installed {}", out.binary.display());
            println!("installed {}", out.unit.display());
            if out.config_written {
                println!("wrote {}", out.config.display());
            }
            Ok(())
        }
    }
}
