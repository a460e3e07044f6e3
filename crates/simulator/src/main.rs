//! Chipclock desktop simulator.
//!
//! Runs the real menu engine against a terminal "panel", the host clock, a
//! host directory standing in for the SD card and a JSON settings file.
//! Type keys and press Enter (an empty line is A):
//!
//! ```text
//! w a s d   Up Left Down Right
//! j k       A B
//! m n       Start Select
//! t         touch pad
//! ```

mod board;
mod devices;
mod keys;
mod rtc;
mod settings;
mod terminal;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_time::Duration;
use menu::{Devices, IdleClock, MenuConfig, MenuTask};
use platform::storage_local::LocalFileStorage;
use platform::{AlarmFlags, Rtc, Settings, TickHandler};
use static_cell::StaticCell;
use tracing_subscriber::EnvFilter;

use crate::board::SimBoard;
use crate::devices::{SimNetwork, SimPlayer, SimSensors, SimZones};
use crate::rtc::{HostRtc, HostTimeSync};
use crate::settings::JsonSettings;
use crate::terminal::TerminalDisplay;

type SimClock = IdleClock<CriticalSectionRawMutex, TerminalDisplay<std::io::Stdout>>;

static CLOCK: StaticCell<SimClock> = StaticCell::new();

#[derive(Parser)]
#[command(name = "chipclock-sim")]
#[command(about = "Chipclock front panel on a terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Host directory mounted as the SD card
    #[arg(long, env = "MUSIC_PATH", default_value = ".")]
    music_dir: PathBuf,
    /// Settings file, created on the first change
    #[arg(long, default_value = "chipclock-settings.json")]
    settings: PathBuf,
    /// Seconds without a key press before a menu session ends
    #[arg(long, default_value_t = 30)]
    timeout: u64,
    /// Seconds a simulated track plays before it ends on its own
    #[arg(long, default_value_t = 20)]
    track_secs: u64,
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout is the panel.
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let settings = JsonSettings::open(&cli.settings)
        .with_context(|| format!("loading settings from {}", cli.settings.display()))?;
    let twenty_four = settings.time_format().unwrap_or(false);
    let clock: &'static SimClock = CLOCK.init(IdleClock::new(TerminalDisplay::new(std::io::stdout()), twenty_four));

    let rtc = HostRtc::new();
    tokio::spawn(minute_ticks(clock, rtc.clone()));

    let devices = Devices::<SimBoard> {
        storage: LocalFileStorage::new(&cli.music_dir),
        rtc,
        time_sync: HostTimeSync::default(),
        settings,
        player: SimPlayer::new(Duration::from_secs(cli.track_secs)),
        network: SimNetwork::default(),
        zones: SimZones,
        sensors: SimSensors::default(),
    };
    let config = MenuConfig::new().with_timeout(Duration::from_secs(cli.timeout));
    let (input, mut stdin_closed) = keys::spawn_reader();

    let mut task = MenuTask::<SimBoard, CriticalSectionRawMutex>::new(input, clock, devices, config);
    task.load_settings();
    tracing::info!(music_dir = %cli.music_dir.display(), "{}", platform::config::dev_banner());

    task.show_idle();
    loop {
        tokio::select! {
            () = task.idle_cycle() => {}
            _ = &mut stdin_closed => break,
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    tracing::info!("shutting down");
    Ok(())
}

/// The RTC tick: redraw the face at every minute boundary.
async fn minute_ticks(clock: &'static SimClock, mut rtc: HostRtc) {
    loop {
        tokio::time::sleep(rtc::until_next_minute()).await;
        clock.on_tick(AlarmFlags::default(), rtc.now().ok());
    }
}
