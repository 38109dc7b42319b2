//! irblast: detect an IR transmitter and send one pattern
//!
//! Runs the detection chain against a simulated device, builds the
//! matching transmitter, waits for it to become ready and sends a pulse
//! pattern through it.
//!
//! # Usage
//!
//! ```text
//! irblast [OPTIONS] [PATTERN]...
//!
//!   --config <PATH>       Settings file [default: $XDG_CONFIG_HOME/irblast/settings.json]
//!   --gen-config          Print default settings (or write them to --config)
//!   --profile <PROFILE>   Simulated device: native, obsolete-samsung, htc, le-coolpad, le, lg, bare
//!   --frequency <HZ>      Carrier frequency [default: 38000]
//!   --cycles              PATTERN is in carrier cycles rather than microseconds
//!   --include-lg          Probe for the LG IRBlaster SDK as well
//!   --no-liveness-trial   Skip the native trial transmission during detection
//!   --timeout-ms <MS>     Readiness timeout
//! ```

mod settings;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use ir_protocol::{PatternType, PulsePattern};
use ir_sim::{DeviceProfile, SimulatedDevice};
use ir_transmit::{supports_frequency, transmitter_for_device, SharedTransmitter};
use settings::Settings;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Simulated device presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Profile {
    Native,
    ObsoleteSamsung,
    Htc,
    LeCoolpad,
    Le,
    Lg,
    Bare,
}

impl Profile {
    /// Device profile with callbacks delivered in the background
    fn device_profile(self) -> DeviceProfile {
        let profile = match self {
            Profile::Native => DeviceProfile::native(),
            Profile::ObsoleteSamsung => DeviceProfile::obsolete_samsung(),
            Profile::Htc => DeviceProfile::htc(),
            Profile::LeCoolpad => DeviceProfile::le_coolpad(),
            Profile::Le => DeviceProfile::le(),
            Profile::Lg => DeviceProfile::lg(),
            Profile::Bare => DeviceProfile::bare(),
        };
        profile.with_auto_callbacks()
    }
}

/// Detect an IR transmitter and send a pattern through it
#[derive(Debug, Parser)]
#[command(name = "irblast", version)]
struct Cli {
    /// Settings file to load instead of the default location
    #[arg(long, env = "IRBLAST_CONFIG")]
    config: Option<PathBuf>,

    /// Print the default settings as JSON, or write them to --config
    #[arg(long)]
    gen_config: bool,

    /// Simulated device preset, overriding the settings file
    #[arg(long, value_enum)]
    profile: Option<Profile>,

    /// Carrier frequency in Hz
    #[arg(long, default_value_t = 38_000)]
    frequency: u32,

    /// Treat PATTERN as carrier cycles instead of microseconds
    #[arg(long)]
    cycles: bool,

    /// Probe for the LG IRBlaster SDK as well
    #[arg(long)]
    include_lg: bool,

    /// Skip the native trial transmission during detection
    #[arg(long)]
    no_liveness_trial: bool,

    /// Readiness timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Alternating on/off durations, space or comma separated
    #[arg(value_delimiter = ',', default_values_t = [100u32, 100, 100, 100])]
    pattern: Vec<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.gen_config {
        let defaults = Settings::default();
        match &cli.config {
            Some(path) => {
                defaults.save(path)?;
                println!("Wrote default settings to {}", path.display());
            }
            None => println!("{}", defaults.to_json()?),
        }
        return Ok(());
    }

    let mut settings = Settings::load(cli.config.as_deref());

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting irblast");

    if cli.include_lg {
        settings.detection.include_lg = true;
    }
    if cli.no_liveness_trial {
        settings.detection.liveness_trial = false;
    }
    if let Some(profile) = cli.profile {
        settings.device = profile.device_profile();
    }
    let timeout = Duration::from_millis(cli.timeout_ms.unwrap_or(settings.ready_timeout_ms));

    let pattern_type = if cli.cycles {
        PatternType::Cycles
    } else {
        PatternType::Intervals
    };
    let pattern = PulsePattern::new(pattern_type, cli.frequency, cli.pattern)
        .context("Invalid pulse pattern")?;

    let device = SimulatedDevice::new(settings.device.clone());
    info!("Simulated device brand {:?}", device.profile().brand);

    if !supports_frequency(&device, pattern.frequency()) {
        warn!("{} Hz is outside the emitter's carrier ranges", pattern.frequency());
    }

    let Some(transmitter) =
        transmitter_for_device(device.context(), &settings.detection, &settings.transmitter)?
    else {
        println!("No IR transmitter found");
        return Ok(());
    };

    let variant = transmitter.variant();
    let shared = SharedTransmitter::new(transmitter);
    device.clear_calls();

    shared.start().await?;
    if !shared.wait_ready(timeout).await {
        shared.stop().await?;
        anyhow::bail!("{} transmitter not ready after {:?}", variant, timeout);
    }

    shared.transmit_pattern(pattern).await?;
    shared.stop().await?;
    // joins the HTC worker so queued frames are flushed
    drop(shared);

    println!("Transmitted via {}", variant);
    for call in device.calls() {
        println!("  {:?}", call);
    }
    Ok(())
}
