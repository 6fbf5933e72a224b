use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use stream::*;

/// Send IMU payloads to a consumer at a fixed rate.
#[derive(Parser, Debug)]
#[command(name = "publisher")]
struct Args {
    /// Path of the consumer's datagram socket
    #[arg(long)]
    socket_path: PathBuf,

    /// Frames per second
    #[arg(long, default_value_t = DEFAULT_FREQUENCY_HZ)]
    frequency_hz: u32,

    /// Id stamped on every frame
    #[arg(long, default_value_t = DEFAULT_SENDER_ID)]
    sender_id: u8,

    /// Where the payloads come from
    #[arg(long, value_enum, default_value_t = SourceKind::Generator)]
    source: SourceKind,

    /// CSV recording to replay, required for `--source replay`
    #[arg(long, required_if_eq("source", "replay"))]
    replay: Option<PathBuf>,

    /// Noise seed, 0 picks a random one
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Stop after this many frames
    #[arg(long)]
    count: Option<u64>,

    /// Log level, RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum SourceKind {
    /// Random accelerometer direction and noise
    Generator,
    /// Smoothly rotating device with consistent readings
    Simulator,
    /// Payloads from a CSV recording, in a loop
    Replay,
}

fn main() {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .parse_default_env()
        .init();

    if let Err(err) = run(&args) {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    let mut config = PublisherConfig::new(&args.socket_path);
    config.frequency_hz = args.frequency_hz;
    config.sender_id = args.sender_id;
    config.count = args.count;
    config.validate()?;

    let time_step = 1.0 / args.frequency_hz as f32;
    let sent = match args.source {
        SourceKind::Generator => publish(config, ImuGenerator::new(time_step, args.seed), &running)?,
        SourceKind::Simulator => publish(
            config,
            ImuSimulator::new(time_step, SimulatorSettings::default(), args.seed),
            &running,
        )?,
        SourceKind::Replay => {
            let path = args.replay.as_ref().ok_or("--replay is required for the replay source")?;
            let source = ReplaySource::load(path)?;
            log::info!("replaying {} payloads from {}", source.len(), path.display());
            publish(config, source, &running)?
        }
    };

    log::info!("sent {} frames", sent);
    Ok(())
}

fn publish<D: DataSource>(config: PublisherConfig, source: D, running: &AtomicBool) -> Result<u64, StreamError> {
    Ok(Publisher::new(config, source)?.run(running))
}
