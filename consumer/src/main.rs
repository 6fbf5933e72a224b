use std::error::Error;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use stream::{Consumer, ConsumerConfig, CsvSink, LogSink};

/// Receive IMU frames from any number of publishers and track the orientation of every sender.
#[derive(Parser, Debug)]
#[command(name = "consumer")]
struct Args {
    /// Path of the datagram socket to bind
    #[arg(long)]
    socket_path: PathBuf,

    /// Seconds to wait for a missing frame before giving up on it
    #[arg(long, default_value = "0.1")]
    stall_timeout: f64,

    /// Weight of the gyroscope estimate in the fusion filter
    #[arg(long, default_value_t = processing::DEFAULT_ALPHA)]
    alpha: f32,

    /// Write every orientation update to this CSV file instead of the log
    #[arg(long)]
    record: Option<PathBuf>,

    /// Log level, RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
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

    let mut config = ConsumerConfig::new(&args.socket_path);
    config.stall_timeout = Duration::try_from_secs_f64(args.stall_timeout)?;
    config.alpha = args.alpha;

    match &args.record {
        Some(path) => {
            let mut consumer = Consumer::bind(config, CsvSink::create(path)?)?;
            consumer.run(&running);
            consumer.sink_mut().flush()?;
            log::info!("orientations recorded to {}", path.display());
        }
        None => Consumer::bind(config, LogSink)?.run(&running),
    }

    Ok(())
}
