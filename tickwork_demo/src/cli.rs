use clap::Parser;
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Runs a small movement/health simulation on tickwork_ecs")]
pub struct Args {
    /// Number of frames to simulate
    #[arg(long, default_value_t = 20)]
    pub ticks: u64,

    /// Wall-clock milliseconds between frames
    #[arg(long, default_value_t = 100)]
    pub tick_ms: u64,

    /// Frame after which a reinforcement is spawned from a separate task
    #[arg(long, default_value_t = 10)]
    pub spawn_at: u64,

    /// Allow components on entities the world does not know about
    #[arg(long)]
    pub lenient: bool,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}
