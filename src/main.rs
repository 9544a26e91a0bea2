use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use cubewalk::{AppConfig, run};
use cubewalk_runtime::RebuildMode;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    Sync,
    Background,
}

impl From<Mode> for RebuildMode {
    fn from(m: Mode) -> Self {
        match m {
            Mode::Sync => RebuildMode::Sync,
            Mode::Background => RebuildMode::Background,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "cubewalk", about = "Headless voxel world demo")]
struct Args {
    /// TOML config file; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// World seed
    #[arg(long)]
    seed: Option<u64>,
    /// Number of scripted edit ticks
    #[arg(long)]
    ticks: Option<u32>,
    /// Rebuild mode
    #[arg(long, value_enum)]
    mode: Option<Mode>,
    /// Mesh worker threads for background mode (0 = all cores)
    #[arg(long)]
    workers: Option<usize>,
    /// Log filter, e.g. "debug" or "cubewalk_runtime=debug"
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut log_builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    if let Some(filter) = &args.log_level {
        log_builder.parse_filters(filter);
    }
    log_builder.init();

    let mut cfg = match &args.config {
        Some(path) => match AppConfig::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.world.seed = seed;
    }
    if let Some(ticks) = args.ticks {
        cfg.demo.ticks = ticks;
    }
    if let Some(mode) = args.mode {
        cfg.runtime.mode = mode.into();
    }
    if let Some(workers) = args.workers {
        cfg.runtime.workers = workers;
    }

    match run(&cfg) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
