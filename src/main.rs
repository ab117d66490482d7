use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use veld_world::{World, WorldConfig, load_config_from_path};

mod build;

/// Headless terrain bake: generates the chunk grid, meshes every exposed
/// face, and reports the batches a renderer would upload.
#[derive(Parser, Debug)]
#[command(name = "veld", about = "Deterministic voxel terrain generator and surface mesher")]
struct Args {
    /// Worldgen TOML config; built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    /// World seed.
    #[arg(long, default_value_t = 1337)]
    seed: i32,
    /// Override the world extent in chunks per side.
    #[arg(long)]
    world_size: Option<usize>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => match load_config_from_path(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => WorldConfig::default(),
    };
    if let Some(n) = args.world_size {
        cfg.size.world_size = n;
    }

    let world = match World::new(cfg, args.seed) {
        Ok(world) => world,
        Err(e) => {
            log::error!("invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let out = build::build_world(&world);

    let mut summary: Vec<(String, usize, usize)> = out
        .batches
        .by_material()
        .map(|(material, runs)| {
            let instances = runs.iter().map(|b| b.len()).sum();
            (format!("{material:?}"), instances, runs.len())
        })
        .collect();
    summary.sort();
    for (material, instances, batch_count) in summary {
        log::info!("{material}: {instances} instances in {batch_count} batches");
    }
    ExitCode::SUCCESS
}
