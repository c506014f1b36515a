use anyhow::{Context, Result};
use log::{info, warn};
use rand::SeedableRng;
use rand_pcg::Pcg64;

use bk_quake::config::{Config, ProgramMode};
use bk_quake::driver;
use bk_quake::output;
use bk_quake::stats::Histogram;

fn main() -> Result<()> {
    env_logger::init();

    // parse command line options
    let config = Config::new()?;
    let params = &config.params;

    if let Some(path) = &config.save_config {
        confy::store_path(path, *params)
            .with_context(|| format!("storing parameters to {}", path.display()))?;
        info!("parameters written to {}", path.display());
    }

    if config.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(config.threads)
            .build_global()
            .context("configuring worker threads")?;
    }

    let suffix = config.format_file_suffix();

    match config.mode {
        ProgramMode::Distribution => {
            let moments = driver::run_distribution(params, config.seed);
            let magnitudes = driver::magnitudes(&moments);
            if magnitudes.len() < moments.len() {
                warn!("{} earthquakes had no positive moment", moments.len() - magnitudes.len());
            }

            output::print_histogram(&Histogram::from_magnitudes(&magnitudes));

            let path = format!("{}magnitudes_{}.dat", config.prefix, suffix);
            output::dump_magnitudes(&path, &magnitudes)
                .with_context(|| format!("writing {}", path))?;
            info!("magnitudes written to {}", path);
        },
        ProgramMode::Single => {
            let mut rng = Pcg64::seed_from_u64(config.seed);
            let trace = driver::run_single(params, &mut rng);

            // echo one block to the terminal
            match trace.blocks.get(config.block) {
                Some(block) => {
                    for (&(t, x), &(_, v)) in block.position.iter().zip(&block.velocity) {
                        println!("{} {} {}", t, x, v);
                    }
                },
                None => warn!("block {} outside chain of {}", config.block, params.num),
            }

            let path = format!("{}trace_{}.dat", config.prefix, suffix);
            output::dump_trace(&path, &trace)
                .with_context(|| format!("writing {}", path))?;
            info!("{} earthquakes, trace written to {}", trace.moments.len(), path);
        },
    }

    Ok(())
}
