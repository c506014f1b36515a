use std::time::Instant;

use log::{debug, info};
use rand::prelude::*;
use rand_distr::Uniform;
use rand_pcg::Pcg64;
use rayon::prelude::*;

use crate::params::Params;
use crate::physics::ChainState;
use crate::simulation::Simulation;

/// Initial block displacements: all zero when `equil` is set, otherwise
/// each block independently at `+rand` or `-rand`.
pub fn initial_positions<R: Rng>(params: &Params, rng: &mut R) -> Vec<f64> {
    if params.equil {
        return vec![0.0; params.num];
    }
    Uniform::from(0..2u8)
        .sample_iter(rng)
        .take(params.num)
        .map(|coin| if coin == 0 { params.rand } else { -params.rand })
        .collect()
}

/// Moments of every earthquake in one run started from `positions`.
pub fn run_from_positions(params: &Params, positions: Vec<f64>) -> Vec<f64> {
    Simulation::new(*params, positions).run()
}

/// Moments of every earthquake in one independently seeded run.
pub fn run_one_event(seed: u64, params: &Params) -> Vec<f64> {
    let mut rng = Pcg64::seed_from_u64(seed);
    let positions = initial_positions(params, &mut rng);
    run_from_positions(params, positions)
}

/// Run `n_events` independent chains in parallel. Event `k` is seeded with
/// `seed + k` and results are concatenated in event order.
pub fn run_distribution(params: &Params, seed: u64) -> Vec<f64> {
    let start = Instant::now();
    let per_event: Vec<Vec<f64>> = (0..params.n_events)
        .into_par_iter()
        .map(|k| {
            let moments = run_one_event(seed.wrapping_add(k as u64), params);
            if k % 10 == 0 {
                info!("event {}: {:.2?}", k, start.elapsed());
            }
            moments
        })
        .collect();

    let moments: Vec<f64> = per_event.into_iter().flatten().collect();
    info!("{} events produced {} earthquakes in {:.2?}",
          params.n_events, moments.len(), start.elapsed());
    moments
}

/// Log-moment magnitudes. Only positive moments have a magnitude.
pub fn magnitudes(moments: &[f64]) -> Vec<f64> {
    moments.iter()
        .filter_map(|&m| {
            if m > 0.0 {
                Some(m.ln())
            } else {
                debug!("dropping moment {} without a magnitude", m);
                None
            }
        })
        .collect()
}

/// Time series of one block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockTrace {
    pub position: Vec<(f64, f64)>,
    pub velocity: Vec<(f64, f64)>,
}

/// Full record of a single run
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub blocks: Vec<BlockTrace>,
    pub moments: Vec<f64>,
}

impl Trace {
    pub fn samples(&self) -> usize {
        self.blocks.first().map_or(0, |b| b.position.len())
    }
}

/// Single run from `positions`, recording every block at every committed step.
pub fn run_single_from_positions(params: &Params, positions: Vec<f64>) -> Trace {
    let mut blocks = vec![BlockTrace::default(); positions.len()];
    let mut sim = Simulation::new(*params, positions);
    let moments = sim.run_recording(|t, state: &ChainState| {
        for (i, block) in blocks.iter_mut().enumerate() {
            block.position.push((t, state.positions[i]));
            block.velocity.push((t, state.velocities[i]));
        }
    });
    Trace { blocks, moments }
}

pub fn run_single<R: Rng>(params: &Params, rng: &mut R) -> Trace {
    let start = Instant::now();
    let positions = initial_positions(params, rng);
    let trace = run_single_from_positions(params, positions);
    info!("single run finished: {} samples, {} earthquakes in {:.2?}",
          trace.samples(), trace.moments.len(), start.elapsed());
    trace
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equil_start_is_flat() {
        let params = Params { equil: true, num: 7, ..Params::default() };
        let mut rng = Pcg64::seed_from_u64(3);
        assert_eq!(initial_positions(&params, &mut rng), vec![0.0; 7]);
    }

    #[test]
    fn random_start_is_plus_or_minus_rand() {
        let params = Params { num: 200, ..Params::default() };
        let mut rng = Pcg64::seed_from_u64(11);
        let x = initial_positions(&params, &mut rng);
        assert_eq!(x.len(), 200);
        assert!(x.iter().all(|&xi| xi == 0.001 || xi == -0.001));
        assert!(x.iter().any(|&xi| xi > 0.0));
        assert!(x.iter().any(|&xi| xi < 0.0));
    }

    #[test]
    fn same_seed_same_start() {
        let params = Params::default();
        let a = initial_positions(&params, &mut Pcg64::seed_from_u64(5));
        let b = initial_positions(&params, &mut Pcg64::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn magnitudes_skip_non_positive() {
        let mags = magnitudes(&[1.0, 0.0, -2.0, 8.0]);
        assert_eq!(mags, vec![0.0, 8.0f64.ln()]);
    }
}
