use log::{debug, trace};

use crate::params::{MomentRule, Params};
use crate::physics::ChainState;

/// The two timesteps the integrator switches between
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Timestep {
    Coarse,
    Fine,
}

/// Where the integrator stands with respect to an earthquake.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StepMode {
    /// every block stuck, coarse stepping
    CoarseStep,
    /// backed off after a block started to slip, waiting for motion
    FineStepAfterTrigger,
    /// at least one block sliding
    FineStepDuringEvent,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StepKind {
    /// candidate state accepted, `moment_increment` added to the moment
    Committed { moment_increment: f64 },
    /// a block started moving under the coarse step; nothing committed
    /// and time moved back by one coarse step
    BackStep,
}

/// What a single call to [`Simulation::advance`] did.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StepReport {
    /// simulated time the forces were evaluated at
    pub time: f64,
    /// timestep in effect while evaluating
    pub dt: f64,
    pub kind: StepKind,
    /// moment of an earthquake that ended on this step
    pub event: Option<f64>,
}

pub struct Simulation {
    pub params: Params,
    pub state: ChainState,
    pub t: f64,
    timestep: Timestep,
    awaiting_slip: bool,
    moment: f64,
}

impl Simulation {

    // start a chain at rest from the given displacements
    pub fn new(params: Params, positions: Vec<f64>) -> Simulation {
        Simulation {
            params,
            state: ChainState::at_rest(positions),
            t: 0.0,
            timestep: Timestep::Coarse,
            awaiting_slip: false,
            moment: 0.0,
        }
    }

    pub fn timestep(&self) -> Timestep {
        self.timestep
    }

    pub fn dt(&self) -> f64 {
        match self.timestep {
            Timestep::Coarse => self.params.dt_coarse,
            Timestep::Fine => self.params.dt_fine,
        }
    }

    pub fn mode(&self) -> StepMode {
        match (self.timestep, self.awaiting_slip) {
            (Timestep::Coarse, _) => StepMode::CoarseStep,
            (Timestep::Fine, true) => StepMode::FineStepAfterTrigger,
            (Timestep::Fine, false) => StepMode::FineStepDuringEvent,
        }
    }

    /// moment accumulated by the earthquake in progress
    pub fn moment(&self) -> f64 {
        self.moment
    }

    pub fn is_finished(&self) -> bool {
        self.t >= self.params.t_final
    }

    /// Attempt one integration step of the whole chain.
    pub fn advance(&mut self) -> StepReport {
        let time = self.t;
        let dt = self.dt();
        let mass = self.params.mass;
        let n = self.state.len();

        let mut next = self.state.clone();
        let mut all_zero = true;
        let mut back_step = false;

        for i in 0..n {
            let f_i = self.state.net_force(i, &self.params, time);
            let v_i = self.state.next_velocity(i, f_i, dt, mass);

            if v_i != 0.0 {
                if self.timestep == Timestep::Coarse {
                    // redo the last interval with the fine step
                    self.t -= dt;
                    self.timestep = Timestep::Fine;
                    back_step = true;
                    all_zero = false;
                    trace!("block {} slipped at t={}, backing off", i, time);
                    break;
                }
                self.awaiting_slip = false;
                all_zero = false;
            }

            next.forces[i] = f_i;
            next.velocities[i] = v_i;
            next.positions[i] = self.state.next_position(i, v_i, dt);
        }

        let kind = if back_step {
            self.awaiting_slip = true;
            StepKind::BackStep
        } else {
            let moment_increment = match self.params.moment_rule {
                MomentRule::PreStep => self.state.total_velocity() * dt,
                MomentRule::PostStep => next.total_velocity() * dt,
            };
            self.state = next;
            self.moment += moment_increment;
            StepKind::Committed { moment_increment }
        };

        let mut event = None;
        if all_zero && !self.awaiting_slip {
            if self.moment != 0.0 {
                debug!("earthquake ended at t={} with moment {}", time, self.moment);
                event = Some(self.moment);
                self.moment = 0.0;
            }
            self.timestep = Timestep::Coarse;
        }

        self.t += self.dt();

        StepReport { time, dt, kind, event }
    }

    /// Run until the time budget is spent, collecting earthquake moments.
    pub fn run(&mut self) -> Vec<f64> {
        let mut moments = Vec::new();
        while !self.is_finished() {
            if let Some(moment) = self.advance().event {
                moments.push(moment);
            }
        }
        moments
    }

    /// Like [`Simulation::run`] but hands the pre-commit state of every
    /// committed step to `record`.
    pub fn run_recording<F>(&mut self, mut record: F) -> Vec<f64>
        where F: FnMut(f64, &ChainState) {
        let mut moments = Vec::new();
        while !self.is_finished() {
            let before = self.state.clone();
            let report = self.advance();
            if let StepKind::Committed { .. } = report.kind {
                record(report.time, &before);
            }
            if let Some(moment) = report.event {
                moments.push(moment);
            }
        }
        moments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lone_block() -> Params {
        Params { num: 1, t_final: 200.0, ..Params::default() }
    }

    #[test]
    fn starts_coarse_at_rest() {
        let sim = Simulation::new(lone_block(), vec![0.0]);
        assert_eq!(sim.mode(), StepMode::CoarseStep);
        assert_eq!(sim.dt(), 0.03);
        assert_eq!(sim.moment(), 0.0);
    }

    #[test]
    fn resting_coarse_step_commits_nothing_moving() {
        let mut sim = Simulation::new(lone_block(), vec![0.0]);
        let report = sim.advance();
        assert_eq!(report.kind, StepKind::Committed { moment_increment: 0.0 });
        assert_eq!(report.event, None);
        assert_eq!(sim.state.positions, vec![0.0]);
        assert!((sim.t - 0.03).abs() < 1e-15);
    }

    #[test]
    fn back_step_switches_to_fine() {
        // leaf spring already beyond the static threshold
        let params = Params { v0: 0.0, ..lone_block() };
        let mut sim = Simulation::new(params, vec![-2.0]);
        let report = sim.advance();
        assert_eq!(report.kind, StepKind::BackStep);
        assert_eq!(sim.mode(), StepMode::FineStepAfterTrigger);
        assert_eq!(sim.state.velocities, vec![0.0]);
        assert!((sim.t - (0.0 - 0.03 + 0.003)).abs() < 1e-15);

        let report = sim.advance();
        assert_eq!(report.dt, 0.003);
        assert!(matches!(report.kind, StepKind::Committed { .. }));
        assert_eq!(sim.mode(), StepMode::FineStepDuringEvent);
        assert!(sim.state.velocities[0] > 0.0);
    }

    #[test]
    fn pre_step_rule_lags_one_step() {
        let params = Params { v0: 0.0, ..lone_block() };
        let mut sim = Simulation::new(params, vec![-2.0]);
        sim.advance();
        // first fine step: previous velocities are all zero
        let report = sim.advance();
        assert_eq!(report.kind, StepKind::Committed { moment_increment: 0.0 });
        let v = sim.state.velocities[0];
        let report = sim.advance();
        assert_eq!(report.kind, StepKind::Committed { moment_increment: v * 0.003 });
    }

    #[test]
    fn post_step_rule_uses_new_velocities() {
        let params = Params { v0: 0.0, moment_rule: MomentRule::PostStep, ..lone_block() };
        let mut sim = Simulation::new(params, vec![-2.0]);
        sim.advance();
        let report = sim.advance();
        let v = sim.state.velocities[0];
        assert!(v > 0.0);
        assert_eq!(report.kind, StepKind::Committed { moment_increment: v * 0.003 });
    }

    #[test]
    fn barely_released_block_slips_once_and_returns_to_coarse() {
        // just past f0 / kp = 1.25, comes to rest well inside the static limit
        let params = Params { v0: 0.0, ..lone_block() };
        let mut sim = Simulation::new(params, vec![-1.3]);
        let moments = sim.run();
        assert_eq!(moments.len(), 1);
        assert!(moments[0] > 0.0);
        assert_eq!(sim.mode(), StepMode::CoarseStep);
        assert_eq!(sim.state.velocities, vec![0.0]);
        let x = sim.state.positions[0];
        assert!(x > -1.3);
        assert!((params.kp * x).abs() <= params.f0);
    }

    #[test]
    fn far_released_block_rings_back_and_forth() {
        // overshoots the static limit on each side before it sticks
        let params = Params { v0: 0.0, ..lone_block() };
        let mut sim = Simulation::new(params, vec![-2.0]);
        let moments = sim.run();
        assert_eq!(moments.len(), 3);
        assert!(moments[0] > 0.0);
        assert!(moments[1] < 0.0);
        assert!(moments[2] > 0.0);
        assert_eq!(sim.mode(), StepMode::CoarseStep);
        assert_eq!(sim.state.velocities, vec![0.0]);
        assert!((params.kp * sim.state.positions[0]).abs() <= params.f0);
    }
}
