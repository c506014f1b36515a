use serde::{Deserialize, Serialize};

use crate::error::ParamError;

/// Which velocities feed the moment sum on a committed step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentRule {
    /// velocities committed before this step
    PreStep,
    /// velocities produced by this step
    PostStep,
}

impl Default for MomentRule {
    fn default() -> Self {
        MomentRule::PreStep
    }
}

/// Physical and numerical constants of a spring-block chain.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// number of blocks
    pub num: usize,
    pub mass: f64,
    /// coupling spring stiffness between neighbouring blocks
    pub kc: f64,
    /// leaf spring stiffness to the driver plate
    pub kp: f64,
    /// static friction threshold
    pub f0: f64,
    /// driver plate velocity
    pub v0: f64,
    pub dt_coarse: f64,
    pub dt_fine: f64,
    pub t_final: f64,
    /// independent events in distribution mode
    pub n_events: usize,
    /// magnitude of the initial +/- perturbation
    pub rand: f64,
    /// start every block at zero instead of +/- rand
    pub equil: bool,
    pub moment_rule: MomentRule,
}

impl Default for Params {
    fn default() -> Self {
        Params {
            num: 25,
            mass: 1.0,
            kc: 250.0,
            kp: 40.0,
            f0: 50.0,
            v0: 0.01,
            dt_coarse: 0.03,
            dt_fine: 0.003,
            t_final: 1000.0,
            n_events: 10,
            rand: 0.001,
            equil: false,
            moment_rule: MomentRule::default(),
        }
    }
}

impl Params {

    pub fn validate(&self) -> Result<(), ParamError> {
        if self.num == 0 {
            return Err(ParamError::NoBlocks);
        }
        if !(self.mass > 0.0) {
            return Err(ParamError::NonPositiveMass(self.mass));
        }
        if !(self.dt_coarse > 0.0) || !(self.dt_fine > 0.0) {
            return Err(ParamError::NonPositiveTimestep {
                dt_coarse: self.dt_coarse,
                dt_fine: self.dt_fine,
            });
        }
        if self.dt_fine >= self.dt_coarse {
            return Err(ParamError::FineNotFiner {
                dt_coarse: self.dt_coarse,
                dt_fine: self.dt_fine,
            });
        }
        if !(self.t_final > 0.0) {
            return Err(ParamError::NonPositiveFinalTime(self.t_final));
        }
        for &(name, value) in [("f0", self.f0), ("rand", self.rand)].iter() {
            if value < 0.0 {
                return Err(ParamError::Negative { name, value });
            }
        }
        Ok(())
    }

    /// Simulated time at which a lone block pinned at `x0` first exceeds
    /// the static threshold under the driver spring alone.
    pub fn breakaway_time(&self, x0: f64) -> f64 {
        (self.f0 / self.kp + x0) / self.v0
    }
}
