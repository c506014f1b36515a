//! Force law and per-block update rules of the spring-block chain.

use crate::params::Params;

/// Sign of `x` with `sign(0) == 0`, unlike `f64::signum`.
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Dry friction on a block given the force it resists and its velocity.
///
/// A block at rest is pinned while the applied force stays within `f0`,
/// otherwise friction saturates at `f0`. A moving block feels the
/// velocity-weakening kinetic law `-f0 * sign(v) / (1 + |v|)`.
pub fn friction(f_applied: f64, velocity: f64, f0: f64) -> f64 {
    if velocity == 0.0 {
        if f_applied.abs() <= f0 {
            -f_applied
        } else {
            sign(-f_applied) * f0
        }
    } else {
        -(f0 * sign(velocity)) / (1.0 + velocity.abs())
    }
}

/// Positions, velocities and last computed forces of every block.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainState {
    pub positions: Vec<f64>,
    pub velocities: Vec<f64>,
    pub forces: Vec<f64>,
}

impl ChainState {

    /// Chain at rest with the given initial displacements
    pub fn at_rest(positions: Vec<f64>) -> ChainState {
        let n = positions.len();
        ChainState { positions, velocities: vec![0.0; n], forces: vec![0.0; n] }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn total_velocity(&self) -> f64 {
        self.velocities.iter().sum()
    }

    /// Force from the coupling springs and the leaf spring, before friction.
    pub fn opposed_force(&self, i: usize, params: &Params, t: f64) -> f64 {
        let x = &self.positions;
        let n = x.len();
        let coupling = if n == 1 {
            0.0
        } else if i == 0 {
            params.kc * (x[1] - x[0])
        } else if i == n - 1 {
            params.kc * (x[n - 2] - x[n - 1])
        } else {
            params.kc * (x[i + 1] + x[i - 1] - 2.0 * x[i])
        };
        let driver = params.kp * (params.v0 * t - x[i]);
        coupling + driver
    }

    /// Net force on block `i` at simulated time `t`, friction included.
    pub fn net_force(&self, i: usize, params: &Params, t: f64) -> f64 {
        let f_opposed = self.opposed_force(i, params, t);
        f_opposed + friction(f_opposed, self.velocities[i], params.f0)
    }

    /// Velocity of block `i` after one step. A velocity that would change
    /// sign is clamped to exactly zero: blocks only stop by sticking.
    pub fn next_velocity(&self, i: usize, force: f64, dt: f64, mass: f64) -> f64 {
        let v = self.velocities[i];
        let v_next = force * dt / mass + v;
        if v != 0.0 && sign(v) != sign(v_next) {
            return 0.0;
        }
        v_next
    }

    pub fn next_position(&self, i: usize, v_next: f64, dt: f64) -> f64 {
        v_next * dt + self.positions[i]
    }
}
