//! Burridge-Knopoff spring-block model of earthquake faults.
//!
//! A chain of blocks is coupled by springs and dragged over a rough
//! surface by a slowly moving plate. Blocks stick until the pull exceeds
//! static friction, then slip under velocity-weakening kinetic friction.
//! [`simulation::Simulation`] integrates the chain with a coarse timestep
//! while everything sticks and a fine one during earthquakes, reporting
//! the moment released by each of them.

pub mod config;
pub mod driver;
pub mod error;
pub mod output;
pub mod params;
pub mod physics;
pub mod simulation;
pub mod stats;

pub use crate::params::{MomentRule, Params};
pub use crate::simulation::{Simulation, StepKind, StepMode, StepReport, Timestep};
