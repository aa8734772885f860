//! # IKBENCH Kinematics
//!
//! Concrete robot model and robot state for the benchmark harness.
//!
//! - [`RobotModel`] reads a URDF and exposes named planning groups (serial
//!   chains ending at a tip link) with their joint limits.
//! - [`ChainState`] holds joint positions and delegates forward and inverse
//!   kinematics to the `k` crate.

pub mod error;
pub mod model;
pub mod state;

pub use error::KinematicsError;
pub use model::{GroupDefinition, RobotModel};
pub use state::{ChainState, SolverSettings};
