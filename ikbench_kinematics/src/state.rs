//! Mutable robot state backed by a `k` kinematic chain.

use crate::error::KinematicsError;
use crate::model::RobotModel;
use ikbench_core::{BenchResult, JointGroup, Pose, RobotState, VariableBounds};
use k::nalgebra as kna;
use k::InverseKinematicsSolver;
use nalgebra::{Quaternion, Translation3, UnitQuaternion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

/// Parameters of the Jacobian IK solver from the `k` crate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    pub name: String,
    /// Position tolerance, in model length units
    pub allowable_target_distance: f64,
    /// Orientation tolerance, in radians
    pub allowable_target_angle: f64,
    pub jacobian_multiplier: f64,
    /// Iterations per attempt before a random restart
    pub num_max_try: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            name: "jacobian".to_string(),
            allowable_target_distance: 0.001,
            allowable_target_angle: 0.005,
            jacobian_multiplier: 0.1,
            num_max_try: 100,
        }
    }
}

impl SolverSettings {
    fn build(&self) -> k::JacobianIkSolver<f64> {
        k::JacobianIkSolver::new(
            self.allowable_target_distance,
            self.allowable_target_angle,
            self.jacobian_multiplier,
            self.num_max_try,
        )
    }
}

/// Joint positions and link transforms of one robot instance
pub struct ChainState {
    chain: k::Chain<f64>,
    solver: k::JacobianIkSolver<f64>,
    /// Sampling interval per movable joint, full turn when unbounded
    random_ranges: HashMap<String, (f64, f64)>,
    rng: StdRng,
    ik_attempts: usize,
}

impl ChainState {
    /// Load the model's URDF into a `k` chain.
    ///
    /// `seed` controls random restarts and state randomization; `None` uses
    /// OS entropy.
    pub fn new(
        model: &RobotModel,
        settings: &SolverSettings,
        seed: Option<u64>,
    ) -> Result<Self, KinematicsError> {
        let chain = k::Chain::<f64>::from_urdf_file(model.urdf_path())
            .map_err(|e| KinematicsError::Chain(e.to_string()))?;

        let random_ranges = model
            .all_variable_bounds()
            .into_iter()
            .map(|(name, bounds)| (name, random_range(&bounds)))
            .collect();

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let state = Self {
            chain,
            solver: settings.build(),
            random_ranges,
            rng,
            ik_attempts: 0,
        };
        state.chain.update_transforms();
        Ok(state)
    }

    /// Total solver attempts, including random restarts
    pub fn ik_attempts(&self) -> usize {
        self.ik_attempts
    }

    pub fn joint_position(&self, joint: &str) -> Option<f64> {
        self.chain.find(joint).and_then(|node| node.joint_position())
    }

    fn apply(&self, group: &JointGroup, values: &[f64]) -> Result<(), KinematicsError> {
        if values.len() != group.variable_count() {
            return Err(KinematicsError::DimensionMismatch {
                group: group.name.clone(),
                expected: group.variable_count(),
                actual: values.len(),
            });
        }
        for (name, value) in group.variable_names.iter().zip(values) {
            let node = self
                .chain
                .find(name)
                .ok_or_else(|| KinematicsError::UnknownJoint(name.clone()))?;
            node.set_joint_position(*value)
                .map_err(|e| KinematicsError::Chain(format!("{}: {}", name, e)))?;
        }
        Ok(())
    }

    fn random_values(&mut self, group: &JointGroup) -> Vec<f64> {
        group
            .variable_names
            .iter()
            .map(|name| {
                let (lo, hi) = self.random_ranges.get(name).copied().unwrap_or((-PI, PI));
                self.rng.gen_range(lo..=hi)
            })
            .collect()
    }

    fn serial_chain(&self, group: &JointGroup) -> Result<k::SerialChain<f64>, KinematicsError> {
        let tip = group
            .tip_link()
            .ok_or_else(|| KinematicsError::UnknownLink(String::new()))?;
        let end = self
            .chain
            .find_link(tip)
            .ok_or_else(|| KinematicsError::UnknownLink(tip.to_string()))?;
        Ok(k::SerialChain::from_end(end))
    }
}

impl RobotState for ChainState {
    fn set_joint_positions(&mut self, group: &JointGroup, values: &[f64]) -> BenchResult<()> {
        self.apply(group, values)?;
        Ok(())
    }

    fn set_random_positions(&mut self, group: &JointGroup) -> BenchResult<()> {
        let values = self.random_values(group);
        self.apply(group, &values)?;
        Ok(())
    }

    fn update_transforms(&mut self) {
        self.chain.update_transforms();
    }

    fn link_pose(&self, link: &str) -> BenchResult<Pose> {
        let transform = self
            .chain
            .find_link(link)
            .and_then(|node| node.world_transform())
            .ok_or_else(|| KinematicsError::UnknownLink(link.to_string()))?;
        Ok(from_k_isometry(&transform))
    }

    /// Jacobian IK with random restarts until `timeout` elapses
    fn solve_ik(&mut self, group: &JointGroup, target: &Pose, timeout: Duration) -> bool {
        // Too far out to represent means no deadline
        let deadline = Instant::now().checked_add(timeout);

        let arm = match self.serial_chain(group) {
            Ok(arm) => arm,
            Err(err) => {
                tracing::error!("IK request for group '{}' failed: {}", group.name, err);
                return false;
            }
        };
        let target = to_k_isometry(target);

        loop {
            self.ik_attempts += 1;
            if self.solver.solve(&arm, &target).is_ok() {
                self.chain.update_transforms();
                return true;
            }
            if deadline.map_or(false, |d| Instant::now() >= d) {
                return false;
            }

            let restart = self.random_values(group);
            if let Err(err) = self.apply(group, &restart) {
                tracing::warn!("Random restart failed: {}", err);
                return false;
            }
            self.chain.update_transforms();
        }
    }
}

fn random_range(bounds: &VariableBounds) -> (f64, f64) {
    if bounds.bounded && bounds.min_position <= bounds.max_position {
        (bounds.min_position, bounds.max_position)
    } else {
        (-PI, PI)
    }
}

fn to_k_isometry(pose: &Pose) -> kna::Isometry3<f64> {
    let t = &pose.translation.vector;
    let q = pose.rotation.quaternion();
    kna::Isometry3::from_parts(
        kna::Translation3::new(t.x, t.y, t.z),
        kna::UnitQuaternion::new_unchecked(kna::Quaternion::new(q.w, q.i, q.j, q.k)),
    )
}

fn from_k_isometry(transform: &kna::Isometry3<f64>) -> Pose {
    let t = &transform.translation.vector;
    let q = transform.rotation.quaternion();
    Pose::from_parts(
        Translation3::new(t.x, t.y, t.z),
        UnitQuaternion::new_unchecked(Quaternion::new(q.w, q.i, q.j, q.k)),
    )
}
