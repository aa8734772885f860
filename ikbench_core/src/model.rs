//! Capabilities the harness needs from a kinematics library.

use crate::error::BenchResult;
use nalgebra::Isometry3;
use std::time::Duration;

/// Rigid transform of a link in the model frame
pub type Pose = Isometry3<f64>;

/// Position limits of a single joint variable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    pub bounded: bool,
    pub min_position: f64,
    pub max_position: f64,
}

impl VariableBounds {
    pub fn bounded(min_position: f64, max_position: f64) -> Self {
        Self {
            bounded: true,
            min_position,
            max_position,
        }
    }

    pub fn unbounded() -> Self {
        Self {
            bounded: false,
            min_position: 0.0,
            max_position: 0.0,
        }
    }
}

/// Named set of joints forming a serial chain
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JointGroup {
    pub name: String,
    /// Joint variables in model-declared order
    pub variable_names: Vec<String>,
    /// Links of the chain, root first
    pub link_names: Vec<String>,
}

impl JointGroup {
    pub fn new(
        name: impl Into<String>,
        variable_names: Vec<String>,
        link_names: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            variable_names,
            link_names,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variable_names.len()
    }

    /// The last link of the chain (not the end effector)
    pub fn tip_link(&self) -> Option<&str> {
        self.link_names.last().map(String::as_str)
    }
}

/// Read-only view of a robot description
pub trait KinematicModel {
    /// Resolve a planning group by name
    fn joint_group(&self, name: &str) -> Option<JointGroup>;

    /// Position bounds of a variable; `None` is treated as unbounded
    fn variable_bounds(&self, variable: &str) -> Option<VariableBounds>;
}

/// Mutable robot state used for FK and IK.
///
/// The benchmark owns exactly one state and overwrites it on every trial.
pub trait RobotState {
    fn set_joint_positions(&mut self, group: &JointGroup, values: &[f64]) -> BenchResult<()>;

    /// Move the group to a random configuration using the state's own generator
    fn set_random_positions(&mut self, group: &JointGroup) -> BenchResult<()>;

    fn update_transforms(&mut self);

    fn link_pose(&self, link: &str) -> BenchResult<Pose>;

    /// Solve IK for the group's tip, starting from the current state.
    ///
    /// On success the state holds the solution. Returns false if no solution
    /// was found within `timeout`.
    fn solve_ik(&mut self, group: &JointGroup, target: &Pose, timeout: Duration) -> bool;

    /// Apply `values` and return the resulting pose of `link`
    fn compute_forward_kinematics(
        &mut self,
        group: &JointGroup,
        values: &[f64],
        link: &str,
    ) -> BenchResult<Pose> {
        self.set_joint_positions(group, values)?;
        self.update_transforms();
        self.link_pose(link)
    }

    /// Randomize the group and refresh derived transforms
    fn randomize_state(&mut self, group: &JointGroup) -> BenchResult<()> {
        self.set_random_positions(group)?;
        self.update_transforms();
        Ok(())
    }
}

impl<T: RobotState + ?Sized> RobotState for &mut T {
    fn set_joint_positions(&mut self, group: &JointGroup, values: &[f64]) -> BenchResult<()> {
        (**self).set_joint_positions(group, values)
    }

    fn set_random_positions(&mut self, group: &JointGroup) -> BenchResult<()> {
        (**self).set_random_positions(group)
    }

    fn update_transforms(&mut self) {
        (**self).update_transforms()
    }

    fn link_pose(&self, link: &str) -> BenchResult<Pose> {
        (**self).link_pose(link)
    }

    fn solve_ik(&mut self, group: &JointGroup, target: &Pose, timeout: Duration) -> bool {
        (**self).solve_ik(group, target, timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tip_link_is_last_link() {
        let group = JointGroup::new(
            "arm",
            vec!["j1".into(), "j2".into()],
            vec!["base".into(), "l1".into(), "tool0".into()],
        );
        assert_eq!(group.tip_link(), Some("tool0"));
        assert_eq!(group.variable_count(), 2);
    }

    #[test]
    fn test_empty_group_has_no_tip() {
        let group = JointGroup::new("empty", vec![], vec![]);
        assert_eq!(group.tip_link(), None);
    }
}
