//! URDF-backed kinematic model with named planning groups.

use crate::error::KinematicsError;
use ikbench_core::{JointGroup, KinematicModel, VariableBounds};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use urdf_rs::JointType;

/// Planning group: the serial chain from the model root to `tip_link`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    pub tip_link: String,
}

impl GroupDefinition {
    pub fn new(name: impl Into<String>, tip_link: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tip_link: tip_link.into(),
        }
    }
}

/// Robot description loaded from a URDF file
#[derive(Debug, Clone)]
pub struct RobotModel {
    urdf_path: PathBuf,
    robot: urdf_rs::Robot,
    groups: Vec<GroupDefinition>,
}

impl RobotModel {
    pub fn load(
        urdf_path: impl AsRef<Path>,
        groups: Vec<GroupDefinition>,
    ) -> Result<Self, KinematicsError> {
        let urdf_path = urdf_path.as_ref().to_path_buf();
        let robot = urdf_rs::read_file(&urdf_path).map_err(|e| KinematicsError::Urdf {
            path: urdf_path.clone(),
            reason: e.to_string(),
        })?;

        let mut seen = HashSet::new();
        for group in &groups {
            if !seen.insert(group.name.as_str()) {
                return Err(KinematicsError::DuplicateGroup(group.name.clone()));
            }
            if !robot.links.iter().any(|l| l.name == group.tip_link) {
                return Err(KinematicsError::UnknownTipLink {
                    group: group.name.clone(),
                    link: group.tip_link.clone(),
                });
            }
        }

        tracing::debug!(
            "Loaded robot '{}' with {} links and {} joints",
            robot.name,
            robot.links.len(),
            robot.joints.len()
        );

        Ok(Self {
            urdf_path,
            robot,
            groups,
        })
    }

    pub fn name(&self) -> &str {
        &self.robot.name
    }

    pub fn urdf_path(&self) -> &Path {
        &self.urdf_path
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    /// Joints from the root down to `tip_link`, root first
    pub fn chain_to(&self, tip_link: &str) -> Result<Vec<&urdf_rs::Joint>, KinematicsError> {
        if !self.robot.links.iter().any(|l| l.name == tip_link) {
            return Err(KinematicsError::UnknownLink(tip_link.to_string()));
        }

        let by_child: HashMap<&str, &urdf_rs::Joint> = self
            .robot
            .joints
            .iter()
            .map(|j| (j.child.link.as_str(), j))
            .collect();

        let mut chain = Vec::new();
        let mut link = tip_link;
        while let Some(joint) = by_child.get(link) {
            if chain.len() >= self.robot.joints.len() {
                return Err(KinematicsError::MalformedTree(link.to_string()));
            }
            chain.push(*joint);
            link = joint.parent.link.as_str();
        }
        chain.reverse();
        Ok(chain)
    }

    /// Joint limits keyed by name for every movable joint in the model
    pub fn all_variable_bounds(&self) -> HashMap<String, VariableBounds> {
        self.robot
            .joints
            .iter()
            .filter_map(|j| joint_bounds(j).map(|b| (j.name.clone(), b)))
            .collect()
    }
}

fn is_movable(joint: &urdf_rs::Joint) -> bool {
    matches!(
        joint.joint_type,
        JointType::Revolute | JointType::Continuous | JointType::Prismatic
    )
}

fn joint_bounds(joint: &urdf_rs::Joint) -> Option<VariableBounds> {
    match joint.joint_type {
        JointType::Revolute | JointType::Prismatic => Some(VariableBounds::bounded(
            joint.limit.lower,
            joint.limit.upper,
        )),
        JointType::Continuous => Some(VariableBounds::unbounded()),
        _ => None,
    }
}

impl KinematicModel for RobotModel {
    fn joint_group(&self, name: &str) -> Option<JointGroup> {
        let definition = self.groups.iter().find(|g| g.name == name)?;
        let chain = match self.chain_to(&definition.tip_link) {
            Ok(chain) => chain,
            Err(err) => {
                tracing::error!("Cannot resolve group '{}': {}", name, err);
                return None;
            }
        };

        let variable_names = chain
            .iter()
            .filter(|j| is_movable(j))
            .map(|j| j.name.clone())
            .collect();

        let mut link_names: Vec<String> = Vec::with_capacity(chain.len() + 1);
        match chain.first() {
            Some(first) => link_names.push(first.parent.link.clone()),
            None => link_names.push(definition.tip_link.clone()),
        }
        link_names.extend(chain.iter().map(|j| j.child.link.clone()));

        Some(JointGroup::new(name, variable_names, link_names))
    }

    fn variable_bounds(&self, variable: &str) -> Option<VariableBounds> {
        self.robot
            .joints
            .iter()
            .find(|j| j.name == variable)
            .and_then(joint_bounds)
    }
}
