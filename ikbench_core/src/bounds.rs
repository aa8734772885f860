use crate::diagnostics::Diagnostics;
use crate::error::{BenchError, BenchResult};
use crate::model::{JointGroup, KinematicModel};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Sampling interval of one joint variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointBound {
    pub name: String,
    pub min_position: f64,
    pub max_position: f64,
}

impl JointBound {
    pub fn new(name: impl Into<String>, min_position: f64, max_position: f64) -> Self {
        Self {
            name: name.into(),
            min_position,
            max_position,
        }
    }

    /// Full turn, used for joints without position limits
    pub fn full_turn(name: impl Into<String>) -> Self {
        Self::new(name, -PI, PI)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min_position && value <= self.max_position
    }
}

/// Derive one [`JointBound`] per variable of `group`, in model order.
///
/// Unbounded variables get `[-PI, PI]` and a warning.
pub fn extract_joint_bounds<M, D>(
    model: &M,
    group: &JointGroup,
    diagnostics: &D,
) -> BenchResult<Vec<JointBound>>
where
    M: KinematicModel + ?Sized,
    D: Diagnostics + ?Sized,
{
    let mut joint_bounds = Vec::with_capacity(group.variable_count());

    for (i, name) in group.variable_names.iter().enumerate() {
        let bound = match model.variable_bounds(name) {
            Some(bounds) if bounds.bounded => {
                if !(bounds.min_position <= bounds.max_position) {
                    return Err(BenchError::InvalidBounds {
                        name: name.clone(),
                        min: bounds.min_position,
                        max: bounds.max_position,
                    });
                }
                diagnostics.debug(&format!(
                    "Joint {} has bounds of {} and {}",
                    i + 1,
                    bounds.min_position,
                    bounds.max_position
                ));
                JointBound::new(name.clone(), bounds.min_position, bounds.max_position)
            }
            _ => {
                diagnostics.warn(&format!(
                    "Joint {} is unbounded. Setting a range from -PI to PI",
                    i + 1
                ));
                JointBound::full_turn(name.clone())
            }
        };
        joint_bounds.push(bound);
    }

    Ok(joint_bounds)
}
