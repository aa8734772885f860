use ikbench_core::BenchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KinematicsError {
    #[error("Failed to read URDF {path}: {reason}")]
    Urdf { path: PathBuf, reason: String },

    #[error("Link '{0}' not found in robot model")]
    UnknownLink(String),

    #[error("Joint '{0}' not found in robot model")]
    UnknownJoint(String),

    #[error("Planning group '{group}' uses unknown tip link '{link}'")]
    UnknownTipLink { group: String, link: String },

    #[error("Duplicate planning group '{0}'")]
    DuplicateGroup(String),

    #[error("Kinematic tree is malformed near link '{0}'")]
    MalformedTree(String),

    #[error("Expected {expected} joint values for group '{group}', got {actual}")]
    DimensionMismatch {
        group: String,
        expected: usize,
        actual: usize,
    },

    #[error("Kinematic chain error: {0}")]
    Chain(String),
}

impl From<KinematicsError> for BenchError {
    fn from(err: KinematicsError) -> Self {
        BenchError::Kinematics(err.to_string())
    }
}
