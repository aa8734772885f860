use thiserror::Error;

/// Fatal benchmark errors.
///
/// A solver that fails to converge is not an error; it is recorded as an
/// unsuccessful trial.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Planning group '{0}' does not exist in the kinematic model")]
    GroupNotFound(String),

    #[error("Planning group '{0}' is corrupted: links count is zero")]
    EmptyGroup(String),

    #[error("Joint '{name}' has invalid bounds [{min}, {max}]")]
    InvalidBounds { name: String, min: f64, max: f64 },

    #[error("Sample size must be a positive integer")]
    InvalidSampleSize,

    #[error("IK timeout must be positive and fit in a Duration, got {0} s")]
    InvalidTimeout(f64),

    #[error("Planning group name must not be empty")]
    MissingPlanningGroup,

    #[error("Cannot {operation} while benchmark is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("Kinematics error: {0}")]
    Kinematics(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BenchResult<T> = Result<T, BenchError>;
