use crate::model::Pose;

/// Distance between a reference pose and an achieved pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseError {
    /// Euclidean distance between translations, in model length units
    pub position: f64,
    /// Shortest-arc rotation angle in radians, within `[0, PI]`
    pub orientation: f64,
}

/// Compare `achieved` against `reference`.
///
/// The angle is `2 * atan2(|v|, |w|)` of the relative quaternion, so `q` and
/// `-q` are treated as the same orientation.
pub fn evaluate_pose_error(reference: &Pose, achieved: &Pose) -> PoseError {
    let position = (achieved.translation.vector - reference.translation.vector).norm();

    let delta = reference.rotation.inverse() * achieved.rotation;
    let q = delta.quaternion();
    let orientation = 2.0 * q.vector().norm().atan2(q.scalar().abs());

    PoseError {
        position,
        orientation,
    }
}
