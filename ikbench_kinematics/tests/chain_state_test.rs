//! Robot model and chain state against a six-axis arm description

use approx::assert_relative_eq;
use ikbench_core::prelude::*;
use ikbench_core::{evaluate_pose_error, extract_joint_bounds};
use ikbench_kinematics::{ChainState, GroupDefinition, RobotModel, SolverSettings};
use nalgebra::{Translation3, UnitQuaternion};
use std::f64::consts::PI;
use std::path::PathBuf;
use std::time::Instant;

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/six_dof_arm.urdf")
}

fn load() -> (RobotModel, JointGroup) {
    let model = RobotModel::load(fixture(), vec![GroupDefinition::new("manipulator", "tool0")])
        .expect("fixture loads");
    let group = model.joint_group("manipulator").expect("group resolves");
    (model, group)
}

#[test]
fn test_group_resolves_six_variables() {
    let (_, group) = load();
    assert_eq!(group.variable_count(), 6);
    assert_eq!(group.variable_names[0], "shoulder_pan_joint");
    assert_eq!(group.variable_names[5], "wrist_3_joint");
    assert_eq!(group.tip_link(), Some("tool0"));
}

#[test]
fn test_continuous_joint_gets_full_turn() {
    let (model, group) = load();
    let bounds = extract_joint_bounds(&model, &group, &SilentDiagnostics).unwrap();

    assert_eq!(bounds[2], JointBound::new("elbow_joint", -2.5, 2.5));
    assert_eq!(bounds[5], JointBound::new("wrist_3_joint", -PI, PI));
}

#[test]
fn test_forward_kinematics_is_repeatable() {
    let (model, group) = load();
    let mut state = ChainState::new(&model, &SolverSettings::default(), Some(5)).unwrap();
    let sample = [0.3, -0.7, 1.1, 0.2, -0.4, 2.0];

    let first = state.compute_forward_kinematics(&group, &sample, "tool0").unwrap();
    state.randomize_state(&group).unwrap();
    let second = state.compute_forward_kinematics(&group, &sample, "tool0").unwrap();

    assert_eq!(first, second);
    assert_relative_eq!(state.joint_position("elbow_joint").unwrap(), 1.1);
}

#[test]
fn test_randomized_state_respects_limits() {
    let (model, group) = load();
    let mut state = ChainState::new(&model, &SolverSettings::default(), Some(17)).unwrap();

    for _ in 0..200 {
        state.randomize_state(&group).unwrap();
        let elbow = state.joint_position("elbow_joint").unwrap();
        assert!((-2.5..=2.5).contains(&elbow));
        let wrist = state.joint_position("wrist_3_joint").unwrap();
        assert!((-PI..=PI).contains(&wrist));
    }
}

#[test]
fn test_wrong_dimension_is_rejected() {
    let (model, group) = load();
    let mut state = ChainState::new(&model, &SolverSettings::default(), Some(1)).unwrap();

    let err = state.set_joint_positions(&group, &[0.0, 0.0]).unwrap_err();
    assert!(matches!(err, BenchError::Kinematics(_)));
}

#[test]
fn test_unknown_link_pose_is_an_error() {
    let (model, _) = load();
    let state = ChainState::new(&model, &SolverSettings::default(), Some(1)).unwrap();
    assert!(state.link_pose("no_such_link").is_err());
}

#[test]
fn test_ik_succeeds_when_already_at_target() {
    let (model, group) = load();
    let mut state = ChainState::new(&model, &SolverSettings::default(), Some(3)).unwrap();

    let target = state
        .compute_forward_kinematics(&group, &[0.1, -0.5, 0.8, 0.3, 0.2, -0.1], "tool0")
        .unwrap();

    assert!(state.solve_ik(&group, &target, Duration::from_millis(100)));
    state.update_transforms();
    let achieved = state.link_pose("tool0").unwrap();
    let error = evaluate_pose_error(&target, &achieved);
    assert!(error.position < 1e-2);
    assert!(error.orientation < 1e-1);
}

#[test]
fn test_unrepresentable_deadline_does_not_panic() {
    let (model, group) = load();
    let params = BenchmarkParams::from_secs_f64("manipulator", 1, 1e19).unwrap();
    let mut state = ChainState::new(&model, &SolverSettings::default(), Some(4)).unwrap();

    let target = state
        .compute_forward_kinematics(&group, &[-0.2, 0.4, -0.6, 0.1, 0.5, 0.3], "tool0")
        .unwrap();

    assert!(state.solve_ik(&group, &target, params.ik_timeout));
}

#[test]
fn test_unreachable_target_times_out() {
    let (model, group) = load();
    let mut state = ChainState::new(&model, &SolverSettings::default(), Some(3)).unwrap();
    let target = Pose::from_parts(Translation3::new(25.0, 0.0, 0.0), UnitQuaternion::identity());
    let timeout = Duration::from_millis(20);

    let start = Instant::now();
    assert!(!state.solve_ik(&group, &target, timeout));
    assert!(start.elapsed() >= timeout);
    assert!(state.ik_attempts() >= 1);
}

#[test]
fn test_full_benchmark_run() {
    let (model, _) = load();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jacobian_ik_benchmarking_data.csv");

    let params = BenchmarkParams::new("manipulator", 10, Duration::from_millis(20)).with_seed(8);
    let state = ChainState::new(&model, &SolverSettings::default(), params.state_seed()).unwrap();
    let sink = CsvResultSink::create(&path).unwrap();

    let mut bench = IkBenchmark::new(params, state, sink, SilentDiagnostics).unwrap();
    let summary = bench.run(&model).unwrap();

    assert_eq!(summary.sample_size, 10);
    assert!(summary.success_count <= 10);
    assert!((0.0..=1.0).contains(&summary.success_rate));
    assert_eq!(summary.has_timing(), summary.success_count > 0);

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 10);
    for (i, line) in text.lines().enumerate() {
        assert!(line.starts_with(&format!("{},", i + 1)));
    }
}
