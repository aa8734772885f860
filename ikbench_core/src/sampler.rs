use crate::bounds::JointBound;
use crate::error::{BenchError, BenchResult};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// One joint value per variable, in group order
pub type SampleConfiguration = Vec<f64>;

/// Independent uniform sampler over the joint-space box.
///
/// Components are drawn independently so the benchmark covers the whole
/// reachable space rather than any structured trajectory.
#[derive(Debug, Clone)]
pub struct JointSampler {
    distributions: Vec<Uniform<f64>>,
}

impl JointSampler {
    pub fn new(bounds: &[JointBound]) -> BenchResult<Self> {
        let distributions = bounds
            .iter()
            .map(|bound| {
                let valid = bound.min_position.is_finite()
                    && bound.max_position.is_finite()
                    && bound.min_position <= bound.max_position;
                if !valid {
                    return Err(BenchError::InvalidBounds {
                        name: bound.name.clone(),
                        min: bound.min_position,
                        max: bound.max_position,
                    });
                }
                Ok(Uniform::new_inclusive(bound.min_position, bound.max_position))
            })
            .collect::<BenchResult<Vec<_>>>()?;

        Ok(Self { distributions })
    }

    pub fn dof(&self) -> usize {
        self.distributions.len()
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SampleConfiguration {
        self.distributions
            .iter()
            .map(|distribution| distribution.sample(rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f64::consts::PI;

    #[test]
    fn test_samples_stay_within_bounds() {
        let bounds = vec![
            JointBound::new("j1", -1.0, 1.0),
            JointBound::new("j2", 0.0, 0.25),
            JointBound::full_turn("j3"),
            JointBound::new("j4", -0.05, 0.3),
        ];
        let sampler = JointSampler::new(&bounds).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..10_000 {
            let sample = sampler.sample(&mut rng);
            assert_eq!(sample.len(), bounds.len());
            for (value, bound) in sample.iter().zip(&bounds) {
                assert!(bound.contains(*value), "{} outside {:?}", value, bound);
            }
        }
    }

    #[test]
    fn test_full_turn_interval_is_covered() {
        let bounds = vec![JointBound::full_turn("continuous")];
        let sampler = JointSampler::new(&bounds).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let samples: Vec<f64> = (0..5_000).map(|_| sampler.sample(&mut rng)[0]).collect();
        let min = samples.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        assert!(min >= -PI && max <= PI);
        // Both halves of the interval get visited
        assert!(min < -3.0 && max > 3.0);
    }

    #[test]
    fn test_degenerate_interval() {
        let sampler = JointSampler::new(&[JointBound::new("locked", 0.5, 0.5)]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(sampler.sample(&mut rng), vec![0.5]);
    }

    #[test]
    fn test_rejects_non_finite_bounds() {
        let err = JointSampler::new(&[JointBound::new("slider", 0.0, f64::INFINITY)]).unwrap_err();
        assert!(matches!(err, BenchError::InvalidBounds { .. }));
    }

    #[test]
    fn test_same_seed_same_samples() {
        let sampler = JointSampler::new(&[JointBound::full_turn("a"), JointBound::full_turn("b")])
            .unwrap();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(sampler.sample(&mut a), sampler.sample(&mut b));
        }
    }
}
