//! Centroid defuzzification.
//!
//! Converts a sampled output membership function into one crisp value using the
//! center of gravity:
//!
//! ```text
//! score = Σ(u · μ(u)) / Σ μ(u)
//! ```
//!
//! An identically zero function has no center (0/0). That case is defined to
//! return `0.0`; callers that need to tell it apart from a genuinely low score
//! check [`AggregatedOutput::total_membership`] or [`crate::Coverage`].

/// Computes the centroid of `(point, degree)` samples.
///
/// Returns `0.0` when the total degree is zero.
pub fn centroid<I>(samples: I) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let (moment, mass) = samples
        .into_iter()
        .fold((0.0, 0.0), |(moment, mass), (u, degree)| {
            (moment + u * degree, mass + degree)
        });

    if mass == 0.0 { 0.0 } else { moment / mass }
}

/// Output membership function sampled across the output universe.
#[derive(Clone, Debug, PartialEq)]
pub struct AggregatedOutput {
    samples: Vec<(f64, f64)>,
}

impl AggregatedOutput {
    pub fn new(samples: Vec<(f64, f64)>) -> Self {
        Self { samples }
    }

    /// `(point, degree)` pairs in ascending point order.
    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    /// Sum of degrees over all samples (the centroid denominator).
    pub fn total_membership(&self) -> f64 {
        self.samples.iter().map(|&(_, d)| d).sum()
    }

    /// Returns true if the function is zero at every sample.
    pub fn is_empty(&self) -> bool {
        self.samples.iter().all(|&(_, d)| d == 0.0)
    }

    pub fn centroid(&self) -> f64 {
        centroid(self.samples.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_shape_centers_on_axis() {
        let samples = [(40.0, 0.5), (50.0, 1.0), (60.0, 0.5)];
        assert_eq!(centroid(samples), 50.0);
    }

    #[test]
    fn weights_pull_toward_heavier_side() {
        let samples = [(0.0, 1.0), (100.0, 3.0)];
        assert_eq!(centroid(samples), 75.0);
    }

    #[test]
    fn all_zero_function_defuzzifies_to_zero() {
        let samples = (0..=100).map(|u| (u as f64, 0.0));
        let score = centroid(samples);
        assert_eq!(score, 0.0);
        assert!(score.is_finite());
    }

    #[test]
    fn empty_sample_set_defuzzifies_to_zero() {
        assert_eq!(centroid(std::iter::empty()), 0.0);
    }

    #[test]
    fn aggregated_output_reports_mass() {
        let out = AggregatedOutput::new(vec![(0.0, 0.0), (1.0, 0.25), (2.0, 0.75)]);
        assert_eq!(out.total_membership(), 1.0);
        assert!(!out.is_empty());
        assert_eq!(out.centroid(), 1.75);
    }
}
