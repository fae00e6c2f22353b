//! Seeded k-means style codebook construction.
//!
//! The builder runs in two phases:
//!
//! 1. **Seeding**: a handful of samples is drawn at random, sorted, and K
//!    values are picked at equidistant ranks. This spans the empirical range
//!    of a small sample instead of scanning the whole population.
//! 2. **Refinement**: assign every sample to its nearest codeword, then move
//!    each codeword to the integer mean of its members. Repeat until nothing
//!    moves or the iteration cap is reached.
//!
//! Codewords that attract no samples keep their value and are never
//! re-seeded. Such dead codewords stay addressable but are never chosen by
//! the quantizer again unless another codeword moves away from them.

use rand::Rng;

use super::codebook::Codebook;
use super::error::CodebookError;
use crate::quantize::nearest_position;

/// Size of the random subset drawn for seeding.
///
/// The subset is enlarged to K when more codewords are requested, so each
/// code slot gets its own rank.
pub const NEIGHBORHOOD_SIZE: usize = 5;

/// Largest codebook the builder will produce.
///
/// Samples are 8-bit, so at most 256 codewords can ever attract members.
/// Larger requests only add dead codewords while seeding memory and
/// per-round work grow with K.
pub const MAX_CODEBOOK_SIZE: usize = 256;

/// Per-codeword membership counts and sums for one assignment pass.
///
/// Independent partial accumulators can be combined with
/// [`merge`](Self::merge); the update step only needs the merged totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterStats {
    counts: Vec<u64>,
    sums: Vec<u64>,
    distortion: u64,
}

impl ClusterStats {
    /// Empty accumulator for `k` codewords.
    pub fn new(k: usize) -> Self {
        Self {
            counts: vec![0; k],
            sums: vec![0; k],
            distortion: 0,
        }
    }

    /// Assign every sample to its nearest codeword and accumulate.
    pub fn accumulate(samples: &[u8], codewords: &[u8]) -> Self {
        let mut stats = Self::new(codewords.len());
        for &sample in samples {
            let index = nearest_position(sample, codewords);
            stats.add(index, sample, sample.abs_diff(codewords[index]));
        }
        stats
    }

    /// Record one sample assigned to codeword `index` at `distance`.
    #[inline]
    pub fn add(&mut self, index: usize, sample: u8, distance: u8) {
        self.counts[index] += 1;
        self.sums[index] += u64::from(sample);
        self.distortion += u64::from(distance);
    }

    /// Fold another accumulator over the same codebook into this one.
    ///
    /// # Panics
    ///
    /// Panics if the two accumulators track a different number of codewords.
    pub fn merge(&mut self, other: &ClusterStats) {
        assert_eq!(
            self.counts.len(),
            other.counts.len(),
            "cannot merge cluster stats for different codebook sizes"
        );
        for (count, extra) in self.counts.iter_mut().zip(&other.counts) {
            *count += extra;
        }
        for (sum, extra) in self.sums.iter_mut().zip(&other.sums) {
            *sum += extra;
        }
        self.distortion += other.distortion;
    }

    /// Samples assigned to each codeword.
    #[inline]
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Sum of `|sample - codeword|` over all accumulated samples.
    #[inline]
    pub fn distortion(&self) -> u64 {
        self.distortion
    }

    /// Number of codewords that attracted no samples.
    pub fn empty_clusters(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }

    /// Integer mean (floor) of the samples assigned to codeword `index`,
    /// or `None` when it has no members.
    pub fn mean(&self, index: usize) -> Option<u8> {
        match self.counts[index] {
            0 => None,
            // Mean of u8 samples never exceeds 255.
            count => Some((self.sums[index] / count) as u8),
        }
    }

    /// Move each non-empty codeword to its cluster mean.
    ///
    /// Returns `true` if any codeword changed value.
    pub fn update(&self, codewords: &mut [u8]) -> bool {
        let mut changed = false;
        for (index, codeword) in codewords.iter_mut().enumerate() {
            if let Some(mean) = self.mean(index) {
                if mean != *codeword {
                    *codeword = mean;
                    changed = true;
                }
            }
        }
        changed
    }
}

/// Outcome of a clustering run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// The final codebook, in seeding order.
    pub codebook: Codebook,
    /// Assignment/update rounds actually executed.
    pub iterations_run: usize,
    /// Whether the run stopped because no codeword moved.
    pub converged: bool,
    /// Total assignment distance seen by each round, followed by the
    /// distance of the final codebook.
    pub distortion_history: Vec<u64>,
    /// Codewords with no members under the final codebook.
    pub dead_codewords: usize,
}

impl BuildReport {
    /// Total assignment distance of the final codebook.
    pub fn final_distortion(&self) -> u64 {
        self.distortion_history.last().copied().unwrap_or(0)
    }
}

/// Builds a [`Codebook`] of fixed size from a sample population.
///
/// The builder is reusable; randomness comes from the generator passed to
/// each call so runs with the same seed are reproducible.
///
/// # Example
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use vq_core::CodebookBuilder;
///
/// let samples = [10, 10, 200, 200];
/// let mut rng = StdRng::seed_from_u64(7);
/// let codebook = CodebookBuilder::new(2, 5).build(&samples, &mut rng).unwrap();
///
/// let mut values = codebook.values().to_vec();
/// values.sort();
/// assert_eq!(values, vec![10, 200]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodebookBuilder {
    codebook_size: usize,
    max_iterations: usize,
}

impl CodebookBuilder {
    /// Builder producing `codebook_size` codewords with at most
    /// `max_iterations` refinement rounds.
    pub fn new(codebook_size: usize, max_iterations: usize) -> Self {
        Self {
            codebook_size,
            max_iterations,
        }
    }

    /// Requested number of codewords.
    #[inline]
    pub fn codebook_size(&self) -> usize {
        self.codebook_size
    }

    /// Iteration cap.
    #[inline]
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Seed and refine a codebook over `samples`.
    pub fn build<R: Rng>(&self, samples: &[u8], rng: &mut R) -> Result<Codebook, CodebookError> {
        self.build_with_report(samples, rng)
            .map(|report| report.codebook)
    }

    /// Like [`build`](Self::build), also returning iteration statistics.
    pub fn build_with_report<R: Rng>(
        &self,
        samples: &[u8],
        rng: &mut R,
    ) -> Result<BuildReport, CodebookError> {
        let initial = self.seed(samples, rng)?;
        self.refine(initial, samples)
    }

    /// Pick the initial codebook from a small sorted random subset.
    ///
    /// Codeword `i` takes the subset element at rank
    /// `i * (subset_len - 1) / (K - 1)`; a single codeword takes rank 0.
    /// Samples are drawn with replacement.
    ///
    /// # Errors
    ///
    /// - [`CodebookError::ZeroCodebookSize`] if K is zero
    /// - [`CodebookError::TooManyCodewords`] if K exceeds [`MAX_CODEBOOK_SIZE`]
    /// - [`CodebookError::EmptySamples`] if `samples` is empty
    pub fn seed<R: Rng>(&self, samples: &[u8], rng: &mut R) -> Result<Codebook, CodebookError> {
        self.validate(samples)?;
        let k = self.codebook_size;

        let subset_len = NEIGHBORHOOD_SIZE.max(k);
        let mut subset: Vec<u8> = (0..subset_len)
            .map(|_| samples[rng.gen_range(0..samples.len())])
            .collect();
        subset.sort_unstable();

        let values = (0..k)
            .map(|i| {
                let rank = if k == 1 {
                    0
                } else {
                    i * (subset_len - 1) / (k - 1)
                };
                subset[rank]
            })
            .collect();

        Codebook::from_values(values)
    }

    /// Run the assignment/update loop starting from `initial`.
    ///
    /// The codebook size is taken from `initial`; only the iteration cap of
    /// this builder applies. Stops early once an update leaves every
    /// codeword unchanged.
    ///
    /// # Errors
    ///
    /// [`CodebookError::EmptySamples`] if `samples` is empty.
    pub fn refine(&self, initial: Codebook, samples: &[u8]) -> Result<BuildReport, CodebookError> {
        if samples.is_empty() {
            return Err(CodebookError::EmptySamples);
        }

        let mut codewords = initial.into_values();
        let mut distortion_history = Vec::new();
        let mut iterations_run = 0;
        let mut converged = false;

        for _ in 0..self.max_iterations {
            let stats = ClusterStats::accumulate(samples, &codewords);
            distortion_history.push(stats.distortion());
            iterations_run += 1;

            if !stats.update(&mut codewords) {
                converged = true;
                break;
            }
        }

        let codebook = Codebook::from_values(codewords)?;
        let final_stats = ClusterStats::accumulate(samples, codebook.values());
        distortion_history.push(final_stats.distortion());

        Ok(BuildReport {
            dead_codewords: final_stats.empty_clusters(),
            codebook,
            iterations_run,
            converged,
            distortion_history,
        })
    }

    fn validate(&self, samples: &[u8]) -> Result<(), CodebookError> {
        if self.codebook_size == 0 {
            return Err(CodebookError::ZeroCodebookSize);
        }
        if self.codebook_size > MAX_CODEBOOK_SIZE {
            return Err(CodebookError::TooManyCodewords {
                size: self.codebook_size,
            });
        }
        if samples.is_empty() {
            return Err(CodebookError::EmptySamples);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn test_seed_produces_k_values_from_population() {
        let samples: Vec<u8> = (0..=255).collect();
        let codebook = CodebookBuilder::new(4, 0)
            .seed(&samples, &mut rng(1))
            .unwrap();

        assert_eq!(codebook.len(), 4);
    }

    #[test]
    fn test_seed_is_sorted_ascending() {
        // Seeds come from equidistant ranks of a sorted subset.
        let samples: Vec<u8> = (0..=255).collect();
        for seed in 0..20 {
            let codebook = CodebookBuilder::new(3, 0)
                .seed(&samples, &mut rng(seed))
                .unwrap();
            let values = codebook.values();
            assert!(values.windows(2).all(|w| w[0] <= w[1]), "{values:?}");
        }
    }

    #[test]
    fn test_seed_single_codeword_takes_minimum_of_subset() {
        let samples = [42u8; 8];
        let codebook = CodebookBuilder::new(1, 0)
            .seed(&samples, &mut rng(3))
            .unwrap();
        assert_eq!(codebook.values(), &[42]);
    }

    #[test]
    fn test_seed_larger_than_neighborhood_does_not_panic() {
        let samples = [1u8, 2, 3];
        let codebook = CodebookBuilder::new(12, 3)
            .build(&samples, &mut rng(9))
            .unwrap();
        assert_eq!(codebook.len(), 12);
    }

    #[test]
    fn test_validation_errors() {
        let samples = [1u8, 2, 3];

        assert_eq!(
            CodebookBuilder::new(0, 5).build(&samples, &mut rng(0)),
            Err(CodebookError::ZeroCodebookSize)
        );
        assert_eq!(
            CodebookBuilder::new(2, 5).build(&[], &mut rng(0)),
            Err(CodebookError::EmptySamples)
        );
        assert_eq!(
            CodebookBuilder::new(MAX_CODEBOOK_SIZE + 1, 1).build(&samples, &mut rng(0)),
            Err(CodebookError::TooManyCodewords {
                size: MAX_CODEBOOK_SIZE + 1
            })
        );
    }

    #[test]
    fn test_full_size_codebook_on_tiny_input() {
        let samples = [0u8, 255, 7, 7];
        let report = CodebookBuilder::new(MAX_CODEBOOK_SIZE, 2)
            .build_with_report(&samples, &mut rng(1))
            .unwrap();

        assert_eq!(report.codebook.len(), MAX_CODEBOOK_SIZE);
        assert!(report.dead_codewords >= MAX_CODEBOOK_SIZE - samples.len());
    }

    #[test]
    fn test_refine_moves_codewords_to_cluster_means() {
        let samples: Vec<u8> = (0..10).collect();
        let initial = Codebook::from_values(vec![0, 9]).unwrap();

        let report = CodebookBuilder::new(2, 10)
            .refine(initial, &samples)
            .unwrap();

        // {0..4} -> floor(10/5) = 2, {5..9} -> floor(35/5) = 7
        assert_eq!(report.codebook.values(), &[2, 7]);
        assert!(report.converged);
        assert_eq!(report.iterations_run, 2);
        assert_eq!(report.distortion_history, vec![20, 12, 12]);
    }

    #[test]
    fn test_refine_zero_iterations_keeps_initial() {
        let initial = Codebook::from_values(vec![3, 250]).unwrap();
        let report = CodebookBuilder::new(2, 0)
            .refine(initial.clone(), &[0, 255])
            .unwrap();

        assert_eq!(report.codebook, initial);
        assert_eq!(report.iterations_run, 0);
        assert!(!report.converged);
        assert_eq!(report.distortion_history, vec![8]);
    }

    #[test]
    fn test_empty_cluster_keeps_previous_value() {
        // Codeword 1 sits on the same value as codeword 0 and loses every tie.
        let initial = Codebook::from_values(vec![50, 50]).unwrap();
        let report = CodebookBuilder::new(2, 1)
            .refine(initial, &[40, 60])
            .unwrap();

        assert_eq!(report.codebook.values(), &[50, 50]);
        assert_eq!(report.dead_codewords, 1);
    }

    #[test]
    fn test_cluster_stats_merge_matches_single_pass() {
        let samples: Vec<u8> = (0..=255).step_by(3).collect();
        let codewords = [20u8, 120, 220];

        let whole = ClusterStats::accumulate(&samples, &codewords);
        let (left, right) = samples.split_at(samples.len() / 2);
        let mut merged = ClusterStats::accumulate(left, &codewords);
        merged.merge(&ClusterStats::accumulate(right, &codewords));

        assert_eq!(merged, whole);
    }

    #[test]
    fn test_cluster_stats_mean_floors() {
        let mut stats = ClusterStats::new(1);
        stats.add(0, 1, 0);
        stats.add(0, 2, 0);
        assert_eq!(stats.mean(0), Some(1));
        assert_eq!(ClusterStats::new(1).mean(0), None);
    }
}
