use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::{Distribution, Normal};
use thiserror::Error;

use crate::model::Glossary;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
pub enum OrderingError {
    #[error("ordering policy not recognized: '{0}'")]
    UnknownPolicy(String),
    #[error("randomness sigma must be in (0, 5) exclusive, got {provided}")]
    InvalidSigma { provided: f64 },
}

//
// ─── SIGMA ─────────────────────────────────────────────────────────────────────
//

/// Noise level for the weighted ordering, strictly inside `(0, 5)`.
///
/// Larger values pull the order toward pure random, smaller values toward
/// deterministic worst-first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sigma(f64);

/// Sigma used when the weighted ordering is selected without an explicit
/// noise level.
pub const DEFAULT_SIGMA: f64 = 0.33;

/// Population standard deviations below this are treated as zero spread.
const STD_TOLERANCE: f64 = 1e-9;

impl Sigma {
    /// Validate a noise level without panicking.
    ///
    /// # Errors
    ///
    /// Returns `OrderingError::InvalidSigma` unless `value` is finite and
    /// strictly between 0 and 5.
    pub fn new(value: f64) -> Result<Self, OrderingError> {
        if !value.is_finite() || value <= 0.0 || value >= 5.0 {
            return Err(OrderingError::InvalidSigma { provided: value });
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

//
// ─── ORDERING POLICY ───────────────────────────────────────────────────────────
//

/// Strategy deciding the full review order over a glossary.
///
/// Policies are pure: they read counters, never mutate them, and each
/// produces a permutation of all row indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderingPolicy {
    /// The dataset's load-time sort order. Deterministic across runs.
    Alphabetic,
    /// A uniformly random permutation, freshly sampled each session.
    Random,
    /// Most-missed words first; ties resolved by a fresh random draw per row.
    NetErrors,
    /// Net errors normalized to zero mean and unit variance, blurred with
    /// Gaussian noise of the given sigma, sorted descending.
    NetErrorsWeighted { sigma: Sigma },
}

impl OrderingPolicy {
    /// Resolve a policy from its configuration name.
    ///
    /// `sigma` only applies to `net-errors-weighted` and defaults to
    /// [`DEFAULT_SIGMA`] when absent.
    ///
    /// # Errors
    ///
    /// Returns `OrderingError::UnknownPolicy` for an unrecognized name and
    /// `OrderingError::InvalidSigma` for an out-of-range noise level.
    pub fn from_name(name: &str, sigma: Option<f64>) -> Result<Self, OrderingError> {
        match name {
            "alphabetic" => Ok(Self::Alphabetic),
            "random" => Ok(Self::Random),
            "net-errors" => Ok(Self::NetErrors),
            "net-errors-weighted" => {
                let sigma = Sigma::new(sigma.unwrap_or(DEFAULT_SIGMA))?;
                Ok(Self::NetErrorsWeighted { sigma })
            }
            other => Err(OrderingError::UnknownPolicy(other.to_string())),
        }
    }

    /// The configuration name this policy resolves from.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Alphabetic => "alphabetic",
            Self::Random => "random",
            Self::NetErrors => "net-errors",
            Self::NetErrorsWeighted { .. } => "net-errors-weighted",
        }
    }

    /// Compute the full review order: a permutation of `0..glossary.len()`.
    pub fn permutation<R: Rng + ?Sized>(&self, glossary: &Glossary, rng: &mut R) -> Vec<usize> {
        match self {
            Self::Alphabetic => (0..glossary.len()).collect(),
            Self::Random => {
                let mut indices: Vec<usize> = (0..glossary.len()).collect();
                indices.shuffle(rng);
                indices
            }
            Self::NetErrors => net_errors_order(glossary, rng),
            Self::NetErrorsWeighted { sigma } => weighted_order(glossary, *sigma, rng),
        }
    }
}

/// Descending by (net errors, fresh random tiebreak). Equally-missed words
/// land in random relative order but never cross a net-errors boundary.
fn net_errors_order<R: Rng + ?Sized>(glossary: &Glossary, rng: &mut R) -> Vec<usize> {
    let mut keyed: Vec<(i64, f64, usize)> = glossary
        .entries()
        .iter()
        .enumerate()
        .map(|(ix, entry)| (entry.net_errors(), rng.random::<f64>(), ix))
        .collect();

    keyed.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.total_cmp(&a.1)));
    keyed.into_iter().map(|(_, _, ix)| ix).collect()
}

/// Z-score the net-errors vector, add `Normal(0, sigma)` noise per row, sort
/// descending. Degenerate spread (population std within tolerance of zero)
/// leaves the base order undisturbed.
fn weighted_order<R: Rng + ?Sized>(glossary: &Glossary, sigma: Sigma, rng: &mut R) -> Vec<usize> {
    let n = glossary.len();
    if n == 0 {
        return Vec::new();
    }

    let raw: Vec<f64> = glossary
        .entries()
        .iter()
        .map(|entry| entry.net_errors() as f64)
        .collect();

    let mean = raw.iter().sum::<f64>() / n as f64;
    let variance = raw.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
    let std = variance.sqrt();
    if std < STD_TOLERANCE {
        return (0..n).collect();
    }

    let noise = Normal::new(0.0, sigma.value()).expect("sigma is validated finite and positive");

    let mut keyed: Vec<(f64, f64, usize)> = raw
        .iter()
        .enumerate()
        .map(|(ix, x)| ((x - mean) / std + noise.sample(rng), rng.random::<f64>(), ix))
        .collect();

    keyed.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| b.1.total_cmp(&a.1)));
    keyed.into_iter().map(|(_, _, ix)| ix).collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HistoryRecord, WordDraft};
    use crate::time::fixed_today;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn build_glossary(net_errors: &[i64]) -> Glossary {
        // One word per requested value; naming keeps the alphabetic order
        // equal to the input order so tests can reason about positions.
        let drafts: Vec<WordDraft> = (0..net_errors.len())
            .map(|i| {
                WordDraft::new(format!("parola{i:02}"), "word", "Sezione", "Unica").unwrap()
            })
            .collect();

        let history: Vec<HistoryRecord> = net_errors
            .iter()
            .enumerate()
            .filter(|(_, net)| **net != 0)
            .map(|(i, net)| HistoryRecord {
                term: format!("parola{i:02}"),
                ok: u32::try_from((-*net).max(0)).unwrap(),
                not_ok: u32::try_from((*net).max(0)).unwrap(),
                last_ok: fixed_today(),
                last_not_ok: fixed_today(),
            })
            .collect();

        Glossary::build(drafts, &history, fixed_today())
            .unwrap()
            .glossary
    }

    fn assert_is_permutation(order: &[usize], n: usize) {
        assert_eq!(order.len(), n);
        let unique: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(unique.len(), n);
        assert!(order.iter().all(|ix| *ix < n));
    }

    #[test]
    fn every_policy_returns_a_full_permutation() {
        let glossary = build_glossary(&[0, 3, -1, 2, 0, 7, -4, 1]);
        let sigma = Sigma::new(0.5).unwrap();
        let policies = [
            OrderingPolicy::Alphabetic,
            OrderingPolicy::Random,
            OrderingPolicy::NetErrors,
            OrderingPolicy::NetErrorsWeighted { sigma },
        ];

        for policy in policies {
            let mut rng = StdRng::seed_from_u64(7);
            let order = policy.permutation(&glossary, &mut rng);
            assert_is_permutation(&order, glossary.len());
        }
    }

    #[test]
    fn alphabetic_is_the_identity_every_run() {
        let glossary = build_glossary(&[5, 0, 2]);
        let mut rng = StdRng::seed_from_u64(1);
        let first = OrderingPolicy::Alphabetic.permutation(&glossary, &mut rng);
        let second = OrderingPolicy::Alphabetic.permutation(&glossary, &mut rng);

        assert_eq!(first, vec![0, 1, 2]);
        assert_eq!(first, second);
    }

    #[test]
    fn net_errors_ranks_descending_with_random_ties() {
        let glossary = build_glossary(&[5, -2, 5, 0]);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let order = OrderingPolicy::NetErrors.permutation(&glossary, &mut rng);
            assert_is_permutation(&order, 4);

            // The two rows with net 5 come first in either order, then 0,
            // then -2.
            let head: HashSet<usize> = order[..2].iter().copied().collect();
            assert_eq!(head, HashSet::from([0, 2]));
            assert_eq!(order[2], 3);
            assert_eq!(order[3], 1);
        }
    }

    #[test]
    fn net_errors_tiebreak_varies_across_samples() {
        let glossary = build_glossary(&[5, -2, 5, 0]);
        let mut seen_heads = HashSet::new();
        for seed in 0..64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let order = OrderingPolicy::NetErrors.permutation(&glossary, &mut rng);
            seen_heads.insert(order[0]);
        }
        // Both tied rows should win the tiebreak at least once.
        assert_eq!(seen_heads, HashSet::from([0, 2]));
    }

    #[test]
    fn weighted_with_zero_spread_keeps_base_order() {
        let glossary = build_glossary(&[0, 0, 0, 0]);
        let sigma = Sigma::new(1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let order =
            OrderingPolicy::NetErrorsWeighted { sigma }.permutation(&glossary, &mut rng);
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn weighted_with_tiny_sigma_tracks_net_errors() {
        let glossary = build_glossary(&[9, -9, 4, 0]);
        let sigma = Sigma::new(0.001).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        let order =
            OrderingPolicy::NetErrorsWeighted { sigma }.permutation(&glossary, &mut rng);
        assert_eq!(order, vec![0, 2, 3, 1]);
    }

    #[test]
    fn sigma_rejects_out_of_range_values() {
        for bad in [0.0, -0.1, 5.0, 6.0, f64::NAN, f64::INFINITY] {
            let err = Sigma::new(bad).unwrap_err();
            assert!(matches!(err, OrderingError::InvalidSigma { .. }));
        }
        assert!(Sigma::new(4.999).is_ok());
        assert!(Sigma::new(0.001).is_ok());
    }

    #[test]
    fn from_name_resolves_all_policies() {
        assert_eq!(
            OrderingPolicy::from_name("alphabetic", None).unwrap(),
            OrderingPolicy::Alphabetic
        );
        assert_eq!(
            OrderingPolicy::from_name("random", None).unwrap(),
            OrderingPolicy::Random
        );
        assert_eq!(
            OrderingPolicy::from_name("net-errors", None).unwrap(),
            OrderingPolicy::NetErrors
        );

        let weighted = OrderingPolicy::from_name("net-errors-weighted", Some(0.5)).unwrap();
        assert!(matches!(
            weighted,
            OrderingPolicy::NetErrorsWeighted { sigma } if (sigma.value() - 0.5).abs() < f64::EPSILON
        ));

        let defaulted = OrderingPolicy::from_name("net-errors-weighted", None).unwrap();
        assert!(matches!(
            defaulted,
            OrderingPolicy::NetErrorsWeighted { sigma }
                if (sigma.value() - DEFAULT_SIGMA).abs() < f64::EPSILON
        ));
    }

    #[test]
    fn from_name_rejects_unknown_policy() {
        let err = OrderingPolicy::from_name("spaced-repetition", None).unwrap_err();
        assert_eq!(err, OrderingError::UnknownPolicy("spaced-repetition".into()));
    }

    #[test]
    fn name_round_trips() {
        let sigma = Sigma::new(1.0).unwrap();
        for policy in [
            OrderingPolicy::Alphabetic,
            OrderingPolicy::Random,
            OrderingPolicy::NetErrors,
            OrderingPolicy::NetErrorsWeighted { sigma },
        ] {
            let reparsed = OrderingPolicy::from_name(policy.name(), Some(1.0)).unwrap();
            assert_eq!(reparsed.name(), policy.name());
        }
    }
}
