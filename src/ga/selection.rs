//! Parent selection.
//!
//! Parents are chosen by a double tournament: two independent pairs are
//! drawn (without replacement inside each pair), each pair keeps its
//! better member, and the two pair winners meet in a final. Every parent
//! therefore wins a four-entrant single-elimination bracket, which
//! concentrates selection on the upper tail of the population while
//! leaving every individual a non-zero chance.
//!
//! Scores must already be adjusted for the optimisation direction (see
//! [`Optimisation::adjust`](super::Optimisation::adjust)): higher always
//! wins. Ties go to the lower population index.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use crate::error::GaError;
use rand::seq::index;
use rand::Rng;

/// Selects two parent indices, each by an independent double tournament.
///
/// # Errors
/// [`GaError::Configuration`] if fewer than two scores are given.
pub fn select_parents<R: Rng>(scores: &[f64], rng: &mut R) -> Result<[usize; 2], GaError> {
    if scores.len() < 2 {
        return Err(GaError::Configuration(format!(
            "tournament selection needs at least 2 individuals, got {}",
            scores.len()
        )));
    }
    Ok([double_tournament(scores, rng), double_tournament(scores, rng)])
}

/// Runs one four-entrant bracket and returns the winner's index.
/// `scores` holds at least two entries.
fn double_tournament<R: Rng>(scores: &[f64], rng: &mut R) -> usize {
    let (a, b) = draw_pair(scores.len(), rng);
    let (c, d) = draw_pair(scores.len(), rng);
    let first = winner(scores, a, b);
    let second = winner(scores, c, d);
    winner(scores, first, second)
}

/// Two distinct indices from `0..n`.
fn draw_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    let pair = index::sample(rng, n, 2);
    (pair.index(0), pair.index(1))
}

/// The higher-scoring of two indices; ties keep the lower index.
fn winner(scores: &[f64], a: usize, b: usize) -> usize {
    if scores[a] > scores[b] {
        a
    } else if scores[b] > scores[a] {
        b
    } else {
        a.min(b)
    }
}
