//! Mixture distributions: a weighted choice among child distributions.
//!
//! # Probability resolution
//!
//! Each piece may carry an explicit probability in `[0, 1]` or leave it
//! unset. Given probabilities may not sum past 1. Unset pieces split the
//! remaining mass `1 − Σ given` equally. When every probability is given,
//! the sum must reach 1 within [`PROBABILITY_TOLERANCE`].
//!
//! ```text
//! given:    [0.4, —,   —  ]
//! resolved: [0.4, 0.3, 0.3]
//! ```

use crate::distribution::Distribution;
use crate::error::{Error, Result};
use crate::random::CumulativeTable;

/// How far a fully specified probability sum may fall short of 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-4;

/// Rounding slack allowed above 1 when summing given probabilities.
const SUM_EPSILON: f64 = 1e-9;

/// One weighted child of a [`Mixture`].
#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    probability: f64,
    distribution: Distribution,
}

impl Piece {
    /// Resolved probability of selecting this piece.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }
}

/// A mixture of owned child distributions.
///
/// Pieces keep their input order; sampling walks them in that order.
///
/// # Examples
/// ```
/// use u_variate::{Distribution, Mixture};
///
/// let mixture = Mixture::new(vec![
///     (Some(0.4), Distribution::single(1.0).unwrap()),
///     (None, Distribution::single(2.0).unwrap()),
///     (None, Distribution::single(3.0).unwrap()),
/// ])
/// .unwrap();
///
/// let probs: Vec<f64> = mixture.probabilities().collect();
/// assert!((probs[1] - 0.3).abs() < 1e-12);
/// assert!((probs[2] - 0.3).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    pieces: Vec<Piece>,
    table: CumulativeTable,
}

impl Mixture {
    /// Builds a mixture from `(probability, child)` pairs, filling in unset
    /// probabilities.
    ///
    /// # Errors
    /// - [`Error::MissingChildren`] if `pieces` is empty.
    /// - [`Error::ProbabilityOutOfRange`] for a probability outside `[0, 1]`.
    /// - [`Error::ProbabilitySumInvalid`] if the given probabilities sum past
    ///   1, or are all given and fall short of 1.
    pub fn new(pieces: Vec<(Option<f64>, Distribution)>) -> Result<Self> {
        if pieces.is_empty() {
            return Err(Error::MissingChildren);
        }
        let (given, children): (Vec<_>, Vec<_>) = pieces.into_iter().unzip();
        let probabilities = Self::resolve_probabilities(&given)?;
        Self::from_resolved(probabilities, children)
    }

    /// Checks the given probabilities and fills in the unset ones.
    pub(crate) fn resolve_probabilities(given: &[Option<f64>]) -> Result<Vec<f64>> {
        let mut sum = 0.0;
        let mut unset = 0usize;
        for (index, probability) in given.iter().enumerate() {
            match *probability {
                Some(p) if !(0.0..=1.0).contains(&p) => {
                    return Err(Error::ProbabilityOutOfRange {
                        index,
                        probability: p,
                    });
                }
                Some(p) => sum += p,
                None => unset += 1,
            }
        }

        if sum > 1.0 + SUM_EPSILON || (unset == 0 && sum < 1.0 - PROBABILITY_TOLERANCE) {
            return Err(Error::ProbabilitySumInvalid { sum });
        }

        let fill = if unset > 0 {
            (1.0 - sum).max(0.0) / unset as f64
        } else {
            0.0
        };
        trace_debug!(pieces = given.len(), unset, fill, "resolved mixture probabilities");

        Ok(given.iter().map(|p| p.unwrap_or(fill)).collect())
    }

    /// Pairs resolved probabilities with already validated children.
    pub(crate) fn from_resolved(probabilities: Vec<f64>, children: Vec<Distribution>) -> Result<Self> {
        let sum = probabilities.iter().sum();
        let table =
            CumulativeTable::new(&probabilities).ok_or(Error::ProbabilitySumInvalid { sum })?;
        let pieces = probabilities
            .into_iter()
            .zip(children)
            .map(|(probability, distribution)| Piece {
                probability,
                distribution,
            })
            .collect();
        Ok(Self { pieces, table })
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Resolved probabilities in piece order.
    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        self.pieces.iter().map(Piece::probability)
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub(crate) fn table(&self) -> &CumulativeTable {
        &self.table
    }
}

// ============================================================================
// Tests
// ============================================================================
