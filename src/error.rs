//! Error type for distribution construction.

/// Errors raised while validating a distribution configuration.
///
/// Every variant is produced at construction time. Sampling a validated
/// [`Distribution`](crate::Distribution) never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a single-value distribution has no `value`.
    #[error("no value found for the single distribution")]
    MissingValue,

    /// Returned when a mixture has no `pieces`/`events`, or an empty list.
    #[error("no pieces/events set in mixture distribution")]
    MissingChildren,

    /// Returned when a piece probability lies outside `[0, 1]`.
    #[error("wrong probability value {probability} for piece {index}")]
    ProbabilityOutOfRange {
        /// Position of the piece in the mixture.
        index: usize,
        /// The offending probability.
        probability: f64,
    },

    /// Returned when given probabilities exceed 1, or are all given and
    /// do not reach 1.
    #[error("wrong probability sum {sum} in mixture distribution")]
    ProbabilitySumInvalid {
        /// Sum of the explicitly given probabilities.
        sum: f64,
    },

    /// Returned when an interval has its bounds in the wrong order.
    #[error("invalid interval [{low}, {high}] for {distribution} distribution")]
    InvalidInterval {
        /// Name of the distribution type.
        distribution: &'static str,
        /// The lower bound.
        low: f64,
        /// The upper bound.
        high: f64,
    },

    /// Returned when a scalar parameter is out of its domain.
    #[error("invalid {name} parameter {value} for {distribution} distribution")]
    InvalidParameter {
        /// Name of the distribution type.
        distribution: &'static str,
        /// Name of the parameter.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Returned when the `type` discriminator is not recognized.
    #[error(
        "wrong distribution type '{0}': use one of 'discrete', 'uniform', 'exponential', \
         'normal', 'mixed', 'single' or none for the single event"
    )]
    UnknownType(String),

    /// Wraps an error raised while building a mixture piece.
    #[error("piece {index}: {source}")]
    Piece {
        /// Position of the piece in the mixture.
        index: usize,
        /// The error raised by the piece.
        #[source]
        source: Box<Error>,
    },

    /// Returned when configuration text is not valid JSON for a
    /// distribution record.
    #[error("malformed distribution configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Follows [`Error::Piece`] wrappers down to the error raised by the
    /// innermost node.
    ///
    /// # Examples
    /// ```
    /// use u_variate::{Distribution, Error};
    ///
    /// let err = Distribution::from_json_str(
    ///     r#"{"type": "mixed", "pieces": [{"type": "uniform", "a": 2, "b": 0}]}"#,
    /// )
    /// .unwrap_err();
    /// assert!(matches!(err, Error::Piece { index: 0, .. }));
    /// assert!(matches!(err.root_cause(), Error::InvalidInterval { .. }));
    /// ```
    pub fn root_cause(&self) -> &Error {
        let mut err = self;
        while let Error::Piece { source, .. } = err {
            err = source;
        }
        err
    }

    /// Wraps `self` as the error of mixture piece `index`.
    pub(crate) fn in_piece(self, index: usize) -> Self {
        Error::Piece {
            index,
            source: Box::new(self),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_type_lists_valid_names() {
        let msg = Error::UnknownType("blablabla".into()).to_string();
        for name in ["discrete", "uniform", "exponential", "normal", "mixed", "single"] {
            assert!(msg.contains(name), "{msg} should mention {name}");
        }
        assert!(msg.contains("blablabla"));
    }

    #[test]
    fn test_root_cause_unwraps_nested_pieces() {
        let err = Error::MissingValue.in_piece(2).in_piece(0);
        assert_eq!(err.to_string(), "piece 0: piece 2: no value found for the single distribution");
        assert!(matches!(err.root_cause(), Error::MissingValue));
    }

    #[test]
    fn test_root_cause_of_leaf_is_itself() {
        let err = Error::ProbabilitySumInvalid { sum: 1.5 };
        assert!(matches!(
            err.root_cause(),
            Error::ProbabilitySumInvalid { sum } if (*sum - 1.5).abs() < 1e-15
        ));
    }
}
