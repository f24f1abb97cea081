//! Distribution tree and its validating builder.
//!
//! A [`Distribution`] is a closed tagged union over five variants. Leaves
//! ([`Distribution::Single`], [`Uniform`], [`Exponential`], [`Normal`])
//! validate their own parameters; a [`Mixture`] owns fully validated
//! child distributions.
//!
//! | Variant | Parameters | Defaults |
//! |---|---|---|
//! | Single | `value` | — |
//! | [`Mixture`] | ordered `(probability, child)` pieces | unset probabilities share the rest |
//! | [`Uniform`] | `a ≤ b` | `a = 0`, `b = 1` |
//! | [`Exponential`] | `lambda > 0`, `max ≥ 0` | `lambda = 1`, no `max` |
//! | [`Normal`] | `m`, `sigma2 > 0`, `min < max` | `m = 0`, `sigma2 = 1`, no bounds |
//!
//! Nodes never change after construction, so a tree can be sampled any
//! number of times, from any number of threads, each with its own RNG.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::DistributionConfig;
use crate::error::{Error, Result};
use crate::mixture::Mixture;

/// The type discriminator of a distribution node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    /// A constant value.
    Single,
    /// A weighted choice among child distributions (`"discrete"`/`"mixed"`).
    Mixture,
    /// Continuous uniform on `[a, b]`.
    Uniform,
    /// Exponential, optionally bounded above.
    Exponential,
    /// Gaussian, optionally bounded.
    Normal,
}

impl DistributionKind {
    /// Parses the `type` field of a configuration record.
    ///
    /// A missing discriminator is the single-value distribution;
    /// `"discrete"` and `"mixed"` both name a mixture.
    ///
    /// # Errors
    /// Returns [`Error::UnknownType`] for any other string.
    ///
    /// # Examples
    /// ```
    /// use u_variate::DistributionKind;
    /// assert_eq!(DistributionKind::parse(None).unwrap(), DistributionKind::Single);
    /// assert_eq!(DistributionKind::parse(Some("discrete")).unwrap(), DistributionKind::Mixture);
    /// assert!(DistributionKind::parse(Some("poisson")).is_err());
    /// ```
    pub fn parse(kind: Option<&str>) -> Result<Self> {
        match kind {
            None | Some("single") => Ok(Self::Single),
            Some("discrete" | "mixed") => Ok(Self::Mixture),
            Some("uniform") => Ok(Self::Uniform),
            Some("exponential") => Ok(Self::Exponential),
            Some("normal") => Ok(Self::Normal),
            Some(other) => Err(Error::UnknownType(other.to_string())),
        }
    }

    /// Canonical configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Mixture => "mixed",
            Self::Uniform => "uniform",
            Self::Exponential => "exponential",
            Self::Normal => "normal",
        }
    }
}

impl fmt::Display for DistributionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistributionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(Some(s))
    }
}

/// A validated distribution node.
///
/// Build one from a [`DistributionConfig`] (or JSON text) with
/// [`Distribution::from_config`] / [`Distribution::from_json_str`], or
/// directly from the typed constructors. Draw values with
/// [`Distribution::sample`].
///
/// Serializes to, and deserializes through, [`DistributionConfig`], so it
/// can be embedded in larger serde configurations and is validated on load.
///
/// # Examples
/// ```
/// use u_variate::{random::create_rng, Distribution};
///
/// let dist = Distribution::from_json_str(r#"{
///     "type": "discrete",
///     "events": [{"value": 5, "probability": 1}, {"value": 10}]
/// }"#).unwrap();
///
/// let mut rng = create_rng(42);
/// for _ in 0..100 {
///     assert_eq!(dist.sample(&mut rng), 5.0);
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DistributionConfig", into = "DistributionConfig")]
pub enum Distribution {
    /// Always yields the stored value.
    Single(f64),
    /// Weighted choice among owned child distributions.
    Mixture(Mixture),
    /// Continuous uniform.
    Uniform(Uniform),
    /// Exponential with optional upper bound.
    Exponential(Exponential),
    /// Gaussian with optional bounds.
    Normal(Normal),
}

impl Distribution {
    /// Creates a single-value distribution.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if `value` is not finite.
    pub fn single(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(Error::InvalidParameter {
                distribution: "single",
                name: "value",
                value,
            });
        }
        Ok(Self::Single(value))
    }

    /// Validates a configuration record and builds the distribution tree,
    /// recursing into mixture pieces.
    ///
    /// # Errors
    /// Returns the first validation error found. Errors raised inside a
    /// mixture piece are wrapped in [`Error::Piece`] carrying the piece
    /// index; see [`Error::root_cause`].
    pub fn from_config(config: &DistributionConfig) -> Result<Self> {
        let kind = DistributionKind::parse(config.kind.as_deref())?;
        let dist = match kind {
            DistributionKind::Single => {
                let value = config.value.ok_or(Error::MissingValue)?;
                Self::single(value)?
            }
            DistributionKind::Mixture => {
                let children = config
                    .children()
                    .filter(|children| !children.is_empty())
                    .ok_or(Error::MissingChildren)?;
                let given: Vec<Option<f64>> = children.iter().map(|c| c.probability).collect();
                let probabilities = Mixture::resolve_probabilities(&given)?;
                let pieces = children
                    .iter()
                    .enumerate()
                    .map(|(i, child)| Self::from_config(child).map_err(|e| e.in_piece(i)))
                    .collect::<Result<Vec<_>>>()?;
                Self::Mixture(Mixture::from_resolved(probabilities, pieces)?)
            }
            DistributionKind::Uniform => {
                Self::Uniform(Uniform::new(config.a.unwrap_or(0.0), config.b.unwrap_or(1.0))?)
            }
            DistributionKind::Exponential => {
                let mut exp = Exponential::new(config.lambda.unwrap_or(1.0))?;
                if let Some(max) = config.max {
                    exp = exp.with_max(max)?;
                }
                if config.truncate {
                    exp = exp.truncated();
                }
                Self::Exponential(exp)
            }
            DistributionKind::Normal => {
                let mut normal = Normal::new(config.m.unwrap_or(0.0), config.sigma2.unwrap_or(1.0))?
                    .with_bounds(config.min, config.max)?;
                if config.truncate {
                    normal = normal.truncated();
                }
                Self::Normal(normal)
            }
        };
        trace_debug!(kind = %kind, "distribution validated");
        Ok(dist)
    }

    /// Parses JSON text and validates it.
    ///
    /// # Errors
    /// Returns [`Error::Json`] on malformed text, otherwise any validation
    /// error of [`Distribution::from_config`].
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_config(&DistributionConfig::from_json_str(s)?)
    }

    /// Returns the node's type.
    pub fn kind(&self) -> DistributionKind {
        match self {
            Self::Single(_) => DistributionKind::Single,
            Self::Mixture(_) => DistributionKind::Mixture,
            Self::Uniform(_) => DistributionKind::Uniform,
            Self::Exponential(_) => DistributionKind::Exponential,
            Self::Normal(_) => DistributionKind::Normal,
        }
    }

    /// Describes the validated node as a configuration record, with
    /// defaults and resolved mixture probabilities written out.
    ///
    /// Validating the returned record yields a node equal to `self`.
    pub fn to_config(&self) -> DistributionConfig {
        match self {
            Self::Single(value) => DistributionConfig {
                value: Some(*value),
                ..Default::default()
            },
            Self::Mixture(mixture) => DistributionConfig {
                kind: Some(DistributionKind::Mixture.name().into()),
                pieces: Some(
                    mixture
                        .pieces()
                        .iter()
                        .map(|piece| DistributionConfig {
                            probability: Some(piece.probability()),
                            ..piece.distribution().to_config()
                        })
                        .collect(),
                ),
                ..Default::default()
            },
            Self::Uniform(u) => DistributionConfig {
                kind: Some(DistributionKind::Uniform.name().into()),
                a: Some(u.a()),
                b: Some(u.b()),
                ..Default::default()
            },
            Self::Exponential(e) => DistributionConfig {
                kind: Some(DistributionKind::Exponential.name().into()),
                lambda: Some(e.lambda()),
                max: e.max(),
                truncate: e.is_truncated(),
                ..Default::default()
            },
            Self::Normal(n) => DistributionConfig {
                kind: Some(DistributionKind::Normal.name().into()),
                m: Some(n.m()),
                sigma2: Some(n.sigma2()),
                min: n.min(),
                max: n.max(),
                truncate: n.is_truncated(),
                ..Default::default()
            },
        }
    }
}

impl TryFrom<DistributionConfig> for Distribution {
    type Error = Error;

    fn try_from(config: DistributionConfig) -> Result<Self> {
        Self::from_config(&config)
    }
}

impl From<Distribution> for DistributionConfig {
    fn from(dist: Distribution) -> Self {
        dist.to_config()
    }
}

impl FromStr for Distribution {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}

// ============================================================================
// Uniform
// ============================================================================

/// Continuous uniform distribution on `[a, b]`.
///
/// `a == b` is allowed and always yields `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct Uniform {
    pub(crate) a: f64,
    pub(crate) b: f64,
}

impl Uniform {
    /// Creates a uniform distribution on `[a, b]`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if a bound is not finite and
    /// [`Error::InvalidInterval`] if `a > b`.
    pub fn new(a: f64, b: f64) -> Result<Self> {
        for (name, value) in [("a", a), ("b", b)] {
            if !value.is_finite() {
                return Err(Error::InvalidParameter {
                    distribution: "uniform",
                    name,
                    value,
                });
            }
        }
        if a > b {
            return Err(Error::InvalidInterval {
                distribution: "uniform",
                low: a,
                high: b,
            });
        }
        Ok(Self { a, b })
    }

    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }
}

// ============================================================================
// Exponential
// ============================================================================

/// Exponential distribution with rate `lambda`, optionally bounded by `max`.
///
/// With a bound, the default sampler draws from the exponential law
/// conditioned on `X < max`. A [`truncated`](Self::truncated) distribution
/// instead clamps unbounded draws onto `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    pub(crate) lambda: f64,
    pub(crate) max: Option<f64>,
    pub(crate) truncate: bool,
}

impl Exponential {
    /// Creates an unbounded exponential distribution.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] unless `lambda` is finite and `> 0`.
    pub fn new(lambda: f64) -> Result<Self> {
        if !(lambda.is_finite() && lambda > 0.0) {
            return Err(Error::InvalidParameter {
                distribution: "exponential",
                name: "lambda",
                value: lambda,
            });
        }
        Ok(Self {
            lambda,
            max: None,
            truncate: false,
        })
    }

    /// Bounds the distribution above by `max`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] unless `max` is finite and `≥ 0`.
    pub fn with_max(mut self, max: f64) -> Result<Self> {
        if !(max.is_finite() && max >= 0.0) {
            return Err(Error::InvalidParameter {
                distribution: "exponential",
                name: "max",
                value: max,
            });
        }
        self.max = Some(max);
        Ok(self)
    }

    /// Switches to clamping unbounded samples onto `max`.
    pub fn truncated(mut self) -> Self {
        self.truncate = true;
        self
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn is_truncated(&self) -> bool {
        self.truncate
    }
}

// ============================================================================
// Normal
// ============================================================================

/// Normal distribution N(m, sigma2), parameterized by mean and *variance*,
/// with optional bounds.
///
/// The default sampler inverts the CDF over the probability window between
/// the bounds, so every draw lies in `(min, max]`, rounding included. A
/// [`truncated`](Self::truncated) distribution uses Box–Muller and clamps
/// the result onto the bounds instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Normal {
    pub(crate) m: f64,
    pub(crate) sigma2: f64,
    pub(crate) min: Option<f64>,
    pub(crate) max: Option<f64>,
    pub(crate) truncate: bool,
}

impl Normal {
    /// Creates an unbounded normal distribution with mean `m` and
    /// variance `sigma2`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] if `m` is not finite or
    /// `sigma2` is not finite and `> 0`.
    pub fn new(m: f64, sigma2: f64) -> Result<Self> {
        if !m.is_finite() {
            return Err(Error::InvalidParameter {
                distribution: "normal",
                name: "m",
                value: m,
            });
        }
        if !(sigma2.is_finite() && sigma2 > 0.0) {
            return Err(Error::InvalidParameter {
                distribution: "normal",
                name: "sigma2",
                value: sigma2,
            });
        }
        Ok(Self {
            m,
            sigma2,
            min: None,
            max: None,
            truncate: false,
        })
    }

    /// Replaces both bounds. `None` leaves that side open.
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameter`] for a non-finite bound and
    /// [`Error::InvalidInterval`] if `min ≥ max`.
    ///
    /// # Examples
    /// ```
    /// use u_variate::Normal;
    /// let n = Normal::new(10.0, 1.0).unwrap().with_bounds(Some(15.0), Some(18.0)).unwrap();
    /// assert_eq!(n.min(), Some(15.0));
    /// assert!(Normal::new(0.0, 1.0).unwrap().with_bounds(Some(1.0), Some(1.0)).is_err());
    /// ```
    pub fn with_bounds(mut self, min: Option<f64>, max: Option<f64>) -> Result<Self> {
        for (name, bound) in [("min", min), ("max", max)] {
            if let Some(value) = bound.filter(|v| !v.is_finite()) {
                return Err(Error::InvalidParameter {
                    distribution: "normal",
                    name,
                    value,
                });
            }
        }
        if let (Some(low), Some(high)) = (min, max) {
            if low >= high {
                return Err(Error::InvalidInterval {
                    distribution: "normal",
                    low,
                    high,
                });
            }
        }
        self.min = min;
        self.max = max;
        Ok(self)
    }

    /// Sets the lower bound, keeping the upper one.
    ///
    /// # Errors
    /// See [`with_bounds`](Self::with_bounds).
    pub fn with_min(self, min: f64) -> Result<Self> {
        let max = self.max;
        self.with_bounds(Some(min), max)
    }

    /// Sets the upper bound, keeping the lower one.
    ///
    /// # Errors
    /// See [`with_bounds`](Self::with_bounds).
    pub fn with_max(self, max: f64) -> Result<Self> {
        let min = self.min;
        self.with_bounds(min, Some(max))
    }

    /// Switches to Box–Muller sampling with clamping onto the bounds.
    pub fn truncated(mut self) -> Self {
        self.truncate = true;
        self
    }

    /// Mean.
    pub fn m(&self) -> f64 {
        self.m
    }

    /// Variance.
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    /// Standard deviation, `√sigma2`.
    pub fn std_dev(&self) -> f64 {
        self.sigma2.sqrt()
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn is_truncated(&self) -> bool {
        self.truncate
    }
}

// ============================================================================
// Tests
// ============================================================================
