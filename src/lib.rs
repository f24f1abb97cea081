//! # u-variate
//!
//! Declarative random-variate distributions for simulation and test-data
//! generation.
//!
//! A distribution is described by a small configuration record, validated
//! once into an immutable tree, and then sampled any number of times with
//! a caller-supplied random number generator. Mixtures nest to any depth.
//!
//! ```
//! use u_variate::{random::create_rng, Distribution};
//!
//! let service_time = Distribution::from_json_str(r#"{
//!     "type": "mixed",
//!     "pieces": [
//!         { "value": 1, "probability": 0.4 },
//!         { "type": "uniform", "a": 4, "b": 7, "probability": 0.1 },
//!         { "type": "exponential", "lambda": 3, "max": 100, "probability": 0.1 },
//!         { "type": "normal", "m": 20, "sigma2": 5, "min": 0, "max": 20 },
//!         { "type": "discrete", "events": [{ "value": 2 }, { "value": 3 }] }
//!     ]
//! }"#).unwrap();
//!
//! let mut rng = create_rng(42);
//! let x = service_time.sample(&mut rng);
//! assert!(x >= 0.0 && x <= 100.0);
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Raw configuration records and JSON loaders
//! - [`distribution`] — The validated distribution tree and leaf types
//! - [`mixture`] — Mixture probability resolution
//! - [`sampler`] — Sampling algorithms
//! - [`special`] — Normal CDF and quantile approximations
//! - [`random`] — Seeded RNGs and selection helpers
//! - [`stats`] — Kolmogorov–Smirnov goodness-of-fit checks
//!
//! ## Design Philosophy
//!
//! - **Validate once**: every check happens at construction; sampling is
//!   total over a valid tree
//! - **Explicit randomness**: the RNG is always a parameter, never global
//! - **Explicit presence**: a parameter equal to `0` is a real value, not
//!   "unset"
//!
//! ## Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `tracing` | Debug events via [`tracing`](https://docs.rs/tracing) during construction | off |

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod config;
pub mod distribution;
mod error;
pub mod mixture;
pub mod random;
pub mod sampler;
pub mod special;
pub mod stats;

pub use config::DistributionConfig;
pub use distribution::{Distribution, DistributionKind, Exponential, Normal, Uniform};
pub use error::{Error, Result};
pub use mixture::{Mixture, Piece};
