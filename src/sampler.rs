//! Sampling algorithms.
//!
//! Every sampler takes the randomness source as an explicit `&mut R`, so
//! callers choose a seeded, thread-local or shared generator. Sampling a
//! validated node never fails.
//!
//! | Node | Algorithm | Draws |
//! |---|---|---|
//! | Single | stored value | 0 |
//! | [`Mixture`] | cumulative walk over pieces, then recurse | 1 + child |
//! | [`Uniform`] | `a + U·(b − a)` | 1 |
//! | [`Exponential`] | inversion `−ln(U′)/λ`, `U′` restricted below `max` | 1 |
//! | [`Exponential`] (truncated) | inversion, clamped onto `max` | 1 |
//! | [`Normal`] | inversion over the CDF window `(Φ(min), Φ(max)]` | 1 |
//! | [`Normal`] (truncated) | Box–Muller, clamped onto `[min, max]` | 2 |
//!
//! All node types also implement [`rand::distr::Distribution<f64>`], so
//! `rng.sample(&node)` and `node.sample_iter(rng)` work as usual.

use std::f64::consts::TAU;

use rand::Rng;

use crate::distribution::{Distribution, Exponential, Normal, Uniform};
use crate::mixture::Mixture;
use crate::random::unit_open_closed;
use crate::special::{inverse_normal_cdf, standard_normal_cdf};

/// Largest `f64` below 1.
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

/// Keeps a probability strictly inside `(0, 1)` so the quantile is finite.
fn open_unit(p: f64) -> f64 {
    p.clamp(f64::MIN_POSITIVE, ONE_BELOW)
}

impl Distribution {
    /// Draws one value.
    ///
    /// # Examples
    /// ```
    /// use u_variate::{random::create_rng, Distribution};
    ///
    /// let dist = Distribution::from_json_str(r#"{"type": "uniform", "a": 200, "b": 300}"#).unwrap();
    /// let mut rng = create_rng(1);
    /// let x = dist.sample(&mut rng);
    /// assert!((200.0..=300.0).contains(&x));
    /// ```
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Distribution::Single(value) => *value,
            Distribution::Mixture(mixture) => mixture.sample(rng),
            Distribution::Uniform(uniform) => uniform.sample(rng),
            Distribution::Exponential(exponential) => exponential.sample(rng),
            Distribution::Normal(normal) => normal.sample(rng),
        }
    }
}

impl Mixture {
    /// Selects one piece by its probability and samples it.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let index = self.table().sample(rng);
        self.pieces()[index].distribution().sample(rng)
    }
}

impl Uniform {
    /// Draws from `[a, b]`.
    ///
    /// Interpolates between the bounds rather than scaling `b − a`, which
    /// overflows for intervals wider than `f64::MAX`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = rng.random::<f64>();
        ((1.0 - u) * self.a + u * self.b).clamp(self.a, self.b)
    }
}

impl Exponential {
    /// Draws a non-negative value, below `max` when it is set.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = unit_open_closed(rng);

        if self.truncate {
            let x = -u.ln() / self.lambda;
            return self.max.map_or(x, |max| x.min(max));
        }

        match self.max {
            Some(max) => {
                // Restrict U to (e^{-λ·max}, 1] so that −ln(U)/λ < max,
                // written as 1 − U′ to stay exact when λ·max is tiny.
                let width = -(-max * self.lambda).exp_m1();
                let tail = width * (1.0 - u);
                (-(-tail).ln_1p() / self.lambda).min(max)
            }
            None => -u.ln() / self.lambda,
        }
    }
}

impl Normal {
    /// Draws a Gaussian value within the configured bounds.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.truncate {
            self.sample_box_muller(rng)
        } else {
            self.sample_inverse(rng)
        }
    }

    /// Inversion over the probability window between the bounds.
    ///
    /// The lower end of the window is excluded and the upper end included.
    /// A window lying wholly in the upper tail is inverted through the
    /// survival function, where small probabilities keep their precision.
    fn sample_inverse<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let sigma = self.std_dev();
        let z_lo = self.min.map_or(f64::NEG_INFINITY, |min| (min - self.m) / sigma);
        let z_hi = self.max.map_or(f64::INFINITY, |max| (max - self.m) / sigma);
        let u = unit_open_closed(rng);

        let z = if z_lo > 0.0 {
            let s_lo = standard_normal_cdf(-z_lo);
            let s_hi = standard_normal_cdf(-z_hi);
            -inverse_normal_cdf(open_unit(s_lo - u * (s_lo - s_hi)))
        } else {
            let p_lo = standard_normal_cdf(z_lo);
            let p_hi = standard_normal_cdf(z_hi);
            inverse_normal_cdf(open_unit(p_lo + u * (p_hi - p_lo)))
        };

        // The CDF and quantile are approximations; keep the result inside
        // `(min, max]`.
        let x = self.m + sigma * z;
        let x = self.max.map_or(x, |max| x.min(max));
        match self.min {
            Some(min) if x <= min => min.next_up(),
            _ => x,
        }
    }

    /// Box–Muller with clamping onto the bounds.
    fn sample_box_muller<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let phi = TAU * unit_open_closed(rng);
        let r = (-2.0 * unit_open_closed(rng).ln()).sqrt();
        self.clamp(self.m + r * phi.cos() * self.std_dev())
    }

    fn clamp(&self, x: f64) -> f64 {
        let x = self.max.map_or(x, |max| x.min(max));
        self.min.map_or(x, |min| x.max(min))
    }
}

macro_rules! impl_rand_distribution {
    ($($ty:ty),* $(,)?) => {
        $(
            impl rand::distr::Distribution<f64> for $ty {
                fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
                    <$ty>::sample(self, rng)
                }
            }
        )*
    };
}

impl_rand_distribution!(Distribution, Mixture, Uniform, Exponential, Normal);

// ============================================================================
// Tests
// ============================================================================
