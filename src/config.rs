//! Declarative distribution configuration.
//!
//! A [`DistributionConfig`] is the raw, unvalidated record a distribution is
//! built from. It mirrors the JSON shape:
//!
//! ```json
//! {
//!   "type": "mixed",
//!   "pieces": [
//!     { "value": 1, "probability": 0.4 },
//!     { "type": "uniform", "a": 4, "b": 7 },
//!     { "type": "normal", "m": 20, "sigma2": 5, "min": 0, "max": 20 }
//!   ]
//! }
//! ```
//!
//! Every field is optional at this level; which fields are required, and
//! their defaults, depends on `type` and is enforced by
//! [`Distribution::from_config`](crate::Distribution::from_config).
//! Unknown fields are ignored.

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Raw configuration record for one distribution node.
///
/// A mixture piece is itself a `DistributionConfig`; its `probability`
/// field is only read by the enclosing mixture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Type discriminator; `None` means a single value.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Value of a single-value distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Pieces of a mixture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pieces: Option<Vec<DistributionConfig>>,
    /// Alias for `pieces`, read when `pieces` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<DistributionConfig>>,
    /// Probability of this node inside its parent mixture.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
    /// Rate of an exponential distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<f64>,
    /// Mean of a normal distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub m: Option<f64>,
    /// Variance of a normal distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sigma2: Option<f64>,
    /// Lower end of a uniform interval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    /// Upper end of a uniform interval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    /// Lower bound of a normal distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound of a normal or exponential distribution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Clamp an unbounded sample instead of sampling the bounded range.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub truncate: bool,
}

impl DistributionConfig {
    /// Parses a configuration record from JSON text.
    ///
    /// Nesting depth is not limited; very deep mixtures are bounded only by
    /// the thread's stack.
    ///
    /// # Errors
    /// Returns [`Error::Json`](crate::Error::Json) on malformed input.
    ///
    /// # Examples
    /// ```
    /// use u_variate::DistributionConfig;
    /// let cfg = DistributionConfig::from_json_str(r#"{"type": "uniform", "b": 5}"#).unwrap();
    /// assert_eq!(cfg.kind.as_deref(), Some("uniform"));
    /// assert_eq!(cfg.a, None);
    /// assert_eq!(cfg.b, Some(5.0));
    /// ```
    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_deserializer(serde_json::Deserializer::from_str(s))
    }

    /// Converts an already parsed JSON value.
    ///
    /// # Errors
    /// Returns [`Error::Json`](crate::Error::Json) if the value does not
    /// have the shape of a configuration record.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Reads a configuration record from a JSON stream, e.g. a file.
    ///
    /// # Errors
    /// Returns [`Error::Json`](crate::Error::Json) on I/O failure or
    /// malformed input.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self> {
        Self::from_deserializer(serde_json::Deserializer::from_reader(reader))
    }

    fn from_deserializer<'de, R: serde_json::de::Read<'de>>(
        mut de: serde_json::Deserializer<R>,
    ) -> Result<Self> {
        de.disable_recursion_limit();
        let config = Self::deserialize(&mut de)?;
        de.end()?;
        Ok(config)
    }

    /// Returns the mixture pieces, preferring `pieces` over `events`.
    pub fn children(&self) -> Option<&[DistributionConfig]> {
        self.pieces.as_deref().or(self.events.as_deref())
    }

    /// Serializes the record to compact JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_all_unset() {
        let cfg = DistributionConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, DistributionConfig::default());
        assert!(!cfg.truncate);
    }

    #[test]
    fn test_zero_is_present() {
        let cfg = DistributionConfig::from_json_value(json!({
            "type": "normal", "min": 0, "max": 0.5, "probability": 0
        }))
        .unwrap();
        assert_eq!(cfg.min, Some(0.0));
        assert_eq!(cfg.probability, Some(0.0));
    }

    #[test]
    fn test_children_prefers_pieces() {
        let cfg = DistributionConfig::from_json_value(json!({
            "type": "mixed",
            "pieces": [{ "value": 1 }],
            "events": [{ "value": 2 }, { "value": 3 }]
        }))
        .unwrap();
        assert_eq!(cfg.children().map(<[_]>::len), Some(1));

        let events_only = DistributionConfig::from_json_value(json!({
            "type": "discrete",
            "events": [{ "value": 2 }, { "value": 3 }]
        }))
        .unwrap();
        assert_eq!(events_only.children().map(<[_]>::len), Some(2));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let cfg = DistributionConfig::from_json_str(r#"{"value": 3, "label": "x"}"#).unwrap();
        assert_eq!(cfg.value, Some(3.0));
    }

    #[test]
    fn test_wrong_field_type_is_json_error() {
        let err = DistributionConfig::from_json_str(r#"{"lambda": "fast"}"#).unwrap_err();
        assert!(matches!(err, crate::Error::Json(_)));
    }

    #[test]
    fn test_trailing_characters_rejected() {
        assert!(DistributionConfig::from_json_str(r#"{"value": 1} x"#).is_err());
    }

    #[test]
    fn test_nesting_beyond_default_depth_limit() {
        let depth = 80;
        let text = format!(
            "{}{{\"value\": 9}}{}",
            r#"{"type": "mixed", "pieces": ["#.repeat(depth),
            "]}".repeat(depth)
        );
        let mut cfg = DistributionConfig::from_json_str(&text).unwrap();
        for _ in 0..depth {
            cfg = cfg.children().unwrap()[0].clone();
        }
        assert_eq!(cfg.value, Some(9.0));

        let from_reader = DistributionConfig::from_reader(text.as_bytes()).unwrap();
        assert_eq!(from_reader.kind.as_deref(), Some("mixed"));
    }

    #[test]
    fn test_reader() {
        let text = br#"{"type": "exponential", "lambda": 3, "truncate": true}"#;
        let cfg = DistributionConfig::from_reader(&text[..]).unwrap();
        assert_eq!(cfg.lambda, Some(3.0));
        assert!(cfg.truncate);
    }

    #[test]
    fn test_serialization_skips_unset() {
        let cfg = DistributionConfig {
            kind: Some("uniform".into()),
            a: Some(1.0),
            ..Default::default()
        };
        assert_eq!(cfg.to_json_string().unwrap(), r#"{"type":"uniform","a":1.0}"#);
    }
}
