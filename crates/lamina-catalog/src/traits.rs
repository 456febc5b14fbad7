//! Immutable trait roll specifications.

use lamina_core::errors::ErrorInfo;
use lamina_core::LaminaError;
use serde_json::Number;

use crate::config::TraitConfig;

/// How a trait's value roll is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum TraitKind {
    /// `value = roll * max + min`, rounded to `precision` decimal places
    /// (0 means nearest integer).
    Range {
        /// Additive lower offset.
        min: f64,
        /// Multiplicative upper bound.
        max: f64,
        /// Decimal places inferred from the configured max's literal form.
        precision: usize,
    },
    /// `value = values[floor(roll * len)]`.
    Set {
        /// Ordered candidate values.
        values: Vec<String>,
    },
}

/// One trait declaration, resolved and validated.
#[derive(Debug, Clone, PartialEq)]
pub struct TraitSpec {
    /// Attribute key this trait writes.
    pub key: String,
    /// Chance threshold against `floor(roll * N)`.
    pub chance: u64,
    /// Value interpretation.
    pub kind: TraitKind,
}

impl TraitSpec {
    /// Resolves a raw config declaration, rejecting ambiguous shapes.
    pub fn from_config(config: &TraitConfig) -> Result<Self, LaminaError> {
        let kind = match (&config.range, &config.values) {
            (Some(_), Some(_)) => {
                return Err(trait_error(
                    &config.key,
                    "trait declares both a range and a value set",
                ))
            }
            (None, None) => {
                return Err(trait_error(
                    &config.key,
                    "trait declares neither a range nor a value set",
                ))
            }
            (Some(range), None) => {
                if range.len() != 2 {
                    return Err(trait_error(&config.key, "range must be [min, max]"));
                }
                let min = number_as_f64(&config.key, &range[0])?;
                let max = number_as_f64(&config.key, &range[1])?;
                TraitKind::Range {
                    min,
                    max,
                    precision: decimal_places(&range[1]),
                }
            }
            (None, Some(values)) => {
                if values.is_empty() {
                    return Err(trait_error(&config.key, "value set must not be empty"));
                }
                TraitKind::Set {
                    values: values.clone(),
                }
            }
        };
        Ok(Self {
            key: config.key.clone(),
            chance: config.chance,
            kind,
        })
    }
}

/// Counts the decimal places of a number's literal rendering.
///
/// `10` and `10.0` round-trip through the JSON parser to "10" and "10.0",
/// so an integer-valued float literal keeps one decimal place while a plain
/// integer keeps none.
pub fn decimal_places(number: &Number) -> usize {
    let rendered = number.to_string();
    match rendered.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => 0,
    }
}

fn number_as_f64(key: &str, number: &Number) -> Result<f64, LaminaError> {
    number
        .as_f64()
        .ok_or_else(|| trait_error(key, "range bound is not a finite number"))
}

fn trait_error(key: &str, message: &str) -> LaminaError {
    LaminaError::Config(ErrorInfo::new("trait-invalid", message).with_context("trait", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> TraitConfig {
        serde_json::from_str(json).expect("trait config")
    }

    #[test]
    fn range_precision_follows_the_literal() {
        let spec = TraitSpec::from_config(&config(
            r#"{ "trait": "Power", "chance": 40, "range": [1, 10.0] }"#,
        ))
        .expect("spec");
        assert_eq!(
            spec.kind,
            TraitKind::Range {
                min: 1.0,
                max: 10.0,
                precision: 1
            }
        );

        let integral = TraitSpec::from_config(&config(
            r#"{ "trait": "Level", "chance": 40, "range": [0, 10] }"#,
        ))
        .expect("spec");
        assert!(matches!(
            integral.kind,
            TraitKind::Range { precision: 0, .. }
        ));
    }

    #[test]
    fn both_shapes_at_once_are_rejected() {
        let err = TraitSpec::from_config(&config(
            r#"{ "trait": "X", "chance": 1, "range": [0, 1], "values": ["a"] }"#,
        ))
        .unwrap_err();
        assert_eq!(err.info().code, "trait-invalid");
    }

    #[test]
    fn empty_value_set_is_rejected() {
        let err =
            TraitSpec::from_config(&config(r#"{ "trait": "X", "chance": 1, "values": [] }"#))
                .unwrap_err();
        assert_eq!(err.info().code, "trait-invalid");
    }
}
