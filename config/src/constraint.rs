//! Per-flag value constraints declared in a profile.
//!
//! ```yaml
//! convert:
//!   constraints:
//!     quality: { min: 1, max: 100 }
//!     interlace: { one_of: [line, plane, none] }
//!     sampling-factor: { pattern: '^\d:\d:\d$' }
//! ```
//!
//! Numeric constraints first require the value to look like a number and
//! report a [`PatternMismatch`](FlagValidationError::PatternMismatch)
//! against [`NUMBER_PATTERN`] otherwise.

use flag_merge_core::{
    AliasMap, FlagValidationError, SpecifiedFlags, at_least, at_most, greater_than, in_range,
    less_than, matches_pattern, none_of, not_in_range, not_matches_pattern, one_of,
};

use crate::document::ConfigDocument;
use crate::error::{ConfigError, Result};

/// Values accepted by numeric constraints.
pub const NUMBER_PATTERN: &str = r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$";

/// One rule a flag value must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// `low <= value <= high`.
    Between(f64, f64),
    /// `value < low || value > high`.
    NotBetween(f64, f64),
    /// `value >= threshold`.
    Min(f64),
    /// `value <= threshold`.
    Max(f64),
    /// `value > threshold`.
    GreaterThan(f64),
    /// `value < threshold`.
    LessThan(f64),
    /// Value is one of the listed strings.
    OneOf(Vec<String>),
    /// Value is none of the listed strings.
    NoneOf(Vec<String>),
    /// Value matches the regular expression.
    Pattern(String),
    /// Value does not match the regular expression.
    NotPattern(String),
}

impl Constraint {
    /// Checks `value` given for `flag`.
    pub fn check(&self, flag: &str, value: &str) -> std::result::Result<(), FlagValidationError> {
        match self {
            Self::OneOf(allowed) => return one_of(flag, value, allowed),
            Self::NoneOf(denied) => return none_of(flag, value, denied),
            Self::Pattern(pattern) => return matches_pattern(flag, value, pattern),
            Self::NotPattern(pattern) => return not_matches_pattern(flag, value, pattern),
            _ => {}
        }

        matches_pattern(flag, value, NUMBER_PATTERN)?;
        let number: f64 = value.parse().unwrap_or(f64::NAN);
        match *self {
            Self::Between(low, high) => in_range(flag, number, low, high),
            Self::NotBetween(low, high) => not_in_range(flag, number, low, high),
            Self::Min(threshold) => at_least(flag, number, threshold),
            Self::Max(threshold) => at_most(flag, number, threshold),
            Self::GreaterThan(threshold) => greater_than(flag, number, threshold),
            Self::LessThan(threshold) => less_than(flag, number, threshold),
            Self::OneOf(_) | Self::NoneOf(_) | Self::Pattern(_) | Self::NotPattern(_) => Ok(()),
        }
    }
}

/// Constraints for every constrained flag of a profile, keyed by the name
/// used in the configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstraintSet {
    rules: Vec<(String, Constraint)>,
}

impl ConstraintSet {
    /// Reads the `constraints` mapping of a profile section.
    ///
    /// Recognised keys per flag: `min`, `max` (combined into a range when
    /// both are present), `greater_than`, `less_than`, `not_between`
    /// (two-element list), `one_of`, `none_of`, `pattern`, `not_pattern`.
    pub fn from_section(section: &ConfigDocument) -> Result<Self> {
        let mut rules = Vec::new();
        let Some(root) = section.section("constraints")? else {
            return Ok(Self { rules });
        };
        let Some(entries) = root.root().as_object() else {
            return Ok(Self { rules });
        };

        for (name, value) in entries {
            if !value.is_object() {
                return Err(ConfigError::TypeMismatch {
                    path: format!("constraints.{name}"),
                    expected: "a mapping",
                });
            }
            let flag = ConfigDocument::from_value(value.clone());
            let path = |key: &str| format!("constraints.{name}.{key}");
            let number = |key: &str| -> Result<Option<f64>> {
                flag.get_f64(key).map_err(|_| ConfigError::TypeMismatch {
                    path: path(key),
                    expected: "a number",
                })
            };

            match (number("min")?, number("max")?) {
                (Some(low), Some(high)) => rules.push((name.clone(), Constraint::Between(low, high))),
                (Some(low), None) => rules.push((name.clone(), Constraint::Min(low))),
                (None, Some(high)) => rules.push((name.clone(), Constraint::Max(high))),
                (None, None) => {}
            }
            if let Some(threshold) = number("greater_than")? {
                rules.push((name.clone(), Constraint::GreaterThan(threshold)));
            }
            if let Some(threshold) = number("less_than")? {
                rules.push((name.clone(), Constraint::LessThan(threshold)));
            }
            if let Some(bounds) = flag.get_string_list("not_between")? {
                let parsed: Vec<f64> = bounds.iter().filter_map(|b| b.parse().ok()).collect();
                let [low, high] = parsed.as_slice() else {
                    return Err(ConfigError::TypeMismatch {
                        path: path("not_between"),
                        expected: "two numbers",
                    });
                };
                rules.push((name.clone(), Constraint::NotBetween(*low, *high)));
            }
            if let Some(allowed) = flag.get_string_list("one_of")? {
                rules.push((name.clone(), Constraint::OneOf(allowed)));
            }
            if let Some(denied) = flag.get_string_list("none_of")? {
                rules.push((name.clone(), Constraint::NoneOf(denied)));
            }
            if let Some(pattern) = flag.get_string("pattern")? {
                rules.push((name.clone(), Constraint::Pattern(pattern)));
            }
            if let Some(pattern) = flag.get_string("not_pattern")? {
                rules.push((name.clone(), Constraint::NotPattern(pattern)));
            }
        }

        Ok(Self { rules })
    }

    /// Adds a rule for `flag`.
    pub fn push(&mut self, flag: impl Into<String>, constraint: Constraint) {
        self.rules.push((flag.into(), constraint));
    }

    /// Returns `true` if no rules are declared.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Checks every specified flag against the rules declared for it under
    /// either spelling, returning all violations in specification order.
    pub fn check(&self, specified: &SpecifiedFlags, aliases: &AliasMap) -> Vec<FlagValidationError> {
        let mut failures = Vec::new();
        for (flag, value) in specified.iter() {
            let other = aliases.counterpart(flag);
            for (name, constraint) in &self.rules {
                if name != flag && Some(name.as_str()) != other {
                    continue;
                }
                if let Err(err) = constraint.check(flag, value) {
                    failures.push(err);
                }
            }
        }
        failures
    }
}
