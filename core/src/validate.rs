//! Flag value validation failures.
//!
//! Callers that check flag values against constraints (ranges, allowed
//! values, patterns, thresholds) report violations with
//! [`FlagValidationError`]. The checker functions in this module raise them;
//! the merge itself never does.
//!
//! # Examples
//!
//! ```
//! use flag_merge_core::*;
//!
//! assert!(in_range("quality", 85, 1, 100).is_ok());
//!
//! let err = in_range("quality", 120, 1, 100).unwrap_err();
//! assert!(err.is_out_of_range());
//! assert_eq!(err.flag(), "quality");
//! assert_eq!(err.to_string(), "--quality: 120 is not between 1 and 100");
//! ```

use std::fmt::Display;

use regex::Regex;
use thiserror::Error;

use crate::flag_token;

/// A flag value that violates a constraint.
///
/// Every variant carries the flag name and the offending value as given.
/// Bounds are kept as display strings so constraints over any ordered type
/// can be reported. None of these failures are retryable: they describe
/// user input that must change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlagValidationError {
    /// Value lies outside the inclusive range `low..=high`.
    #[error("{}: {value} is not between {low} and {high}", flag_token(.flag))]
    OutOfRange {
        flag: String,
        value: String,
        low: String,
        high: String,
    },
    /// Value lies inside the forbidden inclusive range `low..=high`.
    #[error("{}: {value} must not be between {low} and {high}", flag_token(.flag))]
    InsideForbiddenRange {
        flag: String,
        value: String,
        low: String,
        high: String,
    },
    /// Value is not one of the allowed values.
    #[error("{}: {value} is not one of [{}]", flag_token(.flag), .collection.join(", "))]
    NotMember {
        flag: String,
        value: String,
        collection: Vec<String>,
    },
    /// Value is one of the forbidden values.
    #[error("{}: {value} must not be one of [{}]", flag_token(.flag), .collection.join(", "))]
    ForbiddenMember {
        flag: String,
        value: String,
        collection: Vec<String>,
    },
    /// Value does not match the required pattern.
    #[error("{}: {value} does not match /{pattern}/", flag_token(.flag))]
    PatternMismatch {
        flag: String,
        value: String,
        pattern: String,
    },
    /// Value matches a forbidden pattern.
    #[error("{}: {value} must not match /{pattern}/", flag_token(.flag))]
    ForbiddenPatternMatch {
        flag: String,
        value: String,
        pattern: String,
    },
    /// Value is not strictly greater than the threshold.
    #[error("{}: {value} must be greater than {threshold}", flag_token(.flag))]
    BelowThreshold {
        flag: String,
        value: String,
        threshold: String,
    },
    /// Value is not strictly less than the threshold.
    #[error("{}: {value} must be less than {threshold}", flag_token(.flag))]
    AboveThreshold {
        flag: String,
        value: String,
        threshold: String,
    },
    /// Value is less than the inclusive minimum.
    #[error("{}: {value} must be at least {threshold}", flag_token(.flag))]
    NotAtLeast {
        flag: String,
        value: String,
        threshold: String,
    },
    /// Value is greater than the inclusive maximum.
    #[error("{}: {value} must be at most {threshold}", flag_token(.flag))]
    NotAtMost {
        flag: String,
        value: String,
        threshold: String,
    },
}

impl FlagValidationError {
    /// Bare name of the offending flag.
    pub fn flag(&self) -> &str {
        match self {
            Self::OutOfRange { flag, .. }
            | Self::InsideForbiddenRange { flag, .. }
            | Self::NotMember { flag, .. }
            | Self::ForbiddenMember { flag, .. }
            | Self::PatternMismatch { flag, .. }
            | Self::ForbiddenPatternMatch { flag, .. }
            | Self::BelowThreshold { flag, .. }
            | Self::AboveThreshold { flag, .. }
            | Self::NotAtLeast { flag, .. }
            | Self::NotAtMost { flag, .. } => flag,
        }
    }

    /// The rejected value.
    pub fn value(&self) -> &str {
        match self {
            Self::OutOfRange { value, .. }
            | Self::InsideForbiddenRange { value, .. }
            | Self::NotMember { value, .. }
            | Self::ForbiddenMember { value, .. }
            | Self::PatternMismatch { value, .. }
            | Self::ForbiddenPatternMatch { value, .. }
            | Self::BelowThreshold { value, .. }
            | Self::AboveThreshold { value, .. }
            | Self::NotAtLeast { value, .. }
            | Self::NotAtMost { value, .. } => value,
        }
    }

    /// Always `false`; validation failures need different input.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Value fell outside a required range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    /// Value fell inside a forbidden range.
    pub fn is_inside_forbidden_range(&self) -> bool {
        matches!(self, Self::InsideForbiddenRange { .. })
    }

    /// Value is not in the allowed collection.
    pub fn is_not_member(&self) -> bool {
        matches!(self, Self::NotMember { .. })
    }

    /// Value is in the forbidden collection.
    pub fn is_forbidden_member(&self) -> bool {
        matches!(self, Self::ForbiddenMember { .. })
    }

    /// Value does not match the required pattern.
    pub fn is_pattern_mismatch(&self) -> bool {
        matches!(self, Self::PatternMismatch { .. })
    }

    /// Value matches a forbidden pattern.
    pub fn is_forbidden_pattern_match(&self) -> bool {
        matches!(self, Self::ForbiddenPatternMatch { .. })
    }

    /// Value is not strictly greater than the threshold.
    pub fn is_below_threshold(&self) -> bool {
        matches!(self, Self::BelowThreshold { .. })
    }

    /// Value is not strictly less than the threshold.
    pub fn is_above_threshold(&self) -> bool {
        matches!(self, Self::AboveThreshold { .. })
    }

    /// Value is below the minimum.
    pub fn is_not_at_least(&self) -> bool {
        matches!(self, Self::NotAtLeast { .. })
    }

    /// Value is above the maximum.
    pub fn is_not_at_most(&self) -> bool {
        matches!(self, Self::NotAtMost { .. })
    }
}

type CheckResult = Result<(), FlagValidationError>;

/// Requires `low <= value <= high`.
pub fn in_range<T: PartialOrd + Display>(flag: &str, value: T, low: T, high: T) -> CheckResult {
    if low <= value && value <= high {
        return Ok(());
    }
    Err(FlagValidationError::OutOfRange {
        flag: flag.to_string(),
        value: value.to_string(),
        low: low.to_string(),
        high: high.to_string(),
    })
}

/// Requires `value` to lie outside `low..=high`.
pub fn not_in_range<T: PartialOrd + Display>(flag: &str, value: T, low: T, high: T) -> CheckResult {
    if !(low <= value && value <= high) {
        return Ok(());
    }
    Err(FlagValidationError::InsideForbiddenRange {
        flag: flag.to_string(),
        value: value.to_string(),
        low: low.to_string(),
        high: high.to_string(),
    })
}

/// Requires `value` to be one of `collection`.
pub fn one_of<S: AsRef<str>>(flag: &str, value: &str, collection: &[S]) -> CheckResult {
    if collection.iter().any(|c| c.as_ref() == value) {
        return Ok(());
    }
    Err(FlagValidationError::NotMember {
        flag: flag.to_string(),
        value: value.to_string(),
        collection: owned(collection),
    })
}

/// Requires `value` to be none of `collection`.
pub fn none_of<S: AsRef<str>>(flag: &str, value: &str, collection: &[S]) -> CheckResult {
    if !collection.iter().any(|c| c.as_ref() == value) {
        return Ok(());
    }
    Err(FlagValidationError::ForbiddenMember {
        flag: flag.to_string(),
        value: value.to_string(),
        collection: owned(collection),
    })
}

/// Requires `value` to match the regular expression `pattern`.
///
/// A pattern that fails to compile matches nothing.
pub fn matches_pattern(flag: &str, value: &str, pattern: &str) -> CheckResult {
    let matched = Regex::new(pattern).is_ok_and(|re| re.is_match(value));
    if matched {
        return Ok(());
    }
    Err(FlagValidationError::PatternMismatch {
        flag: flag.to_string(),
        value: value.to_string(),
        pattern: pattern.to_string(),
    })
}

/// Requires `value` not to match the regular expression `pattern`.
///
/// A pattern that fails to compile matches nothing.
pub fn not_matches_pattern(flag: &str, value: &str, pattern: &str) -> CheckResult {
    let matched = Regex::new(pattern).is_ok_and(|re| re.is_match(value));
    if !matched {
        return Ok(());
    }
    Err(FlagValidationError::ForbiddenPatternMatch {
        flag: flag.to_string(),
        value: value.to_string(),
        pattern: pattern.to_string(),
    })
}

/// Requires `value > threshold`.
pub fn greater_than<T: PartialOrd + Display>(flag: &str, value: T, threshold: T) -> CheckResult {
    if value > threshold {
        return Ok(());
    }
    Err(FlagValidationError::BelowThreshold {
        flag: flag.to_string(),
        value: value.to_string(),
        threshold: threshold.to_string(),
    })
}

/// Requires `value < threshold`.
pub fn less_than<T: PartialOrd + Display>(flag: &str, value: T, threshold: T) -> CheckResult {
    if value < threshold {
        return Ok(());
    }
    Err(FlagValidationError::AboveThreshold {
        flag: flag.to_string(),
        value: value.to_string(),
        threshold: threshold.to_string(),
    })
}

/// Requires `value >= threshold`.
pub fn at_least<T: PartialOrd + Display>(flag: &str, value: T, threshold: T) -> CheckResult {
    if value >= threshold {
        return Ok(());
    }
    Err(FlagValidationError::NotAtLeast {
        flag: flag.to_string(),
        value: value.to_string(),
        threshold: threshold.to_string(),
    })
}

/// Requires `value <= threshold`.
pub fn at_most<T: PartialOrd + Display>(flag: &str, value: T, threshold: T) -> CheckResult {
    if value <= threshold {
        return Ok(());
    }
    Err(FlagValidationError::NotAtMost {
        flag: flag.to_string(),
        value: value.to_string(),
        threshold: threshold.to_string(),
    })
}

fn owned<S: AsRef<str>>(collection: &[S]) -> Vec<String> {
    collection.iter().map(|c| c.as_ref().to_string()).collect()
}
